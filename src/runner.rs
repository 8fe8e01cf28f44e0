use crate::ast::Expr;
use crate::error::CalcError;
use crate::lexer::Lexer;
use crate::parser::Parser;
use crate::printer::print_tree;
use crate::validate;

/// Switches shared by the script runner and the REPL.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Print the parenthesized tree next to each result.
    pub show_tree: bool,
    /// Refuse numbers with leading zeros.
    pub strict: bool,
}

/// Tokenize and parse `source` as exactly one expression.
pub fn compile(source: &str, options: &RunOptions) -> Result<Expr, CalcError> {
    let tokens = Lexer::new(source).scan_tokens()?;
    log::debug!("tokens: {:?}", tokens);

    if options.strict {
        validate::check_strict(&tokens)?;
    }

    let expr = Parser::new(&tokens).ending_at(source.len()).parse()?;
    log::debug!("tree: {}", print_tree(&expr));
    Ok(expr)
}

/// Compile `source` and return its value.
pub fn evaluate(source: &str) -> Result<f64, CalcError> {
    compile(source, &RunOptions::default()).map(|expr| expr.value())
}

/// Evaluate and print one expression, reporting any error.
pub fn run_line(source: &str, filename: Option<&str>, options: &RunOptions) -> bool {
    match compile(source, options) {
        Ok(expr) => {
            if options.show_tree {
                println!("{} = {}", print_tree(&expr), expr.value());
            } else {
                println!("{}", expr.value());
            }
            true
        }
        Err(error) => {
            error.report(source, filename);
            false
        }
    }
}

/// Evaluate every non-blank line of a script. Returns false if any line failed.
pub fn run(source: &str, filename: Option<&str>, options: &RunOptions) -> bool {
    let mut ok = true;

    for (number, line) in source.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        log::debug!("line {}: {}", number + 1, line);
        ok &= run_line(line, filename, options);
    }

    ok
}
