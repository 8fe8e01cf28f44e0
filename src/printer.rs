use crate::ast::Expr;
use std::fmt;

/// Fully parenthesized rendering of a tree, for diagnostics only.
///
/// Finite leaves print in plain decimal and lex back to the same value.
/// A literal too large for `f64` prints as `inf`, which the lexer does not
/// accept, so such trees do not round-trip.
pub fn print_tree(expr: &Expr) -> String {
    match expr {
        Expr::Leaf { value, .. } => format!("{}", value),
        Expr::BinaryOp {
            operator,
            left,
            right,
            ..
        } => format!(
            "({} {} {})",
            print_tree(left),
            operator.symbol(),
            print_tree(right)
        ),
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", print_tree(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use crate::parser::Parser;

    fn tree(input: &str) -> String {
        let tokens = tokenize(input).unwrap();
        print_tree(&Parser::new(&tokens).parse().unwrap())
    }

    #[test]
    fn leaf() {
        assert_eq!(tree("42"), "42");
        assert_eq!(tree("2.50"), "2.5");
        assert_eq!(tree("-7"), "-7");
    }

    #[test]
    fn nested() {
        assert_eq!(tree("2 + 3 * (4 - 1)"), "(2 + (3 * (4 - 1)))");
        assert_eq!(tree("8 - 3 - 2"), "((8 - 3) - 2)");
    }

    #[test]
    fn redundant_parentheses_collapse() {
        assert_eq!(tree("((1))"), "1");
        assert_eq!(tree("((1 + 2))"), "(1 + 2)");
    }

    #[test]
    fn overflowing_literal_prints_as_inf() {
        let input = "9".repeat(400) + " + 1";
        assert_eq!(tree(&input), "(inf + 1)");
        assert!(matches!(
            tokenize("(inf + 1)"),
            Err(crate::error::CalcError::Lexical { ch: 'i', position: 1 })
        ));
    }

    #[test]
    fn display_matches_print_tree() {
        let tokens = tokenize("1 / 4").unwrap();
        let expr = Parser::new(&tokens).parse().unwrap();
        assert_eq!(expr.to_string(), "(1 / 4)");
    }

    #[test]
    fn printed_tree_reparses_to_the_same_value() {
        for input in ["2 + 3 * 4", "-5 + 3", "8 - 3 - 2", "1 / 3 * 3", "2 * -3 - -4", "0.1 + 0.2"] {
            let tokens = tokenize(input).unwrap();
            let expr = Parser::new(&tokens).parse().unwrap();
            let printed = print_tree(&expr);
            let reparsed_tokens = tokenize(&printed).unwrap();
            let reparsed = Parser::new(&reparsed_tokens).parse().unwrap();
            assert_eq!(
                reparsed.value().to_bits(),
                expr.value().to_bits(),
                "{} printed as {}",
                input,
                printed
            );
        }
    }
}
