// calcc: arithmetic expression compiler
//
// Lexes, parses and evaluates expressions like "2 + 3 * (4 - 1)" in one
// pass, with labeled diagnostics for every failure.

// Public modules
pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod repl;
pub mod runner;
pub mod validate;

// Re-export commonly used items
pub use ast::{BinaryOp, Expr};
pub use error::{CalcError, Expected, Span};
pub use lexer::{tokenize, Lexer, Token, TokenKind};
pub use parser::{parse_expression, Parser, MAX_NESTING};
pub use printer::print_tree;
pub use runner::{compile, evaluate, RunOptions};

// Re-export main functions
pub use repl::start as start_repl;
pub use runner::run;
