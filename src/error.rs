use ariadne::{Color, Fmt, Label, Report, ReportKind, Source};
use std::fmt;
use thiserror::Error;

use crate::lexer::TokenKind;

/// Byte range into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Smallest span covering both `self` and `other`.
    pub fn to(self, other: Span) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// What the parser was looking for when it hit the wrong token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    RParen,
    NumberOrLParen,
    EndOfInput,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expected::RParen => write!(f, "')'"),
            Expected::NumberOrLParen => write!(f, "a number or '('"),
            Expected::EndOfInput => write!(f, "end of input"),
        }
    }
}

/// Every way compiling and evaluating an expression can fail.
///
/// The first error aborts the pipeline; no partial tree or value is ever
/// returned alongside it. `position` is always a byte offset into the source.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("unexpected character '{ch}' at position {position}")]
    Lexical { ch: char, position: usize },

    #[error("malformed number '{text}' at position {position}")]
    NumberFormat {
        text: String,
        position: usize,
        span: Span,
    },

    #[error("expected {expected}, found {found} at position {position}")]
    UnexpectedToken {
        expected: Expected,
        found: TokenKind,
        text: String,
        position: usize,
        span: Span,
    },

    #[error("division by zero at position {position}")]
    DivisionByZero { position: usize, span: Span },

    #[error("parentheses nested deeper than {limit} levels at position {position}")]
    NestingTooDeep {
        limit: usize,
        position: usize,
        span: Span,
    },

    #[error("number '{text}' has a leading zero at position {position}")]
    LeadingZero {
        text: String,
        position: usize,
        span: Span,
    },
}

impl CalcError {
    pub fn span(&self) -> Span {
        match self {
            CalcError::Lexical { ch, position } => Span::new(*position, position + ch.len_utf8()),
            CalcError::NumberFormat { span, .. }
            | CalcError::UnexpectedToken { span, .. }
            | CalcError::DivisionByZero { span, .. }
            | CalcError::NestingTooDeep { span, .. }
            | CalcError::LeadingZero { span, .. } => *span,
        }
    }

    pub fn position(&self) -> usize {
        match self {
            CalcError::Lexical { position, .. }
            | CalcError::NumberFormat { position, .. }
            | CalcError::UnexpectedToken { position, .. }
            | CalcError::DivisionByZero { position, .. }
            | CalcError::NestingTooDeep { position, .. }
            | CalcError::LeadingZero { position, .. } => *position,
        }
    }

    fn kind_str(&self) -> &'static str {
        match self {
            CalcError::Lexical { .. } => "Lexical Error",
            CalcError::NumberFormat { .. } => "Number Format Error",
            CalcError::UnexpectedToken { .. } | CalcError::NestingTooDeep { .. } => "Parse Error",
            CalcError::DivisionByZero { .. } => "Runtime Error",
            CalcError::LeadingZero { .. } => "Validation Error",
        }
    }

    fn color(&self) -> Color {
        match self {
            CalcError::Lexical { .. } | CalcError::NumberFormat { .. } => Color::Red,
            CalcError::UnexpectedToken { .. } | CalcError::NestingTooDeep { .. } => Color::Yellow,
            CalcError::DivisionByZero { .. } => Color::Magenta,
            CalcError::LeadingZero { .. } => Color::Blue,
        }
    }

    pub fn help(&self) -> Option<String> {
        match self {
            CalcError::Lexical { .. } => Some(
                "Expressions may only contain digits, '.', '+', '-', '*', '/', '(' and ')'."
                    .to_string(),
            ),
            CalcError::NumberFormat { .. } => {
                Some("Numbers need at least one digit, e.g. '3', '0.5' or '.5'.".to_string())
            }
            CalcError::UnexpectedToken {
                expected: Expected::RParen,
                ..
            } => Some("Every '(' must be closed by a matching ')'.".to_string()),
            CalcError::UnexpectedToken {
                expected: Expected::NumberOrLParen,
                ..
            } => Some("Operators require a number or parenthesized expression on both sides.".to_string()),
            CalcError::UnexpectedToken {
                expected: Expected::EndOfInput,
                ..
            } => Some("Only one expression is allowed per line.".to_string()),
            CalcError::DivisionByZero { .. } => None,
            CalcError::NestingTooDeep { .. } => {
                Some("Remove redundant parentheses or split the expression.".to_string())
            }
            CalcError::LeadingZero { .. } => {
                Some("Write '8' instead of '08'; only '0' and '0.xxx' may start with zero.".to_string())
            }
        }
    }

    /// Print a labeled diagnostic for this error against `source`.
    pub fn report(&self, source: &str, filename: Option<&str>) {
        let filename = filename.unwrap_or("<repl>");
        let color = self.color();
        let span = self.span();
        let message = self.to_string();

        // ariadne needs the label to land inside the source, EndOfInput sits one past it
        let end = span.end.min(source.len()).max(span.start);
        let start = span.start.min(end);
        let offset = self.position().min(source.len());

        let mut report_builder = Report::build(ReportKind::Error, filename, offset)
            .with_message(format!("{}: {}", self.kind_str().fg(color), message))
            .with_label(
                Label::new((filename, start..end))
                    .with_message(&message)
                    .with_color(color),
            );

        if let Some(help_text) = self.help() {
            report_builder = report_builder.with_note(format!("{}: {}", "help".fg(Color::Cyan), help_text));
        }

        if let Err(e) = report_builder
            .finish()
            .eprint((filename, Source::from(source)))
        {
            eprintln!("{}: {}", self.kind_str(), message);
            log::debug!("failed to render diagnostic: {}", e);
        }
    }
}
