use crate::error::CalcError;
use crate::lexer::{Token, TokenKind};

/// Reject number literals such as `08` or `-001`.
///
/// `0`, `0.5` and `-0.25` pass; only a zero followed by more digits
/// before the decimal point is refused.
pub fn check_strict(tokens: &[Token]) -> Result<(), CalcError> {
    for token in tokens.iter().filter(|t| t.kind == TokenKind::Number) {
        let digits = token.text.trim_start_matches('-');
        let integer_part = digits.split('.').next().unwrap_or("");

        if integer_part.len() > 1 && integer_part.starts_with('0') {
            return Err(CalcError::LeadingZero {
                text: token.text.clone(),
                position: token.span.start,
                span: token.span,
            });
        }
    }

    Ok(())
}
