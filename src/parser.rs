use crate::ast::{BinaryOp, Expr};
use crate::error::{CalcError, Expected};
use crate::lexer::{Token, TokenKind};

/// Predictive recursive-descent parser that evaluates while it builds.
///
/// ```text
/// expression := term (('+' | '-') term)*
/// term       := factor (('*' | '/') factor)*
/// factor     := NUMBER | '(' expression ')'
/// ```
pub struct Parser<'a> {
    tokens: &'a [Token],
    current: usize,
    depth: usize,
    eof: Token,
}

/// Deepest parenthesis nesting accepted before giving up with
/// `CalcError::NestingTooDeep`. Each level costs three stack frames.
pub const MAX_NESTING: usize = 256;

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        let end = tokens.last().map_or(0, |token| token.span.end);
        Self {
            tokens,
            current: 0,
            depth: 0,
            eof: Token::end_of_input(end),
        }
    }

    /// Place the end-of-input sentinel at byte `end` of the source instead
    /// of right after the last token, so trailing whitespace is counted.
    pub fn ending_at(mut self, end: usize) -> Self {
        self.eof = Token::end_of_input(end);
        self
    }

    /// Parse a single expression and require that nothing follows it.
    pub fn parse(&mut self) -> Result<Expr, CalcError> {
        let expr = self.expression()?;

        if !self.is_at_end() {
            return Err(self.unexpected(Expected::EndOfInput));
        }

        Ok(expr)
    }

    /// Token index the parser has reached.
    pub fn position(&self) -> usize {
        self.current
    }

    pub fn expression(&mut self) -> Result<Expr, CalcError> {
        let mut expr = self.term()?;

        while self.match_kinds(&[TokenKind::Plus, TokenKind::Minus]) {
            let operator = match self.previous().kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Subtract,
                _ => unreachable!(),
            };
            let right = self.term()?;
            expr = fold(operator, expr, right);
        }

        Ok(expr)
    }

    fn term(&mut self) -> Result<Expr, CalcError> {
        let mut expr = self.factor()?;

        while self.match_kinds(&[TokenKind::Star, TokenKind::Slash]) {
            let operator_token = self.previous().clone();
            let operator = match operator_token.kind {
                TokenKind::Star => BinaryOp::Multiply,
                TokenKind::Slash => BinaryOp::Divide,
                _ => unreachable!(),
            };
            let right = self.factor()?;

            // Checked before the node exists so a zero divisor never yields a tree
            if operator == BinaryOp::Divide && right.value() == 0.0 {
                return Err(CalcError::DivisionByZero {
                    position: operator_token.span.start,
                    span: expr.span().to(right.span()),
                });
            }

            expr = fold(operator, expr, right);
        }

        Ok(expr)
    }

    fn factor(&mut self) -> Result<Expr, CalcError> {
        if self.check(TokenKind::Number) {
            let token = self.advance().clone();
            let value = token
                .text
                .parse::<f64>()
                .map_err(|_| CalcError::NumberFormat {
                    text: token.text.clone(),
                    position: token.span.start,
                    span: token.span,
                })?;
            return Ok(Expr::Leaf {
                value,
                span: token.span,
            });
        }

        if self.match_kinds(&[TokenKind::LParen]) {
            let start = self.previous().span;

            self.depth += 1;
            if self.depth > MAX_NESTING {
                return Err(CalcError::NestingTooDeep {
                    limit: MAX_NESTING,
                    position: start.start,
                    span: start,
                });
            }

            let expr = self.expression()?;
            let end = self.consume(TokenKind::RParen, Expected::RParen)?.span;
            self.depth -= 1;

            // Parentheses only widen the span; the inner node is returned as is
            return Ok(match expr {
                Expr::Leaf { value, .. } => Expr::Leaf {
                    value,
                    span: start.to(end),
                },
                Expr::BinaryOp {
                    operator,
                    left,
                    right,
                    value,
                    ..
                } => Expr::BinaryOp {
                    operator,
                    left,
                    right,
                    value,
                    span: start.to(end),
                },
            });
        }

        Err(self.unexpected(Expected::NumberOrLParen))
    }

    fn match_kinds(&mut self, kinds: &[TokenKind]) -> bool {
        for kind in kinds {
            if self.check(*kind) {
                self.advance();
                return true;
            }
        }
        false
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.tokens.len()
    }

    fn peek(&self) -> &Token {
        self.tokens.get(self.current).unwrap_or(&self.eof)
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.current - 1]
    }

    fn consume(&mut self, kind: TokenKind, expected: Expected) -> Result<&Token, CalcError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn unexpected(&self, expected: Expected) -> CalcError {
        let found = self.peek();
        CalcError::UnexpectedToken {
            expected,
            found: found.kind,
            text: found.text.clone(),
            position: found.span.start,
            span: found.span,
        }
    }
}

fn fold(operator: BinaryOp, left: Expr, right: Expr) -> Expr {
    let value = operator.apply(left.value(), right.value());
    log::trace!(
        "fold {} {} {} = {}",
        left.value(),
        operator.symbol(),
        right.value(),
        value
    );
    let span = left.span().to(right.span());
    Expr::BinaryOp {
        operator,
        left: Box::new(left),
        right: Box::new(right),
        value,
        span,
    }
}

/// Parse one expression starting at the first token.
///
/// Returns the tree together with the index of the first token that was not
/// consumed, so callers can decide what trailing tokens mean to them.
pub fn parse_expression(tokens: &[Token]) -> Result<(Expr, usize), CalcError> {
    let mut parser = Parser::new(tokens);
    let expr = parser.expression()?;
    Ok((expr, parser.position()))
}
