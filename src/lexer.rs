use crate::error::{CalcError, Span};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Number,
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,

    // Sentinel handed out by the parser once the tokens run out
    EndOfInput,
}

impl TokenKind {
    pub fn is_operator(self) -> bool {
        matches!(
            self,
            TokenKind::Plus | TokenKind::Minus | TokenKind::Star | TokenKind::Slash
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TokenKind::Number => write!(f, "number"),
            TokenKind::Plus => write!(f, "'+'"),
            TokenKind::Minus => write!(f, "'-'"),
            TokenKind::Star => write!(f, "'*'"),
            TokenKind::Slash => write!(f, "'/'"),
            TokenKind::LParen => write!(f, "'('"),
            TokenKind::RParen => write!(f, "')'"),
            TokenKind::EndOfInput => write!(f, "end of input"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, text: String, span: Span) -> Self {
        Self { kind, text, span }
    }

    pub fn end_of_input(pos: usize) -> Self {
        Self {
            kind: TokenKind::EndOfInput,
            text: String::new(),
            span: Span::new(pos, pos),
        }
    }
}

pub struct Lexer<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    start: usize,
    current: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            tokens: Vec::new(),
            start: 0,
            current: 0,
        }
    }

    /// Scan the whole input. Stops at the first character that can't start a token.
    pub fn scan_tokens(mut self) -> Result<Vec<Token>, CalcError> {
        while !self.is_at_end() {
            self.start = self.current;
            self.scan_token()?;
        }

        Ok(self.tokens)
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn scan_token(&mut self) -> Result<(), CalcError> {
        let c = self.advance();

        match c {
            '(' => self.add_token(TokenKind::LParen),
            ')' => self.add_token(TokenKind::RParen),
            '+' => self.add_token(TokenKind::Plus),
            '*' => self.add_token(TokenKind::Star),
            '/' => self.add_token(TokenKind::Slash),
            '-' => {
                if self.minus_is_unary() && starts_number(self.peek()) {
                    self.number();
                } else {
                    self.add_token(TokenKind::Minus);
                }
            }
            c if c.is_ascii_whitespace() => {}
            c if starts_number(c) => self.number(),
            _ => {
                return Err(CalcError::Lexical {
                    ch: c,
                    position: self.start,
                });
            }
        }

        Ok(())
    }

    /// A `-` is a sign when nothing precedes it, or when the last token
    /// emitted was an operator or an opening parenthesis.
    fn minus_is_unary(&self) -> bool {
        match self.tokens.last() {
            None => true,
            Some(token) => token.kind.is_operator() || token.kind == TokenKind::LParen,
        }
    }

    fn advance(&mut self) -> char {
        match self.source[self.current..].chars().next() {
            Some(c) => {
                self.current += c.len_utf8();
                c
            }
            None => '\0',
        }
    }

    fn peek(&self) -> char {
        self.source[self.current..].chars().next().unwrap_or('\0')
    }

    // The first character (digit, '.' or sign) is already consumed.
    fn number(&mut self) {
        let mut seen_dot = self.source[self.start..self.current].ends_with('.');

        loop {
            match self.peek() {
                c if c.is_ascii_digit() => {
                    self.advance();
                }
                '.' if !seen_dot => {
                    seen_dot = true;
                    self.advance();
                }
                _ => break,
            }
        }

        self.add_token(TokenKind::Number);
    }

    fn add_token(&mut self, kind: TokenKind) {
        let text = &self.source[self.start..self.current];
        self.tokens.push(Token::new(
            kind,
            text.to_string(),
            Span::new(self.start, self.current),
        ));
    }
}

fn starts_number(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

/// Turn `input` into its token sequence, without the end-of-input sentinel.
pub fn tokenize(input: &str) -> Result<Vec<Token>, CalcError> {
    Lexer::new(input).scan_tokens()
}
