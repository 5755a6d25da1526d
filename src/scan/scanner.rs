use std::ops::Range;
use std::str::Chars;

use thiserror::Error;

use super::token::{Backend, Token, TokenKind};

/// Operator and bracket lexemes, longest first so that `sqrt` wins over any
/// single-character candidate sharing its first character.
const LEXEMES: &[(&str, TokenKind)] = &[
    ("sqrt", TokenKind::Sqrt),
    ("√", TokenKind::Sqrt),
    ("+", TokenKind::Plus),
    ("-", TokenKind::Minus),
    ("*", TokenKind::Star),
    ("/", TokenKind::Slash),
    ("^", TokenKind::Caret),
    ("(", TokenKind::LParen),
    (")", TokenKind::RParen),
];

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScanErrorKind {
    #[error("unsupported token `{0}`")]
    UnsupportedToken(char),
    #[error("{0}")]
    MalformedNumber(&'static str),
}

#[derive(Debug, Clone, Error, PartialEq)]
#[error("{kind}")]
pub struct ScanError {
    pub kind: ScanErrorKind,
    /// Char index of the offending character in `input`.
    pub position: usize,
    /// The full original expression, kept so the error can be rendered
    /// with a caret under the offending column.
    pub input: String,
}

impl ScanError {
    pub fn span(&self) -> Range<usize> {
        self.position..self.position + 1
    }
}

/// Lexer over a single arithmetic expression.
///
/// Pulls one token at a time via [`Iterator`]; a yielded error is terminal
/// and ends the stream. Construct a fresh `Scanner` to re-scan.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    source: &'a str,
    chars: Chars<'a>,
    backend: Backend,
    /// Char index of the cursor in `source`.
    pos: usize,
    done: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str, backend: Backend) -> Self {
        Self {
            source,
            chars: source.chars(),
            backend,
            pos: 0,
            done: false,
        }
    }

    /// Scans the whole input eagerly, stopping at the first error.
    pub fn scan(self) -> Result<Vec<Token>, ScanError> {
        self.collect()
    }
}

impl<'a> Scanner<'a> {
    fn first(&self) -> Option<char> {
        self.chars.clone().next()
    }

    fn rest(&self) -> &'a str {
        self.chars.as_str()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        self.pos += 1;
        Some(c)
    }

    fn error_at(&self, kind: ScanErrorKind, position: usize) -> ScanError {
        ScanError {
            kind,
            position,
            input: self.source.to_owned(),
        }
    }

    fn next_token(&mut self) -> Option<Result<Token, ScanError>> {
        loop {
            let c = self.first()?;

            match c {
                ' ' | '\t' | '\n' => {
                    self.bump();
                }
                c if c.is_ascii_digit() || c == '.' => return Some(self.number()),
                c => return Some(self.operator(c)),
            }
        }
    }

    /// Greedy longest-match against the lexeme table. A strict prefix of a
    /// longer lexeme with no valid continuation (`"sq("`) is an error at the
    /// position where the attempt began.
    fn operator(&mut self, c: char) -> Result<Token, ScanError> {
        for &(lexeme, kind) in LEXEMES {
            if self.rest().starts_with(lexeme) {
                for _ in lexeme.chars() {
                    self.bump();
                }
                return Ok(Token::symbol(kind));
            }
        }

        Err(self.error_at(ScanErrorKind::UnsupportedToken(c), self.pos))
    }

    fn number(&mut self) -> Result<Token, ScanError> {
        let start = self.pos;
        let mut literal = String::new();
        let mut has_decimal_point = false;
        let mut has_exponent = false;

        while let Some(c) = self.first() {
            match c {
                '.' => {
                    if has_decimal_point {
                        return Err(self.error_at(
                            ScanErrorKind::MalformedNumber("second decimal point in the number"),
                            self.pos,
                        ));
                    }
                    has_decimal_point = true;
                }
                'e' => {
                    if has_exponent {
                        return Err(self.error_at(
                            ScanErrorKind::MalformedNumber("second exponent in the number"),
                            self.pos,
                        ));
                    }
                    has_exponent = true;
                }
                // A sign belongs to the literal only right after the
                // exponent marker; otherwise it is the next token's.
                '+' | '-' => {
                    if !literal.ends_with('e') {
                        break;
                    }
                }
                c if c.is_ascii_digit() => (),
                _ => break,
            }

            literal.push(c);
            self.bump();
        }

        if literal.starts_with('.') {
            literal.insert(0, '0');
        }
        if literal.ends_with(['.', 'e', '+', '-']) {
            literal.push('0');
        }

        match self.backend.convert(&literal) {
            Some(value) => Ok(Token::number(value)),
            None => Err(self.error_at(
                ScanErrorKind::MalformedNumber("malformed number literal"),
                start,
            )),
        }
    }
}

impl Iterator for Scanner<'_> {
    type Item = Result<Token, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let item = self.next_token();
        if !matches!(item, Some(Ok(_))) {
            self.done = true;
        }

        item
    }
}

#[cfg(test)]
mod tests {
    use bigdecimal::BigDecimal;

    use super::*;
    use crate::scan::Number;

    fn scan(input: &str) -> Result<Vec<Token>, ScanError> {
        Scanner::new(input, Backend::Float).scan()
    }

    fn kinds(input: &str) -> Vec<TokenKind> {
        scan(input).unwrap().iter().map(|t| t.kind).collect()
    }

    fn float(token: &Token) -> f64 {
        match &token.value {
            Some(Number::Float(x)) => *x,
            _ => panic!("expected a float number token, got {token:?}"),
        }
    }

    #[test]
    fn single_integer() {
        let tokens = scan("42").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Number);
        assert_eq!(float(&tokens[0]), 42.0);
    }

    #[test]
    fn decimal_point_normalization() {
        assert_eq!(float(&scan("1.5").unwrap()[0]), 1.5);
        assert_eq!(float(&scan(".5").unwrap()[0]), 0.5);
        assert_eq!(float(&scan("5.").unwrap()[0]), 5.0);
    }

    #[test]
    fn exponent_normalization() {
        assert_eq!(float(&scan("2e+3").unwrap()[0]), 2e3);
        assert_eq!(float(&scan("2e").unwrap()[0]), 2.0);
        assert_eq!(float(&scan("2e+").unwrap()[0]), 2.0);
        assert_eq!(float(&scan("1.5e-3").unwrap()[0]), 1.5e-3);
    }

    #[test]
    fn second_decimal_point() {
        let e = scan("1..2").unwrap_err();
        assert_eq!(
            e.kind,
            ScanErrorKind::MalformedNumber("second decimal point in the number")
        );
        assert_eq!(e.position, 2);
    }

    #[test]
    fn second_exponent() {
        let e = scan("1e2e3").unwrap_err();
        assert_eq!(
            e.kind,
            ScanErrorKind::MalformedNumber("second exponent in the number")
        );
        assert_eq!(e.position, 3);
    }

    #[test]
    fn sign_without_exponent_ends_literal() {
        let tokens = scan("3+4*2").unwrap();
        assert_eq!(
            tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
            [
                TokenKind::Number,
                TokenKind::Plus,
                TokenKind::Number,
                TokenKind::Star,
                TokenKind::Number,
            ]
        );
        assert_eq!(float(&tokens[0]), 3.0);
        assert_eq!(float(&tokens[2]), 4.0);
        assert_eq!(float(&tokens[4]), 2.0);
    }

    #[test]
    fn sqrt_keyword_and_glyph() {
        let expected = [
            TokenKind::Sqrt,
            TokenKind::LParen,
            TokenKind::Number,
            TokenKind::RParen,
        ];
        assert_eq!(kinds("sqrt(9)"), expected);
        assert_eq!(kinds("√(9)"), expected);
    }

    #[test]
    fn sqrt_prefix_without_continuation() {
        let e = scan("s").unwrap_err();
        assert_eq!(e.kind, ScanErrorKind::UnsupportedToken('s'));
        assert_eq!(e.position, 0);

        let e = scan("1 + sq(4)").unwrap_err();
        assert_eq!(e.kind, ScanErrorKind::UnsupportedToken('s'));
        assert_eq!(e.position, 4);
    }

    #[test]
    fn unsupported_token_position() {
        let e = scan("1 + @").unwrap_err();
        assert_eq!(e.kind, ScanErrorKind::UnsupportedToken('@'));
        assert_eq!(e.position, 4);
        assert_eq!(e.input, "1 + @");
        assert_eq!(e.span(), 4..5);
    }

    #[test]
    fn position_counts_chars_not_bytes() {
        let e = scan("√@").unwrap_err();
        assert_eq!(e.kind, ScanErrorKind::UnsupportedToken('@'));
        assert_eq!(e.position, 1);
    }

    #[test]
    fn whitespace_only_input() {
        assert!(scan("").unwrap().is_empty());
        assert!(scan(" \t\n ").unwrap().is_empty());
    }

    #[test]
    fn whitespace_between_tokens() {
        assert_eq!(
            kinds("1 +\t2\n"),
            [TokenKind::Number, TokenKind::Plus, TokenKind::Number]
        );
    }

    #[test]
    fn all_operators() {
        assert_eq!(
            kinds("(1 + 2 - 3) * 4 / 5 ^ 6"),
            [
                TokenKind::LParen,
                TokenKind::Number,
                TokenKind::Plus,
                TokenKind::Number,
                TokenKind::Minus,
                TokenKind::Number,
                TokenKind::RParen,
                TokenKind::Star,
                TokenKind::Number,
                TokenKind::Slash,
                TokenKind::Number,
                TokenKind::Caret,
                TokenKind::Number,
            ]
        );
    }

    #[test]
    fn decimal_backend_keeps_precision() {
        let literal = "0.1000000000000000000000000001";
        let tokens = Scanner::new(literal, Backend::Decimal).scan().unwrap();
        assert_eq!(
            tokens[0].value,
            Some(Number::Decimal(literal.parse::<BigDecimal>().unwrap()))
        );
    }

    #[test]
    fn float_backend_rejects_overflow() {
        let e = scan("1e999").unwrap_err();
        assert_eq!(
            e.kind,
            ScanErrorKind::MalformedNumber("malformed number literal")
        );
        assert_eq!(e.position, 0);
    }

    #[test]
    fn error_ends_the_stream() {
        let mut scanner = Scanner::new("1 @ 2", Backend::Float);
        assert!(scanner.next().unwrap().is_ok());
        assert!(scanner.next().unwrap().is_err());
        assert!(scanner.next().is_none());
    }

    #[test]
    fn rescanning_is_deterministic() {
        let input = "sqrt(2) ^ 2 / 1.5e-3";
        let a = scan(input).unwrap();
        let b = scan(input).unwrap();
        assert_eq!(a, b);
    }
}
