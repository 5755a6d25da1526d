use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;

/// Numeric representation for number literals, chosen once per scan and
/// applied to every `Number` token that scan produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Backend {
    /// Arbitrary-precision decimal.
    #[default]
    Decimal,
    /// Native `f64`.
    Float,
}

impl Backend {
    /// Converts a normalized literal. `None` means the literal survived
    /// scanning but is not representable, e.g. an exponent past `f64` range.
    pub(crate) fn convert(self, literal: &str) -> Option<Number> {
        match self {
            Self::Decimal => BigDecimal::from_str(literal).ok().map(Number::Decimal),
            Self::Float => f64::from_str(literal)
                .ok()
                .filter(|x| x.is_finite())
                .map(Number::Float),
        }
    }
}

/// Value of a number literal. Always finite and non-NaN.
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    Decimal(BigDecimal),
    Float(f64),
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Decimal(x) => write!(f, "{x}"),
            Number::Float(x) => write!(f, "{x}"),
        }
    }
}

/// ```text
/// NUMBER -> ( DIGIT* "." DIGIT* | DIGIT+ ) ( "e" ( "+" | "-" )? DIGIT* )? ;
/// DIGIT  -> "0" ... "9" ;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// number literal
    Number,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `^`
    Caret,
    /// `sqrt` or `√`
    Sqrt,
    /// `(`
    LParen,
    /// `)`
    RParen,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenKind::Number => "<number>",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Caret => "^",
            TokenKind::Sqrt => "sqrt",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
        };

        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// `Some` exactly when `kind` is [`TokenKind::Number`].
    pub value: Option<Number>,
}

impl Token {
    pub const fn symbol(kind: TokenKind) -> Self {
        Self { kind, value: None }
    }

    pub fn number(value: Number) -> Self {
        Self {
            kind: TokenKind::Number,
            value: Some(value),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{value}"),
            None => write!(f, "{}", self.kind),
        }
    }
}
