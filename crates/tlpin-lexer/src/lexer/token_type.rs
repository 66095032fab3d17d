use strum::{Display, EnumCount, EnumIter};

#[cfg(feature = "serde")]
use serde::Serialize;
#[cfg(feature = "serde")]
use serde_repr::Serialize_repr;

use super::text::{ByteOffset, Position};

/// Payload-free token kind. The display names are part of the dump format.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, EnumIter, EnumCount, Display)]
#[cfg_attr(feature = "serde", derive(Serialize_repr))]
#[repr(u8)]
pub enum TokenKind {
    #[strum(serialize = "TOKEN_STRING")]
    String = 1,
    #[strum(serialize = "TOKEN_NUMBER")]
    Number = 2,
    #[strum(serialize = "TOKEN_ATOM")]
    Atom = 3,
    #[strum(serialize = "TOKEN_NEWLINE")]
    Newline = 4,
    #[strum(serialize = "TOKEN_PARENTHESIS")]
    Parenthesis = 5,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, EnumIter)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Paren {
    Open,
    Close,
}

impl Paren {
    #[must_use]
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'(' => Some(Paren::Open),
            b')' => Some(Paren::Close),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_byte(self) -> u8 {
        match self {
            Paren::Open => b'(',
            Paren::Close => b')',
        }
    }

    #[must_use]
    pub fn as_char(self) -> char {
        char::from(self.as_byte())
    }
}

/// A classified token with its payload.
///
/// Text payloads are raw bytes: the language does not mandate an encoding
/// and the lexer never validates UTF-8.
#[derive(Debug, PartialEq, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Token {
    /// Decoded string literal content, escapes resolved, quotes stripped.
    String(Vec<u8>),
    Number(f64),
    /// A run that did not parse as a number, verbatim.
    Atom(Vec<u8>),
    Newline,
    Parenthesis(Paren),
}

impl Token {
    #[must_use]
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::String(_) => TokenKind::String,
            Token::Number(_) => TokenKind::Number,
            Token::Atom(_) => TokenKind::Atom,
            Token::Newline => TokenKind::Newline,
            Token::Parenthesis(_) => TokenKind::Parenthesis,
        }
    }

    /// Returns the byte payload of string and atom tokens.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Token::String(bytes) | Token::Atom(bytes) => Some(bytes),
            Token::Number(_) | Token::Newline | Token::Parenthesis(_) => None,
        }
    }

    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Token::Number(value) => Some(*value),
            _ => None,
        }
    }
}

/// A token paired with where it came from.
#[derive(Debug, PartialEq, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Lexeme {
    token: Token,

    /// Position of the first source byte of the token
    start: Position,

    /// Zero-based byte offset of the token in the source.
    /// u32 as we only support 4gb files
    byte_offset: ByteOffset,

    /// Byte offset right after the last source byte of the token
    byte_end: ByteOffset,
}

impl Lexeme {
    pub(super) fn new(
        token: Token,
        start: Position,
        byte_offset: ByteOffset,
        byte_end: ByteOffset,
    ) -> Self {
        debug_assert!(byte_offset < byte_end, "Lexemes are never empty");

        Lexeme {
            token,
            start,
            byte_offset,
            byte_end,
        }
    }

    #[must_use]
    pub fn token(&self) -> &Token {
        &self.token
    }

    #[must_use]
    pub fn into_token(self) -> Token {
        self.token
    }

    #[must_use]
    pub fn kind(&self) -> TokenKind {
        self.token.kind()
    }

    #[must_use]
    pub fn start(&self) -> Position {
        self.start
    }

    /// Returns line number of the token start, one-based.
    #[must_use]
    pub fn line(&self) -> u32 {
        self.start.line()
    }

    /// Returns column number of the token start, zero-based.
    #[must_use]
    pub fn column(&self) -> u32 {
        self.start.column()
    }

    /// Returns byte offset of the token in the source.
    #[must_use]
    pub fn byte_offset(&self) -> ByteOffset {
        self.byte_offset
    }

    /// Returns byte offset right after the token in the source.
    ///
    /// For strings this includes the closing quote.
    #[must_use]
    pub fn byte_end(&self) -> ByteOffset {
        self.byte_end
    }

    /// Returns the raw source text of the token, quotes and escapes included.
    ///
    /// `None` if `source` is not the text this lexeme was produced from.
    #[must_use]
    pub fn source_text<'a, S: AsRef<[u8]> + ?Sized>(&self, source: &'a S) -> Option<&'a [u8]> {
        source
            .as_ref()
            .get(usize::from(self.byte_offset)..usize::from(self.byte_end))
    }
}
