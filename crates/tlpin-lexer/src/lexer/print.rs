//! Functions to render lexemes in the dump format:
//! `<source_name>(<line>:<column>): <KIND>[: <payload>]`
use std::io::{self, Write};

use super::token_type::{Lexeme, Token};

/// Writes `bytes` with `"`, `\`, newline and tab escaped the same way the
/// lexer accepts them inside string literals.
///
/// # Errors
/// Any I/O error from `dst`.
pub fn write_escaped(dst: &mut impl Write, bytes: &[u8]) -> io::Result<()> {
    for &byte in bytes {
        match byte {
            b'"' | b'\\' => dst.write_all(&[b'\\', byte])?,
            b'\n' => dst.write_all(b"\\n")?,
            b'\t' => dst.write_all(b"\\t")?,
            _ => dst.write_all(&[byte])?,
        }
    }

    Ok(())
}

/// Writes one lexeme as a single dump line, including the trailing newline.
///
/// # Errors
/// Any I/O error from `dst`.
pub fn write_lexeme(dst: &mut impl Write, lexeme: &Lexeme, source_name: &str) -> io::Result<()> {
    write!(
        dst,
        "{source_name}({}): {}",
        lexeme.start(),
        lexeme.kind()
    )?;

    match lexeme.token() {
        Token::String(bytes) => {
            dst.write_all(b": \"")?;
            write_escaped(dst, bytes)?;
            dst.write_all(b"\"")?;
        }
        Token::Atom(bytes) => {
            dst.write_all(b": ")?;
            write_escaped(dst, bytes)?;
        }
        // Same as C's `%f`
        Token::Number(value) => write!(dst, ": {value:.6}")?,
        Token::Parenthesis(paren) => write!(dst, ": {}", paren.as_char())?,
        Token::Newline => {}
    }

    dst.write_all(b"\n")
}

/// Writes all lexemes in order, one per line.
///
/// # Errors
/// Any I/O error from `dst`.
pub fn write_lexemes<'a, I>(dst: &mut impl Write, lexemes: I, source_name: &str) -> io::Result<()>
where
    I: IntoIterator<Item = &'a Lexeme>,
{
    for lexeme in lexemes {
        write_lexeme(dst, lexeme, source_name)?;
    }

    Ok(())
}

/// Renders one lexeme without the trailing newline.
///
/// Payload bytes that are not valid UTF-8 are replaced with U+FFFD.
#[must_use]
pub fn lexeme_to_string(lexeme: &Lexeme, source_name: &str) -> String {
    let mut out = Vec::new();

    // Writing into a Vec can't fail
    let _ = write_lexeme(&mut out, lexeme, source_name);
    out.pop();

    String::from_utf8_lossy(&out).into_owned()
}

/// Renders all lexemes, one per line, each terminated by a newline.
#[must_use]
pub fn lexemes_to_string<'a, I>(lexemes: I, source_name: &str) -> String
where
    I: IntoIterator<Item = &'a Lexeme>,
{
    let mut out = Vec::new();

    let _ = write_lexemes(&mut out, lexemes, source_name);

    String::from_utf8_lossy(&out).into_owned()
}
