pub(crate) mod buffer;
mod cursor;
pub mod error;
mod numeric;
pub mod print;
#[cfg(test)]
mod tests;
pub(crate) mod text;
pub(crate) mod token_type;

use buffer::{PendingRun, SourceBuffer, MAX_TOKEN_SIZE};
use error::{ErrorInfo, ErrorKind};
use numeric::{parse_numeric, NumericParse};
use text::{ByteOffset, Position};
use token_type::{Lexeme, Paren, Token};

/// What the lexer does when it hits a lexing error.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
enum ErrorPolicy {
    /// Stop at the first error
    FailFast,
    /// Record recoverable errors and keep going, failing at the end of input.
    /// Unrecoverable errors (see `ErrorKind::is_recoverable`) still stop the scan.
    Deferred,
}

/// Lexemes and recorded errors of a completed scan
type LexOutput = (Vec<Lexeme>, Vec<ErrorInfo>);

/// Errors recorded before the scan was aborted, and the error that aborted it
type LexAbort = (Vec<ErrorInfo>, ErrorInfo);

#[derive(Debug)]
struct Lexer<'src> {
    source_len: u32,
    source_name: &'src str,
    cursor: cursor::Cursor<'src>,
    /// Line/column of the next byte under the cursor
    position: Position,
    /// Run of non-delimiter bytes waiting for a delimiter
    pending: PendingRun,
    lexemes: Vec<Lexeme>,
    policy: ErrorPolicy,
    /// Errors recorded under the deferred policy
    errors: Vec<ErrorInfo>,
}

impl<'src> Lexer<'src> {
    fn new(
        source: &'src [u8],
        source_name: &'src str,
        policy: ErrorPolicy,
    ) -> Result<Lexer<'src>, ErrorInfo> {
        let Ok(source_len) = u32::try_from(source.len()) else {
            return Err(ErrorInfo::new(
                ErrorKind::FileTooLarge,
                Position::default(),
                ByteOffset::default(),
                source_name,
                None,
            ));
        };

        Ok(Lexer {
            source_len,
            source_name,
            cursor: cursor::Cursor::new(source),
            position: Position::default(),
            pending: PendingRun::new(),
            // Rough guess, most tokens are a few bytes long plus a separator
            lexemes: Vec::with_capacity(source.len() / 4),
            policy,
            errors: Vec::new(),
        })
    }

    #[inline]
    fn cur_byte_offset(&self) -> ByteOffset {
        ByteOffset::new(self.source_len - self.cursor.remaining_len())
    }

    fn error_info(
        &self,
        error_kind: ErrorKind,
        at: Position,
        at_byte_offset: ByteOffset,
        detail: Option<String>,
    ) -> ErrorInfo {
        ErrorInfo::new(error_kind, at, at_byte_offset, self.source_name, detail)
    }

    /// Reports an error according to the policy.
    ///
    /// Returns `Err` if the scan must stop, `Ok` if the error was recorded
    /// and the caller should recover.
    fn emit_error(&mut self, error: ErrorInfo) -> Result<(), ErrorInfo> {
        match self.policy {
            ErrorPolicy::Deferred if error.error_kind().is_recoverable() => {
                tracing::trace!(%error, "recorded lexing error, continuing");
                self.errors.push(error);
                Ok(())
            }
            ErrorPolicy::Deferred | ErrorPolicy::FailFast => Err(error),
        }
    }

    fn emit_lexeme(&mut self, token: Token, start: Position, byte_offset: ByteOffset) {
        let byte_end = self.cur_byte_offset();
        self.lexemes
            .push(Lexeme::new(token, start, byte_offset, byte_end));
    }

    /// Runs the scan to completion.
    ///
    /// On success returns the lexemes and the errors recorded along the way.
    /// On a fatal error returns the recorded errors and the fatal one.
    /// Nothing is ever recorded under `FailFast`.
    fn lex(mut self) -> Result<LexOutput, LexAbort> {
        match self.lex_all() {
            Ok(()) => Ok((self.lexemes, self.errors)),
            Err(fatal) => Err((self.errors, fatal)),
        }
    }

    /// Main lexing loop, responsible for driving the lexing forwards
    /// and flushing the trailing run at the end of input.
    fn lex_all(&mut self) -> Result<(), ErrorInfo> {
        while let Some(next_byte) = self.cursor.peek() {
            #[cfg(debug_assertions)]
            let remaining = self.cursor.remaining_len();

            self.lex_byte(next_byte)?;

            #[cfg(debug_assertions)]
            debug_assert!(
                self.cursor.remaining_len() < remaining,
                "Infinite loop detected"
            );
        }

        debug_assert!(self.cursor.is_eof());

        // A run may end right at the end of input with no delimiter after it
        self.flush_pending()
    }

    /// Dispatches on the delimiter class of the byte under the cursor
    fn lex_byte(&mut self, next_byte: u8) -> Result<(), ErrorInfo> {
        if let Some(paren) = Paren::from_byte(next_byte) {
            return self.lex_paren(paren);
        }

        match next_byte {
            b'\n' => {
                self.flush_pending()?;

                let start = self.position;
                let byte_offset = self.cur_byte_offset();
                self.cursor.advance();
                self.emit_lexeme(Token::Newline, start, byte_offset);

                self.position.advance_line();
            }
            b'"' => {
                self.flush_pending()?;
                self.lex_string()?;
            }
            b' ' | b'\t' => {
                self.flush_pending()?;
                self.cursor.advance();
                self.position.advance_column(1);
            }
            _ => {
                let byte_offset = self.cur_byte_offset();

                if !self.pending.push(next_byte, self.position, byte_offset) {
                    let (start, start_byte_offset) = self
                        .pending
                        .start()
                        .unwrap_or((self.position, byte_offset));

                    let detail = format!(
                        "limit is {MAX_TOKEN_SIZE} bytes, token '{}'",
                        String::from_utf8_lossy(self.pending.as_bytes())
                    );

                    return Err(self.error_info(
                        ErrorKind::TokenTooLong,
                        start,
                        start_byte_offset,
                        Some(detail),
                    ));
                }

                self.cursor.advance();
                self.position.advance_column(1);
            }
        }

        Ok(())
    }

    fn lex_paren(&mut self, paren: Paren) -> Result<(), ErrorInfo> {
        debug_assert_eq!(self.cursor.peek(), Some(paren.as_byte()));

        self.flush_pending()?;

        let start = self.position;
        let byte_offset = self.cur_byte_offset();
        self.cursor.advance();
        self.emit_lexeme(Token::Parenthesis(paren), start, byte_offset);

        self.position.advance_column(1);

        Ok(())
    }

    /// Classifies the pending run and emits it as a number or an atom.
    ///
    /// Does nothing if the run is empty. The run is cleared whatever the
    /// outcome.
    fn flush_pending(&mut self) -> Result<(), ErrorInfo> {
        let Some((start, byte_offset)) = self.pending.start() else {
            debug_assert!(self.pending.is_empty());
            return Ok(());
        };

        let text = self.pending.as_bytes();

        let (token, error_kind) = match parse_numeric(text) {
            NumericParse::Number(value) => (Token::Number(value), None),
            NumericParse::NotANumber => (Token::Atom(text.to_vec()), None),
            NumericParse::Overflow => {
                (Token::Atom(text.to_vec()), Some(ErrorKind::NumericOverflow))
            }
            NumericParse::Underflow => {
                (Token::Atom(text.to_vec()), Some(ErrorKind::NumericUnderflow))
            }
        };

        tracing::trace!(
            text = %String::from_utf8_lossy(text),
            kind = %token.kind(),
            "flushed pending run"
        );

        let error = error_kind.map(|kind| {
            self.error_info(
                kind,
                start,
                byte_offset,
                Some(String::from_utf8_lossy(text).into_owned()),
            )
        });

        self.pending.clear();

        if let Some(error) = error {
            // Under the deferred policy the out of range number is kept as an atom
            self.emit_error(error)?;
        }

        self.emit_lexeme(token, start, byte_offset);

        Ok(())
    }

    /// Lexes a string literal, starting at the opening quote.
    ///
    /// Leaves the cursor right after the closing quote.
    fn lex_string(&mut self) -> Result<(), ErrorInfo> {
        debug_assert_eq!(self.cursor.peek(), Some(b'"'));

        let start = self.position;
        let byte_offset = self.cur_byte_offset();

        // Skip the opening quote
        self.cursor.advance();
        self.position.advance_column(1);

        let mut decoded = SourceBuffer::new();

        loop {
            let c_byte_offset = self.cur_byte_offset();

            let Some(c) = self.cursor.advance() else {
                return Err(self.unterminated_string(start, byte_offset));
            };

            match c {
                b'"' => {
                    self.position.advance_column(1);
                    break;
                }
                b'\n' => {
                    decoded.append(b'\n');
                    self.position.advance_line();
                }
                b'\\' => {
                    let escape_at = self.position;

                    let Some(selector) = self.cursor.advance() else {
                        return Err(self.unterminated_string(start, byte_offset));
                    };

                    match selector {
                        b'"' | b'\\' => decoded.append(selector),
                        b'n' => decoded.append(b'\n'),
                        b't' => decoded.append(b'\t'),
                        _ => {
                            let detail = format!(
                                "'\\{}'",
                                String::from_utf8_lossy(&[selector]).escape_debug()
                            );
                            let error = self.error_info(
                                ErrorKind::UnknownEscapeSequence,
                                escape_at,
                                c_byte_offset,
                                Some(detail),
                            );
                            self.emit_error(error)?;
                        }
                    }

                    if selector == b'\n' {
                        // Only reachable when recovering. Keep lines in sync
                        self.position.advance_line();
                    } else {
                        self.position.advance_column(2);
                    }
                }
                _ => {
                    decoded.append(c);
                    self.position.advance_column(1);
                }
            }
        }

        self.emit_lexeme(Token::String(decoded.into_vec()), start, byte_offset);

        Ok(())
    }

    /// Unterminated strings are reported at the opening quote, not at the end of input
    fn unterminated_string(&self, start: Position, byte_offset: ByteOffset) -> ErrorInfo {
        self.error_info(ErrorKind::UnterminatedString, start, byte_offset, None)
    }
}

fn lex_with_policy(
    source: &[u8],
    source_name: &str,
    policy: ErrorPolicy,
) -> Result<LexOutput, LexAbort> {
    tracing::debug!(source_name, bytes = source.len(), ?policy, "lexing started");

    let result = Lexer::new(source, source_name, policy)
        .map_err(|error| (Vec::new(), error))?
        .lex();

    match &result {
        Ok((lexemes, errors)) => tracing::debug!(
            source_name,
            lexemes = lexemes.len(),
            errors = errors.len(),
            "lexing finished"
        ),
        Err((recorded, fatal)) => tracing::debug!(
            source_name,
            recorded = recorded.len(),
            %fatal,
            "lexing aborted"
        ),
    }

    result
}

/// Lex the source and return its lexemes in source order.
///
/// Stops at the first lexing error; no partial result is returned.
///
/// # Arguments
/// * `source` - The source code to lex, as bytes. No particular encoding is assumed
/// * `source_name` - Display name used in diagnostics, e.g. a file path
///
/// # Errors
/// The first lexing error, or `FileTooLarge` if the source is larger than 4GB
///
/// # Examples
/// ```
/// use tlpin_lexer::{lex_program, Token};
/// let lexemes = lex_program("(+ 1 2)", "example").unwrap();
/// assert_eq!(lexemes.len(), 5);
/// assert_eq!(lexemes[2].token(), &Token::Number(1.0));
/// ```
pub fn lex_program<S: AsRef<[u8]> + ?Sized>(
    source: &S,
    source_name: &str,
) -> Result<Vec<Lexeme>, ErrorInfo> {
    match lex_with_policy(source.as_ref(), source_name, ErrorPolicy::FailFast) {
        Ok((lexemes, errors)) => {
            debug_assert!(errors.is_empty());
            Ok(lexemes)
        }
        Err((recorded, fatal)) => {
            debug_assert!(recorded.is_empty());
            Err(fatal)
        }
    }
}

/// Lex the source, collecting as many errors as possible before failing.
///
/// Out of range numbers and unknown escape sequences are recorded and
/// lexing continues. Overlong runs and unterminated strings end the scan
/// immediately.
///
/// # Errors
/// All recorded errors in source order if there was at least one.
///
/// # Examples
/// ```
/// use tlpin_lexer::{lex_program_deferred, error::ErrorKind};
/// let errors = lex_program_deferred("1e999 \"\\q\"", "example").unwrap_err();
/// assert_eq!(errors.len(), 2);
/// assert_eq!(errors[0].error_kind(), ErrorKind::NumericOverflow);
/// assert_eq!(errors[1].error_kind(), ErrorKind::UnknownEscapeSequence);
/// ```
pub fn lex_program_deferred<S: AsRef<[u8]> + ?Sized>(
    source: &S,
    source_name: &str,
) -> Result<Vec<Lexeme>, Box<[ErrorInfo]>> {
    match lex_with_policy(source.as_ref(), source_name, ErrorPolicy::Deferred) {
        Ok((lexemes, errors)) if errors.is_empty() => Ok(lexemes),
        Ok((_, errors)) => Err(errors.into_boxed_slice()),
        Err((mut errors, fatal)) => {
            errors.push(fatal);
            Err(errors.into_boxed_slice())
        }
    }
}
