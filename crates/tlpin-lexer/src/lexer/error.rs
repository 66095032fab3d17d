use super::text::{ByteOffset, Position};
use std::fmt::Display;
#[cfg(test)]
use strum::IntoStaticStr;
use strum::{EnumIter, EnumMessage};

#[cfg(feature = "serde")]
use serde::Serialize;
#[cfg(feature = "serde")]
use serde_repr::Serialize_repr;

#[derive(Debug, PartialEq, Eq, Clone, Copy, EnumIter, EnumMessage)]
#[cfg_attr(test, derive(IntoStaticStr))]
#[cfg_attr(feature = "serde", derive(Serialize_repr))]
#[repr(u16)]
pub enum ErrorKind {
    // Source code errors. Codes 1001-1999. Make sure to preserve
    // the existing codes & the range. The latter is used in classification impl
    #[strum(message = "Encountered token larger than the maximum allowed size")]
    TokenTooLong = 1001,
    #[strum(message = "Float conversion results in overflow")]
    NumericOverflow = 1002,
    #[strum(message = "Float conversion results in underflow")]
    NumericUnderflow = 1003,
    #[strum(message = "Unterminated string")]
    UnterminatedString = 1004,
    #[strum(message = "Unknown escape sequence")]
    UnknownEscapeSequence = 1005,
    // Lexer API call user initiated errors.
    // Codes 3001-3999. Make sure to preserve
    // the existing codes & the range. The latter is used in classification impl
    #[strum(message = "Lexing of files larger than 4GB is not supported")]
    FileTooLarge = 3001,
}

impl ErrorKind {
    #[must_use]
    pub fn code(self) -> u16 {
        self as u16
    }

    #[must_use]
    pub fn is_code_error(self) -> bool {
        self.code() > 1000u16 && self.code() < 2000u16
    }

    #[must_use]
    pub fn is_api_error(self) -> bool {
        self.code() > 3000u16 && self.code() < 4000u16
    }

    /// Whether the lexer can keep scanning after this error when
    /// running with the deferred policy.
    ///
    /// A bad number still yields a usable atom and a bad escape just
    /// drops the pair. An overlong run or a missing closing quote leaves
    /// nothing sensible to resume from.
    #[must_use]
    pub fn is_recoverable(self) -> bool {
        matches!(
            self,
            ErrorKind::NumericOverflow
                | ErrorKind::NumericUnderflow
                | ErrorKind::UnknownEscapeSequence
        )
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.get_message().unwrap_or("Unknown error"))
    }
}

/// A lexing diagnostic.
///
/// Renders as `<source_name>(<line>:<column>): Error: <message>[: <detail>]`.
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ErrorInfo {
    error_kind: ErrorKind,
    at: Position,
    at_byte_offset: ByteOffset,
    source_name: Box<str>,
    detail: Option<Box<str>>,
}

impl ErrorInfo {
    #[must_use]
    pub fn new(
        error_kind: ErrorKind,
        at: Position,
        at_byte_offset: ByteOffset,
        source_name: &str,
        detail: Option<String>,
    ) -> Self {
        Self {
            error_kind,
            at,
            at_byte_offset,
            source_name: source_name.into(),
            detail: detail.map(String::into_boxed_str),
        }
    }

    #[must_use]
    pub fn error_kind(&self) -> ErrorKind {
        self.error_kind
    }

    #[must_use]
    pub fn at(&self) -> Position {
        self.at
    }

    #[must_use]
    pub fn on_line(&self) -> u32 {
        self.at.line()
    }

    #[must_use]
    pub fn at_column(&self) -> u32 {
        self.at.column()
    }

    #[must_use]
    pub fn at_byte_offset(&self) -> ByteOffset {
        self.at_byte_offset
    }

    #[must_use]
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// The offending text, if the error has one.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}({}): Error: {}",
            self.source_name, self.at, self.error_kind
        )?;

        if let Some(detail) = &self.detail {
            write!(f, ": {detail}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorInfo {}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_all_error_kinds_has_messages() {
        for error in ErrorKind::iter() {
            assert!(
                error.get_message().is_some(),
                "ErrorKind {:?} has no message",
                error
            );
        }
    }

    #[test]
    fn test_error_kind_codes_are_classified() {
        for error in ErrorKind::iter() {
            assert!(
                error.is_code_error() ^ error.is_api_error(),
                "ErrorKind {:?} must belong to exactly one code range",
                error
            );
        }
    }

    #[test]
    fn test_only_source_errors_are_recoverable() {
        for error in ErrorKind::iter() {
            let variant_as_str: &'static str = error.into();

            if error.is_recoverable() {
                assert!(
                    error.is_code_error(),
                    "ErrorKind {variant_as_str} is recoverable but not a source error"
                );
            }
        }

        assert!(!ErrorKind::TokenTooLong.is_recoverable());
        assert!(!ErrorKind::UnterminatedString.is_recoverable());
    }

    #[test]
    fn test_error_info_display() {
        let info = ErrorInfo::new(
            ErrorKind::UnknownEscapeSequence,
            Position::new(3, 7),
            ByteOffset::new(42),
            "main.tlpin",
            Some("'\\q'".to_string()),
        );

        assert_eq!(
            info.to_string(),
            "main.tlpin(3:7): Error: Unknown escape sequence: '\\q'"
        );
        assert_eq!(info.on_line(), 3);
        assert_eq!(info.at_column(), 7);
        assert_eq!(info.at_byte_offset().get(), 42);
    }

    #[test]
    fn test_error_info_display_without_detail() {
        let info = ErrorInfo::new(
            ErrorKind::UnterminatedString,
            Position::default(),
            ByteOffset::default(),
            "<stdin>",
            None,
        );

        assert_eq!(info.to_string(), "<stdin>(1:0): Error: Unterminated string");
        assert_eq!(info.detail(), None);
    }
}
