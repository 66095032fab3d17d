use super::super::{
    error::{ErrorInfo, ErrorKind},
    lex_program, lex_program_deferred,
    print::{lexeme_to_string, lexemes_to_string},
    token_type::{Lexeme, Paren, Token},
    ErrorPolicy, Lexer,
};

pub(crate) const TEST_SOURCE_NAME: &str = "test.tlpin";

pub(crate) fn atom(text: &str) -> Token {
    Token::Atom(text.as_bytes().to_vec())
}

pub(crate) fn string(text: &str) -> Token {
    Token::String(text.as_bytes().to_vec())
}

pub(crate) fn num(value: f64) -> Token {
    Token::Number(value)
}

pub(crate) fn open() -> Token {
    Token::Parenthesis(Paren::Open)
}

pub(crate) fn close() -> Token {
    Token::Parenthesis(Paren::Close)
}

pub(crate) trait TokenTestCase {
    fn token(&self) -> Token;
    fn line(&self) -> u32;
    fn column(&self) -> u32;
}

/// Token with its expected start line and column
impl TokenTestCase for (Token, u32, u32) {
    fn token(&self) -> Token {
        self.0.clone()
    }

    fn line(&self) -> u32 {
        self.1
    }

    fn column(&self) -> u32 {
        self.2
    }
}

pub(crate) trait ErrorTestCase {
    fn error_kind(&self) -> ErrorKind;
    fn line(&self) -> u32;
    fn column(&self) -> u32;
}

impl ErrorTestCase for (ErrorKind, u32, u32) {
    fn error_kind(&self) -> ErrorKind {
        self.0
    }

    fn line(&self) -> u32 {
        self.1
    }

    fn column(&self) -> u32 {
        self.2
    }
}

fn format_lexemes_for_trace(lexemes: &[Lexeme]) -> String {
    lexemes
        .iter()
        .map(|lexeme| format!("- {}", lexeme_to_string(lexeme, TEST_SOURCE_NAME)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_errors_for_trace(errors: &[ErrorInfo]) -> String {
    errors
        .iter()
        .map(|error| format!("- {error}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Checks that lexemes are ordered, don't overlap and that everything
/// between them is blank.
pub(crate) fn assert_coverage<S: AsRef<[u8]> + ?Sized>(source: &S, lexemes: &[Lexeme]) {
    let source = source.as_ref();
    let mut prev_end = 0usize;

    for lexeme in lexemes {
        let start = usize::from(lexeme.byte_offset());

        assert!(
            start >= prev_end,
            "Lexeme overlaps the previous one: {}",
            lexeme_to_string(lexeme, TEST_SOURCE_NAME)
        );

        let gap = source.get(prev_end..start).expect("gap out of bounds");

        assert!(
            gap.iter().all(|b| matches!(b, b' ' | b'\t')),
            "Non blank bytes {:?} before {}",
            String::from_utf8_lossy(gap),
            lexeme_to_string(lexeme, TEST_SOURCE_NAME)
        );

        assert!(
            lexeme.source_text(source).is_some(),
            "Lexeme range out of bounds: {}",
            lexeme_to_string(lexeme, TEST_SOURCE_NAME)
        );

        prev_end = usize::from(lexeme.byte_end());
    }

    let tail = source.get(prev_end..).expect("tail out of bounds");

    assert!(
        tail.iter().all(|b| matches!(b, b' ' | b'\t')),
        "Non blank trailing bytes {:?}",
        String::from_utf8_lossy(tail)
    );
}

fn assert_lexemes(lexemes: &[Lexeme], expected_tokens: &[impl TokenTestCase]) {
    assert_eq!(
        expected_tokens.len(),
        lexemes.len(),
        "Expected {} lexemes, got {}:\n{}",
        expected_tokens.len(),
        lexemes.len(),
        format_lexemes_for_trace(lexemes)
    );

    for (lexeme, expected) in lexemes.iter().zip(expected_tokens) {
        assert_eq!(
            &expected.token(),
            lexeme.token(),
            "Expected token {:?}, got: {}",
            expected.token(),
            lexeme_to_string(lexeme, TEST_SOURCE_NAME)
        );

        assert_eq!(
            (expected.line(), expected.column()),
            (lexeme.line(), lexeme.column()),
            "Expected position {}:{}, got: {}",
            expected.line(),
            expected.column(),
            lexeme_to_string(lexeme, TEST_SOURCE_NAME)
        );
    }
}

fn assert_errors(errors: &[ErrorInfo], expected_errors: &[impl ErrorTestCase]) {
    assert_eq!(
        expected_errors.len(),
        errors.len(),
        "Expected {} errors, got {}:\n{}",
        expected_errors.len(),
        errors.len(),
        format_errors_for_trace(errors)
    );

    for (error, expected) in errors.iter().zip(expected_errors) {
        assert_eq!(
            (expected.error_kind(), expected.line(), expected.column()),
            (error.error_kind(), error.on_line(), error.at_column()),
            "Unexpected error: {error}"
        );
        assert_eq!(error.source_name(), TEST_SOURCE_NAME);
    }
}

/// Lexes `source` with the default policy, expecting success.
pub(crate) fn assert_lexing<S: AsRef<[u8]> + ?Sized>(
    source: &S,
    expected_tokens: Vec<impl TokenTestCase>,
) -> Vec<Lexeme> {
    let lexemes = lex_program(source, TEST_SOURCE_NAME)
        .unwrap_or_else(|error| panic!("Unexpected error: {error}"));

    assert_lexemes(&lexemes, &expected_tokens);
    assert_coverage(source, &lexemes);

    // Same result when nothing goes wrong
    let deferred = lex_program_deferred(source, TEST_SOURCE_NAME)
        .unwrap_or_else(|errors| panic!("Unexpected errors:\n{}", format_errors_for_trace(&errors)));

    assert_eq!(
        lexemes_to_string(&lexemes, TEST_SOURCE_NAME),
        lexemes_to_string(&deferred, TEST_SOURCE_NAME)
    );

    lexemes
}

/// Lexes `source` with the default policy, expecting exactly this error.
pub(crate) fn assert_lexing_error<S: AsRef<[u8]> + ?Sized>(
    source: &S,
    expected_error: impl ErrorTestCase,
) -> ErrorInfo {
    let error = match lex_program(source, TEST_SOURCE_NAME) {
        Ok(lexemes) => panic!(
            "Expected an error, got lexemes:\n{}",
            format_lexemes_for_trace(&lexemes)
        ),
        Err(error) => error,
    };

    assert_errors(std::slice::from_ref(&error), &[expected_error]);

    error
}

/// Lexes `source` with the deferred policy, expecting failure with
/// exactly these errors.
pub(crate) fn assert_deferred_errors<S: AsRef<[u8]> + ?Sized>(
    source: &S,
    expected_errors: Vec<impl ErrorTestCase>,
) -> Box<[ErrorInfo]> {
    let errors = match lex_program_deferred(source, TEST_SOURCE_NAME) {
        Ok(lexemes) => panic!(
            "Expected errors, got lexemes:\n{}",
            format_lexemes_for_trace(&lexemes)
        ),
        Err(errors) => errors,
    };

    assert_errors(&errors, &expected_errors);

    errors
}

/// Runs a deferred scan that is expected to recover from every error and
/// checks the lexemes it produced along the way.
pub(crate) fn assert_recovered_lexing<S: AsRef<[u8]> + ?Sized>(
    source: &S,
    expected_tokens: Vec<impl TokenTestCase>,
    expected_errors: Vec<impl ErrorTestCase>,
) {
    let lexer = Lexer::new(source.as_ref(), TEST_SOURCE_NAME, ErrorPolicy::Deferred)
        .unwrap_or_else(|error| panic!("Unexpected error: {error}"));

    let (lexemes, errors) = lexer.lex().unwrap_or_else(|(recorded, fatal)| {
        panic!(
            "Unexpected fatal error {fatal} after:\n{}",
            format_errors_for_trace(&recorded)
        )
    });

    assert_lexemes(&lexemes, &expected_tokens);
    assert_errors(&errors, &expected_errors);
    assert_coverage(source, &lexemes);
}
