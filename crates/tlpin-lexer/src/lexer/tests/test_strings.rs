use rstest::rstest;

use super::super::token_type::Token;
use super::util::{assert_lexing, atom, string};

#[rstest]
#[case::plain(r#""hello""#, "hello")]
#[case::empty(r#""""#, "")]
#[case::blanks_kept("\" a  b\t\"", " a  b\t")]
#[case::delimiters_inside(r#""(x) 1.5""#, "(x) 1.5")]
#[case::quote(r#""say \"hi\"""#, "say \"hi\"")]
#[case::backslash(r#""a\\b""#, "a\\b")]
#[case::newline_escape(r#""a\nb""#, "a\nb")]
#[case::tab_escape(r#""a\tb""#, "a\tb")]
#[case::all_escapes(r#""a\tb\n\"c\"\\d""#, "a\tb\n\"c\"\\d")]
#[case::trailing_backslash(r#""\\""#, "\\")]
fn test_string_decoding(#[case] source: &str, #[case] expected: &str) {
    assert_lexing(source, vec![(string(expected), 1, 0)]);
}

#[test]
fn test_multiline_string() {
    assert_lexing(
        "\"line one\nline two\n\" end",
        vec![(string("line one\nline two\n"), 1, 0), (atom("end"), 3, 2)],
    );
}

#[test]
fn test_raw_bytes_are_kept() {
    let source: &[u8] = b"\"\xc3\xa9\xff\"";

    assert_lexing(source, vec![(Token::String(b"\xc3\xa9\xff".to_vec()), 1, 0)]);
}

#[test]
fn test_adjacent_strings() {
    assert_lexing(
        r#""a""b" "c""#,
        vec![(string("a"), 1, 0), (string("b"), 1, 3), (string("c"), 1, 7)],
    );
}

#[test]
fn test_string_source_text_keeps_escapes() {
    let source = r#"x "a\"b""#;
    let lexemes = assert_lexing(source, vec![(atom("x"), 1, 0), (string("a\"b"), 1, 2)]);

    assert_eq!(
        lexemes.get(1).and_then(|l| l.source_text(source)),
        Some(&br#""a\"b""#[..])
    );
}
