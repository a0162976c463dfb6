use pretty_assertions::assert_eq;
use quill_ir::{LitKind, Position, TemplateEnd, TokenExtra, TokenKind};

use crate::{LexError, LexErrorKind, Lexer, LexerOptions};

fn scan(source: &str, options: LexerOptions) -> Result<Lexer<'_>, LexError> {
    let mut lexer = Lexer::new(source.as_bytes(), options);
    lexer.next_token()?;
    Ok(lexer)
}

fn error(source: &str) -> LexError {
    match scan(source, LexerOptions::default()) {
        Ok(lexer) => panic!("{source:?} scanned as {:?}", lexer.token()),
        Err(err) => err,
    }
}

#[test]
fn plain_strings() {
    for source in ["'abc'", "\"abc\""] {
        let lexer = scan(source, LexerOptions::default()).unwrap();
        let token = lexer.token();
        assert_eq!(token.kind, TokenKind::Literal);
        let location = token.lit_location.unwrap();
        assert_eq!(location.kind, LitKind::String);
        assert_eq!((location.start, location.length), (1, 3));
        assert!(!location.has_escape);
        assert_eq!(token.span.to_range(), 0..5);
    }
}

#[test]
fn other_quote_is_content() {
    let lexer = scan(r#"'a"b'"#, LexerOptions::default()).unwrap();
    assert_eq!(lexer.token().lit_location.unwrap().length, 3);
}

#[test]
fn escapes_are_measured_by_decoded_length() {
    let lexer = scan(r"'\x41é\n'", LexerOptions::default()).unwrap();
    let location = lexer.token().lit_location.unwrap();
    assert!(location.has_escape);
    assert_eq!(location.length, 4);
}

#[test]
fn tabs_count_one_byte_but_align_columns() {
    let mut lexer = Lexer::new(b"'\t' x", LexerOptions::default());
    lexer.next_token().unwrap();
    assert_eq!(lexer.token().lit_location.unwrap().length, 1);
    lexer.next_token().unwrap();
    assert_eq!(lexer.token().position, Position::new(1, 11));
}

#[test]
fn unterminated_string_points_at_the_quote() {
    let mut lexer = Lexer::new(b"x = 'abc", LexerOptions::default());
    lexer.next_token().unwrap();
    lexer.next_token().unwrap();
    let err = lexer.next_token().unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnterminatedString);
    assert_eq!(err.position, Position::new(1, 5));
    assert_eq!(err.offset, 4);
}

#[test]
fn trailing_backslash_is_unterminated() {
    assert_eq!(error("'abc\\").kind, LexErrorKind::UnterminatedString);
}

#[test]
fn newline_in_string_is_an_error() {
    let err = error("'ab\ncd'");
    assert_eq!(err.kind, LexErrorKind::NewlineNotAllowed);
    assert_eq!(err.position, Position::new(1, 4));
    assert_eq!(error("'ab\u{2028}'").kind, LexErrorKind::NewlineNotAllowed);
}

#[test]
fn escaped_newline_continues_the_string() {
    let lexer = scan("'ab\\\ncd' x", LexerOptions::default()).unwrap();
    assert_eq!(lexer.token().lit_location.unwrap().length, 4);
    assert_eq!(lexer.position(), Position::new(2, 4));
}

#[test]
fn bad_hex_escape_points_at_the_backslash() {
    let err = error(r"'ab\x4g'");
    assert_eq!(err.kind, LexErrorKind::InvalidEscapeSequence);
    assert_eq!(err.position, Position::new(1, 4));
    assert_eq!(error(r"'\u12'").kind, LexErrorKind::InvalidEscapeSequence);
}

#[test]
fn octal_escapes_depend_on_strictness() {
    assert!(scan(r"'\101'", LexerOptions::default()).is_ok());
    for source in [r"'\101'", r"'\0'"] {
        let err = scan(source, LexerOptions::strict()).err().unwrap();
        assert_eq!(err.kind, LexErrorKind::OctalEscapeNotAllowed, "{source}");
    }
}

#[test]
fn long_strings_are_rejected() {
    let body = "a".repeat(65_536);
    assert_eq!(error(&format!("'{body}'")).kind, LexErrorKind::StringTooLong);
    assert!(scan(&format!("'{}'", &body[1..]), LexerOptions::default()).is_ok());
}

#[test]
fn template_without_substitution() {
    let lexer = scan("`a\nb`", LexerOptions::default()).unwrap();
    let token = lexer.token();
    assert_eq!(token.kind, TokenKind::TemplateLiteral);
    assert_eq!(token.extra, TokenExtra::Template(TemplateEnd::Backtick));
    assert_eq!(token.lit_location.unwrap().length, 3);
    assert_eq!(lexer.position(), Position::new(2, 3));
}

#[test]
fn template_stops_before_substitution() {
    let lexer = scan("`a${b}`", LexerOptions::default()).unwrap();
    let token = lexer.token();
    assert_eq!(token.kind, TokenKind::TemplateLiteral);
    assert_eq!(token.extra, TokenExtra::Template(TemplateEnd::Substitution));
    assert_eq!(token.lit_location.unwrap().length, 1);
    assert_eq!(lexer.cursor.current(), Some(b'$'));
}

#[test]
fn escaped_dollar_does_not_open_a_substitution() {
    let lexer = scan(r"`a\${b}`", LexerOptions::default()).unwrap();
    let token = lexer.token();
    assert_eq!(token.extra, TokenExtra::Template(TemplateEnd::Backtick));
    assert!(lexer.cursor.is_eof());
}

#[test]
fn escaped_backslash_before_substitution() {
    let lexer = scan(r"`\\${b}`", LexerOptions::default()).unwrap();
    assert_eq!(
        lexer.token().extra,
        TokenExtra::Template(TemplateEnd::Substitution)
    );
    assert_eq!(lexer.token().lit_location.unwrap().length, 1);
}

#[test]
fn unterminated_template() {
    assert_eq!(error("`abc").kind, LexErrorKind::UnterminatedString);
}
