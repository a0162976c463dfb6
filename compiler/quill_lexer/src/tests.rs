use pretty_assertions::assert_eq;
use quill_ir::{CompileFlags, LitKind, Position, TemplateEnd, Token, TokenExtra, TokenKind};

use super::*;

fn tokenize(source: &str) -> Vec<Token> {
    Lexer::tokenize(source.as_bytes(), LexerOptions::default()).expect("source should scan")
}

fn text<'a>(source: &'a str, token: &Token) -> &'a str {
    &source[token.span.to_range()]
}

/// Decoded characters of a token's literal.
fn decoded(source: &str, token: &Token) -> String {
    let location = token.lit_location.expect("token should carry a literal");
    String::from_utf8(decode_literal(source.as_bytes(), &location).to_vec()).unwrap()
}

#[test]
fn var_statement_tokens() {
    let source = "var x = 1 + 2;";
    let tokens = tokenize(source);
    let kinds: Vec<_> = tokens.iter().map(|token| token.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Var,
            TokenKind::Literal,
            TokenKind::Assign,
            TokenKind::Literal,
            TokenKind::Add,
            TokenKind::Literal,
            TokenKind::Semicolon,
            TokenKind::EndOfStream,
        ]
    );

    let literal_kinds: Vec<_> = tokens
        .iter()
        .filter_map(|token| token.lit_location.map(|loc| loc.kind))
        .collect();
    assert_eq!(literal_kinds, vec![LitKind::Ident, LitKind::Number, LitKind::Number]);

    let texts: Vec<_> = tokens.iter().map(|token| text(source, token)).collect();
    assert_eq!(texts, vec!["var", "x", "=", "1", "+", "2", ";", ""]);
}

#[test]
fn template_with_substitution() {
    let source = "`a${b}c`";
    let tokens = tokenize(source);
    let kinds: Vec<_> = tokens.iter().map(|token| token.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::TemplateLiteral,
            TokenKind::TemplateSubstitution,
            TokenKind::Literal,
            TokenKind::TemplateLiteral,
            TokenKind::EndOfStream,
        ]
    );

    assert_eq!(decoded(source, &tokens[0]), "a");
    assert_eq!(tokens[0].extra, TokenExtra::Template(TemplateEnd::Substitution));
    assert_eq!(text(source, &tokens[1]), "${");
    assert_eq!(tokens[2].lit_location.unwrap().kind, LitKind::Ident);
    assert_eq!(text(source, &tokens[2]), "b");
    assert_eq!(decoded(source, &tokens[3]), "c");
    assert_eq!(tokens[3].extra, TokenExtra::Template(TemplateEnd::Backtick));
}

#[test]
fn token_positions() {
    let tokens = tokenize("a\n\tbc  d");
    let positions: Vec<_> = tokens.iter().map(|token| token.position).collect();
    assert_eq!(
        positions,
        vec![
            Position::new(1, 1),
            Position::new(2, 9),
            Position::new(2, 13),
            Position::new(2, 14),
        ]
    );
}

#[test]
fn start_position_offsets_every_token() {
    let options = LexerOptions {
        start_line: 3,
        start_column: 4,
        ..LexerOptions::default()
    };
    let tokens = Lexer::tokenize(b"aa bb1\n cc", options).unwrap();
    let positions: Vec<_> = tokens.iter().map(|token| token.position).collect();
    assert_eq!(
        positions,
        vec![
            Position::new(3, 4),
            Position::new(3, 7),
            Position::new(4, 2),
            Position::new(4, 4),
        ]
    );
}

#[test]
fn future_reserved_words_outside_strict_mode() {
    let tokens = tokenize("let yield x");
    assert!(tokens[..2].iter().all(|token| token.kind == TokenKind::Literal));
    assert!(tokens[..2].iter().all(|token| token.literal_is_reserved));
    assert!(!tokens[2].literal_is_reserved);
}

#[test]
fn future_reserved_words_in_strict_mode() {
    let err = Lexer::tokenize(b"var  static", LexerOptions::strict()).unwrap_err();
    assert_eq!(err.kind, LexErrorKind::StrictIdentNotAllowed);
    assert_eq!(err.position, Position::new(1, 6));
    assert_eq!(err.end_column, Some(12));
}

#[test]
fn escaped_keyword_is_an_identifier() {
    let source = "v\\u0061r";
    let tokens = tokenize(source);
    assert_eq!(tokens[0].kind, TokenKind::Literal);
    assert_eq!(decoded(source, &tokens[0]), "var");
}

#[test]
fn identifier_escapes_are_validated() {
    for (source, kind) in [
        ("\\u0031a", LexErrorKind::InvalidIdentifierStart),
        ("a\\u002d", LexErrorKind::InvalidIdentifierPart),
        ("a\\u00zz", LexErrorKind::InvalidUnicodeEscapeSequence),
        ("a\\x41", LexErrorKind::InvalidUnicodeEscapeSequence),
    ] {
        let err = Lexer::tokenize(source.as_bytes(), LexerOptions::default()).unwrap_err();
        assert_eq!(err.kind, kind, "{source}");
    }
}

#[test]
fn identifier_length_is_limited() {
    let long = "a".repeat(256);
    let err = Lexer::tokenize(long.as_bytes(), LexerOptions::default()).unwrap_err();
    assert_eq!(err.kind, LexErrorKind::IdentifierTooLong);
    assert!(Lexer::tokenize(&long.as_bytes()[1..], LexerOptions::default()).is_ok());
}

#[test]
fn unicode_identifiers() {
    let source = "café = ñandú";
    let tokens = tokenize(source);
    assert_eq!(text(source, &tokens[0]), "café");
    assert_eq!(tokens[0].lit_location.unwrap().length, 5);
    assert_eq!(tokens[2].position, Position::new(1, 8));
}

#[test]
fn token_text_follows_the_current_token() {
    let mut lexer = Lexer::new(b"foo  'bar'", LexerOptions::default());
    lexer.next_token().unwrap();
    assert_eq!(lexer.token_text(), b"foo");
    lexer.next_token().unwrap();
    assert_eq!(lexer.token_text(), b"'bar'");
}

#[test]
fn options_seed_compile_flags() {
    let options = LexerOptions {
        strict: true,
        inside_with: true,
        ..LexerOptions::default()
    };
    assert_eq!(
        options.compile_flags(),
        CompileFlags::IS_STRICT | CompileFlags::INSIDE_WITH
    );
    assert_eq!(LexerOptions::default().compile_flags(), CompileFlags::empty());
    assert_eq!(Lexer::new(b"", options).flags(), options.compile_flags());
}

#[test]
fn pool_outlives_the_lexer() {
    let source = "a 'b' a";
    let mut lexer = Lexer::new(source.as_bytes(), LexerOptions::default());
    for kind in [quill_ir::CharKind::Ident, quill_ir::CharKind::String, quill_ir::CharKind::Ident] {
        lexer.next_token().unwrap();
        let location = lexer.token().lit_location.unwrap();
        lexer.construct_literal_object(&location, kind).unwrap();
    }
    let pool = lexer.into_pool();
    assert_eq!(pool.len(), 2);
}

// === Lookahead ===

#[test]
fn check_next_character_peeks_without_consuming() {
    let mut lexer = Lexer::new(b"a  (b)", LexerOptions::default());
    lexer.next_token().unwrap();
    assert!(lexer.check_next_character(b'(').unwrap());
    assert_eq!(lexer.token_text(), b"a");

    lexer.next_token().unwrap();
    assert_eq!(lexer.token().kind, TokenKind::LeftParen);
    assert_eq!(lexer.token().position, Position::new(1, 4));
    assert!(!lexer.check_next_character(b')').unwrap());
}

#[test]
fn peek_keeps_the_newline_flag_for_the_next_token() {
    let mut lexer = Lexer::new(b"a\n  b", LexerOptions::default());
    lexer.next_token().unwrap();
    assert!(!lexer.check_next_character(b'(').unwrap());
    lexer.next_token().unwrap();
    assert_eq!(lexer.token_text(), b"b");
    assert!(lexer.token().flags.was_newline());
}

#[test]
fn check_arrow_classifies_what_follows() {
    for (source, expected) in [
        (")  , b", TokenKind::Comma),
        (")  ) b", TokenKind::RightParen),
        (") => b", TokenKind::Arrow),
        (")\n=> b", TokenKind::EndOfStream),
        (") = b", TokenKind::EndOfStream),
        (") + b", TokenKind::EndOfStream),
        (")", TokenKind::EndOfStream),
    ] {
        let mut lexer = Lexer::new(source.as_bytes(), LexerOptions::default());
        lexer.next_token().unwrap();
        assert_eq!(lexer.check_arrow().unwrap(), expected, "{source:?}");
        assert_eq!(lexer.token().kind, TokenKind::RightParen);
    }
}

#[test]
fn arrow_is_scanned_after_check_arrow() {
    let mut lexer = Lexer::new(b"(a) => a", LexerOptions::default());
    for _ in 0..3 {
        lexer.next_token().unwrap();
    }
    assert_eq!(lexer.check_arrow().unwrap(), TokenKind::Arrow);
    lexer.next_token().unwrap();
    assert_eq!(lexer.token().kind, TokenKind::Arrow);
    assert_eq!(lexer.token().position, Position::new(1, 5));
}

#[test]
fn lookahead_reports_unterminated_comments() {
    let mut lexer = Lexer::new(b"a /*", LexerOptions::default());
    lexer.next_token().unwrap();
    let err = lexer.check_arrow().unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnterminatedMultilineComment);
    assert_eq!(err.position, Position::new(1, 3));
}

#[allow(
    clippy::disallowed_types,
    reason = "proptest macros internally use Arc"
)]
mod proptest_streams {
    use proptest::prelude::*;
    use quill_ir::{CharKind, LitKind, TokenKind};

    use crate::{decode_literal, Lexer, LexerOptions};

    /// Bytes that reach the string, template, comment, and punctuator paths.
    const JS_ALPHABET: &str = "[a-z0-9_$ \\t\\n'\"`{}()\\[\\];,.=+*/<>!&|?:\\\\-]{0,48}";

    /// Whole-stream invariants of `tokenize`.
    ///
    /// Decoded literal lengths are only compared with `exact_lengths`;
    /// malformed UTF-8 has no defined decoded form.
    fn check_stream(
        source: &[u8],
        options: LexerOptions,
        exact_lengths: bool,
    ) -> Result<(), TestCaseError> {
        match Lexer::tokenize(source, options) {
            Ok(tokens) => {
                let (last, rest) = tokens.split_last().unwrap();
                prop_assert_eq!(last.kind, TokenKind::EndOfStream);
                prop_assert!(rest.iter().all(|token| token.kind != TokenKind::EndOfStream));

                let mut previous_start = 0;
                for token in &tokens {
                    prop_assert!(token.span.start <= token.span.end);
                    prop_assert!(token.span.end <= source.len());
                    prop_assert!(token.span.start >= previous_start);
                    prop_assert!(token.position.line >= 1 && token.position.column >= 1);
                    previous_start = token.span.start;

                    if let Some(location) = token.lit_location {
                        prop_assert!(location.start <= source.len());
                        let decoded = decode_literal(source, &location);
                        if exact_lengths {
                            prop_assert_eq!(decoded.len(), usize::from(location.length));
                        }
                    }
                }
            }
            Err(err) => {
                prop_assert!(err.offset <= source.len());
                prop_assert!(err.position.line >= 1 && err.position.column >= 1);
            }
        }
        Ok(())
    }

    /// Scan to the end, interning every literal on the way.
    fn intern_everything(source: &[u8]) {
        let mut lexer = Lexer::new(source, LexerOptions::default());
        while lexer.next_token().is_ok() {
            let token = *lexer.token();
            match token.lit_location {
                _ if token.kind == TokenKind::EndOfStream => break,
                Some(location) if location.kind == LitKind::Ident => {
                    let _ = lexer.construct_literal_object(&location, CharKind::Ident);
                }
                Some(location) if location.kind == LitKind::String => {
                    let _ = lexer.construct_literal_object(&location, CharKind::String);
                }
                Some(location) if location.kind == LitKind::Number => {
                    let _ = lexer.construct_number_object(true, false);
                }
                _ => {}
            }
        }
    }

    proptest! {
        #[test]
        fn tokenize_never_panics(source in prop::collection::vec(any::<u8>(), 0..64)) {
            check_stream(&source, LexerOptions::default(), false)?;
            check_stream(&source, LexerOptions::strict(), false)?;
        }

        #[test]
        fn js_like_streams_stay_well_formed(source in JS_ALPHABET) {
            check_stream(source.as_bytes(), LexerOptions::default(), true)?;
            check_stream(source.as_bytes(), LexerOptions::strict(), true)?;
            intern_everything(source.as_bytes());
        }

        #[test]
        fn end_of_stream_repeats(source in "[a-z +;]{0,24}") {
            let mut lexer = Lexer::new(source.as_bytes(), LexerOptions::default());
            loop {
                lexer.next_token().unwrap();
                if lexer.token().kind == TokenKind::EndOfStream {
                    break;
                }
            }
            let end = *lexer.token();
            for _ in 0..3 {
                lexer.next_token().unwrap();
                prop_assert_eq!(*lexer.token(), end);
            }
        }
    }
}
