use std::borrow::Cow;

use pretty_assertions::assert_eq;
use quill_ir::{
    CharKind, CodeFlags, CompileFlags, CompiledCode, LiteralFlags, LiteralIndex, LiteralKind,
    LiteralPool, LiteralValue, TokenKind,
};

use super::{FunctionParser, LiteralObject, LiteralObjectKind, NumberObject};
use crate::{LexError, LexErrorKind, Lexer, LexerOptions};

/// Scan one token and intern it as `kind`.
fn intern_next(lexer: &mut Lexer<'_>, kind: CharKind) -> Result<LiteralObject, LexError> {
    lexer.next_token()?;
    let location = lexer.token().lit_location.unwrap();
    lexer.construct_literal_object(&location, kind)
}

fn number_object(source: &str, is_expr: bool, is_negative: bool) -> NumberObject {
    let mut lexer = Lexer::new(source.as_bytes(), LexerOptions::default());
    lexer.next_token().unwrap();
    lexer.construct_number_object(is_expr, is_negative).unwrap()
}

#[test]
fn identifiers_are_deduplicated() {
    let mut lexer = Lexer::new(b"a b a", LexerOptions::default());
    let a = intern_next(&mut lexer, CharKind::Ident).unwrap();
    let b = intern_next(&mut lexer, CharKind::Ident).unwrap();
    let again = intern_next(&mut lexer, CharKind::Ident).unwrap();
    assert_eq!(a.index, again.index);
    assert_ne!(a.index, b.index);
    assert_eq!(lexer.pool().len(), 2);
    assert_eq!(lexer.lit_object(), Some(again));
}

#[test]
fn escaped_and_raw_spellings_share_an_entry() {
    let mut lexer = Lexer::new("caf\\u00e9 café".as_bytes(), LexerOptions::default());
    let escaped = intern_next(&mut lexer, CharKind::Ident).unwrap();
    let raw = intern_next(&mut lexer, CharKind::Ident).unwrap();
    assert_eq!(escaped.index, raw.index);

    let literal = lexer.pool().get(escaped.index).unwrap();
    assert_eq!(literal.chars(), Some("café".as_bytes()));
    assert!(!literal.flags.contains(LiteralFlags::SOURCE_PTR));
}

#[test]
fn escape_free_text_borrows_the_source() {
    let mut lexer = Lexer::new(b"'text'", LexerOptions::default());
    let object = intern_next(&mut lexer, CharKind::String).unwrap();
    let literal = lexer.pool().get(object.index).unwrap();
    assert_eq!(literal.kind(), LiteralKind::String);
    assert!(literal.flags.contains(LiteralFlags::SOURCE_PTR));
    assert!(matches!(
        &literal.value,
        LiteralValue::String(Cow::Borrowed(b"text"))
    ));
}

#[test]
fn identifier_and_string_entries_are_separate() {
    let mut lexer = Lexer::new(b"x 'x'", LexerOptions::default());
    let ident = intern_next(&mut lexer, CharKind::Ident).unwrap();
    let string = intern_next(&mut lexer, CharKind::String).unwrap();
    assert_ne!(ident.index, string.index);
}

#[test]
fn eval_is_recognized() {
    let mut lexer = Lexer::new(b"eval 'eval'", LexerOptions::default());
    assert_eq!(
        intern_next(&mut lexer, CharKind::Ident).unwrap().kind,
        LiteralObjectKind::Eval
    );
    assert_eq!(
        intern_next(&mut lexer, CharKind::String).unwrap().kind,
        LiteralObjectKind::Eval
    );
    assert_eq!(lexer.flags(), CompileFlags::empty());
}

#[test]
fn arguments_reference_marks_the_unit() {
    let mut lexer = Lexer::new(b"arguments", LexerOptions::default());
    let object = intern_next(&mut lexer, CharKind::Ident).unwrap();
    assert_eq!(object.kind, LiteralObjectKind::Arguments);
    assert!(lexer
        .flags()
        .contains(CompileFlags::ARGUMENTS_NEEDED | CompileFlags::LEXICAL_ENV_NEEDED));
    let literal = lexer.pool().get(object.index).unwrap();
    assert!(literal.flags.contains(LiteralFlags::NO_REG_STORE));
}

#[test]
fn arguments_string_or_opt_out_leaves_flags_alone() {
    let mut lexer = Lexer::new(b"'arguments'", LexerOptions::default());
    let object = intern_next(&mut lexer, CharKind::String).unwrap();
    assert_eq!(object.kind, LiteralObjectKind::Arguments);
    assert_eq!(lexer.flags(), CompileFlags::empty());

    let mut lexer = Lexer::new(b"arguments", LexerOptions::default());
    *lexer.flags_mut() |= CompileFlags::ARGUMENTS_NOT_NEEDED;
    intern_next(&mut lexer, CharKind::Ident).unwrap();
    assert!(!lexer.flags().contains(CompileFlags::ARGUMENTS_NEEDED));
}

#[test]
fn identifiers_inside_with_are_not_register_stored() {
    let options = LexerOptions {
        inside_with: true,
        ..LexerOptions::default()
    };
    let mut lexer = Lexer::new(b"x 'y'", options);
    let ident = intern_next(&mut lexer, CharKind::Ident).unwrap();
    let string = intern_next(&mut lexer, CharKind::String).unwrap();
    let flags = |index: LiteralIndex| lexer.pool().get(index).unwrap().flags;
    assert!(flags(ident.index).contains(LiteralFlags::NO_REG_STORE));
    assert!(!flags(string.index).contains(LiteralFlags::NO_REG_STORE));
}

#[test]
fn pool_limit_is_reported() {
    let pool = LiteralPool::with_limit(1);
    let mut lexer = Lexer::with_pool(b"a b", LexerOptions::default(), pool);
    intern_next(&mut lexer, CharKind::Ident).unwrap();
    let err = intern_next(&mut lexer, CharKind::Ident).unwrap_err();
    assert_eq!(err.kind, LexErrorKind::LiteralLimitReached);
}

#[test]
fn small_integers_become_immediates_in_expressions() {
    assert_eq!(number_object("5", true, false), NumberObject::Small(5));
    assert_eq!(number_object("256", true, false), NumberObject::Small(256));
    assert_eq!(number_object("0x10", true, false), NumberObject::Small(16));
    assert_eq!(number_object("0", true, false), NumberObject::Small(0));
}

#[test]
fn other_numbers_are_pool_entries() {
    let first = NumberObject::Literal(LiteralIndex::new(0));
    assert_eq!(number_object("257", true, false), first);
    assert_eq!(number_object("1.0", true, false), first);
    assert_eq!(number_object("1e2", true, false), first);
    assert_eq!(number_object("5", false, false), first);
    // -0 cannot be pushed as an immediate.
    assert_eq!(number_object("0", true, true), first);
}

#[test]
fn number_entries_keep_value_and_length() {
    let mut lexer = Lexer::new(b"12.5", LexerOptions::default());
    lexer.next_token().unwrap();
    let NumberObject::Literal(index) = lexer.construct_number_object(true, false).unwrap() else {
        panic!("12.5 is not an immediate");
    };
    assert_eq!(
        lexer.pool().get(index).unwrap().value,
        LiteralValue::Number {
            value: 12.5,
            length: 4
        }
    );
}

#[test]
fn number_object_needs_a_number_token() {
    let mut lexer = Lexer::new(b"x", LexerOptions::default());
    lexer.next_token().unwrap();
    let err = lexer.construct_number_object(true, false).unwrap_err();
    assert_eq!(err.kind, LexErrorKind::InvalidNumber);
}

/// Parses `{ name ... }` bodies, interning each name.
#[derive(Default)]
struct BodyParser {
    calls: Vec<(bool, CompileFlags)>,
}

impl BodyParser {
    fn body(lexer: &mut Lexer<'_>) -> Result<CompiledCode, LexError> {
        loop {
            lexer.next_token()?;
            if let Some(location) = lexer.token().ident_location() {
                lexer.construct_literal_object(&location, CharKind::Ident)?;
            } else if matches!(
                lexer.token().kind,
                TokenKind::RightBrace | TokenKind::EndOfStream
            ) {
                break;
            }
        }
        Ok(CompiledCode {
            flags: CodeFlags::FUNCTION,
            stack_limit: 1,
            byte_code: vec![0],
        })
    }
}

impl<'src> FunctionParser<'src> for BodyParser {
    fn parse_function(
        &mut self,
        lexer: &mut Lexer<'src>,
        flags: CompileFlags,
    ) -> Result<CompiledCode, LexError> {
        self.calls.push((false, flags));
        Self::body(lexer)
    }

    fn parse_arrow_function(
        &mut self,
        lexer: &mut Lexer<'src>,
        flags: CompileFlags,
    ) -> Result<CompiledCode, LexError> {
        self.calls.push((true, flags));
        Self::body(lexer)
    }
}

#[test]
fn function_slot_precedes_its_body_literals() {
    let mut lexer = Lexer::new(b"{ a b } c", LexerOptions::default());
    let mut parser = BodyParser::default();
    let index = lexer
        .construct_function_object(&mut parser, CompileFlags::IS_FUNCTION)
        .unwrap();

    assert_eq!(index, LiteralIndex::new(0));
    assert_eq!(lexer.pool().get(index).unwrap().kind(), LiteralKind::Function);
    assert_eq!(lexer.pool().len(), 3);
    assert_eq!(parser.calls, vec![(false, CompileFlags::IS_FUNCTION)]);

    lexer.next_token().unwrap();
    assert_eq!(lexer.token_text(), b"c");
}

#[test]
fn arrow_functions_use_the_arrow_entry_point() {
    let mut lexer = Lexer::new(b"}", LexerOptions::default());
    let mut parser = BodyParser::default();
    lexer
        .construct_function_object(&mut parser, CompileFlags::IS_ARROW_FUNCTION)
        .unwrap();
    assert_eq!(parser.calls, vec![(true, CompileFlags::IS_ARROW_FUNCTION)]);
}

#[test]
fn nested_functions_inherit_base_resolution() {
    let options = LexerOptions {
        inside_with: true,
        ..LexerOptions::default()
    };
    let mut lexer = Lexer::new(b"}", options);
    let mut parser = BodyParser::default();
    lexer
        .construct_function_object(&mut parser, CompileFlags::IS_FUNCTION)
        .unwrap();
    assert_eq!(
        parser.calls,
        vec![(
            false,
            CompileFlags::IS_FUNCTION | CompileFlags::RESOLVE_BASE_FOR_CALLS
        )]
    );
}

#[test]
fn full_pool_rejects_functions_before_parsing() {
    let pool = LiteralPool::with_limit(0);
    let mut lexer = Lexer::with_pool(b"}", LexerOptions::default(), pool);
    let mut parser = BodyParser::default();
    let err = lexer
        .construct_function_object(&mut parser, CompileFlags::IS_FUNCTION)
        .unwrap_err();
    assert_eq!(err.kind, LexErrorKind::LiteralLimitReached);
    assert!(parser.calls.is_empty());
}

#[test]
fn parser_errors_propagate() {
    let mut lexer = Lexer::new(b"{ 'open", LexerOptions::default());
    let mut parser = BodyParser::default();
    let err = lexer
        .construct_function_object(&mut parser, CompileFlags::IS_FUNCTION)
        .unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnterminatedString);
}
