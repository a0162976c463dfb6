//! `quill literals`: build the literal pool of a source file.
//!
//! Every identifier, string, number, and regexp is interned, then pushed
//! onto the stack of a throwaway code block so the byte code size and
//! stack depth can be reported too.

use std::io::Write;

use quill_bytecode::{Emitter, LiteralEncoding};
use quill_ir::{CharKind, CodeFlags, LitKind, Literal, LiteralValue, TokenKind};
use quill_lexer::{Lexer, LexerOptions, NumberObject};

use super::{display_text, CommandError};

/// One value the throwaway code block pushes.
#[derive(Copy, Clone, Debug)]
enum Push {
    Literal(quill_ir::LiteralIndex),
    Number(u16),
}

pub fn literals_source(
    name: &str,
    source: &[u8],
    options: LexerOptions,
    out: &mut dyn Write,
) -> Result<(), CommandError> {
    let mut lexer = Lexer::new(source, options);
    let mut pushes = Vec::new();
    let mut previous = None;

    loop {
        lexer.next_token()?;
        let token = *lexer.token();
        match token.kind {
            TokenKind::EndOfStream => break,
            TokenKind::Divide | TokenKind::AssignDivide if regexp_allowed(previous) => {
                tracing::trace!(position = %token.position, ?previous, "rescanning as regexp");
                if let Some(object) = lexer.construct_regexp_object(false)? {
                    pushes.push(Push::Literal(object.index));
                }
            }
            TokenKind::Literal | TokenKind::TemplateLiteral => {
                if let Some(location) = token.lit_location {
                    let push = match location.kind {
                        LitKind::Ident => Push::Literal(
                            lexer.construct_literal_object(&location, CharKind::Ident)?.index,
                        ),
                        LitKind::String => Push::Literal(
                            lexer.construct_literal_object(&location, CharKind::String)?.index,
                        ),
                        LitKind::Number => match lexer.construct_number_object(true, false)? {
                            NumberObject::Small(value) => Push::Number(value),
                            NumberObject::Literal(index) => Push::Literal(index),
                        },
                        LitKind::Regexp => continue,
                    };
                    pushes.push(push);
                }
            }
            _ => {}
        }
        previous = Some(lexer.token().kind);
    }

    let pool = lexer.pool();
    let mut emitter = Emitter::new(LiteralEncoding::for_literal_count(pool.len()));
    for push in &pushes {
        match *push {
            Push::Literal(index) => emitter.emit_push_literal(index)?,
            Push::Number(value) => emitter.emit_push_number(value, false)?,
        }
    }
    let code = emitter.finish(CodeFlags::empty())?;
    tracing::debug!(
        name,
        literals = pool.len(),
        pushes = pushes.len(),
        bytes = code.byte_code.len(),
        "built literal pool"
    );

    writeln!(out, "Literals for '{name}' ({} entries):", pool.len())?;
    for (index, literal) in pool.iter() {
        writeln!(out, "  {index} {}", describe(literal))?;
    }
    writeln!(
        out,
        "Byte code: {} bytes, stack limit {}",
        code.byte_code.len(),
        code.stack_limit
    )?;
    Ok(())
}

/// Can a `/` after `previous` start a regexp?
///
/// After anything that ends an operand, `/` is division.
fn regexp_allowed(previous: Option<TokenKind>) -> bool {
    !matches!(
        previous,
        Some(
            TokenKind::Literal
                | TokenKind::TemplateLiteral
                | TokenKind::RightParen
                | TokenKind::RightSquare
                | TokenKind::RightBrace
                | TokenKind::This
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Null
                | TokenKind::Increase
                | TokenKind::Decrease
        )
    )
}

fn describe(literal: &Literal<'_>) -> String {
    let mut text = match &literal.value {
        LiteralValue::Unused => "unused".to_owned(),
        LiteralValue::Ident(chars) => format!("ident {}", display_text(chars)),
        LiteralValue::String(chars) => format!("string {:?}", display_text(chars)),
        LiteralValue::Number { value, .. } => format!("number {value}"),
        LiteralValue::SmallInt(value) => format!("number {value}"),
        LiteralValue::Function(code) => format!("function ({} bytes)", code.byte_code.len()),
        LiteralValue::Regexp { pattern, flags } => {
            format!("regexp /{}/ {flags:?}", display_text(pattern))
        }
    };
    if !literal.flags.is_empty() {
        text.push_str(&format!(" {:?}", literal.flags));
    }
    text
}
