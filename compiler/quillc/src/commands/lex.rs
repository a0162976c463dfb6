//! `quill lex`: print the token stream.

use std::io::Write;

use quill_ir::TokenKind;
use quill_lexer::{decode_literal, Lexer, LexerOptions};

use super::{display_text, CommandError};

/// Scan `source` and print one line per token.
///
/// Tokens scanned before a lex error are still printed.
pub fn lex_source(
    name: &str,
    source: &[u8],
    options: LexerOptions,
    out: &mut dyn Write,
) -> Result<(), CommandError> {
    let mut lexer = Lexer::new(source, options);
    writeln!(out, "Tokens for '{name}':")?;

    let mut count = 0usize;
    loop {
        lexer.next_token()?;
        let token = *lexer.token();
        count += 1;

        write!(out, "  {:?} @ {}", token.kind, token.position)?;
        if let Some(location) = token.lit_location {
            let text = if location.has_escape {
                display_text(&decode_literal(source, &location)).into_owned()
            } else {
                let end = location.start + usize::from(location.length);
                display_text(source.get(location.start..end).unwrap_or_default()).into_owned()
            };
            write!(out, " {:?} {text}", location.kind)?;
        }
        if token.literal_is_reserved {
            write!(out, " (reserved)")?;
        }
        if token.flags.was_newline() {
            write!(out, " [nl]")?;
        }
        writeln!(out)?;

        if token.kind == TokenKind::EndOfStream {
            break;
        }
    }

    tracing::debug!(name, count, "lexed source");
    writeln!(out, "{count} tokens")?;
    Ok(())
}
