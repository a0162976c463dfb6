//! Lex error rendering with source snippets.

use std::io::Write;
use std::ops::Range;

use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use quill_lexer::LexError;

/// Render `error` against `source` to stderr.
pub fn render_lex_error(path: &str, source: &[u8], error: &LexError) {
    render_lex_error_to(path, source, error, &mut std::io::stderr(), true).ok();
}

/// Render `error` to `writer`.
pub fn render_lex_error_to(
    path: &str,
    source: &[u8],
    error: &LexError,
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    let text = String::from_utf8_lossy(source);
    let span = char_span(&text, source, error);

    Report::build(ReportKind::Error, path, span.start)
        .with_config(Config::default().with_color(use_color))
        .with_message(error.kind.to_string())
        .with_label(
            Label::new((path, span))
                .with_message(format!("at {}", error.position))
                .with_color(Color::Red),
        )
        .finish()
        .write((path, Source::from(text.as_ref())), writer)
}

/// Character range covered by `error`.
///
/// Errors carry a byte offset; the report counts characters.
fn char_span(text: &str, source: &[u8], error: &LexError) -> Range<usize> {
    let offset = error.offset.min(source.len());
    let start = String::from_utf8_lossy(&source[..offset]).chars().count();
    let total = text.chars().count();
    let end = (start + error.width()).min(total);
    start..end.max(start)
}
