//! String and template literal scanning.
//!
//! The scanner validates escapes and measures the decoded length without
//! decoding anything; [`decode_literal`](crate::decode_literal) produces
//! the bytes later, only for literals that end up in the pool.

use quill_ir::limits::MAX_STRING_LENGTH;
use quill_ir::{LitKind, LitLocation, TemplateEnd, TokenExtra, TokenKind};
use quill_lexer_core::cesu8::code_unit_len;
use quill_lexer_core::char_class::{line_terminator_len, UTF8_4BYTE_START};

use crate::escape::{hex_escape, octal_escape};
use crate::{LexError, LexErrorKind, Lexer};

impl Lexer<'_> {
    /// Scan a string at the cursor.
    ///
    /// The cursor sits on the opening quote: `'`, `"`, or `` ` ``, or a `}`
    /// that closes a template substitution and resumes the template.
    pub(crate) fn parse_string(&mut self) -> Result<(), LexError> {
        let quote = self.token.position;
        let quote_offset = self.cursor.pos();
        let mut cur = self.cursor;

        let end_char = match cur.current() {
            Some(b'}' | b'`') => b'`',
            Some(quote_char) => quote_char,
            None => return Err(LexError::unterminated_string(quote, quote_offset)),
        };
        let is_template = end_char == b'`';
        cur.advance(1);

        let start = cur.pos();
        let mut length = 0usize;
        let mut has_escape = false;
        let mut template_end = TemplateEnd::Backtick;

        loop {
            let rest = cur.rest();
            let Some(&byte) = rest.first() else {
                tracing::debug!(position = %quote, "unterminated string");
                return Err(LexError::unterminated_string(quote, quote_offset));
            };
            if byte == end_char {
                break;
            }
            if is_template && rest.starts_with(b"${") {
                template_end = TemplateEnd::Substitution;
                break;
            }

            if byte == b'\\' {
                let escape = cur;
                cur.advance(1);
                let rest = cur.rest();
                if rest.is_empty() {
                    continue;
                }
                has_escape = true;

                if let Some(len) = line_terminator_len(rest) {
                    cur.advance_line(len);
                    continue;
                }
                if let Some((unit, len)) = octal_escape(rest) {
                    if self.is_strict() {
                        return Err(self.error(LexErrorKind::OctalEscapeNotAllowed));
                    }
                    length += code_unit_len(unit);
                    cur.advance(len);
                    continue;
                }
                if matches!(rest.first(), Some(b'x' | b'u')) {
                    let (unit, len) = hex_escape(rest).ok_or_else(|| {
                        self.error_at(LexErrorKind::InvalidEscapeSequence, &escape)
                    })?;
                    length += code_unit_len(unit);
                    cur.advance(len);
                    continue;
                }
                // Named and identity escapes decode to a character of the
                // same byte length; fall through and count it.
            }

            let rest = cur.rest();
            let Some(&byte) = rest.first() else {
                continue;
            };
            if byte >= UTF8_4BYTE_START {
                // Stored as a surrogate pair: two 3-byte code units.
                length += 6;
                has_escape = true;
                cur.advance_char();
                continue;
            }
            if byte == b'\t' {
                length += 1;
                cur.advance_tab();
                continue;
            }
            if let Some(len) = line_terminator_len(rest) {
                if !is_template {
                    return Err(self.error_at(LexErrorKind::NewlineNotAllowed, &cur));
                }
                length += len;
                cur.advance_line(len);
                continue;
            }

            let before = cur.pos();
            cur.advance_char();
            length += cur.pos() - before;
        }

        if length > MAX_STRING_LENGTH {
            return Err(self.error(LexErrorKind::StringTooLong));
        }
        let length = u16::try_from(length).map_err(|_| self.error(LexErrorKind::StringTooLong))?;

        self.token.lit_location = Some(LitLocation {
            start,
            length,
            kind: LitKind::String,
            has_escape,
        });

        let kind = if is_template {
            self.token.extra = TokenExtra::Template(template_end);
            TokenKind::TemplateLiteral
        } else {
            TokenKind::Literal
        };
        match template_end {
            TemplateEnd::Backtick => cur.advance(1),
            // `${` is scanned as its own token.
            TemplateEnd::Substitution => self.pending_substitution = true,
        }
        self.finish_token(kind, cur);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
