//! Identifier and keyword scanning.

use quill_ir::limits::MAX_IDENT_LENGTH;
use quill_ir::{LitKind, LitLocation, TokenKind};
use quill_lexer_core::cesu8::code_unit_len;
use quill_lexer_core::char_class::{
    is_identifier_part, is_identifier_part_unit, is_identifier_start_unit,
};
use quill_lexer_core::SourceCursor;

use crate::escape::unicode_escape;
use crate::{keywords, LexError, LexErrorKind, Lexer};

impl<'src> Lexer<'src> {
    /// Scan an identifier at the cursor, which must be at an identifier
    /// start or a backslash.
    ///
    /// With `check_keywords`, an escape-free spelling of a keyword becomes
    /// that keyword's token. Future strict reserved words stay literals
    /// marked `literal_is_reserved`, or fail in strict mode.
    pub(crate) fn parse_identifier(&mut self, check_keywords: bool) -> Result<(), LexError> {
        let start = self.cursor.pos();
        let mut cur = self.cursor;
        let mut length = 0usize;
        let mut has_escape = false;

        loop {
            if cur.current() == Some(b'\\') {
                has_escape = true;
                let unit = self.identifier_escape(&cur, length == 0)?;
                length += code_unit_len(unit);
                cur.advance(6);
            } else {
                let before = cur.pos();
                cur.advance_char();
                length += cur.pos() - before;
            }

            let rest = cur.rest();
            if rest.first() != Some(&b'\\') && !is_identifier_part(rest) {
                break;
            }
        }

        if length > MAX_IDENT_LENGTH {
            return Err(self.error_until(LexErrorKind::IdentifierTooLong, &cur));
        }
        let length =
            u16::try_from(length).map_err(|_| self.error(LexErrorKind::IdentifierTooLong))?;

        let mut kind = TokenKind::Literal;
        if check_keywords && !has_escape {
            if let Some(keyword) = keywords::lookup(cur.slice_from(start)) {
                if !keyword.is_future_strict_reserved() {
                    kind = keyword;
                } else if self.is_strict() {
                    return Err(self.error_until(LexErrorKind::StrictIdentNotAllowed, &cur));
                } else {
                    self.token.literal_is_reserved = true;
                }
            }
        }

        if kind == TokenKind::Literal {
            self.token.lit_location = Some(LitLocation {
                start,
                length,
                kind: LitKind::Ident,
                has_escape,
            });
        }
        self.finish_token(kind, cur);
        Ok(())
    }

    /// Decode and validate the `\uHHHH` escape at `cur`.
    fn identifier_escape(&self, cur: &SourceCursor<'src>, at_start: bool) -> Result<u16, LexError> {
        let fail = |kind| self.error_at(kind, cur).with_end_column(cur.column() + 6);
        let unit = unicode_escape(cur.rest())
            .ok_or_else(|| fail(LexErrorKind::InvalidUnicodeEscapeSequence))?;
        if at_start {
            if !is_identifier_start_unit(unit) {
                return Err(fail(LexErrorKind::InvalidIdentifierStart));
            }
        } else if !is_identifier_part_unit(unit) {
            return Err(fail(LexErrorKind::InvalidIdentifierPart));
        }
        Ok(unit)
    }
}
