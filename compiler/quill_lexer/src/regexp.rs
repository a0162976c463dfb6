//! Regular expression literals.
//!
//! The scanner cannot tell `/` the operator from `/` the regexp opener, so
//! the parser calls [`Lexer::construct_regexp_object`] when it sees a
//! `Divide` or `AssignDivide` token in operand position.

use quill_ir::limits::MAX_STRING_LENGTH;
use quill_ir::{LitKind, LitLocation, RegexpFlags, TokenKind};
use quill_lexer_core::char_class::{is_identifier_part, line_terminator_len};

use crate::literal::{LiteralObject, LiteralObjectKind};
use crate::{LexError, LexErrorKind, Lexer};

impl Lexer<'_> {
    /// Rescan the current `/` or `/=` token as a regexp literal.
    ///
    /// With `parse_only`, the literal is validated and skipped but no pool
    /// entry is created and `None` is returned.
    pub fn construct_regexp_object(
        &mut self,
        parse_only: bool,
    ) -> Result<Option<LiteralObject>, LexError> {
        debug_assert!(matches!(
            self.token.kind,
            TokenKind::Divide | TokenKind::AssignDivide
        ));

        // The body starts right after the opening `/`; for `/=` the `=`
        // was already consumed as part of it.
        let body_start = self.token.span.start + 1;
        let mut cur = self.cursor;
        let mut in_class = false;

        loop {
            let rest = cur.rest();
            let Some(&byte) = rest.first() else {
                return Err(self.error(LexErrorKind::UnterminatedRegexp));
            };
            if byte == b'/' && !in_class {
                break;
            }
            if line_terminator_len(rest).is_some() {
                return Err(self.error_at(LexErrorKind::NewlineNotAllowed, &cur));
            }
            match byte {
                b'\t' => {
                    cur.advance_tab();
                    continue;
                }
                b'[' => in_class = true,
                b']' => in_class = false,
                b'\\' => match rest.get(1) {
                    None => return Err(self.error(LexErrorKind::UnterminatedRegexp)),
                    // A printable escaped byte is consumed with its backslash;
                    // anything else is left for the next round.
                    Some(0x20..=0x7F) => cur.advance(1),
                    Some(_) => {}
                },
                _ => {}
            }
            cur.advance_char();
        }

        let body_end = cur.pos();
        cur.advance(1);

        let mut flags = RegexpFlags::empty();
        while let Some(flag) = cur.current().and_then(RegexpFlags::from_letter) {
            if flags.contains(flag) {
                return Err(self.error_at(LexErrorKind::DuplicatedRegexpFlag, &cur));
            }
            flags |= flag;
            cur.advance(1);
        }
        let rest = cur.rest();
        if rest.first() == Some(&b'\\') || is_identifier_part(rest) {
            return Err(self.error_at(LexErrorKind::UnknownRegexpFlag, &cur));
        }

        let length = body_end - body_start;
        if length > MAX_STRING_LENGTH {
            return Err(self.error(LexErrorKind::RegexpTooLong));
        }
        let length = u16::try_from(length).map_err(|_| self.error(LexErrorKind::RegexpTooLong))?;

        self.cursor = cur;
        self.token.span.end = cur.pos();
        if parse_only {
            return Ok(None);
        }

        let pattern = self
            .cursor
            .source()
            .get(body_start..body_end)
            .unwrap_or_default();
        let index = self
            .pool
            .push_regexp(pattern, flags)
            .map_err(|err| self.pool_error(err))?;
        tracing::debug!(%index, ?flags, "regexp literal");

        self.token.kind = TokenKind::Literal;
        self.token.literal_is_reserved = false;
        self.token.lit_location = Some(LitLocation {
            start: body_start,
            length,
            kind: LitKind::Regexp,
            has_escape: false,
        });
        let object = LiteralObject {
            index,
            kind: LiteralObjectKind::Any,
        };
        self.lit_object = Some(object);
        Ok(Some(object))
    }
}
