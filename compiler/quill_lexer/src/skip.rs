//! Whitespace and comment skipping.

use quill_ir::{Position, TokenFlags};
use quill_lexer_core::char_class::{is_bom, is_ls_ps, is_nbsp, line_terminator_len, LS_PS_LEAD};

use crate::{LexError, Lexer};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum SkipMode {
    Spaces,
    LineComment,
    BlockComment,
}

impl Lexer<'_> {
    /// Skip whitespace, line terminators, and comments.
    ///
    /// Resets the token flags, setting [`TokenFlags::WAS_NEWLINE`] if a
    /// line terminator was crossed. If a lookahead already skipped (the
    /// one-shot [`TokenFlags::NO_SKIP_SPACES`]), only clears that flag.
    pub(crate) fn skip_spaces(&mut self) -> Result<(), LexError> {
        if self.token.flags.contains(TokenFlags::NO_SKIP_SPACES) {
            self.token.flags.clear(TokenFlags::NO_SKIP_SPACES);
            return Ok(());
        }
        self.token.flags = TokenFlags::EMPTY;

        let mut mode = SkipMode::Spaces;
        let mut comment_start = (Position::START, 0);
        let cur = &mut self.cursor;

        loop {
            let rest = cur.rest();
            let Some(&byte) = rest.first() else {
                if mode == SkipMode::BlockComment {
                    let (position, offset) = comment_start;
                    tracing::debug!(%position, "unterminated block comment");
                    return Err(LexError::unterminated_comment(position, offset));
                }
                return Ok(());
            };

            match byte {
                b'\r' | b'\n' => {
                    cur.advance_line(line_terminator_len(rest).unwrap_or(1));
                    self.token.flags.set(TokenFlags::WAS_NEWLINE);
                    if mode == SkipMode::LineComment {
                        mode = SkipMode::Spaces;
                    }
                    continue;
                }
                LS_PS_LEAD if is_ls_ps(rest) => {
                    cur.advance_line(3);
                    self.token.flags.set(TokenFlags::WAS_NEWLINE);
                    if mode == SkipMode::LineComment {
                        mode = SkipMode::Spaces;
                    }
                    continue;
                }
                0x0B | 0x0C | b' ' => {
                    cur.advance(1);
                    continue;
                }
                b'\t' => {
                    cur.advance_tab();
                    continue;
                }
                b'/' if mode == SkipMode::Spaces => match rest.get(1) {
                    Some(b'/') => {
                        mode = SkipMode::LineComment;
                        cur.advance(2);
                        continue;
                    }
                    Some(b'*') => {
                        mode = SkipMode::BlockComment;
                        comment_start = (Position::new(cur.line(), cur.column()), cur.pos());
                        cur.advance(2);
                        continue;
                    }
                    _ => {}
                },
                b'*' if mode == SkipMode::BlockComment && rest.get(1) == Some(&b'/') => {
                    mode = SkipMode::Spaces;
                    cur.advance(2);
                    continue;
                }
                // U+00A0 and U+FEFF: one column each.
                _ if is_nbsp(rest) || is_bom(rest) => {
                    cur.advance_char();
                    continue;
                }
                _ => {}
            }

            if mode == SkipMode::Spaces {
                return Ok(());
            }
            if !cur.eat_comment_text() {
                cur.advance_char();
            }
        }
    }

    /// Skip spaces and any run of empty statements (`;`).
    ///
    /// The token flags reflect the last skip.
    pub fn skip_empty_statements(&mut self) -> Result<(), LexError> {
        self.skip_spaces()?;
        while self.cursor.current() == Some(b';') {
            self.cursor.advance(1);
            self.skip_spaces()?;
        }
        Ok(())
    }
}
