//! Single-character peeks past whitespace.
//!
//! Both helpers skip spaces and then set the one-shot
//! [`TokenFlags::NO_SKIP_SPACES`], so the next scan starts right at the
//! peeked byte and keeps the newline flag the peek computed. The current
//! token is otherwise untouched.

use quill_ir::{TokenFlags, TokenKind};

use crate::{LexError, Lexer};

impl Lexer<'_> {
    /// Is the next non-space byte `expected`?
    pub fn check_next_character(&mut self, expected: u8) -> Result<bool, LexError> {
        self.skip_spaces()?;
        self.keep_skipped_spaces();
        Ok(self.cursor.current() == Some(expected))
    }

    /// Classify what follows a parenthesized expression for arrow function
    /// detection.
    ///
    /// Returns [`TokenKind::Comma`], [`TokenKind::RightParen`], or
    /// [`TokenKind::Arrow`] (only if no line terminator precedes the `=>`),
    /// and [`TokenKind::EndOfStream`] for anything else.
    pub fn check_arrow(&mut self) -> Result<TokenKind, LexError> {
        self.skip_spaces()?;
        self.keep_skipped_spaces();
        let was_newline = self.token.flags.contains(TokenFlags::WAS_NEWLINE);
        Ok(match self.cursor.rest() {
            [b',', ..] => TokenKind::Comma,
            [b')', ..] => TokenKind::RightParen,
            [b'=', b'>', ..] if !was_newline => TokenKind::Arrow,
            _ => TokenKind::EndOfStream,
        })
    }
}
