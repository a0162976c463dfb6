//! Byte cursor with line/column bookkeeping.
//!
//! The cursor never owns the source. It is [`Copy`], so scanners take a
//! snapshot, scan ahead on the copy, and commit by assigning it back.
//!
//! Lines and columns are 1-based. Columns count characters, not bytes:
//! UTF-8 continuation bytes never advance the column, a tab moves it to
//! the next tab stop, and every line terminator resets it to 1.

use crate::char_class::{is_utf8_continuation, utf8_char_width, LS_PS_LEAD};

/// Align `column` to the next tab stop.
///
/// Tab stops sit at columns 1, 9, 17, ... so a tab at column 5 lands on 9.
#[inline]
pub const fn align_column_to_tab(column: u32) -> u32 {
    ((column + 7) & !7) + 1
}

/// Returns the earliest (minimum) of two optional positions.
///
/// Used to combine `memchr3` with a fourth needle.
fn earliest_of(a: Option<usize>, b: Option<usize>) -> Option<usize> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.min(y)),
        (Some(x), None) | (None, Some(x)) => Some(x),
        (None, None) => None,
    }
}

/// Column reached after walking `bytes` from `column`.
///
/// The bytes must not contain line terminators.
fn column_after(bytes: &[u8], column: u32) -> u32 {
    bytes.iter().fold(column, |col, &b| {
        if b == b'\t' {
            align_column_to_tab(col)
        } else if is_utf8_continuation(b) {
            col
        } else {
            col + 1
        }
    })
}

/// Cursor over an immutable source byte range.
#[derive(Clone, Copy, Debug)]
pub struct SourceCursor<'a> {
    source: &'a [u8],
    pos: usize,
    line: u32,
    column: u32,
}

/// Size assertion: &[u8] = 16, usize = 8, u32 + u32 = 8 => 32 bytes.
const _: () = assert!(std::mem::size_of::<SourceCursor<'static>>() <= 32);

impl<'a> SourceCursor<'a> {
    /// Create a cursor at line 1, column 1.
    pub fn new(source: &'a [u8]) -> Self {
        Self::with_position(source, 1, 1)
    }

    /// Create a cursor whose first byte sits at `line`:`column`.
    ///
    /// Used when the source is a fragment of a larger resource.
    pub fn with_position(source: &'a [u8], line: u32, column: u32) -> Self {
        SourceCursor {
            source,
            pos: 0,
            line,
            column,
        }
    }

    /// The whole source range.
    #[inline]
    pub fn source(&self) -> &'a [u8] {
        self.source
    }

    /// Current byte offset.
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }

    #[inline]
    pub fn column(&self) -> u32 {
        self.column
    }

    /// Overwrite the column, for scanners that compute it themselves.
    #[inline]
    pub fn set_column(&mut self, column: u32) {
        self.column = column;
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Bytes left between the cursor and the end of the source.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.source.len().saturating_sub(self.pos)
    }

    /// The unread part of the source.
    #[inline]
    pub fn rest(&self) -> &'a [u8] {
        self.source.get(self.pos..).unwrap_or_default()
    }

    /// Byte at the cursor, or `None` at end of input.
    #[inline]
    pub fn current(&self) -> Option<u8> {
        self.source.get(self.pos).copied()
    }

    /// Byte one position ahead of the cursor.
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.peek_nth(1)
    }

    /// Byte `n` positions ahead of the cursor.
    #[inline]
    pub fn peek_nth(&self, n: usize) -> Option<u8> {
        self.source.get(self.pos + n).copied()
    }

    /// Byte `n` positions behind the cursor.
    #[inline]
    pub fn peek_back(&self, n: usize) -> Option<u8> {
        self.pos
            .checked_sub(n)
            .and_then(|i| self.source.get(i).copied())
    }

    #[inline]
    pub fn starts_with(&self, prefix: &[u8]) -> bool {
        self.rest().starts_with(prefix)
    }

    /// Advance over `n` single-column bytes (ASCII).
    #[allow(
        clippy::cast_possible_truncation,
        reason = "token lengths are capped far below u32::MAX"
    )]
    #[inline]
    pub fn advance(&mut self, n: usize) {
        self.pos += n;
        self.column += n as u32;
    }

    /// Advance over `n` bytes without touching the column.
    #[inline]
    pub fn advance_bytes(&mut self, n: usize) {
        self.pos += n;
    }

    /// Advance over one character: the lead byte plus any continuation
    /// bytes, one column in total.
    #[inline]
    pub fn advance_char(&mut self) {
        self.pos += 1;
        self.column += 1;
        self.eat_continuation_bytes();
    }

    /// Skip continuation bytes, returning how many were skipped.
    #[inline]
    pub fn eat_continuation_bytes(&mut self) -> usize {
        let start = self.pos;
        while self.current().is_some_and(is_utf8_continuation) {
            self.pos += 1;
        }
        self.pos - start
    }

    /// Advance over a tab.
    #[inline]
    pub fn advance_tab(&mut self) {
        self.pos += 1;
        self.column = align_column_to_tab(self.column);
    }

    /// Advance over a line terminator of `len` bytes.
    #[inline]
    pub fn advance_line(&mut self, len: usize) {
        self.pos += len;
        self.line += 1;
        self.column = 1;
    }

    /// Advance while `pred` holds for the current byte (single-column bytes).
    #[inline]
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) -> usize {
        let start = self.pos;
        while self.current().is_some_and(&pred) {
            self.advance(1);
        }
        self.pos - start
    }

    /// Skip plain comment text up to the next byte that might end a comment
    /// or a line: `\n`, `\r`, `*`, or the lead byte of U+2028/U+2029.
    ///
    /// Stops at end of input if none is found. Returns `true` if it moved.
    pub fn eat_comment_text(&mut self) -> bool {
        let rest = self.rest();
        let end = earliest_of(
            memchr::memchr3(b'\n', b'\r', b'*', rest),
            memchr::memchr(LS_PS_LEAD, rest),
        )
        .unwrap_or(rest.len());
        if end == 0 {
            return false;
        }
        self.column = column_after(&rest[..end], self.column);
        self.pos += end;
        true
    }

    /// Width of the UTF-8 sequence at the cursor (1 at end of input).
    #[inline]
    pub fn char_width(&self) -> usize {
        self.current().map_or(1, utf8_char_width)
    }

    /// Source bytes from `start` up to the cursor.
    #[inline]
    pub fn slice_from(&self, start: usize) -> &'a [u8] {
        self.source.get(start..self.pos).unwrap_or_default()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
