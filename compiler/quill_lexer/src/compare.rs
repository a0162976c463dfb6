//! Identifier equality across escape spellings.
//!
//! `caf\u00e9` and `café` name the same binding. Comparing them walks both
//! spellings in step: raw bytes against raw bytes, escape against escape
//! by decoded value, and an escape against the encoded bytes it stands
//! for on the other side.

use quill_ir::LitLocation;
use quill_lexer_core::cesu8::encode_code_unit;

use crate::escape::unicode_escape;
use crate::Lexer;

/// Length of a `\uHHHH` escape.
const ESCAPE_LEN: usize = 6;

/// Do the identifiers at `left` and `right` in `source` spell the same
/// name?
pub fn identifiers_equal(source: &[u8], left: &LitLocation, right: &LitLocation) -> bool {
    if left.length != right.length {
        return false;
    }

    let length = usize::from(left.length);
    if !left.has_escape && !right.has_escape {
        return source.get(left.start..left.start + length)
            == source.get(right.start..right.start + length);
    }

    let mut l = left.start;
    let mut r = right.start;
    let mut count = length;

    while count > 0 {
        let (Some(&lb), Some(&rb)) = (source.get(l), source.get(r)) else {
            return false;
        };

        // A backslash is never part of a multi-byte sequence, so it always
        // starts an escape.
        match (lb == b'\\', rb == b'\\') {
            (false, false) => {
                if lb != rb {
                    return false;
                }
                l += 1;
                r += 1;
                count -= 1;
            }
            (true, true) => {
                let (Some(lu), Some(ru)) = (escape_at(source, l), escape_at(source, r)) else {
                    return false;
                };
                if lu != ru {
                    return false;
                }
                let (_, len) = encode_code_unit(lu);
                let Some(left_over) = count.checked_sub(len) else {
                    return false;
                };
                count = left_over;
                l += ESCAPE_LEN;
                r += ESCAPE_LEN;
            }
            (left_escaped, _) => {
                let (escaped, raw) = if left_escaped { (&mut l, &mut r) } else { (&mut r, &mut l) };
                let Some(unit) = escape_at(source, *escaped) else {
                    return false;
                };
                let (bytes, len) = encode_code_unit(unit);
                if source.get(*raw..*raw + len) != bytes.get(..len) {
                    return false;
                }
                let Some(left_over) = count.checked_sub(len) else {
                    return false;
                };
                count = left_over;
                *escaped += ESCAPE_LEN;
                *raw += len;
            }
        }
    }

    true
}

fn escape_at(source: &[u8], offset: usize) -> Option<u16> {
    unicode_escape(source.get(offset..)?)
}

impl Lexer<'_> {
    /// Does the current identifier spell the same name as `other`?
    pub fn compare_identifier_to_current(&self, other: &LitLocation) -> bool {
        self.token
            .lit_location
            .is_some_and(|current| identifiers_equal(self.cursor.source(), &current, other))
    }

    /// Does the current literal spell exactly `ident`?
    ///
    /// Escaped spellings never match: `g\u0065t` does not introduce an
    /// accessor.
    pub fn compare_raw_identifier_to_current(&self, ident: &[u8]) -> bool {
        let Some(current) = self.token.lit_location else {
            return false;
        };
        if current.has_escape || usize::from(current.length) != ident.len() {
            return false;
        }
        self.cursor
            .source()
            .get(current.start..current.start + ident.len())
            == Some(ident)
    }
}
