//! Literal index encoding.
//!
//! Small mode covers pools of up to 511 entries: indices below 255 take one
//! byte, larger ones are written as `255, index - 255`. Full mode covers the
//! whole pool: indices below 128 take one byte, larger ones two bytes with
//! the top bit of the first byte set.

use quill_ir::LiteralIndex;

/// Largest index written as a single byte in small mode.
pub const MAXIMUM_BYTE_VALUE: u16 = 255;
/// Largest index small mode can express.
pub const MAXIMUM_SMALL_VALUE: u16 = 510;
/// Largest index full mode can express.
pub const MAXIMUM_FULL_VALUE: u16 = 32_767;

const HIGHEST_BIT_MASK: u8 = 0x80;
const LOWER_SEVEN_BIT_MASK: u8 = 0x7F;

/// How literal indices are written into the byte code.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum LiteralEncoding {
    #[default]
    Small,
    Full,
}

impl LiteralEncoding {
    /// The narrowest encoding that can address `literal_count` entries.
    pub fn for_literal_count(literal_count: usize) -> Self {
        if literal_count <= usize::from(MAXIMUM_SMALL_VALUE) + 1 {
            LiteralEncoding::Small
        } else {
            LiteralEncoding::Full
        }
    }

    #[inline]
    pub const fn max_index(self) -> u16 {
        match self {
            LiteralEncoding::Small => MAXIMUM_SMALL_VALUE,
            LiteralEncoding::Full => MAXIMUM_FULL_VALUE,
        }
    }

    /// Encoded size of `index`, or `None` if it is out of range.
    pub fn encoded_len(self, index: LiteralIndex) -> Option<usize> {
        let raw = index.raw();
        if raw > self.max_index() {
            return None;
        }
        Some(match self {
            LiteralEncoding::Small if raw < MAXIMUM_BYTE_VALUE => 1,
            LiteralEncoding::Full if raw <= u16::from(LOWER_SEVEN_BIT_MASK) => 1,
            _ => 2,
        })
    }

    /// Append `index` to `out`. Returns `false` (writing nothing) if the
    /// index is out of range for this encoding.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "values are range-checked against max_index before narrowing"
    )]
    pub fn encode(self, index: LiteralIndex, out: &mut Vec<u8>) -> bool {
        let Some(len) = self.encoded_len(index) else {
            return false;
        };
        let raw = index.raw();
        match (self, len) {
            (_, 1) => out.push(raw as u8),
            (LiteralEncoding::Small, _) => {
                out.extend([MAXIMUM_BYTE_VALUE as u8, (raw - MAXIMUM_BYTE_VALUE) as u8]);
            }
            (LiteralEncoding::Full, _) => {
                out.extend([HIGHEST_BIT_MASK | (raw >> 8) as u8, (raw & 0xFF) as u8]);
            }
        }
        true
    }

    /// Read one index from the start of `bytes`, returning it with the
    /// number of bytes consumed.
    pub fn decode(self, bytes: &[u8]) -> Option<(LiteralIndex, usize)> {
        let first = *bytes.first()?;
        match self {
            LiteralEncoding::Small if u16::from(first) < MAXIMUM_BYTE_VALUE => {
                Some((LiteralIndex::new(u16::from(first)), 1))
            }
            LiteralEncoding::Small => {
                let second = *bytes.get(1)?;
                Some((LiteralIndex::new(MAXIMUM_BYTE_VALUE + u16::from(second)), 2))
            }
            LiteralEncoding::Full if first & HIGHEST_BIT_MASK == 0 => {
                Some((LiteralIndex::new(u16::from(first)), 1))
            }
            LiteralEncoding::Full => {
                let second = *bytes.get(1)?;
                let high = u16::from(first & LOWER_SEVEN_BIT_MASK) << 8;
                Some((LiteralIndex::new(high | u16::from(second)), 2))
            }
        }
    }
}
