//! Code unit encoding for the engine's internal string form.
//!
//! Strings are stored as UTF-8 over 16-bit code units (CESU-8): every
//! code unit, including an unpaired surrogate half, takes 1 to 3 bytes.
//! Astral code points therefore appear as two 3-byte sequences.

/// Encoded length of one code unit.
#[inline]
pub const fn code_unit_len(unit: u16) -> usize {
    if unit < 0x80 {
        1
    } else if unit < 0x800 {
        2
    } else {
        3
    }
}

/// Encode one code unit, returning the buffer and the number of bytes used.
#[allow(
    clippy::cast_possible_truncation,
    reason = "each expression is masked or shifted into u8 range"
)]
pub const fn encode_code_unit(unit: u16) -> ([u8; 3], usize) {
    if unit < 0x80 {
        ([unit as u8, 0, 0], 1)
    } else if unit < 0x800 {
        ([0xC0 | (unit >> 6) as u8, 0x80 | (unit & 0x3F) as u8, 0], 2)
    } else {
        (
            [
                0xE0 | (unit >> 12) as u8,
                0x80 | ((unit >> 6) & 0x3F) as u8,
                0x80 | (unit & 0x3F) as u8,
            ],
            3,
        )
    }
}

/// Append the encoding of `unit` to `out`.
#[inline]
pub fn push_code_unit<E: Extend<u8>>(out: &mut E, unit: u16) {
    let (bytes, len) = encode_code_unit(unit);
    out.extend(bytes.into_iter().take(len));
}

/// Split a 4-byte UTF-8 sequence into its surrogate pair.
///
/// Only the low bits of each byte are read, so a truncated or malformed
/// sequence still yields a value instead of failing; the scanner has
/// already checked the lead byte.
#[allow(
    clippy::cast_possible_truncation,
    reason = "surrogate halves are at most 0xDFFF"
)]
pub fn surrogate_pair(bytes: [u8; 4]) -> (u16, u16) {
    let code_point = (u32::from(bytes[0] & 0x07) << 18)
        | (u32::from(bytes[1] & 0x3F) << 12)
        | (u32::from(bytes[2] & 0x3F) << 6)
        | u32::from(bytes[3] & 0x3F);
    let offset = code_point.saturating_sub(0x1_0000);
    (
        0xD800 | (offset >> 10) as u16,
        0xDC00 | (offset & 0x3FF) as u16,
    )
}
