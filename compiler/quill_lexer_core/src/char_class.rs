//! Pure byte and code unit predicates.
//!
//! Everything here works on raw UTF-8 bytes. Multi-byte whitespace and
//! line terminators are recognized by their fixed byte sequences rather
//! than by decoding, since the scanner only ever needs to ask "is the
//! sequence starting here one of these few code points".

/// First byte of a 4-byte UTF-8 sequence (code points above U+FFFF).
///
/// Such code points need two UTF-16 code units, so they can never be a
/// single identifier character.
pub const UTF8_4BYTE_START: u8 = 0xF0;

/// First byte of U+2028 (LINE SEPARATOR) and U+2029 (PARAGRAPH SEPARATOR).
pub const LS_PS_LEAD: u8 = 0xE2;

/// Zero width non-joiner, allowed inside identifiers.
const ZWNJ: u16 = 0x200C;
/// Zero width joiner, allowed inside identifiers.
const ZWJ: u16 = 0x200D;

/// Returns `true` for UTF-8 continuation bytes (`10xxxxxx`).
#[inline]
pub const fn is_utf8_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

/// Number of bytes in the UTF-8 sequence introduced by `byte`.
///
/// Continuation and invalid bytes count as one so that callers always make
/// progress.
#[inline]
pub const fn utf8_char_width(byte: u8) -> usize {
    match byte {
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 1,
    }
}

#[inline]
pub const fn is_decimal_digit(byte: u8) -> bool {
    byte.is_ascii_digit()
}

#[inline]
pub const fn is_octal_digit(byte: u8) -> bool {
    matches!(byte, b'0'..=b'7')
}

#[inline]
pub const fn is_hex_digit(byte: u8) -> bool {
    byte.is_ascii_hexdigit()
}

/// Value of a single hexadecimal digit.
#[inline]
pub const fn hex_digit_value(byte: u8) -> Option<u16> {
    match byte {
        b'0'..=b'9' => Some((byte - b'0') as u16),
        b'a'..=b'f' => Some((byte - b'a' + 10) as u16),
        b'A'..=b'F' => Some((byte - b'A' + 10) as u16),
        _ => None,
    }
}

/// Decode exactly `digits.len()` hexadecimal digits into one code unit.
///
/// Returns `None` if any byte is not a hex digit. Callers pass 2 digits for
/// `\xHH` and 4 for `\uHHHH`.
pub fn hex_to_code_unit(digits: &[u8]) -> Option<u16> {
    digits
        .iter()
        .try_fold(0u16, |acc, &b| Some((acc << 4) | hex_digit_value(b)?))
}

#[inline]
pub const fn is_ascii_ident_start(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || byte == b'$' || byte == b'_'
}

#[inline]
pub const fn is_ascii_ident_part(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'$' || byte == b'_'
}

/// `E2 80 A8` or `E2 80 A9`.
#[inline]
pub fn is_ls_ps(bytes: &[u8]) -> bool {
    matches!(bytes, [LS_PS_LEAD, 0x80, 0xA8 | 0xA9, ..])
}

/// U+00A0 NO-BREAK SPACE, `C2 A0`.
#[inline]
pub fn is_nbsp(bytes: &[u8]) -> bool {
    matches!(bytes, [0xC2, 0xA0, ..])
}

/// U+FEFF BYTE ORDER MARK, `EF BB BF`.
#[inline]
pub fn is_bom(bytes: &[u8]) -> bool {
    matches!(bytes, [0xEF, 0xBB, 0xBF, ..])
}

/// Length of the line terminator at the start of `bytes`, if any.
///
/// CR LF is a single two-byte terminator.
#[inline]
pub fn line_terminator_len(bytes: &[u8]) -> Option<usize> {
    match bytes {
        [b'\r', b'\n', ..] => Some(2),
        [b'\n' | b'\r', ..] => Some(1),
        _ if is_ls_ps(bytes) => Some(3),
        _ => None,
    }
}

/// Decode the (at most 3-byte) UTF-8 character at the start of `bytes`.
fn leading_char(bytes: &[u8]) -> Option<char> {
    let width = utf8_char_width(*bytes.first()?);
    let head = bytes.get(..width)?;
    std::str::from_utf8(head).ok()?.chars().next()
}

/// Returns `true` if the sequence at the start of `bytes` can begin an
/// identifier. A backslash is *not* accepted here; escape handling is the
/// scanner's business.
pub fn is_identifier_start(bytes: &[u8]) -> bool {
    match bytes.first() {
        None => false,
        Some(&b) if b < 0x80 => is_ascii_ident_start(b),
        Some(&b) if b >= UTF8_4BYTE_START => false,
        Some(_) => leading_char(bytes).is_some_and(unicode_ident::is_xid_start),
    }
}

/// Returns `true` if the sequence at the start of `bytes` can continue an
/// identifier.
pub fn is_identifier_part(bytes: &[u8]) -> bool {
    match bytes.first() {
        None => false,
        Some(&b) if b < 0x80 => is_ascii_ident_part(b),
        Some(&b) if b >= UTF8_4BYTE_START => false,
        Some(_) => leading_char(bytes).is_some_and(|c| {
            unicode_ident::is_xid_continue(c) || c == '\u{200C}' || c == '\u{200D}'
        }),
    }
}

/// Identifier-start check for a code unit produced by a `\uHHHH` escape.
pub fn is_identifier_start_unit(unit: u16) -> bool {
    match char::from_u32(u32::from(unit)) {
        Some(c) => match u8::try_from(c) {
            Ok(b) if b.is_ascii() => is_ascii_ident_start(b),
            _ => unicode_ident::is_xid_start(c),
        },
        None => false,
    }
}

/// Identifier-part check for a code unit produced by a `\uHHHH` escape.
pub fn is_identifier_part_unit(unit: u16) -> bool {
    if unit == ZWNJ || unit == ZWJ {
        return true;
    }
    match char::from_u32(u32::from(unit)) {
        Some(c) => match u8::try_from(c) {
            Ok(b) if b.is_ascii() => is_ascii_ident_part(b),
            _ => unicode_ident::is_xid_continue(c),
        },
        None => false,
    }
}
