//! Escape decoding for identifier and string literals.
//!
//! Scanning already validated the text and measured its decoded length,
//! so decoding never fails: it walks the raw source from the literal's
//! start and stops once `length` bytes have been produced.
//!
//! Output is CESU-8: `\x`, `\u`, and octal escapes become one code unit,
//! and a 4-byte UTF-8 character becomes a surrogate pair.

use quill_ir::{LitKind, LitLocation};
use quill_lexer_core::cesu8::{push_code_unit, surrogate_pair};
use quill_lexer_core::char_class::{
    hex_to_code_unit, is_octal_digit, line_terminator_len, UTF8_4BYTE_START,
};
use smallvec::SmallVec;

/// Decoded literals up to this many bytes stay on the stack.
pub const LOCAL_BUFFER_SIZE: usize = 48;

/// Buffer holding one decoded literal.
pub type DecodeBuffer = SmallVec<[u8; LOCAL_BUFFER_SIZE]>;

/// Control byte for a single-letter escape (`\n`, `\t`, ...).
pub(crate) fn named_escape(letter: u8) -> Option<u8> {
    match letter {
        b'b' => Some(0x08),
        b't' => Some(0x09),
        b'n' => Some(0x0A),
        b'v' => Some(0x0B),
        b'f' => Some(0x0C),
        b'r' => Some(0x0D),
        _ => None,
    }
}

/// Legacy octal escape starting at its first digit.
///
/// `\0`-`\3` take up to three digits, `\4`-`\7` up to two. Returns the
/// value and the number of digits consumed, or `None` if `digits` does not
/// start with an octal digit.
pub(crate) fn octal_escape(digits: &[u8]) -> Option<(u16, usize)> {
    let first = *digits.first()?;
    if !is_octal_digit(first) {
        return None;
    }
    let max_digits = if first <= b'3' { 3 } else { 2 };
    let (value, count) = digits
        .iter()
        .take(max_digits)
        .take_while(|&&b| is_octal_digit(b))
        .fold((0u16, 0usize), |(value, count), &b| {
            (value * 8 + u16::from(b - b'0'), count + 1)
        });
    Some((value, count))
}

/// Code unit of the `\xHH` or `\uHHHH` escape whose letter starts `bytes`.
///
/// Returns the unit and the escape length after the backslash.
pub(crate) fn hex_escape(bytes: &[u8]) -> Option<(u16, usize)> {
    let digits = match bytes.first()? {
        b'x' => 2,
        b'u' => 4,
        _ => return None,
    };
    let unit = hex_to_code_unit(bytes.get(1..=digits)?)?;
    Some((unit, digits + 1))
}

/// Code unit of the `\uHHHH` escape at the start of `bytes`.
pub(crate) fn unicode_escape(bytes: &[u8]) -> Option<u16> {
    match bytes {
        [b'\\', b'u', digits @ ..] => hex_to_code_unit(digits.get(..4)?),
        _ => None,
    }
}

/// Decode the literal at `location` into its stored form.
///
/// Identifiers only ever contain `\uHHHH` escapes; strings and template
/// segments handle the full escape set.
pub fn decode_literal(source: &[u8], location: &LitLocation) -> DecodeBuffer {
    let length = usize::from(location.length);
    let mut out = DecodeBuffer::with_capacity(length);
    let raw = source.get(location.start..).unwrap_or_default();
    match location.kind {
        LitKind::Ident => decode_identifier(raw, length, &mut out),
        LitKind::String | LitKind::Number | LitKind::Regexp => decode_string(raw, length, &mut out),
    }
    out
}

fn decode_identifier(raw: &[u8], length: usize, out: &mut DecodeBuffer) {
    let mut i = 0;
    while out.len() < length {
        let Some(rest) = raw.get(i..).filter(|rest| !rest.is_empty()) else {
            break;
        };
        if let Some(unit) = unicode_escape(rest) {
            push_code_unit(out, unit);
            i += 6;
        } else {
            out.push(rest[0]);
            i += 1;
        }
    }
}

fn decode_string(raw: &[u8], length: usize, out: &mut DecodeBuffer) {
    let mut i = 0;
    while out.len() < length {
        let Some(&byte) = raw.get(i) else {
            break;
        };

        if byte == b'\\' {
            i += 1;
            let rest = raw.get(i..).unwrap_or_default();
            if let Some(len) = line_terminator_len(rest) {
                i += len;
                continue;
            }
            if let Some((unit, len)) = octal_escape(rest).or_else(|| hex_escape(rest)) {
                push_code_unit(out, unit);
                i += len;
                continue;
            }
            if let Some(control) = rest.first().copied().and_then(named_escape) {
                out.push(control);
                i += 1;
                continue;
            }
            // Any other escaped character stands for itself.
        }

        let Some(&byte) = raw.get(i) else {
            break;
        };
        if byte >= UTF8_4BYTE_START {
            let mut quad = [0u8; 4];
            for (slot, &b) in quad.iter_mut().zip(raw.iter().skip(i)) {
                *slot = b;
            }
            let (high, low) = surrogate_pair(quad);
            push_code_unit(out, high);
            push_code_unit(out, low);
            i += 4;
            continue;
        }
        out.push(byte);
        i += 1;
    }
}
