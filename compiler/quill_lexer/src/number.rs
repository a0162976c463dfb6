//! Number literal scanning and conversion.

use quill_ir::limits::{MAX_IDENT_LENGTH, PUSH_NUMBER_BYTE_RANGE_END};
use quill_ir::{LitKind, LitLocation, NumberRadix, TokenExtra, TokenKind};
use quill_lexer_core::char_class::{
    hex_digit_value, is_decimal_digit, is_hex_digit, is_identifier_start, is_octal_digit,
};

use crate::{LexError, LexErrorKind, Lexer};

impl Lexer<'_> {
    /// Scan a number literal at the cursor (a digit, or `.` before a
    /// digit).
    pub(crate) fn parse_number(&mut self) -> Result<(), LexError> {
        let start = self.cursor.pos();
        let mut cur = self.cursor;
        let mut radix = NumberRadix::Decimal;
        let mut can_be_float = false;

        match (cur.current(), cur.peek()) {
            (Some(b'0'), Some(b'x' | b'X')) => {
                radix = NumberRadix::Hex;
                cur.advance(2);
                if cur.eat_while(is_hex_digit) == 0 {
                    return Err(self.error_until(LexErrorKind::InvalidHexDigit, &cur));
                }
            }
            (Some(b'0'), Some(b'0'..=b'7')) => {
                radix = NumberRadix::Octal;
                if self.is_strict() {
                    return Err(self.error(LexErrorKind::OctalNumberNotAllowed));
                }
                cur.eat_while(is_octal_digit);
                if matches!(cur.current(), Some(b'8' | b'9')) {
                    return Err(self.error(LexErrorKind::InvalidNumber));
                }
            }
            (Some(b'0'), Some(b'8' | b'9')) => {
                return Err(self.error(LexErrorKind::InvalidNumber));
            }
            (Some(b'0'), _) => {
                can_be_float = true;
                cur.advance(1);
            }
            _ => {
                can_be_float = true;
                cur.eat_while(is_decimal_digit);
            }
        }

        if can_be_float {
            if cur.current() == Some(b'.') {
                cur.advance(1);
                cur.eat_while(is_decimal_digit);
            }
            if matches!(cur.current(), Some(b'e' | b'E')) {
                cur.advance(1);
                if matches!(cur.current(), Some(b'+' | b'-')) {
                    cur.advance(1);
                }
                if cur.eat_while(is_decimal_digit) == 0 {
                    return Err(self.error_until(LexErrorKind::MissingExponent, &cur));
                }
            }
        }

        let rest = cur.rest();
        if rest.first() == Some(&b'\\') || is_identifier_start(rest) {
            return Err(self.error_until(LexErrorKind::IdentifierAfterNumber, &cur));
        }

        let length = cur.pos() - start;
        if length > MAX_IDENT_LENGTH {
            return Err(self.error_until(LexErrorKind::NumberTooLong, &cur));
        }
        let length =
            u16::try_from(length).map_err(|_| self.error(LexErrorKind::NumberTooLong))?;

        self.token.lit_location = Some(LitLocation {
            start,
            length,
            kind: LitKind::Number,
            has_escape: false,
        });
        self.token.extra = TokenExtra::Number(radix);
        self.finish_token(TokenKind::Literal, cur);
        Ok(())
    }
}

/// Value of a scanned number literal.
///
/// `text` must be a literal the scanner accepted with this `radix`.
pub fn parse_number_value(text: &[u8], radix: NumberRadix) -> f64 {
    match radix {
        NumberRadix::Hex => fold_digits(text.get(2..).unwrap_or_default(), 16.0),
        NumberRadix::Octal => fold_digits(text, 8.0),
        NumberRadix::Decimal => std::str::from_utf8(text)
            .ok()
            .and_then(|s| s.parse::<f64>().ok())
            .unwrap_or(f64::NAN),
    }
}

fn fold_digits(digits: &[u8], base: f64) -> f64 {
    digits
        .iter()
        .filter_map(|&b| hex_digit_value(b))
        .fold(0.0, |acc, digit| acc * base + f64::from(digit))
}

/// Value of an integer literal small enough to be pushed as an immediate.
///
/// Fractions and exponents never qualify.
pub(crate) fn small_integer(text: &[u8], radix: NumberRadix) -> Option<u16> {
    let (digits, base) = match radix {
        NumberRadix::Hex => (text.get(2..)?, 16),
        NumberRadix::Octal => (text, 8),
        NumberRadix::Decimal => (text, 10),
    };
    digits.iter().try_fold(0u16, |acc, &b| {
        let digit = hex_digit_value(b).filter(|&d| d < base)?;
        let value = acc * base + digit;
        (value <= PUSH_NUMBER_BYTE_RANGE_END).then_some(value)
    })
}
