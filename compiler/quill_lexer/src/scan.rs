//! The main token scanner.

use quill_ir::{TokenFlags, TokenKind};

use crate::{LexError, LexErrorKind, Lexer};

impl Lexer<'_> {
    /// Scan the next token into the current token slot.
    ///
    /// At end of input the token is [`TokenKind::EndOfStream`], and stays
    /// so on every further call.
    pub fn next_token(&mut self) -> Result<(), LexError> {
        if self.pending_substitution {
            self.pending_substitution = false;
            self.token.flags = TokenFlags::EMPTY;
            self.begin_token();
            let mut cur = self.cursor;
            cur.advance(2);
            self.templates.push(0);
            self.finish_token(TokenKind::TemplateSubstitution, cur);
            return Ok(());
        }

        self.skip_spaces()?;
        self.begin_token();

        let rest = self.cursor.rest();
        let Some(&first) = rest.first() else {
            return Ok(());
        };

        if self.at_identifier_start() {
            return self.parse_identifier(true);
        }

        match first {
            b'0'..=b'9' => return self.parse_number(),
            b'.' if rest.get(1).is_some_and(u8::is_ascii_digit) => return self.parse_number(),
            b'"' | b'\'' | b'`' => return self.parse_string(),
            b'}' if self.templates.last() == Some(&0) => {
                self.templates.pop();
                return self.parse_string();
            }
            _ => {}
        }

        let Some((kind, len)) = punctuator(rest) else {
            let mut end = self.cursor;
            end.advance_char();
            return Err(self.error_until(LexErrorKind::InvalidCharacter, &end));
        };

        if let Some(depth) = self.templates.last_mut() {
            match kind {
                TokenKind::LeftBrace => *depth += 1,
                TokenKind::RightBrace => *depth = depth.saturating_sub(1),
                _ => {}
            }
        }

        let mut cur = self.cursor;
        cur.advance(len);
        self.finish_token(kind, cur);
        Ok(())
    }
}

/// Longest punctuator at the start of `rest`, with its length.
fn punctuator(rest: &[u8]) -> Option<(TokenKind, usize)> {
    use TokenKind as T;

    Some(match rest {
        [b'>', b'>', b'>', b'=', ..] => (T::AssignUnsRightShift, 4),

        [b'.', b'.', b'.', ..] => (T::ThreeDots, 3),
        [b'=', b'=', b'=', ..] => (T::StrictEqual, 3),
        [b'!', b'=', b'=', ..] => (T::StrictNotEqual, 3),
        [b'<', b'<', b'=', ..] => (T::AssignLeftShift, 3),
        [b'>', b'>', b'=', ..] => (T::AssignRightShift, 3),
        [b'>', b'>', b'>', ..] => (T::UnsRightShift, 3),

        [b'=', b'>', ..] => (T::Arrow, 2),
        [b'=', b'=', ..] => (T::Equal, 2),
        [b'!', b'=', ..] => (T::NotEqual, 2),
        [b'<', b'=', ..] => (T::LessEqual, 2),
        [b'>', b'=', ..] => (T::GreaterEqual, 2),
        [b'<', b'<', ..] => (T::LeftShift, 2),
        [b'>', b'>', ..] => (T::RightShift, 2),
        [b'+', b'+', ..] => (T::Increase, 2),
        [b'-', b'-', ..] => (T::Decrease, 2),
        [b'&', b'&', ..] => (T::LogicalAnd, 2),
        [b'|', b'|', ..] => (T::LogicalOr, 2),
        [b'+', b'=', ..] => (T::AssignAdd, 2),
        [b'-', b'=', ..] => (T::AssignSubtract, 2),
        [b'*', b'=', ..] => (T::AssignMultiply, 2),
        [b'/', b'=', ..] => (T::AssignDivide, 2),
        [b'%', b'=', ..] => (T::AssignModulo, 2),
        [b'&', b'=', ..] => (T::AssignBitAnd, 2),
        [b'|', b'=', ..] => (T::AssignBitOr, 2),
        [b'^', b'=', ..] => (T::AssignBitXor, 2),

        [b'{', ..] => (T::LeftBrace, 1),
        [b'(', ..] => (T::LeftParen, 1),
        [b'[', ..] => (T::LeftSquare, 1),
        [b'}', ..] => (T::RightBrace, 1),
        [b')', ..] => (T::RightParen, 1),
        [b']', ..] => (T::RightSquare, 1),
        [b'.', ..] => (T::Dot, 1),
        [b';', ..] => (T::Semicolon, 1),
        [b',', ..] => (T::Comma, 1),
        [b':', ..] => (T::Colon, 1),
        [b'?', ..] => (T::QuestionMark, 1),
        [b'<', ..] => (T::Less, 1),
        [b'>', ..] => (T::Greater, 1),
        [b'=', ..] => (T::Assign, 1),
        [b'!', ..] => (T::LogicalNot, 1),
        [b'+', ..] => (T::Add, 1),
        [b'-', ..] => (T::Subtract, 1),
        [b'*', ..] => (T::Multiply, 1),
        [b'/', ..] => (T::Divide, 1),
        [b'%', ..] => (T::Modulo, 1),
        [b'&', ..] => (T::BitAnd, 1),
        [b'|', ..] => (T::BitOr, 1),
        [b'^', ..] => (T::BitXor, 1),
        [b'~', ..] => (T::BitNot, 1),

        _ => return None,
    })
}
