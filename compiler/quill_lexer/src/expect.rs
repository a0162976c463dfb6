//! Scans for binding names and property keys.
//!
//! In these positions keywords are ordinary names (`a.if`, `{ class: 1 }`),
//! and a few contextual words change meaning: `get`/`set` before a
//! property name, and `static`/`constructor` in a class body.

use bitflags::bitflags;
use quill_ir::{CharKind, LitKind, LitLocation, LiteralIndex, TokenKind};

use crate::literal::{LiteralObject, LiteralObjectKind};
use crate::{LexError, LexErrorKind, Lexer};

bitflags! {
    /// Options for [`Lexer::expect_object_literal_id`].
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct ObjectIdentOptions: u8 {
        /// Only a plain name is acceptable: no accessors, no `}`.
        const ONLY_IDENTIFIERS = 1 << 0;
        /// Scanning a class body member.
        const CLASS_METHOD = 1 << 1;
    }
}

/// What [`Lexer::expect_object_literal_id`] found.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum PropertyKey {
    /// `get` introducing an accessor.
    Getter,
    /// `set` introducing an accessor.
    Setter,
    /// `static` before a class member.
    Static,
    /// A class member named `constructor`.
    Constructor,
    /// The `}` closing the literal.
    RightBrace,
    /// `[`; the current token is the first token of the key expression.
    Computed,
    /// A name or string key, interned as a string.
    Name(LiteralObject),
    /// A numeric key.
    Number(LiteralIndex),
}

impl Lexer<'_> {
    /// The next token must be an identifier; intern it as `kind`.
    ///
    /// Keywords are not recognized when `kind` is [`CharKind::String`]. In
    /// strict mode, binding `eval` or `arguments` is an error.
    pub fn expect_identifier(&mut self, kind: CharKind) -> Result<LiteralObject, LexError> {
        self.skip_spaces()?;
        self.begin_token();

        if self.at_identifier_start() {
            self.parse_identifier(kind != CharKind::String)?;

            if let Some(location) = self.token.lit_location {
                let object = self.construct_literal_object(&location, kind)?;

                if kind == CharKind::Ident && self.is_strict() {
                    match object.kind {
                        LiteralObjectKind::Eval => {
                            return Err(self.error(LexErrorKind::EvalNotAllowed));
                        }
                        LiteralObjectKind::Arguments => {
                            return Err(self.error(LexErrorKind::ArgumentsNotAllowed));
                        }
                        LiteralObjectKind::Any => {}
                    }
                }

                let lit_kind = match kind {
                    CharKind::Ident => LitKind::Ident,
                    CharKind::String => LitKind::String,
                };
                self.token.lit_location = Some(LitLocation {
                    kind: lit_kind,
                    ..location
                });
                return Ok(object);
            }
        }

        Err(self.error(LexErrorKind::IdentifierExpected))
    }

    /// The next token is a property key of an object literal or class
    /// body.
    pub fn expect_object_literal_id(
        &mut self,
        options: ObjectIdentOptions,
    ) -> Result<PropertyKey, LexError> {
        self.skip_spaces()?;

        let only_identifiers = options.contains(ObjectIdentOptions::ONLY_IDENTIFIERS);
        let is_class_method = options.contains(ObjectIdentOptions::CLASS_METHOD)
            && !only_identifiers
            && self.token.kind != TokenKind::Static;

        self.begin_token();
        let rest = self.cursor.rest();

        if self.at_identifier_start() {
            self.parse_identifier(false)?;

            if !only_identifiers && self.token_length() == Some(3) {
                if let Some(accessor) = self.accessor_keyword()? {
                    return Ok(accessor);
                }
            }
            if is_class_method && self.compare_raw_identifier_to_current(b"static") {
                self.token.kind = TokenKind::Static;
                return Ok(PropertyKey::Static);
            }
            return self.property_name(is_class_method);
        }

        match rest.first() {
            Some(b'"' | b'\'') => {
                self.parse_string()?;
                return self.property_name(is_class_method);
            }
            Some(b'[') => {
                self.cursor.advance(1);
                self.next_token()?;
                return Ok(PropertyKey::Computed);
            }
            Some(b'}') if !only_identifiers => {
                if let Some(depth) = self.templates.last_mut() {
                    *depth = depth.saturating_sub(1);
                }
                let mut cur = self.cursor;
                cur.advance(1);
                self.finish_token(TokenKind::RightBrace, cur);
                return Ok(PropertyKey::RightBrace);
            }
            Some(_) => {
                let digits = rest.strip_prefix(b".").unwrap_or(rest);
                if digits.first().is_some_and(u8::is_ascii_digit) {
                    self.parse_number()?;
                    return self.push_number_literal().map(PropertyKey::Number);
                }
            }
            None => {}
        }

        Err(self.error(LexErrorKind::PropertyIdentifierExpected))
    }

    /// Scan a name after `.` or in a similar identifier-only position.
    ///
    /// With `property_name`, `get`/`set` followed by anything but `:` become
    /// accessor tokens, and a non-identifier token is accepted if it is a
    /// literal, `[`, or `}`.
    pub fn scan_identifier(&mut self, property_name: bool) -> Result<(), LexError> {
        self.skip_spaces()?;
        self.begin_token();

        if self.at_identifier_start() {
            self.parse_identifier(false)?;
            if property_name && self.token_length() == Some(3) {
                self.accessor_keyword()?;
            }
            return Ok(());
        }

        if property_name {
            // Spaces are already skipped; keep the newline flag.
            self.keep_skipped_spaces();
            self.next_token()?;
            if matches!(
                self.token.kind,
                TokenKind::Literal | TokenKind::LeftSquare | TokenKind::RightBrace
            ) {
                return Ok(());
            }
        }

        Err(self.error(LexErrorKind::IdentifierExpected))
    }

    /// Reclassify a just-scanned `get` or `set` unless a `:` follows.
    fn accessor_keyword(&mut self) -> Result<Option<PropertyKey>, LexError> {
        self.skip_spaces()?;
        self.keep_skipped_spaces();

        if matches!(self.cursor.current(), None | Some(b':')) {
            return Ok(None);
        }
        if self.compare_raw_identifier_to_current(b"get") {
            self.token.kind = TokenKind::PropertyGetter;
            return Ok(Some(PropertyKey::Getter));
        }
        if self.compare_raw_identifier_to_current(b"set") {
            self.token.kind = TokenKind::PropertySetter;
            return Ok(Some(PropertyKey::Setter));
        }
        Ok(None)
    }

    /// Intern the current name or string token as a string key.
    fn property_name(&mut self, is_class_method: bool) -> Result<PropertyKey, LexError> {
        if is_class_method && self.compare_raw_identifier_to_current(b"constructor") {
            self.token.kind = TokenKind::ClassConstructor;
            return Ok(PropertyKey::Constructor);
        }
        let location = self
            .token
            .lit_location
            .ok_or_else(|| self.error(LexErrorKind::PropertyIdentifierExpected))?;
        self.construct_literal_object(&location, CharKind::String)
            .map(PropertyKey::Name)
    }

    /// Decoded length of the current literal.
    fn token_length(&self) -> Option<u16> {
        self.token.lit_location.map(|loc| loc.length)
    }
}
