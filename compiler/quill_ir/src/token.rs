//! Tokens as seen by the parser.
//!
//! A [`Token`] is the lexer's single "current token" slot. Its literal
//! payload is a [`LitLocation`]: a byte offset into the source plus the
//! decoded length. The payload is only valid while the source is alive;
//! the literal pool turns it into a stable entry.

mod kind;

pub use kind::TokenKind;

use crate::{Position, Span};

/// Per-token flags packed into a single byte.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct TokenFlags(u8);

impl TokenFlags {
    /// A line terminator was skipped before this token.
    pub const WAS_NEWLINE: u8 = 1 << 0;
    /// Spaces were already skipped by a lookahead; the next scan must not
    /// skip again. One-shot.
    pub const NO_SKIP_SPACES: u8 = 1 << 1;

    /// Empty flags (no bits set).
    pub const EMPTY: Self = TokenFlags(0);

    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        TokenFlags(bits)
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn contains(self, flag: u8) -> bool {
        self.0 & flag != 0
    }

    #[inline]
    pub fn set(&mut self, flag: u8) {
        self.0 |= flag;
    }

    #[inline]
    pub fn clear(&mut self, flag: u8) {
        self.0 &= !flag;
    }

    #[inline]
    pub const fn was_newline(self) -> bool {
        self.contains(Self::WAS_NEWLINE)
    }
}

/// What kind of text a [`LitLocation`] points at.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum LitKind {
    Ident,
    String,
    Number,
    Regexp,
}

/// Where a literal's characters live in the source.
///
/// `length` is the *decoded* byte length: escapes shrink or grow it
/// relative to the raw text, and astral characters count as two 3-byte
/// code units. For numbers it is the raw length.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct LitLocation {
    /// Offset of the first character (after the opening quote for strings).
    pub start: usize,
    pub length: u16,
    pub kind: LitKind,
    pub has_escape: bool,
}

/// Radix of a number literal.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum NumberRadix {
    Decimal,
    Hex,
    Octal,
}

/// How a template literal segment ended.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TemplateEnd {
    /// At the closing backtick.
    Backtick,
    /// At a `${`; a [`TokenKind::TemplateSubstitution`] follows.
    Substitution,
}

/// Kind-specific extra data.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum TokenExtra {
    #[default]
    None,
    Number(NumberRadix),
    Template(TemplateEnd),
}

/// The current token.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Token {
    pub kind: TokenKind,
    /// Position of the first character.
    pub position: Position,
    pub span: Span,
    pub flags: TokenFlags,
    /// Set for literal, template, and regexp tokens.
    pub lit_location: Option<LitLocation>,
    pub extra: TokenExtra,
    /// A future strict reserved word scanned outside strict mode.
    pub literal_is_reserved: bool,
}

impl Token {
    /// The state before the first scan.
    pub const fn initial(position: Position) -> Self {
        Token {
            kind: TokenKind::EndOfStream,
            position,
            span: Span::new(0, 0),
            flags: TokenFlags::EMPTY,
            lit_location: None,
            extra: TokenExtra::None,
            literal_is_reserved: false,
        }
    }

    #[inline]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// Literal location, if this token is an identifier literal.
    pub fn ident_location(&self) -> Option<LitLocation> {
        self.lit_location
            .filter(|loc| self.kind == TokenKind::Literal && loc.kind == LitKind::Ident)
    }
}
