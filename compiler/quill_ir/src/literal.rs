//! Per-unit literal pool.
//!
//! Append-only table of every identifier, string, number, function, and
//! regexp a compilation unit references. Indices are handed out in append
//! order and never change, because already-emitted instructions refer to
//! them. Identifier and string entries are deduplicated by decoded content;
//! numbers synthesized from small immediates are deduplicated by value.
//!
//! Entries without escapes borrow straight from the source
//! ([`LiteralFlags::SOURCE_PTR`]); decoded entries own their bytes.

use std::borrow::Cow;
use std::fmt;

use bitflags::bitflags;
use rustc_hash::FxHashMap;

use crate::limits::MAX_LITERALS;
use crate::CompiledCode;

bitflags! {
    /// Status of a pool entry.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct LiteralFlags: u8 {
        /// The identifier must not be kept in a register.
        const NO_REG_STORE = 1 << 0;
        /// The identifier has not been referenced yet.
        const UNUSED_IDENT = 1 << 1;
        /// The bytes borrow from the source buffer.
        const SOURCE_PTR = 1 << 2;
    }
}

bitflags! {
    /// Regular expression flags, in source bit order.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct RegexpFlags: u8 {
        const GLOBAL = 1 << 0;
        const IGNORE_CASE = 1 << 1;
        const MULTILINE = 1 << 2;
    }
}

impl RegexpFlags {
    /// Flag for a single flag letter.
    pub fn from_letter(letter: u8) -> Option<Self> {
        match letter {
            b'g' => Some(RegexpFlags::GLOBAL),
            b'i' => Some(RegexpFlags::IGNORE_CASE),
            b'm' => Some(RegexpFlags::MULTILINE),
            _ => None,
        }
    }
}

/// Index of an entry in a [`LiteralPool`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub struct LiteralIndex(u16);

impl LiteralIndex {
    #[inline]
    pub const fn new(index: u16) -> Self {
        LiteralIndex(index)
    }

    #[inline]
    pub const fn raw(self) -> u16 {
        self.0
    }

    #[inline]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for LiteralIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kind of a pool entry.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum LiteralKind {
    /// A reserved slot whose value is not known yet.
    Unused,
    Ident,
    String,
    Number,
    Function,
    Regexp,
}

/// Value of a pool entry.
#[derive(Clone, PartialEq, Debug)]
pub enum LiteralValue<'src> {
    Unused,
    Ident(Cow<'src, [u8]>),
    String(Cow<'src, [u8]>),
    /// A number literal from source, with its raw length.
    Number { value: f64, length: u16 },
    /// A number created from a push-number immediate; has no source text.
    SmallInt(i32),
    Function(Box<CompiledCode>),
    Regexp {
        pattern: &'src [u8],
        flags: RegexpFlags,
    },
}

/// One pool entry.
#[derive(Clone, PartialEq, Debug)]
pub struct Literal<'src> {
    pub flags: LiteralFlags,
    pub value: LiteralValue<'src>,
}

impl<'src> Literal<'src> {
    pub fn kind(&self) -> LiteralKind {
        match self.value {
            LiteralValue::Unused => LiteralKind::Unused,
            LiteralValue::Ident(_) => LiteralKind::Ident,
            LiteralValue::String(_) => LiteralKind::String,
            LiteralValue::Number { .. } | LiteralValue::SmallInt(_) => LiteralKind::Number,
            LiteralValue::Function(_) => LiteralKind::Function,
            LiteralValue::Regexp { .. } => LiteralKind::Regexp,
        }
    }

    /// Character data of identifier and string entries.
    pub fn chars(&self) -> Option<&[u8]> {
        match &self.value {
            LiteralValue::Ident(bytes) | LiteralValue::String(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Stored length: decoded bytes for characters, raw length for source
    /// numbers, zero for numbers without source text.
    pub fn length(&self) -> usize {
        match &self.value {
            LiteralValue::Ident(bytes) | LiteralValue::String(bytes) => bytes.len(),
            LiteralValue::Number { length, .. } => usize::from(*length),
            LiteralValue::Regexp { pattern, .. } => pattern.len(),
            LiteralValue::Unused | LiteralValue::SmallInt(_) | LiteralValue::Function(_) => 0,
        }
    }
}

/// Character literal kinds accepted by [`LiteralPool::intern_source`] and
/// [`LiteralPool::intern_decoded`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum CharKind {
    Ident,
    String,
}

/// Why an entry could not be added.
#[derive(Copy, Clone, Eq, PartialEq, Debug, thiserror::Error)]
pub enum PoolError {
    #[error("maximum number of literals reached")]
    LimitReached,
    #[error("out of memory while growing the literal pool")]
    OutOfMemory,
}

/// The literal pool of one compilation unit.
#[derive(Clone, Debug)]
pub struct LiteralPool<'src> {
    literals: Vec<Literal<'src>>,
    /// Push-number sentinels by value.
    small_ints: FxHashMap<i32, LiteralIndex>,
    limit: usize,
}

impl Default for LiteralPool<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'src> LiteralPool<'src> {
    pub fn new() -> Self {
        Self::with_limit(MAX_LITERALS)
    }

    /// A pool that refuses to grow past `limit` entries.
    ///
    /// `limit` is clamped to [`MAX_LITERALS`].
    pub fn with_limit(limit: usize) -> Self {
        LiteralPool {
            literals: Vec::new(),
            small_ints: FxHashMap::default(),
            limit: limit.min(MAX_LITERALS),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    #[inline]
    pub fn get(&self, index: LiteralIndex) -> Option<&Literal<'src>> {
        self.literals.get(index.as_usize())
    }

    /// All entries with their indices, in append order.
    pub fn iter(&self) -> impl Iterator<Item = (LiteralIndex, &Literal<'src>)> {
        // Indices fit u16: `limit` never exceeds MAX_LITERALS.
        self.literals
            .iter()
            .zip(0u16..)
            .map(|(literal, i)| (LiteralIndex(i), literal))
    }

    /// Add `flags` to an entry. Unknown indices are ignored.
    pub fn add_flags(&mut self, index: LiteralIndex, flags: LiteralFlags) {
        if let Some(literal) = self.literals.get_mut(index.as_usize()) {
            literal.flags |= flags;
        }
    }

    /// Mark an identifier as not yet referenced.
    pub fn mark_unused(&mut self, index: LiteralIndex) {
        self.add_flags(index, LiteralFlags::UNUSED_IDENT);
    }

    /// Find an identifier or string entry with exactly these decoded bytes.
    ///
    /// Linear in the pool size.
    pub fn find_chars(&self, kind: CharKind, bytes: &[u8]) -> Option<LiteralIndex> {
        self.iter()
            .find(|(_, literal)| match (&literal.value, kind) {
                (LiteralValue::Ident(stored), CharKind::Ident)
                | (LiteralValue::String(stored), CharKind::String) => stored.as_ref() == bytes,
                _ => false,
            })
            .map(|(index, _)| index)
    }

    /// Intern escape-free characters borrowed from the source.
    pub fn intern_source(
        &mut self,
        kind: CharKind,
        bytes: &'src [u8],
    ) -> Result<LiteralIndex, PoolError> {
        self.intern_chars(kind, bytes, |b| Cow::Borrowed(b))
    }

    /// Intern decoded characters; a new entry copies them.
    pub fn intern_decoded(
        &mut self,
        kind: CharKind,
        bytes: &[u8],
    ) -> Result<LiteralIndex, PoolError> {
        self.intern_chars(kind, bytes, |b| Cow::Owned(b.to_vec()))
    }

    fn intern_chars<'b>(
        &mut self,
        kind: CharKind,
        bytes: &'b [u8],
        store: impl FnOnce(&'b [u8]) -> Cow<'src, [u8]>,
    ) -> Result<LiteralIndex, PoolError> {
        if let Some(index) = self.find_chars(kind, bytes) {
            if let Some(literal) = self.literals.get_mut(index.as_usize()) {
                literal.flags.remove(LiteralFlags::UNUSED_IDENT);
            }
            return Ok(index);
        }

        let stored = store(bytes);
        let flags = match stored {
            Cow::Borrowed(_) => LiteralFlags::SOURCE_PTR,
            Cow::Owned(_) if bytes.is_empty() => LiteralFlags::SOURCE_PTR,
            Cow::Owned(_) => LiteralFlags::empty(),
        };
        let value = match kind {
            CharKind::Ident => LiteralValue::Ident(stored),
            CharKind::String => LiteralValue::String(stored),
        };
        self.push(Literal { flags, value })
    }

    /// Append a number literal scanned from source. Never deduplicated.
    pub fn push_number(&mut self, value: f64, length: u16) -> Result<LiteralIndex, PoolError> {
        self.push(Literal {
            flags: LiteralFlags::empty(),
            value: LiteralValue::Number { value, length },
        })
    }

    /// Find or create the zero-length number entry for a push-number value.
    pub fn intern_small_int(&mut self, value: i32) -> Result<LiteralIndex, PoolError> {
        if let Some(&index) = self.small_ints.get(&value) {
            return Ok(index);
        }
        let index = self.push(Literal {
            flags: LiteralFlags::empty(),
            value: LiteralValue::SmallInt(value),
        })?;
        self.small_ints.insert(value, index);
        Ok(index)
    }

    /// Reserve a slot for a function whose body is compiled later.
    ///
    /// The slot's index is final; [`set_function`](Self::set_function)
    /// fills it in.
    pub fn reserve_function(&mut self) -> Result<LiteralIndex, PoolError> {
        self.push(Literal {
            flags: LiteralFlags::empty(),
            value: LiteralValue::Unused,
        })
    }

    /// Fill a slot obtained from [`reserve_function`](Self::reserve_function).
    ///
    /// Returns `false` if the index does not name an unused slot.
    pub fn set_function(&mut self, index: LiteralIndex, code: CompiledCode) -> bool {
        match self.literals.get_mut(index.as_usize()) {
            Some(literal) if literal.kind() == LiteralKind::Unused => {
                literal.value = LiteralValue::Function(Box::new(code));
                true
            }
            _ => false,
        }
    }

    /// Append a regular expression. Never deduplicated.
    pub fn push_regexp(
        &mut self,
        pattern: &'src [u8],
        flags: RegexpFlags,
    ) -> Result<LiteralIndex, PoolError> {
        self.push(Literal {
            flags: LiteralFlags::empty(),
            value: LiteralValue::Regexp { pattern, flags },
        })
    }

    /// Fails with [`PoolError::LimitReached`] when no index is left.
    pub fn check_capacity(&self) -> Result<(), PoolError> {
        if self.literals.len() >= self.limit {
            Err(PoolError::LimitReached)
        } else {
            Ok(())
        }
    }

    fn push(&mut self, literal: Literal<'src>) -> Result<LiteralIndex, PoolError> {
        self.check_capacity()?;
        let index = u16::try_from(self.literals.len()).map_err(|_| PoolError::LimitReached)?;
        self.literals
            .try_reserve(1)
            .map_err(|_| PoolError::OutOfMemory)?;
        self.literals.push(literal);
        Ok(LiteralIndex(index))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
