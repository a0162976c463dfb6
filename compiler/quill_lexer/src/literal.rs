//! Turning tokens into literal pool entries.

use quill_ir::limits::PUSH_NUMBER_BYTE_RANGE_END;
use quill_ir::{
    CharKind, CompileFlags, CompiledCode, LitKind, LitLocation, LiteralFlags, LiteralIndex,
    NumberRadix, TokenExtra,
};

use crate::escape::decode_literal;
use crate::number::{parse_number_value, small_integer};
use crate::{LexError, LexErrorKind, Lexer};

/// Identities the compiler treats specially.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum LiteralObjectKind {
    Any,
    /// The literal spells `eval`.
    Eval,
    /// The literal spells `arguments`.
    Arguments,
}

/// The result of constructing a literal.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct LiteralObject {
    pub index: LiteralIndex,
    pub kind: LiteralObjectKind,
}

/// A number ready for emission.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum NumberObject {
    /// Small integer pushed as an immediate; no pool entry exists.
    Small(u16),
    /// A pool entry.
    Literal(LiteralIndex),
}

/// The statement parser, as seen from the lexer.
///
/// [`Lexer::construct_function_object`] calls back into it to compile a
/// nested function body from the current position.
pub trait FunctionParser<'src> {
    fn parse_function(
        &mut self,
        lexer: &mut Lexer<'src>,
        flags: CompileFlags,
    ) -> Result<CompiledCode, LexError>;

    fn parse_arrow_function(
        &mut self,
        lexer: &mut Lexer<'src>,
        flags: CompileFlags,
    ) -> Result<CompiledCode, LexError>;
}

impl<'src> Lexer<'src> {
    /// Intern the identifier or string at `location` as a `kind` entry.
    ///
    /// Escape-free text is stored as a borrow of the source; anything else
    /// is decoded first. Recognizes `eval` and `arguments`, and updates the
    /// unit's flags when `arguments` is referenced as an identifier.
    pub fn construct_literal_object(
        &mut self,
        location: &LitLocation,
        kind: CharKind,
    ) -> Result<LiteralObject, LexError> {
        debug_assert!(matches!(location.kind, LitKind::Ident | LitKind::String));

        let source = self.cursor.source();
        let length = usize::from(location.length);
        let raw = source
            .get(location.start..location.start + length)
            .unwrap_or_default();

        let decoded;
        let (interned, chars) = if location.has_escape && length > 0 {
            decoded = decode_literal(source, location);
            (self.pool.intern_decoded(kind, &decoded), &decoded[..])
        } else {
            (self.pool.intern_source(kind, raw), raw)
        };
        let index = interned.map_err(|err| self.pool_error(err))?;

        if kind == CharKind::Ident && self.flags.contains(CompileFlags::INSIDE_WITH) {
            self.pool.add_flags(index, LiteralFlags::NO_REG_STORE);
        }

        let object_kind = match chars {
            b"eval" => LiteralObjectKind::Eval,
            b"arguments" => {
                if kind == CharKind::Ident
                    && !self.flags.contains(CompileFlags::ARGUMENTS_NOT_NEEDED)
                {
                    self.flags |= CompileFlags::ARGUMENTS_NEEDED | CompileFlags::LEXICAL_ENV_NEEDED;
                    self.pool.add_flags(index, LiteralFlags::NO_REG_STORE);
                }
                LiteralObjectKind::Arguments
            }
            _ => LiteralObjectKind::Any,
        };

        tracing::trace!(%index, ?kind, ?object_kind, "literal");
        let object = LiteralObject {
            index,
            kind: object_kind,
        };
        self.lit_object = Some(object);
        Ok(object)
    }

    /// Materialize the current number token.
    ///
    /// In an expression, integers up to 256 become immediates without a
    /// pool entry; `-0` never does. Everything else is appended to the pool.
    pub fn construct_number_object(
        &mut self,
        is_expr: bool,
        is_negative: bool,
    ) -> Result<NumberObject, LexError> {
        if is_expr {
            let (text, radix) = self.number_token()?;
            if let Some(value) = small_integer(text, radix) {
                if value <= PUSH_NUMBER_BYTE_RANGE_END && (value != 0 || !is_negative) {
                    return Ok(NumberObject::Small(value));
                }
            }
        }
        self.push_number_literal().map(NumberObject::Literal)
    }

    /// Append the current number token to the pool.
    pub(crate) fn push_number_literal(&mut self) -> Result<LiteralIndex, LexError> {
        let (text, radix) = self.number_token()?;
        let value = parse_number_value(text, radix);
        let length = self.token.lit_location.map_or(0, |loc| loc.length);
        let index = self
            .pool
            .push_number(value, length)
            .map_err(|err| self.pool_error(err))?;
        tracing::debug!(%index, value, "number literal");
        self.lit_object = Some(LiteralObject {
            index,
            kind: LiteralObjectKind::Any,
        });
        Ok(index)
    }

    /// Raw text and radix of the current number token.
    fn number_token(&self) -> Result<(&'src [u8], NumberRadix), LexError> {
        let location = self
            .token
            .lit_location
            .filter(|loc| loc.kind == LitKind::Number)
            .ok_or_else(|| self.error(LexErrorKind::InvalidNumber))?;
        let text = self
            .cursor
            .source()
            .get(location.start..location.start + usize::from(location.length))
            .unwrap_or_default();
        let radix = match self.token.extra {
            TokenExtra::Number(radix) => radix,
            TokenExtra::None | TokenExtra::Template(_) => NumberRadix::Decimal,
        };
        Ok((text, radix))
    }

    /// Compile a nested function through `parser` and store it in the
    /// pool.
    ///
    /// The slot is reserved before the body is parsed, so the function's
    /// index precedes every literal its body adds. Inside `with`, or when
    /// calls already resolve their base, the nested unit inherits
    /// [`CompileFlags::RESOLVE_BASE_FOR_CALLS`].
    #[tracing::instrument(level = "debug", skip_all, fields(flags = ?extra_flags))]
    pub fn construct_function_object<P>(
        &mut self,
        parser: &mut P,
        extra_flags: CompileFlags,
    ) -> Result<LiteralIndex, LexError>
    where
        P: FunctionParser<'src> + ?Sized,
    {
        self.pool
            .check_capacity()
            .map_err(|err| self.pool_error(err))?;

        let mut flags = extra_flags;
        if self
            .flags
            .intersects(CompileFlags::RESOLVE_BASE_FOR_CALLS | CompileFlags::INSIDE_WITH)
        {
            flags |= CompileFlags::RESOLVE_BASE_FOR_CALLS;
        }

        let index = self
            .pool
            .reserve_function()
            .map_err(|err| self.pool_error(err))?;

        let code = if flags.contains(CompileFlags::IS_ARROW_FUNCTION) {
            parser.parse_arrow_function(self, flags)?
        } else {
            parser.parse_function(self, flags)?
        };

        let stored = self.pool.set_function(index, code);
        debug_assert!(stored, "function slot {index} was overwritten");
        Ok(index)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
