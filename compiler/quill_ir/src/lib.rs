//! Shared types for the quill front end.
//!
//! - [`Token`] and [`TokenKind`]: the lexer's output
//! - [`LiteralPool`]: per-unit table of identifiers, strings, numbers,
//!   functions, and regexps
//! - [`CompileFlags`]: per-unit compile context
//! - [`CompiledCode`]: a finished function body

/// Compile-time assertion that a type has a specific size.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod compiled;
mod context;
pub mod limits;
mod literal;
mod position;
mod token;

pub use compiled::{CodeFlags, CompiledCode};
pub use context::CompileFlags;
pub use literal::{
    CharKind, Literal, LiteralFlags, LiteralIndex, LiteralKind, LiteralPool, LiteralValue,
    PoolError, RegexpFlags,
};
pub use position::{Position, Span};
pub use token::{
    LitKind, LitLocation, NumberRadix, TemplateEnd, Token, TokenExtra, TokenFlags, TokenKind,
};

// Tokens are copied around on every lookahead; keep them small.
#[cfg(target_pointer_width = "64")]
const _: () = assert!(std::mem::size_of::<Token>() <= 64);
static_assert_size!(LiteralIndex, 2);
static_assert_size!(TokenFlags, 1);
