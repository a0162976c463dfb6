//! Low-level building blocks for the quill lexer.
//!
//! This crate knows nothing about tokens. It provides:
//!
//! - [`SourceCursor`]: a `Copy` cursor over source bytes that tracks
//!   1-based line and column, tab stops included.
//! - [`char_class`]: byte predicates for identifiers, digits, UTF-8
//!   continuation bytes, and the few multi-byte whitespace and line
//!   terminator sequences the grammar cares about.
//! - [`cesu8`]: encoding of 16-bit code units into the engine's internal
//!   string form, including surrogate splitting of astral code points.
//!
//! No `quill_*` dependencies, so editor tooling can use it directly.

pub mod cesu8;
pub mod char_class;
mod cursor;

pub use cursor::{align_column_to_tab, SourceCursor};
