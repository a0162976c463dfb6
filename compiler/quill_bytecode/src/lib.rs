//! Compact bytecode model for quill.
//!
//! - [`Opcode`], [`ExtOpcode`]: the closed opcode tables with their
//!   argument shapes and stack effects
//! - [`LiteralEncoding`]: how literal indices are written
//! - [`StackTracker`]: peak stack depth accounting
//! - [`Emitter`]: byte code writer with a one-instruction peephole window

mod emitter;
mod encoding;
mod opcode;
mod stack;

pub use emitter::{try_merge_literal, EmitError, Emitter, ForwardBranch, Instruction};
pub use encoding::{
    LiteralEncoding, MAXIMUM_BYTE_VALUE, MAXIMUM_FULL_VALUE, MAXIMUM_SMALL_VALUE,
};
pub use opcode::{ExtOpcode, Op, Opcode, OpcodeFlags, OpcodeInfo, ARG_TYPES};
pub use stack::StackTracker;
