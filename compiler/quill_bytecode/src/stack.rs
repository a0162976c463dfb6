//! Evaluation stack depth accounting.

use crate::{EmitError, Op};

/// Tracks the evaluation stack depth across emitted instructions and
/// remembers the peak, which becomes the compiled code's `stack_limit`.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct StackTracker {
    depth: u16,
    limit: u16,
}

impl StackTracker {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn depth(&self) -> u16 {
        self.depth
    }

    /// Peak depth seen so far.
    #[inline]
    pub fn limit(&self) -> u16 {
        self.limit
    }

    /// Apply the stack effect of `op`.
    ///
    /// For opcodes whose byte argument is a pop count (`CALL`, `NEW`,
    /// `ARRAY_APPEND`, ...), `byte_arg` is subtracted as well.
    pub fn apply(&mut self, op: Op, byte_arg: Option<u8>) -> Result<(), EmitError> {
        let mut delta = i32::from(op.stack_effect());
        if op.pops_byte_arg() {
            delta -= i32::from(byte_arg.unwrap_or(0));
        }
        self.adjust(delta, op)
    }

    /// Adjust the depth by an explicit amount, for context setup that the
    /// table does not describe.
    pub fn adjust(&mut self, delta: i32, op: Op) -> Result<(), EmitError> {
        let depth = i32::from(self.depth) + delta;
        let depth = u16::try_from(depth).map_err(|_| {
            if depth < 0 {
                EmitError::StackUnderflow { op }
            } else {
                EmitError::StackOverflow
            }
        })?;
        self.depth = depth;
        self.limit = self.limit.max(depth);
        Ok(())
    }
}
