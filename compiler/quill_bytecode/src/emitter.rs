//! Byte code emitter with a one-instruction peephole window.
//!
//! The most recently emitted instruction is kept pending in
//! [`Emitter::last`] instead of being written immediately. While it is
//! pending it can still be merged with the next instruction (two literal
//! pushes become `PUSH_TWO_LITERALS`), turned into its result-pushing form,
//! or have a small-number push rewritten into a literal push. Anything that
//! needs the final byte layout flushes it first.

use quill_ir::limits::PUSH_NUMBER_BYTE_RANGE_END;
use quill_ir::{CodeFlags, CompiledCode, LiteralIndex, LiteralPool, PoolError};

use crate::encoding::LiteralEncoding;
use crate::{ExtOpcode, Op, OpcodeFlags, Opcode, StackTracker};

/// Largest offset a 3-byte branch can hold.
const MAX_BRANCH_OFFSET: usize = 0xFF_FFFF;

/// Why an instruction could not be emitted.
#[derive(Copy, Clone, Eq, PartialEq, Debug, thiserror::Error)]
pub enum EmitError {
    #[error("`{op}` pops more values than the stack holds")]
    StackUnderflow { op: Op },
    #[error("evaluation stack depth exceeds 65535")]
    StackOverflow,
    #[error("literal index {index} does not fit the {encoding:?} literal encoding")]
    LiteralOutOfRange {
        index: LiteralIndex,
        encoding: LiteralEncoding,
    },
    #[error("`{op}` is missing an operand")]
    MissingOperand { op: Op },
    #[error("`{op}` is not a branch opcode")]
    NotABranch { op: Op },
    #[error("branch offset {distance} does not fit in 3 bytes")]
    BranchTooFar { distance: usize },
    #[error("{value} cannot be pushed as a small number")]
    NumberOutOfRange { value: u16 },
    #[error("the pending instruction is not a small-number push")]
    NotAPushNumber,
    #[error(transparent)]
    Pool(#[from] PoolError),
}

/// One instruction with its operands.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Instruction {
    pub op: Op,
    pub literal: Option<LiteralIndex>,
    pub literal2: Option<LiteralIndex>,
    /// Only used by `PUSH_THREE_LITERALS`.
    pub literal3: Option<LiteralIndex>,
    pub byte: Option<u8>,
}

impl Instruction {
    pub fn new(op: impl Into<Op>) -> Self {
        Instruction {
            op: op.into(),
            literal: None,
            literal2: None,
            literal3: None,
            byte: None,
        }
    }

    #[must_use]
    pub fn with_literal(mut self, index: LiteralIndex) -> Self {
        self.literal = Some(index);
        self
    }

    #[must_use]
    pub fn with_literal2(mut self, index: LiteralIndex) -> Self {
        self.literal2 = Some(index);
        self
    }

    #[must_use]
    pub fn with_byte(mut self, byte: u8) -> Self {
        self.byte = Some(byte);
        self
    }

    /// Value pushed by a small-number push, including the forms folded
    /// after a literal push.
    pub fn pushed_number(&self) -> Option<i32> {
        let byte = || i32::from(self.byte.unwrap_or(0));
        match self.op {
            Op::Base(Opcode::PushNumber0) | Op::Ext(ExtOpcode::PushLiteralPushNumber0) => Some(0),
            Op::Base(Opcode::PushNumberPosByte)
            | Op::Ext(ExtOpcode::PushLiteralPushNumberPosByte) => Some(byte() + 1),
            Op::Base(Opcode::PushNumberNegByte)
            | Op::Ext(ExtOpcode::PushLiteralPushNumberNegByte) => Some(-byte() - 1),
            _ => None,
        }
    }

    fn check_operands(&self) -> Result<(), EmitError> {
        let flags = self.op.flags();
        let missing = (flags.contains(OpcodeFlags::HAS_LITERAL_ARG) && self.literal.is_none())
            || (flags.contains(OpcodeFlags::HAS_LITERAL_ARG2) && self.literal2.is_none())
            || (flags.contains(OpcodeFlags::HAS_BYTE_ARG) && self.byte.is_none())
            || (self.op == Op::Base(Opcode::PushThreeLiterals)
                && (self.literal.is_none() || self.literal3.is_none()));
        if missing {
            Err(EmitError::MissingOperand { op: self.op })
        } else {
            Ok(())
        }
    }
}

/// Merge a literal push into the pending instruction, if the pair has a
/// combined form.
///
/// `PUSH_LITERAL a` + `b` becomes `PUSH_TWO_LITERALS a b`,
/// `PUSH_TWO_LITERALS a b` + `c` becomes `PUSH_THREE_LITERALS a b c`, and
/// `PUSH_THIS` + `a` becomes `PUSH_THIS_LITERAL a`.
pub fn try_merge_literal(prev: &Instruction, literal: LiteralIndex) -> Option<Instruction> {
    match prev.op {
        Op::Base(Opcode::PushLiteral) => Some(Instruction {
            op: Op::Base(Opcode::PushTwoLiterals),
            literal2: Some(literal),
            ..*prev
        }),
        Op::Base(Opcode::PushTwoLiterals) => Some(Instruction {
            op: Op::Base(Opcode::PushThreeLiterals),
            literal3: Some(literal),
            ..*prev
        }),
        Op::Base(Opcode::PushThis) => {
            Some(Instruction::new(Opcode::PushThisLiteral).with_literal(literal))
        }
        _ => None,
    }
}

/// A forward branch whose offset is not known yet.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[must_use = "a forward branch must be patched"]
pub struct ForwardBranch {
    /// Offset of the branch opcode.
    at: usize,
    /// Offset of the first offset byte.
    operand: usize,
}

/// Writes byte code for one compilation unit.
#[derive(Clone, Debug, Default)]
pub struct Emitter {
    code: Vec<u8>,
    last: Option<Instruction>,
    stack: StackTracker,
    encoding: LiteralEncoding,
}

impl Emitter {
    pub fn new(encoding: LiteralEncoding) -> Self {
        Emitter {
            encoding,
            ..Self::default()
        }
    }

    /// The pending instruction.
    #[inline]
    pub fn last(&self) -> Option<&Instruction> {
        self.last.as_ref()
    }

    /// Bytes written so far, excluding the pending instruction.
    #[inline]
    pub fn code(&self) -> &[u8] {
        &self.code
    }

    #[inline]
    pub fn stack(&self) -> &StackTracker {
        &self.stack
    }

    /// Flush the pending instruction and make `instruction` pending.
    pub fn emit(&mut self, instruction: Instruction) -> Result<(), EmitError> {
        self.flush()?;
        self.last = Some(instruction);
        Ok(())
    }

    /// Push a literal, merging it into a pending literal push if possible.
    pub fn emit_push_literal(&mut self, index: LiteralIndex) -> Result<(), EmitError> {
        if let Some(merged) = self.last.as_ref().and_then(|last| try_merge_literal(last, index)) {
            tracing::trace!(op = %merged.op, "merged literal push");
            self.last = Some(merged);
            return Ok(());
        }
        self.emit(Instruction::new(Opcode::PushLiteral).with_literal(index))
    }

    /// Push a small integer `value` (negated if `negative`) as an immediate.
    ///
    /// `value` must be in `0..=256` and `-0` is not representable. After a
    /// pending `PUSH_LITERAL` the two pushes are folded into one
    /// `EXT_PUSH_LITERAL_PUSH_NUMBER_*` instruction.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "value - 1 is at most 255 after the range check"
    )]
    pub fn emit_push_number(&mut self, value: u16, negative: bool) -> Result<(), EmitError> {
        if value > PUSH_NUMBER_BYTE_RANGE_END || (value == 0 && negative) {
            return Err(EmitError::NumberOutOfRange { value });
        }
        let (plain, folded, byte) = match (value, negative) {
            (0, _) => (Opcode::PushNumber0, ExtOpcode::PushLiteralPushNumber0, None),
            (_, false) => (
                Opcode::PushNumberPosByte,
                ExtOpcode::PushLiteralPushNumberPosByte,
                Some((value - 1) as u8),
            ),
            (_, true) => (
                Opcode::PushNumberNegByte,
                ExtOpcode::PushLiteralPushNumberNegByte,
                Some((value - 1) as u8),
            ),
        };

        if let Some(last) = self.last.as_mut() {
            if last.op == Op::Base(Opcode::PushLiteral) {
                last.op = Op::Ext(folded);
                last.byte = byte;
                return Ok(());
            }
        }

        let mut instruction = Instruction::new(plain);
        instruction.byte = byte;
        self.emit(instruction)
    }

    /// Rewrite a pending small-number push into a literal push.
    ///
    /// The number gets a zero-length pool entry keyed by its value, found or
    /// created in `pool`. `PUSH_NUMBER_*` becomes `PUSH_LITERAL`;
    /// `EXT_PUSH_LITERAL_PUSH_NUMBER_*` becomes `PUSH_TWO_LITERALS`.
    pub fn convert_push_number_to_push_literal(
        &mut self,
        pool: &mut LiteralPool<'_>,
    ) -> Result<(), EmitError> {
        let Some(last) = self.last.as_mut() else {
            return Err(EmitError::NotAPushNumber);
        };
        let value = last.pushed_number().ok_or(EmitError::NotAPushNumber)?;
        let index = pool.intern_small_int(value)?;
        tracing::debug!(value, %index, "push number converted to literal");

        if last.op.is_basic() {
            *last = Instruction::new(Opcode::PushLiteral).with_literal(index);
        } else {
            last.op = Op::Base(Opcode::PushTwoLiterals);
            last.literal2 = Some(index);
            last.byte = None;
        }
        Ok(())
    }

    /// Turn the pending discard-result instruction into its result-pushing
    /// form and flush it, so it cannot be changed again.
    ///
    /// Returns `false` if there is no such instruction pending.
    pub fn push_result(&mut self) -> Result<bool, EmitError> {
        let Some(last) = self.last.as_mut() else {
            return Ok(false);
        };
        let Some(op) = last.op.push_result_form() else {
            return Ok(false);
        };
        last.op = op;
        self.flush()?;
        Ok(true)
    }

    /// Offset at which the next instruction will start.
    pub fn current_offset(&mut self) -> Result<usize, EmitError> {
        self.flush()?;
        Ok(self.code.len())
    }

    /// Emit a forward branch with a 3-byte placeholder offset.
    pub fn emit_forward_branch(&mut self, op: impl Into<Op>) -> Result<ForwardBranch, EmitError> {
        let op = op.into();
        if !op.is_forward_branch() {
            return Err(EmitError::NotABranch { op });
        }
        let wide = op.with_branch_width(3).ok_or(EmitError::NotABranch { op })?;
        self.flush()?;
        let at = self.code.len();
        self.write_op(wide);
        let operand = self.code.len();
        self.code.extend([0, 0, 0]);
        self.stack.apply(wide, None)?;
        Ok(ForwardBranch { at, operand })
    }

    /// Point `branch` at the current offset.
    pub fn patch_forward_branch(&mut self, branch: ForwardBranch) -> Result<(), EmitError> {
        let distance = self.current_offset()? - branch.at;
        let bytes = branch_offset_bytes(distance)?;
        if let Some(slot) = self.code.get_mut(branch.operand..branch.operand + 3) {
            slot.copy_from_slice(&bytes);
        }
        Ok(())
    }

    /// Emit a backward branch to `target`, using the narrowest offset.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "the width is at most 3"
    )]
    pub fn emit_backward_branch(
        &mut self,
        op: impl Into<Op>,
        target: usize,
    ) -> Result<(), EmitError> {
        let op = op.into();
        if !op.is_branch() || op.is_forward_branch() {
            return Err(EmitError::NotABranch { op });
        }
        self.flush()?;
        let distance = self.code.len().saturating_sub(target);
        let bytes = branch_offset_bytes(distance)?;
        let width = bytes.iter().position(|&b| b != 0).map_or(1, |first| 3 - first);
        let sized = op
            .with_branch_width(width as u8)
            .ok_or(EmitError::NotABranch { op })?;
        self.write_op(sized);
        self.code.extend_from_slice(&bytes[3 - width..]);
        self.stack.apply(sized, None)
    }

    /// Write the pending instruction.
    pub fn flush(&mut self) -> Result<(), EmitError> {
        let Some(instruction) = self.last.take() else {
            return Ok(());
        };
        instruction.check_operands()?;
        tracing::trace!(op = %instruction.op, offset = self.code.len(), "flush");

        self.write_op(instruction.op);
        for index in [instruction.literal, instruction.literal2, instruction.literal3]
            .into_iter()
            .flatten()
        {
            if !self.encoding.encode(index, &mut self.code) {
                return Err(EmitError::LiteralOutOfRange {
                    index,
                    encoding: self.encoding,
                });
            }
        }
        if let Some(byte) = instruction.byte {
            self.code.push(byte);
        }
        self.stack.apply(instruction.op, instruction.byte)
    }

    /// Flush and package the byte code.
    pub fn finish(mut self, mut flags: CodeFlags) -> Result<CompiledCode, EmitError> {
        self.flush()?;
        if self.encoding == LiteralEncoding::Full {
            flags |= CodeFlags::FULL_LITERAL_ENCODING;
        }
        Ok(CompiledCode {
            flags,
            stack_limit: self.stack.limit(),
            byte_code: self.code,
        })
    }

    fn write_op(&mut self, op: Op) {
        match op {
            Op::Base(op) => self.code.push(op as u8),
            Op::Ext(op) => self.code.extend([Opcode::ExtOpcode as u8, op as u8]),
        }
    }
}

/// Branch offset as 3 bytes, highest first.
#[allow(
    clippy::cast_possible_truncation,
    reason = "each byte is masked to 8 bits"
)]
fn branch_offset_bytes(distance: usize) -> Result<[u8; 3], EmitError> {
    if distance > MAX_BRANCH_OFFSET {
        return Err(EmitError::BranchTooFar { distance });
    }
    Ok([
        (distance >> 16) as u8,
        (distance >> 8) as u8,
        distance as u8,
    ])
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
