use super::*;
use pretty_assertions::assert_eq;
use quill_ir::{LiteralKind, LiteralValue};

fn lit(raw: u16) -> LiteralIndex {
    LiteralIndex::new(raw)
}

const EXT: u8 = Opcode::ExtOpcode as u8;

#[test]
fn literal_pushes_merge_up_to_three() {
    let mut emitter = Emitter::new(LiteralEncoding::Small);
    emitter.emit_push_literal(lit(1)).unwrap();
    emitter.emit_push_literal(lit(2)).unwrap();
    assert_eq!(emitter.last().unwrap().op, Op::Base(Opcode::PushTwoLiterals));
    emitter.emit_push_literal(lit(3)).unwrap();
    assert_eq!(emitter.last().unwrap().op, Op::Base(Opcode::PushThreeLiterals));
    // A fourth push starts a new instruction.
    emitter.emit_push_literal(lit(4)).unwrap();
    let code = emitter.finish(CodeFlags::empty()).unwrap();
    assert_eq!(
        code.byte_code,
        vec![
            Opcode::PushThreeLiterals as u8,
            1,
            2,
            3,
            Opcode::PushLiteral as u8,
            4
        ]
    );
    assert_eq!(code.stack_limit, 4);
}

#[test]
fn merge_rules() {
    let push = Instruction::new(Opcode::PushLiteral).with_literal(lit(7));
    assert_eq!(
        try_merge_literal(&push, lit(8)),
        Some(
            Instruction::new(Opcode::PushTwoLiterals)
                .with_literal(lit(7))
                .with_literal2(lit(8))
        )
    );
    assert_eq!(
        try_merge_literal(&Instruction::new(Opcode::PushThis), lit(1)),
        Some(Instruction::new(Opcode::PushThisLiteral).with_literal(lit(1)))
    );
    assert_eq!(try_merge_literal(&Instruction::new(Opcode::Add), lit(1)), None);
}

#[test]
fn small_numbers_fold_after_literal() {
    let mut emitter = Emitter::new(LiteralEncoding::Small);
    emitter.emit_push_literal(lit(0)).unwrap();
    emitter.emit_push_number(10, false).unwrap();
    let last = *emitter.last().unwrap();
    assert_eq!(last.op, Op::Ext(ExtOpcode::PushLiteralPushNumberPosByte));
    assert_eq!(last.pushed_number(), Some(10));
    let code = emitter.finish(CodeFlags::empty()).unwrap();
    assert_eq!(
        code.byte_code,
        vec![EXT, ExtOpcode::PushLiteralPushNumberPosByte as u8, 0, 9]
    );
    assert_eq!(code.stack_limit, 2);
}

#[test]
fn push_number_forms() {
    let cases = [
        (0, false, Opcode::PushNumber0, Some(0)),
        (1, false, Opcode::PushNumberPosByte, Some(1)),
        (256, false, Opcode::PushNumberPosByte, Some(256)),
        (1, true, Opcode::PushNumberNegByte, Some(-1)),
        (256, true, Opcode::PushNumberNegByte, Some(-256)),
    ];
    for (value, negative, op, pushed) in cases {
        let mut emitter = Emitter::default();
        emitter.emit_push_number(value, negative).unwrap();
        let last = emitter.last().unwrap();
        assert_eq!(last.op, Op::Base(op));
        assert_eq!(last.pushed_number(), pushed);
    }

    let mut emitter = Emitter::default();
    assert_eq!(
        emitter.emit_push_number(257, false),
        Err(EmitError::NumberOutOfRange { value: 257 })
    );
    assert_eq!(
        emitter.emit_push_number(0, true),
        Err(EmitError::NumberOutOfRange { value: 0 })
    );
}

#[test]
fn convert_plain_push_number() {
    let mut pool = LiteralPool::new();
    let mut emitter = Emitter::default();
    emitter.emit_push_number(5, true).unwrap();
    emitter.convert_push_number_to_push_literal(&mut pool).unwrap();

    let last = *emitter.last().unwrap();
    assert_eq!(last.op, Op::Base(Opcode::PushLiteral));
    let index = last.literal.unwrap();
    let entry = pool.get(index).unwrap();
    assert_eq!(entry.kind(), LiteralKind::Number);
    assert_eq!(entry.length(), 0);
    assert_eq!(entry.value, LiteralValue::SmallInt(-5));
}

#[test]
fn convert_folded_push_number_and_reuse_entry() {
    let mut pool = LiteralPool::new();
    let mut emitter = Emitter::default();

    emitter.emit_push_number(0, false).unwrap();
    emitter.convert_push_number_to_push_literal(&mut pool).unwrap();
    let zero = emitter.last().unwrap().literal.unwrap();

    emitter.emit(Instruction::new(Opcode::Pop)).unwrap();
    emitter.emit_push_literal(lit(9)).unwrap();
    emitter.emit_push_number(0, false).unwrap();
    emitter.convert_push_number_to_push_literal(&mut pool).unwrap();

    let last = *emitter.last().unwrap();
    assert_eq!(last.op, Op::Base(Opcode::PushTwoLiterals));
    assert_eq!(last.literal, Some(lit(9)));
    assert_eq!(last.literal2, Some(zero));
    assert_eq!(last.byte, None);
    assert_eq!(pool.len(), 1);
}

#[test]
fn convert_requires_pending_push_number() {
    let mut pool = LiteralPool::new();
    let mut emitter = Emitter::default();
    assert_eq!(
        emitter.convert_push_number_to_push_literal(&mut pool),
        Err(EmitError::NotAPushNumber)
    );
    emitter.emit_push_literal(lit(0)).unwrap();
    assert_eq!(
        emitter.convert_push_number_to_push_literal(&mut pool),
        Err(EmitError::NotAPushNumber)
    );
}

#[test]
fn convert_reports_pool_limit() {
    let mut pool = LiteralPool::with_limit(0);
    let mut emitter = Emitter::default();
    emitter.emit_push_number(3, false).unwrap();
    assert_eq!(
        emitter.convert_push_number_to_push_literal(&mut pool),
        Err(EmitError::Pool(PoolError::LimitReached))
    );
}

#[test]
fn push_result_converts_and_flushes() {
    let mut emitter = Emitter::default();
    emitter.emit_push_literal(lit(0)).unwrap();
    emitter.emit_push_literal(lit(1)).unwrap();
    emitter.emit(Instruction::new(Opcode::Call0)).unwrap();
    assert!(emitter.push_result().unwrap());
    assert!(emitter.last().is_none());
    assert_eq!(
        emitter.code(),
        &[
            Opcode::PushTwoLiterals as u8,
            0,
            1,
            Opcode::Call0PushResult as u8
        ]
    );
    assert_eq!(emitter.stack().depth(), 2);
    assert!(!emitter.push_result().unwrap());
}

#[test]
fn missing_operand_is_rejected() {
    let mut emitter = Emitter::default();
    emitter.emit(Instruction::new(Opcode::PushLiteral)).unwrap();
    assert_eq!(
        emitter.flush(),
        Err(EmitError::MissingOperand {
            op: Opcode::PushLiteral.into()
        })
    );
}

#[test]
fn literal_encoding_is_applied() {
    let mut emitter = Emitter::new(LiteralEncoding::Full);
    emitter.emit_push_literal(lit(300)).unwrap();
    let code = emitter.finish(CodeFlags::FUNCTION).unwrap();
    assert_eq!(
        code.byte_code,
        vec![Opcode::PushLiteral as u8, 0x81, 0x2C]
    );
    assert!(code.flags.contains(CodeFlags::FULL_LITERAL_ENCODING));

    let mut emitter = Emitter::new(LiteralEncoding::Small);
    emitter.emit_push_literal(lit(600)).unwrap();
    assert_eq!(
        emitter.flush(),
        Err(EmitError::LiteralOutOfRange {
            index: lit(600),
            encoding: LiteralEncoding::Small
        })
    );
}

#[test]
fn forward_branch_is_patched() {
    let mut emitter = Emitter::default();
    emitter.emit(Instruction::new(Opcode::PushTrue)).unwrap();
    let branch = emitter.emit_forward_branch(Opcode::BranchIfFalseForward).unwrap();
    emitter.emit(Instruction::new(Opcode::PushNull)).unwrap();
    emitter.emit(Instruction::new(Opcode::Pop)).unwrap();
    emitter.patch_forward_branch(branch).unwrap();
    assert_eq!(
        emitter.code(),
        &[
            Opcode::PushTrue as u8,
            Opcode::BranchIfFalseForward3 as u8,
            0,
            0,
            6,
            Opcode::PushNull as u8,
            Opcode::Pop as u8,
        ]
    );
    assert_eq!(emitter.stack().depth(), 0);
}

#[test]
fn backward_branch_uses_narrowest_width() {
    let mut emitter = Emitter::default();
    let target = emitter.current_offset().unwrap();
    for _ in 0..300 {
        emitter.emit(Instruction::new(Opcode::ContextEnd)).unwrap();
    }
    emitter.emit_backward_branch(Opcode::JumpBackward, target).unwrap();
    let code = emitter.code();
    assert_eq!(&code[300..], &[Opcode::JumpBackward2 as u8, 0x01, 0x2C]);

    let mut emitter = Emitter::default();
    emitter.emit(Instruction::new(Opcode::ContextEnd)).unwrap();
    emitter.emit_backward_branch(Opcode::JumpBackward, 0).unwrap();
    assert_eq!(&emitter.code()[1..], &[Opcode::JumpBackward as u8, 1]);
}

#[test]
fn branch_direction_is_checked() {
    let mut emitter = Emitter::default();
    assert_eq!(
        emitter.emit_forward_branch(Opcode::JumpBackward),
        Err(EmitError::NotABranch {
            op: Opcode::JumpBackward.into()
        })
    );
    assert_eq!(
        emitter.emit_backward_branch(Opcode::Pop, 0),
        Err(EmitError::NotABranch {
            op: Opcode::Pop.into()
        })
    );
}

#[test]
fn ext_forward_branch() {
    let mut emitter = Emitter::default();
    let branch = emitter
        .emit_forward_branch(ExtOpcode::TryCreateContext)
        .unwrap();
    emitter.patch_forward_branch(branch).unwrap();
    assert_eq!(
        emitter.code(),
        &[EXT, ExtOpcode::TryCreateContext3 as u8, 0, 0, 5]
    );
    assert_eq!(emitter.stack().limit(), 3);
}
