//! The compact bytecode opcode set.
//!
//! Two closed tables: the basic opcodes (one byte each) and the extended
//! opcodes (emitted as [`Opcode::ExtOpcode`] followed by one byte). Every
//! entry carries a mnemonic, its argument shape as [`OpcodeFlags`], and a
//! net stack effect in `-4..=3`.
//!
//! # Branch layout
//!
//! Branch opcodes come in triples (1, 2, and 3 byte offsets) placed so
//! that `opcode & 3` is the offset width. Around them the table is laid out
//! in groups of 8: slot 0 and slot 4 hold unrelated opcodes, slots 1-3 hold
//! a forward branch and, where one exists, slots 5-7 hold its backward
//! counterpart. Direction is always read from [`OpcodeFlags`], never from
//! the slot, since some groups hold two forward triples.

use std::fmt;

use bitflags::bitflags;

bitflags! {
    /// Argument shape of an opcode.
    ///
    /// Only the low 5 bits are used; the packed table form stores the
    /// stack effect in the upper 3.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct OpcodeFlags: u8 {
        /// Followed by a literal index.
        const HAS_LITERAL_ARG = 0x01;
        /// Followed by a second literal index.
        const HAS_LITERAL_ARG2 = 0x02;
        /// Followed by one byte.
        const HAS_BYTE_ARG = 0x04;
        /// Followed by a 1-3 byte branch offset.
        const HAS_BRANCH_ARG = 0x08;
        /// Shared bit: with `HAS_BRANCH_ARG` the branch jumps forward.
        const FORWARD_BRANCH_ARG = 0x10;
        /// Shared bit: with `HAS_BYTE_ARG` the byte is an extra pop count.
        const POP_STACK_BYTE_ARG = 0x10;
    }
}

/// Bits of [`OpcodeFlags`] that describe trailing arguments.
pub const ARG_TYPES: OpcodeFlags = OpcodeFlags::HAS_LITERAL_ARG
    .union(OpcodeFlags::HAS_LITERAL_ARG2)
    .union(OpcodeFlags::HAS_BYTE_ARG)
    .union(OpcodeFlags::HAS_BRANCH_ARG);

const STACK_ADJUST_BASE: i8 = 4;
const STACK_ADJUST_SHIFT: u32 = 5;

// Stack slots reserved by the statement contexts.
const FOR_IN_CONTEXT_STACK_ALLOCATION: i8 = 3;
const WITH_CONTEXT_STACK_ALLOCATION: i8 = 1;
const SUPER_CLASS_CONTEXT_STACK_ALLOCATION: i8 = 1;
const TRY_CONTEXT_STACK_ALLOCATION: i8 = 3;

const NONE: OpcodeFlags = OpcodeFlags::empty();
const LIT: OpcodeFlags = OpcodeFlags::HAS_LITERAL_ARG;
const ARG2: OpcodeFlags = OpcodeFlags::HAS_LITERAL_ARG2;
const LIT_LIT: OpcodeFlags = LIT.union(ARG2);
const BYTE: OpcodeFlags = OpcodeFlags::HAS_BYTE_ARG;
const LIT_BYTE: OpcodeFlags = LIT.union(BYTE);
const POP_BYTE: OpcodeFlags = BYTE.union(OpcodeFlags::POP_STACK_BYTE_ARG);
const FWD: OpcodeFlags = OpcodeFlags::HAS_BRANCH_ARG.union(OpcodeFlags::FORWARD_BRANCH_ARG);
const BWD: OpcodeFlags = OpcodeFlags::HAS_BRANCH_ARG;

/// Static metadata of one opcode.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct OpcodeInfo {
    pub name: &'static str,
    pub flags: OpcodeFlags,
    pub stack_effect: i8,
}

impl OpcodeInfo {
    /// One-byte form: flags in the low 5 bits, `stack_effect + 4` above.
    #[allow(
        clippy::cast_sign_loss,
        reason = "stack effects are in -4..=3, so the adjusted value is 0..=7"
    )]
    pub const fn packed(self) -> u8 {
        self.flags.bits() | (((self.stack_effect + STACK_ADJUST_BASE) as u8) << STACK_ADJUST_SHIFT)
    }

    /// Inverse of [`packed`](Self::packed) for the stack effect.
    #[allow(
        clippy::cast_possible_wrap,
        reason = "the shifted value is at most 7"
    )]
    pub const fn stack_effect_of_packed(packed: u8) -> i8 {
        (packed >> STACK_ADJUST_SHIFT) as i8 - STACK_ADJUST_BASE
    }
}

macro_rules! opcode_table {
    (
        $(#[$meta:meta])*
        enum $name:ident in $table:ident {
            $($variant:ident => $mnemonic:literal, $flags:expr, $stack:expr;)*
        }
    ) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
        #[repr(u8)]
        pub enum $name {
            $($variant,)*
        }

        impl $name {
            /// Every opcode, in encoding order.
            pub const ALL: &'static [$name] = &[$($name::$variant,)*];
        }

        const $table: &[OpcodeInfo] = &[
            $(OpcodeInfo { name: $mnemonic, flags: $flags, stack_effect: $stack },)*
        ];
    };
}

opcode_table! {
    /// Basic opcodes.
    enum Opcode in BASIC_TABLE {
        // Branch opcodes first, other opcodes fill the free group slots.
        ExtOpcode => "EXT_OPCODE", NONE, 0;
        JumpForward => "JUMP_FORWARD", FWD, 0;
        JumpForward2 => "JUMP_FORWARD_2", FWD, 0;
        JumpForward3 => "JUMP_FORWARD_3", FWD, 0;
        Pop => "POP", NONE, -1;
        JumpBackward => "JUMP_BACKWARD", BWD, 0;
        JumpBackward2 => "JUMP_BACKWARD_2", BWD, 0;
        JumpBackward3 => "JUMP_BACKWARD_3", BWD, 0;
        PopBlock => "POP_BLOCK", NONE, -1;
        BranchIfTrueForward => "BRANCH_IF_TRUE_FORWARD", FWD, -1;
        BranchIfTrueForward2 => "BRANCH_IF_TRUE_FORWARD_2", FWD, -1;
        BranchIfTrueForward3 => "BRANCH_IF_TRUE_FORWARD_3", FWD, -1;
        Throw => "THROW", NONE, -1;
        BranchIfTrueBackward => "BRANCH_IF_TRUE_BACKWARD", BWD, -1;
        BranchIfTrueBackward2 => "BRANCH_IF_TRUE_BACKWARD_2", BWD, -1;
        BranchIfTrueBackward3 => "BRANCH_IF_TRUE_BACKWARD_3", BWD, -1;
        ContextEnd => "CONTEXT_END", NONE, 0;
        BranchIfFalseForward => "BRANCH_IF_FALSE_FORWARD", FWD, -1;
        BranchIfFalseForward2 => "BRANCH_IF_FALSE_FORWARD_2", FWD, -1;
        BranchIfFalseForward3 => "BRANCH_IF_FALSE_FORWARD_3", FWD, -1;
        CreateObject => "CREATE_OBJECT", NONE, 1;
        BranchIfFalseBackward => "BRANCH_IF_FALSE_BACKWARD", BWD, -1;
        BranchIfFalseBackward2 => "BRANCH_IF_FALSE_BACKWARD_2", BWD, -1;
        BranchIfFalseBackward3 => "BRANCH_IF_FALSE_BACKWARD_3", BWD, -1;
        SetProperty => "SET_PROPERTY", LIT, -1;
        JumpForwardExitContext => "JUMP_FORWARD_EXIT_CONTEXT", FWD, 0;
        JumpForwardExitContext2 => "JUMP_FORWARD_EXIT_CONTEXT_2", FWD, 0;
        JumpForwardExitContext3 => "JUMP_FORWARD_EXIT_CONTEXT_3", FWD, 0;
        CreateArray => "CREATE_ARRAY", NONE, 1;
        BranchIfLogicalTrue => "BRANCH_IF_LOGICAL_TRUE", FWD, -1;
        BranchIfLogicalTrue2 => "BRANCH_IF_LOGICAL_TRUE_2", FWD, -1;
        BranchIfLogicalTrue3 => "BRANCH_IF_LOGICAL_TRUE_3", FWD, -1;
        ArrayAppend => "ARRAY_APPEND", POP_BYTE, 0;
        BranchIfLogicalFalse => "BRANCH_IF_LOGICAL_FALSE", FWD, -1;
        BranchIfLogicalFalse2 => "BRANCH_IF_LOGICAL_FALSE_2", FWD, -1;
        BranchIfLogicalFalse3 => "BRANCH_IF_LOGICAL_FALSE_3", FWD, -1;
        PushElision => "PUSH_ELISION", NONE, 1;
        BranchIfStrictEqual => "BRANCH_IF_STRICT_EQUAL", FWD, -1;
        BranchIfStrictEqual2 => "BRANCH_IF_STRICT_EQUAL_2", FWD, -1;
        BranchIfStrictEqual3 => "BRANCH_IF_STRICT_EQUAL_3", FWD, -1;

        // Basic opcodes.
        PushLiteral => "PUSH_LITERAL", LIT, 1;
        PushTwoLiterals => "PUSH_TWO_LITERALS", LIT_LIT, 2;
        PushThreeLiterals => "PUSH_THREE_LITERALS", ARG2, 3;
        PushUndefined => "PUSH_UNDEFINED", NONE, 1;
        PushTrue => "PUSH_TRUE", NONE, 1;
        PushFalse => "PUSH_FALSE", NONE, 1;
        PushNull => "PUSH_NULL", NONE, 1;
        PushThis => "PUSH_THIS", NONE, 1;
        PushThisLiteral => "PUSH_THIS_LITERAL", LIT, 2;
        PushNumber0 => "PUSH_NUMBER_0", NONE, 1;
        PushNumberPosByte => "PUSH_NUMBER_POS_BYTE", BYTE, 1;
        PushNumberNegByte => "PUSH_NUMBER_NEG_BYTE", BYTE, 1;
        PushProp => "PUSH_PROP", NONE, -1;
        PushPropLiteral => "PUSH_PROP_LITERAL", LIT, 0;
        PushPropLiteralLiteral => "PUSH_PROP_LITERAL_LITERAL", LIT_LIT, 1;
        PushPropThisLiteral => "PUSH_PROP_THIS_LITERAL", LIT, 1;
        PushIdentReference => "PUSH_IDENT_REFERENCE", LIT, 3;
        PushPropReference => "PUSH_PROP_REFERENCE", NONE, 1;
        PushPropLiteralReference => "PUSH_PROP_LITERAL_REFERENCE", LIT, 2;
        PushPropLiteralLiteralReference => "PUSH_PROP_LITERAL_LITERAL_REFERENCE", LIT_LIT, 3;
        PushPropThisLiteralReference => "PUSH_PROP_THIS_LITERAL_REFERENCE", LIT, 3;
        New => "NEW", POP_BYTE, 0;
        New0 => "NEW0", NONE, 0;
        New1 => "NEW1", NONE, -1;
        Eval => "EVAL", NONE, 0;
        DefineVars => "DEFINE_VARS", LIT, 0;
        InitializeVar => "INITIALIZE_VAR", LIT_LIT, 0;
        InitializeVars => "INITIALIZE_VARS", LIT_LIT, 0;
        Return => "RETURN", NONE, -1;
        ReturnWithBlock => "RETURN_WITH_BLOCK", NONE, 0;
        ReturnWithLiteral => "RETURN_WITH_LITERAL", LIT, 0;
        SetLiteralProperty => "SET_LITERAL_PROPERTY", LIT_LIT, 0;

        // Unary opcodes.
        Plus => "PLUS", NONE, 0;
        PlusLiteral => "PLUS_LITERAL", LIT, 1;
        Negate => "NEGATE", NONE, 0;
        NegateLiteral => "NEGATE_LITERAL", LIT, 1;
        LogicalNot => "LOGICAL_NOT", NONE, 0;
        LogicalNotLiteral => "LOGICAL_NOT_LITERAL", LIT, 1;
        BitNot => "BIT_NOT", NONE, 0;
        BitNotLiteral => "BIT_NOT_LITERAL", LIT, 1;
        Void => "VOID", NONE, 0;
        VoidLiteral => "VOID_LITERAL", LIT, 1;
        Typeof => "TYPEOF", NONE, 0;
        TypeofIdent => "TYPEOF_IDENT", LIT, 1;

        // Binary opcodes.
        BitOr => "BIT_OR", NONE, -1;
        BitOrRightLiteral => "BIT_OR_RIGHT_LITERAL", LIT, 0;
        BitOrTwoLiterals => "BIT_OR_TWO_LITERALS", LIT_LIT, 1;
        BitXor => "BIT_XOR", NONE, -1;
        BitXorRightLiteral => "BIT_XOR_RIGHT_LITERAL", LIT, 0;
        BitXorTwoLiterals => "BIT_XOR_TWO_LITERALS", LIT_LIT, 1;
        BitAnd => "BIT_AND", NONE, -1;
        BitAndRightLiteral => "BIT_AND_RIGHT_LITERAL", LIT, 0;
        BitAndTwoLiterals => "BIT_AND_TWO_LITERALS", LIT_LIT, 1;
        Equal => "EQUAL", NONE, -1;
        EqualRightLiteral => "EQUAL_RIGHT_LITERAL", LIT, 0;
        EqualTwoLiterals => "EQUAL_TWO_LITERALS", LIT_LIT, 1;
        NotEqual => "NOT_EQUAL", NONE, -1;
        NotEqualRightLiteral => "NOT_EQUAL_RIGHT_LITERAL", LIT, 0;
        NotEqualTwoLiterals => "NOT_EQUAL_TWO_LITERALS", LIT_LIT, 1;
        StrictEqual => "STRICT_EQUAL", NONE, -1;
        StrictEqualRightLiteral => "STRICT_EQUAL_RIGHT_LITERAL", LIT, 0;
        StrictEqualTwoLiterals => "STRICT_EQUAL_TWO_LITERALS", LIT_LIT, 1;
        StrictNotEqual => "STRICT_NOT_EQUAL", NONE, -1;
        StrictNotEqualRightLiteral => "STRICT_NOT_EQUAL_RIGHT_LITERAL", LIT, 0;
        StrictNotEqualTwoLiterals => "STRICT_NOT_EQUAL_TWO_LITERALS", LIT_LIT, 1;
        Less => "LESS", NONE, -1;
        LessRightLiteral => "LESS_RIGHT_LITERAL", LIT, 0;
        LessTwoLiterals => "LESS_TWO_LITERALS", LIT_LIT, 1;
        Greater => "GREATER", NONE, -1;
        GreaterRightLiteral => "GREATER_RIGHT_LITERAL", LIT, 0;
        GreaterTwoLiterals => "GREATER_TWO_LITERALS", LIT_LIT, 1;
        LessEqual => "LESS_EQUAL", NONE, -1;
        LessEqualRightLiteral => "LESS_EQUAL_RIGHT_LITERAL", LIT, 0;
        LessEqualTwoLiterals => "LESS_EQUAL_TWO_LITERALS", LIT_LIT, 1;
        GreaterEqual => "GREATER_EQUAL", NONE, -1;
        GreaterEqualRightLiteral => "GREATER_EQUAL_RIGHT_LITERAL", LIT, 0;
        GreaterEqualTwoLiterals => "GREATER_EQUAL_TWO_LITERALS", LIT_LIT, 1;
        In => "IN", NONE, -1;
        InRightLiteral => "IN_RIGHT_LITERAL", LIT, 0;
        InTwoLiterals => "IN_TWO_LITERALS", LIT_LIT, 1;
        Instanceof => "INSTANCEOF", NONE, -1;
        InstanceofRightLiteral => "INSTANCEOF_RIGHT_LITERAL", LIT, 0;
        InstanceofTwoLiterals => "INSTANCEOF_TWO_LITERALS", LIT_LIT, 1;
        LeftShift => "LEFT_SHIFT", NONE, -1;
        LeftShiftRightLiteral => "LEFT_SHIFT_RIGHT_LITERAL", LIT, 0;
        LeftShiftTwoLiterals => "LEFT_SHIFT_TWO_LITERALS", LIT_LIT, 1;
        RightShift => "RIGHT_SHIFT", NONE, -1;
        RightShiftRightLiteral => "RIGHT_SHIFT_RIGHT_LITERAL", LIT, 0;
        RightShiftTwoLiterals => "RIGHT_SHIFT_TWO_LITERALS", LIT_LIT, 1;
        UnsRightShift => "UNS_RIGHT_SHIFT", NONE, -1;
        UnsRightShiftRightLiteral => "UNS_RIGHT_SHIFT_RIGHT_LITERAL", LIT, 0;
        UnsRightShiftTwoLiterals => "UNS_RIGHT_SHIFT_TWO_LITERALS", LIT_LIT, 1;
        Add => "ADD", NONE, -1;
        AddRightLiteral => "ADD_RIGHT_LITERAL", LIT, 0;
        AddTwoLiterals => "ADD_TWO_LITERALS", LIT_LIT, 1;
        Subtract => "SUBTRACT", NONE, -1;
        SubtractRightLiteral => "SUBTRACT_RIGHT_LITERAL", LIT, 0;
        SubtractTwoLiterals => "SUBTRACT_TWO_LITERALS", LIT_LIT, 1;
        Multiply => "MULTIPLY", NONE, -1;
        MultiplyRightLiteral => "MULTIPLY_RIGHT_LITERAL", LIT, 0;
        MultiplyTwoLiterals => "MULTIPLY_TWO_LITERALS", LIT_LIT, 1;
        Divide => "DIVIDE", NONE, -1;
        DivideRightLiteral => "DIVIDE_RIGHT_LITERAL", LIT, 0;
        DivideTwoLiterals => "DIVIDE_TWO_LITERALS", LIT_LIT, 1;
        Modulo => "MODULO", NONE, -1;
        ModuloRightLiteral => "MODULO_RIGHT_LITERAL", LIT, 0;
        ModuloTwoLiterals => "MODULO_TWO_LITERALS", LIT_LIT, 1;

        // Unary lvalue opcodes.
        DeletePushResult => "DELETE_PUSH_RESULT", NONE, -1;
        DeleteIdentPushResult => "DELETE_IDENT_PUSH_RESULT", LIT, 1;
        PreIncr => "PRE_INCR", NONE, -2;
        PreIncrPushResult => "PRE_INCR_PUSH_RESULT", NONE, -1;
        PreIncrBlock => "PRE_INCR_BLOCK", NONE, -2;
        PreIncrIdent => "PRE_INCR_IDENT", LIT, 0;
        PreIncrIdentPushResult => "PRE_INCR_IDENT_PUSH_RESULT", LIT, 1;
        PreIncrIdentBlock => "PRE_INCR_IDENT_BLOCK", LIT, 0;
        PreDecr => "PRE_DECR", NONE, -2;
        PreDecrPushResult => "PRE_DECR_PUSH_RESULT", NONE, -1;
        PreDecrBlock => "PRE_DECR_BLOCK", NONE, -2;
        PreDecrIdent => "PRE_DECR_IDENT", LIT, 0;
        PreDecrIdentPushResult => "PRE_DECR_IDENT_PUSH_RESULT", LIT, 1;
        PreDecrIdentBlock => "PRE_DECR_IDENT_BLOCK", LIT, 0;
        PostIncr => "POST_INCR", NONE, -2;
        PostIncrPushResult => "POST_INCR_PUSH_RESULT", NONE, -1;
        PostIncrBlock => "POST_INCR_BLOCK", NONE, -2;
        PostIncrIdent => "POST_INCR_IDENT", LIT, 0;
        PostIncrIdentPushResult => "POST_INCR_IDENT_PUSH_RESULT", LIT, 1;
        PostIncrIdentBlock => "POST_INCR_IDENT_BLOCK", LIT, 0;
        PostDecr => "POST_DECR", NONE, -2;
        PostDecrPushResult => "POST_DECR_PUSH_RESULT", NONE, -1;
        PostDecrBlock => "POST_DECR_BLOCK", NONE, -2;
        PostDecrIdent => "POST_DECR_IDENT", LIT, 0;
        PostDecrIdentPushResult => "POST_DECR_IDENT_PUSH_RESULT", LIT, 1;
        PostDecrIdentBlock => "POST_DECR_IDENT_BLOCK", LIT, 0;

        // Call opcodes.
        Call => "CALL", POP_BYTE, -1;
        CallPushResult => "CALL_PUSH_RESULT", POP_BYTE, 0;
        CallBlock => "CALL_BLOCK", POP_BYTE, -1;
        CallProp => "CALL_PROP", POP_BYTE, -3;
        CallPropPushResult => "CALL_PROP_PUSH_RESULT", POP_BYTE, -2;
        CallPropBlock => "CALL_PROP_BLOCK", POP_BYTE, -3;
        Call0 => "CALL0", NONE, -1;
        Call0PushResult => "CALL0_PUSH_RESULT", NONE, 0;
        Call0Block => "CALL0_BLOCK", NONE, -1;
        Call0Prop => "CALL0_PROP", NONE, -3;
        Call0PropPushResult => "CALL0_PROP_PUSH_RESULT", NONE, -2;
        Call0PropBlock => "CALL0_PROP_BLOCK", NONE, -3;
        Call1 => "CALL1", NONE, -2;
        Call1PushResult => "CALL1_PUSH_RESULT", NONE, -1;
        Call1Block => "CALL1_BLOCK", NONE, -2;
        Call1Prop => "CALL1_PROP", NONE, -4;
        Call1PropPushResult => "CALL1_PROP_PUSH_RESULT", NONE, -3;
        Call1PropBlock => "CALL1_PROP_BLOCK", NONE, -4;
        Call2 => "CALL2", NONE, -3;
        Call2PushResult => "CALL2_PUSH_RESULT", NONE, -2;
        Call2Block => "CALL2_BLOCK", NONE, -3;
        Call2Prop => "CALL2_PROP", NONE, -4;
        Call2PropPushResult => "CALL2_PROP_PUSH_RESULT", NONE, -3;
        Call2PropBlock => "CALL2_PROP_BLOCK", NONE, -4;

        // Binary assignment opcodes.
        Assign => "ASSIGN", NONE, -3;
        AssignPushResult => "ASSIGN_PUSH_RESULT", NONE, -2;
        AssignBlock => "ASSIGN_BLOCK", NONE, -3;
        AssignSetIdent => "ASSIGN_SET_IDENT", LIT, -1;
        AssignSetIdentPushResult => "ASSIGN_SET_IDENT_PUSH_RESULT", LIT, 0;
        AssignSetIdentBlock => "ASSIGN_SET_IDENT_BLOCK", LIT, -1;
        AssignLiteralSetIdent => "ASSIGN_LITERAL_SET_IDENT", LIT_LIT, 0;
        AssignLiteralSetIdentPushResult => "ASSIGN_LITERAL_SET_IDENT_PUSH_RESULT", LIT_LIT, 1;
        AssignLiteralSetIdentBlock => "ASSIGN_LITERAL_SET_IDENT_BLOCK", LIT_LIT, 0;
        AssignPropLiteral => "ASSIGN_PROP_LITERAL", LIT, -2;
        AssignPropLiteralPushResult => "ASSIGN_PROP_LITERAL_PUSH_RESULT", LIT, -1;
        AssignPropLiteralBlock => "ASSIGN_PROP_LITERAL_BLOCK", LIT, -2;
        AssignPropThisLiteral => "ASSIGN_PROP_THIS_LITERAL", LIT, -1;
        AssignPropThisLiteralPushResult => "ASSIGN_PROP_THIS_LITERAL_PUSH_RESULT", LIT, 0;
        AssignPropThisLiteralBlock => "ASSIGN_PROP_THIS_LITERAL_BLOCK", LIT, -1;

        // Not a real opcode.
        End => "END", NONE, 0;
    }
}

opcode_table! {
    /// Extended opcodes, encoded after [`Opcode::ExtOpcode`].
    ///
    /// All extended branches close statement blocks, so apart from the
    /// for-in loop test they jump forward.
    enum ExtOpcode in EXT_TABLE {
        Nop => "EXT_NOP", NONE, 0;
        WithCreateContext => "EXT_WITH_CREATE_CONTEXT", FWD, -1 + WITH_CONTEXT_STACK_ALLOCATION;
        WithCreateContext2 => "EXT_WITH_CREATE_CONTEXT_2", FWD, -1 + WITH_CONTEXT_STACK_ALLOCATION;
        WithCreateContext3 => "EXT_WITH_CREATE_CONTEXT_3", FWD, -1 + WITH_CONTEXT_STACK_ALLOCATION;
        ForInGetNext => "EXT_FOR_IN_GET_NEXT", NONE, 1;
        ForInCreateContext => "EXT_FOR_IN_CREATE_CONTEXT", FWD, -1 + FOR_IN_CONTEXT_STACK_ALLOCATION;
        ForInCreateContext2 => "EXT_FOR_IN_CREATE_CONTEXT_2", FWD, -1 + FOR_IN_CONTEXT_STACK_ALLOCATION;
        ForInCreateContext3 => "EXT_FOR_IN_CREATE_CONTEXT_3", FWD, -1 + FOR_IN_CONTEXT_STACK_ALLOCATION;
        SetGetter => "EXT_SET_GETTER", LIT_LIT, 0;
        BranchIfForInHasNext => "EXT_BRANCH_IF_FOR_IN_HAS_NEXT", BWD, 0;
        BranchIfForInHasNext2 => "EXT_BRANCH_IF_FOR_IN_HAS_NEXT_2", BWD, 0;
        BranchIfForInHasNext3 => "EXT_BRANCH_IF_FOR_IN_HAS_NEXT_3", BWD, 0;
        SetSetter => "EXT_SET_SETTER", LIT_LIT, 0;
        TryCreateContext => "EXT_TRY_CREATE_CONTEXT", FWD, TRY_CONTEXT_STACK_ALLOCATION;
        TryCreateContext2 => "EXT_TRY_CREATE_CONTEXT_2", FWD, TRY_CONTEXT_STACK_ALLOCATION;
        TryCreateContext3 => "EXT_TRY_CREATE_CONTEXT_3", FWD, TRY_CONTEXT_STACK_ALLOCATION;
        ThrowReferenceError => "EXT_THROW_REFERENCE_ERROR", NONE, 1;
        Catch => "EXT_CATCH", FWD, 1;
        Catch2 => "EXT_CATCH_2", FWD, 1;
        Catch3 => "EXT_CATCH_3", FWD, 1;
        PushUndefinedBase => "EXT_PUSH_UNDEFINED_BASE", NONE, 1;
        Finally => "EXT_FINALLY", FWD, 0;
        Finally2 => "EXT_FINALLY_2", FWD, 0;
        Finally3 => "EXT_FINALLY_3", FWD, 0;
        ClassExprContextEnd => "EXT_CLASS_EXPR_CONTEXT_END", NONE, 0;
        SuperClassCreateContext => "EXT_SUPER_CLASS_CREATE_CONTEXT", FWD, -1 + SUPER_CLASS_CONTEXT_STACK_ALLOCATION;
        SuperClassCreateContext2 => "EXT_SUPER_CLASS_CREATE_CONTEXT_2", FWD, -1 + SUPER_CLASS_CONTEXT_STACK_ALLOCATION;
        SuperClassCreateContext3 => "EXT_SUPER_CLASS_CREATE_CONTEXT_3", FWD, -1 + SUPER_CLASS_CONTEXT_STACK_ALLOCATION;

        // Basic opcodes.
        Debugger => "EXT_DEBUGGER", NONE, 0;
        PushNamedFuncExpression => "EXT_PUSH_NAMED_FUNC_EXPRESSION", LIT_LIT, 1;
        PushLiteralPushNumber0 => "EXT_PUSH_LITERAL_PUSH_NUMBER_0", LIT, 2;
        PushLiteralPushNumberPosByte => "EXT_PUSH_LITERAL_PUSH_NUMBER_POS_BYTE", LIT_BYTE, 2;
        PushLiteralPushNumberNegByte => "EXT_PUSH_LITERAL_PUSH_NUMBER_NEG_BYTE", LIT_BYTE, 2;
        SetComputedProperty => "EXT_SET_COMPUTED_PROPERTY", NONE, -2;
        SetComputedPropertyLiteral => "EXT_SET_COMPUTED_PROPERTY_LITERAL", LIT, -1;
        SetComputedGetter => "EXT_SET_COMPUTED_GETTER", LIT, -1;
        SetComputedSetter => "EXT_SET_COMPUTED_SETTER", LIT, -1;
        SetStaticPropertyLiteral => "EXT_SET_STATIC_PROPERTY_LITERAL", LIT_LIT, 0;
        SetStaticComputedPropertyLiteral => "EXT_SET_STATIC_COMPUTED_PROPERTY_LITERAL", LIT, -1;
        SetStaticGetter => "EXT_SET_STATIC_GETTER", LIT_LIT, 0;
        SetStaticSetter => "EXT_SET_STATIC_SETTER", LIT_LIT, 0;
        SetStaticComputedGetter => "EXT_SET_STATIC_COMPUTED_GETTER", LIT, -1;
        SetStaticComputedSetter => "EXT_SET_STATIC_COMPUTED_SETTER", LIT, -1;
        ResolveBase => "EXT_RESOLVE_BASE", NONE, 0;

        // Class opcodes.
        InheritAndSetConstructor => "EXT_INHERIT_AND_SET_CONSTRUCTOR", NONE, 0;
        PushClassConstructor => "EXT_PUSH_CLASS_CONSTRUCTOR", NONE, 1;
        ImplicitConstructorCall => "EXT_IMPLICIT_CONSTRUCTOR_CALL", NONE, 0;
        SetClassLiteral => "EXT_SET_CLASS_LITERAL", LIT, 0;
        ClassEval => "EXT_CLASS_EVAL", BYTE, 0;
        SuperCall => "EXT_SUPER_CALL", POP_BYTE, -1;
        SuperCallPushResult => "EXT_SUPER_CALL_PUSH_RESULT", POP_BYTE, 0;
        SuperCallBlock => "EXT_SUPER_CALL_BLOCK", POP_BYTE, -1;
        PushConstructorSuper => "EXT_PUSH_CONSTRUCTOR_SUPER", NONE, 1;
        PushConstructorSuperProp => "EXT_PUSH_CONSTRUCTOR_SUPER_PROP", NONE, 1;
        PushSuper => "EXT_PUSH_SUPER", NONE, 1;
        PushStaticSuper => "EXT_PUSH_STATIC_SUPER", NONE, 1;
        PushConstructorThis => "EXT_PUSH_CONSTRUCTOR_THIS", NONE, 1;
        SuperPropCall => "EXT_SUPER_PROP_CALL", NONE, 0;
        SuperPropAssign => "EXT_SUPER_PROP_ASSIGN", NONE, 0;
        ConstructorReturn => "EXT_CONSTRUCTOR_RETURN", NONE, -1;

        // Not a real opcode.
        End => "EXT_END", NONE, 0;
    }
}

const fn stack_effects_fit(table: &[OpcodeInfo]) -> bool {
    let mut i = 0;
    while i < table.len() {
        let effect = table[i].stack_effect;
        if effect < -STACK_ADJUST_BASE || effect > 3 {
            return false;
        }
        i += 1;
    }
    true
}

const _: () = assert!(stack_effects_fit(BASIC_TABLE));
const _: () = assert!(stack_effects_fit(EXT_TABLE));
const _: () = assert!(BASIC_TABLE.len() <= 256 && EXT_TABLE.len() <= 256);

/// Shared accessors over [`OpcodeInfo`] for both tables.
macro_rules! opcode_accessors {
    ($name:ident, $table:ident) => {
        impl $name {
            /// Number of opcodes in the table.
            pub const COUNT: usize = $table.len();

            #[inline]
            pub fn from_u8(byte: u8) -> Option<Self> {
                Self::ALL.get(usize::from(byte)).copied()
            }

            #[inline]
            pub const fn info(self) -> OpcodeInfo {
                $table[self as usize]
            }

            #[inline]
            pub const fn name(self) -> &'static str {
                self.info().name
            }

            #[inline]
            pub const fn flags(self) -> OpcodeFlags {
                self.info().flags
            }

            #[inline]
            pub const fn stack_effect(self) -> i8 {
                self.info().stack_effect
            }

            #[inline]
            pub const fn packed(self) -> u8 {
                self.info().packed()
            }

            #[inline]
            pub const fn is_branch(self) -> bool {
                self.flags().contains(OpcodeFlags::HAS_BRANCH_ARG)
            }

            #[inline]
            pub const fn is_forward_branch(self) -> bool {
                self.flags().contains(FWD)
            }

            /// Offset width in bytes (1-3) of a branch opcode, 0 otherwise.
            #[inline]
            pub const fn branch_offset_length(self) -> u8 {
                if self.is_branch() {
                    self as u8 & 0x3
                } else {
                    0
                }
            }

            /// The same branch with an offset of `width` bytes.
            ///
            /// `None` if `self` is not a branch or `width` is not 1, 2, or 3.
            pub fn with_branch_width(self, width: u8) -> Option<Self> {
                if !self.is_branch() || !(1..=3).contains(&width) {
                    return None;
                }
                Self::from_u8((self as u8 & !0x3) | width)
            }

            /// The byte argument is an extra pop count on top of the table
            /// stack effect.
            #[inline]
            pub const fn pops_byte_arg(self) -> bool {
                self.flags().contains(POP_BYTE)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

opcode_accessors!(Opcode, BASIC_TABLE);
opcode_accessors!(ExtOpcode, EXT_TABLE);

impl Opcode {
    /// Discard-result forms: every opcode from `PreIncr` up to `End`.
    ///
    /// The result-pushing sibling is always the next opcode in the table.
    #[inline]
    pub const fn is_no_result_operation(self) -> bool {
        self as u8 >= Opcode::PreIncr as u8 && (self as u8) < Opcode::End as u8
    }
}

impl ExtOpcode {
    /// Super constructor calls are discard-result forms too.
    #[inline]
    pub const fn is_super_call(self) -> bool {
        self as u8 >= ExtOpcode::SuperCall as u8 && self as u8 <= ExtOpcode::SuperCallBlock as u8
    }
}

/// An instruction opcode from either table.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Op {
    Base(Opcode),
    Ext(ExtOpcode),
}

impl Op {
    #[inline]
    pub const fn info(self) -> OpcodeInfo {
        match self {
            Op::Base(op) => op.info(),
            Op::Ext(op) => op.info(),
        }
    }

    #[inline]
    pub const fn flags(self) -> OpcodeFlags {
        self.info().flags
    }

    #[inline]
    pub const fn stack_effect(self) -> i8 {
        self.info().stack_effect
    }

    #[inline]
    pub const fn name(self) -> &'static str {
        self.info().name
    }

    #[inline]
    pub const fn is_basic(self) -> bool {
        matches!(self, Op::Base(_))
    }

    /// Encoded size of the opcode itself, without arguments.
    #[inline]
    pub const fn encoded_len(self) -> usize {
        match self {
            Op::Base(_) => 1,
            Op::Ext(_) => 2,
        }
    }

    /// The emitter may still turn this into its `+1` result-pushing sibling.
    pub const fn is_no_result_operation(self) -> bool {
        match self {
            Op::Base(op) => op.is_no_result_operation(),
            Op::Ext(op) => op.is_super_call(),
        }
    }

    /// Whether the byte argument adds to the pop count.
    #[inline]
    pub const fn pops_byte_arg(self) -> bool {
        match self {
            Op::Base(op) => op.pops_byte_arg(),
            Op::Ext(op) => op.pops_byte_arg(),
        }
    }

    #[inline]
    pub const fn is_branch(self) -> bool {
        self.flags().contains(OpcodeFlags::HAS_BRANCH_ARG)
    }

    #[inline]
    pub const fn is_forward_branch(self) -> bool {
        self.flags().contains(FWD)
    }

    pub fn with_branch_width(self, width: u8) -> Option<Op> {
        match self {
            Op::Base(op) => op.with_branch_width(width).map(Op::Base),
            Op::Ext(op) => op.with_branch_width(width).map(Op::Ext),
        }
    }

    /// The `+1` sibling of a discard-result opcode, which pushes the result.
    pub fn push_result_form(self) -> Option<Op> {
        if !self.is_no_result_operation() {
            return None;
        }
        match self {
            Op::Base(op) => Opcode::from_u8(op as u8 + 1).map(Op::Base),
            Op::Ext(op) => ExtOpcode::from_u8(op as u8 + 1).map(Op::Ext),
        }
    }

    /// Decode the opcode at the start of `bytes`.
    pub fn decode(bytes: &[u8]) -> Option<Op> {
        match bytes {
            [0, ext, ..] => ExtOpcode::from_u8(*ext).map(Op::Ext),
            [byte, ..] => Opcode::from_u8(*byte).map(Op::Base),
            [] => None,
        }
    }
}

impl From<Opcode> for Op {
    fn from(op: Opcode) -> Self {
        Op::Base(op)
    }
}

impl From<ExtOpcode> for Op {
    fn from(op: ExtOpcode) -> Self {
        Op::Ext(op)
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
