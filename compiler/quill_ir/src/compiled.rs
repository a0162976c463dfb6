//! Output of compiling one function, as stored in the literal pool.

use bitflags::bitflags;

bitflags! {
    /// Status flags of a compiled code block.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct CodeFlags: u16 {
        /// The code is a function body.
        const FUNCTION = 1 << 0;
        /// Literal indices use the full (up to 2 byte, 15 bit) encoding.
        const FULL_LITERAL_ENCODING = 1 << 1;
        /// Header fields are 16 bit wide.
        const UINT16_ARGUMENTS = 1 << 2;
        const STRICT_MODE = 1 << 3;
        /// The arguments object must be constructed.
        const ARGUMENTS_NEEDED = 1 << 4;
        const LEXICAL_ENV_NOT_NEEDED = 1 << 5;
        const ARROW_FUNCTION = 1 << 6;
        const CONSTRUCTOR = 1 << 7;
        const REST_PARAMETER = 1 << 10;
    }
}

/// A compiled function body.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct CompiledCode {
    pub flags: CodeFlags,
    /// Peak evaluation stack depth.
    pub stack_limit: u16,
    pub byte_code: Vec<u8>,
}

impl CompiledCode {
    /// A non-strict arguments object must be built on entry.
    pub fn needs_non_strict_arguments(&self) -> bool {
        self.flags.contains(CodeFlags::ARGUMENTS_NEEDED)
            && !self.flags.contains(CodeFlags::STRICT_MODE)
    }
}
