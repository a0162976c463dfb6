//! Per-compilation-unit status flags.
//!
//! One [`CompileFlags`] value lives in each lexer context and is scoped to
//! a single compilation unit (a script or one function body). Nested
//! function compilation saves and restores it; nothing here is global.

use bitflags::bitflags;

bitflags! {
    /// Status of the unit being compiled.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct CompileFlags: u32 {
        /// Strict mode code.
        const IS_STRICT = 1 << 0;
        /// Compiling a function body rather than a script.
        const IS_FUNCTION = 1 << 1;
        /// Compiling an arrow function body.
        const IS_ARROW_FUNCTION = 1 << 2;
        /// Compiling a class constructor.
        const IS_CLASS_CONSTRUCTOR = 1 << 3;
        /// Inside a `with` statement: identifiers cannot live in registers.
        const INSIDE_WITH = 1 << 4;
        /// Calls must resolve their base object at run time.
        const RESOLVE_BASE_FOR_CALLS = 1 << 5;
        /// The body mentions `arguments`; materialize the arguments object.
        const ARGUMENTS_NEEDED = 1 << 6;
        /// `arguments` is shadowed by a binding; no arguments object.
        const ARGUMENTS_NOT_NEEDED = 1 << 7;
        /// A heap-allocated lexical environment is required.
        const LEXICAL_ENV_NEEDED = 1 << 8;
    }
}
