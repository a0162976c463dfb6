//! Hard limits of the compact encoding.

/// Longest identifier (and number literal) in decoded bytes.
pub const MAX_IDENT_LENGTH: usize = 255;

/// Longest string, template segment, or regexp literal in decoded bytes.
pub const MAX_STRING_LENGTH: usize = 65_535;

/// Literal pool capacity per compilation unit, bounded by what the full
/// literal index encoding can express.
pub const MAX_LITERALS: usize = 32_767;

/// Integers in `0..=PUSH_NUMBER_BYTE_RANGE_END` (and their negations,
/// except -0) are pushed as immediates without a pool entry.
pub const PUSH_NUMBER_BYTE_RANGE_END: u16 = 256;
