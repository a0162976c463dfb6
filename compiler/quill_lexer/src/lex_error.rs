//! Lexer error types.
//!
//! Every lexer failure is fatal to the compilation unit: there is no
//! recovery and no warning level. A [`LexError`] carries the kind plus the
//! position it is reported at, which is normally the start of the token
//! being scanned.

use quill_ir::{PoolError, Position};

/// A fatal lexer error.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
#[error("{position}: {kind}")]
pub struct LexError {
    pub kind: LexErrorKind,
    /// Line and column the error is reported at.
    pub position: Position,
    /// Byte offset matching `position`.
    pub offset: usize,
    /// Column just past the offending text, when it is known.
    pub end_column: Option<u32>,
}

/// What went wrong.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
pub enum LexErrorKind {
    // === Characters ===
    #[error("Invalid (unexpected) character.")]
    InvalidCharacter,
    #[error("Unterminated multiline comment.")]
    UnterminatedMultilineComment,

    // === Identifiers ===
    #[error("Identifier is too long.")]
    IdentifierTooLong,
    #[error("Invalid unicode escape sequence.")]
    InvalidUnicodeEscapeSequence,
    #[error("Character cannot be start of an identifier.")]
    InvalidIdentifierStart,
    #[error("Character cannot be part of an identifier.")]
    InvalidIdentifierPart,
    #[error("Identifier name is reserved in strict mode.")]
    StrictIdentNotAllowed,
    #[error("Eval is not allowed to be used here in strict mode.")]
    EvalNotAllowed,
    #[error("Arguments is not allowed to be used here in strict mode.")]
    ArgumentsNotAllowed,
    #[error("Identifier expected.")]
    IdentifierExpected,
    #[error("Property identifier expected.")]
    PropertyIdentifierExpected,

    // === Strings ===
    #[error("Unterminated string literal.")]
    UnterminatedString,
    #[error("String is too long.")]
    StringTooLong,
    #[error("Invalid escape sequence.")]
    InvalidEscapeSequence,
    #[error("Octal escape sequences are not allowed in strict mode.")]
    OctalEscapeNotAllowed,
    #[error("Newline is not allowed in strings or regular expressions.")]
    NewlineNotAllowed,

    // === Numbers ===
    #[error("Invalid hexadecimal digit.")]
    InvalidHexDigit,
    #[error("Octal numbers are not allowed in strict mode.")]
    OctalNumberNotAllowed,
    #[error("Invalid number.")]
    InvalidNumber,
    #[error("Missing exponent part.")]
    MissingExponent,
    #[error("Identifier cannot start after a number.")]
    IdentifierAfterNumber,
    #[error("Number is too long.")]
    NumberTooLong,

    // === Regular expressions ===
    #[error("Unterminated regular expression.")]
    UnterminatedRegexp,
    #[error("Regexp is too long.")]
    RegexpTooLong,
    #[error("Duplicated RegExp flag.")]
    DuplicatedRegexpFlag,
    #[error("Unknown RegExp flag.")]
    UnknownRegexpFlag,

    // === Resources ===
    #[error("Maximum number of literals reached.")]
    LiteralLimitReached,
    #[error("Out of memory.")]
    OutOfMemory,
}

impl From<PoolError> for LexErrorKind {
    fn from(err: PoolError) -> Self {
        match err {
            PoolError::LimitReached => LexErrorKind::LiteralLimitReached,
            PoolError::OutOfMemory => LexErrorKind::OutOfMemory,
        }
    }
}

impl LexError {
    /// Create an error at `position` / `offset`.
    #[cold]
    pub fn new(kind: LexErrorKind, position: Position, offset: usize) -> Self {
        Self {
            kind,
            position,
            offset,
            end_column: None,
        }
    }

    /// Create an unterminated string error, reported at the opening quote.
    #[cold]
    pub fn unterminated_string(quote: Position, offset: usize) -> Self {
        Self::new(LexErrorKind::UnterminatedString, quote, offset)
    }

    /// Create an unterminated comment error, reported at the `/*`.
    #[cold]
    pub fn unterminated_comment(comment_start: Position, offset: usize) -> Self {
        Self::new(LexErrorKind::UnterminatedMultilineComment, comment_start, offset)
    }

    /// Record where the offending text ends on the same line.
    #[must_use]
    pub fn with_end_column(mut self, end_column: u32) -> Self {
        if end_column > self.position.column {
            self.end_column = Some(end_column);
        }
        self
    }

    /// Number of columns the error covers (at least one).
    pub fn width(&self) -> usize {
        self.end_column
            .map_or(1, |end| (end - self.position.column) as usize)
    }
}
