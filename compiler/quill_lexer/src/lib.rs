//! Lexer for quill.
//!
//! A [`Lexer`] is the per-compilation-unit scanning context. It owns the
//! source cursor, the single current [`Token`], the unit's
//! [`CompileFlags`], and its [`LiteralPool`]. The parser drives it one
//! token at a time:
//!
//! - [`Lexer::next_token`] scans the next token
//! - `expect_identifier`, `scan_identifier`, and `expect_object_literal_id`
//!   scan in binding and property-name positions
//! - `construct_*_object` turn the current token into pool entries
//! - `check_next_character` and `check_arrow` peek without consuming
//!
//! Every failure is a fatal [`LexError`]; nothing is recovered.

mod compare;
mod escape;
mod expect;
mod ident;
mod keywords;
mod lex_error;
mod literal;
mod lookahead;
mod number;
mod regexp;
mod scan;
mod skip;
mod string;

pub use compare::identifiers_equal;
pub use escape::{decode_literal, DecodeBuffer, LOCAL_BUFFER_SIZE};
pub use expect::{ObjectIdentOptions, PropertyKey};
pub use lex_error::{LexError, LexErrorKind};
pub use literal::{FunctionParser, LiteralObject, LiteralObjectKind, NumberObject};
pub use number::parse_number_value;

use quill_ir::{
    CompileFlags, LiteralPool, PoolError, Position, Span, Token, TokenExtra, TokenFlags,
    TokenKind,
};
use quill_lexer_core::char_class::is_identifier_start;
use quill_lexer_core::SourceCursor;

/// Per-unit lexer settings.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LexerOptions {
    /// Scan as strict mode code.
    pub strict: bool,
    /// The unit is nested in a `with` statement.
    pub inside_with: bool,
    /// Calls must resolve their base object at run time.
    pub resolve_base_for_calls: bool,
    /// Line of the first source byte.
    pub start_line: u32,
    /// Column of the first source byte.
    pub start_column: u32,
}

impl Default for LexerOptions {
    fn default() -> Self {
        LexerOptions {
            strict: false,
            inside_with: false,
            resolve_base_for_calls: false,
            start_line: Position::START.line,
            start_column: Position::START.column,
        }
    }
}

impl LexerOptions {
    /// Default options in strict mode.
    pub fn strict() -> Self {
        LexerOptions {
            strict: true,
            ..Self::default()
        }
    }

    /// The compile flags a unit starts with.
    pub fn compile_flags(&self) -> CompileFlags {
        let mut flags = CompileFlags::empty();
        flags.set(CompileFlags::IS_STRICT, self.strict);
        flags.set(CompileFlags::INSIDE_WITH, self.inside_with);
        flags.set(
            CompileFlags::RESOLVE_BASE_FOR_CALLS,
            self.resolve_base_for_calls,
        );
        flags
    }
}

/// Scanning context of one compilation unit.
pub struct Lexer<'src> {
    cursor: SourceCursor<'src>,
    token: Token,
    flags: CompileFlags,
    pool: LiteralPool<'src>,
    lit_object: Option<LiteralObject>,
    /// Brace depth inside each open template substitution, innermost last.
    templates: Vec<u32>,
    /// The last template segment stopped at `${`.
    pending_substitution: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src [u8], options: LexerOptions) -> Self {
        Self::with_pool(source, options, LiteralPool::new())
    }

    /// Create a lexer that interns into an existing pool.
    pub fn with_pool(source: &'src [u8], options: LexerOptions, pool: LiteralPool<'src>) -> Self {
        let cursor = SourceCursor::with_position(source, options.start_line, options.start_column);
        Lexer {
            cursor,
            token: Token::initial(Position::new(options.start_line, options.start_column)),
            flags: options.compile_flags(),
            pool,
            lit_object: None,
            templates: Vec::new(),
            pending_substitution: false,
        }
    }

    /// Scan all of `source`, returning every token up to and including
    /// the end-of-stream token.
    #[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
    pub fn tokenize(source: &'src [u8], options: LexerOptions) -> Result<Vec<Token>, LexError> {
        let mut lexer = Lexer::new(source, options);
        let mut tokens = Vec::new();
        loop {
            lexer.next_token()?;
            tokens.push(lexer.token);
            if lexer.token.kind == TokenKind::EndOfStream {
                return Ok(tokens);
            }
        }
    }

    /// The current token.
    #[inline]
    pub fn token(&self) -> &Token {
        &self.token
    }

    /// Raw source text of the current token.
    pub fn token_text(&self) -> &'src [u8] {
        self.cursor
            .source()
            .get(self.token.span.to_range())
            .unwrap_or_default()
    }

    #[inline]
    pub fn source(&self) -> &'src [u8] {
        self.cursor.source()
    }

    /// Line and column of the next unscanned byte.
    pub fn position(&self) -> Position {
        Position::new(self.cursor.line(), self.cursor.column())
    }

    #[inline]
    pub fn flags(&self) -> CompileFlags {
        self.flags
    }

    /// The unit's flags, for the parser to update as it learns more.
    #[inline]
    pub fn flags_mut(&mut self) -> &mut CompileFlags {
        &mut self.flags
    }

    #[inline]
    pub fn pool(&self) -> &LiteralPool<'src> {
        &self.pool
    }

    #[inline]
    pub fn pool_mut(&mut self) -> &mut LiteralPool<'src> {
        &mut self.pool
    }

    pub fn into_pool(self) -> LiteralPool<'src> {
        self.pool
    }

    /// The literal most recently constructed.
    #[inline]
    pub fn lit_object(&self) -> Option<LiteralObject> {
        self.lit_object
    }

    /// Reset the per-token state at the cursor. Flags are left to the
    /// skipper.
    fn begin_token(&mut self) {
        let start = self.cursor.pos();
        self.token.kind = TokenKind::EndOfStream;
        self.token.position = self.position();
        self.token.span = Span::new(start, start);
        self.token.lit_location = None;
        self.token.extra = TokenExtra::None;
        self.token.literal_is_reserved = false;
    }

    /// Commit a scanned token ending at `cursor`.
    fn finish_token(&mut self, kind: TokenKind, cursor: SourceCursor<'src>) {
        self.cursor = cursor;
        self.token.kind = kind;
        self.token.span.end = cursor.pos();
        tracing::trace!(kind = ?kind, position = %self.token.position, "token");
    }

    /// The byte at the cursor can start an identifier (or an escape).
    fn at_identifier_start(&self) -> bool {
        let rest = self.cursor.rest();
        rest.first() == Some(&b'\\') || is_identifier_start(rest)
    }

    /// Keep the flags of the last skip for the next scan.
    fn keep_skipped_spaces(&mut self) {
        self.token.flags.set(TokenFlags::NO_SKIP_SPACES);
    }

    #[inline]
    fn is_strict(&self) -> bool {
        self.flags.contains(CompileFlags::IS_STRICT)
    }

    /// An error at the current token.
    #[cold]
    fn error(&self, kind: LexErrorKind) -> LexError {
        tracing::debug!(?kind, position = %self.token.position, "lex error");
        LexError::new(kind, self.token.position, self.token.span.start)
    }

    /// An error at the current token, underlined up to `cursor`.
    #[cold]
    fn error_until(&self, kind: LexErrorKind, cursor: &SourceCursor<'_>) -> LexError {
        let err = self.error(kind);
        if cursor.line() == err.position.line {
            err.with_end_column(cursor.column())
        } else {
            err
        }
    }

    /// An error at the cursor's position.
    #[cold]
    fn error_at(&self, kind: LexErrorKind, cursor: &SourceCursor<'_>) -> LexError {
        let position = Position::new(cursor.line(), cursor.column());
        tracing::debug!(?kind, %position, "lex error");
        LexError::new(kind, position, cursor.pos())
    }

    #[cold]
    fn pool_error(&self, err: PoolError) -> LexError {
        self.error(err.into())
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
mod tests;
