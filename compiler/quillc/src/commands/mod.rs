//! CLI commands.
//!
//! Each command writes its report to `out` so tests can capture it.

mod lex;
mod literals;
mod opcodes;

pub use lex::lex_source;
pub use literals::literals_source;
pub use opcodes::list_opcodes;

use std::io;
use std::path::PathBuf;

use quill_bytecode::EmitError;
use quill_lexer::LexError;

/// A failed command.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("cannot read '{}': {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error("byte code emission failed: {0}")]
    Emit(#[from] EmitError),
    #[error(transparent)]
    Write(#[from] io::Error),
}

/// Read a source file as raw bytes.
pub fn read_source(path: &str) -> Result<Vec<u8>, CommandError> {
    std::fs::read(path).map_err(|source| CommandError::Read {
        path: PathBuf::from(path),
        source,
    })
}

/// Source text for display; invalid UTF-8 is replaced.
fn display_text(bytes: &[u8]) -> std::borrow::Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}
