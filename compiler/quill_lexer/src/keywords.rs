//! Keyword resolution.
//!
//! Keywords are 2 to 10 bytes long. Each length has its own table, sorted
//! by spelling, so a lookup is a bucket index plus a binary search over at
//! most ten entries. Only escape-free identifiers are looked up: an escaped
//! spelling of a keyword is a plain identifier.

use quill_ir::TokenKind;

type KeywordTable = &'static [(&'static [u8], TokenKind)];

const LENGTH_2: KeywordTable = &[
    (b"do", TokenKind::Do),
    (b"if", TokenKind::If),
    (b"in", TokenKind::In),
];

const LENGTH_3: KeywordTable = &[
    (b"for", TokenKind::For),
    (b"let", TokenKind::Let),
    (b"new", TokenKind::New),
    (b"try", TokenKind::Try),
    (b"var", TokenKind::Var),
];

const LENGTH_4: KeywordTable = &[
    (b"case", TokenKind::Case),
    (b"else", TokenKind::Else),
    (b"enum", TokenKind::Enum),
    (b"null", TokenKind::Null),
    (b"this", TokenKind::This),
    (b"true", TokenKind::True),
    (b"void", TokenKind::Void),
    (b"with", TokenKind::With),
];

const LENGTH_5: KeywordTable = &[
    (b"await", TokenKind::Await),
    (b"break", TokenKind::Break),
    (b"catch", TokenKind::Catch),
    (b"class", TokenKind::Class),
    (b"const", TokenKind::Const),
    (b"false", TokenKind::False),
    (b"super", TokenKind::Super),
    (b"throw", TokenKind::Throw),
    (b"while", TokenKind::While),
    (b"yield", TokenKind::Yield),
];

const LENGTH_6: KeywordTable = &[
    (b"delete", TokenKind::Delete),
    (b"export", TokenKind::Export),
    (b"import", TokenKind::Import),
    (b"public", TokenKind::Public),
    (b"return", TokenKind::Return),
    (b"static", TokenKind::Static),
    (b"switch", TokenKind::Switch),
    (b"typeof", TokenKind::Typeof),
];

const LENGTH_7: KeywordTable = &[
    (b"default", TokenKind::Default),
    (b"extends", TokenKind::Extends),
    (b"finally", TokenKind::Finally),
    (b"package", TokenKind::Package),
    (b"private", TokenKind::Private),
];

const LENGTH_8: KeywordTable = &[
    (b"continue", TokenKind::Continue),
    (b"debugger", TokenKind::Debugger),
    (b"function", TokenKind::Function),
];

const LENGTH_9: KeywordTable = &[
    (b"interface", TokenKind::Interface),
    (b"protected", TokenKind::Protected),
];

const LENGTH_10: KeywordTable = &[
    (b"implements", TokenKind::Implements),
    (b"instanceof", TokenKind::Instanceof),
];

/// Tables indexed by `length - 2`.
const BY_LENGTH: [KeywordTable; 9] = [
    LENGTH_2, LENGTH_3, LENGTH_4, LENGTH_5, LENGTH_6, LENGTH_7, LENGTH_8, LENGTH_9, LENGTH_10,
];

/// Look up a keyword by its exact spelling.
///
/// Future strict reserved words are returned too; the caller decides
/// whether they act as keywords.
#[inline]
pub(crate) fn lookup(ident: &[u8]) -> Option<TokenKind> {
    let table = BY_LENGTH.get(ident.len().checked_sub(2)?)?;
    let found = table.binary_search_by(|&(keyword, _)| keyword.cmp(ident)).ok()?;
    table.get(found).map(|&(_, kind)| kind)
}

/// Every keyword with its kind, shortest first.
#[cfg(test)]
pub(crate) fn all() -> impl Iterator<Item = (&'static [u8], TokenKind)> {
    BY_LENGTH.iter().flat_map(|table| table.iter().copied())
}
