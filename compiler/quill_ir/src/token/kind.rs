//! Token kinds.

use std::fmt;

/// Token kinds produced by the lexer.
///
/// Identifiers, strings, numbers, and regexps all share [`TokenKind::Literal`];
/// the token's [`LitLocation`](super::LitLocation) says which one it is.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    /// End of input. Repeats on every further request.
    EndOfStream,
    /// Identifier, string, number, or regexp.
    Literal,
    /// A segment of template literal text.
    TemplateLiteral,
    /// The `${` that opens a template substitution.
    TemplateSubstitution,

    // === Literal keywords ===
    True,
    False,
    Null,

    // === Punctuators ===
    LeftBrace,
    LeftParen,
    LeftSquare,
    RightBrace,
    RightParen,
    RightSquare,
    Dot,
    ThreeDots,
    Semicolon,
    Comma,
    Colon,
    QuestionMark,
    Arrow,

    Less,
    Greater,
    LessEqual,
    GreaterEqual,
    Equal,
    NotEqual,
    StrictEqual,
    StrictNotEqual,

    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    LeftShift,
    RightShift,
    UnsRightShift,
    BitAnd,
    BitOr,
    BitXor,
    BitNot,
    LogicalAnd,
    LogicalOr,
    LogicalNot,
    Increase,
    Decrease,

    Assign,
    AssignAdd,
    AssignSubtract,
    AssignMultiply,
    AssignDivide,
    AssignModulo,
    AssignLeftShift,
    AssignRightShift,
    AssignUnsRightShift,
    AssignBitAnd,
    AssignBitOr,
    AssignBitXor,

    // === Keywords ===
    Await,
    Break,
    Case,
    Catch,
    Class,
    Const,
    Continue,
    Debugger,
    Default,
    Delete,
    Do,
    Else,
    Enum,
    Export,
    Extends,
    Finally,
    For,
    Function,
    If,
    Import,
    In,
    Instanceof,
    New,
    Return,
    Super,
    Switch,
    This,
    Throw,
    Try,
    Typeof,
    Var,
    Void,
    While,
    With,

    // === Future reserved words in strict mode ===
    Implements,
    Interface,
    Let,
    Package,
    Private,
    Protected,
    Public,
    Static,
    Yield,

    // === Contextual, produced by property-name scanning ===
    /// `get` introducing an accessor.
    PropertyGetter,
    /// `set` introducing an accessor.
    PropertySetter,
    /// `constructor` inside a class body.
    ClassConstructor,
}

impl TokenKind {
    /// Reserved only in strict mode; outside strict mode the lexer keeps
    /// these as identifiers marked `literal_is_reserved`.
    #[inline]
    pub const fn is_future_strict_reserved(self) -> bool {
        matches!(
            self,
            TokenKind::Implements
                | TokenKind::Interface
                | TokenKind::Let
                | TokenKind::Package
                | TokenKind::Private
                | TokenKind::Protected
                | TokenKind::Public
                | TokenKind::Static
                | TokenKind::Yield
        )
    }

    /// `op=` forms, excluding plain `=`.
    #[inline]
    pub const fn is_compound_assign(self) -> bool {
        self.compound_assign_to_binary().is_some()
    }

    /// Map a compound assignment to its binary operator: `+=` to `+`,
    /// `>>>=` to `>>>`, and so on.
    pub const fn compound_assign_to_binary(self) -> Option<TokenKind> {
        Some(match self {
            TokenKind::AssignAdd => TokenKind::Add,
            TokenKind::AssignSubtract => TokenKind::Subtract,
            TokenKind::AssignMultiply => TokenKind::Multiply,
            TokenKind::AssignDivide => TokenKind::Divide,
            TokenKind::AssignModulo => TokenKind::Modulo,
            TokenKind::AssignLeftShift => TokenKind::LeftShift,
            TokenKind::AssignRightShift => TokenKind::RightShift,
            TokenKind::AssignUnsRightShift => TokenKind::UnsRightShift,
            TokenKind::AssignBitAnd => TokenKind::BitAnd,
            TokenKind::AssignBitOr => TokenKind::BitOr,
            TokenKind::AssignBitXor => TokenKind::BitXor,
            _ => return None,
        })
    }

    /// Source spelling for punctuators and keywords, a category name otherwise.
    pub const fn display_name(self) -> &'static str {
        match self {
            TokenKind::EndOfStream => "end of input",
            TokenKind::Literal => "literal",
            TokenKind::TemplateLiteral => "template literal",
            TokenKind::TemplateSubstitution => "${",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Null => "null",
            TokenKind::LeftBrace => "{",
            TokenKind::LeftParen => "(",
            TokenKind::LeftSquare => "[",
            TokenKind::RightBrace => "}",
            TokenKind::RightParen => ")",
            TokenKind::RightSquare => "]",
            TokenKind::Dot => ".",
            TokenKind::ThreeDots => "...",
            TokenKind::Semicolon => ";",
            TokenKind::Comma => ",",
            TokenKind::Colon => ":",
            TokenKind::QuestionMark => "?",
            TokenKind::Arrow => "=>",
            TokenKind::Less => "<",
            TokenKind::Greater => ">",
            TokenKind::LessEqual => "<=",
            TokenKind::GreaterEqual => ">=",
            TokenKind::Equal => "==",
            TokenKind::NotEqual => "!=",
            TokenKind::StrictEqual => "===",
            TokenKind::StrictNotEqual => "!==",
            TokenKind::Add => "+",
            TokenKind::Subtract => "-",
            TokenKind::Multiply => "*",
            TokenKind::Divide => "/",
            TokenKind::Modulo => "%",
            TokenKind::LeftShift => "<<",
            TokenKind::RightShift => ">>",
            TokenKind::UnsRightShift => ">>>",
            TokenKind::BitAnd => "&",
            TokenKind::BitOr => "|",
            TokenKind::BitXor => "^",
            TokenKind::BitNot => "~",
            TokenKind::LogicalAnd => "&&",
            TokenKind::LogicalOr => "||",
            TokenKind::LogicalNot => "!",
            TokenKind::Increase => "++",
            TokenKind::Decrease => "--",
            TokenKind::Assign => "=",
            TokenKind::AssignAdd => "+=",
            TokenKind::AssignSubtract => "-=",
            TokenKind::AssignMultiply => "*=",
            TokenKind::AssignDivide => "/=",
            TokenKind::AssignModulo => "%=",
            TokenKind::AssignLeftShift => "<<=",
            TokenKind::AssignRightShift => ">>=",
            TokenKind::AssignUnsRightShift => ">>>=",
            TokenKind::AssignBitAnd => "&=",
            TokenKind::AssignBitOr => "|=",
            TokenKind::AssignBitXor => "^=",
            TokenKind::Await => "await",
            TokenKind::Break => "break",
            TokenKind::Case => "case",
            TokenKind::Catch => "catch",
            TokenKind::Class => "class",
            TokenKind::Const => "const",
            TokenKind::Continue => "continue",
            TokenKind::Debugger => "debugger",
            TokenKind::Default => "default",
            TokenKind::Delete => "delete",
            TokenKind::Do => "do",
            TokenKind::Else => "else",
            TokenKind::Enum => "enum",
            TokenKind::Export => "export",
            TokenKind::Extends => "extends",
            TokenKind::Finally => "finally",
            TokenKind::For => "for",
            TokenKind::Function => "function",
            TokenKind::If => "if",
            TokenKind::Import => "import",
            TokenKind::In => "in",
            TokenKind::Instanceof => "instanceof",
            TokenKind::New => "new",
            TokenKind::Return => "return",
            TokenKind::Super => "super",
            TokenKind::Switch => "switch",
            TokenKind::This => "this",
            TokenKind::Throw => "throw",
            TokenKind::Try => "try",
            TokenKind::Typeof => "typeof",
            TokenKind::Var => "var",
            TokenKind::Void => "void",
            TokenKind::While => "while",
            TokenKind::With => "with",
            TokenKind::Implements => "implements",
            TokenKind::Interface => "interface",
            TokenKind::Let => "let",
            TokenKind::Package => "package",
            TokenKind::Private => "private",
            TokenKind::Protected => "protected",
            TokenKind::Public => "public",
            TokenKind::Static => "static",
            TokenKind::Yield => "yield",
            TokenKind::PropertyGetter => "get",
            TokenKind::PropertySetter => "set",
            TokenKind::ClassConstructor => "constructor",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
