use std::fmt;

/// Location of a token within the query text.
///
/// Lines and columns are 1-based; the offset is the byte offset of the
/// token's first character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        Position {
            offset,
            line,
            column,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<:{}:{}>", self.line, self.column)
    }
}

/// Kind of a lexical token.
///
/// `Unknown` is a valid token value, not a lexing failure; it only becomes
/// an error once the parser finds no use for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// End of input. Returned indefinitely once the input is exhausted.
    Eof,

    /// Identifier
    ///
    /// Starts with a letter or underscore, continues with letters, digits,
    /// or underscores.
    ///
    /// # Examples
    /// ```text
    /// name
    /// _internal
    /// über
    /// ```
    Ident,

    /// String literal enclosed in double quotes, no escape sequences.
    ///
    /// # Examples
    /// ```text
    /// "fred"
    /// "a b c"
    /// ```
    String,

    /// Bitwise AND (`&`)
    ///
    /// Reserved for forward compatibility; the parser does not consume it.
    BitAnd,

    /// Bitwise OR (`|`)
    ///
    /// Reserved for forward compatibility; the parser does not consume it.
    BitOr,

    /// Logical AND (`&&`)
    CondAnd,

    /// Logical OR (`||`)
    CondOr,

    /// Equality (`==`)
    EqEq,

    /// Inequality (`!=`)
    NotEq,

    /// Less than (`<`)
    Lt,

    /// Less than or equal (`<=`)
    LtEq,

    /// Greater than (`>`)
    Gt,

    /// Greater than or equal (`>=`)
    GtEq,

    /// Left parenthesis for grouping
    LParen,

    /// Right parenthesis
    RParen,

    /// Left bracket for predicates
    LBracket,

    /// Right bracket
    RBracket,

    /// Dot for accessor chains and recursive descent
    Period,

    /// Statement separator
    Semicolon,

    /// Anything the lexer has no rule for.
    Unknown,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenKind::Eof => "<EOF>",
            TokenKind::Ident => "<IDENT>",
            TokenKind::String => "<STRING>",
            TokenKind::BitAnd => "&",
            TokenKind::BitOr => "|",
            TokenKind::CondAnd => "&&",
            TokenKind::CondOr => "||",
            TokenKind::EqEq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::Lt => "<",
            TokenKind::LtEq => "<=",
            TokenKind::Gt => ">",
            TokenKind::GtEq => ">=",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Period => ".",
            TokenKind::Semicolon => ";",
            TokenKind::Unknown => "<UNKNOWN>",
        };
        f.write_str(s)
    }
}

/// A token produced by the lexer: its kind, the matched literal text, and
/// the position at which it started.
///
/// For string tokens the literal is the content with the quotes stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub pos: Position,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>, pos: Position) -> Self {
        Token {
            kind,
            literal: literal.into(),
            pos,
        }
    }

    /// End position of the token, one past its last character.
    ///
    /// A string literal has its quotes stripped, so both delimiters are
    /// added back in; an unterminated string keeps its opening quote in the
    /// literal and needs no correction.
    pub fn end(&self) -> Position {
        let delimiters = match self.kind {
            TokenKind::String => 2,
            _ => 0,
        };
        Position {
            offset: self.pos.offset + self.literal.len() + delimiters,
            line: self.pos.line,
            column: self.pos.column + self.literal.chars().count() + delimiters,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Ident | TokenKind::String | TokenKind::Unknown => {
                write!(f, "{}", self.literal)
            }
            kind => write!(f, "{}", kind),
        }
    }
}
