use std::fmt;

use crate::ast::{Position, Token};

/// Abstract Syntax Tree node representing a parsed expression.
///
/// Nodes are immutable once built and own their children outright; a tree
/// can be evaluated any number of times. End positions are computed from the
/// rightmost child rather than stored.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Bare name, resolved against the current scope.
    ///
    /// # Example
    /// ```text
    /// company
    /// ```
    Identifier(Token),

    /// String literal.
    ///
    /// Resolved against the current scope like an identifier, except as a
    /// comparison operand where it stands for its own text.
    ///
    /// # Example
    /// ```text
    /// "fred"
    /// ```
    String(Token),

    /// Binary operator expression.
    ///
    /// The operator is one of `== != < <= > >= && ||`, identified by the
    /// token kind.
    ///
    /// # Example
    /// ```text
    /// name == "fred"
    /// ```
    Infix {
        token: Token,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Dotted accessor chain `left.right`.
    ///
    /// Scope-chaining: `right` is evaluated inside the scope `left`
    /// produced, not a compound-key lookup.
    ///
    /// # Example
    /// ```text
    /// company.person
    /// ```
    Accessor {
        token: Token,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Bracket predicate scoped to an explicit target: `left[index]`.
    ///
    /// # Example
    /// ```text
    /// person[name == "fred"]
    /// ```
    Index {
        token: Token,
        left: Box<Expr>,
        index: Box<Expr>,
    },

    /// Bracket predicate with no explicit target, applied to the ambient
    /// scope: `[index]`.
    ///
    /// # Example
    /// ```text
    /// [name == "fred"]
    /// ```
    Access { token: Token, index: Box<Expr> },

    /// Leading-dot recursive descent: search every direct child of the
    /// current scope for `right`.
    ///
    /// # Example
    /// ```text
    /// .name
    /// ```
    Descent { token: Token, right: Box<Expr> },

    /// The literal `()`; evaluates to an empty result.
    Empty(Token),
}

impl Expr {
    /// Position of the node's first token.
    pub fn pos(&self) -> Position {
        match self {
            Expr::Identifier(token) | Expr::String(token) | Expr::Empty(token) => token.pos,
            Expr::Infix { token, .. }
            | Expr::Accessor { token, .. }
            | Expr::Index { token, .. }
            | Expr::Access { token, .. }
            | Expr::Descent { token, .. } => token.pos,
        }
    }

    /// Position just past the node's rightmost child.
    pub fn end(&self) -> Position {
        match self {
            Expr::Identifier(token) | Expr::String(token) | Expr::Empty(token) => token.end(),
            Expr::Infix { right, .. } => right.end(),
            Expr::Accessor { right, .. } => right.end(),
            Expr::Index { index, .. } => index.end(),
            Expr::Access { index, .. } => index.end(),
            Expr::Descent { right, .. } => right.end(),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Identifier(token) => write!(f, "{}", token.literal),
            Expr::String(token) => write!(f, "{:?}", token.literal),
            Expr::Infix {
                token, left, right, ..
            } => write!(f, "({} {} {})", left, token, right),
            Expr::Accessor { left, right, .. } => write!(f, "{}.{}", left, right),
            Expr::Index { left, index, .. } => write!(f, "({}[{}])", left, index),
            Expr::Access { index, .. } => write!(f, "([{}])", index),
            Expr::Descent { right, .. } => write!(f, "(.{})", right),
            Expr::Empty(_) => write!(f, "()"),
        }
    }
}
