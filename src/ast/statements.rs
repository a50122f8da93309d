use std::fmt;

use crate::ast::{Expr, Position, Token};

/// A single statement: one expression, terminated by an optional semicolon.
///
/// A statement with no expression renders as an empty statement; the parser
/// only produces one on a syntax error, in which case the whole parse fails
/// anyway.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    /// First token of the statement.
    pub token: Token,
    pub expression: Option<Expr>,
}

impl Statement {
    pub fn pos(&self) -> Position {
        self.token.pos
    }

    pub fn end(&self) -> Position {
        match &self.expression {
            Some(expr) => expr.end(),
            None => self.token.end(),
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.expression {
            Some(expr) => write!(f, "{};", expr),
            None => write!(f, ";"),
        }
    }
}
