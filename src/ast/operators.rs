use crate::ast::TokenKind;

/// Comparison operations a scope can be asked to run.
///
/// Derived from the token kind of an infix expression at evaluation time;
/// the logical operators (`&&`, `||`) are handled structurally by the
/// evaluator and never reach a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Equal (`==`)
    Equal,
    /// Not equal (`!=`)
    NotEqual,
    /// Less than (`<`)
    LessThan,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than (`>`)
    GreaterThan,
    /// Greater than or equal (`>=`)
    GreaterEqual,
}

impl Operation {
    /// Map a comparison token kind onto its operation, if it has one.
    pub fn from_kind(kind: TokenKind) -> Option<Operation> {
        match kind {
            TokenKind::EqEq => Some(Operation::Equal),
            TokenKind::NotEq => Some(Operation::NotEqual),
            TokenKind::Lt => Some(Operation::LessThan),
            TokenKind::LtEq => Some(Operation::LessEqual),
            TokenKind::Gt => Some(Operation::GreaterThan),
            TokenKind::GtEq => Some(Operation::GreaterEqual),
            _ => None,
        }
    }
}
