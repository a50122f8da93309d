use std::fmt;

use crate::ast::{Position, Statement};

/// A complete parsed query: an ordered sequence of statements.
///
/// An empty sequence is permitted and evaluates to an empty result.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Query {
    pub statements: Vec<Statement>,
}

impl Query {
    pub fn pos(&self) -> Position {
        self.statements
            .first()
            .map(Statement::pos)
            .unwrap_or_default()
    }

    pub fn end(&self) -> Position {
        self.statements
            .last()
            .map(Statement::end)
            .unwrap_or_default()
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.statements {
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}
