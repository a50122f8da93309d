use std::fmt;

use crate::{
    ast::{Expr, Position, Query, Statement, Token, TokenKind},
    lexer::Lexer,
    scope::{Error, ErrorKind},
};

/// One recorded syntax error with the position it was found at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub pos: Position,
    pub message: String,
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Syntax Error:{} {}", self.pos, self.message)
    }
}

/// Accumulated report of every syntax error found in a query.
///
/// The parser keeps going after an error so one run reports them all; a
/// query that produced any never evaluates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    errors: Vec<SyntaxError>,
}

impl ParseError {
    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .errors
            .iter()
            .map(SyntaxError::to_string)
            .collect::<Vec<_>>()
            .join("\n");
        f.write_str(&joined)
    }
}

impl std::error::Error for ParseError {}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Error::new(ErrorKind::Syntax, err.to_string())
    }
}

/// Binding power of the infix operators, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Lowest,
    CondOr,
    CondAnd,
    Equals,
    LessGreater,
    Call,
    Index,
}

fn precedence_of(kind: TokenKind) -> Precedence {
    match kind {
        TokenKind::CondOr => Precedence::CondOr,
        TokenKind::CondAnd => Precedence::CondAnd,
        TokenKind::EqEq | TokenKind::NotEq => Precedence::Equals,
        TokenKind::Lt | TokenKind::LtEq | TokenKind::Gt | TokenKind::GtEq => {
            Precedence::LessGreater
        }
        TokenKind::LParen => Precedence::Call,
        TokenKind::Period | TokenKind::LBracket => Precedence::Index,
        _ => Precedence::Lowest,
    }
}

/// Precedence-climbing recursive descent parser with one token of
/// lookahead, consuming the lexer's token stream.
pub struct Parser {
    lexer: Lexer,
    errors: Vec<SyntaxError>,
    current: Token,
    peek: Token,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Self {
        let current = lexer.next_token();
        let peek = lexer.next_token();
        Parser {
            lexer,
            errors: Vec::new(),
            current,
            peek,
        }
    }

    /// Runs the parser to the end of input, accumulating statements into a
    /// query. Fails with the joined report if any syntax error was
    /// recorded along the way.
    pub fn run(mut self) -> Result<Query, ParseError> {
        let mut query = Query::default();
        while self.current.kind != TokenKind::Eof {
            query.statements.push(self.parse_statement());
            self.next_token();
        }
        if self.errors.is_empty() {
            Ok(query)
        } else {
            Err(ParseError {
                errors: self.errors,
            })
        }
    }

    fn next_token(&mut self) {
        self.current = std::mem::replace(&mut self.peek, self.lexer.next_token());
    }

    fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek.kind == kind
    }

    fn current_precedence(&self) -> Precedence {
        precedence_of(self.current.kind)
    }

    fn peek_precedence(&self) -> Precedence {
        precedence_of(self.peek.kind)
    }

    fn error(&mut self, pos: Position, message: String) {
        self.errors.push(SyntaxError { pos, message });
    }

    fn parse_statement(&mut self) -> Statement {
        let token = self.current.clone();
        let expression = self.parse_expression(Precedence::Lowest);
        if self.peek_is(TokenKind::Semicolon) {
            self.next_token();
        }
        Statement { token, expression }
    }

    fn parse_expression(&mut self, precedence: Precedence) -> Option<Expr> {
        let mut left = self.parse_prefix()?;

        // Keep consuming infix operators while the next one binds tighter.
        while !self.peek_is(TokenKind::Semicolon) && precedence < self.peek_precedence() {
            left = match self.peek.kind {
                TokenKind::EqEq
                | TokenKind::NotEq
                | TokenKind::Lt
                | TokenKind::LtEq
                | TokenKind::Gt
                | TokenKind::GtEq
                | TokenKind::CondAnd
                | TokenKind::CondOr => {
                    self.next_token();
                    self.parse_infix(left)?
                }
                TokenKind::Period => {
                    self.next_token();
                    self.parse_accessor(left)?
                }
                TokenKind::LBracket => {
                    self.next_token();
                    self.parse_index(left)?
                }
                _ => return Some(left),
            };
        }

        Some(left)
    }

    fn parse_prefix(&mut self) -> Option<Expr> {
        match self.current.kind {
            TokenKind::Ident => Some(Expr::Identifier(self.current.clone())),
            TokenKind::String => Some(Expr::String(self.current.clone())),
            TokenKind::LParen => self.parse_group(),
            TokenKind::LBracket => self.parse_access(),
            TokenKind::Period => self.parse_descent(),
            // End of input mid-expression is reported by whoever needed the
            // expression, with a better message than "invalid <EOF>".
            TokenKind::Eof => None,
            _ => {
                let pos = self.current.pos;
                let message = format!("invalid character '{}' found", self.current);
                self.error(pos, message);
                None
            }
        }
    }

    /// Parses an expression that must be present, reporting a missing
    /// operand where the sub-parse consumed nothing reportable.
    fn parse_required(&mut self, precedence: Precedence, after: &Token) -> Option<Expr> {
        let before = self.errors.len();
        let expr = self.parse_expression(precedence);
        if expr.is_none() && self.errors.len() == before {
            self.error(after.pos, format!("missing expression after '{}'", after));
        }
        expr
    }

    fn parse_infix(&mut self, left: Expr) -> Option<Expr> {
        let token = self.current.clone();
        let precedence = self.current_precedence();
        self.next_token();
        let right = self.parse_required(precedence, &token)?;
        Some(Expr::Infix {
            token,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    fn parse_accessor(&mut self, left: Expr) -> Option<Expr> {
        let token = self.current.clone();
        let precedence = self.current_precedence();
        self.next_token();
        let right = self.parse_required(precedence, &token)?;
        Some(Expr::Accessor {
            token,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    fn parse_group(&mut self) -> Option<Expr> {
        let token = self.current.clone();
        if self.peek_is(TokenKind::RParen) {
            self.next_token();
            return Some(Expr::Empty(token));
        }

        self.next_token();
        let expr = self.parse_expression(Precedence::Lowest);
        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }
        expr
    }

    fn parse_access(&mut self) -> Option<Expr> {
        let token = self.current.clone();
        self.next_token();
        let index = self.parse_bracketed(&token)?;
        Some(Expr::Access {
            token,
            index: Box::new(index),
        })
    }

    fn parse_index(&mut self, left: Expr) -> Option<Expr> {
        let token = self.current.clone();
        self.next_token();
        let index = self.parse_bracketed(&token)?;
        Some(Expr::Index {
            token,
            left: Box::new(left),
            index: Box::new(index),
        })
    }

    /// Parses the predicate between brackets; the opening bracket has been
    /// consumed. An empty predicate is a syntax error, not a silently-empty
    /// one.
    fn parse_bracketed(&mut self, opening: &Token) -> Option<Expr> {
        if self.current.kind == TokenKind::RBracket {
            let pos = self.current.pos;
            let message = format!("missing index, got {} instead", self.current.kind);
            self.error(pos, message);
            return None;
        }

        let index = self.parse_required(Precedence::Lowest, opening)?;

        if !self.peek_is(TokenKind::RBracket) {
            let pos = self.peek.pos;
            let message = format!("expected ']', got {} instead", self.peek.kind);
            self.error(pos, message);
            return None;
        }
        self.next_token();
        Some(index)
    }

    fn parse_descent(&mut self) -> Option<Expr> {
        let token = self.current.clone();
        self.next_token();
        let right = self.parse_required(Precedence::Lowest, &token)?;
        Some(Expr::Descent {
            token,
            right: Box::new(right),
        })
    }

    fn expect_peek(&mut self, kind: TokenKind) -> bool {
        if self.peek_is(kind) {
            self.next_token();
            return true;
        }
        let pos = self.peek.pos;
        let message = format!(
            "expected token to be {}, got {} instead",
            kind, self.peek.kind
        );
        self.error(pos, message);
        false
    }
}
