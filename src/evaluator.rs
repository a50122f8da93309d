use std::fmt;

use crate::{
    ast::{Expr, Operation, Query, Token, TokenKind},
    lexer::Lexer,
    parser::{ParseError, Parser},
    scope::{Error, Scope, Scopes},
    value::StringScope,
};

/// A parsed, reusable query.
///
/// Parsing happens once; the resulting path can be run any number of times,
/// concurrently if the host's [`Scope`] is safe for concurrent reads. A run
/// never mutates host data and produces either a complete result scope or
/// an error — there is no partial result.
///
/// # Examples
///
/// ```
/// use pathlang::{Path, Scope, Value};
///
/// let root = Value::map(vec![
///     ("company", Value::map(vec![
///         ("person", Value::map(vec![
///             ("name", Value::from("fred")),
///         ])),
///     ])),
/// ]);
///
/// let path = Path::parse("company.person.name").unwrap();
/// let result = path.run(root.lift().as_ref()).unwrap();
/// assert_eq!(result.leaf(), Some("fred"));
/// ```
pub struct Path {
    ast: Query,
}

impl Path {
    /// Parses a query into a reusable path, or fails with the accumulated
    /// syntax-error report.
    pub fn parse(input: &str) -> Result<Path, ParseError> {
        let parser = Parser::new(Lexer::new(input));
        let ast = parser.run()?;
        Ok(Path { ast })
    }

    /// The parsed query.
    pub fn query(&self) -> &Query {
        &self.ast
    }

    /// Runs the query over the given root scope.
    ///
    /// Every statement is evaluated against the same root; all results fan
    /// out into one combined scope. Statement errors abort the run.
    pub fn run(&self, scope: &dyn Scope) -> Result<Scopes, Error> {
        let mut results: Vec<Box<dyn Scope>> = Vec::new();
        for stmt in &self.ast.statements {
            if let Some(expr) = &stmt.expression {
                results.push(self.eval(expr, scope)?);
            }
        }
        Ok(Scopes::new(results))
    }

    fn eval(&self, expr: &Expr, scope: &dyn Scope) -> Result<Box<dyn Scope>, Error> {
        match expr {
            Expr::Identifier(token) | Expr::String(token) => scope.resolve(&token.literal),

            // Scope-chaining: resolve the right side inside whatever the
            // left side narrowed to.
            Expr::Accessor { left, right, .. } => {
                let narrowed = self.eval(left, scope)?;
                self.eval(right, narrowed.as_ref())
            }

            Expr::Index { left, index, .. } => {
                let narrowed = self.eval(left, scope)?;
                self.eval(index, narrowed.as_ref())
            }

            Expr::Access { index, .. } => self.eval(index, scope),

            // Search every direct child for the right side. A child that
            // fails contributes nothing; failure to resolve an enumerated
            // name aborts the whole descent.
            Expr::Descent { right, .. } => {
                let mut results: Vec<Box<dyn Scope>> = Vec::new();
                for name in scope.all_names() {
                    let child = scope.resolve(&name)?;
                    if let Ok(result) = self.eval(right, child.as_ref()) {
                        results.push(result);
                    }
                }
                Ok(Box::new(Scopes::new(results)))
            }

            Expr::Infix { token, left, right } => self.eval_infix(token, left, right, scope),

            Expr::Empty(_) => Ok(Box::new(Scopes::default())),
        }
    }

    fn eval_infix(
        &self,
        token: &Token,
        left: &Expr,
        right: &Expr,
        scope: &dyn Scope,
    ) -> Result<Box<dyn Scope>, Error> {
        match token.kind {
            // Conjunction requires the left side to exist; a NotFound left
            // operand propagates. Both results then contribute downstream,
            // so the conjunction fans them out.
            TokenKind::CondAnd => {
                let lhs = self.eval(left, scope)?;
                let rhs = self.eval(right, scope)?;
                Ok(Box::new(Scopes::new(vec![lhs, rhs])))
            }

            // Short-circuit on the first success; any left failure falls
            // back to the right side.
            TokenKind::CondOr => match self.eval(left, scope) {
                Ok(lhs) => Ok(lhs),
                Err(_) => self.eval(right, scope),
            },

            kind => {
                let Some(op) = Operation::from_kind(kind) else {
                    return Err(Error::runtime(format!(
                        "unexpected operator '{}' {}",
                        token, token.pos
                    )));
                };

                // A left operand that resolves compares directly. One that
                // legitimately has no match turns the comparison into a
                // filter over the ambient scope's entries, which is what
                // makes `a[name == "x"]` select the matching entries of
                // `a`.
                let lhs = match self.eval_operand(left, scope) {
                    Ok(lhs) => Some(lhs),
                    Err(err) if err.is_not_found() => None,
                    Err(err) => return Err(err),
                };
                let rhs = self.eval_operand(right, scope)?;

                match lhs {
                    Some(lhs) => lhs.apply(op, rhs.as_ref()),
                    None => scope.apply(op, rhs.as_ref()),
                }
            }
        }
    }

    /// Comparison operands: a string literal stands for its own text as a
    /// leaf scope; everything else evaluates as usual.
    fn eval_operand(&self, expr: &Expr, scope: &dyn Scope) -> Result<Box<dyn Scope>, Error> {
        match expr {
            Expr::String(token) => Ok(Box::new(StringScope::new(token.literal.clone()))),
            _ => self.eval(expr, scope),
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ast)
    }
}
