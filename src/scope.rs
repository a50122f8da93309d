use std::fmt;

use crate::ast::Operation;

/// Classification of an evaluation failure.
///
/// `NotFound` is the distinguished recoverable condition — "this name or
/// operation legitimately has no match" — used as control flow by `&&`, `||`
/// and the mapping filter. The other kinds are fatal to the current run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No such name or no match; recoverable at the three control-flow
    /// sites, fatal elsewhere.
    NotFound,
    /// Malformed query text; carries the accumulated parser report.
    Syntax,
    /// Structurally impossible AST shape or malformed predicate operand.
    Runtime,
    /// A leaf scope was compared against an incompatible scope kind.
    TypeMismatch,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::NotFound => "Not Found",
            ErrorKind::Syntax => "Syntax Error",
            ErrorKind::Runtime => "Runtime Error",
            ErrorKind::TypeMismatch => "Type Mismatch",
        };
        f.write_str(s)
    }
}

/// Evaluation error: a kind plus a human-readable message.
///
/// The kind is tested by direct comparison (see [`Error::is_not_found`])
/// rather than by unwrapping a cause chain, so errors can be rewrapped with
/// context while remaining classifiable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Error {
            kind,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Error::new(ErrorKind::NotFound, message)
    }

    pub fn runtime(message: impl Into<String>) -> Self {
        Error::new(ErrorKind::Runtime, message)
    }

    pub fn type_mismatch(message: impl Into<String>) -> Self {
        Error::new(ErrorKind::TypeMismatch, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for Error {}

/// A point in the host's data graph.
///
/// This is the capability contract between the evaluator and the host: name
/// resolution, child enumeration, and comparison. The evaluator is its only
/// consumer and never constructs scope data itself; hosts implement it over
/// whatever storage they own. The reference adapters live in
/// [`crate::value`].
///
/// `resolve` and `apply` are the only operations a host scope must support
/// to participate fully; `all_names` matters only if recursive-descent
/// queries should traverse the host's data, and `leaf` only if the host has
/// scalar leaves that take part in comparisons.
///
/// The evaluator performs no cycle detection: a host graph reachable through
/// `resolve`/`all_names` must be acyclic.
pub trait Scope: fmt::Debug {
    /// Resolve a named child of this scope.
    ///
    /// A legitimate miss is reported as a NotFound-kind [`Error`].
    fn resolve(&self, name: &str) -> Result<Box<dyn Scope>, Error>;

    /// Every child name of this scope, in a stable order. Empty for leaves.
    fn all_names(&self) -> Vec<String> {
        Vec::new()
    }

    /// Run a comparison operation against another scope, returning the
    /// surviving scope on a match and a NotFound-kind error on "no match".
    fn apply(&self, op: Operation, other: &dyn Scope) -> Result<Box<dyn Scope>, Error>;

    /// Scalar view of this scope, if it is a leaf. Leaf adapters override
    /// this; it is how a leaf comparison reads the other side without
    /// downcasting.
    fn leaf(&self) -> Option<&str> {
        None
    }
}

/// Ordered fan-out of scopes produced by one operation.
///
/// Members keep the order in which they were evaluated. An empty `Scopes` is
/// a legal, well-formed scope: it has no names and every resolution reports
/// NotFound.
#[derive(Default)]
pub struct Scopes {
    scopes: Vec<Box<dyn Scope>>,
}

impl Scopes {
    pub fn new(scopes: Vec<Box<dyn Scope>>) -> Self {
        Scopes { scopes }
    }

    pub fn push(&mut self, scope: Box<dyn Scope>) {
        self.scopes.push(scope);
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }
}

impl Scope for Scopes {
    /// First member's successful resolution, skipping members that report
    /// NotFound. Any other error surfaces immediately.
    fn resolve(&self, name: &str) -> Result<Box<dyn Scope>, Error> {
        for scope in &self.scopes {
            match scope.resolve(name) {
                Ok(resolved) => return Ok(resolved),
                Err(err) if err.is_not_found() => continue,
                Err(err) => return Err(err),
            }
        }
        Err(Error::not_found(format!("no value {:?} found in scope", name)))
    }

    /// Every member's names, concatenated. Duplicates are permitted and
    /// order is preserved.
    fn all_names(&self) -> Vec<String> {
        self.scopes
            .iter()
            .flat_map(|scope| scope.all_names())
            .collect()
    }

    /// First member's successful result, else the last error encountered.
    fn apply(&self, op: Operation, other: &dyn Scope) -> Result<Box<dyn Scope>, Error> {
        let mut last = None;
        for scope in &self.scopes {
            match scope.apply(op, other) {
                Ok(result) => return Ok(result),
                Err(err) => last = Some(err),
            }
        }
        Err(last.unwrap_or_else(|| Error::not_found("no match")))
    }

    /// Delegates the scalar view to the first member that has one, so a
    /// fan-out of a single leaf still compares like that leaf.
    fn leaf(&self) -> Option<&str> {
        self.scopes.iter().find_map(|scope| scope.leaf())
    }
}

impl fmt::Debug for Scopes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scopes")
            .field("len", &self.scopes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{StringScope, Value};

    #[test]
    fn test_boxed_scopes_are_debuggable() {
        let scope: Box<dyn Scope> = Value::map(vec![("a", Value::from("1"))]).lift();
        assert!(!format!("{:?}", scope).is_empty());
    }

    #[test]
    fn test_empty_scopes_is_well_formed() {
        let scopes = Scopes::default();
        assert!(scopes.all_names().is_empty());
        let err = scopes.resolve("anything").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_resolve_skips_not_found_members() {
        let empty = Value::empty();
        let full = Value::map(vec![("name", Value::from("fred"))]);
        let scopes = Scopes::new(vec![empty.lift(), full.lift()]);

        let resolved = scopes.resolve("name").unwrap();
        assert_eq!(resolved.leaf(), Some("fred"));
    }

    #[test]
    fn test_all_names_concatenates_in_order() {
        let a = Value::map(vec![("b", Value::from("1")), ("a", Value::from("2"))]);
        let b = Value::map(vec![("a", Value::from("3"))]);
        let scopes = Scopes::new(vec![a.lift(), b.lift()]);

        assert_eq!(scopes.all_names(), vec!["a", "b", "a"]);
    }

    #[test]
    fn test_apply_surfaces_last_error() {
        let a = StringScope::new("a");
        let b = StringScope::new("b");
        let scopes = Scopes::new(vec![Box::new(a), Box::new(b)]);

        let err = scopes
            .apply(Operation::Equal, &StringScope::new("c"))
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
