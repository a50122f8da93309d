// tests/query_tests.rs

use std::cell::RefCell;
use std::rc::Rc;

use pathlang::{
    to_json, Error, ErrorKind, Operation, Path, Scope, Value,
};
use pathlang::value::StringScope;

fn people() -> Value {
    Value::map(vec![
        ("k1", Value::map(vec![("name", Value::from("x"))])),
        ("k2", Value::map(vec![("name", Value::from("y"))])),
    ])
}

fn run(input: &str, root: &Value) -> pathlang::Scopes {
    let path = Path::parse(input).expect("query should parse");
    path.run(root.lift().as_ref()).expect("query should run")
}

fn run_err(input: &str, root: &Value) -> Error {
    let path = Path::parse(input).expect("query should parse");
    path.run(root.lift().as_ref())
        .expect_err("query should fail")
}

// ============================================================================
// Accessors
// ============================================================================

#[test]
fn test_accessor_chain_narrows_scope() {
    let root = Value::map(vec![(
        "company",
        Value::map(vec![(
            "person",
            Value::map(vec![("name", Value::from("fred"))]),
        )]),
    )]);

    let result = run("company.person.name", &root);
    assert_eq!(result.leaf(), Some("fred"));
}

#[test]
fn test_quoted_key_is_a_flat_lookup() {
    let root = Value::map(vec![
        ("a.b", Value::from("flat")),
        ("a", Value::map(vec![("b", Value::from("nested"))])),
    ]);

    assert_eq!(run(r#""a.b""#, &root).leaf(), Some("flat"));
    assert_eq!(run("a.b", &root).leaf(), Some("nested"));
}

#[test]
fn test_missing_name_is_not_found() {
    let root = Value::map(vec![("company", Value::empty())]);
    let err = run_err("company.missing", &root);
    assert!(err.is_not_found());
}

// ============================================================================
// Predicates
// ============================================================================

#[test]
fn test_index_predicate_filters_entries() {
    let root = Value::map(vec![("a", people())]);
    let result = run(r#"a[name == "x"]"#, &root);
    assert_eq!(result.all_names(), vec!["k1"]);
}

#[test]
fn test_bare_access_filters_ambient_scope() {
    let result = run(r#"[name == "x"]"#, &people());
    assert_eq!(result.all_names(), vec!["k1"]);
}

#[test]
fn test_predicate_without_matches_is_not_found() {
    let root = Value::map(vec![("a", people())]);
    let err = run_err(r#"a[name == "z"]"#, &root);
    assert!(err.is_not_found());
}

#[test]
fn test_group_predicate_compares_resolved_value() {
    let root = Value::map(vec![(
        "company",
        Value::map(vec![(
            "person",
            Value::map(vec![("name", Value::from("fred"))]),
        )]),
    )]);

    let result = run(r#"company.person.(name == "fred")"#, &root);
    assert_eq!(result.leaf(), Some("fred"));

    let err = run_err(r#"company.person.(name == "bob")"#, &root);
    assert!(err.is_not_found());
}

#[test]
fn test_comparing_leaf_against_map_is_a_type_mismatch() {
    let root = Value::map(vec![
        ("a", Value::from("x")),
        ("b", Value::map(vec![("c", Value::from("y"))])),
    ]);

    let err = run_err("a == b", &root);
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
}

// ============================================================================
// Conditionals
// ============================================================================

#[test]
fn test_or_falls_back_on_not_found() {
    let root = Value::map(vec![("present", Value::from("yes"))]);
    let result = run("missing || present", &root);
    assert_eq!(result.leaf(), Some("yes"));
}

/// A scope that records every name resolved through it.
#[derive(Debug)]
struct Traced {
    inner: Value,
    log: Rc<RefCell<Vec<String>>>,
}

impl Scope for Traced {
    fn resolve(&self, name: &str) -> Result<Box<dyn Scope>, Error> {
        self.log.borrow_mut().push(name.to_string());
        self.inner.lift().resolve(name)
    }

    fn all_names(&self) -> Vec<String> {
        self.inner.lift().all_names()
    }

    fn apply(&self, op: Operation, other: &dyn Scope) -> Result<Box<dyn Scope>, Error> {
        self.inner.lift().apply(op, other)
    }
}

#[test]
fn test_or_short_circuits_on_success() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let traced = Traced {
        inner: Value::map(vec![("present", Value::from("yes"))]),
        log: Rc::clone(&log),
    };

    let path = Path::parse("present || missing").unwrap();
    let result = path.run(&traced).unwrap();

    assert_eq!(result.leaf(), Some("yes"));
    assert_eq!(*log.borrow(), vec!["present"]);
}

#[test]
fn test_and_requires_both_sides() {
    let root = Value::map(vec![("present", Value::from("yes"))]);
    let err = run_err("missing && present", &root);
    assert!(err.is_not_found());
}

#[test]
fn test_and_fans_out_both_results() {
    let root = Value::map(vec![
        ("a", Value::map(vec![("x", Value::from("1"))])),
        ("b", Value::map(vec![("y", Value::from("2"))])),
    ]);

    let result = run("a && b", &root);
    assert_eq!(result.all_names(), vec!["x", "y"]);
}

// ============================================================================
// Recursive descent
// ============================================================================

#[test]
fn test_descent_searches_direct_children() {
    let root = Value::map(vec![
        ("k1", Value::map(vec![("name", Value::from("x"))])),
        ("k2", Value::map(vec![("name", Value::from("y"))])),
        ("k3", Value::map(vec![("other", Value::from("z"))])),
    ]);

    let result = run(".name", &root);

    // Both matches are present; the child without a name contributed
    // nothing.
    assert!(result.apply(Operation::Equal, &StringScope::new("x")).is_ok());
    assert!(result.apply(Operation::Equal, &StringScope::new("y")).is_ok());
    assert!(
        result
            .apply(Operation::Equal, &StringScope::new("z"))
            .is_err()
    );
}

#[test]
fn test_descent_with_no_matches_is_empty() {
    let root = Value::map(vec![("k1", Value::empty())]);
    let result = run(".name", &root);
    assert!(result.all_names().is_empty());
}

// ============================================================================
// Statements and queries
// ============================================================================

#[test]
fn test_each_statement_contributes_a_result() {
    let root = Value::map(vec![
        ("a", Value::from("1")),
        ("b", Value::from("2")),
    ]);

    let result = run("a; b;", &root);
    assert_eq!(result.len(), 2);
}

#[test]
fn test_empty_query_yields_empty_result() {
    let result = run("", &people());
    assert_eq!(result.len(), 0);
}

#[test]
fn test_empty_group_yields_empty_scope() {
    let result = run("()", &people());
    assert_eq!(result.len(), 1);
    assert_eq!(to_json(&result), "{}");
}

#[test]
fn test_statement_error_aborts_the_run() {
    let err = run_err("k1; missing; k2", &people());
    assert!(err.is_not_found());
}

#[test]
fn test_runs_are_idempotent() {
    let root = Value::map(vec![("a", people())]);
    let path = Path::parse(r#"a[name == "x"]"#).unwrap();

    let scope = root.lift();
    let first = path.run(scope.as_ref()).unwrap();
    let second = path.run(scope.as_ref()).unwrap();

    assert_eq!(to_json(&first), to_json(&second));
}

// ============================================================================
// End to end through JSON
// ============================================================================

#[test]
fn test_json_in_json_out() {
    let json: serde_json::Value = serde_json::from_str(
        r#"{"a": {"k1": {"name": "x"}, "k2": {"name": "y"}}}"#,
    )
    .unwrap();
    let root = Value::from_json(&json);

    let result = run(r#"a[name == "x"]"#, &root);
    assert_eq!(to_json(&result), r#"{"k1":{"name":"x"}}"#);
}
