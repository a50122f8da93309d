use std::collections::BTreeMap;

use crate::ast::Operation;
use crate::scope::{Error, Scope};

/// A raw host-held value backing the reference adapters.
///
/// The data model is a closed variant: a value is either a nested keyed
/// mapping or a scalar string leaf. [`Value::lift`] converts a value into
/// the matching [`Scope`] adapter; lifting is recursive and unbounded by
/// declared depth, so callers must supply acyclic structures.
///
/// # Examples
///
/// ```
/// use pathlang::{Scope, Value};
///
/// let root = Value::map(vec![
///     ("company", Value::map(vec![
///         ("person", Value::map(vec![
///             ("name", Value::from("fred")),
///         ])),
///     ])),
/// ]);
///
/// let scope = root.lift();
/// assert_eq!(scope.all_names(), vec!["company"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Scalar string leaf
    String(String),

    /// Nested keyed mapping
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// An empty mapping value.
    pub fn empty() -> Value {
        Value::Map(BTreeMap::new())
    }

    /// Builds a mapping value from key/value pairs.
    pub fn map<K, I>(entries: I) -> Value
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v))
                .collect(),
        )
    }

    /// Lifts this value into the matching scope adapter: a nested mapping
    /// becomes a [`MapScope`], a scalar string a [`StringScope`].
    pub fn lift(&self) -> Box<dyn Scope> {
        match self {
            Value::Map(entries) => Box::new(MapScope::new(entries.clone())),
            Value::String(s) => Box::new(StringScope::new(s.clone())),
        }
    }

    /// Converts an arbitrary JSON document into a value.
    ///
    /// Objects become mappings and strings stay strings. The remaining JSON
    /// types have no native representation here, so scalars take their
    /// display forms (`null`, `true`, `42`) and arrays become mappings keyed
    /// by element index.
    pub fn from_json(json: &serde_json::Value) -> Value {
        match json {
            serde_json::Value::Object(entries) => Value::Map(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), Value::from_json(v)))
                    .collect(),
            ),
            serde_json::Value::Array(items) => Value::Map(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, v)| (i.to_string(), Value::from_json(v)))
                    .collect(),
            ),
            serde_json::Value::String(s) => Value::String(s.clone()),
            other => Value::String(other.to_string()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(entries: BTreeMap<String, Value>) -> Self {
        Value::Map(entries)
    }
}

/// Reference adapter over a keyed mapping.
///
/// Resolving a name looks the key up and lifts the stored value into the
/// right child scope; an absent key reports NotFound. `apply` is the query
/// language's filter primitive: it keeps the entries whose lifted values
/// survive the comparison.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MapScope {
    entries: BTreeMap<String, Value>,
}

impl MapScope {
    pub fn new(entries: BTreeMap<String, Value>) -> Self {
        MapScope { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The raw value stored under a key, without lifting.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }
}

impl From<MapScope> for Value {
    fn from(scope: MapScope) -> Self {
        Value::Map(scope.entries)
    }
}

impl Scope for MapScope {
    fn resolve(&self, name: &str) -> Result<Box<dyn Scope>, Error> {
        match self.entries.get(name) {
            Some(value) => Ok(value.lift()),
            None => Err(Error::not_found(format!(
                "no value {:?} found in scope",
                name
            ))),
        }
    }

    fn all_names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// Filters the mapping: an entry is retained when its lifted value
    /// survives `lifted.apply(op, other)`. Nested mappings filter
    /// recursively, so a predicate like `name == "fred"` matches any entry
    /// whose own `name` compares equal. No surviving entry reports NotFound
    /// so that nested filters and `||` fallbacks compose.
    fn apply(&self, op: Operation, other: &dyn Scope) -> Result<Box<dyn Scope>, Error> {
        let mut result = BTreeMap::new();
        for (name, value) in &self.entries {
            if value.lift().apply(op, other).is_ok() {
                result.insert(name.clone(), value.clone());
            }
        }
        if result.is_empty() {
            return Err(Error::not_found("no match"));
        }
        Ok(Box::new(MapScope::new(result)))
    }
}

/// Reference adapter over one scalar string leaf.
///
/// A leaf has no children and resolves every name to itself, which is what
/// lets literals and already-resolved values chain through accessors.
/// Comparison is lexical over the string value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringScope {
    value: String,
}

impl StringScope {
    pub fn new(value: impl Into<String>) -> Self {
        StringScope {
            value: value.into(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl Scope for StringScope {
    fn resolve(&self, _name: &str) -> Result<Box<dyn Scope>, Error> {
        Ok(Box::new(self.clone()))
    }

    /// Lexical comparison against another leaf. Comparing against a
    /// non-leaf scope is a type mismatch; a failed comparison is an
    /// ordinary "no match".
    fn apply(&self, op: Operation, other: &dyn Scope) -> Result<Box<dyn Scope>, Error> {
        let Some(other) = other.leaf() else {
            return Err(Error::type_mismatch(
                "cannot compare a leaf against a non-leaf scope",
            ));
        };

        let matched = match op {
            Operation::Equal => self.value == other,
            Operation::NotEqual => self.value != other,
            Operation::LessThan => self.value.as_str() < other,
            Operation::LessEqual => self.value.as_str() <= other,
            Operation::GreaterThan => self.value.as_str() > other,
            Operation::GreaterEqual => self.value.as_str() >= other,
        };

        if matched {
            Ok(Box::new(self.clone()))
        } else {
            Err(Error::not_found("no match"))
        }
    }

    fn leaf(&self) -> Option<&str> {
        Some(&self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::ErrorKind;

    #[test]
    fn test_empty_map_has_no_entries() {
        let scope = Value::empty().lift();
        assert!(scope.all_names().is_empty());
        assert!(scope.resolve("a").unwrap_err().is_not_found());
    }

    #[test]
    fn test_lift_recurses() {
        let value = Value::map(vec![("inner", Value::from("leaf"))]);
        let scope = value.lift();

        let inner = scope.resolve("inner").unwrap();
        assert_eq!(inner.leaf(), Some("leaf"));
    }

    #[test]
    fn test_map_resolve_absent_key_is_not_found() {
        let scope = Value::map(vec![("a", Value::from("1"))]).lift();
        let err = scope.resolve("b").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_map_filter_retains_matching_entries() {
        let scope = Value::map(vec![
            ("k1", Value::map(vec![("name", Value::from("x"))])),
            ("k2", Value::map(vec![("name", Value::from("y"))])),
        ])
        .lift();

        let filtered = scope
            .apply(Operation::Equal, &StringScope::new("x"))
            .unwrap();
        assert_eq!(filtered.all_names(), vec!["k1"]);
    }

    #[test]
    fn test_map_filter_without_matches_is_not_found() {
        let scope = Value::map(vec![("k", Value::from("y"))]).lift();
        let err = scope
            .apply(Operation::Equal, &StringScope::new("x"))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_leaf_comparisons_are_lexical() {
        let scope = StringScope::new("abc");
        assert!(scope.apply(Operation::Equal, &StringScope::new("abc")).is_ok());
        assert!(scope.apply(Operation::LessThan, &StringScope::new("abd")).is_ok());
        assert!(scope.apply(Operation::GreaterEqual, &StringScope::new("abc")).is_ok());
        assert!(
            scope
                .apply(Operation::NotEqual, &StringScope::new("abc"))
                .unwrap_err()
                .is_not_found()
        );
    }

    #[test]
    fn test_leaf_against_map_is_type_mismatch() {
        let leaf = StringScope::new("x");
        let map = MapScope::default();
        let err = leaf.apply(Operation::Equal, &map).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_leaf_resolves_to_itself() {
        let leaf = StringScope::new("fred");
        let resolved = leaf.resolve("anything").unwrap();
        assert_eq!(resolved.leaf(), Some("fred"));
    }

    #[test]
    fn test_from_json() {
        let json: serde_json::Value =
            serde_json::from_str(r#"{"name": "fred", "age": 42, "tags": ["a", "b"]}"#).unwrap();
        let value = Value::from_json(&json);

        let scope = value.lift();
        assert_eq!(scope.resolve("name").unwrap().leaf(), Some("fred"));
        assert_eq!(scope.resolve("age").unwrap().leaf(), Some("42"));
        assert_eq!(scope.resolve("tags").unwrap().all_names(), vec!["0", "1"]);
    }
}
