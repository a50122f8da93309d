//! JSON rendering for query results.
//!
//! A result scope is opaque — the host may have implemented it over any
//! storage — so rendering walks the capability contract itself: a scope
//! with a scalar view becomes a JSON string, anything else becomes an
//! object built from `all_names`/`resolve`. Rendering shares the language's
//! caller obligation: the scope graph must be acyclic.
//!
//! # Examples
//!
//! ```
//! use pathlang::{to_json, Value};
//!
//! let scope = Value::map(vec![("name", Value::from("fred"))]).lift();
//! assert_eq!(to_json(scope.as_ref()), r#"{"name":"fred"}"#);
//! ```

use crate::scope::Scope;

/// Renders a scope into a JSON value.
///
/// Fan-out scopes may enumerate duplicate names; the first resolution wins.
/// A name that fails to resolve is skipped rather than aborting the render.
pub fn to_value(scope: &dyn Scope) -> serde_json::Value {
    if let Some(leaf) = scope.leaf() {
        return serde_json::Value::String(leaf.to_string());
    }

    let mut object = serde_json::Map::new();
    for name in scope.all_names() {
        if object.contains_key(&name) {
            continue;
        }
        if let Ok(child) = scope.resolve(&name) {
            object.insert(name, to_value(child.as_ref()));
        }
    }
    serde_json::Value::Object(object)
}

/// Renders a scope as compact JSON.
pub fn to_json(scope: &dyn Scope) -> String {
    to_value(scope).to_string()
}

/// Renders a scope as pretty-printed JSON.
pub fn to_json_pretty(scope: &dyn Scope) -> String {
    serde_json::to_string_pretty(&to_value(scope)).unwrap_or_else(|_| String::from("null"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::Scopes;
    use crate::value::Value;

    #[test]
    fn test_leaf_renders_as_string() {
        let scope = Value::from("fred").lift();
        assert_eq!(to_json(scope.as_ref()), r#""fred""#);
    }

    #[test]
    fn test_nested_map_renders_as_object() {
        let scope = Value::map(vec![(
            "person",
            Value::map(vec![("name", Value::from("fred"))]),
        )])
        .lift();
        assert_eq!(to_json(scope.as_ref()), r#"{"person":{"name":"fred"}}"#);
    }

    #[test]
    fn test_empty_fan_out_renders_as_empty_object() {
        let scopes = Scopes::default();
        assert_eq!(to_json(&scopes), "{}");
    }

    #[test]
    fn test_duplicate_fan_out_names_first_wins() {
        let a = Value::map(vec![("name", Value::from("first"))]);
        let b = Value::map(vec![("name", Value::from("second"))]);
        let scopes = Scopes::new(vec![a.lift(), b.lift()]);
        assert_eq!(to_json(&scopes), r#"{"name":"first"}"#);
    }
}
