//! # Abstract Syntax Tree
//!
//! This module defines the AST for the path query language: dotted
//! accessors, bracket predicates, recursive descent, and boolean/comparison
//! filters over hierarchical keyed data.
//!
//! ## Architecture Overview
//!
//! The AST module is organized into focused submodules:
//!
//! - **[tokens]** - Lexical tokens and source positions
//! - **[operators]** - The comparison operations scopes can run
//! - **[expressions]** - Expression nodes (identifiers, accessors, predicates)
//! - **[statements]** - Semicolon-separated statements
//! - **[query]** - The complete query
//!
//! ## Core Concepts
//!
//! A query is a sequence of expressions whose results fan out into one
//! combined scope:
//!
//! ```text
//! company.person[name == "fred"]
//! ```
//!
//! navigates to `company`, then `person`, then filters its entries to those
//! whose `name` is `"fred"`.
//!
//! ### Accessors
//!
//! `a.b` resolves `a` against the current scope and `b` inside the result —
//! chaining, not a compound key.
//!
//! ### Predicates
//!
//! `left[predicate]` narrows to `left` and evaluates the predicate there;
//! a bare `[predicate]` applies to the ambient scope.
//!
//! ### Descent
//!
//! `.name` searches every direct child of the current scope for `name`,
//! fanning all matches into one result. Descent composes: `..name` searches
//! one level deeper.
//!
//! ### Logical operators
//!
//! `&&` requires its left side to exist and fans both results out; `||`
//! falls back to its right side when the left fails.

pub mod expressions;
pub mod operators;
pub mod query;
pub mod statements;
pub mod tokens;

pub use expressions::Expr;
pub use operators::Operation;
pub use query::Query;
pub use statements::Statement;
pub use tokens::{Position, Token, TokenKind};
