//! # Search Query Language - Abstract Syntax Tree
//!
//! This module defines the tokens and the query model of the search
//! expression language: a short textual filter that selects entities from a
//! search index.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[operators]** - Keywords, comparison operators, connectives, sort directions
//! - **[field]** - Field types and the operators each type allows
//! - **[expressions]** - Comparison leaves and `and`/`or` composites
//! - **[criteria]** - Expression tree plus ordering and pagination
//! - **[query]** - Targets plus criteria: the parser's output
//!
//! ## Quick Start
//!
//! ```text
//! from product where text name contains "bolt" and integer qty > 10 order_by decimal price desc max_results 20
//! ```
//!
//! ## Clauses
//!
//! All clauses are optional and may appear in any order:
//!
//! - **from** `a`, `*` or `(a, b, c)` - entities to search, `*` when omitted
//! - **where** conditions joined by `and` / `or`, grouped with parentheses
//! - **order_by** `[type] field [asc|desc]` - only with a single entity
//! - **offset** / **max_results** - pagination bounds
//!
//! ## Field Types
//!
//! A field may be prefixed by its type, either as a separate word
//! (`integer qty`) or dotted (`integer.qty`). Untyped fields are `text`.
//! The type restricts the operators:
//!
//! | Type | Operators |
//! |---|---|
//! | text | `contains`, `not contains`, `=`, `<>` |
//! | integer, decimal, datetime | `>`, `>=`, `<`, `<=`, `=`, `<>`, `in`, `not in` |
//!
//! ## Mixing Connectives
//!
//! Conditions inside one pair of parentheses must all be joined by the
//! same connective:
//!
//! ```text
//! where (integer a = 1 and integer b = 2) or integer c = 3     // ok
//! where (integer a = 1 and integer b = 2 or integer c = 3)     // error
//! ```
pub mod criteria;
pub mod expressions;
pub mod field;
pub mod operators;
pub mod query;
pub mod tokens;

pub use criteria::{Criteria, Ordering};
pub use expressions::{Comparison, Expression};
pub use field::{FieldType, TypedField};
pub use operators::{Connective, Direction, Keyword, Operator};
pub use query::{Query, Targets};
pub use tokens::{Token, TokenKind};
