//! JSON rendering of parsed queries for executors that consume JSON.
//!
//! The layout follows the serde derives on the AST:
//!
//! ```
//! let query = searchql::parse("from order where integer total >= 100 offset 20").unwrap();
//! assert_eq!(
//!     searchql::to_json(&query).unwrap(),
//!     r#"{"from":["order"],"criteria":{"expression":{"type":"comparison","field":"integer.total","operator":"greater_than_equals","value":100},"order":null,"first_result":20,"max_results":null}}"#
//! );
//! ```

use crate::ast::Query;

/// Compact JSON.
pub fn to_json(query: &Query) -> serde_json::Result<String> {
    serde_json::to_string(query)
}

/// JSON with two-space indentation.
pub fn to_json_pretty(query: &Query) -> serde_json::Result<String> {
    serde_json::to_string_pretty(query)
}

/// The query as a [`serde_json::Value`]. Object keys come out sorted.
pub fn to_value(query: &Query) -> serde_json::Result<serde_json::Value> {
    serde_json::to_value(query)
}
