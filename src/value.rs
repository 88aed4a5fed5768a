use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

/// A literal on the right-hand side of a comparison.
///
/// Number tokens are classified by their spelling only: `42` is an
/// [`Value::Integer`], `4.20` a [`Value::Decimal`]. A literal that neither
/// type holds exactly is kept verbatim as [`Value::Number`]. Nothing is
/// converted to the type of the field being compared against; a date
/// written as `"2024-01-01"` stays a string.
///
/// # Examples
///
/// ```
/// use searchql::Value;
///
/// assert_eq!(Value::from_number("42"), Value::Integer(42));
/// assert_eq!(
///     Value::from_number("99999999999999999999"),
///     Value::Number("99999999999999999999".into())
/// );
/// assert_eq!(Value::String("x".into()).to_string(), "\"x\"");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Whole number literal
    Integer(i64),

    /// Number literal with a fractional part (serialized as a string to keep precision)
    Decimal(Decimal),

    /// Number literal too large or too precise for `Integer` / `Decimal`, as written (serialized as a string)
    Number(String),

    /// Quoted string or bare word
    String(String),

    /// Argument list of `in` / `not in`; may be empty
    List(Vec<Value>),
}

impl Value {
    /// Classify the text of a number token.
    ///
    /// Integers beyond `i64` and decimals that would need rounding stay
    /// [`Value::Number`] with the literal text.
    pub fn from_number(literal: &str) -> Self {
        let exact = if literal.contains('.') {
            Decimal::from_str_exact(literal).ok().map(Value::Decimal)
        } else {
            literal.parse::<i64>().ok().map(Value::Integer)
        };
        exact.unwrap_or_else(|| Value::Number(literal.to_string()))
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Value::Integer(n) => Some(Decimal::from(*n)),
            Value::Decimal(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Number literal text as written, for any of the numeric variants.
    pub fn number_literal(&self) -> Option<String> {
        match self {
            Value::Integer(n) => Some(n.to_string()),
            Value::Decimal(d) => Some(d.to_string()),
            Value::Number(raw) => Some(raw.clone()),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Value::Decimal(d)
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

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

/// Quote a string for the query language, escaping quotes and backslashes.
pub(crate) fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Renders the literal as query text: strings are always quoted, lists are
/// parenthesized.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{n}"),
            Value::Decimal(d) => write!(f, "{d}"),
            Value::Number(raw) => f.write_str(raw),
            Value::String(s) => f.write_str(&quote(s)),
            Value::List(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str(")")
            }
        }
    }
}
