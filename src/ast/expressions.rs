use std::fmt;

use serde::Serialize;

use crate::ast::query::render_word;
use crate::ast::{Connective, Operator, TypedField};
use crate::value::Value;

/// A leaf condition: `<field> <operator> <value>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comparison {
    pub field: TypedField,
    pub operator: Operator,
    pub value: Value,
}

/// Boolean filter tree.
///
/// Children of a [`Expression::Composite`] are owned by it and all joined
/// by the one `connective`; mixing `and` and `or` on one level is expressed
/// by nesting composites.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Expression {
    /// Single field comparison
    ///
    /// # Example
    /// ```text
    /// integer qty >= 10
    /// ```
    Comparison(Comparison),

    /// Two or more expressions joined by one connective
    ///
    /// # Example
    /// ```text
    /// (integer qty >= 10 and text name contains "bolt")
    /// ```
    Composite {
        connective: Connective,
        children: Vec<Expression>,
    },
}

impl Expression {
    pub fn comparison(field: TypedField, operator: Operator, value: impl Into<Value>) -> Self {
        Expression::Comparison(Comparison {
            field,
            operator,
            value: value.into(),
        })
    }

    pub fn composite(connective: Connective, children: Vec<Expression>) -> Self {
        Expression::Composite {
            connective,
            children,
        }
    }

    pub fn and(children: Vec<Expression>) -> Self {
        Self::composite(Connective::And, children)
    }

    pub fn or(children: Vec<Expression>) -> Self {
        Self::composite(Connective::Or, children)
    }

    /// Every field the tree compares against, left to right.
    pub fn fields(&self) -> Vec<&TypedField> {
        let mut out = vec![];
        self.collect_fields(&mut out);
        out
    }

    fn collect_fields<'a>(&'a self, out: &mut Vec<&'a TypedField>) {
        match self {
            Expression::Comparison(cmp) => out.push(&cmp.field),
            Expression::Composite { children, .. } => {
                for child in children {
                    child.collect_fields(out);
                }
            }
        }
    }

    /// Nesting depth; a single comparison has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            Expression::Comparison(_) => 1,
            Expression::Composite { children, .. } => {
                1 + children.iter().map(Expression::depth).max().unwrap_or(0)
            }
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.field.field_type,
            render_word(&self.field.name),
            self.operator,
            self.value
        )
    }
}

/// Renders query text; composites are always parenthesized so the output
/// parses back to the same tree.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Comparison(cmp) => write!(f, "{cmp}"),
            Expression::Composite {
                connective,
                children,
            } => {
                f.write_str("(")?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, " {connective} ")?;
                    }
                    write!(f, "{child}")?;
                }
                f.write_str(")")
            }
        }
    }
}
