use serde::Serialize;

use crate::ast::{Connective, Direction, Expression, TypedField};

/// Sort key of a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ordering {
    pub field: TypedField,
    pub direction: Direction,
}

/// The filtering half of a query: one expression tree plus ordering and
/// pagination bounds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Criteria {
    pub expression: Option<Expression>,
    pub order: Option<Ordering>,
    pub first_result: Option<u64>,
    pub max_results: Option<u64>,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the expression.
    pub fn where_(&mut self, expr: Expression) -> &mut Self {
        self.expression = Some(expr);
        self
    }

    /// Combine `expr` with the current expression under `and`.
    ///
    /// The first call simply sets the expression. Later calls append to a
    /// root composite of the same connective, or wrap the existing tree and
    /// the new expression in a two-child composite.
    pub fn and_where(&mut self, expr: Expression) -> &mut Self {
        self.fold(Connective::And, expr)
    }

    /// Combine `expr` with the current expression under `or`.
    pub fn or_where(&mut self, expr: Expression) -> &mut Self {
        self.fold(Connective::Or, expr)
    }

    pub fn fold(&mut self, connective: Connective, expr: Expression) -> &mut Self {
        if self.extends_root(connective) {
            if let Some(Expression::Composite { children, .. }) = &mut self.expression {
                children.push(expr);
            }
            return self;
        }
        self.expression = Some(match self.expression.take() {
            None => expr,
            Some(existing) => Expression::composite(connective, vec![existing, expr]),
        });
        self
    }

    /// Whether folding under `connective` appends to the root composite
    /// instead of nesting the tree one level deeper.
    pub fn extends_root(&self, connective: Connective) -> bool {
        matches!(
            &self.expression,
            Some(Expression::Composite { connective: root, .. }) if *root == connective
        )
    }

    pub fn order_by(&mut self, field: TypedField, direction: Direction) -> &mut Self {
        self.order = Some(Ordering { field, direction });
        self
    }

    pub fn set_first_result(&mut self, first: u64) -> &mut Self {
        self.first_result = Some(first);
        self
    }

    pub fn set_max_results(&mut self, max: u64) -> &mut Self {
        self.max_results = Some(max);
        self
    }
}
