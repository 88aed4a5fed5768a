use std::fmt;

use serde::Serialize;

/// Reserved words.
///
/// `and` and `or` are keywords for the lexer but only mean something inside
/// a `where` clause, where they act as [`Connective`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    From,
    Where,
    And,
    Or,
    Offset,
    MaxResults,
    OrderBy,
}

impl Keyword {
    pub const ALL: [Keyword; 7] = [
        Keyword::From,
        Keyword::Where,
        Keyword::And,
        Keyword::Or,
        Keyword::Offset,
        Keyword::MaxResults,
        Keyword::OrderBy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::From => "from",
            Keyword::Where => "where",
            Keyword::And => "and",
            Keyword::Or => "or",
            Keyword::Offset => "offset",
            Keyword::MaxResults => "max_results",
            Keyword::OrderBy => "order_by",
        }
    }

    /// Case-insensitive lookup.
    pub fn parse(word: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(word))
    }

    /// Keywords that open a top-level clause.
    pub fn starts_clause(&self) -> bool {
        !matches!(self, Keyword::And | Keyword::Or)
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    /// Greater than (`>`)
    GreaterThan,
    /// Greater than or equal (`>=`)
    GreaterThanEquals,
    /// Less than (`<`)
    LessThan,
    /// Less than or equal (`<=`)
    LessThanEquals,
    /// Equal (`=`)
    Equals,
    /// Not equal (`<>`, alias `!=`)
    NotEquals,
    /// Membership (`in`)
    In,
    /// Negated membership (`not in`, alias `!in`)
    NotIn,
    /// Substring match (`contains`, alias `~`)
    Contains,
    /// Negated substring match (`not contains`, alias `!~`)
    NotContains,
}

impl Operator {
    pub const ALL: [Operator; 10] = [
        Operator::GreaterThan,
        Operator::GreaterThanEquals,
        Operator::LessThan,
        Operator::LessThanEquals,
        Operator::Equals,
        Operator::NotEquals,
        Operator::In,
        Operator::NotIn,
        Operator::Contains,
        Operator::NotContains,
    ];

    /// Canonical spelling, as emitted in operator token values.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::GreaterThan => ">",
            Operator::GreaterThanEquals => ">=",
            Operator::LessThan => "<",
            Operator::LessThanEquals => "<=",
            Operator::Equals => "=",
            Operator::NotEquals => "<>",
            Operator::In => "in",
            Operator::NotIn => "not in",
            Operator::Contains => "contains",
            Operator::NotContains => "not contains",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.as_str() == value)
    }

    /// `in` and `not in` take a parenthesized list instead of a single value.
    pub fn takes_list(&self) -> bool {
        matches!(self, Operator::In | Operator::NotIn)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Logical combinator joining sibling conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Connective {
    And,
    Or,
}

impl Connective {
    pub fn as_str(&self) -> &'static str {
        match self {
            Connective::And => "and",
            Connective::Or => "or",
        }
    }

    pub fn from_keyword(keyword: Keyword) -> Option<Self> {
        match keyword {
            Keyword::And => Some(Connective::And),
            Keyword::Or => Some(Connective::Or),
            _ => None,
        }
    }
}

impl fmt::Display for Connective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort direction of an `order_by` clause.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub const NAMES: [&'static str; 2] = ["asc", "desc"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }

    pub fn parse(word: &str) -> Option<Self> {
        if word.eq_ignore_ascii_case("asc") {
            Some(Direction::Asc)
        } else if word.eq_ignore_ascii_case("desc") {
            Some(Direction::Desc)
        } else {
            None
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
