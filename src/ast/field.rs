use std::fmt;

use serde::{Serialize, Serializer};

use crate::ast::Operator;

/// Value type of an indexed field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    Text,
    Integer,
    Decimal,
    Datetime,
}

const TEXT_OPERATORS: &[Operator] = &[
    Operator::Contains,
    Operator::NotContains,
    Operator::Equals,
    Operator::NotEquals,
];

const ORDERED_OPERATORS: &[Operator] = &[
    Operator::GreaterThan,
    Operator::GreaterThanEquals,
    Operator::LessThan,
    Operator::LessThanEquals,
    Operator::Equals,
    Operator::NotEquals,
    Operator::In,
    Operator::NotIn,
];

impl FieldType {
    pub const ALL: [FieldType; 4] = [
        FieldType::Text,
        FieldType::Integer,
        FieldType::Decimal,
        FieldType::Datetime,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Integer => "integer",
            FieldType::Decimal => "decimal",
            FieldType::Datetime => "datetime",
        }
    }

    /// Case-insensitive lookup of a type qualifier.
    pub fn parse(word: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(word))
    }

    /// Operators a comparison against a field of this type may use.
    pub fn allowed_operators(&self) -> &'static [Operator] {
        match self {
            FieldType::Text => TEXT_OPERATORS,
            FieldType::Integer | FieldType::Decimal | FieldType::Datetime => ORDERED_OPERATORS,
        }
    }

    pub fn allows(&self, op: Operator) -> bool {
        self.allowed_operators().contains(&op)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field reference qualified by its type, rendered as `<type>.<name>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypedField {
    pub field_type: FieldType,
    pub name: String,
}

impl TypedField {
    pub fn new(field_type: FieldType, name: impl Into<String>) -> Self {
        TypedField {
            field_type,
            name: name.into(),
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(FieldType::Text, name)
    }

    /// Read a single word that may carry its type as a dotted prefix.
    ///
    /// `integer.qty` becomes an integer field `qty`; `a.x` has no type prefix
    /// and stays a text field named `a.x`.
    pub fn from_word(word: &str) -> Self {
        if let Some((prefix, rest)) = word.split_once('.') {
            if let Some(field_type) = FieldType::parse(prefix) {
                if !rest.is_empty() {
                    return Self::new(field_type, rest);
                }
            }
        }
        Self::text(word)
    }
}

impl fmt::Display for TypedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.field_type, self.name)
    }
}

impl Serialize for TypedField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_rejects_ordering_operators() {
        assert!(FieldType::Text.allows(Operator::Contains));
        assert!(!FieldType::Text.allows(Operator::GreaterThan));
        assert!(!FieldType::Text.allows(Operator::In));
    }

    #[test]
    fn numeric_types_reject_contains() {
        for t in [FieldType::Integer, FieldType::Decimal, FieldType::Datetime] {
            assert!(!t.allows(Operator::Contains), "{t} allowed contains");
            assert!(!t.allows(Operator::NotContains), "{t} allowed not contains");
            assert!(t.allows(Operator::NotIn));
        }
    }

    #[test]
    fn dotted_word_splits_only_on_known_type() {
        assert_eq!(TypedField::from_word("integer.qty"), TypedField::new(FieldType::Integer, "qty"));
        assert_eq!(TypedField::from_word("DateTime.created"), TypedField::new(FieldType::Datetime, "created"));
        assert_eq!(TypedField::from_word("a.x"), TypedField::text("a.x"));
        assert_eq!(TypedField::from_word("integer."), TypedField::text("integer."));
        assert_eq!(TypedField::from_word("name").to_string(), "text.name");
    }
}
