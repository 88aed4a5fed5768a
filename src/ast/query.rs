use std::fmt;

use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

use crate::ast::{Criteria, Keyword, Ordering};
use crate::value::quote;

/// Selector targets of a query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Targets {
    /// `from *`, or no `from` clause at all
    #[default]
    All,

    /// Explicit entity aliases in input order, without duplicates
    Entities(Vec<String>),
}

impl Targets {
    /// Targets from entity names. A `*` among them selects everything.
    pub fn entities<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = vec![];
        for name in names {
            let name = name.into();
            if name == "*" {
                return Targets::All;
            }
            if !out.contains(&name) {
                out.push(name);
            }
        }
        Targets::Entities(out)
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Targets::All)
    }

    /// The target name when exactly one entity is selected.
    pub fn single(&self) -> Option<&str> {
        match self {
            Targets::Entities(names) if names.len() == 1 => Some(&names[0]),
            _ => None,
        }
    }
}

impl Serialize for Targets {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Targets::All => {
                let mut seq = serializer.serialize_seq(Some(1))?;
                seq.serialize_element("*")?;
                seq.end()
            }
            Targets::Entities(names) => names.serialize(serializer),
        }
    }
}

/// A parsed search query, ready to hand to an executor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Query {
    /// Entities to search (`from`)
    pub from: Targets,

    /// Filter, ordering and pagination
    pub criteria: Criteria,
}

impl Query {
    /// Wildcard query with no criteria.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_from(&mut self, targets: Targets) -> &mut Self {
        self.from = targets;
        self
    }

    pub fn order(&self) -> Option<&Ordering> {
        self.criteria.order.as_ref()
    }

    pub fn offset(&self) -> Option<u64> {
        self.criteria.first_result
    }

    pub fn max_results(&self) -> Option<u64> {
        self.criteria.max_results
    }
}

fn is_bare_word(s: &str) -> bool {
    let mut chars = s.chars();
    let starts_ok = chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_');
    starts_ok
        && chars.all(crate::lexer::is_word_char)
        && Keyword::parse(s).is_none()
        && !["in", "contains", "not"]
            .iter()
            .any(|w| w.eq_ignore_ascii_case(s))
}

/// Bare word when the lexer would read it back as the same string token,
/// quoted otherwise.
pub(crate) fn render_word(s: &str) -> String {
    if is_bare_word(s) {
        s.to_string()
    } else {
        quote(s)
    }
}

/// Canonical query text. Parsing the output yields an equal [`Query`].
impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.from {
            Targets::All => f.write_str("from *")?,
            Targets::Entities(names) if names.len() == 1 => {
                write!(f, "from {}", render_word(&names[0]))?
            }
            Targets::Entities(names) => {
                let names: Vec<String> = names.iter().map(|n| render_word(n)).collect();
                write!(f, "from ({})", names.join(", "))?
            }
        }

        if let Some(expr) = &self.criteria.expression {
            write!(f, " where {expr}")?;
        }
        if let Some(order) = &self.criteria.order {
            write!(
                f,
                " order_by {} {} {}",
                order.field.field_type,
                render_word(&order.field.name),
                order.direction
            )?;
        }
        if let Some(offset) = self.criteria.first_result {
            write!(f, " offset {offset}")?;
        }
        if let Some(max) = self.criteria.max_results {
            write!(f, " max_results {max}")?;
        }
        Ok(())
    }
}
