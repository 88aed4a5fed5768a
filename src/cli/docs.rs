//! Documentation content for searchql CLI

use super::CliError;

/// Available documentation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocCategory {
    Syntax,
    Clauses,
    Operators,
    Types,
    Grouping,
    Errors,
}

impl DocCategory {
    /// Parse category name from string
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "syntax" => Some(Self::Syntax),
            "clauses" | "clause" | "from" | "where" | "order_by" => Some(Self::Clauses),
            "operators" | "ops" => Some(Self::Operators),
            "types" | "type" => Some(Self::Types),
            "grouping" | "groups" | "parentheses" => Some(Self::Grouping),
            "errors" | "error" => Some(Self::Errors),
            _ => None,
        }
    }

    fn content(&self) -> &'static str {
        match self {
            Self::Syntax => SYNTAX,
            Self::Clauses => CLAUSES,
            Self::Operators => OPERATORS,
            Self::Types => TYPES,
            Self::Grouping => GROUPING,
            Self::Errors => ERRORS,
        }
    }
}

/// Get the docs overview (category listing)
pub fn get_docs_overview() -> &'static str {
    r#"SEARCHQL DOCUMENTATION

searchql parses search expressions into structured queries: which entities
to search, a boolean filter over typed fields, ordering and pagination.

DOCUMENTATION CATEGORIES

  syntax        Tokens: keywords, words, strings, numbers, punctuation
  clauses       from, where, order_by, offset, max_results
  operators     Comparison operators and their aliases
  types         Field types and which operators each allows
  grouping      Parentheses and mixing and/or
  errors        Error messages and positions

QUICK REFERENCE

  from product                              Search one entity
  from (product, order)                     Search several entities
  where text name contains "bolt"           Text match
  where integer qty >= 10 and qty2 = x      Conditions joined by and/or
  where integer id in (1, 2, 3)             Membership
  order_by decimal price desc               Sort (single entity only)
  offset 20 max_results 10                  Pagination

Run 'searchql doc <category>' for details.
"#
}

/// Get documentation for one category
pub fn get_doc_category(name: &str) -> Result<&'static str, CliError> {
    DocCategory::from_name(name)
        .map(|c| c.content())
        .ok_or_else(|| CliError::UnknownCategory(name.to_string()))
}

const SYNTAX: &str = r#"SYNTAX

Whitespace separates tokens and is otherwise ignored.

  Keywords      from where and or order_by offset max_results
                (case-insensitive)
  Operators     > >= < <= = <> in "not in" contains "not contains" *
  Punctuation   ( ) ,
  Strings       "double quoted", 'single quoted', or bare words
                Bare words start with a letter or _ and may contain
                letters, digits, _ . - @ :
                Escapes in quotes: \" \' \\ \n \t \r
  Numbers       42  -7  3.25

Quote a value that would otherwise read as a keyword:

  where text status = "from"
"#;

const CLAUSES: &str = r#"CLAUSES

All clauses are optional and may appear in any order.

from
  from product            one entity
  from *                  all entities (the default)
  from (product, order)   a list; commas are optional

where
  where <condition> [and|or <condition>] ...
  A condition is [type] field operator value, or a parenthesized group.
  Conditions without a connective are joined with and; a parenthesized
  group without one is joined with its own connective.
  Repeating where adds to the existing conditions.

order_by
  order_by [type] field [asc|desc]
  Only allowed after selecting exactly one entity, and a later from must
  keep it that way. Defaults to asc.

offset / max_results
  offset 20
  max_results 10
  Each takes a non-negative whole number.
"#;

const OPERATORS: &str = r#"OPERATORS

  >   >=   <   <=      ordered comparison
  =   <>               equality        (alias: != for <>)
  contains             substring       (alias: ~)
  not contains         no substring    (alias: !~)
  in (a, b, c)         membership
  not in (a, b, c)     non-membership  (alias: !in)

The list after in / not in may be empty.
"#;

const TYPES: &str = r#"TYPES

A field may be prefixed by its type, as a separate word or dotted:

  integer qty > 5
  integer.qty > 5

Untyped fields are text.

  text                          contains, not contains, =, <>
  integer, decimal, datetime    >, >=, <, <=, =, <>, in, not in

Values are not converted to the field type, and numbers too large or too
precise to hold exactly are kept as written. Dates are written as strings:

  where datetime created >= "2024-01-01 00:00:00"
"#;

const GROUPING: &str = r#"GROUPING

Parentheses group conditions:

  where (integer a = 1 and integer b = 2) or integer c = 3

All conditions inside one pair of parentheses must use the same
connective. Nest parentheses to mix them:

  where (integer a = 1 and (integer b = 2 or integer c = 3))    ok
  where (integer a = 1 and integer b = 2 or integer c = 3)      error

Every switch between and / or outside parentheses also adds a level;
--max-depth limits both kinds of nesting.
"#;

const ERRORS: &str = r#"ERRORS

Every error carries a message and the character position of the
offending token, counted from 0:

  $ searchql check 'offset abc'
  Parse error: Unexpected token "string", value "abc" in offset statements at position 7

Parsing stops at the first error.
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_aliases() {
        assert_eq!(DocCategory::from_name("ops"), Some(DocCategory::Operators));
        assert_eq!(DocCategory::from_name("Order-By"), Some(DocCategory::Clauses));
        assert_eq!(DocCategory::from_name("nope"), None);
    }

    #[test]
    fn test_unknown_category() {
        assert!(matches!(
            get_doc_category("nope"),
            Err(CliError::UnknownCategory(c)) if c == "nope"
        ));
    }
}
