//! Tokenizer and parser for a small search expression language.
//!
//! ```
//! use searchql::{Direction, FieldType};
//!
//! let query = searchql::parse(
//!     "from product where integer qty > 5 order_by decimal price desc max_results 10",
//! )
//! .unwrap();
//!
//! assert_eq!(query.from.single(), Some("product"));
//! let order = query.order().unwrap();
//! assert_eq!(order.field.field_type, FieldType::Decimal);
//! assert_eq!(order.direction, Direction::Desc);
//! assert_eq!(query.max_results(), Some(10));
//! ```
pub mod ast;
#[cfg(feature = "cli")]
pub mod cli;
pub mod error;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod stream;
pub mod value;

pub use ast::{
    Comparison, Connective, Criteria, Direction, Expression, FieldType, Keyword, Operator,
    Ordering, Query, Targets, Token, TokenKind, TypedField,
};
pub use error::{LexError, ParseError, ParseResult};
pub use lexer::Lexer;
pub use output::{to_json, to_json_pretty};
pub use parser::{ParseOptions, Parser};
pub use stream::TokenStream;
pub use value::Value;

/// Parse query text with the default [`ParseOptions`].
pub fn parse(input: &str) -> ParseResult<Query> {
    parse_with(input, &ParseOptions::default())
}

/// Parse query text, enforcing `options`.
pub fn parse_with(input: &str, options: &ParseOptions) -> ParseResult<Query> {
    if let Some(max) = options.max_input_length {
        if input.chars().count() > max {
            return Err(ParseError::syntax(
                format!("Query exceeds maximum length of {max} characters"),
                max,
            ));
        }
    }

    let stream = Lexer::new(input).tokenize()?;
    Parser::new(stream).with_options(options.clone()).parse()
}
