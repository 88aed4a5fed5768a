//! Parse queries for the command line

use super::CliError;
use crate::{Lexer, ParseOptions, Token, output, parse_with};

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The query text
    pub query: String,
    /// Only validate syntax, don't print the query
    pub syntax_only: bool,
    /// Parse limits
    pub limits: ParseOptions,
}

/// Result of a check operation
#[derive(Debug)]
pub enum CheckResult {
    /// Syntax validation passed
    SyntaxValid,
    /// Parsed query as JSON
    Success(serde_json::Value),
}

/// Parse the query and return it as JSON, or only validate it.
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let query = parse_with(&options.query, &options.limits)?;

    if options.syntax_only {
        return Ok(CheckResult::SyntaxValid);
    }
    Ok(CheckResult::Success(output::to_value(&query)?))
}

/// Lex the query without parsing it.
pub fn execute_tokens(query: &str) -> Result<Vec<Token>, CliError> {
    Ok(Lexer::new(query).collect::<Result<Vec<_>, _>>()?)
}

/// Parse the query and print it back in canonical form.
pub fn execute_format(query: &str, limits: &ParseOptions) -> Result<String, CliError> {
    Ok(parse_with(query, limits)?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_returns_json() {
        let options = CheckOptions {
            query: "from product max_results 3".to_string(),
            ..Default::default()
        };
        match execute_check(&options).unwrap() {
            CheckResult::Success(json) => {
                assert_eq!(json["from"][0], "product");
                assert_eq!(json["criteria"]["max_results"], 3);
            }
            CheckResult::SyntaxValid => panic!("expected JSON output"),
        }
    }

    #[test]
    fn test_syntax_only() {
        let options = CheckOptions {
            query: "where integer qty > 1".to_string(),
            syntax_only: true,
            ..Default::default()
        };
        assert!(matches!(execute_check(&options).unwrap(), CheckResult::SyntaxValid));
    }

    #[test]
    fn test_check_reports_parse_error() {
        let options = CheckOptions {
            query: "offset abc".to_string(),
            ..Default::default()
        };
        let err = execute_check(&options).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Parse error: Unexpected token \"string\", value \"abc\" in offset statements at position 7"
        );
    }

    #[test]
    fn test_format_is_canonical() {
        let out = execute_format("FROM (a,b) WHERE qty ~ bolt", &ParseOptions::default()).unwrap();
        assert_eq!(out, "from (a, b) where text qty contains \"bolt\"");
    }
}
