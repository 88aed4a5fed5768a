//! CLI support for searchql
//!
//! Provides programmatic access to the `searchql` commands for embedding in
//! other tools.

mod check;
mod docs;

pub use check::{execute_check, execute_format, execute_tokens, CheckOptions, CheckResult};
pub use docs::{get_doc_category, get_docs_overview, DocCategory};

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Parse error: {0}")]
    Parse(#[from] crate::ParseError),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("No query provided. Pass it as an argument or pipe it to stdin.")]
    NoInput,

    #[error("Unknown category: '{0}'\nRun 'searchql docs' to see available categories.")]
    UnknownCategory(String),
}

impl From<crate::LexError> for CliError {
    fn from(e: crate::LexError) -> Self {
        CliError::Parse(e.into())
    }
}
