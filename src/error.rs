//! Error types for lexing and parsing.

use thiserror::Error;

use crate::ast::Token;

/// A character sequence the lexer cannot turn into a token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("Unexpected character '{ch}' at position {position}")]
    UnexpectedCharacter { ch: char, position: usize },

    /// `position` is the offset of the opening quote.
    #[error("Unterminated string starting at position {position}")]
    UnterminatedString { position: usize },

    #[error("Invalid escape sequence '\\{ch}' at position {position}")]
    InvalidEscape { ch: char, position: usize },
}

impl LexError {
    /// Character offset into the query text.
    pub fn position(&self) -> usize {
        match self {
            LexError::UnexpectedCharacter { position, .. }
            | LexError::UnterminatedString { position }
            | LexError::InvalidEscape { position, .. } => *position,
        }
    }
}

/// Everything that can go wrong turning query text into a [`Query`](crate::Query).
///
/// Both variants carry a message and a character offset; use
/// [`ParseError::message`] and [`ParseError::cursor`] to report either one
/// the same way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("{message} at position {cursor}")]
    Syntax { message: String, cursor: usize },
}

impl ParseError {
    pub fn syntax(message: impl Into<String>, cursor: usize) -> Self {
        ParseError::Syntax {
            message: message.into(),
            cursor,
        }
    }

    /// `Unexpected token "<kind>", value "<value>"<suffix>` at the token's cursor.
    pub fn unexpected(token: &Token, suffix: &str) -> Self {
        Self::syntax(
            format!(
                "Unexpected token \"{}\", value \"{}\"{}",
                token.kind, token.value, suffix
            ),
            token.cursor,
        )
    }

    pub fn cursor(&self) -> usize {
        match self {
            ParseError::Lex(e) => e.position(),
            ParseError::Syntax { cursor, .. } => *cursor,
        }
    }

    /// The message without the position suffix.
    pub fn message(&self) -> String {
        match self {
            ParseError::Lex(e) => e.to_string(),
            ParseError::Syntax { message, .. } => message.clone(),
        }
    }

    pub fn is_lexical(&self) -> bool {
        matches!(self, ParseError::Lex(_))
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::TokenKind;

    #[test]
    fn test_syntax_error_display() {
        let err = ParseError::syntax("Not allowed operator", 14);
        assert_eq!(err.to_string(), "Not allowed operator at position 14");
        assert_eq!(err.cursor(), 14);
        assert_eq!(err.message(), "Not allowed operator");
    }

    #[test]
    fn test_unexpected_token_message() {
        let token = Token::new(TokenKind::String, "abc", 7);
        let err = ParseError::unexpected(&token, " in offset statements");
        assert_eq!(
            err.message(),
            "Unexpected token \"string\", value \"abc\" in offset statements"
        );
        assert_eq!(err.cursor(), 7);
    }

    #[test]
    fn test_lex_error_shares_cursor() {
        let err: ParseError = LexError::UnexpectedCharacter { ch: '#', position: 3 }.into();
        assert!(err.is_lexical());
        assert_eq!(err.cursor(), 3);
        assert_eq!(err.to_string(), "Unexpected character '#' at position 3");
    }
}
