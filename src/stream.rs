//! Cursor over a lexed token sequence.

use crate::{
    ast::{Token, TokenKind},
    error::{ParseError, ParseResult},
};

/// Owns the tokens of one query and a cursor that only moves forward.
#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: Vec<Token>,
    position: usize,
    /// Length of the source text, reported as the cursor of end-of-input errors.
    end: usize,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>, end: usize) -> Self {
        TokenStream {
            tokens,
            position: 0,
            end,
        }
    }

    pub fn is_eof(&self) -> bool {
        self.position >= self.tokens.len()
    }

    /// Token under the cursor; fails with `Unexpected end of expression`
    /// past the last token.
    pub fn current(&self) -> ParseResult<&Token> {
        self.tokens
            .get(self.position)
            .ok_or_else(|| ParseError::syntax("Unexpected end of expression", self.end))
    }

    /// Token under the cursor, if any.
    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    /// Move to the next token. No-op at the end.
    pub fn next(&mut self) {
        if !self.is_eof() {
            self.position += 1;
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Source offset where the stream ends.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Check the current token without consuming it.
    ///
    /// The token must have `kind` and, when `values` is non-empty, a value
    /// from `values`. On mismatch the error uses `message` if given, or a
    /// description of what was expected, and points at the actual token.
    pub fn expect_current(
        &self,
        kind: TokenKind,
        values: &[&str],
        message: Option<&str>,
    ) -> ParseResult<&Token> {
        let token = match self.peek() {
            Some(token) => token,
            None => {
                return Err(ParseError::syntax(
                    message.unwrap_or("Unexpected end of expression"),
                    self.end,
                ));
            }
        };

        if token.test(kind, values) {
            return Ok(token);
        }

        let message = match message {
            Some(m) => m.to_string(),
            None => {
                let expected = if values.is_empty() {
                    String::new()
                } else {
                    format!(" with value \"{}\"", values.join("\", \""))
                };
                format!(
                    "Unexpected token \"{}\" of value \"{}\" (\"{}\" expected{})",
                    token.kind, token.value, kind, expected
                )
            }
        };
        Err(ParseError::syntax(message, token.cursor))
    }

    /// Like [`TokenStream::expect_current`], then advance past the token.
    pub fn expect(
        &mut self,
        kind: TokenKind,
        values: &[&str],
        message: Option<&str>,
    ) -> ParseResult<Token> {
        let token = self.expect_current(kind, values, message)?.clone();
        self.next();
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream() -> TokenStream {
        TokenStream::new(
            vec![
                Token::new(TokenKind::Keyword, "offset", 0),
                Token::new(TokenKind::Number, "5", 7),
            ],
            8,
        )
    }

    #[test]
    fn test_expect_advances() {
        let mut s = stream();
        let token = s.expect(TokenKind::Keyword, &["offset"], None).unwrap();
        assert_eq!(token.value, "offset");
        assert_eq!(s.current().unwrap().value, "5");
    }

    #[test]
    fn test_expect_current_keeps_position() {
        let s = stream();
        s.expect_current(TokenKind::Keyword, &[], None).unwrap();
        assert_eq!(s.position(), 0);
    }

    #[test]
    fn test_expect_mismatch_points_at_token() {
        let mut s = stream();
        s.next();
        let err = s.expect(TokenKind::String, &[], None).unwrap_err();
        assert_eq!(err.cursor(), 7);
        assert_eq!(
            err.message(),
            "Unexpected token \"number\" of value \"5\" (\"string\" expected)"
        );

        let err = s
            .expect(TokenKind::Number, &["6", "7"], Some("Wrong number"))
            .unwrap_err();
        assert_eq!(err.message(), "Wrong number");
    }

    #[test]
    fn test_next_stops_at_end() {
        let mut s = stream();
        s.next();
        s.next();
        s.next();
        assert!(s.is_eof());
        assert_eq!(s.position(), 2);
        let err = s.current().unwrap_err();
        assert_eq!(err.cursor(), 8);
        assert_eq!(err.message(), "Unexpected end of expression");
    }
}
