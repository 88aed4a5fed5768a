use crate::{
    ast::{Keyword, Operator, Token, TokenKind},
    error::LexError,
    stream::TokenStream,
};

/// Characters allowed after the first character of a bare word.
pub(crate) fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || matches!(ch, '_' | '.' | '-' | '@' | ':')
}

/// Turns query text into [`Token`]s.
///
/// The lexer is an iterator over `Result<Token, LexError>`; it can be
/// rewound with [`Lexer::reset`] and scanned again.
#[derive(Debug, Clone)]
pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
        }
    }

    /// Rewind to the start of the input.
    pub fn reset(&mut self) {
        self.position = 0;
    }

    /// Scan the remaining input into a [`TokenStream`].
    pub fn tokenize(&mut self) -> Result<TokenStream, LexError> {
        let tokens = self.by_ref().collect::<Result<Vec<_>, _>>()?;
        tracing::trace!(count = tokens.len(), "tokenized query");
        Ok(TokenStream::new(tokens, self.input.len()))
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_identifier(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if is_word_char(ch) {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    fn read_string(&mut self, quote: char) -> Result<String, LexError> {
        let start = self.position;
        let mut result = String::new();
        self.advance(); // opening quote

        while let Some(ch) = self.current_char() {
            match ch {
                c if c == quote => {
                    self.advance();
                    return Ok(result);
                }
                '\\' => {
                    self.advance();
                    match self.current_char() {
                        Some('n') => result.push('\n'),
                        Some('t') => result.push('\t'),
                        Some('r') => result.push('\r'),
                        Some(c @ ('"' | '\'' | '\\')) => result.push(c),
                        Some(c) => {
                            return Err(LexError::InvalidEscape {
                                ch: c,
                                position: self.position,
                            });
                        }
                        None => break,
                    }
                    self.advance();
                }
                _ => {
                    result.push(ch);
                    self.advance();
                }
            }
        }

        Err(LexError::UnterminatedString { position: start })
    }

    fn read_number(&mut self) -> String {
        let mut number = String::new();
        let mut is_float = false;

        if self.current_char() == Some('-') {
            number.push('-');
            self.advance();
        }

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                number.push(ch);
                self.advance();
            } else if ch == '.'
                && !is_float
                && self.peek_char(1).is_some_and(|c| c.is_ascii_digit())
            {
                is_float = true;
                number.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        number
    }

    /// Read a word and classify it. `not` only forms an operator when the
    /// next word is `in` or `contains`; otherwise it is a plain string.
    fn read_word(&mut self, start: usize) -> Token {
        let word = self.read_identifier();
        let lower = word.to_lowercase();

        if let Some(keyword) = Keyword::parse(&lower) {
            return Token::new(TokenKind::Keyword, keyword.as_str(), start);
        }

        match lower.as_str() {
            "in" => Token::new(TokenKind::Operator, Operator::In.as_str(), start),
            "contains" => Token::new(TokenKind::Operator, Operator::Contains.as_str(), start),
            "not" => {
                let rewind = self.position;
                self.skip_whitespace();
                let next = if self.current_char().is_some_and(|c| c.is_alphabetic()) {
                    self.read_identifier().to_lowercase()
                } else {
                    String::new()
                };
                match next.as_str() {
                    "in" => Token::new(TokenKind::Operator, Operator::NotIn.as_str(), start),
                    "contains" => {
                        Token::new(TokenKind::Operator, Operator::NotContains.as_str(), start)
                    }
                    _ => {
                        self.position = rewind;
                        Token::new(TokenKind::String, word, start)
                    }
                }
            }
            _ => Token::new(TokenKind::String, word, start),
        }
    }

    fn operator(&mut self, width: usize, op: &str, start: usize) -> Token {
        self.position += width;
        Token::new(TokenKind::Operator, op, start)
    }

    fn punctuation(&mut self, ch: char, start: usize) -> Token {
        self.advance();
        Token::new(TokenKind::Punctuation, ch.to_string(), start)
    }

    /// Next token, or `None` at the end of the input.
    pub fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        self.skip_whitespace();
        let start = self.position;

        let token = match self.current_char() {
            None => return Ok(None),
            Some(ch @ ('(' | ')' | ',')) => self.punctuation(ch, start),
            Some('*') => self.operator(1, "*", start),
            Some('=') => self.operator(1, "=", start),
            Some('~') => self.operator(1, "contains", start),
            Some('>') => {
                if self.peek_char(1) == Some('=') {
                    self.operator(2, ">=", start)
                } else {
                    self.operator(1, ">", start)
                }
            }
            Some('<') => match self.peek_char(1) {
                Some('=') => self.operator(2, "<=", start),
                Some('>') => self.operator(2, "<>", start),
                _ => self.operator(1, "<", start),
            },
            Some('!') => match (self.peek_char(1), self.peek_char(2), self.peek_char(3)) {
                (Some('='), _, _) => self.operator(2, "<>", start),
                (Some('~'), _, _) => self.operator(2, "not contains", start),
                (Some('i' | 'I'), Some('n' | 'N'), after)
                    if !after.is_some_and(is_word_char) =>
                {
                    self.operator(3, "not in", start)
                }
                _ => {
                    return Err(LexError::UnexpectedCharacter {
                        ch: '!',
                        position: start,
                    });
                }
            },
            Some(q @ ('"' | '\'')) => Token::new(TokenKind::String, self.read_string(q)?, start),
            Some('-') if self.peek_char(1).is_some_and(|c| c.is_ascii_digit()) => {
                Token::new(TokenKind::Number, self.read_number(), start)
            }
            Some(ch) if ch.is_ascii_digit() => {
                Token::new(TokenKind::Number, self.read_number(), start)
            }
            Some(ch) if ch.is_alphabetic() || ch == '_' => self.read_word(start),
            Some(ch) => {
                return Err(LexError::UnexpectedCharacter {
                    ch,
                    position: start,
                });
            }
        };

        Ok(Some(token))
    }
}

impl Iterator for Lexer {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_token() {
            Ok(Some(token)) => Some(Ok(token)),
            Ok(None) => None,
            Err(e) => {
                // skip the rest so iteration ends after an error
                self.position = self.input.len();
                Some(Err(e))
            }
        }
    }
}

#[test]
fn test_keywords() {
    let mut lexer = Lexer::new("from WHERE and Or offset max_results order_by");
    for expected in ["from", "where", "and", "or", "offset", "max_results", "order_by"] {
        let token = lexer.next_token().unwrap().unwrap();
        assert_eq!(token.kind, TokenKind::Keyword);
        assert_eq!(token.value, expected);
    }
    assert_eq!(lexer.next_token().unwrap(), None);
}

#[test]
fn test_condition() {
    let mut lexer = Lexer::new("where integer qty >= 10");
    assert_eq!(lexer.next_token().unwrap(), Some(Token::new(TokenKind::Keyword, "where", 0)));
    assert_eq!(lexer.next_token().unwrap(), Some(Token::new(TokenKind::String, "integer", 6)));
    assert_eq!(lexer.next_token().unwrap(), Some(Token::new(TokenKind::String, "qty", 14)));
    assert_eq!(lexer.next_token().unwrap(), Some(Token::new(TokenKind::Operator, ">=", 18)));
    assert_eq!(lexer.next_token().unwrap(), Some(Token::new(TokenKind::Number, "10", 21)));
    assert_eq!(lexer.next_token().unwrap(), None);
}
