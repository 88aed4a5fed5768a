use std::fmt;

use serde::Serialize;

/// Lexical class of a [`Token`].
///
/// Type names (`text`, `integer`, ...) and order directions (`asc`, `desc`)
/// are plain [`TokenKind::String`] tokens; the parser decides what they mean
/// from their position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Reserved word
    ///
    /// # Examples
    /// ```text
    /// from
    /// where
    /// and
    /// order_by
    /// ```
    Keyword,

    /// Comparison operator or the wildcard `*`
    ///
    /// # Examples
    /// ```text
    /// >=
    /// <>
    /// in
    /// not contains
    /// *
    /// ```
    Operator,

    /// One of `(`, `)` or `,`
    Punctuation,

    /// Quoted string or bare word
    ///
    /// # Examples
    /// ```text
    /// "hello world"
    /// 'it\'s'
    /// product
    /// integer.qty
    /// ```
    String,

    /// Numeric literal
    ///
    /// # Examples
    /// ```text
    /// 42
    /// -3.5
    /// ```
    Number,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Keyword => "keyword",
            TokenKind::Operator => "operator",
            TokenKind::Punctuation => "punctuation",
            TokenKind::String => "string",
            TokenKind::Number => "number",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One lexical unit of a query.
///
/// `value` is normalized by the lexer: keywords and operators are lower case,
/// aliases are rewritten to their canonical spelling (`!=` becomes `<>`) and
/// quoted strings carry their unescaped content. `cursor` is the character
/// offset of the first character of the token in the source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub cursor: usize,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>, cursor: usize) -> Self {
        Token {
            kind,
            value: value.into(),
            cursor,
        }
    }

    /// True if the token has the given kind and, when `values` is non-empty,
    /// its value is one of `values`.
    pub fn test(&self, kind: TokenKind, values: &[&str]) -> bool {
        self.kind == kind && (values.is_empty() || values.contains(&self.value.as_str()))
    }

    pub fn is_punctuation(&self, ch: &str) -> bool {
        self.test(TokenKind::Punctuation, &[ch])
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} \"{}\" at {}", self.kind, self.value, self.cursor)
    }
}
