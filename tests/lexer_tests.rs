// tests/lexer_tests.rs

use searchql::ast::{Token, TokenKind};
use searchql::error::LexError;
use searchql::lexer::Lexer;

fn lex(input: &str) -> Vec<Token> {
    Lexer::new(input)
        .collect::<Result<Vec<_>, _>>()
        .unwrap_or_else(|e| panic!("lexing {input:?} failed: {e}"))
}

fn kinds_and_values(input: &str) -> Vec<(TokenKind, String)> {
    lex(input).into_iter().map(|t| (t.kind, t.value)).collect()
}

// ============================================================================
// Punctuation and Operators
// ============================================================================

#[test]
fn test_punctuation() {
    for input in ["(", ")", ","] {
        let mut lexer = Lexer::new(input);
        let token = lexer.next_token().unwrap().unwrap();
        assert_eq!(token, Token::new(TokenKind::Punctuation, input, 0));
        assert_eq!(lexer.next_token().unwrap(), None);
    }
}

#[test]
fn test_symbol_operators() {
    let test_cases = vec![
        (">", ">"),
        (">=", ">="),
        ("<", "<"),
        ("<=", "<="),
        ("=", "="),
        ("<>", "<>"),
        ("*", "*"),
    ];

    for (input, expected) in test_cases {
        let mut lexer = Lexer::new(input);
        let token = lexer.next_token().unwrap().unwrap();
        assert_eq!(token.kind, TokenKind::Operator, "Failed for input: {}", input);
        assert_eq!(token.value, expected, "Failed for input: {}", input);
        assert_eq!(lexer.next_token().unwrap(), None);
    }
}

#[test]
fn test_operator_aliases_are_normalized() {
    let test_cases = vec![
        ("!=", "<>"),
        ("~", "contains"),
        ("!~", "not contains"),
        ("!in", "not in"),
        ("!IN", "not in"),
    ];

    for (input, expected) in test_cases {
        let tokens = lex(input);
        assert_eq!(tokens.len(), 1, "Failed for input: {}", input);
        assert_eq!(tokens[0].kind, TokenKind::Operator);
        assert_eq!(tokens[0].value, expected, "Failed for input: {}", input);
    }
}

#[test]
fn test_word_operators() {
    let test_cases = vec![
        ("in", "in"),
        ("IN", "in"),
        ("contains", "contains"),
        ("not in", "not in"),
        ("not   contains", "not contains"),
        ("NOT\tIN", "not in"),
    ];

    for (input, expected) in test_cases {
        let tokens = lex(input);
        assert_eq!(tokens, vec![Token::new(TokenKind::Operator, expected, 0)], "Failed for input: {}", input);
    }
}

#[test]
fn test_not_without_operator_is_a_word() {
    assert_eq!(
        kinds_and_values("not = 1"),
        vec![
            (TokenKind::String, "not".to_string()),
            (TokenKind::Operator, "=".to_string()),
            (TokenKind::Number, "1".to_string()),
        ]
    );
    assert_eq!(
        kinds_and_values("not inside"),
        vec![
            (TokenKind::String, "not".to_string()),
            (TokenKind::String, "inside".to_string()),
        ]
    );
}

#[test]
fn test_two_char_vs_single_char() {
    assert_eq!(
        kinds_and_values("< ="),
        vec![
            (TokenKind::Operator, "<".to_string()),
            (TokenKind::Operator, "=".to_string()),
        ]
    );
    assert_eq!(
        kinds_and_values("<=>"),
        vec![
            (TokenKind::Operator, "<=".to_string()),
            (TokenKind::Operator, ">".to_string()),
        ]
    );
}

// ============================================================================
// Keywords
// ============================================================================

#[test]
fn test_keywords_are_case_insensitive() {
    let test_cases = vec![
        ("FROM", "from"),
        ("Where", "where"),
        ("AND", "and"),
        ("or", "or"),
        ("Order_By", "order_by"),
        ("MAX_RESULTS", "max_results"),
        ("offset", "offset"),
    ];

    for (input, expected) in test_cases {
        let tokens = lex(input);
        assert_eq!(tokens, vec![Token::new(TokenKind::Keyword, expected, 0)], "Failed for input: {}", input);
    }
}

#[test]
fn test_keywords_vs_words() {
    let test_cases = vec!["android", "order", "fromage", "where_", "offsets", "inside", "containsx"];

    for input in test_cases {
        let tokens = lex(input);
        assert_eq!(tokens, vec![Token::new(TokenKind::String, input, 0)], "Failed for input: {}", input);
    }
}

#[test]
fn test_type_names_are_plain_strings() {
    for input in ["text", "integer", "decimal", "datetime", "asc", "desc"] {
        assert_eq!(lex(input)[0].kind, TokenKind::String, "Failed for input: {}", input);
    }
}

// ============================================================================
// Strings
// ============================================================================

#[test]
fn test_bare_words() {
    let test_cases = vec!["x", "snake_case", "integer.qty", "a-b", "user@host", "ns:field", "_private", "héllo"];

    for input in test_cases {
        assert_eq!(lex(input), vec![Token::new(TokenKind::String, input, 0)], "Failed for input: {}", input);
    }
}

#[test]
fn test_quoted_strings() {
    let test_cases = vec![
        (r#""hello world""#, "hello world"),
        (r#"'single'"#, "single"),
        (r#""""#, ""),
        (r#""from""#, "from"),
        (r#""say \"hi\"""#, "say \"hi\""),
        (r#"'it\'s'"#, "it's"),
        (r#""a\\b""#, "a\\b"),
        (r#""line\nbreak\ttab""#, "line\nbreak\ttab"),
    ];

    for (input, expected) in test_cases {
        assert_eq!(lex(input), vec![Token::new(TokenKind::String, expected, 0)], "Failed for input: {}", input);
    }
}

#[test]
fn test_unterminated_string() {
    let mut lexer = Lexer::new(r#"where name = "open"#);
    for _ in 0..3 {
        lexer.next_token().unwrap();
    }
    assert_eq!(
        lexer.next_token(),
        Err(LexError::UnterminatedString { position: 13 })
    );
}

#[test]
fn test_invalid_escape() {
    let result: Result<Vec<_>, _> = Lexer::new(r#""bad \q""#).collect();
    assert_eq!(result, Err(LexError::InvalidEscape { ch: 'q', position: 6 }));
}

// ============================================================================
// Numbers
// ============================================================================

#[test]
fn test_numbers() {
    let test_cases = vec!["0", "42", "-7", "3.25", "-0.5", "123456789012"];

    for input in test_cases {
        assert_eq!(lex(input), vec![Token::new(TokenKind::Number, input, 0)], "Failed for input: {}", input);
    }
}

#[test]
fn test_number_trailing_dot_is_not_consumed() {
    let result: Result<Vec<_>, _> = Lexer::new("5.").collect();
    assert_eq!(result, Err(LexError::UnexpectedCharacter { ch: '.', position: 1 }));
}

#[test]
fn test_number_against_operator() {
    assert_eq!(
        kinds_and_values("qty>-5"),
        vec![
            (TokenKind::String, "qty".to_string()),
            (TokenKind::Operator, ">".to_string()),
            (TokenKind::Number, "-5".to_string()),
        ]
    );
}

// ============================================================================
// Cursor Positions
// ============================================================================

#[test]
fn test_cursor_offsets() {
    let tokens = lex("from (a, b) where x ~ 'y'");
    let cursors: Vec<usize> = tokens.iter().map(|t| t.cursor).collect();
    assert_eq!(cursors, vec![0, 5, 6, 7, 9, 10, 12, 18, 20, 22]);
}

#[test]
fn test_cursor_counts_characters_not_bytes() {
    let tokens = lex("\"ÿøü\" x");
    assert_eq!(tokens[1].cursor, 6);
}

#[test]
fn test_not_operator_cursor_is_start_of_not() {
    let tokens = lex("qty  not  in (1)");
    assert_eq!(tokens[1], Token::new(TokenKind::Operator, "not in", 5));
    assert_eq!(tokens[2].cursor, 13);
}

// ============================================================================
// Errors and Whitespace
// ============================================================================

#[test]
fn test_unexpected_characters() {
    let test_cases = vec![("#", '#', 0), ("a ; b", ';', 2), ("x !", '!', 2), ("- 1", '-', 0)];

    for (input, ch, position) in test_cases {
        let result: Result<Vec<_>, _> = Lexer::new(input).collect();
        assert_eq!(
            result,
            Err(LexError::UnexpectedCharacter { ch, position }),
            "Failed for input: {}",
            input
        );
    }
}

#[test]
fn test_whitespace_is_skipped() {
    assert!(lex("   \t\n  ").is_empty());
    assert_eq!(lex("  from  ").len(), 1);
}

#[test]
fn test_lexer_is_restartable() {
    let mut lexer = Lexer::new("from a where x = 1");
    let first: Vec<_> = lexer.by_ref().collect::<Result<_, _>>().unwrap();
    assert!(lexer.next().is_none());

    lexer.reset();
    let second: Vec<_> = lexer.collect::<Result<_, _>>().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_iteration_stops_after_error() {
    let mut lexer = Lexer::new("a # b");
    assert!(lexer.next().unwrap().is_ok());
    assert!(lexer.next().unwrap().is_err());
    assert!(lexer.next().is_none());
}
