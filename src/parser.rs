use crate::{
    ast::{
        Connective, Direction, Expression, FieldType, Keyword, Operator, Query, Targets, Token,
        TokenKind, TypedField,
    },
    error::{ParseError, ParseResult},
    stream::TokenStream,
    value::Value,
};

/// Limits that bound the cost of one parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Longest accepted query, in characters. `None` accepts any length.
    pub max_input_length: Option<usize>,
    /// Deepest accepted nesting of conditions, counting both parentheses
    /// and the levels added by mixing `and` / `or` outside them.
    pub max_nesting_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            max_input_length: None,
            max_nesting_depth: 32,
        }
    }
}

/// Recursive-descent parser from a [`TokenStream`] to a [`Query`].
///
/// A parser is used for one query: [`Parser::parse`] consumes it.
pub struct Parser {
    stream: TokenStream,
    query: Query,
    options: ParseOptions,
    depth: usize,
    /// [`Expression::depth`] of the criteria expression, 0 when empty
    tree_depth: usize,
}

impl Parser {
    /// Parser that starts from the wildcard query.
    pub fn new(stream: TokenStream) -> Self {
        Self::with_query(stream, Query::new())
    }

    /// Parser that adds the parsed clauses to `query`.
    pub fn with_query(stream: TokenStream, query: Query) -> Self {
        let tree_depth = query
            .criteria
            .expression
            .as_ref()
            .map_or(0, Expression::depth);
        Parser {
            stream,
            query,
            options: ParseOptions::default(),
            depth: 0,
            tree_depth,
        }
    }

    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// Parse clauses until the stream is exhausted.
    ///
    /// Clauses may come in any order and repeat: a later `from`, `order_by`,
    /// `offset` or `max_results` replaces the earlier one, a later `where`
    /// adds its conditions to the ones already parsed.
    pub fn parse(mut self) -> ParseResult<Query> {
        match self.parse_clauses() {
            Ok(()) => {
                tracing::debug!(
                    targets = ?self.query.from,
                    has_criteria = self.query.criteria.expression.is_some(),
                    "parsed query"
                );
                Ok(self.query)
            }
            Err(e) => {
                tracing::debug!(cursor = e.cursor(), error = %e.message(), "query rejected");
                Err(e)
            }
        }
    }

    fn parse_clauses(&mut self) -> ParseResult<()> {
        while let Some(token) = self.stream.peek() {
            let keyword = match token.kind {
                TokenKind::Keyword => Keyword::parse(&token.value),
                _ => None,
            };
            tracing::trace!(clause = ?keyword, cursor = token.cursor, "parsing clause");

            match keyword {
                Some(Keyword::From) => self.parse_from()?,
                Some(Keyword::Where) => self.parse_where()?,
                Some(Keyword::OrderBy) => self.parse_order_by()?,
                Some(Keyword::Offset) => {
                    let first = self.parse_bound()?;
                    self.query.criteria.set_first_result(first);
                }
                Some(Keyword::MaxResults) => {
                    let max = self.parse_bound()?;
                    self.query.criteria.set_max_results(max);
                }
                Some(Keyword::And | Keyword::Or) | None => {
                    return Err(ParseError::unexpected(token, ""));
                }
            }
        }
        Ok(())
    }

    fn end_error(&self, message: &str) -> ParseError {
        ParseError::syntax(message, self.stream.end())
    }

    fn depth_error(&self, cursor: usize) -> ParseError {
        ParseError::syntax(
            format!(
                "Maximum nesting depth of {} exceeded",
                self.options.max_nesting_depth
            ),
            cursor,
        )
    }

    /// Ordering is only defined over one target.
    fn single_entity_error(token: &Token) -> ParseError {
        ParseError::syntax(
            format!(
                "Order By expression is allowed only for searching by single entity. Token \"{}\", value \"{}\"",
                token.kind, token.value
            ),
            token.cursor,
        )
    }

    /// `from name`, `from *` or `from (a, b, ...)`.
    fn parse_from(&mut self) -> ParseResult<()> {
        const WRONG_FROM: &str = "Wrong \"from\" statement of the expression";

        let from_token = self
            .stream
            .expect(TokenKind::Keyword, &[Keyword::From.as_str()], None)?;

        let Some(token) = self.stream.peek().cloned() else {
            return Err(self.end_error(WRONG_FROM));
        };

        let targets = match token.kind {
            TokenKind::String => Targets::entities([token.value]),
            TokenKind::Operator if token.value == "*" => Targets::All,
            TokenKind::Operator => {
                return Err(ParseError::syntax(
                    "Unexpected operator in from statement of the expression",
                    token.cursor,
                ));
            }
            TokenKind::Punctuation if token.value == "(" => {
                self.stream.next();
                let mut names = vec![];
                let close = loop {
                    let Some(token) = self.stream.peek() else {
                        return Err(self.end_error(WRONG_FROM));
                    };
                    match token.kind {
                        TokenKind::Punctuation if token.value == ")" => break token.cursor,
                        TokenKind::Punctuation if token.value == "," => {}
                        TokenKind::String => names.push(token.value.clone()),
                        _ => return Err(ParseError::unexpected(token, " in from statement")),
                    }
                    self.stream.next();
                };
                if names.is_empty() {
                    return Err(ParseError::syntax(WRONG_FROM, close));
                }
                Targets::entities(names)
            }
            _ => return Err(ParseError::unexpected(&token, " in from statement")),
        };

        if self.query.criteria.order.is_some() && targets.single().is_none() {
            return Err(Self::single_entity_error(&from_token));
        }

        // the target word, `*` or the closing parenthesis
        self.stream.next();
        self.query.set_from(targets);
        Ok(())
    }

    /// `where` followed by conditions, up to the next clause keyword.
    fn parse_where(&mut self) -> ParseResult<()> {
        let where_token = self
            .stream
            .expect(TokenKind::Keyword, &[Keyword::Where.as_str()], None)?;

        let mut parsed = 0;
        while let Some(token) = self.stream.peek() {
            let accepted = match token.kind {
                TokenKind::Keyword => !Keyword::parse(&token.value).is_some_and(|k| k.starts_clause()),
                TokenKind::String => true,
                TokenKind::Punctuation => token.value == "(",
                TokenKind::Operator | TokenKind::Number => false,
            };
            if !accepted {
                if token.kind == TokenKind::Keyword {
                    break;
                }
                return Err(ParseError::syntax(
                    format!("Unexpected token \"{}\" in where statement", token.kind),
                    token.cursor,
                ));
            }

            let cursor = token.cursor;
            let (connective, expr) = self.parse_condition()?;
            // a bare group joins the tree with its own connective
            let connective = connective.unwrap_or(match &expr {
                Expression::Composite { connective, .. } => *connective,
                Expression::Comparison(_) => Connective::And,
            });

            let child_depth = expr.depth();
            let tree_depth = match &self.query.criteria.expression {
                None => child_depth,
                Some(_) if self.query.criteria.extends_root(connective) => {
                    self.tree_depth.max(child_depth + 1)
                }
                Some(_) => 1 + self.tree_depth.max(child_depth),
            };
            // a lone comparison has depth 1, every level above it counts
            if tree_depth > self.options.max_nesting_depth + 1 {
                return Err(self.depth_error(cursor));
            }

            self.tree_depth = tree_depth;
            self.query.criteria.fold(connective, expr);
            parsed += 1;
        }

        if parsed == 0 {
            let cursor = self
                .stream
                .peek()
                .map_or(self.stream.end(), |t| t.cursor);
            tracing::trace!(cursor = where_token.cursor, "empty where clause");
            return Err(ParseError::syntax(
                "Condition is expected in where statement",
                cursor,
            ));
        }
        Ok(())
    }

    /// An optional `and` / `or`, then a comparison or a parenthesized group.
    fn parse_condition(&mut self) -> ParseResult<(Option<Connective>, Expression)> {
        let connective = match self.stream.peek() {
            Some(token) if token.kind == TokenKind::Keyword => {
                Keyword::parse(&token.value).and_then(Connective::from_keyword)
            }
            _ => None,
        };
        if connective.is_some() {
            self.stream.next();
        }

        let expr = if self.stream.current()?.is_punctuation("(") {
            self.parse_composite()?
        } else {
            self.parse_comparison()?
        };
        Ok((connective, expr))
    }

    /// `( condition { condition } )` where every condition after the first
    /// uses the same connective.
    fn parse_composite(&mut self) -> ParseResult<Expression> {
        let open = self
            .stream
            .expect(TokenKind::Punctuation, &["("], None)?;

        self.depth += 1;
        if self.depth > self.options.max_nesting_depth {
            return Err(self.depth_error(open.cursor));
        }

        let mut items: Vec<(Connective, usize, Expression)> = vec![];
        loop {
            let Some(token) = self.stream.peek() else {
                return Err(self.end_error("Composite expression must be closed by a parenthesis"));
            };
            if token.is_punctuation(")") {
                break;
            }
            let cursor = token.cursor;
            let (connective, expr) = self.parse_condition()?;
            items.push((connective.unwrap_or(Connective::And), cursor, expr));
        }
        let close = self
            .stream
            .expect(TokenKind::Punctuation, &[")"], None)?;
        self.depth -= 1;

        // the first condition's connective has nothing to join on this level
        let connective = match items.as_slice() {
            [] => {
                return Err(ParseError::syntax(
                    "Syntax error in composite expression",
                    close.cursor,
                ));
            }
            [(_, _, _)] => Connective::And,
            [_, (second, _, _), ..] => *second,
        };
        if let Some((_, cursor, _)) = items.iter().skip(2).find(|(c, _, _)| *c != connective) {
            return Err(ParseError::syntax(
                "Composite operators of different types are not allowed on single level",
                *cursor,
            ));
        }

        let mut children: Vec<Expression> = items.into_iter().map(|(_, _, expr)| expr).collect();
        if children.len() == 1 {
            return Ok(children.remove(0));
        }
        Ok(Expression::composite(connective, children))
    }

    /// `[type] field operator value` or `[type] field in ( values )`.
    fn parse_comparison(&mut self) -> ParseResult<Expression> {
        let field = self.parse_where_field()?;

        let op_token = self.stream.current()?.clone();
        let operator = Operator::parse(&op_token.value)
            .filter(|op| field.field_type.allows(*op))
            .ok_or_else(|| ParseError::syntax("Not allowed operator", op_token.cursor))?;
        self.stream.next();

        let value = if operator.takes_list() {
            Value::List(self.parse_arguments()?)
        } else {
            self.parse_value()?
        };

        Ok(Expression::comparison(field, operator, value))
    }

    /// Field of a comparison. Leaves the stream on the operator token.
    fn parse_where_field(&mut self) -> ParseResult<TypedField> {
        let first = self.stream.current()?.clone();
        if first.kind != TokenKind::String {
            return Err(Self::bad_comparison_token(&first));
        }
        self.stream.next();

        match self.stream.peek() {
            Some(name) if name.kind == TokenKind::String => {
                let field_type = FieldType::parse(&first.value).ok_or_else(|| {
                    ParseError::syntax(
                        format!("Unknown field type \"{}\"", first.value),
                        first.cursor,
                    )
                })?;
                let field = TypedField::new(field_type, name.value.clone());
                self.stream.next();
                // the operator must follow the name
                match self.stream.peek() {
                    Some(op) if op.kind == TokenKind::Operator => Ok(field),
                    Some(other) => Err(Self::bad_comparison_token(other)),
                    None => Err(self.end_error("Unexpected end of expression")),
                }
            }
            Some(op) if op.kind == TokenKind::Operator => Ok(TypedField::from_word(&first.value)),
            Some(other) => Err(Self::bad_comparison_token(other)),
            None => Err(self.end_error("Unexpected end of expression")),
        }
    }

    fn bad_comparison_token(token: &Token) -> ParseError {
        ParseError::syntax(
            format!("Unexpected token \"{}\" in comparison statement", token.kind),
            token.cursor,
        )
    }

    /// A single string or number literal.
    fn parse_value(&mut self) -> ParseResult<Value> {
        let Some(token) = self.stream.peek() else {
            return Err(self.end_error("Comparison value is expected"));
        };

        let value = match token.kind {
            TokenKind::String => Value::String(token.value.clone()),
            TokenKind::Number => Value::from_number(&token.value),
            _ => {
                return Err(ParseError::syntax(
                    "Comparison value is expected",
                    token.cursor,
                ));
            }
        };
        self.stream.next();
        Ok(value)
    }

    /// `( [value { , value }] )`. An empty list is accepted.
    pub fn parse_arguments(&mut self) -> ParseResult<Vec<Value>> {
        const CLOSE: &str = "A list of arguments must be closed by a parenthesis";

        self.stream.expect(
            TokenKind::Punctuation,
            &["("],
            Some("A list of arguments must begin with an opening parenthesis"),
        )?;

        let mut args = vec![];
        loop {
            match self.stream.peek() {
                None => return Err(self.end_error(CLOSE)),
                Some(token) if token.is_punctuation(")") => break,
                Some(_) => {}
            }
            if !args.is_empty() {
                self.stream.expect(
                    TokenKind::Punctuation,
                    &[","],
                    Some("Arguments must be separated by a comma"),
                )?;
            }
            args.push(self.parse_value()?);
        }
        self.stream
            .expect(TokenKind::Punctuation, &[")"], Some(CLOSE))?;

        Ok(args)
    }

    /// `order_by [type] field [asc|desc]`, only after selecting one entity.
    fn parse_order_by(&mut self) -> ParseResult<()> {
        let order_token = self
            .stream
            .expect(TokenKind::Keyword, &[Keyword::OrderBy.as_str()], None)?;

        if self.query.from.single().is_none() {
            return Err(Self::single_entity_error(&order_token));
        }

        let first = self.stream.expect(
            TokenKind::String,
            &[],
            Some("Ordering field name is expected"),
        )?;

        // a type name is a qualifier only when another word follows it
        let qualifier = FieldType::parse(&first.value)
            .filter(|_| self.stream.peek().is_some_and(|t| t.kind == TokenKind::String));
        let field = match qualifier {
            Some(field_type) => {
                let name = self.stream.expect(TokenKind::String, &[], None)?;
                TypedField::new(field_type, name.value)
            }
            None => TypedField::from_word(&first.value),
        };

        let direction = match self.stream.peek() {
            Some(token) if token.kind == TokenKind::String => {
                let direction = Direction::parse(&token.value).ok_or_else(|| {
                    ParseError::syntax(
                        format!(
                            "Ordering direction must be one of {}",
                            Direction::NAMES.join(", ")
                        ),
                        token.cursor,
                    )
                })?;
                self.stream.next();
                direction
            }
            _ => Direction::default(),
        };

        self.query.criteria.order_by(field, direction);
        Ok(())
    }

    /// Number after `offset` / `max_results`.
    fn parse_bound(&mut self) -> ParseResult<u64> {
        // the keyword
        self.stream.next();

        let token = self.stream.current()?;
        if token.kind == TokenKind::Number {
            if let Ok(n) = token.value.parse::<u64>() {
                self.stream.next();
                return Ok(n);
            }
        }
        Err(ParseError::unexpected(token, " in offset statements"))
    }
}
