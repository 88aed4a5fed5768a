// Grammar Compliance Tests
//
// One test per documented behavior of the query language: defaults,
// clause shapes, operator gating and error reporting.

use pretty_assertions::assert_eq;
use searchql::{
    parse, Direction, Expression, FieldType, Operator, Query, Targets, TypedField, Value,
};

fn comparison(input: &str) -> searchql::Comparison {
    match parse(input).unwrap().criteria.expression {
        Some(Expression::Comparison(cmp)) => cmp,
        other => panic!("Expected a single comparison for {input:?}, got {other:?}"),
    }
}

// ============================================================================
// Section: Determinism
// ============================================================================

#[test]
fn grammar_parsing_is_deterministic() {
    let input = "from (a, b) where (integer x >= 1 or decimal y < 2.5) and name ~ foo offset 3 max_results 9";
    assert_eq!(parse(input).unwrap(), parse(input).unwrap());
}

// ============================================================================
// Section: FROM
// ============================================================================

#[test]
fn grammar_wildcard_is_the_default() {
    assert_eq!(parse("from *").unwrap().from, Targets::All);
    assert_eq!(parse("").unwrap().from, Targets::All);
    assert_eq!(parse("from *").unwrap(), parse("").unwrap());
}

#[test]
fn grammar_from_list_in_input_order() {
    assert_eq!(
        parse("from (a, b, c)").unwrap().from,
        Targets::Entities(vec!["a".into(), "b".into(), "c".into()])
    );
    assert_eq!(
        parse("from ()").unwrap_err().message(),
        "Wrong \"from\" statement of the expression"
    );
}

// ============================================================================
// Section: WHERE
// ============================================================================

#[test]
fn grammar_text_field_default_type() {
    let explicit = comparison("where text.name contains \"x\"");
    let implicit = comparison("where name contains \"x\"");

    assert_eq!(explicit.field.field_type, FieldType::Text);
    assert_eq!(explicit.field.name, "name");
    assert_eq!(explicit.field.to_string(), "text.name");
    assert_eq!(explicit.operator, Operator::Contains);
    assert_eq!(explicit.value, Value::String("x".into()));
    assert_eq!(explicit, implicit);
}

#[test]
fn grammar_operator_gated_by_type() {
    let err = parse("where integer.qty contains 5").unwrap_err();
    assert_eq!(err.message(), "Not allowed operator");
}

#[test]
fn grammar_composite_single_connective() {
    let query = parse("where (a.x = 1 and a.y = 2)").unwrap();
    assert_eq!(
        query.criteria.expression,
        Some(Expression::and(vec![
            Expression::comparison(TypedField::text("a.x"), Operator::Equals, 1i64),
            Expression::comparison(TypedField::text("a.y"), Operator::Equals, 2i64),
        ]))
    );

    let err = parse("where (a.x = 1 and a.y = 2 or a.z = 3)").unwrap_err();
    assert_eq!(
        err.message(),
        "Composite operators of different types are not allowed on single level"
    );
}

#[test]
fn grammar_in_list_and_empty_list() {
    let cmp = comparison("where integer qty in (1,2,3)");
    assert_eq!(cmp.operator, Operator::In);
    assert_eq!(cmp.value, Value::List(vec![1i64.into(), 2i64.into(), 3i64.into()]));

    let cmp = comparison("where integer qty in ()");
    assert_eq!(cmp.operator, Operator::In);
    assert_eq!(cmp.value, Value::List(vec![]));
}

#[test]
fn grammar_in_requires_non_text_field() {
    // untyped fields are text, and text does not allow in
    assert_eq!(
        parse("where qty in (1,2,3)").unwrap_err().message(),
        "Not allowed operator"
    );
}

// ============================================================================
// Section: ORDER BY
// ============================================================================

#[test]
fn grammar_order_by_single_entity() {
    let query = parse("from (a) order_by integer.id desc").unwrap();
    let order = query.order().unwrap();
    assert_eq!(order.field.to_string(), "integer.id");
    assert_eq!(order.direction, Direction::Desc);

    let err = parse("from (a,b) order_by integer.id").unwrap_err();
    assert!(
        err.message()
            .starts_with("Order By expression is allowed only for searching by single entity"),
        "{}",
        err
    );
    assert_eq!(err.cursor(), 11);
}

// ============================================================================
// Section: OFFSET / MAX_RESULTS
// ============================================================================

#[test]
fn grammar_pagination_bounds() {
    assert_eq!(parse("offset 10").unwrap().offset(), Some(10));
    assert_eq!(parse("max_results 20").unwrap().max_results(), Some(20));

    let err = parse("offset abc").unwrap_err();
    assert_eq!(
        err.message(),
        "Unexpected token \"string\", value \"abc\" in offset statements"
    );
    assert_eq!(err.cursor(), 7);
}

// ============================================================================
// Section: Leftover tokens
// ============================================================================

#[test]
fn grammar_leftover_tokens_fail() {
    let err = parse("from a where integer x = 1 ) offset 2").unwrap_err();
    assert_eq!(err.cursor(), 27);

    let err = parse("offset 2 3").unwrap_err();
    assert_eq!(err.message(), "Unexpected token \"number\", value \"3\"");
    assert_eq!(err.cursor(), 9);
}

// ============================================================================
// Section: Errors are values
// ============================================================================

#[test]
fn grammar_malformed_input_never_panics() {
    let inputs = [
        "(", ")", ",", "*", "where (", "where ((", "from (", "order_by", "offset",
        "where a", "where a =", "where a in", "where a in (", "\"", "'", "!", "from a order_by",
        "where integer", "where integer a", "where ) (", "and or and", "max_results max_results",
    ];
    for input in inputs {
        assert!(parse(input).is_err(), "expected an error for {input:?}");
    }
}

#[test]
fn grammar_default_query_shape() {
    let query = parse("").unwrap();
    assert_eq!(query, Query::new());
    assert_eq!(query.order(), None);
    assert_eq!(query.offset(), None);
    assert_eq!(query.max_results(), None);
}
