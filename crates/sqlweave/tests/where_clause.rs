use regex::Regex;
use serde_json::json;
use sqlweave::{ColumnRef, CompareOp, Dialect, Logical, Predicate, Rendered, SqlError, Value, Where};

/// A tree that touches every leaf kind, two levels deep.
fn mixed_tree() -> Where {
    Where::group([
        Where::op("age", ">", 30).unwrap(),
        Where::group_with(
            Logical::Or,
            [
                Where::cmp("id", vec![1, 2, 3]),
                Where::cmp("deleted_at", Value::Null).with_logical(Logical::Xor),
                Where::raw("score BETWEEN $ AND $", vec![10, 20]),
            ],
        )
        .unwrap(),
        Where::cmp("name", "= 'x'").with_logical(Logical::Or),
    ])
    .unwrap()
}

fn leaf_placeholders(filter: &Where) -> usize {
    match filter.predicate() {
        Some(Predicate::Comparison { .. }) => 1,
        Some(Predicate::InList { values, .. }) => values.len(),
        Some(Predicate::NullCheck { .. }) => 0,
        Some(Predicate::Raw(raw)) => raw.marker_count(&Dialect::Postgres),
        None => filter.children().iter().map(leaf_placeholders).sum(),
    }
}

#[test]
fn comparison_renders_per_dialect() {
    let p = Predicate::comparison("age", CompareOp::Gt, 30);
    assert_eq!(p.to_sql(&Dialect::MySql), "age > ?");
    assert_eq!(p.values(), vec![Value::Int(30)]);
    assert_eq!(
        p.render(&Dialect::Postgres, None, 1),
        Rendered::new("age > $1", 2)
    );
}

#[test]
fn in_list_renders_from_offset() {
    let p = Predicate::in_list("id", vec![1, 2, 3]);
    assert_eq!(
        p.render(&Dialect::Postgres, None, 5),
        Rendered::new("id IN ($5, $6, $7)", 8)
    );
    assert_eq!(p.values(), vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
}

#[test]
fn in_operator_with_list() {
    let w = Where::op("a", "IN", vec![1, 2, 3, 4]).unwrap();
    assert_eq!(w.to_sql(&Dialect::MySql), "a IN (?, ?, ?, ?)");
    assert_eq!(w.to_sql(&Dialect::Postgres), "a IN ($1, $2, $3, $4)");

    let empty = Where::op("a", "IN", Vec::<i32>::new()).unwrap();
    assert_eq!(empty.to_sql(&Dialect::MySql), "a IN ()");
    assert_eq!(empty.to_sql(&Dialect::Postgres), "a IN ()");
}

#[test]
fn negated_null_check_in_either_dialect() {
    let p = Predicate::is_not_null("deleted_at");
    assert_eq!(p.to_sql(&Dialect::MySql), "deleted_at IS NOT NULL");
    assert_eq!(p.to_sql(&Dialect::Postgres), "deleted_at IS NOT NULL");
    assert!(p.values().is_empty());
}

#[test]
fn or_group_of_two() {
    let w = Where::group([
        Where::op("a", "=", 1).unwrap(),
        Where::op("b", ">", 2).unwrap().with_logical(Logical::Or),
    ])
    .unwrap();
    assert_eq!(w.to_sql(&Dialect::MySql), "(a = ? OR b > ?)");
    assert_eq!(w.values(), vec![Value::Int(1), Value::Int(2)]);
}

#[test]
fn null_classification() {
    assert_eq!(
        Where::cmp("x", Value::Null).predicate(),
        Some(&Predicate::is_null("x"))
    );
    assert_eq!(
        Where::op("x", "<>", Value::Null).unwrap().predicate(),
        Some(&Predicate::is_not_null("x"))
    );
    assert!(matches!(
        Where::op("x", ">", Value::Null),
        Err(SqlError::Classification(_))
    ));
}

#[test]
fn placeholder_monotonicity() {
    let tree = mixed_tree();
    let expected = leaf_placeholders(&tree);
    for start in [1, 4, 100] {
        let rendered = tree.render(&Dialect::Postgres, None, start);
        assert_eq!(rendered.next_index, start + expected);
    }
}

#[test]
fn value_placeholder_parity() {
    let tree = mixed_tree();
    let values = tree.values();
    assert_eq!(values.len(), leaf_placeholders(&tree));
    assert_eq!(
        values,
        vec![
            Value::Int(30),
            Value::Int(1),
            Value::Int(2),
            Value::Int(3),
            Value::Int(10),
            Value::Int(20),
            Value::from("x"),
        ]
    );
}

#[test]
fn dialects_share_structure() {
    let tree = Where::group([
        Where::op("age", ">", 30).unwrap(),
        Where::cmp("id", vec![1, 2, 3]).with_logical(Logical::Or),
        Where::cmp("deleted_at", "IS NULL"),
    ])
    .unwrap();
    let numbered = Regex::new(r"\$\d+").unwrap();

    let pg = tree.to_sql(&Dialect::Postgres);
    let my = tree.to_sql(&Dialect::MySql);
    assert_eq!(numbered.replace_all(&pg, "?"), my);
    assert_eq!(my, "(age > ? OR id IN (?, ?, ?) AND deleted_at IS NULL)");
}

#[test]
fn prenumbered_raw_markers_keep_parity_and_monotonicity() {
    let tree = Where::cmp("a", 1).and(Where::raw("b = $1 OR c = $", vec![2]));
    let expected = leaf_placeholders(&tree);
    assert_eq!(expected, 2);
    assert_eq!(tree.values().len(), expected);
    for start in [1, 6] {
        assert_eq!(tree.render(&Dialect::Postgres, None, start).next_index, start + expected);
    }
    assert!(tree.check_params(&Dialect::Postgres).is_ok());
}

#[test]
fn values_are_idempotent() {
    let tree = mixed_tree();
    let before = tree.values();
    let _ = tree.render(&Dialect::Postgres, Some("t"), 9);
    let _ = tree.to_sql(&Dialect::MySql);
    assert_eq!(tree.values(), before);
    assert_eq!(tree.values(), tree.values());
}

#[test]
fn alias_precedence() {
    let own = Where::new(Predicate::in_list(ColumnRef::with_alias("alias1", "column"), vec![1, 2]));
    assert_eq!(
        own.render(&Dialect::MySql, Some("alias2"), 3).sql,
        "alias1.column IN (?, ?)"
    );

    let dotted = Where::cmp("alias1.column", 1);
    assert_eq!(dotted.render(&Dialect::MySql, Some("alias2"), 1).sql, "alias1.column = ?");

    let adopted = Where::cmp("column", vec![1, 2]);
    assert_eq!(
        adopted.render(&Dialect::Postgres, Some("alias2"), 3).sql,
        "alias2.column IN ($3, $4)"
    );
}

#[test]
fn parenthesization_depends_on_child_count() {
    let single = Where::group([Where::cmp("a", 1)]).unwrap();
    assert_eq!(single.to_sql(&Dialect::MySql), "a = ?");

    let deep = Where::group([Where::group([Where::group([
        Where::cmp("a", 1),
        Where::cmp("b", 2),
    ])
    .unwrap()])
    .unwrap()])
    .unwrap();
    assert_eq!(deep.to_sql(&Dialect::MySql), "(a = ? AND b = ?)");

    let sql = mixed_tree().to_sql(&Dialect::MySql);
    assert_eq!(sql.matches('(').count(), sql.matches(')').count());
    assert!(sql.starts_with('(') && sql.ends_with(')'));
}

#[test]
fn raw_expression_numbering() {
    let w = Where::raw("a > 'x' OR b = $ OR c = $2", vec![Value::from("y")]);
    assert_eq!(
        w.render(&Dialect::Postgres, None, 7),
        Rendered::new("a > 'x' OR b = $7 OR c = $2", 8)
    );
    assert_eq!(
        w.render(&Dialect::MySql, None, 7),
        Rendered::new("a > 'x' OR b = $ OR c = $2", 7)
    );
    assert_eq!(w.values(), vec![Value::from("y")]);
}

#[test]
fn raw_mismatch_is_unchecked_until_asked() {
    let w = Where::raw("a = ? OR b = ?", vec![1]);
    assert_eq!(w.to_sql(&Dialect::MySql), "a = ? OR b = ?");
    assert_eq!(w.values().len(), 1);
    assert!(matches!(
        w.check_params(&Dialect::MySql),
        Err(SqlError::ParamMismatch { expected: 2, supplied: 1, .. })
    ));
}

#[test]
fn unknown_dialect_degrades_to_empty_placeholders() {
    let dialect = Dialect::from_name("firebird");
    let w = Where::cmp("a", 1).and(Where::cmp("b", vec![1, 2]));
    assert_eq!(w.to_sql(&dialect), "(a =  AND b IN (, ))");
    assert!("firebird".parse::<Dialect>().is_err());
}

#[test]
fn fragments_are_classified() {
    let cases = [
        ("> 5", "c > $1", vec![Value::Int(5)]),
        ("<= 2.5", "c <= $1", vec![Value::Float(2.5)]),
        ("!= 'abc'", "c != $1", vec![Value::from("abc")]),
        ("= false", "c = $1", vec![Value::Bool(false)]),
        ("IS NOT NULL", "c IS NOT NULL", vec![]),
        ("in (1, 'two')", "c IN ($1, $2)", vec![Value::Int(1), Value::from("two")]),
        ("NULL", "c IS NULL", vec![]),
        ("hello world", "c = $1", vec![Value::from("hello world")]),
    ];
    for (fragment, sql, values) in cases {
        let w = Where::cmp("c", fragment);
        assert_eq!(w.to_sql(&Dialect::Postgres), sql, "fragment {fragment:?}");
        assert_eq!(w.values(), values, "fragment {fragment:?}");
    }
}

#[test]
fn dynamic_arguments() {
    let tree = Where::group([
        Where::from_json_args(&[json!("status"), json!("active")]).unwrap(),
        Where::from_json_args(&[json!("OR"), json!("age"), json!(">="), json!(21)]).unwrap(),
        Where::from_json_args(&[json!("AND"), json!("u.id = o.user_id")]).unwrap(),
        Where::from_json_args(&[json!("XOR"), json!("tag"), json!(["a", "b"])]).unwrap(),
    ])
    .unwrap();

    assert_eq!(
        tree.to_sql(&Dialect::Postgres),
        "(status = $1 OR age >= $2 AND u.id = o.user_id XOR tag IN ($3, $4))"
    );
    assert_eq!(
        tree.values(),
        vec![Value::from("active"), Value::Int(21), Value::from("a"), Value::from("b")]
    );
}
