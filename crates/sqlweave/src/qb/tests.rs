//! Integration tests for the qb module.

use crate::config::QbConfig;
use crate::dialect::Dialect;
use crate::error::SqlError;
use crate::qb::{JoinKind, SqlQb, WhereQb, delete_from, insert_into, select, update};
use crate::value::Value;
use crate::where_clause::{Logical, Where};

#[test]
fn test_select_basic() {
    let qb = select(&[]).from("users");
    assert_eq!(qb.to_sql(&Dialect::MySql), "SELECT * FROM users;");
}

#[test]
fn test_select_columns_and_aliases() {
    let qb = select(&["id", "u.name AS n", "COUNT(*) AS total"])
        .select_as("email", "mail")
        .from("users AS u");
    assert_eq!(
        qb.to_sql(&Dialect::MySql),
        "SELECT id, u.name n, COUNT(*) AS total, email mail FROM users u;"
    );
}

#[test]
fn test_select_with_conditions() {
    let qb = select(&[])
        .from("users")
        .where_cmp("status", "active")
        .where_op("age", ">", 18)
        .limit(10)
        .offset(20);

    assert_eq!(
        qb.to_sql(&Dialect::Postgres),
        "SELECT * FROM users WHERE status = $1 AND age > $2 LIMIT $3 OFFSET $4;"
    );
    assert_eq!(
        qb.values(),
        vec![Value::from("active"), Value::Int(18), Value::Int(10), Value::Int(20)]
    );
}

#[test]
fn test_context_alias_with_single_source() {
    let qb = select(&[])
        .from("users u")
        .where_cmp("id", 1)
        .where_cmp("o.total", "> 100")
        .order_by("name")
        .order_by_dir("o.created_at", "desc");

    assert_eq!(
        qb.to_sql(&Dialect::Postgres),
        "SELECT * FROM users u WHERE u.id = $1 AND o.total > $2 ORDER BY u.name, o.created_at DESC;"
    );
}

#[test]
fn test_no_context_alias_with_two_sources() {
    let qb = select(&[])
        .from("users u")
        .from_as("orders", "o")
        .where_cmp("id", 1)
        .order_by_asc("id");
    assert_eq!(
        qb.to_sql(&Dialect::MySql),
        "SELECT * FROM users u, orders o WHERE id = ? ORDER BY id ASC;"
    );
}

#[test]
fn test_joins() {
    let qb = select(&["u.id"])
        .from("users u")
        .join("profiles p", "p.user_id = u.id")
        .left_join("orders AS o", "o.user_id = u.id")
        .join_as(JoinKind::Full, "audit", "a", "a.user_id = u.id")
        .inner_join("teams", "teams.id = u.team_id")
        .right_join("roles r", "r.id = u.role_id");

    assert_eq!(
        qb.to_sql(&Dialect::MySql),
        "SELECT u.id FROM users u JOIN profiles p ON p.user_id = u.id \
         LEFT JOIN orders o ON o.user_id = u.id \
         FULL JOIN audit a ON a.user_id = u.id \
         INNER JOIN teams ON teams.id = u.team_id \
         RIGHT JOIN roles r ON r.id = u.role_id;"
    );
}

#[test]
fn test_top_level_connectives() {
    let qb = select(&[])
        .from("t")
        .where_cmp("a", 1)
        .or_where(Where::cmp("b", 2))
        .xor_where(Where::cmp("c", 3).and(Where::cmp("d", 4)));

    assert_eq!(
        qb.to_sql(&Dialect::Postgres),
        "SELECT * FROM t WHERE a = $1 OR b = $2 XOR (c = $3 AND d = $4);"
    );
    assert_eq!(qb.values().len(), 4);
}

#[test]
fn test_where_keeps_own_logical() {
    let qb = select(&[])
        .from("t")
        .where_cmp("a", 1)
        .where_(Where::cmp("b", 2).with_logical(Logical::Or));
    assert_eq!(qb.to_sql(&Dialect::MySql), "SELECT * FROM t WHERE a = ? OR b = ?;");
}

#[test]
fn test_raw_where_numbering_in_statement() {
    let qb = select(&[])
        .from("t")
        .where_cmp("a", 1)
        .where_raw("b = $ OR c = $", vec![2, 3])
        .where_expr("d IS NOT NULL")
        .limit(5);

    assert_eq!(
        qb.to_sql(&Dialect::Postgres),
        "SELECT * FROM t WHERE a = $1 AND b = $2 OR c = $3 AND d IS NOT NULL LIMIT $4;"
    );
    assert_eq!(
        qb.values(),
        vec![Value::Int(1), Value::Int(2), Value::Int(3), Value::Int(5)]
    );
}

#[test]
fn test_where_op_error_is_recorded() {
    let qb = select(&[]).from("t").where_op("a", "LIKE", 1).where_op("b", ">", Value::Null);
    assert!(qb.validate().unwrap_err().is_classification());
    assert!(qb.build(&Dialect::MySql).is_err());
}

#[test]
fn test_bad_from_is_syntax_error() {
    let qb = select(&[]).from("users u extra");
    assert!(matches!(qb.validate(), Err(SqlError::Syntax(_))));
}

#[test]
fn test_insert_basic() {
    let qb = insert_into("users")
        .value("username", "alice")
        .value("email", "alice@example.com");

    assert_eq!(
        qb.to_sql(&Dialect::Postgres),
        "INSERT INTO users (username, email) VALUES ($1, $2);"
    );
    assert_eq!(
        qb.values(),
        vec![Value::from("alice"), Value::from("alice@example.com")]
    );
}

#[test]
fn test_insert_default_values_returning() {
    let qb = insert_into("events").returning("id").returning("created_at");
    assert_eq!(
        qb.to_sql(&Dialect::Postgres),
        "INSERT INTO events DEFAULT VALUES RETURNING id, created_at;"
    );
    assert!(qb.values().is_empty());
}

#[test]
fn test_update_basic() {
    let qb = update("users").set("status", "inactive").where_cmp("id", 1i64);

    assert_eq!(
        qb.to_sql(&Dialect::Postgres),
        "UPDATE users SET status = $1 WHERE id = $2;"
    );
    assert_eq!(qb.values(), vec![Value::from("inactive"), Value::Int(1)]);
}

#[test]
fn test_update_set_values_come_first() {
    let qb = update("users")
        .set("a", 1)
        .set("b", None::<i32>)
        .where_cmp("id", vec![7, 8])
        .returning("id");

    assert_eq!(
        qb.to_sql(&Dialect::Postgres),
        "UPDATE users SET a = $1, b = $2 WHERE id IN ($3, $4) RETURNING id;"
    );
    assert_eq!(
        qb.values(),
        vec![Value::Int(1), Value::Null, Value::Int(7), Value::Int(8)]
    );
}

#[test]
fn test_update_requires_set() {
    let qb = update("users").where_cmp("id", 1);
    assert!(matches!(qb.validate(), Err(SqlError::Syntax(_))));
}

#[test]
fn test_delete_basic() {
    let qb = delete_from("users").where_cmp("id", 1i64);
    assert_eq!(qb.to_sql(&Dialect::Postgres), "DELETE FROM users WHERE id = $1;");
}

#[test]
fn test_delete_without_where_deletes_all() {
    let qb = delete_from("users");
    assert_eq!(qb.to_sql(&Dialect::MySql), "DELETE FROM users;");
}

#[test]
fn test_delete_using_dedupes() {
    let qb = delete_from("a")
        .using("b, c")
        .using("c")
        .using(" d ")
        .where_expr("a.b_id = b.id");
    assert_eq!(
        qb.to_sql(&Dialect::Postgres),
        "DELETE FROM a USING b, c, d WHERE a.b_id = b.id;"
    );
}

#[test]
fn test_delete_target_with_join() {
    let qb = delete_from("users u")
        .target("u")
        .inner_join("bans b", "b.user_id = u.id")
        .where_cmp("b.active", true);
    assert_eq!(
        qb.to_sql(&Dialect::MySql),
        "DELETE u FROM users u INNER JOIN bans b ON b.user_id = u.id WHERE b.active = ?;"
    );
}

#[test]
fn test_build_returns_sql_and_values() {
    let built = select(&[])
        .from("t")
        .where_cmp("a", "IN (1, 'x')")
        .build(&Dialect::Postgres)
        .unwrap();
    assert_eq!(built.sql, "SELECT * FROM t WHERE a IN ($1, $2);");
    assert_eq!(built.values, vec![Value::Int(1), Value::from("x")]);
}

#[test]
fn test_build_with_config() {
    let qb = select(&[]).from("t").where_raw("a = $ AND b = $", vec![1]);

    let permissive = QbConfig::new().with_dialect("postgres");
    assert_eq!(
        qb.build_with(&permissive).unwrap().sql,
        "SELECT * FROM t WHERE a = $1 AND b = $2;"
    );

    let checked = permissive.with_raw_param_check();
    assert!(matches!(
        qb.build_with(&checked),
        Err(SqlError::ParamMismatch {
            expected: 2,
            supplied: 1,
            ..
        })
    ));
}

#[test]
fn test_build_with_strict_dialect() {
    let qb = select(&[]).from("t").where_cmp("a", 1);

    let loose = QbConfig::new().with_dialect("sqlite");
    assert_eq!(qb.build_with(&loose).unwrap().sql, "SELECT * FROM t WHERE a = ;");

    let strict = loose.strict();
    assert_eq!(
        qb.build_with(&strict),
        Err(SqlError::UnrecognizedDialect("sqlite".to_string()))
    );
}
