//! Turning loose `(column, operator, value)` input into a leaf predicate.
//!
//! Classification happens once, when a filter is built. A predicate that comes
//! out of here always renders.

use crate::column::ColumnRef;
use crate::error::{SqlError, SqlResult};
use crate::predicate::{CompareOp, Predicate};
use crate::value::{Operand, Value};
use regex::Regex;
use std::sync::OnceLock;

fn comparison_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(<>|!=|>=|<=|=|>|<)\s*(.+?)\s*$").expect("invalid built-in comparison regex")
    })
}

fn null_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^IS\s+(NOT\s+)?NULL$").expect("invalid built-in null regex"))
}

fn in_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^IN\s*\(([^)]*)\)$").expect("invalid built-in IN regex"))
}

/// One item of an `IN (...)` list: a quoted string or a run without commas.
fn list_item_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"'(?:[^']|'')*'|"[^"]*"|[^,]+"#).expect("invalid built-in list item regex")
    })
}

/// Classify a filter into a leaf predicate.
///
/// Without an operator this is [`classify_value`] and cannot fail. With one,
/// the operator has to fit the value: `=`, `IS`, `<>`, `!=` or `IS NOT` for
/// NULL, `IN` for a list, a comparison operator for anything else.
pub fn classify(
    column: impl Into<ColumnRef>,
    op: Option<&str>,
    operand: impl Into<Operand>,
) -> SqlResult<Predicate> {
    let column = column.into();
    let operand = operand.into();
    let Some(op) = op else {
        return Ok(classify_value(column, operand));
    };
    let op = normalize_op(op);

    match operand {
        Operand::Value(value) if value.is_null_like() => {
            let negated = match op.as_str() {
                "=" | "IS" => false,
                "<>" | "!=" | "IS NOT" => true,
                other => {
                    return Err(SqlError::classification(format!(
                        "Operator {other} cannot be used with a NULL value, expected =, <>, !=, IS or IS NOT"
                    )));
                }
            };
            Ok(Predicate::NullCheck { column, negated })
        }
        Operand::List(values) if op == "IN" => Ok(Predicate::InList { column, values }),
        Operand::List(_) => Err(SqlError::classification(format!(
            "Operator {op} cannot be used with a list value, expected IN"
        ))),
        Operand::Value(value) => Ok(Predicate::Comparison {
            column,
            op: op.parse::<CompareOp>()?,
            value,
        }),
    }
}

/// Classify a value given without an operator.
///
/// Precedence, first match wins: NULL (or the text `NULL`) becomes
/// `IS NULL`, a list becomes `IN`, text is parsed as a fragment (see
/// [`classify_fragment`]), anything else is compared with `=`.
pub fn classify_value(column: impl Into<ColumnRef>, operand: impl Into<Operand>) -> Predicate {
    let column = column.into();
    match operand.into() {
        Operand::Value(value) if value.is_null_like() => Predicate::NullCheck {
            column,
            negated: false,
        },
        Operand::List(values) => Predicate::InList { column, values },
        Operand::Value(Value::Text(fragment)) => classify_fragment(column, &fragment),
        Operand::Value(value) => Predicate::Comparison {
            column,
            op: CompareOp::Eq,
            value,
        },
    }
}

/// Parse a free-text fragment, falling back to an `=` comparison against the
/// whole fragment when no shape matches.
pub fn classify_fragment(column: impl Into<ColumnRef>, fragment: &str) -> Predicate {
    let column = column.into();
    match parse_fragment(column.clone(), fragment) {
        Some(predicate) => predicate,
        None => {
            tracing::trace!(
                target: "sqlweave.classify",
                column = %column,
                fragment,
                "fragment matched no shape, comparing as literal"
            );
            Predicate::Comparison {
                column,
                op: CompareOp::Eq,
                value: Value::Text(fragment.to_string()),
            }
        }
    }
}

/// Try, in order: `<op> literal`, `IS [NOT] NULL`, `IN (a, b, ...)`.
pub fn parse_fragment(column: impl Into<ColumnRef>, fragment: &str) -> Option<Predicate> {
    let column = column.into();
    let fragment = fragment.trim();

    if let Some(caps) = comparison_re().captures(fragment) {
        let op = caps[1].parse::<CompareOp>().ok()?;
        let value = parse_literal(&caps[2]);
        return Some(match (op, value) {
            (CompareOp::Eq, Value::Null) => Predicate::NullCheck {
                column,
                negated: false,
            },
            (CompareOp::Ne | CompareOp::NotEq, Value::Null) => Predicate::NullCheck {
                column,
                negated: true,
            },
            (op, value) => Predicate::Comparison { column, op, value },
        });
    }

    if let Some(caps) = null_re().captures(fragment) {
        return Some(Predicate::NullCheck {
            column,
            negated: caps.get(1).is_some(),
        });
    }

    if let Some(caps) = in_re().captures(fragment) {
        let values = list_item_re()
            .find_iter(&caps[1])
            .map(|m| m.as_str().trim())
            .filter(|item| !item.is_empty())
            .map(parse_literal)
            .collect();
        return Some(Predicate::InList { column, values });
    }

    None
}

/// Convert a literal from SQL-ish text.
///
/// Quoted text stays text. Unquoted `NULL` is null. Otherwise integer, then
/// float, then boolean are tried before falling back to the text itself.
pub fn parse_literal(raw: &str) -> Value {
    let raw = raw.trim();

    if let Some(text) = unquote(raw) {
        return Value::Text(text);
    }
    if raw.eq_ignore_ascii_case("null") {
        return Value::Null;
    }
    if let Ok(i) = raw.parse::<i64>() {
        return Value::Int(i);
    }
    if let Ok(f) = raw.parse::<f64>() {
        if f.is_finite() {
            return Value::Float(f);
        }
    }
    if raw.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if raw.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    Value::Text(raw.to_string())
}

fn unquote(raw: &str) -> Option<String> {
    let mut chars = raw.chars();
    let first = chars.next()?;
    let last = chars.next_back()?;
    match (first, last) {
        ('\'', '\'') => Some(raw[1..raw.len() - 1].replace("''", "'")),
        ('"', '"') => Some(raw[1..raw.len() - 1].to_string()),
        _ => None,
    }
}

/// Uppercase and collapse inner whitespace, so `is  not` reads as `IS NOT`.
fn normalize_op(op: &str) -> String {
    op.split_whitespace()
        .map(str::to_ascii_uppercase)
        .collect::<Vec<_>>()
        .join(" ")
}
