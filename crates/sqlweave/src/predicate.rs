//! Leaf predicates.
//!
//! Every leaf renders against a starting placeholder index and hands back the
//! next free one, so a caller can thread a single counter through a whole
//! statement. Values are collected separately and always come out in the
//! order their placeholders were assigned.

use crate::column::ColumnRef;
use crate::dialect::{Dialect, PlaceholderStyle};
use crate::error::{SqlError, SqlResult};
use crate::value::Value;
use std::fmt;
use std::str::FromStr;

/// SQL text plus the next unused placeholder index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub sql: String,
    pub next_index: usize,
}

impl Rendered {
    pub fn new(sql: impl Into<String>, next_index: usize) -> Self {
        Self {
            sql: sql.into(),
            next_index,
        }
    }
}

/// Comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    /// `<>`
    Ne,
    /// `!=`
    NotEq,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl CompareOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "<>",
            CompareOp::NotEq => "!=",
            CompareOp::Gt => ">",
            CompareOp::Gte => ">=",
            CompareOp::Lt => "<",
            CompareOp::Lte => "<=",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompareOp {
    type Err = SqlError;

    fn from_str(s: &str) -> SqlResult<Self> {
        match s.trim() {
            "=" => Ok(CompareOp::Eq),
            "<>" => Ok(CompareOp::Ne),
            "!=" => Ok(CompareOp::NotEq),
            ">" => Ok(CompareOp::Gt),
            ">=" => Ok(CompareOp::Gte),
            "<" => Ok(CompareOp::Lt),
            "<=" => Ok(CompareOp::Lte),
            other => Err(SqlError::classification(format!(
                "The given operator is unsupported: {other}"
            ))),
        }
    }
}

/// A raw boolean expression with caller-supplied values.
///
/// Under a numbered dialect every `$` not already followed by a digit is
/// numbered from the running counter. Other dialects emit the text as is.
/// The number of values is trusted; see [`RawExpr::check_params`].
#[derive(Debug, Clone, PartialEq)]
pub struct RawExpr {
    pub text: String,
    pub values: Vec<Value>,
}

impl RawExpr {
    pub fn new(text: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            text: text.into(),
            values,
        }
    }

    pub fn render(&self, dialect: &Dialect, start_index: usize) -> Rendered {
        if !dialect.is_numbered() {
            return Rendered::new(self.text.clone(), start_index);
        }

        let mut sql = String::with_capacity(self.text.len() + 8);
        let mut next_index = start_index;
        let mut chars = self.text.chars().peekable();
        while let Some(ch) = chars.next() {
            sql.push(ch);
            if ch == '$' && !chars.peek().is_some_and(char::is_ascii_digit) {
                sql.push_str(&next_index.to_string());
                next_index += 1;
            }
        }
        Rendered::new(sql, next_index)
    }

    /// Number of markers the dialect binds a new value to.
    ///
    /// Positional dialects count `?`. Numbered dialects count every bare `$`;
    /// a pre-numbered `$n` refers back to a slot that is already bound.
    pub fn marker_count(&self, dialect: &Dialect) -> usize {
        match dialect.style() {
            PlaceholderStyle::Positional => self.text.matches('?').count(),
            PlaceholderStyle::Numbered => self.render(dialect, 1).next_index - 1,
            PlaceholderStyle::Empty => 0,
        }
    }

    /// Fail if the marker count differs from the number of supplied values.
    pub fn check_params(&self, dialect: &Dialect) -> SqlResult<()> {
        let expected = self.marker_count(dialect);
        if dialect.style() == PlaceholderStyle::Empty || expected == self.values.len() {
            return Ok(());
        }
        Err(SqlError::ParamMismatch {
            sql: self.text.clone(),
            expected,
            supplied: self.values.len(),
        })
    }
}

/// A single boolean condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// `column op ?`
    Comparison {
        column: ColumnRef,
        op: CompareOp,
        value: Value,
    },
    /// `column IN (?, ?, ...)`. An empty list renders `IN ()`.
    InList { column: ColumnRef, values: Vec<Value> },
    /// `column IS [NOT] NULL`
    NullCheck { column: ColumnRef, negated: bool },
    Raw(RawExpr),
}

impl Predicate {
    pub fn comparison(column: impl Into<ColumnRef>, op: CompareOp, value: impl Into<Value>) -> Self {
        Predicate::Comparison {
            column: column.into(),
            op,
            value: value.into(),
        }
    }

    pub fn in_list<T: Into<Value>>(column: impl Into<ColumnRef>, values: Vec<T>) -> Self {
        Predicate::InList {
            column: column.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_null(column: impl Into<ColumnRef>) -> Self {
        Predicate::NullCheck {
            column: column.into(),
            negated: false,
        }
    }

    pub fn is_not_null(column: impl Into<ColumnRef>) -> Self {
        Predicate::NullCheck {
            column: column.into(),
            negated: true,
        }
    }

    pub fn raw(text: impl Into<String>, values: Vec<Value>) -> Self {
        Predicate::Raw(RawExpr::new(text, values))
    }

    /// Render starting at `start_index`.
    ///
    /// `context_alias` is used only for columns built without an alias.
    pub fn render(&self, dialect: &Dialect, context_alias: Option<&str>, start_index: usize) -> Rendered {
        match self {
            Predicate::Comparison { column, op, .. } => Rendered::new(
                format!(
                    "{} {} {}",
                    column.qualified(context_alias),
                    op,
                    dialect.placeholder(start_index)
                ),
                start_index + 1,
            ),
            Predicate::InList { column, values } => {
                let placeholders: Vec<String> = (start_index..start_index + values.len())
                    .map(|idx| dialect.placeholder(idx))
                    .collect();
                Rendered::new(
                    format!(
                        "{} IN ({})",
                        column.qualified(context_alias),
                        placeholders.join(", ")
                    ),
                    start_index + values.len(),
                )
            }
            Predicate::NullCheck { column, negated } => {
                let check = if *negated { "IS NOT NULL" } else { "IS NULL" };
                Rendered::new(
                    format!("{} {}", column.qualified(context_alias), check),
                    start_index,
                )
            }
            Predicate::Raw(raw) => raw.render(dialect, start_index),
        }
    }

    /// Render standalone: no context alias, numbering from 1.
    pub fn to_sql(&self, dialect: &Dialect) -> String {
        self.render(dialect, None, 1).sql
    }

    /// Bound values, in placeholder order.
    pub fn values(&self) -> Vec<Value> {
        match self {
            Predicate::Comparison { value, .. } => vec![value.clone()],
            Predicate::InList { values, .. } => values.clone(),
            Predicate::NullCheck { .. } => Vec::new(),
            Predicate::Raw(raw) => raw.values.clone(),
        }
    }
}
