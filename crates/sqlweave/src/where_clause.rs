//! Recursive WHERE trees.
//!
//! A [`Where`] is either a single leaf [`Predicate`] or an ordered, non-empty
//! list of child `Where`s. Each node carries the logical connective that joins
//! it to its left neighbour inside a parent group; the first child's connective
//! is never written.
//!
//! Rendering threads one placeholder index through the whole tree, left to
//! right, and [`Where::values`] walks the tree in the same order, so the n-th
//! value always belongs to the n-th placeholder.
//!
//! # Example
//! ```
//! use sqlweave::{Dialect, Logical, Where};
//!
//! let filter = Where::group([
//!     Where::cmp("a", 1),
//!     Where::op("b", ">", 2).unwrap().with_logical(Logical::Or),
//! ])
//! .unwrap();
//!
//! assert_eq!(filter.to_sql(&Dialect::MySql), "(a = ? OR b > ?)");
//! assert_eq!(filter.to_sql(&Dialect::Postgres), "(a = $1 OR b > $2)");
//! ```

use crate::classify::{classify, classify_value};
use crate::column::ColumnRef;
use crate::dialect::Dialect;
use crate::error::{SqlError, SqlResult};
use crate::predicate::{Predicate, RawExpr, Rendered};
use crate::value::{Operand, Value};
use serde_json::Value as JsonValue;
use std::fmt;
use std::str::FromStr;

/// Logical connective between siblings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Logical {
    #[default]
    And,
    Or,
    Xor,
}

impl Logical {
    pub fn as_str(&self) -> &'static str {
        match self {
            Logical::And => "AND",
            Logical::Or => "OR",
            Logical::Xor => "XOR",
        }
    }
}

impl fmt::Display for Logical {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Logical {
    type Err = SqlError;

    fn from_str(s: &str) -> SqlResult<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("and") {
            Ok(Logical::And)
        } else if s.eq_ignore_ascii_case("or") {
            Ok(Logical::Or)
        } else if s.eq_ignore_ascii_case("xor") {
            Ok(Logical::Xor)
        } else {
            Err(SqlError::classification(format!(
                "Unknown logical connective: {s}"
            )))
        }
    }
}

/// Contents of a [`Where`] node.
#[derive(Debug, Clone, PartialEq)]
pub enum WhereNode {
    Predicate(Predicate),
    /// Never empty.
    Group(Vec<Where>),
}

/// A filter tree node.
#[derive(Debug, Clone, PartialEq)]
pub struct Where {
    pub logical: Logical,
    node: WhereNode,
}

impl Where {
    /// Wrap a leaf predicate.
    pub fn new(predicate: Predicate) -> Self {
        Self {
            logical: Logical::default(),
            node: WhereNode::Predicate(predicate),
        }
    }

    /// `column` against a value or a free-text fragment.
    ///
    /// Lists become `IN`, NULL becomes `IS NULL`, text is parsed as a fragment
    /// (`"> 5"`, `"IS NOT NULL"`, `"IN (1, 2)"`) and compared with `=` as a
    /// whole when it doesn't parse. Never fails.
    pub fn cmp(column: impl Into<ColumnRef>, value: impl Into<Operand>) -> Self {
        Self::new(classify_value(column, value))
    }

    /// `column <op> value` with an explicit operator.
    pub fn op(
        column: impl Into<ColumnRef>,
        op: &str,
        value: impl Into<Operand>,
    ) -> SqlResult<Self> {
        classify(column, Some(op), value).map(Self::new)
    }

    /// A raw boolean expression without values, e.g. `"a.id = b.a_id"`.
    pub fn expr(text: impl Into<String>) -> Self {
        Self::raw(text, Vec::<Value>::new())
    }

    /// A raw boolean expression with its values.
    ///
    /// Under PostgreSQL every bare `$` is numbered from the running index.
    pub fn raw<T: Into<Value>>(text: impl Into<String>, values: Vec<T>) -> Self {
        let text: String = text.into();
        Self::new(Predicate::Raw(RawExpr::new(
            text.trim(),
            values.into_iter().map(Into::into).collect(),
        )))
    }

    /// Combine existing nodes. Fails on an empty list.
    pub fn group(children: impl IntoIterator<Item = Where>) -> SqlResult<Self> {
        let children: Vec<Where> = children.into_iter().collect();
        if children.is_empty() {
            return Err(SqlError::EmptyGroup);
        }
        Ok(Self {
            logical: Logical::default(),
            node: WhereNode::Group(children),
        })
    }

    /// [`Where::group`] tagged with its own connective.
    pub fn group_with(
        logical: Logical,
        children: impl IntoIterator<Item = Where>,
    ) -> SqlResult<Self> {
        Self::group(children).map(|group| group.with_logical(logical))
    }

    pub fn with_logical(mut self, logical: Logical) -> Self {
        self.logical = logical;
        self
    }

    pub fn and(self, other: Where) -> Self {
        self.join(Logical::And, other)
    }

    pub fn or(self, other: Where) -> Self {
        self.join(Logical::Or, other)
    }

    pub fn xor(self, other: Where) -> Self {
        self.join(Logical::Xor, other)
    }

    /// Append `other` joined by `logical`.
    ///
    /// A group whose later children all use the same connective is extended in
    /// place; anything else is nested so mixed connectives keep their grouping.
    fn join(self, logical: Logical, other: Where) -> Self {
        let other = other.with_logical(logical);
        match self.node {
            WhereNode::Group(mut children)
                if children.iter().skip(1).all(|child| child.logical == logical) =>
            {
                children.push(other);
                Self {
                    logical: self.logical,
                    node: WhereNode::Group(children),
                }
            }
            node => {
                let outer = self.logical;
                let inner = Self {
                    logical: Logical::default(),
                    node,
                };
                Self {
                    logical: outer,
                    node: WhereNode::Group(vec![inner, other]),
                }
            }
        }
    }

    pub fn node(&self) -> &WhereNode {
        &self.node
    }

    pub fn predicate(&self) -> Option<&Predicate> {
        match &self.node {
            WhereNode::Predicate(p) => Some(p),
            WhereNode::Group(_) => None,
        }
    }

    pub fn children(&self) -> &[Where] {
        match &self.node {
            WhereNode::Predicate(_) => &[],
            WhereNode::Group(children) => children,
        }
    }

    /// Render starting at placeholder `start_index`.
    ///
    /// `context_alias` is applied to columns that were built without one.
    pub fn render(
        &self,
        dialect: &Dialect,
        context_alias: Option<&str>,
        start_index: usize,
    ) -> Rendered {
        match &self.node {
            WhereNode::Predicate(predicate) => {
                predicate.render(dialect, context_alias, start_index)
            }
            WhereNode::Group(children) => {
                let mut rendered = render_joined(children, dialect, context_alias, start_index);
                if children.len() > 1 {
                    rendered.sql = format!("({})", rendered.sql);
                }
                rendered
            }
        }
    }

    /// Render standalone, numbering from 1.
    pub fn to_sql(&self, dialect: &Dialect) -> String {
        self.render(dialect, None, 1).sql
    }

    /// Render standalone, numbering from 1, with `alias` for unqualified columns.
    pub fn to_sql_with_alias(&self, dialect: &Dialect, alias: &str) -> String {
        self.render(dialect, Some(alias), 1).sql
    }

    /// Bound values in placeholder order.
    pub fn values(&self) -> Vec<Value> {
        let mut out = Vec::new();
        self.collect_values(&mut out);
        out
    }

    fn collect_values(&self, out: &mut Vec<Value>) {
        match &self.node {
            WhereNode::Predicate(predicate) => out.extend(predicate.values()),
            WhereNode::Group(children) => {
                for child in children {
                    child.collect_values(out);
                }
            }
        }
    }

    /// Number of placeholder slots consumed under `dialect`.
    pub fn placeholder_count(&self, dialect: &Dialect) -> usize {
        self.render(dialect, None, 1).next_index - 1
    }

    /// Check every raw expression's marker count against its values.
    pub fn check_params(&self, dialect: &Dialect) -> SqlResult<()> {
        match &self.node {
            WhereNode::Predicate(Predicate::Raw(raw)) => raw.check_params(dialect),
            WhereNode::Predicate(_) => Ok(()),
            WhereNode::Group(children) => children
                .iter()
                .try_for_each(|child| child.check_params(dialect)),
        }
    }

    /// Build from a loosely typed argument list.
    ///
    /// Accepted shapes, each optionally preceded by `"AND"`, `"OR"` or
    /// `"XOR"`:
    /// - `[expression]`
    /// - `[expression, values]` where the expression contains a space
    /// - `[column, value_or_fragment]`
    /// - `[column, operator, value]`
    pub fn from_json_args(args: &[JsonValue]) -> SqlResult<Self> {
        let (logical, rest) = match args {
            [JsonValue::String(token), rest @ ..] if !rest.is_empty() => {
                match logical_token(token) {
                    Some(logical) => (logical, rest),
                    None => (Logical::default(), args),
                }
            }
            _ => (Logical::default(), args),
        };

        let node = match rest {
            [] => {
                return Err(SqlError::classification("No filter arguments given"));
            }
            [JsonValue::String(expression)] => Self::expr(expression.as_str()),
            [other] => {
                return Err(SqlError::classification(format!(
                    "Given expression is not of type string: {other}"
                )));
            }
            [JsonValue::String(expression), values] if expression.trim().contains(' ') => {
                let values = match values {
                    JsonValue::Array(items) => items
                        .iter()
                        .map(Value::from_json)
                        .collect::<SqlResult<Vec<_>>>()?,
                    scalar => vec![Value::from_json(scalar)?],
                };
                Self::raw(expression.as_str(), values)
            }
            [column, value] => Self::cmp(json_str(column, "column")?, Operand::from_json(value)?),
            [column, op, value] => Self::op(
                json_str(column, "column")?,
                json_str(op, "operator")?,
                Operand::from_json(value)?,
            )?,
            _ => {
                return Err(SqlError::classification(format!(
                    "Too many filter arguments: {}",
                    rest.len()
                )));
            }
        };

        Ok(node.with_logical(logical))
    }
}

impl From<Predicate> for Where {
    fn from(predicate: Predicate) -> Self {
        Self::new(predicate)
    }
}

fn logical_token(token: &str) -> Option<Logical> {
    match token {
        "AND" => Some(Logical::And),
        "OR" => Some(Logical::Or),
        "XOR" => Some(Logical::Xor),
        _ => None,
    }
}

fn json_str<'a>(value: &'a JsonValue, what: &str) -> SqlResult<&'a str> {
    value.as_str().ok_or_else(|| {
        SqlError::classification(format!("Given {what} is not of type string: {value}"))
    })
}

/// Join `filters` by each one's own connective, threading the index.
pub(crate) fn render_joined(
    filters: &[Where],
    dialect: &Dialect,
    context_alias: Option<&str>,
    start_index: usize,
) -> Rendered {
    let mut sql = String::new();
    let mut next_index = start_index;
    for (i, filter) in filters.iter().enumerate() {
        if i > 0 {
            sql.push(' ');
            sql.push_str(filter.logical.as_str());
            sql.push(' ');
        }
        let rendered = filter.render(dialect, context_alias, next_index);
        sql.push_str(&rendered.sql);
        next_index = rendered.next_index;
    }
    Rendered { sql, next_index }
}
