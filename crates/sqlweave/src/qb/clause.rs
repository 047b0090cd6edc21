//! Clause pieces shared by the statement builders: FROM sources, joins,
//! ORDER BY entries and the top-level WHERE list.

use crate::column::ColumnRef;
use crate::dialect::Dialect;
use crate::error::{SqlError, SqlResult};
use crate::predicate::Rendered;
use crate::value::Value;
use crate::where_clause::{Where, render_joined};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

fn aliased_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^(\w+(?:\.\w+)?)\s+(?:AS\s+)?(\w+)$").expect("invalid built-in alias regex")
    })
}

/// Split `table [AS] alias`. Input without whitespace is a bare name.
pub(crate) fn split_aliased(expr: &str) -> SqlResult<(String, Option<String>)> {
    let expr = expr.trim();
    if !expr.contains(char::is_whitespace) {
        return Ok((expr.to_string(), None));
    }
    match aliased_re().captures(expr) {
        Some(caps) => Ok((caps[1].to_string(), Some(caps[2].to_string()))),
        None => Err(SqlError::syntax(format!(
            "Given expression did not match the expected syntax: {expr}"
        ))),
    }
}

/// A table in a FROM list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub table: String,
    pub alias: Option<String>,
}

impl Source {
    /// Parse `table`, `table alias` or `table AS alias`.
    pub fn parse(expr: &str) -> SqlResult<Self> {
        let (table, alias) = split_aliased(expr)?;
        Ok(Self { table, alias })
    }

    pub fn aliased(table: &str, alias: &str) -> Self {
        let alias = alias.trim();
        Self {
            table: table.trim().to_string(),
            alias: (!alias.is_empty()).then(|| alias.to_string()),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.alias {
            Some(alias) => write!(f, "{} {}", self.table, alias),
            None => f.write_str(&self.table),
        }
    }
}

/// The alias every unqualified column adopts: set only when exactly one
/// source is in scope.
pub(crate) fn context_alias(sources: &[Source]) -> Option<&str> {
    match sources {
        [only] => only.alias.as_deref(),
        _ => None,
    }
}

pub(crate) fn join_sources(sources: &[Source]) -> String {
    sources
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinKind {
    #[default]
    Plain,
    Inner,
    Left,
    Right,
    Full,
}

impl JoinKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            JoinKind::Plain => "JOIN",
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT JOIN",
            JoinKind::Right => "RIGHT JOIN",
            JoinKind::Full => "FULL JOIN",
        }
    }
}

impl FromStr for JoinKind {
    type Err = SqlError;

    fn from_str(s: &str) -> SqlResult<Self> {
        let upper = s.trim().to_ascii_uppercase();
        let kind = upper.strip_suffix("JOIN").unwrap_or(upper.as_str()).trim();
        match kind.split_whitespace().next() {
            None => Ok(JoinKind::Plain),
            Some("INNER") => Ok(JoinKind::Inner),
            Some("LEFT") => Ok(JoinKind::Left),
            Some("RIGHT") => Ok(JoinKind::Right),
            Some("FULL") => Ok(JoinKind::Full),
            Some(_) => Err(SqlError::syntax(format!("Unknown join type: {s}"))),
        }
    }
}

/// `[kind] JOIN table [alias] ON condition`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Join {
    pub kind: JoinKind,
    pub source: Source,
    pub on: String,
}

impl fmt::Display for Join {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ON {}", self.kind.as_str(), self.source, self.on)
    }
}

/// An ORDER BY entry. Consumes no placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub column: ColumnRef,
    pub direction: Option<String>,
}

impl OrderBy {
    pub fn new(column: impl Into<ColumnRef>, direction: Option<&str>) -> Self {
        Self {
            column: column.into(),
            direction: direction.map(|d| d.trim().to_string()),
        }
    }

    /// `ASC`/`DESC` in any case are normalized; other directions are
    /// written as given.
    pub fn render(&self, context_alias: Option<&str>) -> String {
        let column = self.column.qualified(context_alias);
        match self.direction.as_deref() {
            Some(d) if d.eq_ignore_ascii_case("asc") => format!("{column} ASC"),
            Some(d) if d.eq_ignore_ascii_case("desc") => format!("{column} DESC"),
            Some(d) if !d.is_empty() => format!("{column} {d}"),
            _ => column,
        }
    }
}

pub(crate) fn render_order_by(entries: &[OrderBy], context_alias: Option<&str>) -> String {
    entries
        .iter()
        .map(|entry| entry.render(context_alias))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Top-level WHERE entries.
///
/// Unlike a nested group, the list is never parenthesized as a whole; each
/// entry after the first is preceded by its own connective.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WhereList {
    entries: Vec<Where>,
}

impl WhereList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, filter: Where) {
        self.entries.push(filter);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Where] {
        &self.entries
    }

    pub fn render(
        &self,
        dialect: &Dialect,
        context_alias: Option<&str>,
        start_index: usize,
    ) -> Rendered {
        render_joined(&self.entries, dialect, context_alias, start_index)
    }

    pub fn values(&self) -> Vec<Value> {
        self.entries.iter().flat_map(Where::values).collect()
    }

    pub fn check_params(&self, dialect: &Dialect) -> SqlResult<()> {
        self.entries
            .iter()
            .try_for_each(|filter| filter.check_params(dialect))
    }
}

/// Append ` WHERE ...` to `sql` and return the next placeholder index.
pub(crate) fn push_where(
    sql: &mut String,
    filters: &WhereList,
    dialect: &Dialect,
    context_alias: Option<&str>,
    start_index: usize,
) -> usize {
    if filters.is_empty() {
        return start_index;
    }
    let rendered = filters.render(dialect, context_alias, start_index);
    sql.push_str(" WHERE ");
    sql.push_str(&rendered.sql);
    rendered.next_index
}

pub(crate) fn push_returning(sql: &mut String, returning: &[String]) {
    if !returning.is_empty() {
        sql.push_str(" RETURNING ");
        sql.push_str(&returning.join(", "));
    }
}
