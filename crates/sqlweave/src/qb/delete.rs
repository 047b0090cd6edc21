//! DELETE statement builder.

use crate::dialect::Dialect;
use crate::error::SqlError;
use crate::qb::clause::{
    self, Join, JoinKind, Source, WhereList, context_alias, join_sources,
};
use crate::qb::traits::{SqlQb, WhereQb, keep_first};
use crate::value::Value;

/// DELETE statement builder.
///
/// Covers `DELETE FROM t`, the MySQL multi-table form `DELETE t FROM t JOIN ...`
/// and the PostgreSQL `DELETE FROM t USING a, b` form. A statement without
/// WHERE deletes every row.
#[derive(Clone, Debug, Default)]
pub struct DeleteQb {
    /// Tables named between DELETE and FROM
    target: Option<String>,
    sources: Vec<Source>,
    usings: Vec<String>,
    joins: Vec<Join>,
    filters: WhereList,
    returning: Vec<String>,
    build_error: Option<SqlError>,
}

impl DeleteQb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tables deleted from when joining, e.g. `DELETE u FROM ...`.
    pub fn target(mut self, target: &str) -> Self {
        let target = target.trim();
        self.target = (!target.is_empty()).then(|| target.to_string());
        self
    }

    /// Add a FROM source: `table`, `table alias` or `table AS alias`.
    pub fn from(mut self, expr: &str) -> Self {
        match Source::parse(expr) {
            Ok(source) => self.sources.push(source),
            Err(err) => keep_first(&mut self.build_error, err),
        }
        self
    }

    pub fn from_as(mut self, table: &str, alias: &str) -> Self {
        self.sources.push(Source::aliased(table, alias));
        self
    }

    /// Add USING tables. Comma-separated lists are split; repeats are dropped.
    pub fn using(mut self, tables: &str) -> Self {
        for table in tables.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            if !self.usings.iter().any(|u| u == table) {
                self.usings.push(table.to_string());
            }
        }
        self
    }

    /// Add JOIN. `table` may carry an alias.
    pub fn join(self, table: &str, on: &str) -> Self {
        self.join_kind(JoinKind::Plain, table, on)
    }

    /// Add INNER JOIN.
    pub fn inner_join(self, table: &str, on: &str) -> Self {
        self.join_kind(JoinKind::Inner, table, on)
    }

    /// Add LEFT JOIN.
    pub fn left_join(self, table: &str, on: &str) -> Self {
        self.join_kind(JoinKind::Left, table, on)
    }

    pub fn join_kind(mut self, kind: JoinKind, table: &str, on: &str) -> Self {
        match Source::parse(table) {
            Ok(source) => self.joins.push(Join {
                kind,
                source,
                on: on.trim().to_string(),
            }),
            Err(err) => keep_first(&mut self.build_error, err),
        }
        self
    }

    /// Append a RETURNING column or expression.
    pub fn returning(mut self, column: &str) -> Self {
        self.returning.push(column.trim().to_string());
        self
    }
}

impl WhereQb for DeleteQb {
    fn where_list_mut(&mut self) -> &mut WhereList {
        &mut self.filters
    }

    fn record_error(&mut self, err: SqlError) {
        keep_first(&mut self.build_error, err);
    }
}

impl SqlQb for DeleteQb {
    fn build_sql(&self, dialect: &Dialect) -> String {
        let mut sql = String::from("DELETE");
        if let Some(target) = &self.target {
            sql.push(' ');
            sql.push_str(target);
        }

        if !self.sources.is_empty() {
            sql.push_str(" FROM ");
            sql.push_str(&join_sources(&self.sources));
        }

        if !self.usings.is_empty() {
            sql.push_str(" USING ");
            sql.push_str(&self.usings.join(", "));
        }

        for join in &self.joins {
            sql.push(' ');
            sql.push_str(&join.to_string());
        }

        clause::push_where(&mut sql, &self.filters, dialect, context_alias(&self.sources), 1);
        clause::push_returning(&mut sql, &self.returning);
        sql.push(';');
        sql
    }

    fn values(&self) -> Vec<Value> {
        self.filters.values()
    }

    fn build_error(&self) -> Option<&SqlError> {
        self.build_error.as_ref()
    }

    fn filters(&self) -> Option<&WhereList> {
        Some(&self.filters)
    }
}
