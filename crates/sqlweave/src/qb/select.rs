//! SELECT statement builder.

use crate::dialect::Dialect;
use crate::error::SqlError;
use crate::qb::clause::{
    self, Join, JoinKind, OrderBy, Source, WhereList, context_alias, join_sources,
};
use crate::qb::traits::{SqlQb, WhereQb, keep_first};
use crate::value::Value;

/// SELECT statement builder.
#[derive(Clone, Debug, Default)]
pub struct SelectQb {
    /// SELECT columns (empty renders `*`)
    columns: Vec<String>,
    /// FROM sources
    sources: Vec<Source>,
    /// JOIN clauses
    joins: Vec<Join>,
    /// WHERE entries
    filters: WhereList,
    /// ORDER BY entries
    order: Vec<OrderBy>,
    limit: Option<i64>,
    offset: Option<i64>,
    /// First error recorded while chaining
    build_error: Option<SqlError>,
}

impl SelectQb {
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== SELECT columns ====================

    /// Append a column or expression.
    ///
    /// `col alias` and `col AS alias` are normalized to `col alias`; anything
    /// else containing whitespace (`COUNT(*) AS n`, `a + b`) is kept as given.
    pub fn select(mut self, column: &str) -> Self {
        let column = column.trim();
        let rendered = match clause::split_aliased(column) {
            Ok((name, Some(alias))) => format!("{name} {alias}"),
            _ => column.to_string(),
        };
        self.columns.push(rendered);
        self
    }

    /// Append a column with an alias.
    pub fn select_as(mut self, column: &str, alias: &str) -> Self {
        let (column, alias) = (column.trim(), alias.trim());
        if alias.is_empty() {
            self.columns.push(column.to_string());
        } else {
            self.columns.push(format!("{column} {alias}"));
        }
        self
    }

    /// Append multiple columns.
    pub fn select_cols(self, columns: &[&str]) -> Self {
        columns.iter().fold(self, |qb, column| qb.select(column))
    }

    // ==================== FROM / JOIN ====================

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

    /// Add JOIN. `table` may carry an alias.
    pub fn join(self, table: &str, on: &str) -> Self {
        self.join_kind(JoinKind::Plain, table, on)
    }

    /// Add JOIN with an explicit alias.
    pub fn join_as(mut self, kind: JoinKind, table: &str, alias: &str, on: &str) -> Self {
        self.joins.push(Join {
            kind,
            source: Source::aliased(table, alias),
            on: on.trim().to_string(),
        });
        self
    }

    /// Add INNER JOIN.
    pub fn inner_join(self, table: &str, on: &str) -> Self {
        self.join_kind(JoinKind::Inner, table, on)
    }

    /// Add LEFT JOIN.
    pub fn left_join(self, table: &str, on: &str) -> Self {
        self.join_kind(JoinKind::Left, table, on)
    }

    /// Add RIGHT JOIN.
    pub fn right_join(self, table: &str, on: &str) -> Self {
        self.join_kind(JoinKind::Right, table, on)
    }

    /// Add FULL JOIN.
    pub fn full_join(self, table: &str, on: &str) -> Self {
        self.join_kind(JoinKind::Full, table, on)
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

    // ==================== Ordering & Pagination ====================

    /// Add ORDER BY column.
    pub fn order_by(mut self, column: &str) -> Self {
        self.order.push(OrderBy::new(column, None));
        self
    }

    /// Add ORDER BY column with a direction. `ASC`/`DESC` are normalized,
    /// anything else (`DESC NULLS LAST`) is written as given.
    pub fn order_by_dir(mut self, column: &str, direction: &str) -> Self {
        self.order.push(OrderBy::new(column, Some(direction)));
        self
    }

    /// Add ORDER BY column ASC.
    pub fn order_by_asc(self, column: &str) -> Self {
        self.order_by_dir(column, "ASC")
    }

    /// Add ORDER BY column DESC.
    pub fn order_by_desc(self, column: &str) -> Self {
        self.order_by_dir(column, "DESC")
    }

    /// Set LIMIT. Bound as a parameter.
    pub fn limit(mut self, n: i64) -> Self {
        self.limit = Some(n);
        self
    }

    /// Set OFFSET. Bound as a parameter.
    pub fn offset(mut self, n: i64) -> Self {
        self.offset = Some(n);
        self
    }
}

impl WhereQb for SelectQb {
    fn where_list_mut(&mut self) -> &mut WhereList {
        &mut self.filters
    }

    fn record_error(&mut self, err: SqlError) {
        keep_first(&mut self.build_error, err);
    }
}

impl SqlQb for SelectQb {
    fn build_sql(&self, dialect: &Dialect) -> String {
        let mut index = 1;
        let columns = if self.columns.is_empty() {
            "*".to_string()
        } else {
            self.columns.join(", ")
        };
        let mut sql = format!("SELECT {columns}");

        if !self.sources.is_empty() {
            sql.push_str(" FROM ");
            sql.push_str(&join_sources(&self.sources));
        }

        for join in &self.joins {
            sql.push(' ');
            sql.push_str(&join.to_string());
        }

        let alias = context_alias(&self.sources);
        index = clause::push_where(&mut sql, &self.filters, dialect, alias, index);

        if !self.order.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&clause::render_order_by(&self.order, alias));
        }

        if self.limit.is_some() {
            sql.push_str(" LIMIT ");
            sql.push_str(&dialect.placeholder(index));
            index += 1;
        }

        if self.offset.is_some() {
            sql.push_str(" OFFSET ");
            sql.push_str(&dialect.placeholder(index));
        }

        sql.push(';');
        sql
    }

    fn values(&self) -> Vec<Value> {
        let mut values = self.filters.values();
        values.extend(self.limit.map(Value::Int));
        values.extend(self.offset.map(Value::Int));
        values
    }

    fn build_error(&self) -> Option<&SqlError> {
        self.build_error.as_ref()
    }

    fn filters(&self) -> Option<&WhereList> {
        Some(&self.filters)
    }
}
