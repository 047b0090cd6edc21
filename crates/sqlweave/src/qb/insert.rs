//! INSERT statement builder.

use crate::dialect::Dialect;
use crate::qb::clause;
use crate::qb::traits::SqlQb;
use crate::value::Value;

/// INSERT statement builder.
///
/// Without any values the statement becomes `INSERT INTO t DEFAULT VALUES`.
#[derive(Clone, Debug)]
pub struct InsertQb {
    table: String,
    /// (column, value) pairs in insertion order
    columns: Vec<(String, Value)>,
    returning: Vec<String>,
}

impl InsertQb {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.trim().to_string(),
            columns: Vec::new(),
            returning: Vec::new(),
        }
    }

    /// Set a column value.
    pub fn value(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.columns.push((column.trim().to_string(), value.into()));
        self
    }

    /// Append a RETURNING column or expression.
    pub fn returning(mut self, column: &str) -> Self {
        self.returning.push(column.trim().to_string());
        self
    }
}

impl SqlQb for InsertQb {
    fn build_sql(&self, dialect: &Dialect) -> String {
        let mut sql = format!("INSERT INTO {}", self.table);

        if self.columns.is_empty() {
            sql.push_str(" DEFAULT VALUES");
        } else {
            let names: Vec<&str> = self.columns.iter().map(|(name, _)| name.as_str()).collect();
            let placeholders: Vec<String> = (1..=self.columns.len())
                .map(|idx| dialect.placeholder(idx))
                .collect();
            sql.push_str(&format!(
                " ({}) VALUES ({})",
                names.join(", "),
                placeholders.join(", ")
            ));
        }

        clause::push_returning(&mut sql, &self.returning);
        sql.push(';');
        sql
    }

    fn values(&self) -> Vec<Value> {
        self.columns.iter().map(|(_, value)| value.clone()).collect()
    }
}
