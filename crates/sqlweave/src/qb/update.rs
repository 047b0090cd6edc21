//! UPDATE statement builder.

use crate::dialect::Dialect;
use crate::error::{SqlError, SqlResult};
use crate::qb::clause::{self, WhereList};
use crate::qb::traits::{SqlQb, WhereQb, keep_first};
use crate::value::Value;

/// UPDATE statement builder.
#[derive(Clone, Debug)]
pub struct UpdateQb {
    table: String,
    /// SET (column, value) pairs
    set_fields: Vec<(String, Value)>,
    filters: WhereList,
    returning: Vec<String>,
    build_error: Option<SqlError>,
}

impl UpdateQb {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.trim().to_string(),
            set_fields: Vec::new(),
            filters: WhereList::new(),
            returning: Vec::new(),
            build_error: None,
        }
    }

    /// Add SET column = value.
    pub fn set(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.set_fields.push((column.trim().to_string(), value.into()));
        self
    }

    /// Append a RETURNING column or expression.
    pub fn returning(mut self, column: &str) -> Self {
        self.returning.push(column.trim().to_string());
        self
    }
}

impl WhereQb for UpdateQb {
    fn where_list_mut(&mut self) -> &mut WhereList {
        &mut self.filters
    }

    fn record_error(&mut self, err: SqlError) {
        keep_first(&mut self.build_error, err);
    }
}

impl SqlQb for UpdateQb {
    fn build_sql(&self, dialect: &Dialect) -> String {
        let mut index = 1;
        let mut sql = format!("UPDATE {}", self.table);

        if !self.set_fields.is_empty() {
            let assignments: Vec<String> = self
                .set_fields
                .iter()
                .map(|(column, _)| {
                    let assignment = format!("{column} = {}", dialect.placeholder(index));
                    index += 1;
                    assignment
                })
                .collect();
            sql.push_str(" SET ");
            sql.push_str(&assignments.join(", "));
        }

        clause::push_where(&mut sql, &self.filters, dialect, None, index);
        clause::push_returning(&mut sql, &self.returning);
        sql.push(';');
        sql
    }

    fn values(&self) -> Vec<Value> {
        let mut values: Vec<Value> = self.set_fields.iter().map(|(_, v)| v.clone()).collect();
        values.extend(self.filters.values());
        values
    }

    fn build_error(&self) -> Option<&SqlError> {
        self.build_error.as_ref()
    }

    fn validate(&self) -> SqlResult<()> {
        if let Some(err) = &self.build_error {
            return Err(err.clone());
        }
        if self.set_fields.is_empty() {
            return Err(SqlError::syntax("UpdateQb: SET clause cannot be empty"));
        }
        Ok(())
    }

    fn filters(&self) -> Option<&WhereList> {
        Some(&self.filters)
    }
}
