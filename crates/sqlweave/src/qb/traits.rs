//! Trait definitions for statement builders.

use crate::config::QbConfig;
use crate::dialect::Dialect;
use crate::error::{SqlError, SqlResult};
use crate::qb::clause::WhereList;
use crate::value::{Operand, Value};
use crate::where_clause::{Logical, Where};

/// Base trait for all statement builders.
pub trait SqlQb {
    /// Render the statement for `dialect`.
    ///
    /// Placeholders are numbered from 1 in the order they appear.
    fn build_sql(&self, dialect: &Dialect) -> String;

    /// Bound values in placeholder order.
    fn values(&self) -> Vec<Value>;

    /// Debug helper to get the SQL string.
    fn to_sql(&self, dialect: &Dialect) -> String {
        self.build_sql(dialect)
    }

    /// Get the first error recorded while chaining, if any.
    fn build_error(&self) -> Option<&SqlError> {
        None
    }

    /// Validate builder state before building.
    fn validate(&self) -> SqlResult<()> {
        match self.build_error() {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    /// Top-level filters, used for raw parameter checks.
    fn filters(&self) -> Option<&WhereList> {
        None
    }

    /// Validate, then render SQL and values together.
    fn build(&self, dialect: &Dialect) -> SqlResult<BuiltQuery> {
        self.validate()?;
        let sql = self.build_sql(dialect);
        let values = self.values();
        tracing::debug!(
            target: "sqlweave.sql",
            dialect = %dialect,
            params = values.len(),
            sql = %sql,
            "built statement"
        );
        Ok(BuiltQuery { sql, values })
    }

    /// [`SqlQb::build`] with the dialect and checks taken from `config`.
    fn build_with(&self, config: &QbConfig) -> SqlResult<BuiltQuery> {
        let dialect = config.dialect()?;
        if config.check_raw_params {
            if let Some(filters) = self.filters() {
                filters.check_params(&dialect)?;
            }
        }
        self.build(&dialect)
    }
}

/// WHERE methods shared by SELECT, UPDATE and DELETE.
///
/// Fallible steps record their error on the builder; it surfaces from
/// [`SqlQb::validate`] and [`SqlQb::build`].
pub trait WhereQb: Sized {
    fn where_list_mut(&mut self) -> &mut WhereList;

    /// Keep the first error only.
    fn record_error(&mut self, err: SqlError);

    /// Add a filter joined by its own connective.
    fn where_(mut self, filter: Where) -> Self {
        self.where_list_mut().push(filter);
        self
    }

    fn and_where(self, filter: Where) -> Self {
        self.where_(filter.with_logical(Logical::And))
    }

    fn or_where(self, filter: Where) -> Self {
        self.where_(filter.with_logical(Logical::Or))
    }

    fn xor_where(self, filter: Where) -> Self {
        self.where_(filter.with_logical(Logical::Xor))
    }

    /// Add WHERE: column against a value or fragment (see [`Where::cmp`]).
    fn where_cmp(self, column: &str, value: impl Into<Operand>) -> Self {
        self.where_(Where::cmp(column, value))
    }

    /// Add WHERE: column op value
    fn where_op(mut self, column: &str, op: &str, value: impl Into<Operand>) -> Self {
        match Where::op(column, op, value) {
            Ok(filter) => self.where_(filter),
            Err(err) => {
                self.record_error(err);
                self
            }
        }
    }

    /// Add a raw WHERE expression without values.
    fn where_expr(self, text: &str) -> Self {
        self.where_(Where::expr(text))
    }

    /// Add a raw WHERE expression with its values.
    fn where_raw<T: Into<Value>>(self, text: &str, values: Vec<T>) -> Self {
        self.where_(Where::raw(text, values))
    }
}

/// The result of building a statement.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltQuery {
    pub sql: String,
    pub values: Vec<Value>,
}

pub(crate) fn keep_first(slot: &mut Option<SqlError>, err: SqlError) {
    if slot.is_none() {
        *slot = Some(err);
    }
}
