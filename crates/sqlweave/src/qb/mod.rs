//! Statement builders for sqlweave.
//!
//! Each builder owns one placeholder counter for the whole statement, starting
//! at 1 and threaded through the clauses in the order they are written. Values
//! come out in the same order: own column values, then WHERE values, then
//! LIMIT and OFFSET.
//!
//! # Usage
//!
//! ```
//! use sqlweave::prelude::*;
//!
//! let query = qb::select(&["id", "name"])
//!     .from("users u")
//!     .where_cmp("status", "active")
//!     .where_op("age", ">", 18)
//!     .order_by_desc("created_at")
//!     .limit(20);
//!
//! assert_eq!(
//!     query.to_sql(&Dialect::Postgres),
//!     "SELECT id, name FROM users u WHERE u.status = $1 AND u.age > $2 ORDER BY u.created_at DESC LIMIT $3;"
//! );
//!
//! let update = qb::update("users")
//!     .set("status", "inactive")
//!     .where_cmp("id", 7);
//! assert_eq!(update.to_sql(&Dialect::MySql), "UPDATE users SET status = ? WHERE id = ?;");
//! ```

mod clause;
mod delete;
mod insert;
mod select;
mod traits;
mod update;

pub use clause::{Join, JoinKind, OrderBy, Source, WhereList};
pub use delete::DeleteQb;
pub use insert::InsertQb;
pub use select::SelectQb;
pub use traits::{BuiltQuery, SqlQb, WhereQb};
pub use update::UpdateQb;

/// Create a SELECT builder for the given columns. An empty list selects `*`.
pub fn select(columns: &[&str]) -> SelectQb {
    SelectQb::new().select_cols(columns)
}

/// Create an INSERT builder for a table.
pub fn insert_into(table: &str) -> InsertQb {
    InsertQb::new(table)
}

/// Create an UPDATE builder for a table.
pub fn update(table: &str) -> UpdateQb {
    UpdateQb::new(table)
}

/// Create a DELETE builder with one FROM source (`table [AS] alias`).
pub fn delete_from(table: &str) -> DeleteQb {
    DeleteQb::new().from(table)
}

#[cfg(test)]
mod tests;
