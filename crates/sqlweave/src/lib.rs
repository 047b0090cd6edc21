//! # sqlweave
//!
//! A dialect-aware SQL statement builder. Statements render to SQL text plus
//! an ordered list of bound values, with placeholders written as `?`
//! (MySQL / MariaDB) or `$1, $2, ...` (PostgreSQL).
//!
//! ## Features
//!
//! - **Recursive filters**: [`Where`] trees of comparisons, `IN` lists, NULL
//!   checks and raw expressions joined by AND / OR / XOR
//! - **Consistent numbering**: one placeholder index is threaded through the
//!   whole statement, and values come out in the same order
//! - **Loose input**: `"> 5"`, `"IS NOT NULL"` or `"IN (1, 2)"` fragments are
//!   classified into the matching predicate
//! - **No I/O**: rendering is a pure function of the builder and the dialect
//!
//! ## Filters
//!
//! ```
//! use sqlweave::{Dialect, Where};
//!
//! let filter = Where::cmp("age", "> 30")
//!     .and(Where::cmp("id", vec![1, 2, 3]))
//!     .and(Where::cmp("deleted_at", "IS NULL"));
//!
//! let rendered = filter.render(&Dialect::Postgres, None, 1);
//! assert_eq!(rendered.sql, "(age > $1 AND id IN ($2, $3, $4) AND deleted_at IS NULL)");
//! assert_eq!(rendered.next_index, 5);
//! assert_eq!(filter.values().len(), 4);
//! ```
//!
//! ## Statements
//!
//! ```
//! use sqlweave::prelude::*;
//!
//! let built = qb::delete_from("users")
//!     .where_cmp("id", 7)
//!     .returning("id")
//!     .build(&Dialect::Postgres)
//!     .unwrap();
//! assert_eq!(built.sql, "DELETE FROM users WHERE id = $1 RETURNING id;");
//! assert_eq!(built.values, vec![Value::Int(7)]);
//! ```

pub mod classify;
pub mod column;
pub mod config;
pub mod dialect;
pub mod error;
pub mod predicate;
pub mod prelude;
pub mod qb;
pub mod value;
pub mod where_clause;

pub use column::ColumnRef;
pub use config::QbConfig;
pub use dialect::{Dialect, PlaceholderStyle};
pub use error::{SqlError, SqlResult};
pub use predicate::{CompareOp, Predicate, RawExpr, Rendered};
pub use value::{Operand, Value};
pub use where_clause::{Logical, Where, WhereNode};

// Re-export qb module for easy access
pub use qb::{
    BuiltQuery, DeleteQb, InsertQb, SelectQb, SqlQb, UpdateQb, WhereQb, delete_from, insert_into,
    select, update,
};
