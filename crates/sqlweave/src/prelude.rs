//! Convenient imports for typical `sqlweave` usage.
//!
//! ```
//! use sqlweave::prelude::*;
//! ```

pub use crate::qb::{self, SqlQb, WhereQb};
pub use crate::{Dialect, Logical, QbConfig, SqlError, SqlResult, Value, Where};
