//! Placeholder dialects.
//!
//! The supported databases differ only in how a bound parameter is written:
//! MySQL and MariaDB use a bare `?`, PostgreSQL numbers them as `$1, $2, ...`.
//!
//! # Example
//! ```
//! use sqlweave::Dialect;
//!
//! assert_eq!(Dialect::MySql.placeholder(3), "?");
//! assert_eq!(Dialect::Postgres.placeholder(3), "$3");
//! ```

use crate::error::{SqlError, SqlResult};
use std::fmt;
use std::str::FromStr;

/// How a dialect spells a bound parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderStyle {
    /// `?` regardless of position.
    Positional,
    /// `$n`, 1-based.
    Numbered,
    /// Unknown dialect: renders nothing.
    Empty,
}

/// SQL dialect tag.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Dialect {
    #[default]
    MySql,
    MariaDb,
    Postgres,
    /// A name no dialect answers to. Kept so rendering can stay permissive.
    Unknown(String),
}

impl Dialect {
    /// Resolve a dialect name without failing.
    ///
    /// Unrecognized names produce [`Dialect::Unknown`], whose placeholders
    /// render as empty strings. Use `name.parse::<Dialect>()` to reject them.
    pub fn from_name(name: &str) -> Self {
        match lookup(name) {
            Some(dialect) => dialect,
            None => {
                tracing::warn!(
                    target: "sqlweave.dialect",
                    dialect = name,
                    "unrecognized dialect, placeholders will render empty"
                );
                Dialect::Unknown(name.to_string())
            }
        }
    }

    /// Canonical name of the dialect.
    pub fn name(&self) -> &str {
        match self {
            Dialect::MySql => "mysql",
            Dialect::MariaDb => "mariadb",
            Dialect::Postgres => "postgres",
            Dialect::Unknown(name) => name,
        }
    }

    pub fn style(&self) -> PlaceholderStyle {
        match self {
            Dialect::MySql | Dialect::MariaDb => PlaceholderStyle::Positional,
            Dialect::Postgres => PlaceholderStyle::Numbered,
            Dialect::Unknown(_) => PlaceholderStyle::Empty,
        }
    }

    pub fn is_numbered(&self) -> bool {
        self.style() == PlaceholderStyle::Numbered
    }

    /// Placeholder text for the 1-based parameter `index`.
    pub fn placeholder(&self, index: usize) -> String {
        match self.style() {
            PlaceholderStyle::Positional => "?".to_string(),
            PlaceholderStyle::Numbered => format!("${index}"),
            PlaceholderStyle::Empty => String::new(),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Strict parsing: unknown names are an error.
impl FromStr for Dialect {
    type Err = SqlError;

    fn from_str(s: &str) -> SqlResult<Self> {
        lookup(s).ok_or_else(|| SqlError::UnrecognizedDialect(s.to_string()))
    }
}

fn lookup(name: &str) -> Option<Dialect> {
    let name = name.trim();
    if name.eq_ignore_ascii_case("mysql") {
        Some(Dialect::MySql)
    } else if name.eq_ignore_ascii_case("mariadb") || name.eq_ignore_ascii_case("maria") {
        Some(Dialect::MariaDb)
    } else if name.eq_ignore_ascii_case("postgres") || name.eq_ignore_ascii_case("postgresql") {
        Some(Dialect::Postgres)
    } else {
        None
    }
}
