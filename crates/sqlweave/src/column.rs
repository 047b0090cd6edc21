//! Column references.
//!
//! A [`ColumnRef`] is a column name with an optional table alias. A dotted name
//! such as `u.email` is split once, when the reference is built; rendering only
//! ever joins the two parts back together.

use std::fmt;

/// A column, optionally qualified by a table alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRef {
    pub alias: Option<String>,
    pub column: String,
}

impl ColumnRef {
    /// Parse a column name, splitting `alias.column` at the first dot.
    pub fn new(column: impl AsRef<str>) -> Self {
        let column = column.as_ref().trim();
        match column.split_once('.') {
            Some((alias, rest)) if !alias.is_empty() && !rest.is_empty() => Self {
                alias: Some(alias.to_string()),
                column: rest.to_string(),
            },
            _ => Self {
                alias: None,
                column: column.to_string(),
            },
        }
    }

    /// Build a reference with an explicit alias.
    ///
    /// A dot inside `column` still wins over the given alias.
    pub fn with_alias(alias: impl AsRef<str>, column: impl AsRef<str>) -> Self {
        let mut col = Self::new(column);
        if col.alias.is_none() {
            let alias = alias.as_ref().trim();
            if !alias.is_empty() {
                col.alias = Some(alias.to_string());
            }
        }
        col
    }

    /// Render as `alias.column`.
    ///
    /// The reference's own alias takes precedence over `context`, which is the
    /// alias of the single table in scope, if any.
    pub fn qualified(&self, context: Option<&str>) -> String {
        let alias = self
            .alias
            .as_deref()
            .or(context)
            .filter(|alias| !alias.is_empty());
        match alias {
            Some(alias) => format!("{alias}.{}", self.column),
            None => self.column.clone(),
        }
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified(None))
    }
}

impl From<&str> for ColumnRef {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ColumnRef {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
