//! Statement builder configuration.

use crate::dialect::Dialect;
use crate::error::{SqlError, SqlResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration shared by the statement builders.
///
/// Loadable from TOML:
///
/// ```
/// use sqlweave::{Dialect, QbConfig};
///
/// let config = QbConfig::from_toml_str(
///     r#"
///     dialect = "postgres"
///     check_raw_params = true
///     "#,
/// )
/// .unwrap();
/// assert_eq!(config.dialect().unwrap(), Dialect::Postgres);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QbConfig {
    /// Dialect name, `"mysql"` by default.
    pub dialect: String,
    /// Reject unknown dialect names instead of rendering empty placeholders.
    pub strict_dialect: bool,
    /// Validate raw expression marker counts against their values on build.
    pub check_raw_params: bool,
}

impl Default for QbConfig {
    fn default() -> Self {
        Self {
            dialect: Dialect::default().name().to_string(),
            strict_dialect: false,
            check_raw_params: false,
        }
    }
}

impl QbConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(s: &str) -> SqlResult<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> SqlResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            SqlError::Config(format!("failed to read config file {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn with_dialect(mut self, dialect: impl Into<String>) -> Self {
        self.dialect = dialect.into();
        self
    }

    pub fn strict(mut self) -> Self {
        self.strict_dialect = true;
        self
    }

    pub fn with_raw_param_check(mut self) -> Self {
        self.check_raw_params = true;
        self
    }

    /// Resolve the configured dialect.
    ///
    /// Unknown names fail only when `strict_dialect` is set.
    pub fn dialect(&self) -> SqlResult<Dialect> {
        if self.strict_dialect {
            self.dialect.parse()
        } else {
            Ok(Dialect::from_name(&self.dialect))
        }
    }
}
