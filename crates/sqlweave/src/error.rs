//! Error types for sqlweave

use thiserror::Error;

/// Result type alias for sqlweave operations
pub type SqlResult<T> = Result<T, SqlError>;

/// Errors raised while constructing predicates or statements.
///
/// Rendering itself never fails: every error here is produced before any SQL
/// text exists.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SqlError {
    /// An explicit operator does not fit the shape of the supplied value
    #[error("Classification error: {0}")]
    Classification(String),

    /// Dialect name not recognized (strict constructors only)
    #[error("Unrecognized dialect: {0}")]
    UnrecognizedDialect(String),

    /// A predicate group was built from zero children
    #[error("Predicate group must contain at least one child")]
    EmptyGroup,

    /// A FROM/JOIN source did not match `table [AS] alias`
    #[error("Syntax error: {0}")]
    Syntax(String),

    /// Raw expression marker count differs from the supplied values
    #[error("Parameter mismatch in '{sql}': {expected} placeholder(s), {supplied} value(s) supplied")]
    ParamMismatch {
        sql: String,
        expected: usize,
        supplied: usize,
    },

    /// Configuration could not be parsed
    #[error("Config error: {0}")]
    Config(String),
}

impl SqlError {
    /// Create a classification error
    pub fn classification(message: impl Into<String>) -> Self {
        Self::Classification(message.into())
    }

    /// Create a syntax error
    pub fn syntax(message: impl Into<String>) -> Self {
        Self::Syntax(message.into())
    }

    /// Check if this is a classification error
    pub fn is_classification(&self) -> bool {
        matches!(self, Self::Classification(_))
    }
}

impl From<toml::de::Error> for SqlError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}
