//! Error types for the data-loader crate.
//!
//! Loading is fail-fast: the first unreachable source or malformed row
//! aborts the whole load and is reported to the operator.

use thiserror::Error;

/// Errors that can occur while fetching, parsing, or validating the dataset
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// A source location could not be reached or read
    ///
    /// Covers network failures, non-success HTTP statuses and missing files.
    #[error("Data unavailable from {source_name}: {reason}")]
    DataUnavailable { source_name: String, reason: String },

    /// A row in a source couldn't be parsed
    ///
    /// This variant stores context about where the error occurred
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// A parsed field holds a value outside its allowed domain
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// Referenced entity doesn't exist (e.g., rating for non-existent movie)
    #[error("Missing reference: {entity} with id {id}")]
    MissingReference { entity: String, id: u32 },

    /// The same movie id appeared on more than one row
    #[error("Duplicate movie id {0}")]
    DuplicateMovie(u32),
}

impl DataLoadError {
    pub(crate) fn parse(file: &str, line: usize, reason: impl Into<String>) -> Self {
        DataLoadError::ParseError {
            file: file.to_string(),
            line,
            reason: reason.into(),
        }
    }

    pub(crate) fn unavailable(source_name: impl Into<String>, reason: impl ToString) -> Self {
        DataLoadError::DataUnavailable {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
