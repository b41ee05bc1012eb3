//! Error types for loading, cleaning, and filtering the order dataset.
//!
//! Fatal conditions only. Rows holding the missing-value sentinel are not
//! errors; they are dropped and counted in [`crate::stats::CleanReport`].

use chrono::NaiveDate;
use thiserror::Error;

/// The input header row does not match the expected layout.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

/// Failure reading the input file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// A non-sentinel value that cannot be coerced to its column's type.
#[derive(Debug, Error)]
pub enum CleanError {
    #[error("Row {row}, column '{column}': cannot parse '{value}'")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
    },
}

/// Rejected filter parameters.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("Date {date} is outside the selectable window {start}..={end}")]
    DateOutOfWindow {
        date: NaiveDate,
        start: NaiveDate,
        end: NaiveDate,
    },
}

/// Startup failure of a dashboard session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Clean(#[from] CleanError),

    #[error("Logo asset not found at {0}")]
    MissingAsset(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_columns_message() {
        let err = SchemaError::MissingColumns(vec!["City".into(), "Festival".into()]);
        assert_eq!(err.to_string(), "Missing required column(s): City, Festival");
    }

    #[test]
    fn test_error_conversion_chain() {
        let schema_err = SchemaError::MissingColumns(vec!["ID".into()]);
        let load_err: LoadError = schema_err.into();
        let session_err: SessionError = load_err.into();
        assert!(session_err.to_string().contains("ID"));
    }

    #[test]
    fn test_invalid_value_format() {
        let err = CleanError::InvalidValue {
            row: 3,
            column: "Delivery_person_Age",
            value: "abc".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Row 3"));
        assert!(msg.contains("Delivery_person_Age"));
        assert!(msg.contains("abc"));
    }
}
