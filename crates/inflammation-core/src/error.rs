use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the inflammation toolkit.
#[derive(Error, Debug)]
pub enum InflammationError {
    /// A data source found no files matching its pattern.
    #[error("No inflammation files matching {pattern} found in the path {}", .path.display())]
    NoMatchingFiles { path: PathBuf, pattern: String },

    /// A cell could not be interpreted as a number.
    #[error("Non-numeric value {value:?} at row {row}, column {column}")]
    TypeMismatch {
        row: usize,
        column: usize,
        value: String,
    },

    /// Normalisation input contained a negative reading.
    #[error("Inflammation values should not be negative (found {value} at row {row}, column {column})")]
    NegativeValue { row: usize, column: usize, value: f64 },

    /// Two pieces of data that must line up had different widths.
    #[error("Shape mismatch in {context}: expected {expected} columns, found {found}")]
    ShapeMismatch {
        expected: usize,
        found: usize,
        context: String,
    },

    /// A statistic was requested over a matrix with no rows.
    #[error("Cannot compute daily statistics of an empty matrix")]
    EmptyMatrix,

    /// A file could not be opened or read from disk.
    #[error("Failed to read file {}: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A CSV document could not be tokenised.
    #[error("Failed to parse CSV {}: {source}", .path.display())]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A JSON document could not be parsed.
    #[error("Failed to parse JSON {}: {source}", .path.display())]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// An error originating from the terminal / TUI layer.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the inflammation crates.
pub type Result<T> = std::result::Result<T, InflammationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_no_matching_files() {
        let err = InflammationError::NoMatchingFiles {
            path: PathBuf::from("/empty/dir"),
            pattern: "inflammation*.csv".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "No inflammation files matching inflammation*.csv found in the path /empty/dir"
        );
    }

    #[test]
    fn test_error_display_type_mismatch() {
        let err = InflammationError::TypeMismatch {
            row: 0,
            column: 1,
            value: "there".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Non-numeric value \"there\" at row 0, column 1"
        );
    }

    #[test]
    fn test_error_display_negative_value() {
        let err = InflammationError::NegativeValue {
            row: 2,
            column: 0,
            value: -1.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("should not be negative"));
        assert!(msg.contains("-1"));
    }

    #[test]
    fn test_error_display_shape_mismatch() {
        let err = InflammationError::ShapeMismatch {
            expected: 40,
            found: 39,
            context: "daily means".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Shape mismatch in daily means: expected 40 columns, found 39"
        );
    }

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = InflammationError::FileRead {
            path: PathBuf::from("/data/inflammation-01.csv"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file"));
        assert!(msg.contains("/data/inflammation-01.csv"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_error_display_config() {
        let err = InflammationError::Config("missing data dir".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing data dir");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: InflammationError = io_err.into();
        assert!(err.to_string().contains("denied"));
    }
}
