//! Trip Reconciler Library
//!
//! A Rust library for reconciling trip records reported by transport
//! partners in their own spreadsheet layouts against the operator's
//! authoritative trip database.
//!
//! This library provides tools for:
//! - Parsing heterogeneous partner spreadsheet templates into a normalized row shape
//! - Deriving template-specific join keys where no shared primary key exists
//! - Auto-detecting the partner template from a sheet's column signature
//! - Matching partner rows against authoritative trips in two passes
//! - Field-level difference detection with severity scoring
//! - Summary statistics suitable for settlement review

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod comparison_engine;
        pub mod template_parser;
        pub mod template_registry;
    }
    pub mod adapters {
        pub mod spreadsheet;
        pub mod trip_store;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{AuthoritativeRecord, ComparisonResult, NormalizedRow, TemplateType};
pub use config::ReconcileConfig;

/// Result type alias for the trip reconciler
pub type Result<T> = std::result::Result<T, Error>;

/// Comprehensive error types for reconciliation operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV decoding error
    #[error("CSV parsing error in file '{file}': {message}")]
    CsvParsing {
        file: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// JSON decoding error
    #[error("JSON error in '{file}': {message}")]
    Json {
        file: String,
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    /// Sheet columns do not satisfy a template's required signature
    #[error("template '{}' is missing required columns: {}", .template, .missing_columns.join(", "))]
    TemplateFormat {
        template: String,
        missing_columns: Vec<String>,
    },

    /// Requested template type is not registered
    #[error("unknown template type: '{name}'")]
    TemplateNotFound { name: String },

    /// Auto-detection found no template matching the sheet columns exactly
    #[error(
        "no template matches the sheet columns; best candidate '{}' scored {:.0}% and is missing: {}",
        .best_candidate,
        .score,
        .missing_columns.join(", ")
    )]
    TemplateDetection {
        best_candidate: String,
        score: f64,
        missing_columns: Vec<String>,
    },

    /// Comparison invoked with nothing to reconcile
    #[error("empty input: {message}")]
    EmptyInput { message: String },

    /// Data validation error
    #[error("data validation error: {message}")]
    DataValidation { message: String },

    /// Configuration error
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// Date parsing error
    #[error("date parsing error: {message}")]
    DateTimeParsing {
        message: String,
        #[source]
        source: chrono::ParseError,
    },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV parsing error with context
    pub fn csv_parsing(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::CsvParsing {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a JSON error with context
    pub fn json(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<serde_json::Error>,
    ) -> Self {
        Self::Json {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a template format error listing every missing column
    pub fn template_format(template: impl Into<String>, missing_columns: Vec<String>) -> Self {
        Self::TemplateFormat {
            template: template.into(),
            missing_columns,
        }
    }

    /// Create a template not found error
    pub fn template_not_found(name: impl Into<String>) -> Self {
        Self::TemplateNotFound { name: name.into() }
    }

    /// Create a template detection error naming the best candidate
    pub fn template_detection(
        best_candidate: impl Into<String>,
        score: f64,
        missing_columns: Vec<String>,
    ) -> Self {
        Self::TemplateDetection {
            best_candidate: best_candidate.into(),
            score,
            missing_columns,
        }
    }

    /// Create an empty input error
    pub fn empty_input(message: impl Into<String>) -> Self {
        Self::EmptyInput {
            message: message.into(),
        }
    }

    /// Create a data validation error
    pub fn data_validation(message: impl Into<String>) -> Self {
        Self::DataValidation {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a date parsing error
    pub fn datetime_parsing(message: impl Into<String>, source: chrono::ParseError) -> Self {
        Self::DateTimeParsing {
            message: message.into(),
            source,
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            file: "unknown".to_string(),
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Json {
            file: "unknown".to_string(),
            message: "JSON decoding failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<chrono::ParseError> for Error {
    fn from(error: chrono::ParseError) -> Self {
        Self::DateTimeParsing {
            message: "date parsing failed".to_string(),
            source: error,
        }
    }
}
