use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocgenError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("HTTP request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Required column '{column}' is missing from the header row")]
    MissingColumnError { column: String },

    #[error("Table has no header row")]
    EmptyTableError,

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Source,
    Output,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DocgenError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DocgenError::ConfigError { .. }
            | DocgenError::ConfigValidationError { .. }
            | DocgenError::InvalidConfigValueError { .. }
            | DocgenError::MissingConfigError { .. } => ErrorCategory::Configuration,
            DocgenError::ApiError(_) | DocgenError::CsvError(_) => ErrorCategory::Source,
            DocgenError::ZipError(_) | DocgenError::IoError(_) => ErrorCategory::Output,
            DocgenError::SerializationError(_)
            | DocgenError::MissingColumnError { .. }
            | DocgenError::EmptyTableError
            | DocgenError::ProcessingError { .. } => ErrorCategory::Data,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            DocgenError::EmptyTableError => ErrorSeverity::Low,
            DocgenError::ApiError(_) => ErrorSeverity::Medium,
            DocgenError::IoError(_) | DocgenError::ZipError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "Check the TOML file and command-line flags, then run again"
            }
            ErrorCategory::Source => {
                "Make sure the quote table exists, is reachable and is valid CSV"
            }
            ErrorCategory::Output => {
                "Check that the output directory exists and is writable"
            }
            ErrorCategory::Data => match self {
                DocgenError::MissingColumnError { .. } => {
                    "Add the missing column to the header row of the quote table"
                }
                _ => "Inspect the quote table contents",
            },
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DocgenError::ApiError(_) => "Could not download the quote table".to_string(),
            DocgenError::EmptyTableError => "The quote table is empty, nothing to do".to_string(),
            DocgenError::MissingColumnError { column } => {
                format!("The quote table has no '{}' column", column)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DocgenError>;
