//! Error types for the Shift Ledger CLI.
//!
//! Provides structured error handling with:
//! - Machine-readable error codes (`ErrorCode`)
//! - Category-based exit codes (2=db, 3=not_found, 4=validation, 7=config, 8=io)
//! - Retryability flags for scripted callers
//! - Context-aware recovery hints
//! - Structured JSON output for piped / non-TTY consumers

use thiserror::Error;

/// Result type alias for ledger operations.
pub type Result<T> = std::result::Result<T, Error>;

// ── Error Code ────────────────────────────────────────────────

/// Machine-readable error codes grouped by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Database (exit 2)
    DatabaseError,

    // Not Found (exit 3)
    EmployeeNotFound,

    // Validation (exit 4)
    InvalidAmount,
    InvalidArgument,
    RequiredField,

    // Config (exit 7)
    ConfigError,

    // I/O (exit 8)
    IoError,
    JsonError,
}

impl ErrorCode {
    /// Machine-readable SCREAMING_SNAKE code string.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::DatabaseError => "DATABASE_ERROR",
            Self::EmployeeNotFound => "EMPLOYEE_NOT_FOUND",
            Self::InvalidAmount => "INVALID_AMOUNT",
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::RequiredField => "REQUIRED_FIELD",
            Self::ConfigError => "CONFIG_ERROR",
            Self::IoError => "IO_ERROR",
            Self::JsonError => "JSON_ERROR",
        }
    }

    /// Category-based exit code.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::DatabaseError => 2,
            Self::EmployeeNotFound => 3,
            Self::InvalidAmount | Self::InvalidArgument | Self::RequiredField => 4,
            Self::ConfigError => 7,
            Self::IoError | Self::JsonError => 8,
        }
    }

    /// Whether a caller should retry with corrected input.
    ///
    /// True only for validation errors. Store failures are fatal.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::InvalidAmount | Self::InvalidArgument | Self::RequiredField
        )
    }
}

// ── Error Enum ────────────────────────────────────────────────

/// Errors that can occur in ledger operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Employee not found: {id}")]
    EmployeeNotFound { id: i64 },

    #[error("Invalid amount: {input}")]
    InvalidAmount { input: String },

    #[error("Required field is empty: {0}")]
    RequiredField(&'static str),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Map this error to its structured `ErrorCode`.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::EmployeeNotFound { .. } => ErrorCode::EmployeeNotFound,
            Self::InvalidAmount { .. } => ErrorCode::InvalidAmount,
            Self::RequiredField(_) => ErrorCode::RequiredField,
            Self::InvalidArgument(_) => ErrorCode::InvalidArgument,
            Self::Database(_) => ErrorCode::DatabaseError,
            Self::Io(_) => ErrorCode::IoError,
            Self::Json(_) => ErrorCode::JsonError,
            Self::Config(_) => ErrorCode::ConfigError,
        }
    }

    /// Category-based exit code, delegating to the `ErrorCode`.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.error_code().exit_code()
    }

    /// True for errors the interactive menu reports and then keeps looping.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        self.error_code().is_retryable() || matches!(self, Self::EmployeeNotFound { .. })
    }

    /// Context-aware recovery hint.
    ///
    /// Returns `None` if no actionable suggestion exists.
    #[must_use]
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::EmployeeNotFound { id } => Some(format!(
                "No employee with ID {id}. Use `shiftledger employee list` to see registered employees."
            )),

            Self::InvalidAmount { input } => {
                if input.contains(',') {
                    Some("Use '.' as the decimal separator, e.g. 100.50".to_string())
                } else if input.trim_start().starts_with('-') {
                    Some("Sale amounts cannot be negative".to_string())
                } else {
                    Some(format!(
                        "Amounts must be finite, non-negative and at most {}, e.g. 19.90",
                        crate::model::Amount::MAX
                    ))
                }
            }

            Self::RequiredField(field) => Some(format!("Provide a non-blank {field}")),

            Self::Database(e) if e.to_string().contains("locked") => Some(
                "Another process is using the ledger file. Close it and try again.".to_string(),
            ),

            Self::Config(_) => {
                Some("Pass --db <PATH> or set SHIFTLEDGER_DB to choose the ledger file".to_string())
            }

            Self::InvalidArgument(_) | Self::Database(_) | Self::Io(_) | Self::Json(_) => None,
        }
    }

    /// Structured JSON representation for machine consumption.
    #[must_use]
    pub fn to_structured_json(&self) -> serde_json::Value {
        let code = self.error_code();
        let mut obj = serde_json::json!({
            "error": {
                "code": code.as_str(),
                "message": self.to_string(),
                "retryable": code.is_retryable(),
                "exit_code": code.exit_code(),
            }
        });

        if let Some(hint) = self.hint() {
            obj["error"]["hint"] = serde_json::Value::String(hint);
        }

        obj
    }
}
