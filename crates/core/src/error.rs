//! Error handling with codes, context and recovery suggestions
//!
//! Every failure surfaced to an operator carries:
//! - A stable error code for programmatic handling
//! - The offending value in the message
//! - Optional context and a recovery suggestion

use std::fmt;
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // IO errors (2xxx)
    /// Any other filesystem failure
    IoError = 2000,
    /// A named file does not exist
    FileNotFound = 2001,
    /// A file exists but cannot be read
    PermissionDenied = 2002,

    // Configuration errors (3xxx)
    /// Configuration file could not be read
    ConfigError = 3000,
    /// An explicitly named configuration file does not exist
    ConfigNotFound = 3001,
    /// A TOML or JSON document is malformed or has the wrong shape
    ConfigParseError = 3002,
    /// Configuration values failed validation
    ConfigValidationError = 3003,

    // Tenant registry errors (4xxx)
    /// Two catalog entries share a key
    DuplicateTenantKey = 4001,
    /// Two catalog entries share an application id
    DuplicateApplicationId = 4002,
    /// No tenant with the requested key
    UnknownTenant = 4003,
    /// The process-wide registry was installed twice
    RegistryAlreadyInstalled = 4004,

    // Validation errors (6xxx)
    /// A value failed a validation rule
    ValidationError = 6000,
    /// A host is not a valid domain name
    InvalidHost = 6001,
    /// An application id is not a valid package name
    InvalidApplicationId = 6002,
}

impl ErrorCode {
    /// Get the numeric code
    #[must_use]
    pub fn code(self) -> u32 {
        self as u32
    }

    /// Get a human-readable category
    #[must_use]
    pub fn category(self) -> &'static str {
        match self.code() / 1000 {
            2 => "IO",
            3 => "Configuration",
            4 => "Tenant",
            6 => "Validation",
            _ => "Unknown",
        }
    }

    /// Process exit code a CLI should use for this error
    #[must_use]
    pub fn exit_code(self) -> i32 {
        match self.code() / 1000 {
            3 => exit_codes::CONFIG_ERROR,
            6 => exit_codes::VALIDATION_ERROR,
            _ if self == ErrorCode::UnknownTenant => exit_codes::UNKNOWN_TENANT,
            4 => exit_codes::CONFIG_ERROR,
            _ => exit_codes::FAILURE,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

/// Main error type with rich context
#[derive(Error, Debug)]
pub struct Error {
    /// Error code for programmatic handling
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional context
    pub context: Option<String>,
    /// Recovery suggestion
    pub suggestion: Option<String>,
    /// Source error
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ctx) = &self.context {
            write!(f, "\n  Context: {ctx}")?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n  Suggestion: {suggestion}")?;
        }
        Ok(())
    }
}

impl Error {
    /// Create a new error
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: None,
            suggestion: None,
            source: None,
        }
    }

    /// Add context to the error
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Add a recovery suggestion
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add a source error
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // Convenience constructors

    /// A named file is missing
    #[must_use]
    pub fn file_not_found(path: impl AsRef<std::path::Path>) -> Self {
        Self::new(
            ErrorCode::FileNotFound,
            format!("File not found: {}", path.as_ref().display()),
        )
        .with_suggestion("Check that the file exists and you have read permissions")
    }

    /// An explicitly named configuration file is missing
    #[must_use]
    pub fn config_not_found(path: impl AsRef<std::path::Path>) -> Self {
        Self::new(
            ErrorCode::ConfigNotFound,
            format!("Configuration file not found: {}", path.as_ref().display()),
        )
        .with_suggestion("Create a .flavorkit.toml file or use --config to specify a path")
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Exit codes for CLI commands
pub mod exit_codes {
    /// Command completed
    pub const SUCCESS: i32 = 0;
    /// Unclassified failure
    pub const FAILURE: i32 = 1;
    /// Tenant data failed validation
    pub const VALIDATION_ERROR: i32 = 2;
    /// Configuration or catalog could not be loaded
    pub const CONFIG_ERROR: i32 = 3;
    /// Requested tenant does not exist
    pub const UNKNOWN_TENANT: i32 = 4;
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        let code = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorCode::FileNotFound,
            std::io::ErrorKind::PermissionDenied => ErrorCode::PermissionDenied,
            _ => ErrorCode::IoError,
        };
        Error::new(code, err.to_string()).with_source(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::new(ErrorCode::ConfigParseError, format!("JSON parse error: {err}"))
            .with_source(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::new(ErrorCode::ConfigParseError, format!("TOML parse error: {err}"))
            .with_source(err)
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Attach context to the error, if any
    ///
    /// # Errors
    ///
    /// Returns the original error with `context` set.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Attach a recovery suggestion to the error, if any
    ///
    /// # Errors
    ///
    /// Returns the original error with `suggestion` set.
    fn with_suggestion(self, suggestion: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_suggestion(self, suggestion: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_suggestion(suggestion))
    }
}
