//! Configuration and input validation
//!
//! Provides validation for:
//! - Configuration values (fluent [`Validator`])
//! - Domain names used as deep-link hosts
//! - Android application identifiers
//! - Gradle flavor names
//!
//! Validators collect every problem instead of stopping at the first one.
//!
//! # Example
//!
//! ```rust
//! use flavorkit_core::validation::{check_hostname, Validator};
//!
//! let result = Validator::new()
//!     .required("namespace", "com.afyakit.app")
//!     .custom("host", || check_hostname("afyakit.app"))
//!     .validate();
//!
//! assert!(result.is_valid());
//! ```

use crate::error::{Error, ErrorCode, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Longest domain name accepted, in characters
pub const MAX_HOSTNAME_LEN: usize = 253;

/// Longest single domain label accepted, in characters
pub const MAX_LABEL_LEN: usize = 63;

static LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9](?:[a-z0-9-]*[a-z0-9])?$").unwrap());

static APPLICATION_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_]*(?:\.[A-Za-z][A-Za-z0-9_]*)+$").unwrap());

static FLAVOR_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z][A-Za-z0-9]*$").unwrap());

/// Flavor names Android refuses because they collide with source sets or build types
const RESERVED_FLAVOR_NAMES: &[&str] = &["main", "debug", "release"];

/// Validation error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Field that failed validation
    pub field: String,
    /// Error message
    pub message: String,
    /// Error code
    pub code: String,
    /// Expected value (if applicable)
    pub expected: Option<String>,
    /// Actual value (if applicable)
    pub actual: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validation result
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
    warnings: Vec<ValidationError>,
}

impl ValidationResult {
    /// Create a new empty result
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if validation passed
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get all errors
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Get all warnings
    #[must_use]
    pub fn warnings(&self) -> &[ValidationError] {
        &self.warnings
    }

    /// Add an error
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Add a warning
    pub fn add_warning(&mut self, warning: ValidationError) {
        self.warnings.push(warning);
    }

    /// Merge another result into this one
    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    /// Convert to Result type
    ///
    /// # Errors
    ///
    /// A [`ErrorCode::ConfigValidationError`] listing every error, if any.
    pub fn to_result(self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            let messages: Vec<String> = self.errors.iter().map(ToString::to_string).collect();
            Err(Error::new(
                ErrorCode::ConfigValidationError,
                format!("Validation failed: {}", messages.join("; ")),
            ))
        }
    }
}

/// Fluent validator builder
#[derive(Debug)]
pub struct Validator {
    result: ValidationResult,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    /// Create a new validator
    #[must_use]
    pub fn new() -> Self {
        Self {
            result: ValidationResult::new(),
        }
    }

    /// Validate that a field is not empty
    #[must_use]
    pub fn required(mut self, field: &str, value: &str) -> Self {
        if value.trim().is_empty() {
            self.result.add_error(ValidationError {
                field: field.to_string(),
                message: "Field is required".to_string(),
                code: "REQUIRED".to_string(),
                expected: Some("non-empty value".to_string()),
                actual: Some("empty".to_string()),
            });
        }
        self
    }

    /// Validate against a regex pattern
    #[must_use]
    pub fn pattern(mut self, field: &str, value: &str, pattern: &Regex, description: &str) -> Self {
        if !pattern.is_match(value) {
            self.result.add_error(ValidationError {
                field: field.to_string(),
                message: format!("Must match {description}"),
                code: "PATTERN".to_string(),
                expected: Some(description.to_string()),
                actual: Some(value.to_string()),
            });
        }
        self
    }

    /// Add a custom validation
    #[must_use]
    pub fn custom<F>(mut self, field: &str, f: F) -> Self
    where
        F: FnOnce() -> Option<String>,
    {
        if let Some(message) = f() {
            self.result.add_error(ValidationError {
                field: field.to_string(),
                message,
                code: "CUSTOM".to_string(),
                expected: None,
                actual: None,
            });
        }
        self
    }

    /// Add a warning (non-blocking)
    #[must_use]
    pub fn warn_if(mut self, field: &str, condition: bool, message: &str) -> Self {
        if condition {
            self.result.add_warning(ValidationError {
                field: field.to_string(),
                message: message.to_string(),
                code: "WARNING".to_string(),
                expected: None,
                actual: None,
            });
        }
        self
    }

    /// Complete validation and return result
    #[must_use]
    pub fn validate(self) -> ValidationResult {
        self.result
    }
}

/// Check that `host` is a syntactically valid, lowercase domain name.
///
/// Returns `None` when the host is acceptable, otherwise the reason it is not.
/// At least two labels are required and the top-level label may not be numeric,
/// so bare words and IPv4 addresses are rejected.
#[must_use]
pub fn check_hostname(host: &str) -> Option<String> {
    if host.is_empty() {
        return Some("host is empty".to_string());
    }
    if host.len() > MAX_HOSTNAME_LEN {
        return Some(format!(
            "host is {} characters long (max {MAX_HOSTNAME_LEN})",
            host.len()
        ));
    }

    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() < 2 {
        return Some("host must contain at least two labels".to_string());
    }

    for label in &labels {
        if label.is_empty() {
            return Some("host contains an empty label".to_string());
        }
        if label.len() > MAX_LABEL_LEN {
            return Some(format!(
                "label '{label}' is {} characters long (max {MAX_LABEL_LEN})",
                label.len()
            ));
        }
        if !LABEL.is_match(label) {
            return Some(format!(
                "label '{label}' must use lowercase letters, digits and inner hyphens only"
            ));
        }
    }

    let tld = labels[labels.len() - 1];
    if tld.chars().all(|c| c.is_ascii_digit()) {
        return Some(format!("top-level label '{tld}' must not be numeric"));
    }

    None
}

/// Check that `id` is a valid Android application id (`com.example.app`).
#[must_use]
pub fn check_application_id(id: &str) -> Option<String> {
    if id.is_empty() {
        return Some("application id is empty".to_string());
    }
    if !id.contains('.') {
        return Some("application id must have at least two segments".to_string());
    }
    if APPLICATION_ID.is_match(id) {
        None
    } else {
        Some(
            "each segment must start with a letter and contain only letters, digits or '_'"
                .to_string(),
        )
    }
}

/// Check that `name` can be used as a Gradle product flavor name.
#[must_use]
pub fn check_flavor_name(name: &str) -> Option<String> {
    if name.is_empty() {
        return Some("flavor name is empty".to_string());
    }
    if !FLAVOR_NAME.is_match(name) {
        return Some(
            "flavor name must start with a lowercase letter and contain only letters or digits"
                .to_string(),
        );
    }
    if RESERVED_FLAVOR_NAMES.contains(&name)
        || name.starts_with("test")
        || name.starts_with("androidTest")
    {
        return Some(format!("flavor name '{name}' is reserved by the Android plugin"));
    }
    None
}

/// Regex matching valid Gradle flavor and dimension names
#[must_use]
pub fn flavor_name_pattern() -> &'static Regex {
    &FLAVOR_NAME
}

/// Regex matching valid Android application ids and namespaces
#[must_use]
pub fn application_id_pattern() -> &'static Regex {
    &APPLICATION_ID
}
