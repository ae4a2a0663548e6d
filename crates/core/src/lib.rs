//! Core utilities for flavorkit
//!
//! This crate provides shared functionality used by the tenant tooling:
//!
//! - **Error handling**: errors with codes, context, and recovery suggestions
//! - **Configuration**: TOML-based configuration with validation
//! - **Validation**: collecting validators plus domain name, application id
//!   and flavor name syntax checks
//!
//! # Example
//!
//! ```rust,no_run
//! use flavorkit_core::config::Config;
//!
//! let config = Config::load(None)?;
//! println!("flavor dimension: {}", config.schema.android.flavor_dimension);
//! # Ok::<(), flavorkit_core::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod validation;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{AndroidConfig, BuildTypeConfig, Config, ConfigSchema};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
    pub use crate::validation::{ValidationResult, Validator};
}
