//! Multi-tenant Android flavor resolution
//!
//! This crate maps tenant brands onto Android build parameters:
//! - Tenant definitions and the immutable tenant registry
//! - Resolution of a tenant key to its build values, plus registry-wide validation
//! - Tenant catalogs (embedded, TOML or JSON files)
//! - Kotlin DSL rendering and build-variant listing for Gradle

#![warn(missing_docs)]

pub mod catalog;
pub mod error;
pub mod gradle;
pub mod registry;
pub mod resolver;
pub mod tenant;

pub use error::{TenantError, TenantResult};
pub use registry::TenantRegistry;
pub use resolver::{resolve, validate_all, ResolvedConfig, ValidationIssue};
pub use tenant::TenantDefinition;
