//! Tenant registry errors

use flavorkit_core::{Error, ErrorCode};
use thiserror::Error;

/// Result type alias for registry operations
pub type TenantResult<T> = Result<T, TenantError>;

/// Errors raised while loading, querying or validating tenants
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TenantError {
    /// Two entries share a key
    #[error("Duplicate tenant key: {key}")]
    DuplicateKey {
        /// The repeated key
        key: String,
    },

    /// Two tenants share an application id
    #[error("Duplicate application id {application_id} (tenants {first} and {second})")]
    DuplicateApplicationId {
        /// The repeated application id
        application_id: String,
        /// Tenant that registered it first
        first: String,
        /// Tenant that tried to reuse it
        second: String,
    },

    /// No tenant with this key
    #[error("Unknown tenant: {key}")]
    UnknownTenant {
        /// Requested key
        key: String,
    },

    /// Host is empty or not a domain name
    #[error("Invalid host for tenant {tenant} ({field} = {value:?}): {reason}")]
    InvalidHost {
        /// Tenant key
        tenant: String,
        /// `primary_host` or `secondary_host`
        field: String,
        /// Offending value
        value: String,
        /// What is wrong with it
        reason: String,
    },

    /// Application id is not reverse-domain syntax
    #[error("Invalid application id for tenant {tenant} ({value:?}): {reason}")]
    InvalidApplicationId {
        /// Tenant key
        tenant: String,
        /// Offending value
        value: String,
        /// What is wrong with it
        reason: String,
    },

    /// Tenant key cannot be used as a flavor name
    #[error("Invalid tenant key {value:?}: {reason}")]
    InvalidKey {
        /// Offending key
        value: String,
        /// What is wrong with it
        reason: String,
    },

    /// Display name is blank
    #[error("Invalid display name for tenant {tenant}: {reason}")]
    InvalidDisplayName {
        /// Tenant key
        tenant: String,
        /// What is wrong with it
        reason: String,
    },

    /// The process-wide registry was installed twice
    #[error("Global tenant registry is already installed")]
    GlobalAlreadyInstalled,
}

impl TenantError {
    /// Error code used when reporting this error
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::DuplicateKey { .. } => ErrorCode::DuplicateTenantKey,
            Self::DuplicateApplicationId { .. } => ErrorCode::DuplicateApplicationId,
            Self::UnknownTenant { .. } => ErrorCode::UnknownTenant,
            Self::InvalidHost { .. } => ErrorCode::InvalidHost,
            Self::InvalidApplicationId { .. } => ErrorCode::InvalidApplicationId,
            Self::InvalidKey { .. } | Self::InvalidDisplayName { .. } => {
                ErrorCode::ValidationError
            }
            Self::GlobalAlreadyInstalled => ErrorCode::RegistryAlreadyInstalled,
        }
    }
}

impl From<TenantError> for Error {
    fn from(err: TenantError) -> Self {
        let suggestion = match &err {
            TenantError::DuplicateKey { .. } => {
                Some("Give every tenant a distinct key in the catalog")
            }
            TenantError::DuplicateApplicationId { .. } => {
                Some("Each tenant must ship under its own application id")
            }
            TenantError::UnknownTenant { .. } => {
                Some("Run `flavorkit list` to see the configured tenants")
            }
            TenantError::InvalidHost { .. } => {
                Some("Use a lowercase domain name such as `www.example.com`")
            }
            TenantError::InvalidApplicationId { .. } => {
                Some("Use reverse-domain notation such as `com.example.app`")
            }
            _ => None,
        };

        let error = Error::new(err.code(), err.to_string());
        let error = match suggestion {
            Some(s) => error.with_suggestion(s),
            None => error,
        };
        error.with_source(err)
    }
}
