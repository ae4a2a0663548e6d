//! Build configuration resolution and tenant validation
//!
//! [`resolve`] turns a tenant key into the values a build step injects:
//! package identifier, launcher label and the two host placeholders.
//! [`validate_all`] checks the whole registry and reports every problem in
//! one pass.

use crate::error::{TenantError, TenantResult};
use crate::registry::TenantRegistry;
use crate::tenant::TenantDefinition;
use flavorkit_core::config::PlaceholderNames;
use flavorkit_core::validation::{check_application_id, check_flavor_name, check_hostname};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Concrete build values for one tenant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedConfig {
    /// Package identifier for the build
    pub application_id: String,
    /// Launcher label
    pub display_name: String,
    /// Value for the first host placeholder
    pub primary_host: String,
    /// Value for the second host placeholder
    pub secondary_host: String,
}

impl ResolvedConfig {
    /// Placeholder name/value pairs, primary host first
    #[must_use]
    pub fn manifest_placeholders<'a>(
        &'a self,
        names: &'a PlaceholderNames,
    ) -> [(&'a str, &'a str); 2] {
        [
            (names.primary_host.as_str(), self.primary_host.as_str()),
            (names.secondary_host.as_str(), self.secondary_host.as_str()),
        ]
    }

    /// Render as `key=value` lines for a Gradle properties file
    #[must_use]
    pub fn to_gradle_properties(&self, names: &PlaceholderNames) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "applicationId={}", escape_property(&self.application_id));
        let _ = writeln!(out, "appName={}", escape_property(&self.display_name));
        for (name, value) in self.manifest_placeholders(names) {
            let _ = writeln!(
                out,
                "manifestPlaceholders.{}={}",
                escape_property(name),
                escape_property(value)
            );
        }
        out
    }
}

impl From<&TenantDefinition> for ResolvedConfig {
    fn from(tenant: &TenantDefinition) -> Self {
        Self {
            application_id: tenant.application_id.clone(),
            display_name: tenant.display_name.clone(),
            primary_host: tenant.primary_host.clone(),
            secondary_host: tenant.secondary_host.clone(),
        }
    }
}

// `.properties` files are ISO 8859-1 with backslash escapes. Leading
// whitespace is stripped by the reader, so it has to be escaped too.
fn escape_property(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for (idx, c) in value.chars().enumerate() {
        match c {
            '\\' => out.push_str("\\\\"),
            '=' | ':' | '#' | '!' => {
                out.push('\\');
                out.push(c);
            }
            ' ' if idx == 0 => out.push_str("\\ "),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\x0C' => out.push_str("\\f"),
            ' '..='~' => out.push(c),
            _ => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    let _ = write!(out, "\\u{unit:04X}");
                }
            }
        }
    }
    out
}

/// Resolve the build values for `key`.
///
/// Lookup errors from the registry are returned unchanged.
///
/// # Errors
///
/// [`TenantError::UnknownTenant`] when `key` is not registered.
pub fn resolve(registry: &TenantRegistry, key: &str) -> TenantResult<ResolvedConfig> {
    let tenant = registry.get(key)?;
    tracing::debug!(tenant = key, application_id = %tenant.application_id, "Resolved tenant");
    Ok(ResolvedConfig::from(tenant))
}

/// Category of a validation problem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Key is not usable as a product flavor name
    InvalidKey,
    /// Application id is not a valid package name
    InvalidApplicationId,
    /// Display name is blank
    InvalidDisplayName,
    /// Host is not a valid hostname
    InvalidHost,
}

/// One problem found by [`validate_all`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// What went wrong
    pub kind: IssueKind,
    /// Tenant key
    pub tenant: String,
    /// Field holding the offending value
    pub field: &'static str,
    /// Offending value as written
    pub value: String,
    /// Human readable reason
    pub message: String,
}

impl ValidationIssue {
    fn new(
        kind: IssueKind,
        tenant: &TenantDefinition,
        field: &'static str,
        value: &str,
        message: String,
    ) -> Self {
        Self {
            kind,
            tenant: tenant.key.clone(),
            field,
            value: value.to_string(),
            message,
        }
    }

    /// The matching [`TenantError`] for callers that want to fail
    #[must_use]
    pub fn to_error(&self) -> TenantError {
        match self.kind {
            IssueKind::InvalidKey => TenantError::InvalidKey {
                value: self.value.clone(),
                reason: self.message.clone(),
            },
            IssueKind::InvalidApplicationId => TenantError::InvalidApplicationId {
                tenant: self.tenant.clone(),
                value: self.value.clone(),
                reason: self.message.clone(),
            },
            IssueKind::InvalidDisplayName => TenantError::InvalidDisplayName {
                tenant: self.tenant.clone(),
                reason: self.message.clone(),
            },
            IssueKind::InvalidHost => TenantError::InvalidHost {
                tenant: self.tenant.clone(),
                field: self.field.to_string(),
                value: self.value.clone(),
                reason: self.message.clone(),
            },
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}: {} ({:?})", self.tenant, self.field, self.message, self.value)
    }
}

/// Check every tenant and collect all problems.
///
/// Issues come out in registry order, then field order. An empty result
/// means the registry is ready to be rendered.
#[must_use]
pub fn validate_all(registry: &TenantRegistry) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for tenant in registry {
        if let Some(reason) = check_flavor_name(&tenant.key) {
            issues.push(ValidationIssue::new(
                IssueKind::InvalidKey,
                tenant,
                "key",
                &tenant.key,
                reason,
            ));
        }
        if let Some(reason) = check_application_id(&tenant.application_id) {
            issues.push(ValidationIssue::new(
                IssueKind::InvalidApplicationId,
                tenant,
                "application_id",
                &tenant.application_id,
                reason,
            ));
        }
        if tenant.display_name.trim().is_empty() {
            issues.push(ValidationIssue::new(
                IssueKind::InvalidDisplayName,
                tenant,
                "display_name",
                &tenant.display_name,
                "display name is blank".to_string(),
            ));
        }
        for (field, host) in [
            ("primary_host", &tenant.primary_host),
            ("secondary_host", &tenant.secondary_host),
        ] {
            if let Some(reason) = check_hostname(host) {
                issues.push(ValidationIssue::new(
                    IssueKind::InvalidHost,
                    tenant,
                    field,
                    host,
                    reason,
                ));
            }
        }
    }

    for issue in &issues {
        tracing::warn!(tenant = %issue.tenant, field = issue.field, "{}", issue.message);
    }

    issues
}
