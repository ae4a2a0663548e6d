//! Tenant definitions

use serde::{Deserialize, Serialize};

/// One branded deployment of the app.
///
/// `key` doubles as the Gradle product flavor name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TenantDefinition {
    /// Unique short identifier, e.g. `afyakit`
    pub key: String,

    /// Reverse-domain package identifier
    #[serde(alias = "applicationId")]
    pub application_id: String,

    /// Launcher label
    #[serde(alias = "displayName")]
    pub display_name: String,

    /// Value of the first host placeholder
    #[serde(alias = "primaryHost")]
    pub primary_host: String,

    /// Value of the second host placeholder
    #[serde(alias = "secondaryHost")]
    pub secondary_host: String,
}

impl TenantDefinition {
    /// Build a definition from its five fields
    #[must_use]
    pub fn new(
        key: impl Into<String>,
        application_id: impl Into<String>,
        display_name: impl Into<String>,
        primary_host: impl Into<String>,
        secondary_host: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            application_id: application_id.into(),
            display_name: display_name.into(),
            primary_host: primary_host.into(),
            secondary_host: secondary_host.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_camel_case_fields() {
        let tenant: TenantDefinition = serde_json::from_str(
            r#"{
                "key": "afyakit",
                "applicationId": "com.afyakit.app",
                "displayName": "AfyaKit",
                "primaryHost": "afyakit.app",
                "secondaryHost": "www.afyakit.app"
            }"#,
        )
        .unwrap();

        assert_eq!(
            tenant,
            TenantDefinition::new(
                "afyakit",
                "com.afyakit.app",
                "AfyaKit",
                "afyakit.app",
                "www.afyakit.app"
            )
        );
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let result: Result<TenantDefinition, _> = serde_json::from_str(
            r#"{"key": "a", "application_id": "a.b", "display_name": "A",
                "primary_host": "a.b", "secondary_host": "b.c", "host3": "c.d"}"#,
        );
        assert!(result.is_err());
    }
}
