//! Configuration schema definitions
//!
//! Every field has a default so an empty file (or no file) yields the same
//! Android settings the tenant app was originally built with.

use crate::validation::{application_id_pattern, flavor_name_pattern, ValidationResult, Validator};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    /// `[general]`
    #[serde(default)]
    pub general: GeneralConfig,

    /// `[android]`
    #[serde(default)]
    pub android: AndroidConfig,

    /// `[logging]`
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ConfigSchema {
    /// Check every section and report all problems found
    #[must_use]
    pub fn validate(&self) -> ValidationResult {
        let mut result = self.android.validate();
        result.merge(
            Validator::new()
                .required("general.project_name", &self.general.project_name)
                .validate(),
        );
        result
    }
}

/// General project configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Project name
    #[serde(default = "default_project_name")]
    pub project_name: String,

    /// Tenant catalog file; the embedded catalog is used when unset
    #[serde(default)]
    pub tenants_file: Option<String>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            project_name: default_project_name(),
            tenants_file: None,
        }
    }
}

fn default_project_name() -> String {
    "AfyaKit".to_string()
}

/// Android packaging settings shared by every tenant flavor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AndroidConfig {
    /// Kotlin/resource namespace of the app module
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Flavor dimension the tenant flavors belong to
    #[serde(default = "default_flavor_dimension")]
    pub flavor_dimension: String,

    /// String resource holding the launcher label
    #[serde(default = "default_app_name_resource")]
    pub app_name_resource: String,

    /// Manifest placeholder names
    #[serde(default)]
    pub placeholders: PlaceholderNames,

    /// Build types crossed with every tenant flavor
    #[serde(default = "default_build_types")]
    pub build_types: Vec<BuildTypeConfig>,
}

impl Default for AndroidConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            flavor_dimension: default_flavor_dimension(),
            app_name_resource: default_app_name_resource(),
            placeholders: PlaceholderNames::default(),
            build_types: default_build_types(),
        }
    }
}

impl AndroidConfig {
    /// Look up a build type by name
    #[must_use]
    pub fn build_type(&self, name: &str) -> Option<&BuildTypeConfig> {
        self.build_types.iter().find(|bt| bt.name == name)
    }

    /// Check the Android section
    #[must_use]
    pub fn validate(&self) -> ValidationResult {
        let mut validator = Validator::new()
            .pattern(
                "android.namespace",
                &self.namespace,
                application_id_pattern(),
                "a reverse-domain namespace",
            )
            .pattern(
                "android.flavor_dimension",
                &self.flavor_dimension,
                flavor_name_pattern(),
                "a lowercase identifier",
            )
            .required("android.app_name_resource", &self.app_name_resource)
            .required("android.placeholders.primary_host", &self.placeholders.primary_host)
            .required(
                "android.placeholders.secondary_host",
                &self.placeholders.secondary_host,
            )
            .custom("android.placeholders", || {
                (self.placeholders.primary_host == self.placeholders.secondary_host)
                    .then(|| "placeholder names must differ".to_string())
            })
            .custom("android.build_types", || {
                self.build_types
                    .is_empty()
                    .then(|| "at least one build type is required".to_string())
            });

        let mut seen = HashSet::new();
        for (idx, build_type) in self.build_types.iter().enumerate() {
            let field = format!("android.build_types[{idx}].name");
            validator = validator
                .pattern(&field, &build_type.name, flavor_name_pattern(), "a lowercase identifier")
                .custom(&field, || {
                    (!seen.insert(build_type.name.as_str()))
                        .then(|| format!("duplicate build type '{}'", build_type.name))
                })
                .custom(&format!("android.build_types[{idx}].shrink_resources"), || {
                    (build_type.shrink_resources && !build_type.minify_enabled).then(|| {
                        "shrink_resources requires minify_enabled".to_string()
                    })
                })
                .warn_if(
                    &format!("android.build_types[{idx}].signing_config"),
                    build_type.name == "release"
                        && build_type.signing_config.as_deref() == Some("debug"),
                    "release builds are signed with the debug keystore",
                );
        }

        validator.validate()
    }
}

fn default_namespace() -> String {
    "com.afyakit.app".to_string()
}

fn default_flavor_dimension() -> String {
    "tenant".to_string()
}

fn default_app_name_resource() -> String {
    "app_name".to_string()
}

/// Manifest placeholder names receiving the tenant hosts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceholderNames {
    /// Placeholder for the primary host, `host1` by default
    #[serde(default = "default_primary_placeholder")]
    pub primary_host: String,

    /// Placeholder for the secondary host, `host2` by default
    #[serde(default = "default_secondary_placeholder")]
    pub secondary_host: String,
}

impl Default for PlaceholderNames {
    fn default() -> Self {
        Self {
            primary_host: default_primary_placeholder(),
            secondary_host: default_secondary_placeholder(),
        }
    }
}

fn default_primary_placeholder() -> String {
    "host1".to_string()
}

fn default_secondary_placeholder() -> String {
    "host2".to_string()
}

/// Per build type packaging switches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildTypeConfig {
    /// Build type name, e.g. `release`
    pub name: String,

    /// R8 code shrinking
    #[serde(default)]
    pub minify_enabled: bool,

    /// Resource shrinking (needs `minify_enabled`)
    #[serde(default)]
    pub shrink_resources: bool,

    /// Signing config name, e.g. `debug`
    #[serde(default)]
    pub signing_config: Option<String>,
}

impl BuildTypeConfig {
    /// Build type with shrinking off and default signing
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            minify_enabled: false,
            shrink_resources: false,
            signing_config: None,
        }
    }

    /// Sign with the named signing config
    #[must_use]
    pub fn with_signing_config(mut self, name: impl Into<String>) -> Self {
        self.signing_config = Some(name.into());
        self
    }

    /// Turn on code and resource shrinking
    #[must_use]
    pub fn with_shrinking(mut self) -> Self {
        self.minify_enabled = true;
        self.shrink_resources = true;
        self
    }
}

// Release stays unshrunk and debug-signed until a real keystore exists.
fn default_build_types() -> Vec<BuildTypeConfig> {
    vec![
        BuildTypeConfig::new("debug"),
        BuildTypeConfig::new("release").with_signing_config("debug"),
    ]
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of compact text
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
