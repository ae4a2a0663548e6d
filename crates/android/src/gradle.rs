//! Gradle build script integration
//!
//! Renders the Kotlin DSL blocks the app module's `build.gradle.kts` needs
//! and lists the build variants and task names the tenant flavors produce.

use crate::registry::TenantRegistry;
use crate::resolver::ResolvedConfig;
use flavorkit_core::config::{AndroidConfig, BuildTypeConfig};
use serde::Serialize;
use std::fmt::Write as _;

/// One flavor × build type combination
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildVariant {
    /// Tenant key / flavor name
    pub flavor: String,
    /// Build type name
    pub build_type: String,
    /// Gradle variant name, e.g. `afyakitRelease`
    pub name: String,
}

impl BuildVariant {
    /// Combine a flavor with a build type
    #[must_use]
    pub fn new(flavor: &str, build_type: &str) -> Self {
        Self {
            flavor: flavor.to_string(),
            build_type: build_type.to_string(),
            name: format!("{flavor}{}", capitalize(build_type)),
        }
    }

    /// APK task, e.g. `assembleAfyakitRelease`
    #[must_use]
    pub fn assemble_task(&self) -> String {
        format!("assemble{}", capitalize(&self.name))
    }

    /// App bundle task, e.g. `bundleAfyakitRelease`
    #[must_use]
    pub fn bundle_task(&self) -> String {
        format!("bundle{}", capitalize(&self.name))
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Every variant, tenant-major, in registry then build type order
#[must_use]
pub fn variants(registry: &TenantRegistry, build_types: &[BuildTypeConfig]) -> Vec<BuildVariant> {
    registry
        .keys()
        .flat_map(|flavor| {
            build_types
                .iter()
                .map(move |bt| BuildVariant::new(flavor, &bt.name))
        })
        .collect()
}

fn kotlin_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '$' => out.push_str("\\$"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Render the module `namespace` assignment
#[must_use]
pub fn render_namespace(android: &AndroidConfig) -> String {
    format!("namespace = {}\n", kotlin_string(&android.namespace))
}

/// Render the `flavorDimensions` and `productFlavors` blocks
#[must_use]
pub fn render_product_flavors(registry: &TenantRegistry, android: &AndroidConfig) -> String {
    let dimension = kotlin_string(&android.flavor_dimension);
    let mut out = String::new();

    let _ = writeln!(out, "flavorDimensions += listOf({dimension})");
    let _ = writeln!(out);
    let _ = writeln!(out, "productFlavors {{");
    for tenant in registry {
        let resolved = ResolvedConfig::from(tenant);
        let _ = writeln!(out, "    create({}) {{", kotlin_string(&tenant.key));
        let _ = writeln!(out, "        dimension = {dimension}");
        let _ = writeln!(
            out,
            "        applicationId = {}",
            kotlin_string(&resolved.application_id)
        );
        let _ = writeln!(
            out,
            "        resValue(\"string\", {}, {})",
            kotlin_string(&android.app_name_resource),
            kotlin_string(&resolved.display_name)
        );
        for (name, value) in resolved.manifest_placeholders(&android.placeholders) {
            let _ = writeln!(
                out,
                "        manifestPlaceholders[{}] = {}",
                kotlin_string(name),
                kotlin_string(value)
            );
        }
        let _ = writeln!(out, "    }}");
    }
    let _ = writeln!(out, "}}");
    out
}

/// Render the `buildTypes` block
#[must_use]
pub fn render_build_types(build_types: &[BuildTypeConfig]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "buildTypes {{");
    for bt in build_types {
        let accessor = match bt.name.as_str() {
            "debug" | "release" => "getByName",
            _ => "create",
        };
        let _ = writeln!(out, "    {accessor}({}) {{", kotlin_string(&bt.name));
        let _ = writeln!(out, "        isMinifyEnabled = {}", bt.minify_enabled);
        let _ = writeln!(out, "        isShrinkResources = {}", bt.shrink_resources);
        if let Some(signing) = &bt.signing_config {
            let _ = writeln!(
                out,
                "        signingConfig = signingConfigs.getByName({})",
                kotlin_string(signing)
            );
        }
        let _ = writeln!(out, "    }}");
    }
    let _ = writeln!(out, "}}");
    out
}
