//! Tenant catalog sources
//!
//! Catalogs are `tenants = [...]` tables in TOML or JSON. The catalog the
//! app ships with is embedded at compile time.

use crate::registry::TenantRegistry;
use crate::tenant::TenantDefinition;
use flavorkit_core::error::{Error, Result, ResultExt};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Embedded tenant table
pub const BUILTIN_CATALOG: &str = include_str!("../tenants.toml");

static BUILTIN: OnceCell<TenantRegistry> = OnceCell::new();

/// On-disk catalog shape
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TenantCatalog {
    /// Entries in catalog order
    #[serde(default)]
    pub tenants: Vec<TenantDefinition>,
}

/// Parse a TOML catalog
///
/// # Errors
///
/// [`flavorkit_core::ErrorCode::ConfigParseError`] when the document is malformed.
pub fn from_toml_str(content: &str) -> Result<Vec<TenantDefinition>> {
    let catalog: TenantCatalog = toml::from_str(content)?;
    Ok(catalog.tenants)
}

/// Parse a JSON catalog
///
/// # Errors
///
/// [`flavorkit_core::ErrorCode::ConfigParseError`] when the document is malformed.
pub fn from_json_str(content: &str) -> Result<Vec<TenantDefinition>> {
    let catalog: TenantCatalog = serde_json::from_str(content)?;
    Ok(catalog.tenants)
}

/// Read a catalog file; `.json` files are parsed as JSON, anything else as TOML
///
/// # Errors
///
/// Fails when the file is missing, unreadable or malformed.
pub fn load_file(path: &Path) -> Result<Vec<TenantDefinition>> {
    if !path.exists() {
        return Err(Error::file_not_found(path));
    }
    let content = std::fs::read_to_string(path)?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let parsed = if is_json {
        from_json_str(&content)
    } else {
        from_toml_str(&content)
    };
    let tenants = parsed.context(format!("While reading tenant catalog {}", path.display()))?;

    tracing::debug!(path = %path.display(), tenants = tenants.len(), "Tenant catalog read");
    Ok(tenants)
}

/// Read a catalog file straight into a registry
///
/// # Errors
///
/// Everything [`load_file`] reports, plus duplicate keys or application ids.
pub fn load_registry(path: &Path) -> Result<TenantRegistry> {
    let tenants = load_file(path)?;
    TenantRegistry::load(tenants)
        .map_err(Error::from)
        .context(format!("While loading tenant catalog {}", path.display()))
}

/// Registry built from the embedded catalog, parsed once per process
///
/// # Errors
///
/// Only if the embedded catalog itself is broken.
pub fn builtin() -> Result<&'static TenantRegistry> {
    BUILTIN.get_or_try_init(|| {
        let tenants = from_toml_str(BUILTIN_CATALOG)?;
        Ok(TenantRegistry::load(tenants)?)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::{resolve, validate_all};
    use flavorkit_core::ErrorCode;
    use tempfile::TempDir;

    #[test]
    fn test_builtin_catalog() {
        let registry = builtin().unwrap();
        let keys: Vec<&str> = registry.keys().collect();
        assert_eq!(keys, vec!["afyakit", "danabtmc", "dawapap", "rpmoc"]);
        assert!(validate_all(registry).is_empty());

        let rpmoc = resolve(registry, "rpmoc").unwrap();
        assert_eq!(rpmoc.display_name, "RPMO Clinic");
        assert_eq!(rpmoc.primary_host, "rpmoc.afyakit.app");
        assert_eq!(rpmoc.secondary_host, "afyakit.app");
    }

    #[test]
    fn test_builtin_is_shared() {
        assert!(std::ptr::eq(builtin().unwrap(), builtin().unwrap()));
    }

    #[test]
    fn test_load_json_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tenants.json");
        std::fs::write(
            &path,
            r#"{"tenants": [{
                "key": "dawapap",
                "applicationId": "com.dawapap.app",
                "displayName": "DawaPap",
                "primaryHost": "dawapap.com",
                "secondaryHost": "www.dawapap.com"
            }]}"#,
        )
        .unwrap();

        let registry = load_registry(&path).unwrap();
        assert_eq!(registry.get("dawapap").unwrap().display_name, "DawaPap");
    }

    #[test]
    fn test_load_toml_file_with_duplicates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tenants.toml");
        let entry = r#"
            [[tenants]]
            key = "afyakit"
            application_id = "com.afyakit.app"
            display_name = "AfyaKit"
            primary_host = "afyakit.app"
            secondary_host = "www.afyakit.app"
        "#;
        std::fs::write(&path, format!("{entry}{entry}")).unwrap();

        let err = load_registry(&path).unwrap_err();
        assert_eq!(err.code, ErrorCode::DuplicateTenantKey);
        assert!(err.context.unwrap().contains("tenants.toml"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_file(&dir.path().join("missing.toml")).unwrap_err();
        assert_eq!(err.code, ErrorCode::FileNotFound);
    }

    #[test]
    fn test_missing_field_is_parse_error() {
        let err = from_toml_str("[[tenants]]\nkey = \"afyakit\"\n").unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigParseError);
    }

    #[test]
    fn test_empty_catalog() {
        assert!(from_toml_str("").unwrap().is_empty());
        assert!(from_json_str("{}").unwrap().is_empty());
    }
}
