//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, ErrorCode, Result, ResultExt};
use crate::validation::ValidationError;
use std::path::{Path, PathBuf};

/// Locations searched, in order, when no explicit path is given
pub const CONFIG_CANDIDATES: &[&str] = &[
    ".flavorkit.toml",
    "flavorkit.toml",
    ".config/flavorkit.toml",
];

/// Configuration wrapper
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parsed settings, defaults filled in
    pub schema: ConfigSchema,
    /// File the settings came from, `None` when running on defaults
    pub path: Option<PathBuf>,
    /// Non-blocking problems found while validating the settings
    pub warnings: Vec<ValidationError>,
}

impl Config {
    /// Load configuration from a file path or the standard locations.
    ///
    /// Falls back to defaults when no file is found. An explicit path that
    /// does not exist is an error.
    ///
    /// Nothing is logged here, since logging is usually configured from the
    /// result. Call [`Config::report`] once a subscriber is installed.
    ///
    /// # Errors
    ///
    /// Fails when the file is missing, unreadable, malformed or has invalid
    /// values.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_from(path, Path::new("."))
    }

    /// Like [`Config::load`], searching the standard locations under `root`
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`].
    pub fn load_from(path: Option<&Path>, root: &Path) -> Result<Self> {
        let config_path = match path {
            Some(p) if !p.exists() => return Err(Error::config_not_found(p)),
            Some(p) => Some(p.to_path_buf()),
            None => find_config_file(root),
        };

        let schema = match config_path {
            Some(ref p) => load_config_file(p)?,
            None => ConfigSchema::default(),
        };

        let validation = schema.validate();
        let warnings = validation.warnings().to_vec();
        validation
            .to_result()
            .with_suggestion("Fix the listed keys in the configuration file")?;

        Ok(Self {
            schema,
            path: config_path,
            warnings,
        })
    }

    /// Log where the settings came from and every validation warning
    pub fn report(&self) {
        match &self.path {
            Some(p) => tracing::debug!(path = %p.display(), "Loaded configuration"),
            None => tracing::debug!("No configuration file found, using defaults"),
        }
        for warning in &self.warnings {
            tracing::warn!(field = %warning.field, "{}", warning.message);
        }
    }

    /// Resolve the tenant catalog path relative to the configuration file
    #[must_use]
    pub fn tenants_file(&self) -> Option<PathBuf> {
        let file = self.schema.general.tenants_file.as_ref()?;
        let file = Path::new(file);
        if file.is_absolute() {
            return Some(file.to_path_buf());
        }
        let base = self
            .path
            .as_deref()
            .and_then(Path::parent)
            .unwrap_or_else(|| Path::new(""));
        Some(base.join(file))
    }
}

/// Find configuration file in standard locations
fn find_config_file(root: &Path) -> Option<PathBuf> {
    CONFIG_CANDIDATES
        .iter()
        .map(|candidate| root.join(candidate))
        .find(|candidate| candidate.exists())
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &Path) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::new(
            ErrorCode::ConfigError,
            format!("Failed to read config file {}: {e}", path.display()),
        )
        .with_source(e)
    })?;

    toml::from_str(&content)
        .map_err(Error::from)
        .context(format!("While parsing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.path.is_none());
        assert_eq!(config.schema.android.flavor_dimension, "tenant");
    }

    #[test]
    fn test_config_load_without_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(None, dir.path()).unwrap();
        assert!(config.path.is_none());
        assert_eq!(config.schema.android.build_types.len(), 2);
    }

    #[test]
    fn test_config_discovers_candidate() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join(".config")).unwrap();
        std::fs::write(
            dir.path().join(".config/flavorkit.toml"),
            "[general]\nproject_name = \"Clinics\"\n",
        )
        .unwrap();

        let config = Config::load_from(None, dir.path()).unwrap();
        assert_eq!(config.schema.general.project_name, "Clinics");
        assert!(config.path.unwrap().ends_with(".config/flavorkit.toml"));
    }

    #[test]
    fn test_config_missing_explicit_path() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigNotFound);
    }

    #[test]
    fn test_config_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("flavorkit.toml");
        std::fs::write(&path, "[android\n").unwrap();

        let err = Config::load(Some(&path)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigParseError);
    }

    #[test]
    fn test_config_rejects_invalid_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("flavorkit.toml");
        std::fs::write(&path, "[android]\nflavor_dimension = \"Tenant Brand\"\n").unwrap();

        let err = Config::load(Some(&path)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigValidationError);
        assert!(err.message.contains("android.flavor_dimension"));
    }

    #[test]
    fn test_default_config_warns_about_debug_signing() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(None, dir.path()).unwrap();

        assert_eq!(config.warnings.len(), 1);
        assert_eq!(
            config.warnings[0].field,
            "android.build_types[1].signing_config"
        );
        assert!(config.warnings[0].message.contains("debug keystore"));
    }

    #[test]
    fn test_signed_release_has_no_warnings() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("flavorkit.toml");
        std::fs::write(
            &path,
            r#"
[[android.build_types]]
name = "debug"

[[android.build_types]]
name = "release"
signing_config = "upload"
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert!(config.warnings.is_empty());
    }

    #[test]
    fn test_report_logs_warnings() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(None, dir.path()).unwrap();

        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, || config.report());

        let logs = captured.text();
        assert!(logs.contains("WARN"));
        assert!(logs.contains("release builds are signed with the debug keystore"));
        assert!(!logs.contains("No configuration file found"));
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn test_tenants_file_relative_to_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("flavorkit.toml");
        std::fs::write(&path, "[general]\ntenants_file = \"tenants.json\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.tenants_file(), Some(dir.path().join("tenants.json")));
    }
}
