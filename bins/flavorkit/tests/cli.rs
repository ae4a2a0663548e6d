//! End-to-end checks of the `flavorkit` binary: exit codes and catalog selection

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn flavorkit(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("flavorkit").unwrap();
    cmd.current_dir(dir).env_remove("RUST_LOG").arg("--no-color");
    cmd
}

fn catalog_entry(key: &str, primary_host: &str) -> String {
    format!(
        r#"
[[tenants]]
key = "{key}"
application_id = "com.{key}.app"
display_name = "{key}"
primary_host = "{primary_host}"
secondary_host = "www.{key}.app"
"#
    )
}

#[test]
fn test_validate_builtin_catalog_succeeds() {
    let dir = TempDir::new().unwrap();
    flavorkit(dir.path())
        .arg("validate")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("4 tenants valid"));
}

#[test]
fn test_validate_reports_invalid_host() {
    let dir = TempDir::new().unwrap();
    let tenants = dir.path().join("tenants.toml");
    std::fs::write(&tenants, catalog_entry("acme", "Acme..com")).unwrap();

    flavorkit(dir.path())
        .arg("--tenants")
        .arg(&tenants)
        .arg("validate")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("acme.primary_host"));
}

#[test]
fn test_resolve_unknown_tenant() {
    let dir = TempDir::new().unwrap();
    flavorkit(dir.path())
        .args(["resolve", "unknown"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Unknown tenant: unknown"));
}

#[test]
fn test_resolve_properties() {
    let dir = TempDir::new().unwrap();
    flavorkit(dir.path())
        .args(["resolve", "rpmoc", "--format", "properties"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("appName=RPMO Clinic\n"))
        .stdout(predicate::str::contains(
            "manifestPlaceholders.host2=afyakit.app\n",
        ));
}

#[test]
fn test_duplicate_key_catalog_is_config_error() {
    let dir = TempDir::new().unwrap();
    let tenants = dir.path().join("tenants.toml");
    let entry = catalog_entry("acme", "acme.app");
    std::fs::write(&tenants, format!("{entry}{entry}")).unwrap();

    flavorkit(dir.path())
        .arg("--tenants")
        .arg(&tenants)
        .arg("list")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Duplicate tenant key: acme"));
}

#[test]
fn test_malformed_config_is_config_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(".flavorkit.toml"), "[android\n").unwrap();

    flavorkit(dir.path()).arg("list").assert().code(3);
}

#[test]
fn test_tenants_flag_overrides_config_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join(".flavorkit.toml"),
        "[general]\ntenants_file = \"configured.toml\"\n",
    )
    .unwrap();
    std::fs::write(
        dir.path().join("configured.toml"),
        catalog_entry("configured", "configured.app"),
    )
    .unwrap();
    let flag = dir.path().join("flag.toml");
    std::fs::write(&flag, catalog_entry("flagged", "flagged.app")).unwrap();

    flavorkit(dir.path())
        .arg("--tenants")
        .arg(&flag)
        .args(["list", "--json"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("\"flagged\""))
        .stdout(predicate::str::contains("\"configured\"").not());

    flavorkit(dir.path())
        .args(["list", "--json"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("\"configured\""))
        .stdout(predicate::str::contains("\"afyakit\"").not());
}

#[test]
fn test_embedded_catalog_without_config() {
    let dir = TempDir::new().unwrap();
    flavorkit(dir.path())
        .args(["list", "--json"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("\"afyakit\""))
        .stdout(predicate::str::contains("\"rpmoc\""));
}

#[test]
fn test_default_config_warns_about_debug_signing() {
    let dir = TempDir::new().unwrap();
    flavorkit(dir.path())
        .arg("list")
        .assert()
        .code(0)
        .stderr(predicate::str::contains("debug keystore"));
}

#[test]
fn test_render_starts_with_namespace() {
    let dir = TempDir::new().unwrap();
    flavorkit(dir.path())
        .arg("render")
        .assert()
        .code(0)
        .stdout(predicate::str::starts_with("namespace = \"com.afyakit.app\"\n\n"))
        .stdout(predicate::str::contains("create(\"dawapap\")"))
        .stdout(predicate::str::contains("buildTypes {"));
}
