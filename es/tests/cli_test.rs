//! CLI smoke tests

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `es` isolated from the user's config and data directories
fn es(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("es").expect("binary builds");
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join("config"))
        .env("XDG_DATA_HOME", home.path().join("data"));
    cmd
}

#[test]
fn test_help_lists_commands() {
    let home = TempDir::new().unwrap();
    es(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("dashboard"))
        .stdout(predicate::str::contains("schema"));
}

#[test]
fn test_schema_prints_required_fields() {
    let home = TempDir::new().unwrap();
    es(&home)
        .arg("schema")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"steps\""))
        .stdout(predicate::str::contains("\"resources\""))
        .stdout(predicate::str::contains("2-3 keywords for what to search for"));
}

#[test]
fn test_generate_without_api_key_fails() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("edskill.yml");
    std::fs::write(&config, "llm:\n  api-key-env: EDSKILL_CLI_TEST_NO_SUCH_KEY\n").unwrap();

    es(&home)
        .env_remove("EDSKILL_CLI_TEST_NO_SUCH_KEY")
        .args(["generate", "Rust", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("EDSKILL_CLI_TEST_NO_SUCH_KEY"));
}

#[test]
fn test_generate_rejects_blank_topic() {
    let home = TempDir::new().unwrap();
    es(&home)
        .args(["generate", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Topic must not be empty"));
}

#[test]
fn test_invalid_config_is_reported() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("broken.yml");
    std::fs::write(&config, "llm: [not, a, map]\n").unwrap();

    es(&home)
        .arg("schema")
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config"));
}
