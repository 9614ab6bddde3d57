//! Configuration resolution and graceful degradation tests
//!
//! Note: Uses serial_test to prevent ENV variable race conditions. Tests
//! that manipulate HAGWON_* or ADMIN_* variables are marked with #[serial]
//! so they run sequentially, not in parallel.

use hagwon_common::config::{Config, DEFAULT_PORT};
use serial_test::serial;
use std::env;
use std::path::PathBuf;

fn clear_env() {
    env::remove_var("HAGWON_ROOT_FOLDER");
    env::remove_var("HAGWON_PORT");
    env::remove_var("HAGWON_PUBLIC_BASE_URL");
    env::remove_var("HAGWON_CONFIG");
    env::remove_var("ADMIN_USERNAME");
    env::remove_var("ADMIN_PASSWORD");
}

#[test]
#[serial]
fn test_defaults_with_no_overrides() {
    clear_env();
    // Point at a config file that does not exist so a developer machine's
    // real config cannot leak into the test.
    env::set_var("HAGWON_CONFIG", "/nonexistent/hagwon-config.toml");

    let config = Config::load(None, None);

    assert_eq!(config.port, DEFAULT_PORT);
    assert!(!config.root_folder.as_os_str().is_empty());
    assert_eq!(config.admin_username, "admin");
    assert_eq!(config.admin_password, "admin123");
    assert_eq!(config.session_ttl_minutes, 60);
    assert_eq!(
        config.public_base_url,
        format!("http://127.0.0.1:{}", DEFAULT_PORT)
    );

    clear_env();
}

#[test]
#[serial]
fn test_env_overrides_apply() {
    clear_env();
    env::set_var("HAGWON_CONFIG", "/nonexistent/hagwon-config.toml");
    env::set_var("HAGWON_ROOT_FOLDER", "/tmp/hagwon-test-root");
    env::set_var("HAGWON_PORT", "6001");
    env::set_var("ADMIN_USERNAME", "director");
    env::set_var("ADMIN_PASSWORD", "s3cret");

    let config = Config::load(None, None);

    assert_eq!(config.root_folder, PathBuf::from("/tmp/hagwon-test-root"));
    assert_eq!(config.port, 6001);
    assert_eq!(config.admin_username, "director");
    assert_eq!(config.admin_password, "s3cret");

    clear_env();
}

#[test]
#[serial]
fn test_cli_arguments_win_over_env() {
    clear_env();
    env::set_var("HAGWON_CONFIG", "/nonexistent/hagwon-config.toml");
    env::set_var("HAGWON_ROOT_FOLDER", "/tmp/from-env");
    env::set_var("HAGWON_PORT", "6001");

    let config = Config::load(Some("/tmp/from-cli"), Some(6002));

    assert_eq!(config.root_folder, PathBuf::from("/tmp/from-cli"));
    assert_eq!(config.port, 6002);

    clear_env();
}

#[test]
#[serial]
fn test_toml_file_values_apply() {
    clear_env();
    let dir = tempfile::tempdir().expect("tempdir");
    let config_path = dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        r#"
root_folder = "/tmp/from-toml"
port = 6100
admin_username = "from-toml"
session_ttl_minutes = 15
"#,
    )
    .expect("write config");
    env::set_var("HAGWON_CONFIG", &config_path);

    let config = Config::load(None, None);

    assert_eq!(config.root_folder, PathBuf::from("/tmp/from-toml"));
    assert_eq!(config.port, 6100);
    assert_eq!(config.admin_username, "from-toml");
    assert_eq!(config.session_ttl_minutes, 15);
    // Derived from the configured port when the file does not set it
    assert_eq!(config.public_base_url, "http://127.0.0.1:6100");

    clear_env();
}

#[test]
#[serial]
fn test_unparsable_toml_degrades_to_defaults() {
    clear_env();
    let dir = tempfile::tempdir().expect("tempdir");
    let config_path = dir.path().join("config.toml");
    std::fs::write(&config_path, "this is { not toml").expect("write config");
    env::set_var("HAGWON_CONFIG", &config_path);

    // Must not panic or error; defaults apply
    let config = Config::load(None, None);
    assert_eq!(config.port, DEFAULT_PORT);

    clear_env();
}

#[test]
#[serial]
fn test_ensure_directories_creates_media_dir() {
    clear_env();
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path().join("site");

    let mut config = Config::default();
    config.root_folder = root.clone();
    config.ensure_directories().expect("ensure directories");

    assert!(root.is_dir());
    assert!(root.join("media").is_dir());
    assert_eq!(config.database_path(), root.join("hagwon.db"));
}
