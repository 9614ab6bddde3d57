//! Configuration loading and root folder resolution
//!
//! Resolution priority for every setting:
//! 1. Command-line argument (highest)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing config file never terminates startup; defaults are applied with
//! a warning so a bare `hagwon-web` invocation always comes up.

use crate::Result;
use serde::Deserialize;
use std::path::PathBuf;
use tracing::warn;

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 5780;

/// Default admin credentials, overridable via ADMIN_USERNAME / ADMIN_PASSWORD
const DEFAULT_ADMIN_USERNAME: &str = "admin";
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Default admin session lifetime in minutes
const DEFAULT_SESSION_TTL_MINUTES: i64 = 60;

/// Resolved service configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP listen port
    pub port: u16,
    /// Folder holding the database and the media store
    pub root_folder: PathBuf,
    /// Base URL prepended to published media paths
    pub public_base_url: String,
    /// Admin account name checked at login
    pub admin_username: String,
    /// Admin password checked at login
    pub admin_password: String,
    /// Admin session lifetime in minutes
    pub session_ttl_minutes: i64,
}

/// Raw TOML file contents; every field optional so partial files work
#[derive(Debug, Default, Deserialize)]
pub struct TomlConfig {
    pub root_folder: Option<String>,
    pub port: Option<u16>,
    pub public_base_url: Option<String>,
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
    pub session_ttl_minutes: Option<i64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            root_folder: default_root_folder(),
            public_base_url: format!("http://127.0.0.1:{}", DEFAULT_PORT),
            admin_username: DEFAULT_ADMIN_USERNAME.to_string(),
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
            session_ttl_minutes: DEFAULT_SESSION_TTL_MINUTES,
        }
    }
}

impl Config {
    /// Load configuration with the CLI arguments layered on top
    pub fn load(cli_root_folder: Option<&str>, cli_port: Option<u16>) -> Self {
        let file = load_config_file();
        let mut config = Config::default();

        if let Some(root) = file.root_folder {
            config.root_folder = PathBuf::from(root);
        }
        if let Some(port) = file.port {
            config.port = port;
        }
        config.public_base_url = file
            .public_base_url
            .unwrap_or_else(|| format!("http://127.0.0.1:{}", config.port));
        if let Some(username) = file.admin_username {
            config.admin_username = username;
        }
        if let Some(password) = file.admin_password {
            config.admin_password = password;
        }
        if let Some(ttl) = file.session_ttl_minutes {
            config.session_ttl_minutes = ttl;
        }

        // Environment overrides
        if let Ok(root) = std::env::var("HAGWON_ROOT_FOLDER") {
            config.root_folder = PathBuf::from(root);
        }
        if let Ok(port) = std::env::var("HAGWON_PORT") {
            match port.parse() {
                Ok(port) => config.port = port,
                Err(_) => warn!("Ignoring non-numeric HAGWON_PORT: {}", port),
            }
        }
        if let Ok(url) = std::env::var("HAGWON_PUBLIC_BASE_URL") {
            config.public_base_url = url;
        }
        if let Ok(username) = std::env::var("ADMIN_USERNAME") {
            config.admin_username = username;
        }
        if let Ok(password) = std::env::var("ADMIN_PASSWORD") {
            config.admin_password = password;
        }

        // CLI arguments win over everything
        if let Some(root) = cli_root_folder {
            config.root_folder = PathBuf::from(root);
        }
        if let Some(port) = cli_port {
            config.port = port;
        }

        config
    }

    /// Path of the SQLite database under the root folder
    pub fn database_path(&self) -> PathBuf {
        self.root_folder.join("hagwon.db")
    }

    /// Directory holding published upload bytes
    pub fn media_dir(&self) -> PathBuf {
        self.root_folder.join("media")
    }

    /// Create the root and media directories if missing
    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.root_folder)?;
        std::fs::create_dir_all(self.media_dir())?;
        Ok(())
    }
}

/// Read the TOML config file if one exists
///
/// Checked in order: $HAGWON_CONFIG, then the platform config directory
/// (`~/.config/hagwon/config.toml` on Linux). A missing or unparsable file
/// degrades to defaults with a warning.
fn load_config_file() -> TomlConfig {
    let path = match std::env::var("HAGWON_CONFIG") {
        Ok(path) => Some(PathBuf::from(path)),
        Err(_) => dirs::config_dir().map(|dir| dir.join("hagwon").join("config.toml")),
    };

    let Some(path) = path else {
        return TomlConfig::default();
    };
    if !path.exists() {
        return TomlConfig::default();
    }

    match std::fs::read_to_string(&path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring unparsable config {}: {}", path.display(), e);
                TomlConfig::default()
            }
        },
        Err(e) => {
            warn!("Could not read config {}: {}", path.display(), e);
            TomlConfig::default()
        }
    }
}

/// OS-dependent compiled default root folder
fn default_root_folder() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("hagwon"))
        .unwrap_or_else(|| PathBuf::from("hagwon-data"))
}
