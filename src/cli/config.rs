//! Operator configuration file handling
//!
//! Provides default configuration generation and loading for the `trustdao`
//! CLI. Configuration files are TOML and the state file sits next to them
//! unless configured otherwise.
//!
//! ## Operator vs DAO settings
//!
//! This file contains OPERATOR configuration only: where state is kept and
//! how the CLI logs. Governance parameters (quorum, rplbond, ...) live in the
//! DAO's settings store and only change through bootstrap or passed
//! proposals; they cannot be set here.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default log level
const DEFAULT_LOG_LEVEL: &str = "info";

/// State file name used when none is configured
const DEFAULT_STATE_FILE: &str = "state.cbor";

/// CLI configuration (operator settings only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaoConfig {
    /// DAO state file configuration
    pub state: StateConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// State file configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateConfig {
    /// Path to the CBOR state file
    pub path: PathBuf,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path (optional, logs to stderr if not specified)
    pub file: Option<PathBuf>,
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            file: None,
        }
    }
}

impl DaoConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;

        let config: DaoConfig = toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config file '{}': {}", path.display(), e))?;

        Ok(config)
    }

    /// Load the config at `path`, writing a default one first if missing
    pub fn load_or_create(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        if !path.exists() {
            Self::create_default(path)?;
        }
        Self::load(path)
    }

    /// Generate default configuration content as a string with comments
    pub fn generate_default_toml(state_path: &Path) -> String {
        format!(
            r#"# Trusted Node DAO CLI Configuration (Operator Settings)
#
# DAO PARAMETERS (quorum, rplbond, proposal windows, ...) are NOT set here.
# They live in the DAO state and change only through bootstrap (owner, before
# the minimum member count is reached) or through passed proposals.

[state]
# Path to the CBOR-encoded DAO state file
path = "{state_path}"

[logging]
# Log level: trace, debug, info, warn, error (RUST_LOG overrides)
level = "info"

# Log file path (optional, logs to stderr if not specified)
# file = "/var/log/trustdao/trustdao.log"
"#,
            state_path = state_path.display()
        )
    }

    /// Create and save a default configuration file
    pub fn create_default(config_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        let contents = Self::generate_default_toml(&default_state_path(config_path));

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        fs::write(config_path, contents).map_err(|e| {
            format!(
                "Failed to write config file '{}': {}",
                config_path.display(),
                e
            )
        })?;

        Ok(())
    }
}

/// Default data directory: ~/.local/share/trustdao
pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("trustdao")
}

/// Default config file path: ~/.local/share/trustdao/config.toml
pub fn default_config_path() -> PathBuf {
    default_data_dir().join("config.toml")
}

/// State file adjacent to the config file
pub fn default_state_path(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(DEFAULT_STATE_FILE)
}
