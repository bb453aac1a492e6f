//! Configuration loading using Figment
//!
//! Sources are merged in precedence order (later sources override earlier ones):
//! 1. Default values
//! 2. User config file (`<config dir>/taskboard/config.toml`)
//! 3. Project config file (`./taskboard.toml`)
//! 4. Environment variables with the `TASKBOARD_` prefix
//!
//! Command line flags are applied on top by the caller.

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "TASKBOARD_";

/// Project-local config file name
pub const PROJECT_CONFIG_FILE: &str = "taskboard.toml";

/// Settings for the terminal host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding `columns.json`, `tasks.json` and the seed marker
    pub data_dir: PathBuf,
    /// Write the demonstration board on first run
    pub seed_demo_board: bool,
    /// Print JSON instead of tables
    pub json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            seed_demo_board: true,
            json: false,
        }
    }
}

/// `<data dir>/taskboard`, or `.taskboard` when the platform has none
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("taskboard"))
        .unwrap_or_else(|| PathBuf::from(".taskboard"))
}

/// `<config dir>/taskboard/config.toml`, if the platform has a config dir
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("taskboard").join("config.toml"))
}

/// Build the figment for the given config file locations
///
/// Missing files are skipped.
pub fn figment(user_file: Option<&Path>, project_file: &Path) -> Figment {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));

    if let Some(path) = user_file {
        debug!(path = %path.display(), "merging user config");
        figment = figment.merge(Toml::file(path));
    }

    debug!(path = %project_file.display(), "merging project config");
    figment
        .merge(Toml::file(project_file))
        .merge(Env::prefixed(ENV_PREFIX))
}

/// Load configuration from the standard locations
pub fn load() -> Result<Config, figment::Error> {
    let user = user_config_path();
    figment(user.as_deref(), Path::new(PROJECT_CONFIG_FILE)).extract()
}
