//! Eden configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::autocomplete::DEFAULT_TIME_MENU_LIMIT;
use crate::error::{EdenError, EdenResult};

static DEFAULT_DATA_DIR: &str = "~/.local/share/eden";

/// Upper bound on the tag suggestion delay.
const MAX_PROMPT_DELAY: Duration = Duration::from_secs(10);

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_prompt_delay_ms() -> u64 {
    350
}

fn default_time_menu_limit() -> usize {
    DEFAULT_TIME_MENU_LIMIT
}

fn default_watch_interval_ms() -> u64 {
    500
}

/// Configuration at ~/.config/eden/config.toml, overridable with `EDEN_*`
/// environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct EdenConfig {
    /// Directory holding the schedule and shared tag blobs
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Quiet period before the tag suggestion is evaluated
    #[serde(default = "default_prompt_delay_ms")]
    pub prompt_delay_ms: u64,

    /// Maximum number of start times listed
    #[serde(default = "default_time_menu_limit")]
    pub time_menu_limit: usize,

    /// How often watchers re-read storage
    #[serde(default = "default_watch_interval_ms")]
    pub watch_interval_ms: u64,
}

impl Default for EdenConfig {
    fn default() -> Self {
        EdenConfig {
            data_dir: default_data_dir(),
            prompt_delay_ms: default_prompt_delay_ms(),
            time_menu_limit: default_time_menu_limit(),
            watch_interval_ms: default_watch_interval_ms(),
        }
    }
}

impl EdenConfig {
    pub fn config_path() -> EdenResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| EdenError::Config("Could not determine config directory".into()))?
            .join("eden");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config file, writing a commented default one first if needed.
    pub fn load() -> EdenResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> EdenResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("EDEN").try_parsing(true))
            .build()
            .map_err(|e| EdenError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| EdenError::Config(e.to_string()))
    }

    /// Data directory with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();
        PathBuf::from(full_path_str)
    }

    pub fn prompt_delay(&self) -> Duration {
        Duration::from_millis(self.prompt_delay_ms).min(MAX_PROMPT_DELAY)
    }

    pub fn watch_interval(&self) -> Duration {
        Duration::from_millis(self.watch_interval_ms.max(50))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> EdenResult<()> {
        let contents = format!(
            "\
# eden configuration

# Where the schedule and shared tags are stored:
# data_dir = \"{}\"

# Milliseconds to wait after typing before suggesting a new shared tag:
# prompt_delay_ms = {}

# Maximum number of start times offered:
# time_menu_limit = {}

# Milliseconds between storage checks in watch mode:
# watch_interval_ms = {}
",
            DEFAULT_DATA_DIR,
            default_prompt_delay_ms(),
            default_time_menu_limit(),
            default_watch_interval_ms(),
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                EdenError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| EdenError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commented_default_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("eden/config.toml");

        EdenConfig::create_default_config(&path).unwrap();
        let config = EdenConfig::load_from(&path).unwrap();

        assert_eq!(config.prompt_delay(), Duration::from_millis(350));
        assert_eq!(config.time_menu_limit, 50);
    }

    #[test]
    fn test_file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let data_dir = dir.path().join("data");
        std::fs::write(
            &path,
            format!(
                "data_dir = {:?}\nprompt_delay_ms = 10\ntime_menu_limit = 5\nwatch_interval_ms = 1000\n",
                data_dir.to_string_lossy()
            ),
        )
        .unwrap();

        let loaded = EdenConfig::load_from(&path).unwrap();
        assert_eq!(loaded.data_path(), data_dir);
        assert_eq!(loaded.prompt_delay_ms, 10);
        assert_eq!(loaded.time_menu_limit, 5);
        assert_eq!(loaded.watch_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_huge_prompt_delay_is_clamped() {
        let config = EdenConfig {
            prompt_delay_ms: u64::MAX,
            ..EdenConfig::default()
        };
        assert_eq!(config.prompt_delay(), MAX_PROMPT_DELAY);
    }

    #[test]
    fn test_tilde_is_expanded() {
        let config = EdenConfig::default();
        assert!(!config.data_path().to_string_lossy().starts_with('~'));
    }
}
