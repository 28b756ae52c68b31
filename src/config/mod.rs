//! Configuration management for modtoggle
//!
//! Uses XDG-compliant paths:
//! - Config: ~/.config/modtoggle/config.toml
//! - Data: ~/.local/share/modtoggle/

mod paths;

pub use paths::Paths;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::fs;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root directory containing the mod folders (e.g. a 3DMigoto Mods dir)
    pub mods_dir: Option<String>,

    /// Directory listing settings
    pub scan: ScanConfig,

    /// Whether guided initialization has completed at least once.
    pub first_run_completed: bool,

    /// RFC3339 timestamp for last successful init completion.
    pub first_run_completed_at: Option<String>,

    /// Paths configuration
    #[serde(skip)]
    pub paths: Paths,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mods_dir: None,
            scan: ScanConfig::default(),
            first_run_completed: false,
            first_run_completed_at: None,
            paths: Paths::new(),
        }
    }
}

/// Directory listing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Include dot-folders when listing mod directories
    pub include_hidden: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            include_hidden: false,
        }
    }
}

impl Config {
    /// Resolve the mods root directory.
    ///
    /// A CLI override wins over the configured value; neither being set is
    /// an error that points the user at `init`.
    pub fn mods_root(&self, cli_override: Option<&str>) -> Result<PathBuf> {
        if let Some(dir) = cli_override {
            let dir = dir.trim();
            if dir.is_empty() {
                bail!("--mods-dir cannot be empty");
            }
            return Ok(PathBuf::from(dir));
        }

        match self.mods_dir.as_deref().map(str::trim) {
            Some(dir) if !dir.is_empty() => Ok(PathBuf::from(dir)),
            _ => bail!(
                "No mods directory configured. Run 'modtoggle init --mods-dir <DIR>' or pass --mods-dir"
            ),
        }
    }

    /// Load configuration from disk or create default
    pub async fn load() -> Result<Self> {
        let paths = Paths::new();
        let config_path = paths.config_file();

        let mut config = if config_path.exists() {
            let content = fs::read_to_string(&config_path)
                .await
                .context("Failed to read config file")?;
            toml::from_str(&content).context("Failed to parse config file")?
        } else {
            // Create default config
            let config = Config::default();
            config.save().await?;
            config
        };

        config.paths = paths;
        Ok(config)
    }

    /// Save configuration to disk
    pub async fn save(&self) -> Result<()> {
        let config_path = self.paths.config_file();

        // Ensure config directory exists
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .await
                .context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&config_path, content)
            .await
            .context("Failed to write config file")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mods_root_prefers_cli_override() {
        let config = Config {
            mods_dir: Some("/configured/mods".to_string()),
            ..Config::default()
        };
        let root = config.mods_root(Some("/override/mods")).unwrap();
        assert_eq!(root, PathBuf::from("/override/mods"));
    }

    #[test]
    fn test_mods_root_falls_back_to_config() {
        let config = Config {
            mods_dir: Some("  /configured/mods  ".to_string()),
            ..Config::default()
        };
        let root = config.mods_root(None).unwrap();
        assert_eq!(root, PathBuf::from("/configured/mods"));
    }

    #[test]
    fn test_mods_root_rejects_empty_values() {
        let config = Config::default();
        assert!(config.mods_root(Some("   ")).is_err());
        assert!(config.mods_root(None).is_err());

        let blank = Config {
            mods_dir: Some("   ".to_string()),
            ..Config::default()
        };
        assert!(blank.mods_root(None).is_err());
    }
}
