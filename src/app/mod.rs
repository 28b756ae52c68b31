//! Application state and orchestration

mod actions;

use crate::config::Config;
use crate::library::Library;
use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Main application struct that wires configuration to the mod library
pub struct App {
    /// Application configuration
    pub config: Arc<RwLock<Config>>,

    /// Global --mods-dir override, if any
    mods_dir_override: Option<String>,
}

impl App {
    /// Create a new App instance
    pub async fn new(config: Config, mods_dir_override: Option<String>) -> Result<Self> {
        // Ensure directories exist
        config
            .paths
            .ensure_dirs()
            .context("Failed to create directories")?;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            mods_dir_override,
        })
    }

    /// Open the mod library at the resolved mods root.
    ///
    /// Resolution happens per call so a `config set-mods-dir` in the same
    /// process is picked up immediately.
    pub async fn library(&self) -> Result<Library> {
        let root = {
            let config = self.config.read().await;
            config.mods_root(self.mods_dir_override.as_deref())?
        };
        Ok(Library::new(self.config.clone(), root))
    }

    /// Set or clear the configured mods directory.
    pub async fn set_mods_dir(&self, path: Option<&str>) -> Result<()> {
        let mut config = self.config.write().await;
        config.mods_dir = path
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(ToOwned::to_owned);
        config.save().await?;
        Ok(())
    }

    /// Mark first-run initialization as completed.
    pub async fn mark_init_completed(&self) -> Result<()> {
        let mut config = self.config.write().await;
        config.first_run_completed = true;
        config.first_run_completed_at = Some(chrono::Utc::now().to_rfc3339());
        config.save().await?;
        Ok(())
    }
}
