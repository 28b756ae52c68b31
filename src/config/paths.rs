//! XDG-compliant path management

use directories::ProjectDirs;
use std::path::PathBuf;

/// Manages all application paths using XDG base directory specification
#[derive(Debug, Clone)]
pub struct Paths {
    /// Base directories from XDG
    dirs: ProjectDirs,
}

impl Default for Paths {
    fn default() -> Self {
        Self::new()
    }
}

impl Paths {
    /// Create a new Paths instance
    pub fn new() -> Self {
        let dirs =
            ProjectDirs::from("", "", "modtoggle").expect("Failed to determine project directories");
        Self { dirs }
    }

    /// Config directory: ~/.config/modtoggle/
    pub fn config_dir(&self) -> PathBuf {
        self.dirs.config_dir().to_path_buf()
    }

    /// Main config file: ~/.config/modtoggle/config.toml
    pub fn config_file(&self) -> PathBuf {
        self.config_dir().join("config.toml")
    }

    /// Data directory: ~/.local/share/modtoggle/
    pub fn data_dir(&self) -> PathBuf {
        self.dirs.data_dir().to_path_buf()
    }

    /// Log file: ~/.local/share/modtoggle/modtoggle.log
    pub fn log_file(&self) -> PathBuf {
        self.data_dir().join("modtoggle.log")
    }

    /// Ensure all required directories exist
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.config_dir())?;
        std::fs::create_dir_all(self.data_dir())?;
        Ok(())
    }
}
