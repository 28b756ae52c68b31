//! Mod library - listing, lookup, and enabled-state handling for mod folders
//!
//! The library is a directory tree where each direct child folder is one mod.
//! A mod's enabled state lives entirely in its folder name (see [`crate::marker`]);
//! nothing here ever looks inside a mod folder except to spot its ini file.

mod duplicates;
mod toggle;

pub use duplicates::*;
pub use toggle::*;

use crate::config::Config;
use crate::marker::{is_disabled_name, strip_disabled_prefix};
use anyhow::{bail, Context, Result};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use walkdir::WalkDir;

/// Helper inis that ship alongside skin mods (shader fixes and the like).
/// Their presence says nothing about the folder being a real mod.
static EXCLUDED_INI_FILENAMES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "orfix.ini",
        "region.ini",
        "offset.ini",
        "water.ini",
        "fixdash.ini",
        "deltatime.ini",
        "object.ini",
        "timer.ini",
    ])
});

/// A single mod folder inside the library
#[derive(Debug, Clone, Serialize)]
pub struct ModFolder {
    /// Folder name as it is on disk, marker included when disabled
    pub name: String,

    /// Name with any disabled marker stripped
    pub display_name: String,

    /// Whether the folder is currently enabled
    pub enabled: bool,

    /// Whether the folder carries an active mod ini of its own
    pub has_ini: bool,

    /// Absolute path on disk
    pub path: PathBuf,

    /// Path relative to the mods root, forward-slash separated
    pub relative_path: String,
}

/// Enabled/disabled summary for one directory of the library
#[derive(Debug, Clone, Serialize)]
pub struct LibraryStatus {
    pub root: String,
    pub subdir: Option<String>,
    pub total: usize,
    pub enabled: usize,
    pub disabled: usize,
    pub with_ini: usize,
    pub duplicate_groups: usize,
}

/// Library manager handles listing and resolving mod folders under a root
pub struct Library {
    config: Arc<RwLock<Config>>,
    root: PathBuf,
}

impl Library {
    /// Create a new Library over a mods root directory
    pub fn new(config: Arc<RwLock<Config>>, root: PathBuf) -> Self {
        Self { config, root }
    }

    /// The mods root this library reads from
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn scan_dir(&self, subdir: Option<&str>) -> PathBuf {
        match subdir {
            Some(sub) => self.root.join(sub),
            None => self.root.clone(),
        }
    }

    /// List the mod folders directly under the root, or a subdirectory of it.
    ///
    /// One level only; the contents of each mod folder are its own business.
    /// Unreadable entries are skipped with a warning so one bad folder does
    /// not hide the rest of the listing.
    pub async fn list(&self, subdir: Option<&str>) -> Result<Vec<ModFolder>> {
        let include_hidden = self.config.read().await.scan.include_hidden;
        let dir = self.scan_dir(subdir);

        if !dir.is_dir() {
            bail!("Mods directory not found: {}", dir.display());
        }

        tracing::debug!("Listing mod folders in {}", dir.display());

        let mut folders = Vec::new();
        for entry in std::fs::read_dir(&dir)
            .with_context(|| format!("Failed to read directory {}", dir.display()))?
        {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    tracing::warn!("Failed to read directory entry: {}", e);
                    continue;
                }
            };

            let is_dir = match entry.file_type() {
                Ok(ft) => ft.is_dir(),
                Err(e) => {
                    tracing::warn!("Failed to get file type for {:?}: {}", entry.path(), e);
                    continue;
                }
            };
            if !is_dir {
                continue;
            }

            let name = match entry.file_name().to_str() {
                Some(n) => n.to_string(),
                None => {
                    tracing::warn!("Skipping folder with non-UTF-8 name: {:?}", entry.path());
                    continue;
                }
            };

            if !include_hidden && name.starts_with('.') {
                continue;
            }

            let path = entry.path();
            let relative_path = match subdir {
                Some(sub) => format!("{}/{}", sub.replace('\\', "/"), name),
                None => name.clone(),
            };

            folders.push(ModFolder {
                display_name: strip_disabled_prefix(&name),
                enabled: !is_disabled_name(&name),
                has_ini: folder_has_mod_ini(&path),
                relative_path,
                name,
                path,
            });
        }

        folders.sort_by(|a, b| {
            (a.display_name.to_lowercase(), a.name.to_lowercase())
                .cmp(&(b.display_name.to_lowercase(), b.name.to_lowercase()))
        });

        Ok(folders)
    }

    /// Find a single mod folder by name.
    ///
    /// An exact on-disk name wins; otherwise the display name is matched
    /// case-insensitively. More than one candidate is an error listing the
    /// on-disk names so the user can retry with one of them.
    pub async fn resolve(&self, name: &str, subdir: Option<&str>) -> Result<ModFolder> {
        let folders = self.list(subdir).await?;

        if let Some(found) = folders.iter().find(|f| f.name == name) {
            return Ok(found.clone());
        }

        let wanted = name.to_lowercase();
        let matches: Vec<&ModFolder> = folders
            .iter()
            .filter(|f| f.display_name.to_lowercase() == wanted)
            .collect();

        match matches.len() {
            0 => Err(anyhow::anyhow!("Mod '{}' not found", name)),
            1 => Ok(matches[0].clone()),
            _ => {
                let names: Vec<&str> = matches.iter().map(|f| f.name.as_str()).collect();
                bail!(
                    "Mod name '{}' is ambiguous, matches: {}. Retry with an on-disk name, or run 'modtoggle duplicates'",
                    name,
                    names.join(", ")
                )
            }
        }
    }

    /// Resolve a mod by name and put it into the requested state
    pub async fn set_enabled(
        &self,
        name: &str,
        subdir: Option<&str>,
        enable: bool,
    ) -> Result<(ModFolder, ToggleOutcome)> {
        let folder = self.resolve(name, subdir).await?;
        let outcome = apply_state(&folder, enable).await?;
        Ok((folder, outcome))
    }

    /// Enable a mod folder by name
    pub async fn enable(
        &self,
        name: &str,
        subdir: Option<&str>,
    ) -> Result<(ModFolder, ToggleOutcome)> {
        self.set_enabled(name, subdir, true).await
    }

    /// Disable a mod folder by name
    pub async fn disable(
        &self,
        name: &str,
        subdir: Option<&str>,
    ) -> Result<(ModFolder, ToggleOutcome)> {
        self.set_enabled(name, subdir, false).await
    }

    /// Flip a mod folder's state by name
    pub async fn toggle(
        &self,
        name: &str,
        subdir: Option<&str>,
    ) -> Result<(ModFolder, ToggleOutcome)> {
        let folder = self.resolve(name, subdir).await?;
        let outcome = apply_state(&folder, !folder.enabled).await?;
        Ok((folder, outcome))
    }

    /// Summarize enabled/disabled counts for one directory
    pub async fn status(&self, subdir: Option<&str>) -> Result<LibraryStatus> {
        let folders = self.list(subdir).await?;
        let enabled = folders.iter().filter(|f| f.enabled).count();
        let with_ini = folders.iter().filter(|f| f.has_ini).count();
        let duplicate_groups = find_duplicates(&folders).len();

        Ok(LibraryStatus {
            root: self.root.display().to_string(),
            subdir: subdir.map(str::to_string),
            total: folders.len(),
            enabled,
            disabled: folders.len() - enabled,
            with_ini,
            duplicate_groups,
        })
    }
}

/// Rename wrapper for the by-name commands. A rename refused because the
/// target name is occupied is the enabled/disabled twin situation, so that
/// error gains a pointer at the duplicates workflow.
async fn apply_state(folder: &ModFolder, enable: bool) -> Result<ToggleOutcome> {
    match set_folder_enabled(&folder.path, enable).await {
        Ok(outcome) => Ok(outcome),
        Err(e @ ToggleError::TargetExists { .. }) => {
            bail!("{}. Run 'modtoggle duplicates' to resolve the pair", e)
        }
        Err(e) => Err(e.into()),
    }
}

/// Check whether a folder has an active ini of its own at its top level.
///
/// Disabled inis (marker-prefixed) and the well-known helper inis do not
/// count. Only the first level is checked; nested inis belong to sub-mods.
fn folder_has_mod_ini(path: &Path) -> bool {
    for entry in WalkDir::new(path)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }

        let name = match entry.file_name().to_str() {
            Some(n) => n,
            None => continue,
        };

        let lower = name.to_lowercase();
        if !lower.ends_with(".ini") || is_disabled_name(name) {
            continue;
        }
        if EXCLUDED_INI_FILENAMES.contains(lower.as_str()) {
            continue;
        }

        return true;
    }

    false
}
