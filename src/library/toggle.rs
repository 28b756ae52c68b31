//! Applying enabled-state changes to mod folders on disk

use crate::marker::{is_disabled_name, strip_disabled_prefix, DISABLED_PREFIX};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from applying a state change to a folder on disk
#[derive(Debug, Error)]
pub enum ToggleError {
    #[error("Folder not found: {0}")]
    NotFound(PathBuf),

    #[error("Cannot rename '{from}': target '{to}' already exists")]
    TargetExists { from: PathBuf, to: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// What applying a state change did, or would do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The folder already has the requested state; nothing to rename.
    Unchanged { path: PathBuf },
    /// The folder was (or would be) renamed.
    Renamed { from: PathBuf, to: PathBuf },
}

/// Compute the rename a state change needs, without touching the disk.
///
/// Disabling an already-disabled folder (any marker spelling) and enabling an
/// already-enabled one are no-ops. A folder whose whole name is a marker
/// ("dis", "DISABLED ") would strip to nothing; that is reported as unchanged
/// rather than producing an empty rename target.
pub fn plan_folder_state(path: &Path, enable: bool) -> ToggleOutcome {
    let basename = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let new_name = if enable {
        if !is_disabled_name(&basename) {
            return ToggleOutcome::Unchanged {
                path: path.to_path_buf(),
            };
        }
        strip_disabled_prefix(&basename)
    } else {
        if is_disabled_name(&basename) {
            return ToggleOutcome::Unchanged {
                path: path.to_path_buf(),
            };
        }
        format!("{}{}", DISABLED_PREFIX, basename)
    };

    if new_name.is_empty() || new_name == basename {
        tracing::warn!(
            "'{}' has no usable name without its marker, leaving it alone",
            path.display()
        );
        return ToggleOutcome::Unchanged {
            path: path.to_path_buf(),
        };
    }

    let to = match path.parent() {
        Some(parent) => parent.join(&new_name),
        None => PathBuf::from(&new_name),
    };

    ToggleOutcome::Renamed {
        from: path.to_path_buf(),
        to,
    }
}

/// Apply a state change by renaming the folder on disk.
///
/// The rename refuses to clobber an existing target, which otherwise happens
/// when an enabled and a disabled copy of the same mod sit side by side.
pub async fn set_folder_enabled(path: &Path, enable: bool) -> Result<ToggleOutcome, ToggleError> {
    if !path.is_dir() {
        return Err(ToggleError::NotFound(path.to_path_buf()));
    }

    match plan_folder_state(path, enable) {
        ToggleOutcome::Unchanged { path } => {
            tracing::debug!("'{}' already in requested state", path.display());
            Ok(ToggleOutcome::Unchanged { path })
        }
        ToggleOutcome::Renamed { from, to } => {
            if to.exists() {
                return Err(ToggleError::TargetExists { from, to });
            }

            tokio::fs::rename(&from, &to).await?;
            tracing::info!("Renamed '{}' -> '{}'", from.display(), to.display());
            Ok(ToggleOutcome::Renamed { from, to })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn mkdir(root: &TempDir, name: &str) -> PathBuf {
        let path = root.path().join(name);
        std::fs::create_dir(&path).unwrap();
        path
    }

    #[tokio::test]
    async fn test_disable_renames_with_canonical_prefix() {
        let tmp = TempDir::new().unwrap();
        let path = mkdir(&tmp, "MyMod");

        let outcome = set_folder_enabled(&path, false).await.unwrap();
        let expected = tmp.path().join("DISABLED MyMod");
        assert_eq!(
            outcome,
            ToggleOutcome::Renamed {
                from: path.clone(),
                to: expected.clone()
            }
        );
        assert!(!path.exists());
        assert!(expected.is_dir());
    }

    #[tokio::test]
    async fn test_enable_strips_any_marker_spelling() {
        let tmp = TempDir::new().unwrap();
        let path = mkdir(&tmp, "disabled_MyMod");

        let outcome = set_folder_enabled(&path, true).await.unwrap();
        let expected = tmp.path().join("MyMod");
        assert_eq!(
            outcome,
            ToggleOutcome::Renamed {
                from: path,
                to: expected.clone()
            }
        );
        assert!(expected.is_dir());
    }

    #[tokio::test]
    async fn test_already_in_state_is_a_noop() {
        let tmp = TempDir::new().unwrap();
        let enabled = mkdir(&tmp, "MyMod");
        let disabled = mkdir(&tmp, "DISABLED Other");

        let outcome = set_folder_enabled(&enabled, true).await.unwrap();
        assert_eq!(
            outcome,
            ToggleOutcome::Unchanged {
                path: enabled.clone()
            }
        );
        assert!(enabled.is_dir());

        let outcome = set_folder_enabled(&disabled, false).await.unwrap();
        assert_eq!(
            outcome,
            ToggleOutcome::Unchanged {
                path: disabled.clone()
            }
        );
        assert!(disabled.is_dir());
    }

    #[tokio::test]
    async fn test_missing_folder_is_reported() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("Nope");

        let err = set_folder_enabled(&path, false).await.unwrap_err();
        assert!(matches!(err, ToggleError::NotFound(p) if p == path));
    }

    #[tokio::test]
    async fn test_rename_refuses_to_clobber_existing_target() {
        let tmp = TempDir::new().unwrap();
        let enabled = mkdir(&tmp, "MyMod");
        let disabled = mkdir(&tmp, "DISABLED MyMod");

        let err = set_folder_enabled(&enabled, false).await.unwrap_err();
        assert!(matches!(err, ToggleError::TargetExists { .. }));
        // Both folders untouched after the refused rename.
        assert!(enabled.is_dir());
        assert!(disabled.is_dir());
    }

    #[test]
    fn test_plan_does_not_touch_the_disk() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("MyMod");

        let outcome = plan_folder_state(&path, false);
        assert_eq!(
            outcome,
            ToggleOutcome::Renamed {
                from: path.clone(),
                to: tmp.path().join("DISABLED MyMod")
            }
        );
        assert!(!path.exists());
        assert!(!tmp.path().join("DISABLED MyMod").exists());
    }

    #[test]
    fn test_plan_keeps_marker_only_names_alone() {
        let outcome = plan_folder_state(Path::new("/mods/dis"), true);
        assert_eq!(
            outcome,
            ToggleOutcome::Unchanged {
                path: PathBuf::from("/mods/dis")
            }
        );
    }
}
