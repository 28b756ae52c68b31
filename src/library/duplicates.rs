//! Duplicate detection and resolution
//!
//! Two sibling folders are duplicates when their names fold to the same key
//! after marker stripping. The usual cause is a reinstalled mod left next to
//! its old disabled copy, and the usual fix is keeping one enabled copy and
//! disabling the rest.

use super::toggle::{plan_folder_state, ToggleError, ToggleOutcome};
use super::ModFolder;
use crate::marker::strip_disabled_prefix;
use anyhow::{bail, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;

/// Fold a folder name down to its duplicate-matching key.
///
/// The marker is stripped first so enabled and disabled copies of the same
/// mod land in one group; case is lowered and whitespace runs collapse to a
/// single space.
pub fn duplicate_key(name: &str) -> String {
    strip_disabled_prefix(name)
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Sibling folders sharing one duplicate key
#[derive(Debug, Clone, Serialize)]
pub struct DuplicateGroup {
    pub key: String,
    pub folders: Vec<ModFolder>,
}

/// One rename a resolution plan wants to perform
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedRename {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// Renames that leave a duplicate group with at most one enabled copy
#[derive(Debug, Clone, Serialize)]
pub struct ResolutionPlan {
    pub key: String,
    pub keeper: ModFolder,
    pub renames: Vec<PlannedRename>,
}

/// Group a directory listing into duplicate groups.
///
/// Pure over the listing; nothing is read from disk. Groups come back
/// biggest pile first, ties ordered by key, and members keep their listing
/// order.
pub fn find_duplicates(folders: &[ModFolder]) -> Vec<DuplicateGroup> {
    let mut by_key: HashMap<String, Vec<ModFolder>> = HashMap::new();
    for folder in folders {
        let key = duplicate_key(&folder.name);
        if key.is_empty() {
            continue;
        }
        by_key.entry(key).or_default().push(folder.clone());
    }

    let mut groups: Vec<DuplicateGroup> = by_key
        .into_iter()
        .filter(|(_, members)| members.len() > 1)
        .map(|(key, folders)| DuplicateGroup { key, folders })
        .collect();

    groups.sort_by(|a, b| {
        b.folders
            .len()
            .cmp(&a.folders.len())
            .then_with(|| a.key.cmp(&b.key))
    });

    groups
}

/// Plan the renames that resolve one duplicate group.
///
/// The keeper is the named folder when `keep` is given (an exact on-disk
/// name wins before display names are tried, as in `Library::resolve`),
/// otherwise the first enabled member, otherwise the first member. Every
/// other enabled member gets a disabling rename; already-disabled
/// non-keepers are left exactly as they are. An explicitly named disabled
/// keeper gets an enabling rename, planned after the disabling ones so it
/// can take a name they free; a group with nothing enabled plans no renames
/// unless `keep` asks for one.
pub fn plan_resolution(group: &DuplicateGroup, keep: Option<&str>) -> Result<ResolutionPlan> {
    if group.folders.is_empty() {
        bail!("Duplicate group '{}' has no members", group.key);
    }

    let keeper = match keep {
        Some(wanted) => {
            let lowered = wanted.to_lowercase();
            let found = group.folders.iter().find(|f| f.name == wanted).or_else(|| {
                group
                    .folders
                    .iter()
                    .find(|f| f.display_name.to_lowercase() == lowered)
            });
            match found {
                Some(f) => f,
                None => bail!(
                    "'{}' is not part of the '{}' duplicate group",
                    wanted,
                    group.key
                ),
            }
        }
        None => group
            .folders
            .iter()
            .find(|f| f.enabled)
            .unwrap_or(&group.folders[0]),
    };

    let mut renames = Vec::new();

    for folder in &group.folders {
        if folder.path == keeper.path || !folder.enabled {
            continue;
        }
        if let ToggleOutcome::Renamed { from, to } = plan_folder_state(&folder.path, false) {
            renames.push(PlannedRename { from, to });
        }
    }

    // The keeper's enabling rename goes last so the name it wants is freed
    // by the disabling renames before it. Only an explicitly named keeper
    // is enabled; a group that is disabled wholesale stays disabled.
    if keep.is_some() && !keeper.enabled {
        if let ToggleOutcome::Renamed { from, to } = plan_folder_state(&keeper.path, true) {
            renames.push(PlannedRename { from, to });
        }
    }

    Ok(ResolutionPlan {
        key: group.key.clone(),
        keeper: keeper.clone(),
        renames,
    })
}

/// Apply a resolution plan's renames, continuing past per-folder failures.
pub async fn apply_resolution(
    plan: &ResolutionPlan,
) -> Vec<(PlannedRename, Result<(), ToggleError>)> {
    let mut results = Vec::new();
    for rename in &plan.renames {
        let result = apply_rename(rename).await;
        if let Err(e) = &result {
            tracing::warn!("Skipping '{}': {}", rename.from.display(), e);
        }
        results.push((rename.clone(), result));
    }
    results
}

async fn apply_rename(rename: &PlannedRename) -> Result<(), ToggleError> {
    if !rename.from.is_dir() {
        return Err(ToggleError::NotFound(rename.from.clone()));
    }
    if rename.to.exists() {
        return Err(ToggleError::TargetExists {
            from: rename.from.clone(),
            to: rename.to.clone(),
        });
    }

    tokio::fs::rename(&rename.from, &rename.to).await?;
    tracing::info!(
        "Renamed '{}' -> '{}'",
        rename.from.display(),
        rename.to.display()
    );
    Ok(())
}
