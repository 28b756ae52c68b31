//! CLI command action handlers

use super::App;
use crate::library::{
    apply_resolution, find_duplicates, plan_folder_state, plan_resolution, Library, ModFolder,
    ToggleOutcome,
};
use crate::marker::{toggle_disabled_in_path, DISABLED_PREFIX};
use anyhow::{bail, Context, Result};
use std::path::Path;

impl App {
    // ========== Listing Commands ==========

    pub async fn cmd_list(
        &self,
        subdir: Option<&str>,
        disabled_only: bool,
        json: bool,
    ) -> Result<()> {
        let library = self.library().await?;
        let mut folders = library.list(subdir).await?;
        if disabled_only {
            folders.retain(|f| !f.enabled);
        }

        if json {
            println!("{}", serde_json::to_string_pretty(&folders)?);
            return Ok(());
        }

        if folders.is_empty() {
            let what = if disabled_only { "disabled mods" } else { "mods" };
            println!("No {} in {}.", what, describe_dir(&library, subdir));
            return Ok(());
        }

        println!("Mods in {}:", describe_dir(&library, subdir));
        println!("{:-<60}", "");
        for (i, f) in folders.iter().enumerate() {
            let status = if f.enabled { "[✓]" } else { "[ ]" };
            let ini = if f.has_ini { "" } else { "  (no ini)" };
            println!("{:>3}. {} {}{}", i + 1, status, f.display_name, ini);
            if f.name != f.display_name {
                println!("       on disk: {}", f.name);
            }
        }
        Ok(())
    }

    pub async fn cmd_status(&self, subdir: Option<&str>, json: bool) -> Result<()> {
        let library = self.library().await?;
        let status = library.status(subdir).await?;

        if json {
            println!("{}", serde_json::to_string_pretty(&status)?);
            return Ok(());
        }

        println!("Library Status");
        println!("{:-<40}", "");
        println!("Root:       {}", status.root);
        if let Some(sub) = &status.subdir {
            println!("Subdir:     {}", sub);
        }
        println!(
            "Mods:       {} total, {} enabled, {} disabled",
            status.total, status.enabled, status.disabled
        );
        println!("With ini:   {}", status.with_ini);
        println!("Duplicates: {} group(s)", status.duplicate_groups);
        Ok(())
    }

    // ========== State Commands ==========

    pub async fn cmd_enable(&self, name: &str, subdir: Option<&str>, preview: bool) -> Result<()> {
        let library = self.library().await?;
        if preview {
            return preview_state(&library, name, subdir, Some(true)).await;
        }

        let (folder, outcome) = library.enable(name, subdir).await?;
        report_outcome(&folder, true, &outcome);
        Ok(())
    }

    pub async fn cmd_disable(&self, name: &str, subdir: Option<&str>, preview: bool) -> Result<()> {
        let library = self.library().await?;
        if preview {
            return preview_state(&library, name, subdir, Some(false)).await;
        }

        let (folder, outcome) = library.disable(name, subdir).await?;
        report_outcome(&folder, false, &outcome);
        Ok(())
    }

    pub async fn cmd_toggle(&self, name: &str, subdir: Option<&str>, preview: bool) -> Result<()> {
        let library = self.library().await?;
        if preview {
            return preview_state(&library, name, subdir, None).await;
        }

        let (folder, outcome) = library.toggle(name, subdir).await?;
        report_outcome(&folder, !folder.enabled, &outcome);
        Ok(())
    }

    /// Print the path a state change would produce. Pure string work, the
    /// path does not have to exist.
    pub fn cmd_target(&self, path: &str, enable: bool) -> Result<()> {
        println!("{}", toggle_disabled_in_path(path, enable));
        Ok(())
    }

    // ========== Duplicate Commands ==========

    pub async fn cmd_duplicates(
        &self,
        subdir: Option<&str>,
        resolve: bool,
        keep: Option<&str>,
        preview: bool,
        json: bool,
    ) -> Result<()> {
        let library = self.library().await?;
        let folders = library.list(subdir).await?;
        let groups = find_duplicates(&folders);

        if groups.is_empty() {
            if json {
                println!("[]");
            } else {
                println!("No duplicates in {}.", describe_dir(&library, subdir));
            }
            return Ok(());
        }

        if !resolve {
            if json {
                println!("{}", serde_json::to_string_pretty(&groups)?);
                return Ok(());
            }

            println!("Duplicate groups in {}:", describe_dir(&library, subdir));
            println!("{:-<60}", "");
            for group in &groups {
                println!("{} ({} copies)", group.key, group.folders.len());
                for f in &group.folders {
                    let status = if f.enabled { "[✓]" } else { "[ ]" };
                    println!("    {} {}", status, f.name);
                }
            }
            println!();
            println!("Run 'modtoggle duplicates --resolve' to keep one enabled copy per group.");
            return Ok(());
        }

        if keep.is_some() && groups.len() > 1 {
            bail!(
                "--keep needs a single duplicate group, found {}. Narrow it down with a subdirectory.",
                groups.len()
            );
        }

        let mut plans = Vec::new();
        for group in &groups {
            plans.push(plan_resolution(group, keep)?);
        }

        if preview {
            if json {
                println!("{}", serde_json::to_string_pretty(&plans)?);
                return Ok(());
            }

            for plan in &plans {
                println!("{}: keep '{}'", plan.key, plan.keeper.name);
                if plan.renames.is_empty() {
                    println!("    nothing to do");
                }
                for rename in &plan.renames {
                    println!(
                        "    would rename '{}' -> '{}'",
                        rename.from.display(),
                        rename.to.display()
                    );
                }
            }
            return Ok(());
        }

        let mut renamed = 0usize;
        let mut skipped = 0usize;
        for plan in &plans {
            println!("{}: keeping '{}'", plan.key, plan.keeper.name);
            for (rename, result) in apply_resolution(plan).await {
                match result {
                    Ok(()) => {
                        renamed += 1;
                        println!(
                            "    renamed '{}' -> '{}'",
                            rename.from.display(),
                            rename.to.display()
                        );
                    }
                    Err(e) => {
                        skipped += 1;
                        println!("    SKIPPED: {}", e);
                    }
                }
            }
        }
        println!(
            "Resolved {} group(s): {} renamed, {} skipped.",
            plans.len(),
            renamed,
            skipped
        );
        Ok(())
    }

    // ========== Setup Commands ==========

    pub async fn cmd_init(&self, mods_dir: Option<&str>) -> Result<()> {
        if let Some(dir) = mods_dir {
            let trimmed = dir.trim();
            if trimmed.is_empty() {
                bail!("--mods-dir cannot be empty");
            }
            if !Path::new(trimmed).is_dir() {
                bail!("Mods directory does not exist: {}", trimmed);
            }
            self.set_mods_dir(Some(trimmed)).await?;
            println!("Mods directory set to: {}", trimmed);
        }

        let library = self
            .library()
            .await
            .context("init needs a mods directory. Pass --mods-dir <DIR>")?;
        let status = library.status(None).await?;
        self.mark_init_completed().await?;

        println!("Initialized.");
        println!("Root: {}", status.root);
        println!(
            "Found {} mod folder(s): {} enabled, {} disabled.",
            status.total, status.enabled, status.disabled
        );
        Ok(())
    }

    pub async fn cmd_config_show(&self) -> Result<()> {
        let config = self.config.read().await;

        println!("Configuration ({})", config.paths.config_file().display());
        println!("{:-<60}", "");
        match &config.mods_dir {
            Some(dir) => println!("mods_dir:        {}", dir),
            None => println!("mods_dir:        (not set)"),
        }
        println!("include_hidden:  {}", config.scan.include_hidden);
        println!(
            "first_run:       {}",
            if config.first_run_completed {
                "completed"
            } else {
                "pending"
            }
        );
        if let Some(at) = &config.first_run_completed_at {
            println!("completed_at:    {}", at);
        }
        Ok(())
    }

    pub async fn cmd_config_set_mods_dir(&self, dir: &str) -> Result<()> {
        let trimmed = dir.trim();
        if trimmed.is_empty() {
            bail!("Directory path cannot be empty");
        }
        if !Path::new(trimmed).is_dir() {
            bail!("Mods directory does not exist: {}", trimmed);
        }
        self.set_mods_dir(Some(trimmed)).await?;
        println!("Mods directory set to: {}", trimmed);
        Ok(())
    }

    pub async fn cmd_config_clear_mods_dir(&self) -> Result<()> {
        self.set_mods_dir(None).await?;
        println!("Mods directory cleared.");
        Ok(())
    }

    pub async fn cmd_doctor(&self) -> Result<()> {
        println!("modtoggle doctor");
        println!("{:-<60}", "");

        let (config_file, log_file, configured, root) = {
            let config = self.config.read().await;
            (
                config.paths.config_file(),
                config.paths.log_file(),
                config.mods_dir.clone(),
                config.mods_root(self.mods_dir_override.as_deref()),
            )
        };

        println!("Config file: {}", config_file.display());
        println!("Log file:    {}", log_file.display());

        match &configured {
            Some(dir) => println!("[✓] mods_dir configured: {}", dir),
            None => println!("[ ] mods_dir not configured"),
        }
        if let Some(dir) = &self.mods_dir_override {
            println!("[✓] --mods-dir override active: {}", dir);
        }

        let root = match root {
            Ok(r) => r,
            Err(e) => {
                println!("[✗] no usable mods root: {}", e);
                return Ok(());
            }
        };

        if !root.is_dir() {
            println!("[✗] mods root missing on disk: {}", root.display());
            return Ok(());
        }
        println!("[✓] mods root exists: {}", root.display());

        let library = Library::new(self.config.clone(), root);
        let folders = library.list(None).await?;
        println!("[✓] {} mod folder(s) listed", folders.len());

        let variant_spellings = folders
            .iter()
            .filter(|f| !f.enabled && !f.name.starts_with(DISABLED_PREFIX))
            .count();
        if variant_spellings > 0 {
            println!(
                "[!] {} disabled folder(s) use a non-canonical marker spelling",
                variant_spellings
            );
        }

        let without_ini = folders.iter().filter(|f| !f.has_ini).count();
        if without_ini > 0 {
            println!("[!] {} folder(s) without an active ini", without_ini);
        }

        let groups = find_duplicates(&folders);
        if groups.is_empty() {
            println!("[✓] no duplicate names");
        } else {
            println!(
                "[!] {} duplicate group(s), run 'modtoggle duplicates' for details",
                groups.len()
            );
        }

        Ok(())
    }
}

fn describe_dir(library: &Library, subdir: Option<&str>) -> String {
    match subdir {
        Some(sub) => format!("{}/{}", library.root().display(), sub),
        None => library.root().display().to_string(),
    }
}

/// Show the rename a state change would perform. `desired` of None flips
/// the folder's current state.
async fn preview_state(
    library: &Library,
    name: &str,
    subdir: Option<&str>,
    desired: Option<bool>,
) -> Result<()> {
    let folder = library.resolve(name, subdir).await?;
    let enable = desired.unwrap_or(!folder.enabled);
    let state = if enable { "enabled" } else { "disabled" };

    match plan_folder_state(&folder.path, enable) {
        ToggleOutcome::Unchanged { path } => {
            println!("Nothing to do: '{}' is already {}.", path.display(), state);
        }
        ToggleOutcome::Renamed { from, to } => {
            println!("Would rename '{}' -> '{}'", from.display(), to.display());
        }
    }
    Ok(())
}

fn report_outcome(folder: &ModFolder, enable: bool, outcome: &ToggleOutcome) {
    let state = if enable { "enabled" } else { "disabled" };
    match outcome {
        ToggleOutcome::Unchanged { .. } => {
            println!("'{}' is already {}.", folder.display_name, state);
        }
        ToggleOutcome::Renamed { .. } => {
            let verb = if enable { "Enabled" } else { "Disabled" };
            println!("{}: {}", verb, folder.display_name);
        }
    }
}
