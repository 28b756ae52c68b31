use anyhow::Result;
use clap::{Parser, Subcommand};
use modtoggle::{App, Config, APP_VERSION};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "modtoggle")]
#[command(
    author,
    version = APP_VERSION,
    about = "Enable, disable and tidy DISABLED-prefix mod folders"
)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Mods root directory override for this invocation
    #[arg(long)]
    mods_dir: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List mod folders
    List {
        /// Subdirectory of the mods root to list (e.g. a character folder)
        subdir: Option<String>,

        /// Only show disabled mods
        #[arg(long)]
        disabled: bool,

        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Enable a mod folder (strip its disabled marker)
    Enable {
        /// Mod name, on-disk or display form
        name: String,

        /// Subdirectory of the mods root holding the mod
        #[arg(long = "in")]
        subdir: Option<String>,

        /// Show the rename without performing it
        #[arg(long)]
        preview: bool,
    },

    /// Disable a mod folder (prepend the DISABLED marker)
    Disable {
        /// Mod name, on-disk or display form
        name: String,

        /// Subdirectory of the mods root holding the mod
        #[arg(long = "in")]
        subdir: Option<String>,

        /// Show the rename without performing it
        #[arg(long)]
        preview: bool,
    },

    /// Flip a mod folder's enabled state
    Toggle {
        /// Mod name, on-disk or display form
        name: String,

        /// Subdirectory of the mods root holding the mod
        #[arg(long = "in")]
        subdir: Option<String>,

        /// Show the rename without performing it
        #[arg(long)]
        preview: bool,
    },

    /// Print the path a state change would produce, without touching disk
    Target {
        /// Path whose final segment to rewrite (both / and \ accepted)
        path: String,

        /// Desired state: enabled, disabled
        #[arg(long)]
        state: String,
    },

    /// Find duplicate mod folders (enabled and disabled copies of one name)
    Duplicates {
        /// Subdirectory of the mods root to inspect
        subdir: Option<String>,

        /// Apply renames keeping one enabled copy per group
        #[arg(long)]
        resolve: bool,

        /// With --resolve: name of the copy to keep
        #[arg(long)]
        keep: Option<String>,

        /// Show planned renames without performing them
        #[arg(long)]
        preview: bool,

        /// Print machine-readable JSON (listing and preview)
        #[arg(long)]
        json: bool,
    },

    /// Show enabled/disabled counts for the mods root
    Status {
        /// Subdirectory of the mods root to summarize
        subdir: Option<String>,

        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// First-run initialization
    Init {
        /// Mods root directory to configure
        #[arg(long)]
        mods_dir: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Run diagnostics on the configured library
    Doctor,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set the mods root directory
    SetModsDir { path: String },
    /// Clear the mods root directory
    ClearModsDir,
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "modtoggle=info",
        1 => "modtoggle=debug",
        2 => "modtoggle=trace",
        _ => "trace",
    };

    // Logs go to a file; stderr echoes them only when -v is raised so
    // stdout stays clean for command output.
    let paths = modtoggle::config::Paths::new();
    std::fs::create_dir_all(paths.data_dir()).ok();

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(paths.log_file())
        .expect("Failed to open log file");

    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into());
    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::sync::Arc::new(file));

    if verbosity > 0 {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(file_layer)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(file_layer)
            .init();
    }
}

fn parse_state(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "enabled" | "enable" | "on" => Ok(true),
        "disabled" | "disable" | "off" => Ok(false),
        other => anyhow::bail!("Invalid state '{}'. Valid values: enabled, disabled", other),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    // Load configuration
    let config = Config::load().await?;

    let mods_dir_override = match cli.mods_dir.as_deref().map(str::trim) {
        Some("") => anyhow::bail!("--mods-dir cannot be empty"),
        Some(dir) => Some(dir.to_string()),
        None => None,
    };

    let app = App::new(config, mods_dir_override).await?;

    match cli.command {
        Commands::List {
            subdir,
            disabled,
            json,
        } => app.cmd_list(subdir.as_deref(), disabled, json).await?,
        Commands::Enable {
            name,
            subdir,
            preview,
        } => app.cmd_enable(&name, subdir.as_deref(), preview).await?,
        Commands::Disable {
            name,
            subdir,
            preview,
        } => app.cmd_disable(&name, subdir.as_deref(), preview).await?,
        Commands::Toggle {
            name,
            subdir,
            preview,
        } => app.cmd_toggle(&name, subdir.as_deref(), preview).await?,
        Commands::Target { path, state } => {
            let enable = parse_state(&state)?;
            app.cmd_target(&path, enable)?
        }
        Commands::Duplicates {
            subdir,
            resolve,
            keep,
            preview,
            json,
        } => {
            app.cmd_duplicates(subdir.as_deref(), resolve, keep.as_deref(), preview, json)
                .await?
        }
        Commands::Status { subdir, json } => app.cmd_status(subdir.as_deref(), json).await?,
        Commands::Init { mods_dir } => app.cmd_init(mods_dir.as_deref()).await?,
        Commands::Config { action } => match action {
            ConfigCommands::Show => app.cmd_config_show().await?,
            ConfigCommands::SetModsDir { path } => app.cmd_config_set_mods_dir(&path).await?,
            ConfigCommands::ClearModsDir => app.cmd_config_clear_mods_dir().await?,
        },
        Commands::Doctor => app.cmd_doctor().await?,
    }

    Ok(())
}
