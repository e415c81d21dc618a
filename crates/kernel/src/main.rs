//! Atrium CLI
//!
//! Inspect the composed module set and scaffold new modules.

use std::path::PathBuf;

use anyhow::{Context, Result};
use atrium_kernel::module::cli::{self, RouteScope};
use atrium_kernel::{AppState, Config};
use atrium_sdk::{NavLocation, RoleType};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Module composition tooling.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Modules directory (overrides MODULES_DIR).
    #[arg(long, global = true)]
    modules_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List loaded modules.
    Modules,

    /// Print the composed route table.
    Routes {
        #[arg(long, value_enum, default_value_t = RouteScope::All)]
        scope: RouteScope,

        /// Emit JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Print composed navigation.
    Nav {
        /// Only top-level items at this location (dashboard, public, admin).
        #[arg(long)]
        location: Option<NavLocation>,

        /// Filter as a viewer holding these roles (repeatable).
        #[arg(long = "role")]
        roles: Vec<RoleType>,

        /// Emit JSON instead of a tree.
        #[arg(long)]
        json: bool,
    },

    /// Validate the module set; exits non-zero on duplicates.
    Check,

    /// Create a new module skeleton.
    Scaffold {
        /// Module name; the directory and base path use its kebab-case form.
        name: String,
    },
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    let args = Args::parse();

    let mut config = Config::from_env().context("failed to load configuration")?;
    if let Some(dir) = args.modules_dir {
        config.modules_dir = dir;
    }
    debug!(modules_dir = %config.modules_dir.display(), "configuration loaded");

    let state = AppState::new(&config);

    match args.command {
        Command::Modules => cli::cmd_module_list(state.registry()),
        Command::Routes { scope, json } => cli::cmd_routes(state.registry(), scope, json),
        Command::Nav {
            location,
            roles,
            json,
        } => cli::cmd_nav(state.registry(), location, &roles, json),
        Command::Check => cli::cmd_check(state.registry()),
        Command::Scaffold { name } => cli::cmd_scaffold(&config.modules_dir, &name),
    }
}

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "info";

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
