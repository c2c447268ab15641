//! # SmartSched — Personal Task Tracker
//!
//! Interactive console for tasks with deadlines and optional recurrence.
//!
//! Usage:
//!   smartsched                              # Use ~/.smartsched/config.toml (or defaults)
//!   smartsched --data-file ~/tasks.json     # Custom task file
//!   smartsched --config ./smartsched.toml   # Custom config file
//!   smartsched -v                           # Debug logging on stderr

mod console;

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use smartsched_core::SmartSchedConfig;
use smartsched_scheduler::{TaskManager, TaskStore};
use tracing_subscriber::EnvFilter;

use crate::console::Console;

#[derive(Parser)]
#[command(name = "smartsched", version, about = "📅 SmartSched — personal task tracker")]
struct Cli {
    /// Config file (default: ~/.smartsched/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Task file, overrides `data_file` from the config
    #[arg(long)]
    data_file: Option<String>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn expand_path(p: &str) -> String {
    shellexpand::tilde(p).to_string()
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => SmartSchedConfig::load_from(path)?,
        None => SmartSchedConfig::load()?,
    };

    // Initialize logging (stderr, so it stays out of the menu output)
    let filter = if cli.verbose {
        "smartsched=debug,smartsched_scheduler=debug,smartsched_core=debug".to_string()
    } else {
        config.log_level.clone()
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    // First run: leave a default config behind for the user to edit
    if cli.config.is_none() {
        let path = SmartSchedConfig::default_path();
        match SmartSchedConfig::init_default(&path) {
            Ok(true) => tracing::info!("📝 Wrote default config to {}", path.display()),
            Ok(false) => {}
            Err(e) => {
                tracing::warn!("⚠️ Could not write default config to {}: {e}", path.display())
            }
        }
    }

    let data_file = expand_path(cli.data_file.as_deref().unwrap_or(&config.data_file));
    tracing::debug!("Task file: {data_file}");

    let mut manager = TaskManager::with_store(TaskStore::new(data_file));

    let stdin = io::stdin();
    let stdout = io::stdout();
    Console::new(
        &mut manager,
        stdin.lock(),
        stdout.lock(),
        || chrono::Local::now().naive_local(),
    )
    .run()?;

    Ok(())
}
