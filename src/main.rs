//! Backup Manager
//!
//! Compiles backup, restore and sync jobs into invocations of the external
//! data-movement tools, and reads consistency metadata back from dumps.

// backupmanager/src/main.rs
mod backup;
mod config;
mod errors;
mod restore;
mod sync;
mod utils;

use anyhow::{Context, Result};
use config::{
    AppConfig, OperationConfig, config_path_from_env, load_backup_config_from_json,
    load_restore_config_from_json, load_sync_config_from_json,
};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Main entry point for the backup manager
fn main() -> ExitCode {
    dotenv::dotenv().ok();
    init_tracing();

    match run_app() {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:?}", e);
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr; stdout carries only the planned invocation.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("backupmanager=info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_app_config() -> Result<AppConfig> {
    let config_path = config_path_from_env();
    AppConfig::load_from_json(&config_path).context(format!(
        "Failed to load application configuration from {}",
        config_path.display()
    ))
}

fn run_app() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let choice = if args.len() > 1 {
        args[1].trim().to_string()
    } else {
        prompt_choice()?
    };

    match choice.as_str() {
        "1" | "backup" => {
            info!("Planning backup");
            let mut app_config = load_app_config()?;
            let backup_config = load_backup_config_from_json(&app_config.raw_json_config)
                .context("Failed to load backup configuration from JSON")?;
            app_config.operation = Some(OperationConfig::Backup(backup_config));
            backup::run_backup_flow(&app_config).context("Backup planning failed")?;
        }
        "2" | "restore" => {
            info!("Planning restore");
            let mut app_config = load_app_config()?;
            let restore_config = load_restore_config_from_json(&app_config.raw_json_config)
                .context("Failed to load restore configuration from JSON")?;
            app_config.operation = Some(OperationConfig::Restore(restore_config));
            restore::run_restore_flow(&app_config).context("Restore planning failed")?;
        }
        "3" | "sync" => {
            info!("Planning sync");
            let mut app_config = load_app_config()?;
            let sync_config = load_sync_config_from_json(&app_config.raw_json_config)
                .context("Failed to load sync configuration from JSON")?;
            app_config.operation = Some(OperationConfig::Sync(sync_config));
            sync::run_sync_flow(&app_config).context("Sync planning failed")?;
        }
        "4" | "commit-ts" => {
            let backup_path = match args.get(2) {
                Some(dir) => PathBuf::from(dir),
                None => load_app_config()?.dump_output_dir,
            };
            let commit_ts = backup::metadata::get_commit_ts_from_metadata(&backup_path)
                .with_context(|| format!("Failed to read commit position from {}", backup_path.display()))?;
            info!(commit_ts = %commit_ts, path = %backup_path.display(), "read commit position");
            println!("{}", commit_ts);
        }
        _ => {
            anyhow::bail!(
                "Invalid operation choice '{}'. Use 'backup', 'restore', 'sync' or 'commit-ts'.",
                choice
            );
        }
    }
    Ok(())
}

/// Prompts user to select an operation
///
/// Returns the user's choice as String
fn prompt_choice() -> Result<String> {
    use std::io::{Write, stdin, stderr};

    eprintln!("Select an operation:");
    eprintln!("1. Plan Backup (or type 'backup')");
    eprintln!("2. Plan Restore (or type 'restore')");
    eprintln!("3. Plan Sync (or type 'sync')");
    eprintln!("4. Read Commit Position (or type 'commit-ts')");
    eprint!("Enter your choice: ");
    stderr().flush().context("Failed to flush stderr")?;

    let mut input = String::new();
    stdin().read_line(&mut input).context("Failed to read user input")?;
    Ok(input.trim().to_string())
}
