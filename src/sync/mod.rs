// backupmanager/src/sync/mod.rs
pub mod rclone;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::job::SyncJob;
use crate::config::{AppConfig, OperationConfig};
use crate::utils::constants::RCLONE_BIN;
use crate::utils::{Invocation, find_tool_executable, print_invocation};

pub fn plan_sync(job: &SyncJob) -> Invocation {
    Invocation::new(find_tool_executable(RCLONE_BIN)).args(rclone::construct_rclone_args(
        &job.config_path,
        &job.options,
        &job.command,
        &job.source,
        &job.dest,
        job.verbose,
    ))
}

/// Public entry point for the sync process.
pub fn run_sync_flow(app_config: &AppConfig) -> Result<()> {
    let sync_job = match &app_config.operation {
        Some(OperationConfig::Sync(cfg)) => cfg,
        _ => anyhow::bail!("Sync operation selected but no sync configuration found."),
    };

    let invocation = plan_sync(sync_job);
    info!(program = %invocation.program, command = %sync_job.command, "planned sync");
    print_invocation(&invocation).context("Failed to print sync invocation")?;
    Ok(())
}
