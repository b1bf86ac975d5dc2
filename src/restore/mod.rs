pub mod br;

use anyhow::{Context, Result};
use tracing::info;

use crate::backup::plan_br;
use crate::config::job::RestoreSpec;
use crate::config::{AppConfig, OperationConfig};
use crate::utils::{Invocation, print_invocation};

/// Plans a snapshot restore `br<suffix> restore <scope> ...`.
pub fn plan_restore(restore: &RestoreSpec, tool_version: &str) -> crate::errors::Result<Invocation> {
    let global_options = br::construct_br_global_options_for_restore(restore)?;
    plan_br("restore", restore, tool_version, global_options)
}

/// Public entry point for the restore process.
pub fn run_restore_flow(app_config: &AppConfig) -> Result<()> {
    let restore = match &app_config.operation {
        Some(OperationConfig::Restore(cfg)) => cfg,
        _ => anyhow::bail!("Restore operation selected but no restore configuration found."),
    };

    let invocation = plan_restore(restore, &app_config.tool_version)
        .context("Failed to plan restore invocation")?;
    info!(program = %invocation.program, args = invocation.args.len(), "planned restore");
    print_invocation(&invocation).context("Failed to print restore invocation")?;
    Ok(())
}
