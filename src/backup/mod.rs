pub mod br;
pub mod dumpling;
pub mod metadata;

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use crate::config::job::{BackupSpec, BrJob, StorageProvider};
use crate::config::{AppConfig, OperationConfig};
use crate::errors::AppError;
use crate::utils::constants::{
    BR_BIN_PREFIX, CLUSTER_CLIENT_TLS_PATH, DUMPLING_BIN, PD_CLIENT_PORT, TIDB_CLIENT_TLS_PATH,
};
use crate::utils::version::suffix;
use crate::utils::{Invocation, find_tool_executable, print_invocation, tls_args};

/// Plans a distributed-tool invocation `br<suffix> <subcommand> <scope> ...`.
/// Cluster address and TLS flags precede the global options.
pub(crate) fn plan_br<J: BrJob>(
    subcommand: &str,
    job: &J,
    tool_version: &str,
    global_options: Vec<String>,
) -> crate::errors::Result<Invocation> {
    let br = job
        .br()
        .ok_or_else(|| AppError::Config(format!("br {} requires a 'br' block", subcommand)))?;

    let bin = format!("{}{}", BR_BIN_PREFIX, suffix(tool_version));
    let mut invocation = Invocation::new(find_tool_executable(&bin))
        .arg(subcommand)
        .arg(job.scope().as_br_type())
        .arg(format!("--pd={}-pd.{}:{}", br.cluster, br.cluster_namespace, PD_CLIENT_PORT));
    if br.tls_cluster {
        invocation = invocation.args(tls_args(CLUSTER_CLIENT_TLS_PATH));
    }
    let secret_name = match job.storage_provider() {
        Some(StorageProvider::S3(s3)) => s3.secret_name.as_str(),
        Some(StorageProvider::Gcs(gcs)) => gcs.secret_name.as_str(),
        None => "",
    };
    Ok(invocation.credential_ref(secret_name).args(global_options))
}

/// Plans a logical dump into `output_dir`. The password is supplied to the
/// tool by the executor, never on the command line.
pub fn plan_dumpling(backup: &BackupSpec, output_dir: &Path) -> crate::errors::Result<Invocation> {
    let from = backup
        .from
        .as_ref()
        .ok_or_else(|| AppError::Config("a logical backup requires a 'from' block".to_string()))?;

    let mut invocation = Invocation::new(find_tool_executable(DUMPLING_BIN))
        .arg(format!("--outputdir={}", output_dir.display()))
        .arg(format!("--host={}", from.host))
        .arg(format!("--port={}", from.port))
        .arg(format!("--user={}", from.user));
    if from.tls_client {
        invocation = invocation.args(tls_args(TIDB_CLIENT_TLS_PATH));
    }
    Ok(invocation.args(dumpling::construct_dumpling_options_for_backup(backup)))
}

/// Plans a backup: a snapshot backup when a `br` block is present,
/// otherwise a logical dump.
pub fn plan_backup(
    backup: &BackupSpec,
    tool_version: &str,
    output_dir: &Path,
) -> crate::errors::Result<Invocation> {
    if backup.br.is_some() {
        let global_options = br::construct_br_global_options_for_backup(backup)?;
        plan_br("backup", backup, tool_version, global_options)
    } else {
        plan_dumpling(backup, output_dir)
    }
}

/// Public entry point for the backup process.
pub fn run_backup_flow(app_config: &AppConfig) -> Result<()> {
    let backup = match &app_config.operation {
        Some(OperationConfig::Backup(cfg)) => cfg,
        _ => anyhow::bail!("Backup operation selected but no backup configuration found."),
    };

    let invocation = plan_backup(backup, &app_config.tool_version, &app_config.dump_output_dir)
        .context("Failed to plan backup invocation")?;
    info!(program = %invocation.program, args = invocation.args.len(), "planned backup");
    print_invocation(&invocation).context("Failed to print backup invocation")?;
    Ok(())
}
