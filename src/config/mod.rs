// backupmanager/src/config/mod.rs
pub mod job;

use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;
use url::Url;

use crate::errors::AppError;
use crate::utils::constants::{DEFAULT_DUMP_OUTPUT_DIR, RCLONE_CONFIG_PATH};
use crate::utils::storage::rclone_remote;
use job::{BackupSpec, RestoreSpec, Scope, StorageProvider, SyncJob};

const CONFIG_PATH_ENV: &str = "BACKUP_MANAGER_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config.json";

// Structs for deserializing config.json
#[derive(Debug, Clone, Deserialize)]
pub struct JsonSyncConfig {
    pub command: Option<String>,
    pub source: Option<String>,
    /// Explicit destination; when absent it is derived from
    /// `storage_provider` and `object_name`.
    pub dest: Option<String>,
    pub object_name: Option<String>,
    pub storage_provider: Option<StorageProvider>,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub verbose: bool,
    pub config_path: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawJsonConfig {
    pub tool_version: Option<String>,
    pub dump_output_dir: Option<PathBuf>,
    pub backup: Option<BackupSpec>,
    pub restore: Option<RestoreSpec>,
    pub sync: Option<JsonSyncConfig>,
}

impl RawJsonConfig {
    pub fn parse(content: &str) -> crate::errors::Result<Self> {
        Ok(serde_json::from_str(content)?)
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub operation: Option<OperationConfig>,
    pub tool_version: String,
    pub dump_output_dir: PathBuf,
    pub raw_json_config: RawJsonConfig,
}

#[derive(Debug, Clone)]
pub enum OperationConfig {
    Backup(BackupSpec),
    Restore(RestoreSpec),
    Sync(SyncJob),
}

/// Job file location: `BACKUP_MANAGER_CONFIG` if set, else `config.json`.
pub fn config_path_from_env() -> PathBuf {
    env::var(CONFIG_PATH_ENV)
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

impl AppConfig {
    pub fn load_from_json(config_path: &Path) -> Result<Self> {
        let config_content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;
        let raw_json_config = RawJsonConfig::parse(&config_content).with_context(|| {
            format!(
                "Failed to parse JSON from config file at {}",
                config_path.display()
            )
        })?;
        Ok(Self::from_raw(raw_json_config))
    }

    pub fn from_raw(raw_json_config: RawJsonConfig) -> Self {
        let tool_version = raw_json_config.tool_version.clone().unwrap_or_else(|| {
            warn!("tool_version is not set in config.json, the newest known dialect will be used");
            String::new()
        });
        let dump_output_dir = raw_json_config
            .dump_output_dir
            .clone()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DUMP_OUTPUT_DIR));

        AppConfig {
            operation: None, // To be filled by main after parsing CLI args
            tool_version,
            dump_output_dir,
            raw_json_config,
        }
    }
}

pub fn load_backup_config_from_json(raw_config: &RawJsonConfig) -> Result<BackupSpec> {
    let backup = raw_config
        .backup
        .as_ref()
        .context("backup must be set in config.json for a backup operation")?
        .clone();

    validate_scope(&backup.scope).context("Invalid backup scope")?;
    validate_storage(backup.storage_provider.as_ref()).context("Invalid backup storage provider")?;
    validate_tokens("backup.table_filter", &backup.table_filter)?;
    if let Some(dumpling) = &backup.dumpling {
        validate_tokens("backup.dumpling.table_filter", &dumpling.table_filter)?;
        validate_tokens("backup.dumpling.options", &dumpling.options)?;
    }
    if backup.br.is_none() && backup.from.is_none() {
        return Err(AppError::Config(
            "a logical backup (no br block) needs a 'from' block naming the source".to_string(),
        )
        .into());
    }
    Ok(backup)
}

pub fn load_restore_config_from_json(raw_config: &RawJsonConfig) -> Result<RestoreSpec> {
    let restore = raw_config
        .restore
        .as_ref()
        .context("restore must be set in config.json for a restore operation")?
        .clone();

    validate_scope(&restore.scope).context("Invalid restore scope")?;
    validate_storage(restore.storage_provider.as_ref()).context("Invalid restore storage provider")?;
    validate_tokens("restore.table_filter", &restore.table_filter)?;
    if restore.br.is_none() {
        return Err(AppError::Config("restore requires a 'br' block".to_string()).into());
    }
    Ok(restore)
}

pub fn load_sync_config_from_json(raw_config: &RawJsonConfig) -> Result<SyncJob> {
    let sync = raw_config
        .sync
        .as_ref()
        .context("sync must be set in config.json for a sync operation")?;

    let command = sync
        .command
        .clone()
        .filter(|c| !c.trim().is_empty())
        .context("sync.command must be set in config.json")?;
    let source = sync
        .source
        .clone()
        .filter(|s| !s.trim().is_empty())
        .context("sync.source must be set in config.json")?;

    validate_storage(sync.storage_provider.as_ref()).context("Invalid sync storage provider")?;
    validate_tokens("sync.options", &sync.options)?;
    let dest = match (&sync.dest, &sync.object_name) {
        (Some(dest), _) => dest.clone(),
        (None, Some(object_name)) => rclone_remote(sync.storage_provider.as_ref(), object_name)
            .context("Failed to derive sync destination from storage_provider")?,
        (None, None) => String::new(),
    };

    Ok(SyncJob {
        config_path: sync
            .config_path
            .clone()
            .unwrap_or_else(|| RCLONE_CONFIG_PATH.to_string()),
        options: sync.options.clone(),
        command,
        source,
        dest,
        verbose: sync.verbose,
    })
}

/// Filter patterns and tool options become argv elements and must be non-empty.
fn validate_tokens(field: &str, values: &[String]) -> crate::errors::Result<()> {
    match values.iter().position(|value| value.trim().is_empty()) {
        Some(index) => Err(AppError::Config(format!("{}[{}] cannot be empty", field, index))),
        None => Ok(()),
    }
}

fn validate_scope(scope: &Scope) -> crate::errors::Result<()> {
    match scope {
        Scope::Table { db, table } if db.trim().is_empty() || table.trim().is_empty() => Err(
            AppError::Config("a table scope needs both 'db' and 'table'".to_string()),
        ),
        Scope::Db { db } if db.trim().is_empty() => {
            Err(AppError::Config("a db scope needs 'db'".to_string()))
        }
        _ => Ok(()),
    }
}

fn validate_storage(provider: Option<&StorageProvider>) -> crate::errors::Result<()> {
    match provider {
        Some(StorageProvider::S3(s3)) => {
            if s3.bucket.trim().is_empty() {
                return Err(AppError::Config("s3.bucket cannot be empty".to_string()));
            }
            if !s3.endpoint.is_empty() {
                Url::parse(&s3.endpoint)?;
            }
            Ok(())
        }
        Some(StorageProvider::Gcs(gcs)) if gcs.bucket.trim().is_empty() => {
            Err(AppError::Config("gcs.bucket cannot be empty".to_string()))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> anyhow::Result<RawJsonConfig> {
        Ok(RawJsonConfig::parse(&value.to_string())?)
    }

    #[test]
    fn test_load_backup_config_for_br() -> anyhow::Result<()> {
        let raw_config = raw(json!({
            "tool_version": "v4.0.8",
            "backup": {
                "scope": { "type": "db", "db": "app" },
                "storage_provider": { "s3": { "bucket": "bk", "endpoint": "http://10.0.0.1", "provider": "ceph" } },
                "br": { "cluster": "basic", "cluster_namespace": "tidb" }
            }
        }))?;

        let backup = load_backup_config_from_json(&raw_config)?;
        assert_eq!(backup.scope, Scope::Db { db: "app".to_string() });
        assert_eq!(backup.br.map(|br| br.cluster), Some("basic".to_string()));
        assert_eq!(AppConfig::from_raw(raw_config).tool_version, "v4.0.8");
        Ok(())
    }

    #[test]
    fn test_logical_backup_needs_source() -> anyhow::Result<()> {
        let raw_config = raw(json!({ "backup": { "dumpling": { "options": ["--rows=1"] } } }))?;
        assert!(load_backup_config_from_json(&raw_config).is_err());
        Ok(())
    }

    #[test]
    fn test_invalid_endpoint_is_rejected() -> anyhow::Result<()> {
        let raw_config = raw(json!({
            "restore": {
                "storage_provider": { "s3": { "bucket": "bk", "endpoint": "not a url" } },
                "br": { "cluster": "basic" }
            }
        }))?;
        let err = load_restore_config_from_json(&raw_config).unwrap_err();
        assert!(err.chain().any(|cause| cause.downcast_ref::<AppError>().is_some_and(|e| matches!(e, AppError::UrlParse(_)))));
        Ok(())
    }

    #[test]
    fn test_table_scope_requires_both_names() -> anyhow::Result<()> {
        let raw_config = raw(json!({
            "restore": {
                "scope": { "type": "table", "db": "app", "table": "" },
                "br": { "cluster": "basic" }
            }
        }))?;
        assert!(load_restore_config_from_json(&raw_config).is_err());
        Ok(())
    }

    #[test]
    fn test_restore_requires_br_block() -> anyhow::Result<()> {
        let raw_config = raw(json!({ "restore": { "scope": { "type": "full" } } }))?;
        assert!(load_restore_config_from_json(&raw_config).is_err());
        Ok(())
    }

    #[test]
    fn test_sync_config_derives_destination() -> anyhow::Result<()> {
        let raw_config = raw(json!({
            "sync": {
                "command": "copyto",
                "source": "/backup/dump.tgz",
                "object_name": "dump.tgz",
                "storage_provider": { "gcs": { "bucket": "bk", "prefix": "daily" } },
                "verbose": true
            }
        }))?;

        let sync = load_sync_config_from_json(&raw_config)?;
        assert_eq!(sync.dest, "gcs:bk/daily/dump.tgz");
        assert_eq!(sync.config_path, RCLONE_CONFIG_PATH);
        assert!(sync.verbose);
        Ok(())
    }

    #[test]
    fn test_sync_config_requires_command() -> anyhow::Result<()> {
        let raw_config = raw(json!({ "sync": { "source": "src" } }))?;
        assert!(load_sync_config_from_json(&raw_config).is_err());
        Ok(())
    }

    fn is_config_error(err: &anyhow::Error) -> bool {
        matches!(err.downcast_ref::<AppError>(), Some(AppError::Config(_)))
    }

    #[test]
    fn test_backup_rejects_empty_filters_and_options() -> anyhow::Result<()> {
        let cases = [
            json!({ "from": { "host": "db" }, "table_filter": ["app.*", ""] }),
            json!({ "from": { "host": "db" }, "dumpling": { "table_filter": [""] } }),
            json!({ "from": { "host": "db" }, "dumpling": { "options": ["--rows=1", " "] } }),
        ];
        for backup in cases {
            let raw_config = raw(json!({ "backup": backup }))?;
            let err = load_backup_config_from_json(&raw_config).unwrap_err();
            assert!(is_config_error(&err), "{:?}", err);
        }
        Ok(())
    }

    #[test]
    fn test_restore_rejects_empty_filter() -> anyhow::Result<()> {
        let raw_config = raw(json!({
            "restore": { "table_filter": [""], "br": { "cluster": "basic" } }
        }))?;
        let err = load_restore_config_from_json(&raw_config).unwrap_err();
        assert!(is_config_error(&err), "{:?}", err);
        Ok(())
    }

    #[test]
    fn test_sync_rejects_empty_option() -> anyhow::Result<()> {
        let raw_config = raw(json!({
            "sync": { "command": "copyto", "source": "src", "dest": "dst", "options": ["-q", ""] }
        }))?;
        let err = load_sync_config_from_json(&raw_config).unwrap_err();
        assert!(is_config_error(&err), "{:?}", err);
        Ok(())
    }

    #[test]
    fn test_dump_output_dir_defaults() {
        let app_config = AppConfig::from_raw(RawJsonConfig::default());
        assert_eq!(app_config.dump_output_dir, PathBuf::from(DEFAULT_DUMP_OUTPUT_DIR));
        assert!(app_config.tool_version.is_empty());
    }

    #[test]
    fn test_load_from_json_file() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("config.json");
        fs::write(&path, json!({ "tool_version": "v3.1.0", "dump_output_dir": "/data" }).to_string())?;

        let app_config = AppConfig::load_from_json(&path)?;
        assert_eq!(app_config.tool_version, "v3.1.0");
        assert_eq!(app_config.dump_output_dir, PathBuf::from("/data"));
        Ok(())
    }
}
