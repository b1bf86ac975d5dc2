// backupmanager/src/backup/br.rs
use tracing::debug;

use crate::config::job::{BackupSpec, BrJob, Scope, StorageProvider};
use crate::errors::Result;
use crate::utils::storage::storage_uri;

/// Global arguments of the distributed backup tool, shared by backup and
/// restore: storage, provider extras, job filter, then scope flags.
pub(crate) fn construct_br_global_options<J: BrJob>(job: &J) -> Result<Vec<String>> {
    let provider = job.storage_provider();
    let mut args = vec![format!("--storage={}", storage_uri(provider)?)];

    if let Some(StorageProvider::S3(s3)) = provider {
        args.push(format!("--s3.provider={}", s3.provider));
        if !s3.endpoint.is_empty() {
            args.push(format!("--s3.endpoint={}", s3.endpoint));
        }
    }

    for pattern in job.table_filter() {
        args.push("--filter".to_string());
        args.push(pattern.clone());
    }

    match job.scope() {
        Scope::Table { db, table } => {
            args.push(format!("--table={}", table));
            args.push(format!("--db={}", db));
        }
        Scope::Db { db } => args.push(format!("--db={}", db)),
        Scope::Full => {}
    }

    debug!(count = args.len(), scope = job.scope().as_br_type(), "constructed br global options");
    Ok(args)
}

pub fn construct_br_global_options_for_backup(backup: &BackupSpec) -> Result<Vec<String>> {
    construct_br_global_options(backup)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::job::{BrConfig, GcsStorageProvider, S3StorageProvider};
    use crate::errors::AppError;
    use pretty_assertions::assert_eq;

    pub(crate) fn ceph_provider() -> StorageProvider {
        StorageProvider::S3(S3StorageProvider {
            provider: "ceph".to_string(),
            endpoint: "http://10.0.0.1".to_string(),
            bucket: "test1-demo1".to_string(),
            secret_name: "demo".to_string(),
            prefix: String::new(),
        })
    }

    fn new_backup() -> BackupSpec {
        BackupSpec {
            storage_provider: Some(ceph_provider()),
            br: Some(BrConfig {
                cluster: "cluster-1".to_string(),
                cluster_namespace: "default".to_string(),
                tls_cluster: false,
            }),
            ..Default::default()
        }
    }

    fn storage_prefix() -> Vec<String> {
        vec![
            "--storage=s3://test1-demo1".to_string(),
            "--s3.provider=ceph".to_string(),
            "--s3.endpoint=http://10.0.0.1".to_string(),
        ]
    }

    #[test]
    fn test_full_scope_emits_only_storage() -> anyhow::Result<()> {
        assert_eq!(construct_br_global_options_for_backup(&new_backup())?, storage_prefix());
        Ok(())
    }

    #[test]
    fn test_job_filter_follows_provider_extras() -> anyhow::Result<()> {
        let mut backup = new_backup();
        backup.table_filter = vec!["mysql.*".to_string()];

        let mut expected = storage_prefix();
        expected.extend(["--filter".to_string(), "mysql.*".to_string()]);
        assert_eq!(construct_br_global_options_for_backup(&backup)?, expected);
        Ok(())
    }

    #[test]
    fn test_table_scope_emits_table_before_db() -> anyhow::Result<()> {
        let mut backup = new_backup();
        backup.scope = Scope::Table { db: "mysql".to_string(), table: "table1".to_string() };

        let mut expected = storage_prefix();
        expected.extend(["--table=table1".to_string(), "--db=mysql".to_string()]);
        assert_eq!(construct_br_global_options_for_backup(&backup)?, expected);
        Ok(())
    }

    #[test]
    fn test_db_scope_emits_db_only() -> anyhow::Result<()> {
        let mut backup = new_backup();
        backup.scope = Scope::Db { db: "mysql".to_string() };

        let mut expected = storage_prefix();
        expected.push("--db=mysql".to_string());
        assert_eq!(construct_br_global_options_for_backup(&backup)?, expected);
        Ok(())
    }

    #[test]
    fn test_dumpling_filter_is_ignored_by_br() -> anyhow::Result<()> {
        let mut backup = new_backup();
        backup.dumpling = Some(crate::config::job::DumplingConfig {
            table_filter: vec!["ignored.*".to_string()],
            options: Vec::new(),
        });
        assert_eq!(construct_br_global_options_for_backup(&backup)?, storage_prefix());
        Ok(())
    }

    #[test]
    fn test_gcs_has_no_provider_extras() -> anyhow::Result<()> {
        let mut backup = new_backup();
        backup.storage_provider = Some(StorageProvider::Gcs(GcsStorageProvider {
            bucket: "bk".to_string(),
            ..Default::default()
        }));
        backup.scope = Scope::Db { db: "app".to_string() };
        assert_eq!(
            construct_br_global_options_for_backup(&backup)?,
            vec!["--storage=gcs://bk/", "--db=app"]
        );
        Ok(())
    }

    #[test]
    fn test_s3_without_endpoint_skips_endpoint_flag() -> anyhow::Result<()> {
        let mut backup = new_backup();
        backup.storage_provider = Some(StorageProvider::S3(S3StorageProvider {
            bucket: "bk".to_string(),
            provider: "aws".to_string(),
            ..Default::default()
        }));
        assert_eq!(
            construct_br_global_options_for_backup(&backup)?,
            vec!["--storage=s3://bk", "--s3.provider=aws"]
        );
        Ok(())
    }

    #[test]
    fn test_s3_always_emits_provider_tag() -> anyhow::Result<()> {
        let mut backup = new_backup();
        backup.storage_provider = Some(StorageProvider::S3(S3StorageProvider {
            bucket: "bk".to_string(),
            endpoint: "http://10.0.0.1".to_string(),
            ..Default::default()
        }));
        assert_eq!(
            construct_br_global_options_for_backup(&backup)?,
            vec!["--storage=s3://bk", "--s3.provider=", "--s3.endpoint=http://10.0.0.1"]
        );
        Ok(())
    }

    #[test]
    fn test_missing_provider_propagates_error() {
        let mut backup = new_backup();
        backup.storage_provider = None;
        assert!(matches!(
            construct_br_global_options_for_backup(&backup),
            Err(AppError::UnknownStorageProvider(_))
        ));
    }

    #[test]
    fn test_repeated_builds_are_identical() -> anyhow::Result<()> {
        let mut backup = new_backup();
        backup.table_filter = vec!["a.*".to_string(), "b.*".to_string()];
        backup.scope = Scope::Table { db: "a".to_string(), table: "t".to_string() };
        assert_eq!(
            construct_br_global_options_for_backup(&backup)?,
            construct_br_global_options_for_backup(&backup)?
        );
        Ok(())
    }
}
