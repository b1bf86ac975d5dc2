// backupmanager/src/config/job.rs
use serde::{Deserialize, Serialize};

fn default_tidb_port() -> u16 {
    4000
}

fn default_tidb_user() -> String {
    "root".to_string()
}

/// Breadth of a backup or restore job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Scope {
    #[default]
    Full,
    Db { db: String },
    Table { db: String, table: String },
}

impl Scope {
    /// The scope word the distributed tool expects after its sub-command.
    pub fn as_br_type(&self) -> &'static str {
        match self {
            Scope::Full => "full",
            Scope::Db { .. } => "db",
            Scope::Table { .. } => "table",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct S3StorageProvider {
    pub bucket: String,
    #[serde(default)]
    pub endpoint: String,
    /// Access-provider tag handed to `--s3.provider=` (e.g. `aws`, `ceph`).
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub secret_name: String,
    #[serde(default)]
    pub prefix: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GcsStorageProvider {
    pub bucket: String,
    #[serde(default)]
    pub secret_name: String,
    #[serde(default)]
    pub prefix: String,
}

/// Storage destination. Exactly one variant; a missing provider is
/// represented by `None` at the job level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageProvider {
    S3(S3StorageProvider),
    Gcs(GcsStorageProvider),
}

/// Overrides for the logical dump tool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DumplingConfig {
    #[serde(default)]
    pub table_filter: Vec<String>,
    #[serde(default)]
    pub options: Vec<String>,
}

/// Cluster reference for the distributed backup tool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrConfig {
    pub cluster: String,
    #[serde(default)]
    pub cluster_namespace: String,
    #[serde(default)]
    pub tls_cluster: bool,
}

/// SQL endpoint a logical dump reads from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TidbAccessConfig {
    pub host: String,
    #[serde(default = "default_tidb_port")]
    pub port: u16,
    #[serde(default = "default_tidb_user")]
    pub user: String,
    #[serde(default)]
    pub tls_client: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupSpec {
    #[serde(default)]
    pub scope: Scope,
    #[serde(default)]
    pub table_filter: Vec<String>,
    #[serde(default)]
    pub storage_provider: Option<StorageProvider>,
    #[serde(default)]
    pub from: Option<TidbAccessConfig>,
    #[serde(default)]
    pub dumpling: Option<DumplingConfig>,
    #[serde(default)]
    pub br: Option<BrConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestoreSpec {
    #[serde(default)]
    pub scope: Scope,
    #[serde(default)]
    pub table_filter: Vec<String>,
    #[serde(default)]
    pub storage_provider: Option<StorageProvider>,
    #[serde(default)]
    pub br: Option<BrConfig>,
}

/// Fields the distributed tool reads identically from backups and restores.
pub trait BrJob {
    fn scope(&self) -> &Scope;
    fn table_filter(&self) -> &[String];
    fn storage_provider(&self) -> Option<&StorageProvider>;
    fn br(&self) -> Option<&BrConfig>;
}

impl BrJob for BackupSpec {
    fn scope(&self) -> &Scope {
        &self.scope
    }
    fn table_filter(&self) -> &[String] {
        &self.table_filter
    }
    fn storage_provider(&self) -> Option<&StorageProvider> {
        self.storage_provider.as_ref()
    }
    fn br(&self) -> Option<&BrConfig> {
        self.br.as_ref()
    }
}

impl BrJob for RestoreSpec {
    fn scope(&self) -> &Scope {
        &self.scope
    }
    fn table_filter(&self) -> &[String] {
        &self.table_filter
    }
    fn storage_provider(&self) -> Option<&StorageProvider> {
        self.storage_provider.as_ref()
    }
    fn br(&self) -> Option<&BrConfig> {
        self.br.as_ref()
    }
}

/// One invocation of the object-storage sync tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncJob {
    pub config_path: String,
    pub options: Vec<String>,
    pub command: String,
    pub source: String,
    pub dest: String,
    pub verbose: bool,
}
