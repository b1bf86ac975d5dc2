// backupmanager/src/utils/constants.rs

/// Config file the sync tool reads its remotes from.
pub const RCLONE_CONFIG_PATH: &str = "/tmp/rclone.conf";

/// File the dump tool writes consistency metadata into.
pub const METADATA_FILE: &str = "metadata";

/// Table filter patterns a logical dump uses when neither the job nor the
/// dump tool block names any.
pub const DEFAULT_TABLE_FILTER: &[&str] = &[
    "*.*",
    "!/^(mysql|test|INFORMATION_SCHEMA|PERFORMANCE_SCHEMA|METRICS_SCHEMA|INSPECTION_SCHEMA)$/.*",
];

pub const DEFAULT_DUMPLING_OPTIONS: &[&str] = &["--threads=16", "--rows=10000"];

pub const DEFAULT_DUMP_OUTPUT_DIR: &str = "/backup";

// Client certificates mounted by the certificate collaborator.
pub const CLUSTER_CLIENT_TLS_PATH: &str = "/var/lib/cluster-client-tls";
pub const TIDB_CLIENT_TLS_PATH: &str = "/var/lib/tidb-client-tls";
pub const TLS_CA_FILE: &str = "ca.crt";
pub const TLS_CERT_FILE: &str = "tls.crt";
pub const TLS_KEY_FILE: &str = "tls.key";

pub const PD_CLIENT_PORT: u16 = 2379;

pub const DUMPLING_BIN: &str = "dumpling";
pub const RCLONE_BIN: &str = "rclone";
/// Prefix of the distributed backup tool binary; the version suffix is appended.
pub const BR_BIN_PREFIX: &str = "br";
