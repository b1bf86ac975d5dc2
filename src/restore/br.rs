// backupmanager/src/restore/br.rs
use crate::backup::br::construct_br_global_options;
use crate::config::job::RestoreSpec;
use crate::errors::Result;

/// Global distributed-tool arguments for a restore; mirrors the backup side.
pub fn construct_br_global_options_for_restore(restore: &RestoreSpec) -> Result<Vec<String>> {
    construct_br_global_options(restore)
}
