// backupmanager/src/backup/dumpling.rs
use crate::config::job::BackupSpec;
use crate::utils::constants::{DEFAULT_DUMPLING_OPTIONS, DEFAULT_TABLE_FILTER};
use crate::utils::precedence::resolve_precedence;

/// Builds the logical dump arguments for a backup job.
///
/// Filters come from the job, else the dump tool block, else the defaults;
/// options come from the dump tool block, else the defaults. Filter tokens
/// precede option tokens.
pub fn construct_dumpling_options_for_backup(backup: &BackupSpec) -> Vec<String> {
    let no_overrides: &[String] = &[];
    let (tool_filter, tool_options) = match &backup.dumpling {
        Some(dumpling) => (dumpling.table_filter.as_slice(), dumpling.options.as_slice()),
        None => (no_overrides, no_overrides),
    };

    let filter = resolve_precedence(
        "dumpling table filter",
        &backup.table_filter,
        tool_filter,
        DEFAULT_TABLE_FILTER,
    );
    let options = resolve_precedence("dumpling options", tool_options, no_overrides, DEFAULT_DUMPLING_OPTIONS);

    let mut args = Vec::with_capacity(filter.values.len() * 2 + options.values.len());
    for pattern in filter.values {
        args.push("--filter".to_string());
        args.push(pattern.to_string());
    }
    args.extend(options.values.into_iter().map(str::to_string));
    args
}
