// backupmanager/src/backup/metadata.rs
use chrono::NaiveDateTime;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::errors::{AppError, Result};
use crate::utils::constants::METADATA_FILE;

const MASTER_STATUS_SECTION: &str = "SHOW MASTER STATUS";
const COMMIT_POSITION_FIELD: &str = "Pos";
const STARTED_PREFIX: &str = "Started dump at:";
const FINISHED_PREFIX: &str = "Finished dump at:";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataSection {
    pub name: String,
    pub fields: Vec<(String, String)>,
}

impl MetadataSection {
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Consistency metadata written by the dump tool next to its output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DumpMetadata {
    pub started_at: Option<NaiveDateTime>,
    pub finished_at: Option<NaiveDateTime>,
    pub sections: Vec<MetadataSection>,
}

impl DumpMetadata {
    /// Parses metadata text. Indentation and blank lines are insignificant.
    pub fn parse(content: &str) -> Self {
        let mut metadata = DumpMetadata::default();
        let mut current: Option<MetadataSection> = None;

        for line in content.lines().map(str::trim).filter(|l| !l.is_empty()) {
            if let Some(rest) = line.strip_prefix(STARTED_PREFIX) {
                metadata.sections.extend(current.take());
                metadata.started_at = parse_timestamp(rest);
            } else if let Some(rest) = line.strip_prefix(FINISHED_PREFIX) {
                metadata.sections.extend(current.take());
                metadata.finished_at = parse_timestamp(rest);
            } else if line.starts_with("SHOW ") && line.ends_with(':') {
                metadata.sections.extend(current.take());
                current = Some(MetadataSection {
                    name: line.trim_end_matches(':').trim().to_string(),
                    fields: Vec::new(),
                });
            } else if let (Some(section), Some((key, value))) = (current.as_mut(), line.split_once(':')) {
                section.fields.push((key.trim().to_string(), value.trim().to_string()));
            }
        }
        metadata.sections.extend(current);
        metadata
    }

    pub fn section(&self, name: &str) -> Option<&MetadataSection> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// The binlog position recorded under `SHOW MASTER STATUS:`, kept as
    /// text since it can exceed 64-bit precision in some dialects.
    pub fn commit_position(&self) -> Option<&str> {
        self.section(MASTER_STATUS_SECTION)?
            .field(COMMIT_POSITION_FIELD)
            .filter(|pos| !pos.is_empty())
    }
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw.trim(), TIMESTAMP_FORMAT).ok()
}

/// Reads the dump tool's metadata file from `backup_path`.
pub fn read_dump_metadata(backup_path: &Path) -> Result<DumpMetadata> {
    let meta_file = backup_path.join(METADATA_FILE);
    let content = fs::read_to_string(&meta_file).map_err(|e| AppError::MetadataFormat {
        path: meta_file.clone(),
        reason: format!("cannot read file: {}", e),
    })?;
    Ok(DumpMetadata::parse(&content))
}

/// Extracts the commit position a logical dump was taken at.
pub fn get_commit_ts_from_metadata(backup_path: &Path) -> Result<String> {
    let metadata = read_dump_metadata(backup_path)?;
    let meta_file = backup_path.join(METADATA_FILE);
    debug!(
        started_at = ?metadata.started_at,
        finished_at = ?metadata.finished_at,
        sections = metadata.sections.len(),
        "parsed dump metadata"
    );

    if metadata.section(MASTER_STATUS_SECTION).is_none() {
        return Err(AppError::MetadataFormat {
            path: meta_file,
            reason: format!("section '{}:' not found", MASTER_STATUS_SECTION),
        });
    }

    metadata
        .commit_position()
        .map(str::to_string)
        .ok_or_else(|| AppError::MetadataFormat {
            path: meta_file,
            reason: format!("field '{}:' missing or empty", COMMIT_POSITION_FIELD),
        })
}
