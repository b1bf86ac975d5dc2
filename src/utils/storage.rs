// backupmanager/src/utils/storage.rs
use crate::config::job::StorageProvider;
use crate::errors::{AppError, Result};

/// Returns the canonical storage URI handed to `--storage=`.
///
/// S3 URIs carry no trailing separator; GCS URIs end with `/`.
pub fn storage_uri(provider: Option<&StorageProvider>) -> Result<String> {
    match provider {
        Some(StorageProvider::S3(s3)) => Ok(format!("s3://{}", s3.bucket)),
        Some(StorageProvider::Gcs(gcs)) => Ok(format!("gcs://{}/", gcs.bucket)),
        None => Err(AppError::UnknownStorageProvider(
            "no storage provider is configured".to_string(),
        )),
    }
}

/// Builds the sync-tool remote path `<scheme>:<bucket>/<prefix>/<object>`.
pub fn rclone_remote(provider: Option<&StorageProvider>, object_name: &str) -> Result<String> {
    let (scheme, bucket, prefix) = match provider {
        Some(StorageProvider::S3(s3)) => ("s3", &s3.bucket, &s3.prefix),
        Some(StorageProvider::Gcs(gcs)) => ("gcs", &gcs.bucket, &gcs.prefix),
        None => {
            return Err(AppError::UnknownStorageProvider(
                "no storage provider is configured".to_string(),
            ));
        }
    };

    let path: Vec<&str> = [prefix.as_str(), object_name]
        .into_iter()
        .map(|part| part.trim_matches('/'))
        .filter(|part| !part.is_empty())
        .collect();

    Ok(format!("{}:{}/{}", scheme, bucket.trim_end_matches('/'), path.join("/")))
}
