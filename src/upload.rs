//! Upload validation and persistence.
//!
//! Uploaded images are checked against the jpg/jpeg/png whitelist and a size
//! cap, then written under the configured data directory using the final
//! component of the declared file name.

use crate::config::UploadConfig;
use crate::error::{Result, VisionError};
use crate::vision::ImageFormat;
use sha2::{Digest, Sha256};
use std::path::PathBuf;
use tracing::{debug, info};

/// Largest image accepted by default (20MB)
pub const MAX_IMAGE_SIZE_BYTES: usize = 20 * 1024 * 1024;

/// An upload that has been validated and written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    pub file_name: String,
    pub path: PathBuf,
    pub format: ImageFormat,
    /// Hex SHA-256 of the bytes.
    pub content_hash: String,
    pub size_bytes: usize,
}

/// Hex-encoded SHA-256 of some bytes.
pub fn content_hash(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Check a declared file name and its bytes. Returns the detected format.
pub fn validate_upload(file_name: &str, bytes: &[u8], max_bytes: usize) -> Result<ImageFormat> {
    let format = ImageFormat::from_file_name(file_name).ok_or_else(|| {
        VisionError::Validation(format!(
            "unsupported file type for {:?}; expected jpg, jpeg or png",
            file_name
        ))
    })?;

    if bytes.is_empty() {
        return Err(VisionError::Validation(format!("{} is empty", file_name)));
    }

    if bytes.len() > max_bytes {
        return Err(VisionError::Validation(format!(
            "image size {} bytes exceeds maximum of {} bytes",
            bytes.len(),
            max_bytes
        )));
    }

    Ok(format)
}

/// Writes uploads into a data directory.
#[derive(Debug, Clone)]
pub struct UploadStore {
    data_dir: PathBuf,
    max_image_bytes: usize,
}

impl UploadStore {
    pub fn new(config: &UploadConfig) -> Self {
        Self {
            data_dir: PathBuf::from(&config.data_dir),
            max_image_bytes: config.max_image_bytes,
        }
    }

    /// Validate and persist one upload, overwriting a file of the same name.
    pub async fn save(&self, declared_name: &str, bytes: &[u8]) -> Result<StoredImage> {
        let file_name = sanitize_file_name(declared_name)?;
        let format = validate_upload(&file_name, bytes, self.max_image_bytes)?;

        tokio::fs::create_dir_all(&self.data_dir).await?;
        let path = self.data_dir.join(&file_name);
        tokio::fs::write(&path, bytes).await?;

        let stored = StoredImage {
            file_name,
            path,
            format,
            content_hash: content_hash(bytes),
            size_bytes: bytes.len(),
        };

        info!(
            "Stored upload {} ({}, {} bytes)",
            stored.path.display(),
            stored.format.mime_type(),
            stored.size_bytes
        );
        debug!("Upload hash: {}", stored.content_hash);
        Ok(stored)
    }
}

/// Keep only the last path component of a client-supplied name.
fn sanitize_file_name(declared: &str) -> Result<String> {
    let name = declared
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or_default()
        .trim();

    if name.is_empty() || name == "." || name == ".." {
        return Err(VisionError::Validation(format!(
            "invalid file name {:?}",
            declared
        )));
    }
    Ok(name.to_string())
}
