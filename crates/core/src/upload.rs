//! Validation of incoming image uploads.
//!
//! All checks run before any side effect: a rejected upload leaves no
//! artifact on disk and no job row behind.

use crate::error::CoreError;

/// Maximum accepted upload size (10 MiB).
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// MIME types the de-raining pipeline accepts.
pub const ALLOWED_IMAGE_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
];

/// An image file extracted from a multipart upload.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    /// Filename as supplied by the uploader.
    pub filename: String,
    /// Declared content type of the upload.
    pub mime_type: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

/// Validate an uploaded file against type and size limits.
pub fn validate(upload: &UploadedImage) -> Result<(), CoreError> {
    if upload.bytes.is_empty() {
        return Err(CoreError::Validation("No image file provided".into()));
    }

    if !ALLOWED_IMAGE_TYPES.contains(&upload.mime_type.as_str()) {
        return Err(CoreError::Validation(format!(
            "Only image files are allowed (got '{}')",
            upload.mime_type
        )));
    }

    if upload.bytes.len() > MAX_UPLOAD_BYTES {
        return Err(CoreError::Validation(format!(
            "Image exceeds the {} MiB upload limit",
            MAX_UPLOAD_BYTES / (1024 * 1024)
        )));
    }

    Ok(())
}
