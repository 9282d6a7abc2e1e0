// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Upload validation gate for road-sign images
//!
//! Enforces the accepted formats (JPG/PNG), the 10 MiB size cap and a
//! magic-byte sanity check before any payload reaches the classifier.

use thiserror::Error;

/// Maximum upload size (10 MiB)
pub const MAX_UPLOAD_SIZE: usize = 10 * 1024 * 1024;

/// Accepted file extensions
const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Accepted MIME types
const ALLOWED_MIME_TYPES: &[&str] = &["image/jpeg", "image/png"];

/// User-facing validation failures.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Filename is required. Please ensure your file has a name.")]
    MissingFilename,

    #[error("Invalid file extension. Please upload a file with .jpg, .jpeg, or .png extension.")]
    InvalidExtension,

    #[error("Invalid file format. The file must be a JPEG or PNG image.")]
    InvalidMimeType,

    #[error(
        "File size exceeds the maximum allowed size of 10 MB. Please upload a smaller image. (File size: {size_mb:.2} MB)"
    )]
    FileTooLarge { size_mb: f64 },

    #[error("File validation failed. Please check that your file is a valid JPG or PNG image under 10 MB.")]
    NotAnImage,
}

/// Validate the filename extension against the JPG/PNG whitelist.
pub fn validate_file_type(filename: &str) -> Result<(), ValidationError> {
    if filename.is_empty() {
        return Err(ValidationError::MissingFilename);
    }

    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());

    match extension {
        Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        _ => Err(ValidationError::InvalidExtension),
    }
}

/// Validate a declared MIME type. Absent content types are tolerated; the
/// magic-byte check still runs on the payload.
pub fn validate_mime_type(content_type: Option<&str>) -> Result<(), ValidationError> {
    match content_type {
        None => Ok(()),
        Some(mime) if ALLOWED_MIME_TYPES.contains(&mime) => Ok(()),
        Some(_) => Err(ValidationError::InvalidMimeType),
    }
}

/// Validate the payload size against the 10 MiB cap.
pub fn validate_file_size(size: usize) -> Result<(), ValidationError> {
    if size > MAX_UPLOAD_SIZE {
        return Err(ValidationError::FileTooLarge {
            size_mb: size as f64 / (1024.0 * 1024.0),
        });
    }
    Ok(())
}

/// Sniff the payload's magic bytes and return its canonical MIME type.
///
/// Only JPEG and PNG are accepted; anything else is rejected regardless of
/// what the upload claimed.
pub fn sniff_mime_type(bytes: &[u8]) -> Result<&'static str, ValidationError> {
    match bytes {
        // PNG: 89 50 4E 47 (0x89 P N G)
        [0x89, 0x50, 0x4E, 0x47, ..] => Ok("image/png"),

        // JPEG: FF D8 FF
        [0xFF, 0xD8, 0xFF, ..] => Ok("image/jpeg"),

        _ => Err(ValidationError::NotAnImage),
    }
}

/// Run the full validation gate over an upload.
///
/// Returns the sniffed MIME type for the classifier to forward. Empty
/// payloads are not this gate's concern; the classifier rejects those with
/// its own error.
pub fn validate_upload(
    filename: &str,
    content_type: Option<&str>,
    bytes: &[u8],
) -> Result<&'static str, ValidationError> {
    validate_file_type(filename)?;
    validate_mime_type(content_type)?;
    validate_file_size(bytes.len())?;
    if bytes.is_empty() {
        // Let the classifier report empty payloads uniformly.
        return Ok("image/jpeg");
    }
    sniff_mime_type(bytes)
}
