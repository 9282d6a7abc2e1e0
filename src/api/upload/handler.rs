// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Upload endpoint handlers
//!
//! The upload route only runs the validation gate and reports file
//! metadata; classification happens on the classification route.

use axum::Json;
use axum_extra::extract::Multipart;
use serde::{Deserialize, Serialize};

use crate::api::classify::handler::read_file_field;
use crate::api::errors::ApiError;
use crate::validation::validate_upload;

/// Response for a validated upload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub filename: String,
    pub size_bytes: usize,
    pub mime_type: String,
    pub message: String,
}

/// Response for the upload status endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadStatusResponse {
    pub status: String,
}

/// POST /api/upload - Validate a road sign image upload
pub async fn upload_handler(multipart: Multipart) -> Result<Json<UploadResponse>, ApiError> {
    let upload = read_file_field(multipart).await?;

    if upload.bytes.is_empty() {
        return Err(ApiError::InvalidRequest("Image data is empty".to_string()));
    }

    let mime_type = validate_upload(&upload.filename, upload.content_type.as_deref(), &upload.bytes)
        .map_err(|e| ApiError::ValidationError {
            field: "file".to_string(),
            message: e.to_string(),
        })?;

    Ok(Json(UploadResponse {
        filename: upload.filename,
        size_bytes: upload.bytes.len(),
        mime_type: mime_type.to_string(),
        message: "Upload accepted".to_string(),
    }))
}

/// GET /api/upload/status - Upload service status
pub async fn upload_status_handler() -> Json<UploadStatusResponse> {
    Json(UploadStatusResponse {
        status: "ready".to_string(),
    })
}
