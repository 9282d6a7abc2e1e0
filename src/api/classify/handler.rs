// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Classification endpoint handlers

use axum::extract::{Path, State};
use axum::Json;
use axum_extra::extract::Multipart;
use tracing::info;

use super::response::{ClassifyResponse, HistoryResponse, StoredResultResponse};
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::classifier::ClassifierError;
use crate::validation::validate_upload;

/// POST /api/classification/classify - Classify an uploaded road sign image
///
/// Accepts a multipart form with a `file` field, runs the validation gate
/// and returns ranked predictions.
pub async fn classify_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ClassifyResponse>, ApiError> {
    let upload = read_file_field(multipart).await?;

    let mime_type = validate_upload(&upload.filename, upload.content_type.as_deref(), &upload.bytes)
        .map_err(|e| ApiError::ValidationError {
            field: "file".to_string(),
            message: e.to_string(),
        })?;

    info!(
        "Classifying upload: filename={}, size={} bytes, mime={}",
        upload.filename,
        upload.bytes.len(),
        mime_type
    );

    let result = state
        .classifier
        .classify(&upload.bytes, Some(mime_type))
        .await
        .map_err(|e| match e {
            ClassifierError::EmptyInput => {
                ApiError::InvalidRequest("Image data is empty".to_string())
            }
            // The unified classifier absorbs remote failures; reaching this
            // arm means a bug, not a bad upload.
            ClassifierError::Remote(cause) => ApiError::InternalError(cause.to_string()),
        })?;

    Ok(Json(ClassifyResponse::from(result)))
}

/// GET /api/classification/results/:image_id - Stored classification lookup
///
/// Placeholder until result persistence lands; echoes the requested id with
/// fixed values.
pub async fn results_handler(Path(image_id): Path<String>) -> Json<StoredResultResponse> {
    Json(StoredResultResponse {
        image_id,
        classification: "Speed Limit 60".to_string(),
        confidence: 0.95,
        status: "completed".to_string(),
    })
}

/// GET /api/classification/history - Classification history
///
/// Stub until result persistence lands; always returns an empty list.
pub async fn history_handler(State(state): State<AppState>) -> Json<HistoryResponse> {
    let history = state
        .classifier
        .history()
        .into_iter()
        .map(ClassifyResponse::from)
        .collect();
    Json(HistoryResponse { history })
}

/// An uploaded file pulled out of a multipart form.
pub(crate) struct UploadedFile {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Extract the `file` field from a multipart form.
pub(crate) async fn read_file_field(mut multipart: Multipart) -> Result<UploadedFile, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidRequest(format!("malformed multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::InvalidRequest(format!("failed to read upload: {}", e)))?;

        return Ok(UploadedFile {
            filename,
            content_type,
            bytes: bytes.to_vec(),
        });
    }

    Err(ApiError::ValidationError {
        field: "file".to_string(),
        message: "file is required".to_string(),
    })
}
