// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Upload API endpoint module
//!
//! Provides POST /api/upload and GET /api/upload/status.

pub mod handler;

pub use handler::{upload_handler, upload_status_handler, UploadResponse, UploadStatusResponse};
