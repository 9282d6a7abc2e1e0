// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Classification API endpoint module
//!
//! Provides POST /api/classification/classify,
//! GET /api/classification/results/:image_id and
//! GET /api/classification/history.

pub mod handler;
pub mod response;

pub use handler::{classify_handler, history_handler, results_handler};
pub use response::{ClassifyResponse, HistoryResponse, StoredResultResponse};
