// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Classification response envelopes

use serde::{Deserialize, Serialize};

use crate::classifier::{ClassificationResult, Prediction};

/// Response for a successful classification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyResponse {
    /// Top predicted sign name
    pub classification: String,
    /// Confidence of the top prediction
    pub confidence: f64,
    /// All predictions, sorted descending by confidence
    pub all_classes: Vec<Prediction>,
}

impl From<ClassificationResult> for ClassifyResponse {
    fn from(result: ClassificationResult) -> Self {
        Self {
            classification: result.classification,
            confidence: result.confidence,
            all_classes: result.all_classes,
        }
    }
}

/// Response for the history endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub history: Vec<ClassifyResponse>,
}

/// Response for a stored classification lookup
///
/// Placeholder until result persistence lands; served with fixed values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredResultResponse {
    pub image_id: String,
    pub classification: String,
    pub confidence: f64,
    pub status: String,
}
