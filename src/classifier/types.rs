// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Core prediction and result types shared by every classifier backend

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced by the classification core.
///
/// `EmptyInput` is the only variant the unified classifier lets reach the
/// caller; remote failures are absorbed into the fallback path.
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("image data is empty")]
    EmptyInput,

    #[error("remote classification failed: {0}")]
    Remote(#[from] RemoteCallError),
}

/// Failure modes of the remote classification path.
#[derive(Debug, Error)]
pub enum RemoteCallError {
    #[error("request to classification endpoint failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("classification endpoint returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("response envelope missing candidates")]
    MissingCandidates,

    #[error("no usable predictions in model output")]
    NoPredictions,
}

/// A single label/confidence pair.
///
/// Serialized with the `sign` key for the label to match the service's wire
/// format for road-sign results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    #[serde(rename = "sign")]
    pub label: String,
    pub confidence: f64,
}

/// Ranked classification output.
///
/// Invariants: `all_classes` is non-empty and sorted descending by
/// confidence (stable for ties); `classification` and `confidence` mirror
/// the head entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub classification: String,
    pub confidence: f64,
    pub all_classes: Vec<Prediction>,
}

impl ClassificationResult {
    /// Build a result from an unordered prediction list.
    ///
    /// Sorts descending by confidence (stable, so ties keep source order)
    /// and mirrors the top entry into `classification`/`confidence`.
    /// Returns `None` when the list is empty.
    pub fn from_predictions(mut predictions: Vec<Prediction>) -> Option<Self> {
        if predictions.is_empty() {
            return None;
        }

        // Confidences are always finite here (the normalizer and fallback
        // both clamp), so partial_cmp only falls back on exact ties.
        predictions.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let top = predictions[0].clone();
        Some(Self {
            classification: top.label,
            confidence: top.confidence,
            all_classes: predictions,
        })
    }
}

/// Round a confidence to 3 decimal places.
pub(crate) fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
