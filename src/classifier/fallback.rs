// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Local stand-in classifier used when the remote model is unavailable
//!
//! Produces predictions that are valid in shape, not learned: a sample of
//! the road-sign catalog with pseudo-random confidences that always form a
//! probability-like distribution summing to ~1.0 before rounding. The
//! confidences differ call to call; only the shape is deterministic.

use rand::seq::SliceRandom;
use rand::Rng;

use super::types::{round3, ClassificationResult, ClassifierError, Prediction};

/// Road-sign categories the fallback draws from.
pub const SIGN_CATALOG: &[&str] = &[
    "Speed Limit 20",
    "Speed Limit 30",
    "Speed Limit 40",
    "Speed Limit 50",
    "Speed Limit 60",
    "Speed Limit 70",
    "Speed Limit 80",
    "Stop",
    "Yield",
    "No Entry",
    "No Parking",
    "Roundabout",
    "Pedestrian Crossing",
    "School Zone",
    "Construction Ahead",
];

/// Number of predictions per result (or fewer if the catalog shrinks).
const NUM_PREDICTIONS: usize = 5;

/// Dependency-free fallback classifier.
///
/// Never fails for non-empty input and performs no I/O.
#[derive(Debug, Default)]
pub struct FallbackClassifier;

impl FallbackClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify an image locally.
    ///
    /// Fails only when `image_data` is empty.
    pub fn classify(&self, image_data: &[u8]) -> Result<ClassificationResult, ClassifierError> {
        if image_data.is_empty() {
            return Err(ClassifierError::EmptyInput);
        }

        let mut rng = rand::thread_rng();
        let count = NUM_PREDICTIONS.min(SIGN_CATALOG.len());
        let selected: Vec<&str> = SIGN_CATALOG
            .choose_multiple(&mut rng, count)
            .copied()
            .collect();

        let mut predictions = Vec::with_capacity(count);
        let mut remaining: f64 = 1.0;

        for (i, sign) in selected.iter().enumerate() {
            let confidence = if i == count - 1 {
                // Last label absorbs whatever share is left.
                remaining.max(0.0)
            } else {
                let upper = (remaining * 0.8).min(0.4);
                // Late draws can shrink the range below its 0.05 floor;
                // take the remaining share outright instead of sampling.
                let share = if upper <= 0.05 {
                    upper.max(0.0)
                } else {
                    rng.gen_range(0.05..upper)
                };
                remaining = (remaining - share).max(0.0);
                share
            };

            predictions.push(Prediction {
                label: sign.to_string(),
                confidence: round3(confidence),
            });
        }

        // Non-empty by construction: count >= 1 for a non-empty catalog.
        ClassificationResult::from_predictions(predictions)
            .ok_or(ClassifierError::EmptyInput)
    }
}
