// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Classification core
//!
//! This module provides:
//! - A remote adapter for a hosted multimodal vision model
//! - A normalizer turning untrusted model text into strict predictions
//! - A local fallback classifier requiring no external calls
//! - A unified classifier orchestrating remote-with-fallback

pub mod fallback;
pub mod normalizer;
pub mod remote;
pub mod types;
pub mod unified;

pub use fallback::{FallbackClassifier, SIGN_CATALOG};
pub use normalizer::parse_predictions;
pub use remote::RemoteClassifier;
pub use types::{ClassificationResult, ClassifierError, Prediction, RemoteCallError};
pub use unified::UnifiedClassifier;
