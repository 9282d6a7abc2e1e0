// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod classifier;
pub mod config;
pub mod validation;

// Re-export the core contract types
pub use classifier::{
    ClassificationResult, ClassifierError, FallbackClassifier, Prediction, RemoteCallError,
    RemoteClassifier, UnifiedClassifier,
};
pub use config::{ClassifierConfig, ServerConfig};
