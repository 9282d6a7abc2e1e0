// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Orchestration over the remote and fallback classification backends
//!
//! Remote availability is decided once at construction from credential
//! presence, never per call. Remote failures are a degradation, not a
//! fault: they are logged and absorbed into the fallback path, so the only
//! error a caller can see is an empty payload.

use tracing::{info, warn};

use super::fallback::FallbackClassifier;
use super::remote::RemoteClassifier;
use super::types::{ClassificationResult, ClassifierError};
use crate::config::ClassifierConfig;

pub struct UnifiedClassifier {
    remote: Option<RemoteClassifier>,
    fallback: FallbackClassifier,
}

impl UnifiedClassifier {
    /// Build the classifier from process configuration.
    pub fn new(config: &ClassifierConfig) -> anyhow::Result<Self> {
        let remote = RemoteClassifier::from_config(config)?;
        if remote.is_none() {
            info!("No API credential configured; running in fallback-only mode");
        }

        Ok(Self {
            remote,
            fallback: FallbackClassifier::new(),
        })
    }

    /// Classify an image, preferring the remote model.
    ///
    /// Fails only with `ClassifierError::EmptyInput`.
    pub async fn classify(
        &self,
        image_data: &[u8],
        mime_type: Option<&str>,
    ) -> Result<ClassificationResult, ClassifierError> {
        if image_data.is_empty() {
            return Err(ClassifierError::EmptyInput);
        }

        if let Some(remote) = &self.remote {
            match remote.classify(image_data, mime_type).await {
                Ok(result) => return Ok(result),
                Err(ClassifierError::EmptyInput) => {
                    return Err(ClassifierError::EmptyInput);
                }
                Err(ClassifierError::Remote(cause)) => {
                    warn!(
                        "Remote classification failed, falling back to local classifier: {}",
                        cause
                    );
                }
            }
        }

        self.fallback.classify(image_data)
    }

    /// Whether the remote path is configured.
    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    /// Classification history.
    ///
    /// Extension point for future persistence; always empty today.
    pub fn history(&self) -> Vec<ClassificationResult> {
        Vec::new()
    }
}
