// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Process configuration loaded once from environment variables

use std::env;
use std::time::Duration;

/// Default Gemini API base endpoint.
const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model used for classification requests.
const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Default outbound request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 45;

/// Configuration for the classification backends.
///
/// Read once at process start and immutable afterwards. A missing API key is
/// not an error: it selects fallback-only mode.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Base URL of the remote classification API
    pub endpoint: String,
    /// API credential; `None` disables the remote path
    pub api_key: Option<String>,
    /// Model identifier sent with each request
    pub model: String,
    /// Outbound request timeout
    pub timeout: Duration,
}

impl ClassifierConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            endpoint: env::var("GEMINI_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string())
                .trim_end_matches('/')
                .to_string(),
            api_key: env::var("GEMINI_API_KEY")
                .ok()
                .filter(|key| !key.is_empty()),
            model: env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            timeout: Duration::from_secs(
                env::var("CLASSIFY_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
        }
    }

    /// Whether the remote classification path is configured.
    pub fn has_remote(&self) -> bool {
        self.api_key.is_some()
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.endpoint.is_empty() {
            return Err("classification endpoint must not be empty".to_string());
        }
        if self.model.is_empty() {
            return Err("model identifier must not be empty".to_string());
        }
        if self.timeout.is_zero() {
            return Err("request timeout must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// HTTP server bind configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}
