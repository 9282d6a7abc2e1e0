// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Remote classification adapter for a Gemini-style vision API

use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use tracing::{debug, info};

use super::normalizer::parse_predictions;
use super::types::{ClassificationResult, ClassifierError, RemoteCallError};
use crate::config::ClassifierConfig;

// --- generateContent serde structs ---

#[derive(serde::Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(serde::Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
enum Part {
    Text(String),
    InlineData(InlineData),
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(serde::Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
    #[serde(rename = "usageMetadata")]
    usage_metadata: Option<serde_json::Value>,
}

#[derive(serde::Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(serde::Deserialize)]
struct CandidateContent {
    parts: Option<Vec<CandidatePart>>,
}

#[derive(serde::Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

const CLASSIFY_PROMPT: &str = "You are a road sign classifier. Analyze the image and identify the road sign it shows. Respond with only a JSON object of the shape {\"predictions\": [{\"label\": string, \"confidence\": number}, ...]} containing 3 to 5 entries ordered by descending confidence. Confidence values must be numbers between 0 and 1. Do not include prose, explanations, or code fences.";

const DEFAULT_MIME_TYPE: &str = "image/jpeg";

/// Client for a hosted multimodal model speaking the `generateContent` wire
/// format.
pub struct RemoteClassifier {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl RemoteClassifier {
    /// Create a remote classifier from config.
    ///
    /// Returns `None` when no credential is configured; the remote path is
    /// then unavailable for the process lifetime.
    pub fn from_config(config: &ClassifierConfig) -> anyhow::Result<Option<Self>> {
        let Some(api_key) = config.api_key.clone() else {
            return Ok(None);
        };

        let client = Client::builder().timeout(config.timeout).build()?;
        let endpoint = config.endpoint.trim_end_matches('/').to_string();
        info!(
            "Remote classifier configured: endpoint={}, model={}",
            endpoint, config.model
        );

        Ok(Some(Self {
            client,
            endpoint,
            api_key,
            model: config.model.clone(),
        }))
    }

    /// Get the model identifier
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Classify an image via the remote model.
    ///
    /// `mime_type` defaults to `image/jpeg` when absent.
    pub async fn classify(
        &self,
        image_data: &[u8],
        mime_type: Option<&str>,
    ) -> Result<ClassificationResult, ClassifierError> {
        if image_data.is_empty() {
            return Err(ClassifierError::EmptyInput);
        }

        let mime_type = mime_type.unwrap_or(DEFAULT_MIME_TYPE);
        let request = build_request(image_data, mime_type);

        let url = format!(
            "{}/models/{}:generateContent",
            self.endpoint, self.model
        );
        debug!("Sending classification request: model={}", self.model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(RemoteCallError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteCallError::Status(status).into());
        }

        let envelope: GenerateResponse = response
            .json()
            .await
            .map_err(RemoteCallError::Transport)?;

        if let Some(usage) = &envelope.usage_metadata {
            debug!("Remote usage metadata: {}", usage);
        }

        let text = extract_candidate_text(&envelope)
            .ok_or(RemoteCallError::MissingCandidates)?;

        let predictions = parse_predictions(&text);
        ClassificationResult::from_predictions(predictions)
            .ok_or_else(|| RemoteCallError::NoPredictions.into())
    }
}

/// Build the single-turn request body: instruction prompt plus inline image.
fn build_request(image_data: &[u8], mime_type: &str) -> GenerateRequest {
    GenerateRequest {
        contents: vec![Content {
            role: "user".to_string(),
            parts: vec![
                Part::Text(CLASSIFY_PROMPT.to_string()),
                Part::InlineData(InlineData {
                    mime_type: mime_type.to_string(),
                    data: STANDARD.encode(image_data),
                }),
            ],
        }],
    }
}

/// Pull the first candidate's first text part out of the response envelope.
fn extract_candidate_text(envelope: &GenerateResponse) -> Option<String> {
    envelope
        .candidates
        .as_ref()?
        .first()?
        .content
        .as_ref()?
        .parts
        .as_ref()?
        .iter()
        .find_map(|part| part.text.clone())
}
