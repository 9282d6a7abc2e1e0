// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Normalizes untrusted model output text into a strict prediction list
//!
//! Vision models routinely wrap their JSON in code fences or prose despite
//! instructions not to. The parser here is permissive on structure (strict
//! parse first, then a greedy `{...}` substring recovery) but strict on the
//! values it hands upstream: every returned entry has a non-empty label and
//! a finite confidence clamped into [0, 1].

use serde_json::Value;

use super::types::{round3, Prediction};

/// Keys accepted for the label field, checked in order.
const LABEL_KEYS: &[&str] = &["label", "sign", "name"];

/// Parse raw model text into predictions, in source order.
///
/// Total function: any unparseable input yields an empty vec. Parse failure
/// is a data-quality condition the caller handles, not an error.
pub fn parse_predictions(raw_text: &str) -> Vec<Prediction> {
    let cleaned = strip_code_fences(raw_text.trim());
    if cleaned.is_empty() {
        return Vec::new();
    }

    let parsed: Option<Value> = match serde_json::from_str(cleaned) {
        Ok(value) => Some(value),
        Err(_) => extract_json_object(cleaned)
            .and_then(|span| serde_json::from_str(span).ok()),
    };

    let Some(value) = parsed else {
        return Vec::new();
    };

    let Some(entries) = value.get("predictions").and_then(Value::as_array) else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| {
            let label = LABEL_KEYS
                .iter()
                .find_map(|key| entry.get(*key).and_then(Value::as_str))
                .filter(|s| !s.is_empty())?;
            let confidence = coerce_confidence(entry.get("confidence")?)?;
            Some(Prediction {
                label: label.to_string(),
                confidence: round3(confidence.clamp(0.0, 1.0)),
            })
        })
        .collect()
}

/// Strip a wrapping triple-backtick fence, with or without a language tag.
fn strip_code_fences(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop the language tag line ("json", "JSON", or nothing).
    let body = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };
    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}

/// Greedy span from the first `{` to the last `}`, for JSON buried in prose.
fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Coerce a JSON value to a finite confidence, or drop the entry.
fn coerce_confidence(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    number.is_finite().then_some(number)
}
