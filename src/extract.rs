//! Recovers a structured verdict from free-form model output.
//!
//! Models wrap their JSON in prose or markdown fences, drop sections, and
//! emit numbers as strings. The extractor slices from the first `{` to the
//! last `}`, decodes that span, and then reads each field leniently. Failure
//! is all-or-nothing: callers never see a partially filled result.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{AnalysisResult, SensitiveAsset, Vulnerability};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtractionError {
    #[error("No JSON object found in response")]
    NoJsonFound,

    #[error("Failed to parse AI response: {0}")]
    MalformedJson(String),

    #[error("Invalid confidence score: {0}")]
    InvalidConfidenceScore(String),
}

/// Fields the model is responsible for. The adapter adds `model_used`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExtractedAnalysis {
    pub vulnerabilities: Vec<Vulnerability>,
    pub sensitive_assets: Vec<SensitiveAsset>,
    pub recommendations: Vec<String>,
    pub confidence_score: f64,
}

pub type ExtractionOutcome = Result<ExtractedAnalysis, ExtractionError>;

impl ExtractedAnalysis {
    pub fn into_result(self, model_used: &str) -> AnalysisResult {
        AnalysisResult::success(
            self.vulnerabilities,
            self.sensitive_assets,
            self.recommendations,
            self.confidence_score,
            model_used,
        )
    }
}

/// Fold an extraction outcome into the caller-facing result shape.
pub fn into_analysis_result(outcome: ExtractionOutcome, model_used: &str) -> AnalysisResult {
    match outcome {
        Ok(analysis) => analysis.into_result(model_used),
        Err(e) => AnalysisResult::failure(model_used, e.to_string()),
    }
}

pub fn extract(raw_text: &str) -> ExtractionOutcome {
    let (start, end) = match (raw_text.find('{'), raw_text.rfind('}')) {
        (Some(start), Some(end)) => (start, end),
        _ => {
            warn!(response_len = raw_text.len(), "No JSON object in model response");
            return Err(ExtractionError::NoJsonFound);
        }
    };

    // A '}' before the first '{' leaves nothing to decode.
    let candidate = if start <= end { &raw_text[start..=end] } else { "" };
    debug!(start, end, candidate_len = candidate.len(), "Extracted JSON candidate");

    let parsed: Value = serde_json::from_str(candidate).map_err(|e| {
        warn!(error = %e, response_len = raw_text.len(), "Model response is not valid JSON");
        ExtractionError::MalformedJson(e.to_string())
    })?;

    let obj = parsed
        .as_object()
        .ok_or_else(|| ExtractionError::MalformedJson("top-level value is not an object".into()))?;

    let confidence_score = coerce_confidence(obj.get("confidence_score"))?;

    Ok(ExtractedAnalysis {
        vulnerabilities: read_list(obj, "vulnerabilities"),
        sensitive_assets: read_list(obj, "sensitive_assets"),
        recommendations: read_recommendations(obj),
        confidence_score,
    })
}

/// Missing or non-list fields read as empty. Entries that don't fit the
/// expected shape are dropped one by one.
fn read_list<T: DeserializeOwned>(obj: &Map<String, Value>, field: &str) -> Vec<T> {
    let Some(value) = obj.get(field) else {
        return Vec::new();
    };
    let Some(items) = value.as_array() else {
        debug!(field, "Field is not a list, treating as empty");
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match serde_json::from_value::<T>(item.clone()) {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!(field, error = %e, "Skipping malformed entry");
                None
            }
        })
        .collect()
}

fn read_recommendations(obj: &Map<String, Value>) -> Vec<String> {
    match obj.get("recommendations") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}

/// Absent or null reads as 0.0. Numbers and numeric strings are accepted and
/// clamped into [0, 1]; anything else is an error.
fn coerce_confidence(value: Option<&Value>) -> Result<f64, ExtractionError> {
    let score = match value {
        None | Some(Value::Null) => return Ok(0.0),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };

    match score {
        Some(score) if score.is_finite() => Ok(score.clamp(0.0, 1.0)),
        _ => Err(ExtractionError::InvalidConfidenceScore(
            value.map(|v| v.to_string()).unwrap_or_default(),
        )),
    }
}
