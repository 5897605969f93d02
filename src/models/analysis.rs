use serde::{Deserialize, Serialize};

use super::finding::{SensitiveAsset, Vulnerability};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisStatus {
    Success,
    Error,
}

/// The one shape every provider returns, whatever backend produced it.
///
/// `status == Error` implies empty collections and a non-empty `error`;
/// `status == Success` implies `error` is `None`. Use [`AnalysisResult::success`]
/// and [`AnalysisResult::failure`] to build values that hold this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub vulnerabilities: Vec<Vulnerability>,
    pub sensitive_assets: Vec<SensitiveAsset>,
    pub recommendations: Vec<String>,
    pub confidence_score: f64,
    pub model_used: String,
    pub status: AnalysisStatus,
    pub error: Option<String>,
}

impl AnalysisResult {
    pub fn success(
        vulnerabilities: Vec<Vulnerability>,
        sensitive_assets: Vec<SensitiveAsset>,
        recommendations: Vec<String>,
        confidence_score: f64,
        model_used: &str,
    ) -> Self {
        Self {
            vulnerabilities,
            sensitive_assets,
            recommendations,
            confidence_score,
            model_used: model_used.to_string(),
            status: AnalysisStatus::Success,
            error: None,
        }
    }

    pub fn failure(model_used: &str, message: impl Into<String>) -> Self {
        let mut message = message.into();
        if message.trim().is_empty() {
            message = "Unknown error".to_string();
        }
        Self {
            vulnerabilities: Vec::new(),
            sensitive_assets: Vec::new(),
            recommendations: Vec::new(),
            confidence_score: 0.0,
            model_used: model_used.to_string(),
            status: AnalysisStatus::Error,
            error: Some(message),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == AnalysisStatus::Success
    }

    /// Checks the status/error/collections invariant.
    pub fn is_consistent(&self) -> bool {
        let in_range = (0.0..=1.0).contains(&self.confidence_score);
        match self.status {
            AnalysisStatus::Success => self.error.is_none() && in_range,
            AnalysisStatus::Error => {
                self.vulnerabilities.is_empty()
                    && self.sensitive_assets.is_empty()
                    && self.recommendations.is_empty()
                    && self.error.as_deref().is_some_and(|e| !e.is_empty())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::finding::Severity;

    fn sample_vuln() -> Vulnerability {
        Vulnerability {
            vuln_type: "CSRF".to_string(),
            description: "Login form has no token".to_string(),
            severity: Severity::Medium,
            location: "form#login".to_string(),
        }
    }

    #[test]
    fn test_failure_is_consistent() {
        let result = AnalysisResult::failure("mistral", "backend down");
        assert!(result.is_consistent());
        assert!(!result.is_success());
        assert_eq!(result.model_used, "mistral");
        assert_eq!(result.confidence_score, 0.0);
    }

    #[test]
    fn test_failure_with_empty_message_still_carries_error() {
        let result = AnalysisResult::failure("gpt-4", "   ");
        assert_eq!(result.error.as_deref(), Some("Unknown error"));
        assert!(result.is_consistent());
    }

    #[test]
    fn test_success_is_consistent() {
        let result = AnalysisResult::success(vec![sample_vuln()], vec![], vec!["Add CSRF tokens".into()], 0.8, "gpt-4");
        assert!(result.is_consistent());
        assert!(result.error.is_none());
    }

    #[test]
    fn test_error_with_findings_is_inconsistent() {
        let mut result = AnalysisResult::failure("gpt-4", "boom");
        result.vulnerabilities.push(sample_vuln());
        assert!(!result.is_consistent());
    }

    #[test]
    fn test_serialized_shape() {
        let result = AnalysisResult::failure("gemini-pro", "timeout");
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["status"], "error");
        assert_eq!(value["error"], "timeout");
        assert_eq!(value["model_used"], "gemini-pro");
        assert!(value["vulnerabilities"].as_array().unwrap().is_empty());

        let ok = AnalysisResult::success(vec![], vec![], vec![], 0.5, "gemini-pro");
        let value = serde_json::to_value(&ok).unwrap();
        assert_eq!(value["status"], "success");
        assert!(value["error"].is_null());
    }
}
