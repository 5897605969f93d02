use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Severity level the model assigns to a vulnerability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

impl FromStr for Severity {
    type Err = String;

    /// Case-insensitive. Models sometimes answer "critical" or "moderate";
    /// those fold into the nearest level.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" | "critical" => Ok(Severity::High),
            "medium" | "moderate" => Ok(Severity::Medium),
            "low" | "info" | "informational" => Ok(Severity::Low),
            other => Err(format!("unknown severity '{}'", other)),
        }
    }
}

impl TryFrom<String> for Severity {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single weakness the model identified on the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vulnerability {
    #[serde(rename = "type")]
    pub vuln_type: String,
    #[serde(default)]
    pub description: String,
    pub severity: Severity,
    /// Where on the page (element, script, form) the issue lives.
    #[serde(default)]
    pub location: String,
}

/// Something sensitive the page exposes: tokens, PII, internal endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitiveAsset {
    #[serde(rename = "type")]
    pub asset_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_case_insensitive() {
        let parsed: Severity = serde_json::from_str("\"HIGH\"").unwrap();
        assert_eq!(parsed, Severity::High);
        let parsed: Severity = serde_json::from_str("\"Medium\"").unwrap();
        assert_eq!(parsed, Severity::Medium);
    }

    #[test]
    fn test_severity_folds_critical_into_high() {
        assert_eq!("critical".parse::<Severity>().unwrap(), Severity::High);
        assert_eq!("informational".parse::<Severity>().unwrap(), Severity::Low);
    }

    #[test]
    fn test_severity_rejects_unknown() {
        assert!(serde_json::from_str::<Severity>("\"catastrophic\"").is_err());
    }

    #[test]
    fn test_severity_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Severity::Low).unwrap(), "\"low\"");
    }

    #[test]
    fn test_vulnerability_uses_type_key() {
        let vuln: Vulnerability = serde_json::from_str(
            r##"{"type":"XSS","description":"reflected","severity":"high","location":"#search"}"##,
        )
        .unwrap();
        assert_eq!(vuln.vuln_type, "XSS");
        let back = serde_json::to_value(&vuln).unwrap();
        assert_eq!(back["type"], "XSS");
        assert_eq!(back["severity"], "high");
    }

    #[test]
    fn test_sensitive_asset_missing_location_defaults_empty() {
        let asset: SensitiveAsset =
            serde_json::from_str(r#"{"type":"API key","description":"inline key"}"#).unwrap();
        assert_eq!(asset.location, "");
    }
}
