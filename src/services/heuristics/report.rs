// Risk report types returned by the heuristic detector

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

pub const MAX_RISK_SCORE: u8 = 100;

/// Message carried by every failed scan
pub const INVALID_URL_FORMAT: &str = "Invalid URL format";

// =============================================================================
// VERDICT
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Verdict {
    Safe,       // 0-30
    Suspicious, // 31-70
    Dangerous,  // 71-100
}

impl Verdict {
    /// Scores strictly above this are dangerous
    pub const DANGEROUS_ABOVE: u8 = 70;
    /// Scores strictly above this are at least suspicious
    pub const SUSPICIOUS_ABOVE: u8 = 30;

    /// Classify an already capped score
    pub fn from_score(score: u8) -> Self {
        if score > Self::DANGEROUS_ABOVE {
            Verdict::Dangerous
        } else if score > Self::SUSPICIOUS_ABOVE {
            Verdict::Suspicious
        } else {
            Verdict::Safe
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Safe => write!(f, "Safe"),
            Verdict::Suspicious => write!(f, "Suspicious"),
            Verdict::Dangerous => write!(f, "Dangerous"),
        }
    }
}

// =============================================================================
// REPORTS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "url": "http://192.168.1.55/login",
    "risk_score": 70,
    "verdict": "Suspicious",
    "flags": [
        "URL uses raw IP address",
        "Suspicious keywords found: ['login']"
    ]
}))]
pub struct RiskReport {
    /// URL after scheme normalization
    pub url: String,
    /// 0-100, higher is more dangerous
    pub risk_score: u8,
    pub verdict: Verdict,
    /// One entry per triggered rule, in rule order
    pub flags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({ "error": "Invalid URL format" }))]
pub struct ScanFailure {
    pub error: String,
}

impl ScanFailure {
    pub fn invalid_format() -> Self {
        Self {
            error: INVALID_URL_FORMAT.to_string(),
        }
    }
}

/// Result of a single scan: either a full report or an error-shaped body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum ScanOutcome {
    Report(RiskReport),
    Failed(ScanFailure),
}

impl ScanOutcome {
    pub fn report(&self) -> Option<&RiskReport> {
        match self {
            ScanOutcome::Report(report) => Some(report),
            ScanOutcome::Failed(_) => None,
        }
    }

    pub fn into_report(self) -> Option<RiskReport> {
        match self {
            ScanOutcome::Report(report) => Some(report),
            ScanOutcome::Failed(_) => None,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ScanOutcome::Failed(_))
    }
}
