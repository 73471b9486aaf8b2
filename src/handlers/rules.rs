// Rule table introspection
// GET /rules exposes the active rule order, weights and keyword list

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    app::AppState,
    services::heuristics::{Verdict, MAX_RISK_SCORE, SUSPICIOUS_KEYWORDS},
};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RuleSummary {
    /// 1-based evaluation order
    pub order: usize,
    pub id: String,
    pub description: String,
    pub weight: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VerdictThresholds {
    /// Scores above this are at least Suspicious
    pub suspicious_above: u8,
    /// Scores above this are Dangerous
    pub dangerous_above: u8,
    pub max_score: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RuleTableResponse {
    pub rules: Vec<RuleSummary>,
    pub suspicious_keywords: Vec<String>,
    pub thresholds: VerdictThresholds,
}

#[utoipa::path(
    get,
    path = "/rules",
    tag = "Scan",
    operation_id = "listRules",
    responses((status = 200, description = "Active rule table", body = RuleTableResponse))
)]
pub async fn list_rules(State(state): State<AppState>) -> Json<RuleTableResponse> {
    let rules = state
        .detector
        .rules()
        .iter()
        .enumerate()
        .map(|(idx, rule)| RuleSummary {
            order: idx + 1,
            id: rule.id().to_string(),
            description: rule.description().to_string(),
            weight: rule.weight(),
        })
        .collect();

    Json(RuleTableResponse {
        rules,
        suspicious_keywords: SUSPICIOUS_KEYWORDS.iter().map(|k| k.to_string()).collect(),
        thresholds: VerdictThresholds {
            suspicious_above: Verdict::SUSPICIOUS_ABOVE,
            dangerous_above: Verdict::DANGEROUS_ABOVE,
            max_score: MAX_RISK_SCORE,
        },
    })
}
