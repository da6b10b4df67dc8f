//! Classification rule management routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use grootboek_core::rules::{ClassificationRule, MatchType, NewRule};
use grootboek_shared::types::{BankTransactionId, CompanyId, RuleId};

use crate::AppState;
use crate::routes::error_response;

/// Creates the classification rule routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/companies/{company_id}/classification-rules",
            get(list_rules).post(create_rule),
        )
        .route(
            "/companies/{company_id}/classification-rules/{rule_id}/deactivate",
            post(deactivate_rule),
        )
        .route(
            "/transactions/{transaction_id}/rules",
            post(create_rule_from_transaction),
        )
}

/// Request body for deriving a rule from a transaction.
#[derive(Debug, Deserialize)]
pub struct RuleFromTransactionRequest {
    /// Ledger account the derived rule classifies into.
    pub account_code: String,
    /// Evaluation priority of the derived rule.
    pub priority: i32,
}

/// Response for a classification rule.
#[derive(Debug, Serialize)]
pub struct RuleResponse {
    /// Rule ID.
    pub id: RuleId,
    /// Human-readable rule name.
    pub rule_name: String,
    /// How the match value is compared.
    pub match_type: MatchType,
    /// The pattern to match.
    pub match_value: String,
    /// Ledger account the rule classifies into.
    pub account_code: String,
    /// Evaluation priority; higher priorities are evaluated first.
    pub priority: i32,
    /// Whether the rule participates in matching.
    pub active: bool,
    /// When the rule was created.
    pub created_at: DateTime<Utc>,
    /// When the rule was deactivated, if it has been.
    pub deactivated_at: Option<DateTime<Utc>>,
}

impl From<ClassificationRule> for RuleResponse {
    fn from(rule: ClassificationRule) -> Self {
        Self {
            id: rule.id,
            rule_name: rule.rule_name,
            match_type: rule.match_type,
            match_value: rule.match_value,
            account_code: rule.account_code,
            priority: rule.priority,
            active: rule.active,
            created_at: rule.created_at,
            deactivated_at: rule.deactivated_at,
        }
    }
}

/// GET `/companies/{company_id}/classification-rules` - List rules in
/// evaluation order, inactive ones included.
async fn list_rules(
    State(state): State<AppState>,
    Path(company_id): Path<CompanyId>,
) -> impl IntoResponse {
    let rules: Vec<RuleResponse> = state
        .store
        .list_rules(company_id)
        .into_iter()
        .map(RuleResponse::from)
        .collect();
    (StatusCode::OK, Json(json!({ "rules": rules }))).into_response()
}

/// POST `/companies/{company_id}/classification-rules` - Create a rule.
async fn create_rule(
    State(state): State<AppState>,
    Path(company_id): Path<CompanyId>,
    Json(payload): Json<NewRule>,
) -> impl IntoResponse {
    match state.store.create_rule(company_id, payload) {
        Ok(rule) => {
            info!(company_id = %company_id, rule_id = %rule.id, "Rule created via API");
            (StatusCode::CREATED, Json(RuleResponse::from(rule))).into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// POST `/companies/{company_id}/classification-rules/{rule_id}/deactivate`
/// - Deactivate a rule (idempotent).
async fn deactivate_rule(
    State(state): State<AppState>,
    Path((_company_id, rule_id)): Path<(CompanyId, RuleId)>,
) -> impl IntoResponse {
    match state.store.deactivate_rule(rule_id) {
        Ok(rule) => (StatusCode::OK, Json(RuleResponse::from(rule))).into_response(),
        Err(e) => error_response(&e),
    }
}

/// POST `/transactions/{transaction_id}/rules` - Derive a `Contains` rule
/// from an existing transaction's description.
async fn create_rule_from_transaction(
    State(state): State<AppState>,
    Path(transaction_id): Path<BankTransactionId>,
    Json(payload): Json<RuleFromTransactionRequest>,
) -> impl IntoResponse {
    match state.store.create_rule_from_transaction(
        transaction_id,
        &payload.account_code,
        payload.priority,
    ) {
        Ok(rule) => (StatusCode::CREATED, Json(RuleResponse::from(rule))).into_response(),
        Err(e) => error_response(&e),
    }
}
