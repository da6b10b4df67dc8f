//! Transaction classification routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use grootboek_core::journal::SplitLine;
use grootboek_shared::AppError;
use grootboek_shared::types::{BankTransactionId, CompanyId, FiscalPeriodId, Money, UserId};

use crate::AppState;
use crate::routes::error_response;
use crate::routes::journal::JournalEntryResponse;

/// Creates the transaction routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/companies/{company_id}/fiscal-periods/{period_id}/transactions/unclassified",
            get(list_unclassified),
        )
        .route("/transactions/{transaction_id}/classify", post(classify))
        .route("/companies/{company_id}/auto-classify", post(auto_classify))
}

/// One split line in a classify request.
#[derive(Debug, Deserialize)]
pub struct SplitRequest {
    /// Ledger account for this portion.
    pub account_code: String,
    /// Portion of the transaction amount.
    pub amount: Decimal,
    /// Optional line description; defaults to the transaction description.
    pub description: Option<String>,
}

/// Request body for classifying a transaction.
///
/// Supplies either `account_code` (simple two-line entry) or `splits`
/// (one line per split plus the bank line).
#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    /// Ledger account for a simple classification.
    pub account_code: Option<String>,
    /// Pre-split lines; must sum exactly to the transaction amount.
    pub splits: Option<Vec<SplitRequest>>,
    /// The company's designated bank/clearing account.
    pub bank_account_code: String,
    /// Acting user; defaults to the system user.
    pub created_by: Option<UserId>,
    /// Caller-supplied entry reference; defaults to the next "JE-{n}".
    pub reference: Option<String>,
}

/// Request body for an auto-classification run.
#[derive(Debug, Deserialize)]
pub struct AutoClassifyRequest {
    /// The company's designated bank/clearing account.
    pub bank_account_code: String,
    /// Acting user; defaults to the system user.
    pub created_by: Option<UserId>,
}

/// Response for an unclassified transaction with its suggestion.
#[derive(Debug, Serialize)]
pub struct UnclassifiedResponse {
    /// Transaction ID.
    pub id: BankTransactionId,
    /// Transaction date.
    pub date: chrono::NaiveDate,
    /// Statement description.
    pub description: String,
    /// Amount of money that left the bank account.
    pub debit_amount: Money,
    /// Amount of money that arrived in the bank account.
    pub credit_amount: Money,
    /// The classifier's suggestion, if a rule matched.
    pub suggestion: Option<SuggestionResponse>,
}

/// Response for a classification suggestion.
#[derive(Debug, Serialize)]
pub struct SuggestionResponse {
    /// Suggested ledger account.
    pub account_code: String,
    /// Suggested account's name.
    pub account_name: String,
    /// Confidence in [0, 1].
    pub confidence: Decimal,
}

/// GET `/companies/{company_id}/fiscal-periods/{period_id}/transactions/unclassified`
/// - List a period's unclassified transactions with suggestions.
async fn list_unclassified(
    State(state): State<AppState>,
    Path((company_id, period_id)): Path<(CompanyId, FiscalPeriodId)>,
) -> impl IntoResponse {
    let transactions: Vec<UnclassifiedResponse> = state
        .store
        .unclassified_transactions(company_id, period_id)
        .into_iter()
        .map(|(tx, suggestion)| UnclassifiedResponse {
            id: tx.id,
            date: tx.date,
            description: tx.description,
            debit_amount: tx.debit_amount,
            credit_amount: tx.credit_amount,
            suggestion: suggestion.map(|s| SuggestionResponse {
                account_code: s.account_code,
                account_name: s.account_name,
                confidence: s.confidence,
            }),
        })
        .collect();
    (
        StatusCode::OK,
        Json(json!({ "transactions": transactions })),
    )
        .into_response()
}

/// POST `/transactions/{transaction_id}/classify` - Classify a transaction
/// and post the resulting journal entry.
async fn classify(
    State(state): State<AppState>,
    Path(transaction_id): Path<BankTransactionId>,
    Json(payload): Json<ClassifyRequest>,
) -> impl IntoResponse {
    let result = match (payload.account_code, payload.splits) {
        (Some(account_code), None) => state.store.classify_transaction(
            transaction_id,
            &account_code,
            &payload.bank_account_code,
            payload.created_by,
            payload.reference,
        ),
        (None, Some(splits)) => {
            let splits: Vec<SplitLine> = splits
                .into_iter()
                .map(|s| SplitLine {
                    account_code: s.account_code,
                    amount: Money::new(s.amount),
                    description: s.description,
                })
                .collect();
            state.store.classify_transaction_split(
                transaction_id,
                &splits,
                &payload.bank_account_code,
                payload.created_by,
                payload.reference,
            )
        }
        _ => Err(AppError::Validation(
            "supply exactly one of account_code and splits".to_string(),
        )
        .into()),
    };

    match result {
        Ok(entry) => {
            info!(
                transaction_id = %transaction_id,
                entry_id = %entry.id,
                "Transaction classified via API"
            );
            (StatusCode::CREATED, Json(JournalEntryResponse::from(entry))).into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// POST `/companies/{company_id}/auto-classify` - Run a bulk
/// auto-classification pass; returns one result row per transaction.
async fn auto_classify(
    State(state): State<AppState>,
    Path(company_id): Path<CompanyId>,
    Json(payload): Json<AutoClassifyRequest>,
) -> impl IntoResponse {
    let max_batch_size = state.config.batch.max_batch_size;
    match state.store.auto_classify(
        company_id,
        &payload.bank_account_code,
        payload.created_by,
        max_batch_size,
    ) {
        Ok(results) => (StatusCode::OK, Json(json!({ "results": results }))).into_response(),
        Err(e) => error_response(&e),
    }
}
