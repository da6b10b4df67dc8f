//! Journal entry read routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use serde_json::json;

use grootboek_core::journal::{EntryStatus, JournalEntry, JournalLine};
use grootboek_shared::types::{
    CompanyId, FiscalPeriodId, JournalEntryId, Money, PageRequest, UserId,
};

use crate::AppState;
use crate::routes::error_response;

/// Creates the journal entry routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/journal-entries/{entry_id}", get(get_entry))
        .route(
            "/companies/{company_id}/fiscal-periods/{period_id}/journal-entries",
            get(list_entries),
        )
}

/// Response for one journal entry line.
#[derive(Debug, Serialize)]
pub struct JournalLineResponse {
    /// Ledger account code.
    pub account_code: String,
    /// Debit amount (zero when the line credits).
    pub debit: Money,
    /// Credit amount (zero when the line debits).
    pub credit: Money,
    /// Line description.
    pub description: String,
}

/// Response for a journal entry.
#[derive(Debug, Serialize)]
pub struct JournalEntryResponse {
    /// Entry ID.
    pub id: JournalEntryId,
    /// Unique per-company reference, e.g. "JE-42".
    pub reference: Option<String>,
    /// Entry date.
    pub entry_date: NaiveDate,
    /// Entry description.
    pub description: String,
    /// Lifecycle status.
    pub status: EntryStatus,
    /// Who created the entry.
    pub created_by: UserId,
    /// When the entry was created.
    pub created_at: DateTime<Utc>,
    /// Sum of the debit side.
    pub total_debits: Money,
    /// Sum of the credit side.
    pub total_credits: Money,
    /// The entry's lines.
    pub lines: Vec<JournalLineResponse>,
}

impl From<JournalEntry> for JournalEntryResponse {
    fn from(entry: JournalEntry) -> Self {
        Self {
            id: entry.id,
            reference: entry.reference.clone(),
            entry_date: entry.entry_date,
            description: entry.description.clone(),
            status: entry.status,
            created_by: entry.created_by,
            created_at: entry.created_at,
            total_debits: entry.total_debits(),
            total_credits: entry.total_credits(),
            lines: entry.lines.into_iter().map(line_response).collect(),
        }
    }
}

fn line_response(line: JournalLine) -> JournalLineResponse {
    JournalLineResponse {
        account_code: line.account_code,
        debit: line.debit,
        credit: line.credit,
        description: line.description,
    }
}

/// GET `/journal-entries/{entry_id}` - Fetch one posted entry.
async fn get_entry(
    State(state): State<AppState>,
    Path(entry_id): Path<JournalEntryId>,
) -> impl IntoResponse {
    match state.store.get_journal_entry(entry_id) {
        Ok(entry) => {
            (StatusCode::OK, Json(JournalEntryResponse::from(entry))).into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// GET `/companies/{company_id}/fiscal-periods/{period_id}/journal-entries`
/// - Page through a period's posted entries.
async fn list_entries(
    State(state): State<AppState>,
    Path((company_id, period_id)): Path<(CompanyId, FiscalPeriodId)>,
    Query(page): Query<PageRequest>,
) -> impl IntoResponse {
    match state.store.list_journal_entries(company_id, period_id, &page) {
        Ok(response) => {
            let items: Vec<JournalEntryResponse> = response
                .items
                .into_iter()
                .map(JournalEntryResponse::from)
                .collect();
            (
                StatusCode::OK,
                Json(json!({
                    "entries": items,
                    "total": response.total,
                    "page": response.page,
                    "per_page": response.per_page,
                    "total_pages": response.total_pages,
                })),
            )
                .into_response()
        }
        Err(e) => error_response(&e),
    }
}
