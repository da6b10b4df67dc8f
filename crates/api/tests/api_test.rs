//! HTTP-level tests against the full router.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::NaiveDate;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use grootboek_api::{AppState, create_router};
use grootboek_core::fiscal::{FiscalPeriod, FiscalPeriodStatus};
use grootboek_core::statement::BankTransaction;
use grootboek_shared::AppConfig;
use grootboek_shared::types::{BankTransactionId, CompanyId, FiscalPeriodId, Money};
use grootboek_store::Store;

struct TestApp {
    router: Router,
    company_id: CompanyId,
    period_id: FiscalPeriodId,
    store: Arc<Store>,
}

fn test_app() -> TestApp {
    let store = Arc::new(Store::new());
    let company_id = CompanyId::new();
    store.insert_account(company_id, "1100", "Bank").unwrap();
    store.insert_account(company_id, "8100", "Salaries").unwrap();
    let period = store.upsert_period(FiscalPeriod {
        id: FiscalPeriodId::new(),
        company_id,
        name: "June 2025".to_string(),
        start_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
        status: FiscalPeriodStatus::Open,
    });

    let state = AppState {
        store: store.clone(),
        config: Arc::new(AppConfig {
            server: grootboek_shared::config::ServerConfig::default(),
            batch: grootboek_shared::config::BatchConfig::default(),
        }),
    };
    TestApp {
        router: create_router(state),
        company_id,
        period_id: period.id,
        store,
    }
}

impl TestApp {
    fn salary_transaction(&self) -> BankTransactionId {
        self.store
            .insert_transaction(BankTransaction {
                id: BankTransactionId::new(),
                company_id: self.company_id,
                fiscal_period_id: self.period_id,
                date: NaiveDate::from_ymd_opt(2025, 6, 25).unwrap(),
                description: "FNB PMT SALARY J SMITH".to_string(),
                debit_amount: Money::from_cents(15_000_00),
                credit_amount: Money::ZERO,
                running_balance: None,
                classified_account_code: None,
            })
            .unwrap()
            .id
    }

    async fn request(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = match body {
            Some(body) => Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        };
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }
}

#[tokio::test]
async fn health_reports_healthy() {
    let app = test_app();
    let (status, body) = app.request("GET", "/api/v1/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn rule_lifecycle_over_http() {
    let app = test_app();
    let uri = format!("/api/v1/companies/{}/classification-rules", app.company_id);

    let (status, rule) = app
        .request(
            "POST",
            &uri,
            Some(json!({
                "rule_name": "Salaries",
                "match_type": "contains",
                "match_value": "SALARY",
                "account_code": "8100",
                "priority": 80
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(rule["active"], true);

    let (status, listing) = app.request("GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listing["rules"].as_array().unwrap().len(), 1);

    let deactivate = format!("{uri}/{}/deactivate", rule["id"].as_str().unwrap());
    let (status, deactivated) = app.request("POST", &deactivate, Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deactivated["active"], false);
}

#[rstest::rstest]
#[case("9999", "X", StatusCode::BAD_REQUEST, "UNKNOWN_ACCOUNT")]
#[case("8100", "   ", StatusCode::BAD_REQUEST, "VALIDATION_ERROR")]
#[tokio::test]
async fn bad_rule_payloads_are_rejected(
    #[case] account_code: &str,
    #[case] match_value: &str,
    #[case] expected_status: StatusCode,
    #[case] expected_error: &str,
) {
    let app = test_app();
    let uri = format!("/api/v1/companies/{}/classification-rules", app.company_id);
    let (status, body) = app
        .request(
            "POST",
            &uri,
            Some(json!({
                "rule_name": "Bad",
                "match_type": "contains",
                "match_value": match_value,
                "account_code": account_code,
                "priority": 1
            })),
        )
        .await;
    assert_eq!(status, expected_status);
    assert_eq!(body["error"], expected_error);
}

#[tokio::test]
async fn unclassified_listing_carries_the_suggestion() {
    let app = test_app();
    let rules_uri = format!("/api/v1/companies/{}/classification-rules", app.company_id);
    app.request(
        "POST",
        &rules_uri,
        Some(json!({
            "rule_name": "Salaries",
            "match_type": "contains",
            "match_value": "SALARY",
            "account_code": "8100",
            "priority": 80
        })),
    )
    .await;
    app.salary_transaction();

    let uri = format!(
        "/api/v1/companies/{}/fiscal-periods/{}/transactions/unclassified",
        app.company_id, app.period_id
    );
    let (status, body) = app.request("GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    let tx = &body["transactions"][0];
    assert_eq!(tx["suggestion"]["account_code"], "8100");
    assert_eq!(tx["suggestion"]["confidence"], "0.7");
}

#[tokio::test]
async fn classify_posts_a_balanced_entry() {
    let app = test_app();
    let tx_id = app.salary_transaction();

    let (status, entry) = app
        .request(
            "POST",
            &format!("/api/v1/transactions/{tx_id}/classify"),
            Some(json!({
                "account_code": "8100",
                "bank_account_code": "1100"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(entry["status"], "posted");
    assert_eq!(entry["reference"], "JE-1");
    assert_eq!(entry["lines"].as_array().unwrap().len(), 2);
    assert_eq!(entry["total_debits"], entry["total_credits"]);

    let entry_id = entry["id"].as_str().unwrap();
    let (status, fetched) = app
        .request("GET", &format!("/api/v1/journal-entries/{entry_id}"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["reference"], "JE-1");
}

#[tokio::test]
async fn classify_with_neither_account_nor_splits_is_rejected() {
    let app = test_app();
    let tx_id = app.salary_transaction();
    let (status, body) = app
        .request(
            "POST",
            &format!("/api/v1/transactions/{tx_id}/classify"),
            Some(json!({ "bank_account_code": "1100" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn auto_classify_returns_per_transaction_results() {
    let app = test_app();
    let rules_uri = format!("/api/v1/companies/{}/classification-rules", app.company_id);
    app.request(
        "POST",
        &rules_uri,
        Some(json!({
            "rule_name": "Salaries",
            "match_type": "contains",
            "match_value": "SALARY",
            "account_code": "8100",
            "priority": 80
        })),
    )
    .await;
    app.salary_transaction();

    let (status, body) = app
        .request(
            "POST",
            &format!("/api/v1/companies/{}/auto-classify", app.company_id),
            Some(json!({ "bank_account_code": "1100" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["outcome"]["status"], "classified");

    let list_uri = format!(
        "/api/v1/companies/{}/fiscal-periods/{}/journal-entries",
        app.company_id, app.period_id
    );
    let (status, page) = app.request("GET", &list_uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 1);
}

#[tokio::test]
async fn missing_journal_entry_is_404() {
    let app = test_app();
    let (status, body) = app
        .request(
            "GET",
            &format!(
                "/api/v1/journal-entries/{}",
                grootboek_shared::types::JournalEntryId::new()
            ),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");
}
