use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use weali_core::{Source, Transaction, TransactionSummary};

use crate::error::{ApiError, Result};
use crate::service::{ServiceError, TransactionService, UploadOutcome};

pub type ServiceState = Arc<TransactionService>;

/// Listing size when `limit` is not given.
pub const DEFAULT_RECENT_LIMIT: usize = 50;

#[derive(Debug, Serialize)]
pub struct TransactionList {
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub source: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    pub limit: Option<usize>,
}

/// Runs a service call on the blocking pool; the store does file I/O.
async fn run_blocking<T, F>(service: ServiceState, f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce(&TransactionService) -> std::result::Result<T, ServiceError> + Send + 'static,
{
    Ok(tokio::task::spawn_blocking(move || f(&service)).await??)
}

/// GET /health
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// GET /api/transactions
/// All stored transactions in storage order, optionally for one source.
pub async fn list_transactions(
    State(service): State<ServiceState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<TransactionList>> {
    let source = query
        .source
        .map(|s| s.parse::<Source>().map_err(|_| ApiError::InvalidSource(s)))
        .transpose()?;

    let transactions = run_blocking(service, move |svc| match source {
        Some(source) => svc.transactions_by_source(source),
        None => svc.all_transactions(),
    })
    .await?;

    Ok(Json(TransactionList { transactions }))
}

/// GET /api/transactions/recent
pub async fn recent_transactions(
    State(service): State<ServiceState>,
    Query(query): Query<RecentQuery>,
) -> Result<Json<TransactionList>> {
    let limit = query.limit.unwrap_or(DEFAULT_RECENT_LIMIT);
    let transactions = run_blocking(service, move |svc| svc.recent_transactions(limit)).await?;
    Ok(Json(TransactionList { transactions }))
}

/// GET /api/summary
pub async fn summary(State(service): State<ServiceState>) -> Result<Json<TransactionSummary>> {
    let summary = run_blocking(service, |svc| svc.summary()).await?;
    Ok(Json(summary))
}

/// POST /api/upload/{source}
/// The request body is the raw CSV export.
pub async fn upload(
    State(service): State<ServiceState>,
    Path(source): Path<String>,
    body: String,
) -> Result<Json<UploadOutcome>> {
    let outcome =
        run_blocking(service, move |svc| svc.process_upload(&body, &source)).await?;
    Ok(Json(outcome))
}
