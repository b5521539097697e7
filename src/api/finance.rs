//! Financial ledger endpoints

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde_json::json;

use crate::auth::{authorize, Role};
use crate::context::AppContext;
use crate::reports::{self, CashFlow, RevenueReport};
use crate::store::{str_field, Datasets, Record};

use super::ApiResult;

/// GET /api/finance/payables - admin only
pub async fn payables(
    State(ctx): State<AppContext>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<Record>>> {
    authorize(&ctx.sessions, &headers, Some(Role::Admin))?;
    Ok(Json(entries_of_kind(&ctx, "payable")))
}

/// GET /api/finance/receivables - any authenticated user
pub async fn receivables(
    State(ctx): State<AppContext>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<Record>>> {
    authorize(&ctx.sessions, &headers, None)?;
    Ok(Json(entries_of_kind(&ctx, "receivable")))
}

/// POST /api/finance/entries - admin only
pub async fn create_entry(
    State(ctx): State<AppContext>,
    headers: HeaderMap,
    Json(mut record): Json<Record>,
) -> ApiResult<(StatusCode, Json<Record>)> {
    let user = authorize(&ctx.sessions, &headers, Some(Role::Admin))?;

    let mut data = ctx.datasets();
    record.insert("id".into(), json!(Datasets::next_id(&data.ledger_entries)));
    record.insert("created_by".into(), json!(user.username));
    data.ledger_entries.push(record.clone());

    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/finance/cash-flow - admin only
pub async fn cash_flow(
    State(ctx): State<AppContext>,
    headers: HeaderMap,
) -> ApiResult<Json<CashFlow>> {
    authorize(&ctx.sessions, &headers, Some(Role::Admin))?;
    Ok(Json(reports::cash_flow(&ctx.datasets().ledger_entries)))
}

/// GET /api/finance/reports - admin only
pub async fn revenue(
    State(ctx): State<AppContext>,
    headers: HeaderMap,
) -> ApiResult<Json<RevenueReport>> {
    authorize(&ctx.sessions, &headers, Some(Role::Admin))?;
    Ok(Json(reports::revenue_report(&ctx.datasets().ledger_entries)))
}

/// Clone the ledger entries matching a kind
fn entries_of_kind(ctx: &AppContext, kind: &str) -> Vec<Record> {
    ctx.datasets()
        .ledger_entries
        .iter()
        .filter(|l| str_field(l, "kind") == Some(kind))
        .cloned()
        .collect()
}
