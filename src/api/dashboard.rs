//! Dashboard endpoint

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use chrono::Local;

use crate::auth::authorize;
use crate::context::AppContext;
use crate::reports::{dashboard_kpis, DashboardKpis};

use super::ApiResult;

/// GET /api/dashboard/kpis - any authenticated user
pub async fn kpis(
    State(ctx): State<AppContext>,
    headers: HeaderMap,
) -> ApiResult<Json<DashboardKpis>> {
    let user = authorize(&ctx.sessions, &headers, None)?;
    tracing::debug!(user = %user.username, "computing dashboard KPIs");

    let kpis = dashboard_kpis(&ctx.datasets(), Local::now());
    Ok(Json(kpis))
}
