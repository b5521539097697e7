//! Work order endpoints (projects module)

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::Local;
use serde_json::json;

use crate::auth::{authorize, Role};
use crate::context::AppContext;
use crate::error::OpsdeskError;
use crate::store::{id_field, str_field, Datasets, Record};

use super::{ApiError, ApiResult};

/// GET /api/projects - any authenticated user
pub async fn list(
    State(ctx): State<AppContext>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<Record>>> {
    let user = authorize(&ctx.sessions, &headers, None)?;
    tracing::debug!(user = %user.username, "listing work orders");

    Ok(Json(ctx.datasets().work_orders.clone()))
}

/// POST /api/projects - admin only
pub async fn create(
    State(ctx): State<AppContext>,
    headers: HeaderMap,
    Json(mut record): Json<Record>,
) -> ApiResult<(StatusCode, Json<Record>)> {
    let user = authorize(&ctx.sessions, &headers, Some(Role::Admin))?;

    let mut data = ctx.datasets();
    record.insert("id".into(), json!(Datasets::next_id(&data.work_orders)));
    record.insert(
        "created_date".into(),
        json!(Local::now().format("%Y-%m-%d").to_string()),
    );
    record.insert("created_by".into(), json!(user.username));
    data.work_orders.push(record.clone());

    Ok((StatusCode::CREATED, Json(record)))
}

/// PUT /api/projects/:id - admin, or the user who created the order
pub async fn update(
    State(ctx): State<AppContext>,
    Path(id): Path<u64>,
    headers: HeaderMap,
    Json(changes): Json<Record>,
) -> ApiResult<Json<Record>> {
    let user = authorize(&ctx.sessions, &headers, None)?;

    let mut data = ctx.datasets();
    let record = data
        .work_orders
        .iter_mut()
        .find(|r| id_field(r, "id") == Some(id))
        .ok_or_else(|| OpsdeskError::work_order_not_found(id.to_string()))?;

    let is_creator = str_field(record, "created_by") == Some(user.username.as_str());
    if !user.is_admin() && !is_creator {
        return Err(ApiError::forbidden("Permission denied"));
    }

    for (key, value) in changes {
        record.insert(key, value);
    }

    Ok(Json(record.clone()))
}
