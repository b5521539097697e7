//! Backup endpoints - all admin only
//!
//! Thin wrappers over the backup engine; the engine's error policy decides
//! what propagates, these handlers only translate outcomes to statuses:
//! create and list surface engine failures as 500, restore distinguishes a
//! missing snapshot (404) from a failed restore (500), clean reports the
//! removed count.

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use serde_json::{json, Value};

use crate::auth::{authorize, Role};
use crate::backup::{
    clean_old_snapshots, create_snapshot, list_snapshots, restore_snapshot, CatalogEntry,
    SNAPSHOT_PREFIX,
};
use crate::context::AppContext;

use super::{ApiError, ApiResult};

/// POST /api/backup/create
pub async fn create(State(ctx): State<AppContext>, headers: HeaderMap) -> ApiResult<Json<Value>> {
    authorize(&ctx.sessions, &headers, Some(Role::Admin))?;

    let path = {
        let data = ctx.datasets();
        create_snapshot(&ctx.backup_root, &data)
            .map_err(|e| ApiError::internal(format!("Failed to create backup: {}", e)))?
    };

    Ok(Json(json!({
        "message": "Backup created successfully",
        "path": path,
    })))
}

/// GET /api/backup/list
pub async fn list(
    State(ctx): State<AppContext>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<CatalogEntry>>> {
    authorize(&ctx.sessions, &headers, Some(Role::Admin))?;

    let entries = list_snapshots(&ctx.backup_root)
        .map_err(|e| ApiError::internal(format!("Failed to list backups: {}", e)))?;

    Ok(Json(entries))
}

/// POST /api/backup/restore/:name
pub async fn restore(
    State(ctx): State<AppContext>,
    Path(name): Path<String>,
    headers: HeaderMap,
) -> ApiResult<Json<Value>> {
    authorize(&ctx.sessions, &headers, Some(Role::Admin))?;

    // Only plain snapshot directory names resolve; anything else is treated
    // as a snapshot that does not exist
    if !name.starts_with(SNAPSHOT_PREFIX) || name.contains(['/', '\\']) {
        return Err(ApiError::not_found("Backup not found"));
    }

    let snapshot_dir = ctx.backup_root.join(&name);
    if !snapshot_dir.exists() {
        return Err(ApiError::not_found("Backup not found"));
    }

    let restored = {
        let mut data = ctx.datasets();
        restore_snapshot(&snapshot_dir, &mut data)
    };

    if restored {
        Ok(Json(json!({ "message": "Backup restored successfully" })))
    } else {
        Err(ApiError::internal("Failed to restore backup"))
    }
}

/// POST /api/backup/clean
pub async fn clean(State(ctx): State<AppContext>, headers: HeaderMap) -> ApiResult<Json<Value>> {
    authorize(&ctx.sessions, &headers, Some(Role::Admin))?;

    let removed = clean_old_snapshots(&ctx.backup_root, ctx.settings.retention_days)
        .map_err(|e| ApiError::internal(format!("Failed to clean backups: {}", e)))?;

    Ok(Json(json!({
        "message": format!("{} old backups removed", removed),
        "removed": removed,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{OpsdeskPaths, Settings};
    use crate::store::Datasets;
    use axum::http::StatusCode;
    use tempfile::TempDir;

    fn test_ctx(temp: &TempDir) -> AppContext {
        let paths = OpsdeskPaths::with_base_dir(temp.path().to_path_buf());
        AppContext::new(&paths, Settings::default(), Datasets::with_sample_data()).unwrap()
    }

    fn admin_headers(ctx: &AppContext) -> HeaderMap {
        let account = ctx.users.authenticate("admin", "admin123").unwrap();
        let token = ctx.sessions.issue(account);
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::AUTHORIZATION,
            format!("Bearer {}", token).parse().unwrap(),
        );
        headers
    }

    #[tokio::test]
    async fn test_backup_routes_are_admin_only() {
        let temp = TempDir::new().unwrap();
        let ctx = test_ctx(&temp);

        let account = ctx.users.authenticate("sales", "sales123").unwrap();
        let token = ctx.sessions.issue(account);
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::AUTHORIZATION,
            format!("Bearer {}", token).parse().unwrap(),
        );

        let err = create(State(ctx), headers).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_create_then_list_then_restore() {
        let temp = TempDir::new().unwrap();
        let ctx = test_ctx(&temp);

        create(State(ctx.clone()), admin_headers(&ctx)).await.unwrap();

        let Json(entries) = list(State(ctx.clone()), admin_headers(&ctx)).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].metadata.work_orders, 2);

        // Wipe the live data, then restore it from the snapshot
        ctx.datasets().work_orders.clear();
        let name = entries[0].name.clone();
        restore(State(ctx.clone()), Path(name), admin_headers(&ctx))
            .await
            .unwrap();

        assert_eq!(ctx.datasets().work_orders.len(), 2);
    }

    #[tokio::test]
    async fn test_restore_unknown_snapshot_is_404() {
        let temp = TempDir::new().unwrap();
        let ctx = test_ctx(&temp);

        let err = restore(
            State(ctx.clone()),
            Path("backup_19990101_000000".into()),
            admin_headers(&ctx),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_restore_rejects_path_traversal_names() {
        let temp = TempDir::new().unwrap();
        let ctx = test_ctx(&temp);

        let err = restore(
            State(ctx.clone()),
            Path("../somewhere".into()),
            admin_headers(&ctx),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_clean_reports_zero_on_fresh_root() {
        let temp = TempDir::new().unwrap();
        let ctx = test_ctx(&temp);

        let Json(body) = clean(State(ctx.clone()), admin_headers(&ctx)).await.unwrap();
        assert_eq!(body["removed"], 0);
    }
}
