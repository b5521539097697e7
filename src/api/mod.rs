//! HTTP API for opsdesk
//!
//! Thin axum handlers over the stores, reports, and the backup engine. All
//! routes except `/` and `/api/login` run the authorization guard chain
//! before touching any data.

pub mod backup;
pub mod dashboard;
pub mod error;
pub mod finance;
pub mod login;
pub mod projects;

pub use error::{ApiError, ApiResult};

use axum::routing::{get, post, put};
use axum::Router;

use crate::context::AppContext;

/// Build the full application router
pub fn router(ctx: AppContext) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/api/login", post(login::login))
        .route("/api/projects", get(projects::list).post(projects::create))
        .route("/api/projects/:id", put(projects::update))
        .route("/api/finance/payables", get(finance::payables))
        .route("/api/finance/receivables", get(finance::receivables))
        .route("/api/finance/entries", post(finance::create_entry))
        .route("/api/finance/cash-flow", get(finance::cash_flow))
        .route("/api/finance/reports", get(finance::revenue))
        .route("/api/dashboard/kpis", get(dashboard::kpis))
        .route("/api/backup/create", post(backup::create))
        .route("/api/backup/list", get(backup::list))
        .route("/api/backup/restore/:name", post(backup::restore))
        .route("/api/backup/clean", post(backup::clean))
        .with_state(ctx)
}

/// Unauthenticated landing route
async fn home() -> &'static str {
    "opsdesk - integrated business management"
}
