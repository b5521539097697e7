//! opsdesk - small business-management backend
//!
//! A backend for a small workshop business: work orders, quotes, a financial
//! ledger, and dashboard KPIs, exposed over CRUD-style HTTP endpoints with
//! token-based authentication and role checks. The three datasets live in
//! memory; a backup engine snapshots them to disk, restores them on demand,
//! and sweeps old snapshots on a weekly schedule.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: path resolution and server settings
//! - `error`: custom error types
//! - `store`: the three in-memory datasets behind one lock
//! - `backup`: snapshot writer, catalog, restore engine, retention sweeper,
//!   and the recurring backup scheduler
//! - `auth`: user accounts, session tokens, and the authorization guard chain
//! - `reports`: dashboard KPIs and financial reports
//! - `api`: axum HTTP handlers and the router
//! - `context`: the shared application context wiring it all together

pub mod api;
pub mod auth;
pub mod backup;
pub mod config;
pub mod context;
pub mod error;
pub mod reports;
pub mod store;

pub use context::AppContext;
pub use error::{OpsdeskError, OpsdeskResult};
