//! Authentication and authorization for opsdesk
//!
//! Token-based authentication with role checks:
//!
//! - `users`: in-memory user accounts with argon2-hashed passwords
//! - `tokens`: opaque bearer tokens with an expiry, held in memory
//! - `guard`: the ordered guard chain (token check, then role check)
//!   evaluated before a handler body runs

pub mod guard;
pub mod tokens;
pub mod users;

pub use guard::{authorize, AuthUser, GuardError};
pub use tokens::{Session, SessionStore};
pub use users::{Role, UserAccount, UserStore};
