//! In-memory user store
//!
//! Holds the demo user accounts with argon2-hashed passwords. This stands in
//! for a real user database; the account set is fixed at startup.

use std::collections::HashMap;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use serde::{Deserialize, Serialize};

use crate::error::{OpsdeskError, OpsdeskResult};

/// User role, checked by the authorization guard chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access, including finance and backup operations
    Admin,
    /// Sales staff
    Sales,
    /// Field technician
    Technician,
}

/// One user account
#[derive(Debug, Clone)]
pub struct UserAccount {
    /// Login name
    pub username: String,
    /// Human-readable display name
    pub display_name: String,
    /// Role granted to this account
    pub role: Role,
    /// Argon2 PHC-format password hash
    password_hash: String,
}

/// In-memory user store keyed by username
#[derive(Debug, Default)]
pub struct UserStore {
    users: HashMap<String, UserAccount>,
}

impl UserStore {
    /// Create an empty user store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with the demo accounts
    pub fn with_demo_users() -> OpsdeskResult<Self> {
        let mut store = Self::new();
        store.add_user("admin", "Administrator", Role::Admin, "admin123")?;
        store.add_user("sales", "Sales User", Role::Sales, "sales123")?;
        store.add_user("technician", "Installation Technician", Role::Technician, "tech123")?;
        Ok(store)
    }

    /// Add a user, hashing the password
    pub fn add_user(
        &mut self,
        username: &str,
        display_name: &str,
        role: Role,
        password: &str,
    ) -> OpsdeskResult<()> {
        let password_hash = hash_password(password)?;
        self.users.insert(
            username.to_string(),
            UserAccount {
                username: username.to_string(),
                display_name: display_name.to_string(),
                role,
                password_hash,
            },
        );
        Ok(())
    }

    /// Authenticate a username/password pair
    ///
    /// Returns the account on success, `None` for an unknown user or a wrong
    /// password (indistinguishable to the caller).
    pub fn authenticate(&self, username: &str, password: &str) -> Option<&UserAccount> {
        let account = self.users.get(username)?;
        if verify_password(password, &account.password_hash) {
            Some(account)
        } else {
            None
        }
    }
}

/// Hash a password with argon2 and a random salt
fn hash_password(password: &str) -> OpsdeskResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| OpsdeskError::Auth(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored PHC-format hash
fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
