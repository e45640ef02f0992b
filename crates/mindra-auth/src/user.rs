//! Accounts and the signed-in session user.

use std::collections::BTreeMap;

use mindra_core::store::{Store, keys};
use serde::{Deserialize, Serialize};

use crate::error::{AuthError, Result};

const DIGEST_PREFIX: &str = "blake3:";

/// The signed-in user, as persisted under the `user` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Normalized email.
    pub email: String,
    /// Display name.
    pub name: String,
}

/// A registered account, as persisted under the `users` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Normalized email.
    pub email: String,
    /// `blake3:<hex>` digest, or plaintext for records written before hashing.
    pub password: String,
    /// Display name.
    pub name: String,
}

impl UserRecord {
    fn verify(&self, password: &str) -> bool {
        match self.password.strip_prefix(DIGEST_PREFIX) {
            Some(_) => self.password == hash_password(password),
            None => self.password == password,
        }
    }

    fn session_user(&self) -> SessionUser {
        SessionUser {
            email: self.email.clone(),
            name: self.name.clone(),
        }
    }
}

type UserDirectory = BTreeMap<String, UserRecord>;

/// Trim and lowercase an email.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Digest a password for storage.
pub fn hash_password(password: &str) -> String {
    format!("{DIGEST_PREFIX}{}", blake3::hash(password.as_bytes()).to_hex())
}

fn display_name(email: &str) -> String {
    email.split('@').next().unwrap_or(email).to_string()
}

/// Registration, sign-in, and sign-out against the local store.
#[derive(Debug, Clone)]
pub struct AuthGate {
    store: Store,
}

impl AuthGate {
    /// Create a gate over `store`.
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// The signed-in user, if any.
    pub fn current_user(&self) -> Option<SessionUser> {
        self.store.load(keys::USER)
    }

    /// Create an account and sign it in.
    pub fn register(&self, email: &str, password: &str) -> Result<SessionUser> {
        let email = credentials(email, password)?;
        let mut users = self.users();
        if users.contains_key(&email) {
            return Err(AuthError::AccountExists(email));
        }

        let record = UserRecord {
            name: display_name(&email),
            password: hash_password(password),
            email: email.clone(),
        };
        let user = record.session_user();
        users.insert(email, record);
        self.store.set(keys::USERS, &users)?;
        self.sign_in(&user)?;

        log::info!("Registered {}", user.email);
        Ok(user)
    }

    /// Sign in with an existing account.
    pub fn login(&self, email: &str, password: &str) -> Result<SessionUser> {
        let email = credentials(email, password)?;
        let user = self
            .users()
            .get(&email)
            .filter(|record| record.verify(password))
            .map(UserRecord::session_user)
            .ok_or(AuthError::InvalidCredentials)?;
        self.sign_in(&user)?;

        log::info!("Signed in {}", user.email);
        Ok(user)
    }

    /// Sign out. Signing out while signed out is a no-op.
    pub fn logout(&self) -> Result<()> {
        self.store.remove(keys::USER)?;
        log::info!("Signed out");
        Ok(())
    }

    fn users(&self) -> UserDirectory {
        self.store.load_entries(keys::USERS).unwrap_or_default()
    }

    fn sign_in(&self, user: &SessionUser) -> Result<()> {
        Ok(self.store.set(keys::USER, user)?)
    }
}

fn credentials(email: &str, password: &str) -> Result<String> {
    let email = normalize_email(email);
    if email.is_empty() || password.is_empty() {
        return Err(AuthError::MissingCredentials);
    }
    Ok(email)
}
