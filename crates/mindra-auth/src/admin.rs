//! Shared-secret admin elevation.
//!
//! Prototype only: the secret comes from configuration and the flag is a
//! plain document in the store. Any truthy stored value counts as admin.

use mindra_core::AdminCapability;
use mindra_core::store::{Store, keys};
use serde_json::Value;

/// Grants and revokes the admin flag.
#[derive(Clone)]
pub struct AdminGate {
    store: Store,
    secret: String,
}

impl std::fmt::Debug for AdminGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminGate")
            .field("store", &self.store)
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl AdminGate {
    /// Create a gate over `store` that accepts `secret`.
    pub fn new(store: Store, secret: impl Into<String>) -> Self {
        Self {
            store,
            secret: secret.into(),
        }
    }

    /// Whether the admin flag is set.
    pub fn is_admin(&self) -> bool {
        self.store.get(keys::IS_ADMIN).is_some_and(|v| truthy(&v))
    }

    /// Set the admin flag if `password` matches the secret.
    ///
    /// Returns whether the flag is now set. A failed store write leaves the
    /// session unelevated.
    pub fn try_elevate(&self, password: &str) -> bool {
        if password != self.secret {
            log::info!("Admin elevation refused");
            return false;
        }
        match self.store.set(keys::IS_ADMIN, &true) {
            Ok(()) => {
                log::info!("Admin elevation granted");
                true
            }
            Err(e) => {
                log::warn!("Could not persist admin flag: {e}");
                false
            }
        }
    }

    /// Clear the admin flag.
    pub fn revoke(&self) -> mindra_core::Result<()> {
        self.store.remove(keys::IS_ADMIN)?;
        log::info!("Admin flag cleared");
        Ok(())
    }
}

impl AdminCapability for AdminGate {
    fn is_admin(&self) -> bool {
        AdminGate::is_admin(self)
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
