//! Local authentication for Mindra.
//!
//! Provides:
//! - [`AuthGate`]: Register, sign in, sign out, current user
//! - [`AdminGate`]: Shared-secret admin elevation
//! - [`AuthError`]: Auth-specific error types

#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]

mod admin;
mod error;
mod user;

pub use admin::AdminGate;
pub use error::{AuthError, Result};
pub use user::{AuthGate, SessionUser, UserRecord, hash_password, normalize_email};
