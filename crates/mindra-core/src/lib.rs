//! Mindra Core: shared types, errors, storage, and utilities.
//!
//! This crate provides the foundation used across all Mindra crates.
//! It has no internal Mindra dependencies.
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`util`]: Slug and id utilities
//! - [`store`]: JSON document store and its backends
//! - [`config`]: TOML configuration
//! - [`telemetry`]: Capped event log kept in the store

#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]

pub mod capability;
pub mod config;
pub mod error;
pub mod store;
pub mod telemetry;
pub mod util;

// Re-export key types at crate root for convenience
pub use capability::AdminCapability;
pub use config::MindraConfig;
pub use error::{Error, Result};
pub use store::{FileBackend, MemoryBackend, StorageBackend, Store};
pub use telemetry::{TelemetryEvent, TelemetrySink};
pub use util::ids::{IdAllocator, slugify};
