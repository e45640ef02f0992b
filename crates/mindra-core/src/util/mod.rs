//! Utility modules.
//!
//! - [`ids`]: Slug derivation and unique id allocation

pub mod ids;
mod proptests;
