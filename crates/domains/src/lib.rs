//! # domains
//!
//! The central domain model and interface definitions for the Fritter core:
//! aggregate records (follow graph, feeds, thread tree), read views, the
//! port traits every adapter must implement, and the shared error type.

pub mod error;
pub mod models;
pub mod ports;

// Re-exporting for easier access in other crates
pub use error::*;
pub use models::*;
pub use ports::*;
