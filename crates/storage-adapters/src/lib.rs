//! # storage-adapters
//!
//! In-process implementations of the domain store ports. The `memory`
//! module backs every aggregate with a `dashmap` keyed by its stable id;
//! a map entry is the unit of atomicity, matching the core's per-record
//! transaction model, and the adapters never hold more than one entry
//! lock at a time.

pub mod memory;
