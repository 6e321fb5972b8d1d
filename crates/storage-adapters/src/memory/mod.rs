//! In-memory adapters. One `DashMap` per aggregate; entry-level locking
//! gives each store method its single-record atomicity.

mod collaborators;
mod feed;
mod follow;
mod thread;

pub use collaborators::{MemoryContentStore, MemoryIdentityStore};
pub use feed::MemoryFeedStore;
pub use follow::MemoryFollowStore;
pub use thread::MemoryThreadStore;
