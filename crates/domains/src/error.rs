//! # CoreError
//!
//! Centralized error handling for the Fritter core. Every error kind is
//! local, synchronous, and recoverable by the caller; the transport layer
//! typically surfaces them as user-facing validation messages.

use crate::models::{ItemId, UserId};
use thiserror::Error;

/// The primary error type for all core operations.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Referenced user/feed/thread/item absent (e.g., "feed", "thread")
    #[error("{0} not found: {1}")]
    NotFound(&'static str, String),

    /// Feed name collision for one owner
    #[error("feed name already in use: {0}")]
    DuplicateName(String),

    /// Follow requested but the edge already exists
    #[error("already following user {0}")]
    AlreadyFollowing(UserId),

    /// Unfollow requested but the edge is absent
    #[error("not following user {0}")]
    NotFollowing(UserId),

    /// Illegal mutation of the reserved "Following" feed
    #[error("the {0} feed cannot be deleted")]
    ProtectedFeed(String),

    /// Reply creation referencing a parent with no thread record
    #[error("parent item {0} is not tracked in any thread")]
    ParentNotTracked(ItemId),

    /// Storage/adapter failure surfaced through a port
    #[error("internal storage error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// A specialized Result type for core logic.
pub type Result<T> = std::result::Result<T, CoreError>;
