//! # Domain Models
//!
//! These structs represent the denormalized aggregates the core keeps
//! consistent: the follow graph, per-user feeds, and thread records.
//! All cross-record relations are id-based lookups; no aggregate holds a
//! direct reference to another, so the graph-shaped data cannot form
//! reference cycles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use uuid::Uuid;

/// The reserved feed that mirrors its owner's following set.
pub const FOLLOWING_FEED: &str = "Following";

/// Opaque stable handle for a user, owned by the identity collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Opaque stable handle for a content item ("freet").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Per-user adjacency record for the follow graph.
///
/// Edge symmetry invariant: `A ∈ following(B) ⇔ B ∈ followers(A)`.
/// Created alongside the user, destroyed with the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowRecord {
    pub user: UserId,
    /// The accounts that follow the user
    pub followers: HashSet<UserId>,
    /// The accounts that the user is following
    pub following: HashSet<UserId>,
}

impl FollowRecord {
    pub fn new(user: UserId) -> Self {
        Self {
            user,
            followers: HashSet::new(),
            following: HashSet::new(),
        }
    }
}

/// A named, per-user materialized view over a set of source users.
///
/// The item set is the denormalized union of each source's authored items;
/// equality with that union holds whenever no cascade is in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feed {
    pub owner: UserId,
    /// Unique per owner, case-sensitive, non-empty
    pub name: String,
    pub sources: HashSet<UserId>,
    pub items: HashSet<ItemId>,
}

impl Feed {
    pub fn new(owner: UserId, name: impl Into<String>) -> Self {
        Self {
            owner,
            name: name.into(),
            sources: HashSet::new(),
            items: HashSet::new(),
        }
    }
}

/// A direct reply paired with its relevance rating in `[0,1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatedChild {
    pub item: ItemId,
    pub rating: f64,
}

/// Per-item thread bookkeeping: the root-first ancestor chain and the set
/// of direct replies.
///
/// Lineage invariant: `lineage(child) == lineage(parent) + [parent]`;
/// a root item has an empty lineage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadRecord {
    pub item: ItemId,
    /// Ordered root → immediate parent
    pub lineage: Vec<ItemId>,
    pub children: Vec<RatedChild>,
}

impl ThreadRecord {
    /// Record for an item with no parent.
    pub fn root(item: ItemId) -> Self {
        Self {
            item,
            lineage: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Record for a reply to `parent`, extending the parent's lineage.
    pub fn child(item: ItemId, parent: &ThreadRecord) -> Self {
        let mut lineage = parent.lineage.clone();
        lineage.push(parent.item);
        Self {
            item,
            lineage,
            children: Vec::new(),
        }
    }
}

/// A content item as owned by the external content collaborator. The core
/// references items by id and only resolves them into read views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: ItemId,
    pub author: UserId,
    pub created_at: DateTime<Utc>,
    pub content: String,
    /// The item this one replies to, if any
    pub parent: Option<ItemId>,
}

/// Resolved identity of a user, for read views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: UserId,
    pub username: String,
}

/// A resolved reply with its relevance rating.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatedItem {
    pub item: ContentItem,
    pub rating: f64,
}

/// Read view of a thread: the item itself, its resolved ancestor chain,
/// and its direct replies sorted by rating descending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadView {
    pub item: ContentItem,
    pub lineage: Vec<ContentItem>,
    pub children: Vec<RatedItem>,
}

/// Read view of a feed: sources sorted by username, items most recent first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedView {
    pub name: String,
    pub sources: Vec<UserRef>,
    pub items: Vec<ContentItem>,
}

/// Read view of a user's position in the follow graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowView {
    pub user: UserId,
    pub followers: Vec<UserId>,
    pub following: Vec<UserId>,
}
