//! # Core Traits (Ports)
//!
//! Any adapter must implement these traits to be used by the services
//! layer. The aggregate stores follow one rule: every method is atomic
//! with respect to the single record it touches, and set edits report
//! whether they changed anything so repeated edits converge. Cross-record
//! consistency is the services layer's job, not the stores'.

use crate::models::{
    ContentItem, Feed, FollowRecord, ItemId, RatedChild, ThreadRecord, UserId, UserRef,
};
use async_trait::async_trait;
use std::collections::HashSet;

/// Identity resolution contract, owned by the excluded account subsystem.
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Resolves a username to its stable user id.
    async fn resolve_username(&self, name: &str) -> anyhow::Result<Option<UserId>>;
    async fn user_exists(&self, user: UserId) -> anyhow::Result<bool>;
    /// Reverse lookup for read views; `None` if the user is gone.
    async fn lookup(&self, user: UserId) -> anyhow::Result<Option<UserRef>>;
}

/// Content item contract, owned by the excluded item subsystem. The core
/// never creates or destroys items; it only reacts to their lifecycle.
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn item(&self, item: ItemId) -> anyhow::Result<Option<ContentItem>>;
    /// Every item currently authored by `user`.
    async fn items_authored_by(&self, user: UserId) -> anyhow::Result<HashSet<ItemId>>;
    async fn item_exists(&self, item: ItemId) -> anyhow::Result<bool>;
}

/// Persistence contract for follow-graph adjacency records.
#[async_trait]
pub trait FollowStore: Send + Sync {
    /// Creates the empty record for a user. Overwrites nothing if one exists.
    async fn create(&self, user: UserId) -> anyhow::Result<()>;
    async fn get(&self, user: UserId) -> anyhow::Result<Option<FollowRecord>>;
    /// Discards the record; `false` if it was already gone.
    async fn remove(&self, user: UserId) -> anyhow::Result<bool>;
    /// Adds `target` to `user`'s following set; `false` if already present
    /// or the record is absent.
    async fn add_following(&self, user: UserId, target: UserId) -> anyhow::Result<bool>;
    async fn remove_following(&self, user: UserId, target: UserId) -> anyhow::Result<bool>;
    async fn add_follower(&self, user: UserId, target: UserId) -> anyhow::Result<bool>;
    async fn remove_follower(&self, user: UserId, target: UserId) -> anyhow::Result<bool>;
}

/// Persistence contract for feed records, keyed by (owner, name).
#[async_trait]
pub trait FeedStore: Send + Sync {
    async fn insert(&self, feed: Feed) -> anyhow::Result<()>;
    async fn get(&self, owner: UserId, name: &str) -> anyhow::Result<Option<Feed>>;
    /// Discards the feed; `false` if it was already gone.
    async fn remove(&self, owner: UserId, name: &str) -> anyhow::Result<bool>;
    async fn feeds_of(&self, owner: UserId) -> anyhow::Result<Vec<Feed>>;
    /// Every feed, any owner, whose source set contains `source`.
    async fn feeds_with_source(&self, source: UserId) -> anyhow::Result<Vec<Feed>>;
    async fn add_source(&self, owner: UserId, name: &str, source: UserId)
        -> anyhow::Result<bool>;
    async fn remove_source(
        &self,
        owner: UserId,
        name: &str,
        source: UserId,
    ) -> anyhow::Result<bool>;
    async fn add_items(&self, owner: UserId, name: &str, items: &[ItemId]) -> anyhow::Result<()>;
    async fn remove_items(
        &self,
        owner: UserId,
        name: &str,
        items: &[ItemId],
    ) -> anyhow::Result<()>;
    /// Adds `item` to every feed whose source set contains `source`.
    async fn broadcast_item(&self, source: UserId, item: ItemId) -> anyhow::Result<()>;
    /// Removes `item` from every feed's item set that contains it.
    async fn retract_item(&self, item: ItemId) -> anyhow::Result<()>;
}

/// Persistence contract for thread records, keyed by item id.
#[async_trait]
pub trait ThreadStore: Send + Sync {
    async fn insert(&self, record: ThreadRecord) -> anyhow::Result<()>;
    async fn get(&self, item: ItemId) -> anyhow::Result<Option<ThreadRecord>>;
    /// Discards the record; `false` if it was already gone.
    async fn remove(&self, item: ItemId) -> anyhow::Result<bool>;
    async fn remove_many(&self, items: &[ItemId]) -> anyhow::Result<()>;
    /// Adds a rated child entry to `parent`'s children; `false` if the
    /// parent record is absent or the child is already listed.
    async fn add_child(&self, parent: ItemId, child: RatedChild) -> anyhow::Result<bool>;
    async fn remove_child(&self, parent: ItemId, child: ItemId) -> anyhow::Result<bool>;
    /// Every record whose lineage contains `item`, read fresh.
    async fn descendants_of(&self, item: ItemId) -> anyhow::Result<Vec<ThreadRecord>>;
    /// Rewrites one record's lineage and children in a single atomic step;
    /// `false` if the record is absent.
    async fn update(
        &self,
        item: ItemId,
        lineage: Vec<ItemId>,
        children: Vec<RatedChild>,
    ) -> anyhow::Result<bool>;
}

/// Relevance scoring strategy for a candidate reply against its ancestor
/// context. Pure and side-effect free; implementations may be stochastic,
/// so callers rely only on the `[0,1]` range, never on reproducibility.
pub trait RelevanceScorer: Send + Sync {
    fn score(&self, item: ItemId, context: &[ItemId]) -> f64;
}
