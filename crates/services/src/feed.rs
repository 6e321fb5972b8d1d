//! # Feed Materializer
//!
//! Owns each user's named feeds. A feed denormalizes a source-user set and
//! the item set reachable from those sources; this service keeps the item
//! set equal to the union of each source's authored items, reacting to
//! source edits and item lifecycle events. The reserved `"Following"`
//! feed's source set mirrors the owner's following set; the orchestrator
//! sequences that mirror alongside graph edits.

use domains::error::{CoreError, Result};
use domains::models::{Feed, FeedView, ItemId, UserId, FOLLOWING_FEED};
use domains::ports::{ContentStore, FeedStore, IdentityStore};
use std::sync::Arc;
use tracing::instrument;

pub struct FeedService {
    store: Arc<dyn FeedStore>,
    identity: Arc<dyn IdentityStore>,
    content: Arc<dyn ContentStore>,
}

impl FeedService {
    pub fn new(
        store: Arc<dyn FeedStore>,
        identity: Arc<dyn IdentityStore>,
        content: Arc<dyn ContentStore>,
    ) -> Self {
        Self {
            store,
            identity,
            content,
        }
    }

    /// Creates an empty feed. Names are unique per owner, case-sensitive.
    #[instrument(skip(self))]
    pub async fn create_feed(&self, owner: UserId, name: &str) -> Result<()> {
        if self.store.get(owner, name).await?.is_some() {
            return Err(CoreError::DuplicateName(name.to_string()));
        }
        self.store.insert(Feed::new(owner, name)).await?;
        Ok(())
    }

    /// Resolves a feed into its read view: sources sorted by username,
    /// items most recent first. Sources or items deleted concurrently are
    /// skipped rather than reported.
    pub async fn get_feed(&self, owner: UserId, name: &str) -> Result<FeedView> {
        let feed = self
            .store
            .get(owner, name)
            .await?
            .ok_or_else(|| CoreError::NotFound("feed", name.to_string()))?;

        let mut sources = Vec::with_capacity(feed.sources.len());
        for source in &feed.sources {
            if let Some(user) = self.identity.lookup(*source).await? {
                sources.push(user);
            }
        }
        sources.sort_by(|a, b| a.username.cmp(&b.username));

        let mut items = Vec::with_capacity(feed.items.len());
        for item in &feed.items {
            if let Some(full) = self.content.item(*item).await? {
                items.push(full);
            }
        }
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(FeedView {
            name: feed.name,
            sources,
            items,
        })
    }

    /// Discards a feed. The reserved `"Following"` feed cannot be deleted.
    #[instrument(skip(self))]
    pub async fn delete_feed(&self, owner: UserId, name: &str) -> Result<()> {
        if self.store.get(owner, name).await?.is_none() {
            return Err(CoreError::NotFound("feed", name.to_string()));
        }
        if name == FOLLOWING_FEED {
            return Err(CoreError::ProtectedFeed(name.to_string()));
        }
        self.store.remove(owner, name).await?;
        Ok(())
    }

    /// Whether `source` is already listed by the feed; the validation
    /// collaborator pre-checks this before source edits.
    pub async fn has_source(&self, owner: UserId, name: &str, source: UserId) -> Result<bool> {
        let feed = self
            .store
            .get(owner, name)
            .await?
            .ok_or_else(|| CoreError::NotFound("feed", name.to_string()))?;
        Ok(feed.sources.contains(&source))
    }

    /// Adds a source and backfills every item it has authored so far.
    #[instrument(skip(self))]
    pub async fn add_source(&self, owner: UserId, name: &str, source: UserId) -> Result<()> {
        if self.store.get(owner, name).await?.is_none() {
            return Err(CoreError::NotFound("feed", name.to_string()));
        }
        self.store.add_source(owner, name, source).await?;
        let authored: Vec<ItemId> = self
            .content
            .items_authored_by(source)
            .await?
            .into_iter()
            .collect();
        self.store.add_items(owner, name, &authored).await?;
        Ok(())
    }

    /// Removes a source and the full contribution of its authored items.
    /// Authorship is single-sourced, so none of those items can be owed to
    /// a remaining source.
    #[instrument(skip(self))]
    pub async fn remove_source(&self, owner: UserId, name: &str, source: UserId) -> Result<()> {
        if self.store.get(owner, name).await?.is_none() {
            return Err(CoreError::NotFound("feed", name.to_string()));
        }
        self.store.remove_source(owner, name, source).await?;
        let authored: Vec<ItemId> = self
            .content
            .items_authored_by(source)
            .await?
            .into_iter()
            .collect();
        self.store.remove_items(owner, name, &authored).await?;
        Ok(())
    }

    /// Fans a new item out to every feed currently listing its author.
    /// Visibility is decided now, not at read time; feeds subscribing later
    /// backfill through `add_source` instead.
    #[instrument(skip(self))]
    pub async fn on_item_created(&self, author: UserId, item: ItemId) -> Result<()> {
        self.store.broadcast_item(author, item).await?;
        Ok(())
    }

    /// Drops a deleted item from every feed that materialized it.
    #[instrument(skip(self))]
    pub async fn on_item_deleted(&self, _author: UserId, item: ItemId) -> Result<()> {
        self.store.retract_item(item).await?;
        Ok(())
    }

    /// Account-teardown sweep: discards every feed the user owns, then
    /// strips the user (and the items they authored) out of every other
    /// feed that listed them as a source.
    #[instrument(skip(self))]
    pub async fn delete_all_for_owner(&self, owner: UserId) -> Result<()> {
        for feed in self.store.feeds_of(owner).await? {
            self.store.remove(owner, &feed.name).await?;
        }
        let authored: Vec<ItemId> = self
            .content
            .items_authored_by(owner)
            .await?
            .into_iter()
            .collect();
        for feed in self.store.feeds_with_source(owner).await? {
            self.store
                .remove_items(feed.owner, &feed.name, &authored)
                .await?;
            self.store.remove_source(feed.owner, &feed.name, owner).await?;
        }
        Ok(())
    }
}
