//! In-memory `FeedStore` keyed by (owner, name).

use async_trait::async_trait;
use dashmap::DashMap;
use domains::models::{Feed, ItemId, UserId};
use domains::ports::FeedStore;

#[derive(Default)]
pub struct MemoryFeedStore {
    feeds: DashMap<(UserId, String), Feed>,
}

impl MemoryFeedStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(owner: UserId, name: &str) -> (UserId, String) {
        (owner, name.to_string())
    }
}

#[async_trait]
impl FeedStore for MemoryFeedStore {
    async fn insert(&self, feed: Feed) -> anyhow::Result<()> {
        self.feeds
            .insert(Self::key(feed.owner, &feed.name), feed);
        Ok(())
    }

    async fn get(&self, owner: UserId, name: &str) -> anyhow::Result<Option<Feed>> {
        Ok(self.feeds.get(&Self::key(owner, name)).map(|f| f.value().clone()))
    }

    async fn remove(&self, owner: UserId, name: &str) -> anyhow::Result<bool> {
        Ok(self.feeds.remove(&Self::key(owner, name)).is_some())
    }

    async fn feeds_of(&self, owner: UserId) -> anyhow::Result<Vec<Feed>> {
        Ok(self
            .feeds
            .iter()
            .filter(|entry| entry.owner == owner)
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn feeds_with_source(&self, source: UserId) -> anyhow::Result<Vec<Feed>> {
        Ok(self
            .feeds
            .iter()
            .filter(|entry| entry.sources.contains(&source))
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn add_source(
        &self,
        owner: UserId,
        name: &str,
        source: UserId,
    ) -> anyhow::Result<bool> {
        Ok(self
            .feeds
            .get_mut(&Self::key(owner, name))
            .map(|mut f| f.sources.insert(source))
            .unwrap_or(false))
    }

    async fn remove_source(
        &self,
        owner: UserId,
        name: &str,
        source: UserId,
    ) -> anyhow::Result<bool> {
        Ok(self
            .feeds
            .get_mut(&Self::key(owner, name))
            .map(|mut f| f.sources.remove(&source))
            .unwrap_or(false))
    }

    async fn add_items(&self, owner: UserId, name: &str, items: &[ItemId]) -> anyhow::Result<()> {
        if let Some(mut feed) = self.feeds.get_mut(&Self::key(owner, name)) {
            feed.items.extend(items.iter().copied());
        }
        Ok(())
    }

    async fn remove_items(
        &self,
        owner: UserId,
        name: &str,
        items: &[ItemId],
    ) -> anyhow::Result<()> {
        if let Some(mut feed) = self.feeds.get_mut(&Self::key(owner, name)) {
            for item in items {
                feed.items.remove(item);
            }
        }
        Ok(())
    }

    async fn broadcast_item(&self, source: UserId, item: ItemId) -> anyhow::Result<()> {
        for mut entry in self.feeds.iter_mut() {
            if entry.sources.contains(&source) {
                entry.items.insert(item);
            }
        }
        Ok(())
    }

    async fn retract_item(&self, item: ItemId) -> anyhow::Result<()> {
        for mut entry in self.feeds.iter_mut() {
            entry.items.remove(&item);
        }
        Ok(())
    }
}
