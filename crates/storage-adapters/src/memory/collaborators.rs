//! In-memory stand-ins for the external collaborators (identity and
//! content). The account and item subsystems own these for real; the
//! adapters here exist for tests and in-process embedding.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use domains::models::{ContentItem, ItemId, UserId, UserRef};
use domains::ports::{ContentStore, IdentityStore};
use std::collections::HashSet;
use std::sync::atomic::{AtomicI64, Ordering};

#[derive(Default)]
pub struct MemoryIdentityStore {
    users: DashMap<UserId, String>,
    by_name: DashMap<String, UserId>,
}

impl MemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, username: &str) -> UserId {
        let user = UserId::new();
        self.users.insert(user, username.to_string());
        self.by_name.insert(username.to_string(), user);
        user
    }

    pub fn unregister(&self, user: UserId) {
        if let Some((_, username)) = self.users.remove(&user) {
            self.by_name.remove(&username);
        }
    }
}

#[async_trait]
impl IdentityStore for MemoryIdentityStore {
    async fn resolve_username(&self, name: &str) -> anyhow::Result<Option<UserId>> {
        Ok(self.by_name.get(name).map(|u| *u))
    }

    async fn user_exists(&self, user: UserId) -> anyhow::Result<bool> {
        Ok(self.users.contains_key(&user))
    }

    async fn lookup(&self, user: UserId) -> anyhow::Result<Option<UserRef>> {
        Ok(self.users.get(&user).map(|name| UserRef {
            id: user,
            username: name.clone(),
        }))
    }
}

pub struct MemoryContentStore {
    items: DashMap<ItemId, ContentItem>,
    epoch: DateTime<Utc>,
    clock: AtomicI64,
}

impl Default for MemoryContentStore {
    fn default() -> Self {
        Self {
            items: DashMap::new(),
            epoch: Utc::now(),
            clock: AtomicI64::new(0),
        }
    }
}

impl MemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an item with a strictly increasing timestamp, so recency
    /// orderings are deterministic even within one test run.
    pub fn publish(&self, author: UserId, content: &str, parent: Option<ItemId>) -> ContentItem {
        let tick = self.clock.fetch_add(1, Ordering::Relaxed);
        let item = ContentItem {
            id: ItemId::new(),
            author,
            created_at: self.epoch + Duration::milliseconds(tick),
            content: content.to_string(),
            parent,
        };
        self.items.insert(item.id, item.clone());
        item
    }

    pub fn insert(&self, item: ContentItem) {
        self.items.insert(item.id, item);
    }

    pub fn remove(&self, item: ItemId) -> Option<ContentItem> {
        self.items.remove(&item).map(|(_, v)| v)
    }
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn item(&self, item: ItemId) -> anyhow::Result<Option<ContentItem>> {
        Ok(self.items.get(&item).map(|i| i.value().clone()))
    }

    async fn items_authored_by(&self, user: UserId) -> anyhow::Result<HashSet<ItemId>> {
        Ok(self
            .items
            .iter()
            .filter(|entry| entry.author == user)
            .map(|entry| entry.id)
            .collect())
    }

    async fn item_exists(&self, item: ItemId) -> anyhow::Result<bool> {
        Ok(self.items.contains_key(&item))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_timestamps_are_strictly_increasing() {
        let store = MemoryContentStore::new();
        let author = UserId::new();
        let first = store.publish(author, "one", None);
        let second = store.publish(author, "two", None);
        assert!(second.created_at > first.created_at);
        assert_eq!(store.items_authored_by(author).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_identity_roundtrip_and_unregister() {
        let store = MemoryIdentityStore::new();
        let ava = store.register("ava");
        assert_eq!(store.resolve_username("ava").await.unwrap(), Some(ava));
        assert_eq!(
            store.lookup(ava).await.unwrap().map(|u| u.username),
            Some("ava".to_string())
        );
        store.unregister(ava);
        assert!(!store.user_exists(ava).await.unwrap());
    }
}
