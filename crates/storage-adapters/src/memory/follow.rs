//! In-memory `FollowStore` keyed by user id.

use async_trait::async_trait;
use dashmap::DashMap;
use domains::models::{FollowRecord, UserId};
use domains::ports::FollowStore;

#[derive(Default)]
pub struct MemoryFollowStore {
    records: DashMap<UserId, FollowRecord>,
}

impl MemoryFollowStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FollowStore for MemoryFollowStore {
    async fn create(&self, user: UserId) -> anyhow::Result<()> {
        self.records
            .entry(user)
            .or_insert_with(|| FollowRecord::new(user));
        Ok(())
    }

    async fn get(&self, user: UserId) -> anyhow::Result<Option<FollowRecord>> {
        Ok(self.records.get(&user).map(|r| r.value().clone()))
    }

    async fn remove(&self, user: UserId) -> anyhow::Result<bool> {
        Ok(self.records.remove(&user).is_some())
    }

    async fn add_following(&self, user: UserId, target: UserId) -> anyhow::Result<bool> {
        Ok(self
            .records
            .get_mut(&user)
            .map(|mut r| r.following.insert(target))
            .unwrap_or(false))
    }

    async fn remove_following(&self, user: UserId, target: UserId) -> anyhow::Result<bool> {
        Ok(self
            .records
            .get_mut(&user)
            .map(|mut r| r.following.remove(&target))
            .unwrap_or(false))
    }

    async fn add_follower(&self, user: UserId, target: UserId) -> anyhow::Result<bool> {
        Ok(self
            .records
            .get_mut(&user)
            .map(|mut r| r.followers.insert(target))
            .unwrap_or(false))
    }

    async fn remove_follower(&self, user: UserId, target: UserId) -> anyhow::Result<bool> {
        Ok(self
            .records
            .get_mut(&user)
            .map(|mut r| r.followers.remove(&target))
            .unwrap_or(false))
    }
}
