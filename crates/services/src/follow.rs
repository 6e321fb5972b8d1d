//! # Follow Graph
//!
//! Owns the directed follower/following relation between users. Each user
//! has one adjacency record; an edge lives on both endpoint records, and
//! every mutation here edits both sides so readers never observe half an
//! edge through the store's per-record atomic set edits.

use domains::error::{CoreError, Result};
use domains::models::{FollowView, UserId};
use domains::ports::FollowStore;
use std::sync::Arc;
use tracing::instrument;

pub struct FollowService {
    store: Arc<dyn FollowStore>,
}

impl FollowService {
    pub fn new(store: Arc<dyn FollowStore>) -> Self {
        Self { store }
    }

    /// Creates the empty adjacency record for a freshly created user.
    #[instrument(skip(self))]
    pub async fn track(&self, user: UserId) -> Result<()> {
        self.store.create(user).await?;
        Ok(())
    }

    /// Both sides of a user's position in the graph.
    pub async fn get(&self, user: UserId) -> Result<FollowView> {
        let record = self
            .store
            .get(user)
            .await?
            .ok_or_else(|| CoreError::NotFound("user", user.to_string()))?;
        Ok(FollowView {
            user,
            followers: record.followers.into_iter().collect(),
            following: record.following.into_iter().collect(),
        })
    }

    pub async fn is_following(&self, follower: UserId, followee: UserId) -> Result<bool> {
        let record = self
            .store
            .get(follower)
            .await?
            .ok_or_else(|| CoreError::NotFound("user", follower.to_string()))?;
        Ok(record.following.contains(&followee))
    }

    /// Adds the directed edge `follower → followee` on both endpoint records.
    #[instrument(skip(self))]
    pub async fn follow(&self, follower: UserId, followee: UserId) -> Result<()> {
        let record = self
            .store
            .get(follower)
            .await?
            .ok_or_else(|| CoreError::NotFound("user", follower.to_string()))?;
        if record.following.contains(&followee) {
            return Err(CoreError::AlreadyFollowing(followee));
        }
        if self.store.get(followee).await?.is_none() {
            return Err(CoreError::NotFound("user", followee.to_string()));
        }
        self.store.add_following(follower, followee).await?;
        self.store.add_follower(followee, follower).await?;
        Ok(())
    }

    /// Removes the directed edge on both endpoint records.
    #[instrument(skip(self))]
    pub async fn unfollow(&self, follower: UserId, followee: UserId) -> Result<()> {
        let record = self
            .store
            .get(follower)
            .await?
            .ok_or_else(|| CoreError::NotFound("user", follower.to_string()))?;
        if !record.following.contains(&followee) {
            return Err(CoreError::NotFollowing(followee));
        }
        self.store.remove_following(follower, followee).await?;
        self.store.remove_follower(followee, follower).await?;
        Ok(())
    }

    /// Detaches every edge touching `user`, then discards the record.
    ///
    /// Idempotent against partial retries: edges already removed by an
    /// earlier pass are no-ops at the store, and a missing record means
    /// the cascade already completed.
    #[instrument(skip(self))]
    pub async fn remove_user(&self, user: UserId) -> Result<()> {
        let Some(record) = self.store.get(user).await? else {
            return Ok(());
        };
        for follower in &record.followers {
            self.store.remove_following(*follower, user).await?;
        }
        for followee in &record.following {
            self.store.remove_follower(*followee, user).await?;
        }
        self.store.remove(user).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage_adapters::memory::MemoryFollowStore;

    fn service() -> FollowService {
        FollowService::new(Arc::new(MemoryFollowStore::new()))
    }

    #[tokio::test]
    async fn test_follow_then_refollow_conflicts() {
        let svc = service();
        let (a, b) = (UserId::new(), UserId::new());
        svc.track(a).await.unwrap();
        svc.track(b).await.unwrap();

        svc.follow(a, b).await.unwrap();
        assert!(matches!(
            svc.follow(a, b).await,
            Err(CoreError::AlreadyFollowing(u)) if u == b
        ));
        assert!(svc.is_following(a, b).await.unwrap());
        assert!(!svc.is_following(b, a).await.unwrap());
    }

    #[tokio::test]
    async fn test_edge_symmetry_after_mutations() {
        let svc = service();
        let (a, b) = (UserId::new(), UserId::new());
        svc.track(a).await.unwrap();
        svc.track(b).await.unwrap();

        svc.follow(a, b).await.unwrap();
        let viewed_b = svc.get(b).await.unwrap();
        assert!(viewed_b.followers.contains(&a));

        svc.unfollow(a, b).await.unwrap();
        let viewed_b = svc.get(b).await.unwrap();
        assert!(viewed_b.followers.is_empty());
        assert!(matches!(
            svc.unfollow(a, b).await,
            Err(CoreError::NotFollowing(_))
        ));
    }

    #[tokio::test]
    async fn test_remove_user_detaches_all_edges_and_is_idempotent() {
        let svc = service();
        let (a, b, c) = (UserId::new(), UserId::new(), UserId::new());
        for u in [a, b, c] {
            svc.track(u).await.unwrap();
        }
        svc.follow(a, b).await.unwrap();
        svc.follow(b, c).await.unwrap();

        svc.remove_user(b).await.unwrap();
        // second pass over already-removed edges must not error
        svc.remove_user(b).await.unwrap();

        assert!(!svc.is_following(a, b).await.unwrap());
        let viewed_c = svc.get(c).await.unwrap();
        assert!(viewed_c.followers.is_empty());
        assert!(matches!(
            svc.get(b).await,
            Err(CoreError::NotFound("user", _))
        ));
    }
}
