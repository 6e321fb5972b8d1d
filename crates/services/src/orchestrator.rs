//! # Orchestrator
//!
//! Sequences the cross-aggregate fan-outs as ordered lists of
//! independently-atomic single-aggregate steps (the saga pattern). No step
//! here spans more than one aggregate's records at a time; the documented
//! eventual-consistency gaps (the Follow ↔ `"Following"` mirror, bulk
//! author teardown) live at these seams and are healed by re-running the
//! same idempotent steps.

use crate::feed::FeedService;
use crate::follow::FollowService;
use crate::thread::ThreadService;
use domains::error::{CoreError, Result};
use domains::models::{ItemId, UserId, FOLLOWING_FEED};
use std::sync::Arc;
use tracing::{instrument, warn};

pub struct Orchestrator {
    follows: Arc<FollowService>,
    feeds: Arc<FeedService>,
    threads: Arc<ThreadService>,
}

impl Orchestrator {
    pub fn new(
        follows: Arc<FollowService>,
        feeds: Arc<FeedService>,
        threads: Arc<ThreadService>,
    ) -> Self {
        Self {
            follows,
            feeds,
            threads,
        }
    }

    pub fn follows(&self) -> &FollowService {
        &self.follows
    }

    pub fn feeds(&self) -> &FeedService {
        &self.feeds
    }

    pub fn threads(&self) -> &ThreadService {
        &self.threads
    }

    /// Account creation: the empty follow record plus the reserved
    /// `"Following"` feed.
    #[instrument(skip(self))]
    pub async fn on_user_created(&self, user: UserId) -> Result<()> {
        self.follows.track(user).await?;
        self.feeds.create_feed(user, FOLLOWING_FEED).await?;
        Ok(())
    }

    /// Account teardown: detach the graph, bulk-drop thread records, then
    /// sweep the user out of every feed. Each step is idempotent, so a
    /// retry after partial completion converges.
    #[instrument(skip(self))]
    pub async fn on_user_removed(&self, user: UserId) -> Result<()> {
        self.follows.remove_user(user).await?;
        self.threads.delete_all_by_author(user).await?;
        self.feeds.delete_all_for_owner(user).await?;
        Ok(())
    }

    /// Follow plus the matching `"Following"` source edit, sequenced as one
    /// logical transaction. The two updates are not cross-atomic; a crash
    /// between them leaves the mirror stale until the next edit.
    #[instrument(skip(self))]
    pub async fn follow(&self, actor: UserId, target: UserId) -> Result<()> {
        self.follows.follow(actor, target).await?;
        self.feeds.add_source(actor, FOLLOWING_FEED, target).await?;
        Ok(())
    }

    /// Unfollow plus the matching `"Following"` source removal.
    #[instrument(skip(self))]
    pub async fn unfollow(&self, actor: UserId, target: UserId) -> Result<()> {
        self.follows.unfollow(actor, target).await?;
        self.feeds
            .remove_source(actor, FOLLOWING_FEED, target)
            .await?;
        Ok(())
    }

    /// Item creation: track the thread record first, then broadcast into
    /// the feeds currently listing the author.
    #[instrument(skip(self))]
    pub async fn on_item_created(
        &self,
        author: UserId,
        item: ItemId,
        parent: Option<ItemId>,
    ) -> Result<()> {
        self.threads.create_thread(item, parent).await?;
        self.feeds.on_item_created(author, item).await?;
        Ok(())
    }

    /// Item deletion: run the thread cascade, then retract the item from
    /// every feed. A record already untracked (bulk teardown, concurrent
    /// delete) is treated as consistent, not an error.
    #[instrument(skip(self))]
    pub async fn on_item_deleted(&self, author: UserId, item: ItemId) -> Result<()> {
        match self.threads.delete_thread(item).await {
            Ok(()) => {}
            Err(CoreError::NotFound(..)) => {
                warn!(%item, "thread record already gone; skipping cascade");
            }
            Err(other) => return Err(other),
        }
        self.feeds.on_item_deleted(author, item).await?;
        Ok(())
    }
}
