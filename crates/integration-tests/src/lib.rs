//! Shared harness for the end-to-end scenario tests: wires the services
//! over the in-memory adapters the way an embedding application would.

use configs::{ScorerStrategy, Settings};
use domains::models::{ContentItem, ItemId, UserId};
use domains::ports::RelevanceScorer;
use services::{ConstantScorer, FeedService, FollowService, Orchestrator, ThreadService, UniformScorer};
use std::sync::Arc;
use storage_adapters::memory::{
    MemoryContentStore, MemoryFeedStore, MemoryFollowStore, MemoryIdentityStore, MemoryThreadStore,
};

/// Builds the scorer an embedder would select from its settings.
pub fn scorer_from(settings: &Settings) -> Arc<dyn RelevanceScorer> {
    match settings.scorer.strategy {
        ScorerStrategy::Uniform => Arc::new(UniformScorer),
        ScorerStrategy::Constant => Arc::new(ConstantScorer::new(settings.scorer.constant)),
    }
}

/// One-time tracing setup; safe to call from every test.
pub fn init_tracing() {
    let settings = Settings::load().unwrap_or_default();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(settings.log.filter))
        .with_test_writer()
        .try_init()
        .ok();
}

pub struct World {
    pub identity: Arc<MemoryIdentityStore>,
    pub content: Arc<MemoryContentStore>,
    pub core: Orchestrator,
}

impl World {
    pub fn new() -> Self {
        Self::with_scorer(Arc::new(ConstantScorer::new(0.5)))
    }

    pub fn with_scorer(scorer: Arc<dyn RelevanceScorer>) -> Self {
        init_tracing();
        let identity = Arc::new(MemoryIdentityStore::new());
        let content = Arc::new(MemoryContentStore::new());
        let follows = Arc::new(FollowService::new(Arc::new(MemoryFollowStore::new())));
        let feeds = Arc::new(FeedService::new(
            Arc::new(MemoryFeedStore::new()),
            identity.clone(),
            content.clone(),
        ));
        let threads = Arc::new(ThreadService::new(
            Arc::new(MemoryThreadStore::new()),
            content.clone(),
            scorer,
        ));
        Self {
            identity,
            content,
            core: Orchestrator::new(follows, feeds, threads),
        }
    }

    /// Registers an account and runs the creation saga (follow record plus
    /// the reserved "Following" feed).
    pub async fn signup(&self, username: &str) -> UserId {
        let user = self.identity.register(username);
        self.core.on_user_created(user).await.expect("signup saga");
        user
    }

    /// Publishes an item and runs the creation fan-out (thread record,
    /// then feed broadcast).
    pub async fn publish(
        &self,
        author: UserId,
        text: &str,
        parent: Option<ItemId>,
    ) -> ContentItem {
        let item = self.content.publish(author, text, parent);
        self.core
            .on_item_created(author, item.id, parent)
            .await
            .expect("item creation saga");
        item
    }

    /// Deletes an item and runs the deletion fan-out.
    pub async fn delete_item(&self, author: UserId, item: ItemId) {
        self.content.remove(item);
        self.core
            .on_item_deleted(author, item)
            .await
            .expect("item deletion saga");
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
