//! # Thread Tree
//!
//! Owns, per tracked item, its root-first ancestor chain ("lineage") and
//! its direct replies with relevance ratings. Reacts to item creation and
//! deletion. Deleting an item splices it out of every descendant's
//! lineage and re-attaches its direct replies to its parent, so the
//! lineage invariant `lineage(child) == lineage(parent) + [parent]`
//! survives deletions anywhere in the tree.

use domains::error::{CoreError, Result};
use domains::models::{ItemId, RatedChild, RatedItem, ThreadRecord, ThreadView, UserId};
use domains::ports::{ContentStore, RelevanceScorer, ThreadStore};
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::instrument;

pub struct ThreadService {
    store: Arc<dyn ThreadStore>,
    content: Arc<dyn ContentStore>,
    scorer: Arc<dyn RelevanceScorer>,
}

impl ThreadService {
    pub fn new(
        store: Arc<dyn ThreadStore>,
        content: Arc<dyn ContentStore>,
        scorer: Arc<dyn RelevanceScorer>,
    ) -> Self {
        Self {
            store,
            content,
            scorer,
        }
    }

    /// Tracks a freshly created item. A reply extends its parent's lineage
    /// and is rated against that context; a parentless item becomes a root
    /// with an empty lineage.
    #[instrument(skip(self))]
    pub async fn create_thread(&self, item: ItemId, parent: Option<ItemId>) -> Result<()> {
        let record = match parent {
            Some(parent_id) => {
                let parent_record = self
                    .store
                    .get(parent_id)
                    .await?
                    .ok_or(CoreError::ParentNotTracked(parent_id))?;
                ThreadRecord::child(item, &parent_record)
            }
            None => ThreadRecord::root(item),
        };
        let lineage = record.lineage.clone();
        self.store.insert(record).await?;
        if let Some(parent_id) = parent {
            let rating = self.scorer.score(item, &lineage);
            self.store
                .add_child(parent_id, RatedChild { item, rating })
                .await?;
        }
        Ok(())
    }

    /// Resolves a tracked item into its thread view: full item data for the
    /// lineage and children, children sorted by rating descending (ties
    /// broken by item id for a stable order). Items deleted concurrently
    /// are skipped rather than reported.
    pub async fn get_thread(&self, item: ItemId) -> Result<ThreadView> {
        let record = self
            .store
            .get(item)
            .await?
            .ok_or_else(|| CoreError::NotFound("thread", item.to_string()))?;
        let resolved = self
            .content
            .item(item)
            .await?
            .ok_or_else(|| CoreError::NotFound("item", item.to_string()))?;

        let mut lineage = Vec::with_capacity(record.lineage.len());
        for ancestor in &record.lineage {
            if let Some(full) = self.content.item(*ancestor).await? {
                lineage.push(full);
            }
        }

        let mut children = Vec::with_capacity(record.children.len());
        for child in &record.children {
            if let Some(full) = self.content.item(child.item).await? {
                children.push(RatedItem {
                    item: full,
                    rating: child.rating,
                });
            }
        }
        children.sort_by(|a, b| {
            b.rating
                .partial_cmp(&a.rating)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.item.id.cmp(&b.item.id))
        });

        Ok(ThreadView {
            item: resolved,
            lineage,
            children,
        })
    }

    /// Untracks a deleted item and repairs the tree around it.
    ///
    /// Fan-out order: detach from the parent's children, splice the item
    /// out of every descendant's lineage (re-rating that descendant's own
    /// children against the shortened context), re-attach the item's
    /// direct replies to its parent, then discard the record itself. Each
    /// descendant rewrite is a single-record atomic step; records deleted
    /// concurrently mid-cascade are treated as already consistent.
    #[instrument(skip(self))]
    pub async fn delete_thread(&self, item: ItemId) -> Result<()> {
        let record = self
            .store
            .get(item)
            .await?
            .ok_or_else(|| CoreError::NotFound("thread", item.to_string()))?;
        let parent = record.lineage.last().copied();

        if let Some(parent_id) = parent {
            self.store.remove_child(parent_id, item).await?;
        }

        for descendant in self.store.descendants_of(item).await? {
            // Re-read before rewriting; the snapshot from the scan may be
            // stale by the time we reach this record.
            let Some(fresh) = self.store.get(descendant.item).await? else {
                continue;
            };
            let Some(position) = fresh.lineage.iter().position(|id| *id == item) else {
                continue;
            };
            let mut lineage = fresh.lineage;
            lineage.remove(position);

            let mut context = lineage.clone();
            context.push(fresh.item);
            let children = fresh
                .children
                .into_iter()
                .map(|child| RatedChild {
                    rating: self.scorer.score(child.item, &context),
                    item: child.item,
                })
                .collect();
            self.store.update(fresh.item, lineage, children).await?;
        }

        // The removed item's direct replies now answer to its parent; when
        // the item was a root they simply become roots themselves.
        if let Some(parent_id) = parent {
            for child in &record.children {
                if self.store.get(child.item).await?.is_none() {
                    continue;
                }
                let rating = self.scorer.score(child.item, &record.lineage);
                self.store
                    .add_child(
                        parent_id,
                        RatedChild {
                            item: child.item,
                            rating,
                        },
                    )
                    .await?;
            }
        }

        self.store.remove(item).await?;
        Ok(())
    }

    /// Bulk-discards the thread records of every item authored by `author`,
    /// without the per-record parent/children cascade. Surviving records
    /// elsewhere may keep dangling references until the owning item's own
    /// deletion path reconciles them; bulk teardown callers accept that.
    #[instrument(skip(self))]
    pub async fn delete_all_by_author(&self, author: UserId) -> Result<()> {
        let authored: Vec<ItemId> = self
            .content
            .items_authored_by(author)
            .await?
            .into_iter()
            .collect();
        self.store.remove_many(&authored).await?;
        Ok(())
    }
}
