//! In-memory `ThreadStore` keyed by item id.

use async_trait::async_trait;
use dashmap::DashMap;
use domains::models::{ItemId, RatedChild, ThreadRecord};
use domains::ports::ThreadStore;

#[derive(Default)]
pub struct MemoryThreadStore {
    records: DashMap<ItemId, ThreadRecord>,
}

impl MemoryThreadStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ThreadStore for MemoryThreadStore {
    async fn insert(&self, record: ThreadRecord) -> anyhow::Result<()> {
        self.records.insert(record.item, record);
        Ok(())
    }

    async fn get(&self, item: ItemId) -> anyhow::Result<Option<ThreadRecord>> {
        Ok(self.records.get(&item).map(|r| r.value().clone()))
    }

    async fn remove(&self, item: ItemId) -> anyhow::Result<bool> {
        Ok(self.records.remove(&item).is_some())
    }

    async fn remove_many(&self, items: &[ItemId]) -> anyhow::Result<()> {
        for item in items {
            self.records.remove(item);
        }
        Ok(())
    }

    async fn add_child(&self, parent: ItemId, child: RatedChild) -> anyhow::Result<bool> {
        Ok(self
            .records
            .get_mut(&parent)
            .map(|mut record| {
                if record.children.iter().any(|c| c.item == child.item) {
                    false
                } else {
                    record.children.push(child);
                    true
                }
            })
            .unwrap_or(false))
    }

    async fn remove_child(&self, parent: ItemId, child: ItemId) -> anyhow::Result<bool> {
        Ok(self
            .records
            .get_mut(&parent)
            .map(|mut record| {
                let before = record.children.len();
                record.children.retain(|c| c.item != child);
                record.children.len() != before
            })
            .unwrap_or(false))
    }

    async fn descendants_of(&self, item: ItemId) -> anyhow::Result<Vec<ThreadRecord>> {
        Ok(self
            .records
            .iter()
            .filter(|entry| entry.lineage.contains(&item))
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn update(
        &self,
        item: ItemId,
        lineage: Vec<ItemId>,
        children: Vec<RatedChild>,
    ) -> anyhow::Result<bool> {
        Ok(self
            .records
            .get_mut(&item)
            .map(|mut record| {
                record.lineage = lineage;
                record.children = children;
                true
            })
            .unwrap_or(false))
    }
}
