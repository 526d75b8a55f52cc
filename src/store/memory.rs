use crate::{
    item::{DEFAULT_CATEGORY, Item, ItemPatch},
    store::{ItemStore, ScanPage, ScanRequest, StoreError},
};

use chrono::{DateTime, Utc};
use std::{collections, sync};

/// [`ItemStore`] holding items in process memory.
///
/// Mirrors the DynamoDB behaviour the handlers depend on: puts overwrite,
/// deletes of an absent id succeed, and scans evaluate at most `limit` items
/// in key order before filtering. A scan that reaches its limit reports
/// `has_more` even when nothing is left, as DynamoDB returns a
/// `LastEvaluatedKey` whenever the limit stops it.
///
/// An update on an absent id creates the item the way [`DynamoStore`] decodes
/// a record holding only the key, `updatedAt` and the patched fields: no
/// `created_at`, an empty `name`, and the default category. Unlike DynamoDB,
/// a category filter matches that default even though no `category` attribute
/// was written.
///
/// [`DynamoStore`]: crate::store::dynamo::DynamoStore
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: sync::RwLock<collections::BTreeMap<String, Item>>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store seeded with items.
    pub fn with_items(items: impl IntoIterator<Item = Item>) -> Self {
        let items = items
            .into_iter()
            .map(|item| (item.id.clone(), item))
            .collect();
        Self {
            items: sync::RwLock::new(items),
        }
    }

    /// Number of stored items.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether the store holds no items.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> sync::RwLockReadGuard<'_, collections::BTreeMap<String, Item>> {
        self.items.read().unwrap_or_else(sync::PoisonError::into_inner)
    }

    fn write(&self) -> sync::RwLockWriteGuard<'_, collections::BTreeMap<String, Item>> {
        self.items.write().unwrap_or_else(sync::PoisonError::into_inner)
    }
}

impl ItemStore for MemoryStore {
    async fn get(&self, id: &str) -> Result<Option<Item>, StoreError> {
        Ok(self.read().get(id).cloned())
    }

    async fn put(&self, item: &Item) -> Result<(), StoreError> {
        self.write().insert(item.id.clone(), item.clone());
        Ok(())
    }

    async fn update(
        &self,
        id: &str,
        patch: &ItemPatch,
        updated_at: DateTime<Utc>,
    ) -> Result<Item, StoreError> {
        let mut items = self.write();
        let item = items.entry(id.to_string()).or_insert_with(|| Item {
            id: id.to_string(),
            name: String::new(),
            description: String::new(),
            category: DEFAULT_CATEGORY.to_string(),
            created_at: None,
            updated_at,
        });
        patch.apply_to(item, updated_at);
        Ok(item.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.write().remove(id);
        Ok(())
    }

    async fn scan(&self, request: &ScanRequest) -> Result<ScanPage, StoreError> {
        let items = self.read();
        let limit = request
            .limit
            .and_then(|limit| usize::try_from(limit).ok());
        let matches = |item: &&Item| {
            request
                .category
                .as_ref()
                .is_none_or(|category| &item.category == category)
        };
        let page = items
            .values()
            .take(limit.unwrap_or(usize::MAX))
            .filter(matches)
            .cloned()
            .collect();
        Ok(ScanPage {
            items: page,
            has_more: limit.is_some_and(|limit| items.len() >= limit),
        })
    }
}
