//! Persistence of items.
//!
//! Handlers talk to the table through [`ItemStore`], so the same handler code
//! runs against DynamoDB in production and against [`memory::MemoryStore`]
//! in tests.

/// DynamoDB-backed store.
pub mod dynamo;

/// In-process store with DynamoDB semantics.
pub mod memory;

use crate::item::{Item, ItemPatch};

use chrono::{DateTime, Utc};
use std::future::Future;

/// Failure of a store operation. Always reported to clients as an internal error.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The DynamoDB request failed.
    #[error("dynamodb request failed: {0}")]
    Dynamo(#[from] aws_sdk_dynamodb::Error),
    /// A record could not be converted to or from DynamoDB attributes.
    #[error("item conversion failed: {0}")]
    Conversion(#[from] serde_dynamo::Error),
    /// An update returned no attributes for the item.
    #[error("update of item {0} returned no attributes")]
    MissingAttributes(String),
}

/// Parameters of a single-page scan.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ScanRequest {
    /// Only items whose category equals this value are returned.
    pub category: Option<String>,
    /// Maximum number of items evaluated by the scan.
    ///
    /// With a category filter, fewer items than this may be returned.
    pub limit: Option<i32>,
}

/// One page of scan results.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ScanPage {
    /// Items that passed the filter.
    pub items: Vec<Item>,
    /// Whether the scan stopped before reaching the end of the table.
    pub has_more: bool,
}

/// Key-based access to the items table.
///
/// Every operation addresses a single item and is atomic on its own; there
/// are no cross-item transactions.
pub trait ItemStore {
    /// Fetch an item by id.
    fn get(&self, id: &str) -> impl Future<Output = Result<Option<Item>, StoreError>> + Send;

    /// Write an item, replacing any item with the same id.
    fn put(&self, item: &Item) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Apply a patch and `updated_at` to an item and return the resulting item.
    ///
    /// Like DynamoDB, an absent id is not an error: the update creates it.
    fn update(
        &self,
        id: &str,
        patch: &ItemPatch,
        updated_at: DateTime<Utc>,
    ) -> impl Future<Output = Result<Item, StoreError>> + Send;

    /// Delete an item. Deleting an absent id succeeds.
    fn delete(&self, id: &str) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Read one page of the table.
    fn scan(&self, request: &ScanRequest)
    -> impl Future<Output = Result<ScanPage, StoreError>> + Send;
}
