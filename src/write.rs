//! Write requests against the items table.
//!
//! - Putting new items
//! - Updating attributes of an item with a SET expression
//! - Deleting items by primary key

/// Common arguments and builder helpers for write requests.
pub(crate) mod common;

/// Delete item request for removing items from tables.
pub(crate) mod delete_item;

/// Put item request for creating or replacing items.
pub(crate) mod put_item;

/// Update item request for modifying existing items.
pub(crate) mod update_item;
