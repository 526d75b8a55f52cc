//! Read requests against the items table.
//!
//! - Getting a single item by primary key
//! - Scanning one page of the table with an optional filter

/// Common arguments and builder helpers for read requests.
pub(crate) mod common;

/// Get item request for retrieving a single item by primary key.
pub(crate) mod get_item;

/// Scan request for retrieving a page of items from a table.
pub(crate) mod scan;
