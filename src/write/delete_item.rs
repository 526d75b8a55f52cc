use crate::{common, write};

use aws_sdk_dynamodb::{Client, error, operation, types};
use serde::Serialize;
use serde_dynamo::{Error, Result};
use std::collections;

/// delete item operation
#[derive(Debug, PartialEq)]
struct DeleteItemInput {
    key: collections::HashMap<String, types::AttributeValue>,
    write_operation: write::common::WriteInput,
}

/// Delete item request. Deleting an absent key succeeds without effect.
#[derive(Debug, PartialEq)]
pub(crate) struct DeleteItem<T> {
    /// The primary key of the item to delete.
    pub(crate) key: common::key::Key<T>,
    /// Table name and return values.
    pub(crate) write_args: write::common::WriteArgs,
}

impl<T: Serialize> TryFrom<DeleteItem<T>> for DeleteItemInput {
    type Error = Error;

    fn try_from(delete_item: DeleteItem<T>) -> Result<Self> {
        let key = delete_item.key.try_into()?;
        let operation = Self {
            key,
            write_operation: delete_item.write_args.into(),
        };
        Ok(operation)
    }
}

impl<T: Serialize> DeleteItem<T> {
    /// Execute the delete item request.
    pub(crate) async fn send(
        self,
        client: &Client,
    ) -> Result<
        operation::delete_item::DeleteItemOutput,
        error::SdkError<operation::delete_item::DeleteItemError>,
    > {
        let delete_item: DeleteItemInput = self.try_into().map_err(error::BuildError::other)?;
        let builder = client.delete_item().set_key(Some(delete_item.key));
        write::common::apply_write_operation!(builder, delete_item.write_operation)
            .send()
            .await
    }
}
