use crate::{common, read};

use aws_sdk_dynamodb::{Client, error, operation, types};
use serde::Serialize;
use serde_dynamo::{Error, Result};
use std::collections;

/// get item operation
#[derive(Clone, Debug, Default, PartialEq)]
struct GetItemInput {
    key: collections::HashMap<String, types::AttributeValue>,
    single_read_args: read::common::SingleReadArgs,
}

/// Get item request.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct GetItem<T> {
    /// The primary key of the item to retrieve.
    pub(crate) key: common::key::Key<T>,
    /// Table name and read consistency.
    pub(crate) single_read_args: read::common::SingleReadArgs,
}

impl<T: Serialize> TryFrom<GetItem<T>> for GetItemInput {
    type Error = Error;

    fn try_from(get_item: GetItem<T>) -> Result<Self> {
        let key = get_item.key.try_into()?;
        let operation = Self {
            key,
            single_read_args: get_item.single_read_args,
        };
        Ok(operation)
    }
}

impl<T: Serialize> GetItem<T> {
    /// Execute the get item request.
    pub(crate) async fn send(
        self,
        client: &Client,
    ) -> Result<
        operation::get_item::GetItemOutput,
        error::SdkError<operation::get_item::GetItemError>,
    > {
        let get_item: GetItemInput = self.try_into().map_err(error::BuildError::other)?;
        let builder = client.get_item().set_key(Some(get_item.key));
        read::common::apply_single_read_operation!(builder, get_item.single_read_args)
            .send()
            .await
    }
}
