use crate::{
    common,
    item::{Item, ItemPatch, attributes},
    read,
    store::{ItemStore, ScanPage, ScanRequest, StoreError},
    write,
};

use aws_sdk_dynamodb::{Client, types};
use chrono::{DateTime, Utc};
use serde_dynamo::{from_item, from_items};

/// [`ItemStore`] over a DynamoDB table keyed by `itemId`.
///
/// Build one per process and share it between invocations; the SDK client
/// keeps its connection pool.
#[derive(Clone, Debug)]
pub struct DynamoStore {
    client: Client,
    table_name: String,
}

impl DynamoStore {
    /// Wrap a configured client.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Name of the backing table.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    fn key<'a>(&self, id: &'a str) -> common::key::Key<&'a str> {
        common::key::Key {
            name: attributes::ITEM_ID.to_string(),
            value: id,
        }
    }

    fn write_args(&self, return_values: Option<types::ReturnValue>) -> write::common::WriteArgs {
        write::common::WriteArgs {
            return_values,
            table_name: self.table_name.clone(),
        }
    }
}

impl ItemStore for DynamoStore {
    #[tracing::instrument(name = "dynamodb.get_item", skip(self), fields(table = %self.table_name), err)]
    async fn get(&self, id: &str) -> Result<Option<Item>, StoreError> {
        let get_item = read::get_item::GetItem {
            key: self.key(id),
            single_read_args: read::common::SingleReadArgs {
                consistent_read: Some(true),
                table_name: self.table_name.clone(),
            },
        };
        let output = get_item
            .send(&self.client)
            .await
            .map_err(aws_sdk_dynamodb::Error::from)?;
        let item: Option<Item> = output.item.map(from_item).transpose()?;
        Ok(item)
    }

    #[tracing::instrument(
        name = "dynamodb.put_item",
        skip(self, item),
        fields(table = %self.table_name, id = %item.id),
        err
    )]
    async fn put(&self, item: &Item) -> Result<(), StoreError> {
        let put_item = write::put_item::PutItem {
            item,
            write_args: self.write_args(None),
        };
        put_item
            .send(&self.client)
            .await
            .map_err(aws_sdk_dynamodb::Error::from)?;
        Ok(())
    }

    #[tracing::instrument(
        name = "dynamodb.update_item",
        skip(self, patch),
        fields(table = %self.table_name),
        err
    )]
    async fn update(
        &self,
        id: &str,
        patch: &ItemPatch,
        updated_at: DateTime<Utc>,
    ) -> Result<Item, StoreError> {
        let set = patch
            .assignments(updated_at)
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect();
        let update_item = write::update_item::UpdateItem {
            key: common::key::Key {
                name: attributes::ITEM_ID.to_string(),
                value: id.to_string(),
            },
            set: write::update_item::SetInputs(set),
            write_args: self.write_args(Some(types::ReturnValue::AllNew)),
        };
        let output = update_item
            .send(&self.client)
            .await
            .map_err(aws_sdk_dynamodb::Error::from)?;
        let new_item = output
            .attributes
            .ok_or_else(|| StoreError::MissingAttributes(id.to_string()))?;
        Ok(from_item(new_item)?)
    }

    #[tracing::instrument(name = "dynamodb.delete_item", skip(self), fields(table = %self.table_name), err)]
    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let delete_item = write::delete_item::DeleteItem {
            key: self.key(id),
            write_args: self.write_args(None),
        };
        delete_item
            .send(&self.client)
            .await
            .map_err(aws_sdk_dynamodb::Error::from)?;
        Ok(())
    }

    #[tracing::instrument(name = "dynamodb.scan", skip(self), fields(table = %self.table_name), err)]
    async fn scan(&self, request: &ScanRequest) -> Result<ScanPage, StoreError> {
        let condition = request.category.as_ref().map(|category| {
            common::condition::ConditionMap(vec![common::condition::Equals {
                name: attributes::CATEGORY.to_string(),
                value: category.as_str(),
            }])
        });
        let scan = read::scan::Scan {
            multiple_read_args: read::common::MultipleReadArgs {
                condition,
                limit: request.limit,
                table_name: self.table_name.clone(),
                ..Default::default()
            },
        };
        let output = scan
            .send(&self.client)
            .await
            .map_err(aws_sdk_dynamodb::Error::from)?;
        let items = from_items(output.items.unwrap_or_default())?;
        let has_more = output
            .last_evaluated_key
            .is_some_and(|last_evaluated_key| !last_evaluated_key.is_empty());
        Ok(ScanPage { items, has_more })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use aws_sdk_dynamodb::operation::{
        delete_item::DeleteItemOutput, get_item::GetItemOutput, put_item::PutItemOutput,
        scan::ScanOutput, update_item::UpdateItemOutput,
    };
    use aws_smithy_mocks::{mock, mock_client};
    use chrono::TimeZone;
    use std::collections;

    const TABLE: &str = "items";

    fn at(seconds: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(seconds, 0).unwrap()
    }

    fn attribute(value: &str) -> types::AttributeValue {
        types::AttributeValue::S(value.to_string())
    }

    fn stored(id: &str, category: &str) -> collections::HashMap<String, types::AttributeValue> {
        collections::HashMap::from([
            ("itemId".to_string(), attribute(id)),
            ("name".to_string(), attribute("Lamp")),
            ("description".to_string(), attribute("")),
            ("category".to_string(), attribute(category)),
            ("createdAt".to_string(), attribute("2023-11-14T22:13:20.000000Z")),
            ("updatedAt".to_string(), attribute("2023-11-14T22:13:20.000000Z")),
        ])
    }

    fn expected(id: &str, category: &str) -> Item {
        Item {
            id: id.to_string(),
            name: "Lamp".to_string(),
            description: String::new(),
            category: category.to_string(),
            created_at: Some(at(1_700_000_000)),
            updated_at: at(1_700_000_000),
        }
    }

    #[tokio::test]
    async fn test_get_found() {
        let rule = mock!(aws_sdk_dynamodb::Client::get_item)
            .match_requests(|input| {
                input.table_name() == Some(TABLE)
                    && input.consistent_read() == Some(true)
                    && input.key().and_then(|key| key.get("itemId")) == Some(&attribute("1"))
            })
            .then_output(|| GetItemOutput::builder().set_item(Some(stored("1", "home"))).build());
        let client = mock_client!(aws_sdk_dynamodb, [&rule]);
        let store = DynamoStore::new(client, TABLE);
        let actual = store.get("1").await.unwrap();
        assert_eq!(actual, Some(expected("1", "home")));
        assert_eq!(rule.num_calls(), 1);
    }

    fn recreated(id: &str) -> collections::HashMap<String, types::AttributeValue> {
        collections::HashMap::from([
            ("itemId".to_string(), attribute(id)),
            ("category".to_string(), attribute("home")),
            ("updatedAt".to_string(), attribute("2023-11-14T22:13:20.000000Z")),
        ])
    }

    fn recreated_item(id: &str) -> Item {
        Item {
            id: id.to_string(),
            name: String::new(),
            description: String::new(),
            category: "home".to_string(),
            created_at: None,
            updated_at: at(1_700_000_000),
        }
    }

    #[tokio::test]
    async fn test_get_recreated_record() {
        let rule = mock!(aws_sdk_dynamodb::Client::get_item)
            .then_output(|| GetItemOutput::builder().set_item(Some(recreated("x"))).build());
        let client = mock_client!(aws_sdk_dynamodb, [&rule]);
        let store = DynamoStore::new(client, TABLE);
        assert_eq!(store.get("x").await.unwrap(), Some(recreated_item("x")));
    }

    #[tokio::test]
    async fn test_update_returning_recreated_record() {
        let rule = mock!(aws_sdk_dynamodb::Client::update_item)
            .then_output(|| {
                UpdateItemOutput::builder()
                    .set_attributes(Some(recreated("x")))
                    .build()
            });
        let client = mock_client!(aws_sdk_dynamodb, [&rule]);
        let store = DynamoStore::new(client, TABLE);
        let patch = ItemPatch {
            category: Some("home".to_string()),
            ..Default::default()
        };
        let actual = store.update("x", &patch, at(1_700_000_000)).await.unwrap();
        assert_eq!(actual, recreated_item("x"));
    }

    #[tokio::test]
    async fn test_scan_with_recreated_record() {
        let rule = mock!(aws_sdk_dynamodb::Client::scan).then_output(|| {
            ScanOutput::builder()
                .set_items(Some(vec![stored("1", "home"), recreated("x")]))
                .build()
        });
        let client = mock_client!(aws_sdk_dynamodb, [&rule]);
        let store = DynamoStore::new(client, TABLE);
        let actual = store.scan(&ScanRequest::default()).await.unwrap();
        assert_eq!(
            actual,
            ScanPage {
                items: vec![expected("1", "home"), recreated_item("x")],
                has_more: false,
            }
        );
    }

    #[tokio::test]
    async fn test_get_missing() {
        let rule = mock!(aws_sdk_dynamodb::Client::get_item)
            .then_output(|| GetItemOutput::builder().build());
        let client = mock_client!(aws_sdk_dynamodb, [&rule]);
        let store = DynamoStore::new(client, TABLE);
        assert_eq!(store.get("1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_put() {
        let rule = mock!(aws_sdk_dynamodb::Client::put_item)
            .match_requests(|input| {
                input.table_name() == Some(TABLE) && input.item() == Some(&stored("1", "home"))
            })
            .then_output(|| PutItemOutput::builder().build());
        let client = mock_client!(aws_sdk_dynamodb, [&rule]);
        let store = DynamoStore::new(client, TABLE);
        store.put(&expected("1", "home")).await.unwrap();
        assert_eq!(rule.num_calls(), 1);
    }

    #[tokio::test]
    async fn test_update_sets_timestamp_and_patched_fields() {
        let rule = mock!(aws_sdk_dynamodb::Client::update_item)
            .match_requests(|input| {
                input.update_expression() == Some("SET #updatedAt = :set0, #category = :set1")
                    && input.return_values() == Some(&types::ReturnValue::AllNew)
                    && input.expression_attribute_names()
                        == Some(&collections::HashMap::from([
                            ("#updatedAt".to_string(), "updatedAt".to_string()),
                            ("#category".to_string(), "category".to_string()),
                        ]))
                    && input.expression_attribute_values()
                        == Some(&collections::HashMap::from([
                            (":set0".to_string(), attribute("2023-11-14T22:13:20.000000Z")),
                            (":set1".to_string(), attribute("garden")),
                        ]))
            })
            .then_output(|| {
                UpdateItemOutput::builder()
                    .set_attributes(Some(stored("1", "garden")))
                    .build()
            });
        let client = mock_client!(aws_sdk_dynamodb, [&rule]);
        let store = DynamoStore::new(client, TABLE);
        let patch = ItemPatch {
            category: Some("garden".to_string()),
            ..Default::default()
        };
        let actual = store.update("1", &patch, at(1_700_000_000)).await.unwrap();
        assert_eq!(actual, expected("1", "garden"));
        assert_eq!(rule.num_calls(), 1);
    }

    #[tokio::test]
    async fn test_update_without_attributes_fails() {
        let rule = mock!(aws_sdk_dynamodb::Client::update_item)
            .then_output(|| UpdateItemOutput::builder().build());
        let client = mock_client!(aws_sdk_dynamodb, [&rule]);
        let store = DynamoStore::new(client, TABLE);
        let error = store
            .update("1", &ItemPatch::default(), at(1_700_000_000))
            .await
            .unwrap_err();
        assert!(matches!(error, StoreError::MissingAttributes(id) if id == "1"));
    }

    #[tokio::test]
    async fn test_delete() {
        let rule = mock!(aws_sdk_dynamodb::Client::delete_item)
            .match_requests(|input| input.key().and_then(|key| key.get("itemId")) == Some(&attribute("1")))
            .then_output(|| DeleteItemOutput::builder().build());
        let client = mock_client!(aws_sdk_dynamodb, [&rule]);
        let store = DynamoStore::new(client, TABLE);
        store.delete("1").await.unwrap();
        assert_eq!(rule.num_calls(), 1);
    }

    #[tokio::test]
    async fn test_scan_with_filter_and_limit() {
        let rule = mock!(aws_sdk_dynamodb::Client::scan)
            .match_requests(|input| {
                input.filter_expression() == Some("#category = :category_eq0")
                    && input.limit() == Some(2)
            })
            .then_output(|| {
                ScanOutput::builder()
                    .set_items(Some(vec![stored("1", "home"), stored("2", "home")]))
                    .set_last_evaluated_key(Some(collections::HashMap::from([(
                        "itemId".to_string(),
                        attribute("2"),
                    )])))
                    .build()
            });
        let client = mock_client!(aws_sdk_dynamodb, [&rule]);
        let store = DynamoStore::new(client, TABLE);
        let request = ScanRequest {
            category: Some("home".to_string()),
            limit: Some(2),
        };
        let actual = store.scan(&request).await.unwrap();
        assert_eq!(
            actual,
            ScanPage {
                items: vec![expected("1", "home"), expected("2", "home")],
                has_more: true,
            }
        );
    }

    #[tokio::test]
    async fn test_scan_whole_table() {
        let rule = mock!(aws_sdk_dynamodb::Client::scan)
            .match_requests(|input| input.filter_expression().is_none() && input.limit().is_none())
            .then_output(|| ScanOutput::builder().build());
        let client = mock_client!(aws_sdk_dynamodb, [&rule]);
        let store = DynamoStore::new(client, TABLE);
        let actual = store.scan(&ScanRequest::default()).await.unwrap();
        assert_eq!(actual, ScanPage::default());
    }
}
