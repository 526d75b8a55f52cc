//! The item record and the request payloads that create or change it.

use chrono::{DateTime, SubsecRound, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Attribute names of an item, as stored in the table and rendered in responses.
pub mod attributes {
    /// Partition key of the items table.
    pub const ITEM_ID: &str = "itemId";
    /// Display name.
    pub const NAME: &str = "name";
    /// Free-form description.
    pub const DESCRIPTION: &str = "description";
    /// Category used by the list filter.
    pub const CATEGORY: &str = "category";
    /// Creation timestamp.
    pub const CREATED_AT: &str = "createdAt";
    /// Last update timestamp.
    pub const UPDATED_AT: &str = "updatedAt";
}

/// Fields a client may change through an update.
pub const MUTABLE_FIELDS: [&str; 3] = [
    attributes::NAME,
    attributes::DESCRIPTION,
    attributes::CATEGORY,
];

/// Category assigned when a create request does not name one.
pub const DEFAULT_CATEGORY: &str = "general";

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// RFC 3339 timestamps with microsecond precision, always in UTC (`Z`).
///
/// Values written by older deployments without an offset are read as UTC.
pub mod timestamp {
    use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de};

    /// Render a timestamp the way it is stored.
    pub fn format(value: &DateTime<Utc>) -> String {
        value.to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    /// Parse a stored timestamp.
    pub fn parse(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        match DateTime::parse_from_rfc3339(value) {
            Ok(parsed) => Ok(parsed.with_timezone(&Utc)),
            Err(error) => NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
                .map(|naive| naive.and_utc())
                .map_err(|_| error),
        }
    }

    /// Serialize with [`format`].
    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(value))
    }

    /// Deserialize with [`parse`].
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let value = String::deserialize(deserializer)?;
        parse(&value).map_err(de::Error::custom)
    }

    /// The same format for attributes a record may lack.
    pub mod optional {
        use chrono::{DateTime, Utc};
        use serde::{Deserialize, Deserializer, Serializer, de};

        /// Serialize with [`super::format`]. Pair with `skip_serializing_if`.
        pub fn serialize<S: Serializer>(
            value: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(value) => super::serialize(value, serializer),
                None => serializer.serialize_none(),
            }
        }

        /// Deserialize with [`super::parse`]. Pair with `default`.
        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            Option::<String>::deserialize(deserializer)?
                .map(|value| super::parse(&value).map_err(de::Error::custom))
                .transpose()
        }
    }
}

/// Current time at the precision timestamps are stored with.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// The `updatedAt` to record for an update happening at `now`.
///
/// Keeps `updatedAt` strictly increasing per item even when the clock of the
/// invoking instance lags behind the one that wrote `previous`.
pub fn next_updated_at(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    if now > previous {
        now
    } else {
        previous + TimeDelta::microseconds(1)
    }
}

/// A stored item.
///
/// An update racing a delete leaves a record holding only the key, `updatedAt`
/// and the patched fields. Such records still decode: `name` is then empty,
/// `created_at` is `None` and `createdAt` stays absent when the item is
/// rendered.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Server-generated identifier, the table's partition key.
    #[serde(rename = "itemId")]
    pub id: String,
    /// Display name, empty only for records recreated by a racing update.
    #[serde(default)]
    pub name: String,
    /// Free-form description, empty unless given.
    #[serde(default)]
    pub description: String,
    /// Category, [`DEFAULT_CATEGORY`] unless given.
    #[serde(default = "default_category")]
    pub category: String,
    /// Set once when the item is created; `None` for records recreated by a
    /// racing update.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "timestamp::optional"
    )]
    pub created_at: Option<DateTime<Utc>>,
    /// Refreshed on every update, never earlier than `created_at`.
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

/// Body of a create request.
///
/// Unknown fields are ignored. `name` is optional here so that its absence
/// can be reported with a dedicated message.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct NewItem {
    /// Required display name.
    pub name: Option<String>,
    /// Optional description.
    pub description: Option<String>,
    /// Optional category.
    pub category: Option<String>,
}

impl NewItem {
    /// Build the item to store, or `None` when the request carries no name.
    pub fn into_item(self, id: String, now: DateTime<Utc>) -> Option<Item> {
        let name = self.name?;
        Some(Item {
            id,
            name,
            description: self.description.unwrap_or_default(),
            category: self.category.unwrap_or_else(default_category),
            created_at: Some(now),
            updated_at: now,
        })
    }
}

/// Partial update of the [`MUTABLE_FIELDS`].
///
/// A field that is absent or `null` in the request body is left unchanged.
/// Any other field in the body is ignored.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
pub struct ItemPatch {
    /// New display name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New category.
    pub category: Option<String>,
}

impl ItemPatch {
    fn field(&self, name: &str) -> Option<&String> {
        match name {
            attributes::NAME => self.name.as_ref(),
            attributes::DESCRIPTION => self.description.as_ref(),
            attributes::CATEGORY => self.category.as_ref(),
            _ => None,
        }
    }

    /// Attribute assignments for this patch: `updatedAt` first, then every
    /// allow-listed field the patch sets, in [`MUTABLE_FIELDS`] order.
    pub fn assignments(&self, updated_at: DateTime<Utc>) -> Vec<(&'static str, String)> {
        let mut assignments = vec![(attributes::UPDATED_AT, timestamp::format(&updated_at))];
        assignments.extend(
            MUTABLE_FIELDS
                .into_iter()
                .filter_map(|name| self.field(name).map(|value| (name, value.clone()))),
        );
        assignments
    }

    /// Apply the patch to an item in place.
    pub fn apply_to(&self, item: &mut Item, updated_at: DateTime<Utc>) {
        if let Some(name) = &self.name {
            item.name.clone_from(name);
        }
        if let Some(description) = &self.description {
            item.description.clone_from(description);
        }
        if let Some(category) = &self.category {
            item.category.clone_from(category);
        }
        item.updated_at = updated_at;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::TimeZone;
    use rstest::rstest;
    use serde_json::json;

    fn at(seconds: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(seconds, 0).unwrap()
    }

    fn item() -> Item {
        Item {
            id: "1".to_string(),
            name: "Lamp".to_string(),
            description: "Desk lamp".to_string(),
            category: "home".to_string(),
            created_at: Some(at(1_700_000_000)),
            updated_at: at(1_700_000_000),
        }
    }

    #[test]
    fn test_item_serializes_with_stored_attribute_names() {
        let value = serde_json::to_value(item()).unwrap();
        assert_eq!(
            value,
            json!({
                "itemId": "1",
                "name": "Lamp",
                "description": "Desk lamp",
                "category": "home",
                "createdAt": "2023-11-14T22:13:20.000000Z",
                "updatedAt": "2023-11-14T22:13:20.000000Z",
            })
        );
    }

    #[test]
    fn test_item_defaults_missing_optional_attributes() {
        let item: Item = serde_json::from_value(json!({
            "itemId": "1",
            "name": "Lamp",
            "createdAt": "2023-11-14T22:13:20Z",
            "updatedAt": "2023-11-14T22:13:20.5",
        }))
        .unwrap();
        assert_eq!(item.description, "");
        assert_eq!(item.category, DEFAULT_CATEGORY);
        assert_eq!(item.updated_at, at(1_700_000_000) + TimeDelta::milliseconds(500));
    }

    #[test]
    fn test_item_decodes_record_recreated_by_update() {
        let item: Item = serde_json::from_value(json!({
            "itemId": "1",
            "category": "home",
            "updatedAt": "2023-11-14T22:13:20.000000Z",
        }))
        .unwrap();
        assert_eq!(
            item,
            Item {
                id: "1".to_string(),
                name: String::new(),
                description: String::new(),
                category: "home".to_string(),
                created_at: None,
                updated_at: at(1_700_000_000),
            }
        );
        assert!(serde_json::to_value(&item).unwrap().get("createdAt").is_none());
    }

    #[test]
    fn test_item_rejects_malformed_created_at() {
        let actual = serde_json::from_value::<Item>(json!({
            "itemId": "1",
            "createdAt": "yesterday",
            "updatedAt": "2023-11-14T22:13:20.000000Z",
        }));
        assert!(actual.is_err());
    }

    #[rstest]
    #[case::all_fields(
        json!({"name": "a", "description": "b", "category": "c"}),
        Some(("a", "b", "c"))
    )]
    #[case::defaults(json!({"name": "a"}), Some(("a", "", "general")))]
    #[case::ignores_unknown(json!({"name": "a", "itemId": "x", "price": 3}), Some(("a", "", "general")))]
    #[case::missing_name(json!({"description": "b"}), None)]
    #[case::null_name(json!({"name": null}), None)]
    fn test_new_item_into_item(
        #[case] body: serde_json::Value,
        #[case] expected: Option<(&str, &str, &str)>,
    ) {
        let new_item: NewItem = serde_json::from_value(body).unwrap();
        let now = at(1_700_000_000);
        let actual = new_item.into_item("id".to_string(), now);
        let expected = expected.map(|(name, description, category)| Item {
            id: "id".to_string(),
            name: name.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            created_at: Some(now),
            updated_at: now,
        });
        assert_eq!(actual, expected);
    }

    #[rstest]
    #[case::only_timestamp(ItemPatch::default(), vec![])]
    #[case::single(
        ItemPatch {
            description: Some("b".to_string()),
            ..Default::default()
        },
        vec![("description", "b")]
    )]
    #[case::all_in_allow_list_order(
        ItemPatch {
            category: Some("c".to_string()),
            name: Some("a".to_string()),
            description: Some("b".to_string()),
        },
        vec![("name", "a"), ("description", "b"), ("category", "c")]
    )]
    fn test_patch_assignments(#[case] patch: ItemPatch, #[case] fields: Vec<(&str, &str)>) {
        let updated_at = at(1_700_000_000);
        let mut expected = vec![("updatedAt", "2023-11-14T22:13:20.000000Z".to_string())];
        expected.extend(fields.into_iter().map(|(name, value)| (name, value.to_string())));
        assert_eq!(patch.assignments(updated_at), expected);
    }

    #[test]
    fn test_patch_from_body_treats_null_as_unchanged() {
        let patch: ItemPatch = serde_json::from_value(json!({
            "name": null,
            "category": "c",
            "createdAt": "ignored",
        }))
        .unwrap();
        assert_eq!(
            patch,
            ItemPatch {
                category: Some("c".to_string()),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_patch_apply_to() {
        let mut actual = item();
        let patch = ItemPatch {
            name: Some("Lantern".to_string()),
            ..Default::default()
        };
        patch.apply_to(&mut actual, at(1_700_000_100));
        let expected = Item {
            name: "Lantern".to_string(),
            updated_at: at(1_700_000_100),
            ..item()
        };
        assert_eq!(actual, expected);
    }

    #[rstest]
    #[case::clock_advanced(at(10), at(20), at(20))]
    #[case::same_instant(at(10), at(10), at(10) + TimeDelta::microseconds(1))]
    #[case::clock_behind(at(10), at(5), at(10) + TimeDelta::microseconds(1))]
    fn test_next_updated_at(
        #[case] previous: DateTime<Utc>,
        #[case] now: DateTime<Utc>,
        #[case] expected: DateTime<Utc>,
    ) {
        assert_eq!(next_updated_at(previous, now), expected);
    }

    #[test]
    fn test_now_round_trips_through_storage_format() {
        let now = now();
        assert_eq!(timestamp::parse(&timestamp::format(&now)).unwrap(), now);
    }
}
