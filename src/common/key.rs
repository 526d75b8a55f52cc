use aws_sdk_dynamodb::types;
use serde::Serialize;
use serde_dynamo::{Error, Result, to_attribute_value};
use std::collections;

/// Partition key of a table item.
///
/// The items table has no sort key, so a single attribute identifies a record.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Key<T> {
    /// The attribute name of the key.
    pub(crate) name: String,
    /// The value of the key.
    pub(crate) value: T,
}

impl<T: Serialize> TryFrom<Key<T>> for collections::HashMap<String, types::AttributeValue> {
    type Error = Error;

    fn try_from(key: Key<T>) -> Result<Self> {
        let value = to_attribute_value(key.value)?;
        Ok(Self::from([(key.name, value)]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;
    use serde_json::Value;

    #[rstest]
    #[case::string(
        Key {
            name: "itemId".to_string(),
            value: Value::String(
                "b".to_string()
            ),
        },
        collections::HashMap::from(
            [(
                "itemId".to_string(),
                types::AttributeValue::S(
                    "b".to_string()
                ),
            )]
        )
    )]
    #[case::number(
        Key {
            name: "a".to_string(),
            value: Value::Number(
                42.into()
            ),
        },
        collections::HashMap::from(
            [(
                "a".to_string(),
                types::AttributeValue::N(
                    "42".to_string()
                ),
            )]
        )
    )]
    fn test_key_to_hash_map(
        #[case] key: Key<Value>,
        #[case] expected: collections::HashMap<String, types::AttributeValue>,
    ) {
        let actual: collections::HashMap<String, types::AttributeValue> = key.try_into().unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_borrowed_key_to_hash_map() {
        let key = Key {
            name: "itemId".to_string(),
            value: "1",
        };
        let actual: collections::HashMap<String, types::AttributeValue> = key.try_into().unwrap();
        assert_eq!(
            actual,
            collections::HashMap::from([(
                "itemId".to_string(),
                types::AttributeValue::S("1".to_string())
            )])
        );
    }
}
