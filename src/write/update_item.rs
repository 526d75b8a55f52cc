use crate::{common, write};

use aws_sdk_dynamodb::{Client, error, operation, types};
use serde::Serialize;
use serde_dynamo::{Error, Result, to_attribute_value};
use std::collections;

/// Attribute assignments for a SET update expression, applied in order.
///
/// ```text
/// [("name", "New"), ("updatedAt", "...")]  =>  SET #name = :set0, #updatedAt = :set1
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct SetInputs<T>(pub(crate) Vec<(String, T)>);

impl<T: Serialize> TryFrom<SetInputs<T>> for common::ExpressionInput {
    type Error = Error;

    fn try_from(set_inputs: SetInputs<T>) -> Result<Self> {
        let mut operations = Vec::with_capacity(set_inputs.0.len());
        for (index, (name, value)) in set_inputs.0.into_iter().enumerate() {
            let placeholder = common::add_placeholder(&name);
            let value_placeholder = format!(":set{index}");
            let value = to_attribute_value(value)?;
            let operation = common::ExpressionInput {
                expression: format!("{placeholder} = {value_placeholder}"),
                expression_attribute_names: collections::HashMap::from([(placeholder, name)]),
                expression_attribute_values: collections::HashMap::from([(
                    value_placeholder,
                    value,
                )]),
            };
            operations.push(operation);
        }
        let mut operation = common::ExpressionInput::merge(", ", operations);
        if !operation.expression.is_empty() {
            operation.expression = format!("SET {}", operation.expression);
        }
        Ok(operation)
    }
}

/// update item operation
#[derive(Clone, Debug, Default, PartialEq)]
struct UpdateItemInput {
    key: collections::HashMap<String, types::AttributeValue>,
    update_expression: String,
    write_operation: write::common::WriteInput,
}

/// Update item request.
///
/// DynamoDB applies the whole expression atomically. Updating an absent key
/// creates an item holding the key and the assigned attributes.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct UpdateItem<T> {
    /// The primary key of the item to update.
    pub(crate) key: common::key::Key<T>,
    /// The attributes to assign.
    pub(crate) set: SetInputs<T>,
    /// Table name and return values.
    pub(crate) write_args: write::common::WriteArgs,
}

impl<T: Serialize> TryFrom<UpdateItem<T>> for UpdateItemInput {
    type Error = Error;

    fn try_from(update_item: UpdateItem<T>) -> Result<Self> {
        let key = update_item.key.try_into()?;
        let mut write_operation: write::common::WriteInput = update_item.write_args.into();
        let operation = update_item.set.try_into()?;
        let update_expression = write_operation.merge_expression(operation);
        let operation = Self {
            key,
            update_expression,
            write_operation,
        };
        Ok(operation)
    }
}

impl<T: Serialize> UpdateItem<T> {
    /// Execute the update item request.
    pub(crate) async fn send(
        self,
        client: &Client,
    ) -> Result<
        operation::update_item::UpdateItemOutput,
        error::SdkError<operation::update_item::UpdateItemError>,
    > {
        let update_item: UpdateItemInput = self.try_into().map_err(error::BuildError::other)?;
        let builder = client
            .update_item()
            .set_key(Some(update_item.key))
            .update_expression(update_item.update_expression);
        write::common::apply_write_operation!(builder, update_item.write_operation)
            .send()
            .await
    }
}
