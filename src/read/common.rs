use crate::common;

use aws_sdk_dynamodb::types;
use serde::Serialize;
use serde_dynamo::{Error, Result};
use std::collections;

/// Arguments for single-item read requests (GetItem).
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) struct SingleReadArgs {
    /// `true` for strongly consistent reads, `false` or `None` for eventually consistent reads.
    pub(crate) consistent_read: Option<bool>,
    /// The name of the table to read from.
    pub(crate) table_name: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct MultipleReadInput {
    pub(crate) consistent_read: Option<bool>,
    pub(crate) expression_attribute_names: Option<collections::HashMap<String, String>>,
    pub(crate) expression_attribute_values:
        Option<collections::HashMap<String, types::AttributeValue>>,
    pub(crate) filter_expression: Option<String>,
    pub(crate) limit: Option<i32>,
    pub(crate) table_name: String,
}

/// Arguments for multiple-item read requests (Scan).
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct MultipleReadArgs<T> {
    /// Filter applied to every evaluated item.
    pub(crate) condition: Option<common::condition::ConditionMap<T>>,
    /// `true` for strongly consistent reads, `false` or `None` for eventually consistent reads.
    pub(crate) consistent_read: Option<bool>,
    /// The maximum number of items to evaluate (not necessarily the number of matching items).
    ///
    /// When evaluation stops early DynamoDB reports a `last_evaluated_key`.
    pub(crate) limit: Option<i32>,
    /// The name of the table to read from.
    pub(crate) table_name: String,
}

impl<T: Serialize> TryFrom<MultipleReadArgs<T>> for MultipleReadInput {
    type Error = Error;

    fn try_from(multiple_read_args: MultipleReadArgs<T>) -> Result<Self> {
        let condition_operation: Option<common::ExpressionInput> = multiple_read_args
            .condition
            .map(|condition| condition.try_into())
            .transpose()?;
        let mut expression_attribute_names = None;
        let mut expression_attribute_values = None;
        let filter_expression = condition_operation
            .map(|operation| {
                operation.merge_into(
                    &mut expression_attribute_names,
                    &mut expression_attribute_values,
                )
            })
            .filter(|expression| !expression.is_empty());
        let operation = Self {
            consistent_read: multiple_read_args.consistent_read,
            expression_attribute_names,
            expression_attribute_values,
            filter_expression,
            limit: multiple_read_args.limit,
            table_name: multiple_read_args.table_name,
        };
        Ok(operation)
    }
}

/// apply common single read settings to a builder
macro_rules! apply_single_read_operation {
    ($builder:expr, $single_read_args:expr) => {
        $builder
            .set_consistent_read($single_read_args.consistent_read)
            .table_name($single_read_args.table_name)
    };
}

/// apply common multiple read settings to a builder
macro_rules! apply_multiple_read_operation {
    ($builder:expr, $multiple_read_operation:expr) => {
        $builder
            .set_consistent_read($multiple_read_operation.consistent_read)
            .set_expression_attribute_names($multiple_read_operation.expression_attribute_names)
            .set_expression_attribute_values($multiple_read_operation.expression_attribute_values)
            .set_filter_expression($multiple_read_operation.filter_expression)
            .set_limit($multiple_read_operation.limit)
            .table_name($multiple_read_operation.table_name)
    };
}

pub(crate) use apply_multiple_read_operation;
pub(crate) use apply_single_read_operation;
