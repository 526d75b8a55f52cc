use crate::common;

use serde::Serialize;
use serde_dynamo::{Error, Result, to_attribute_value};
use std::collections;

/// Conditions are joined with this operator when a filter has several.
const AND: &str = " AND ";

/// Equality condition on a top-level attribute.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Equals<T> {
    /// The name of the attribute to compare.
    pub(crate) name: String,
    /// The value the attribute must hold.
    pub(crate) value: T,
}

impl<T: Serialize> Equals<T> {
    fn get_expression(self, index: &mut usize) -> Result<common::ExpressionInput> {
        let name_placeholder = common::add_placeholder(&self.name);
        let value_placeholder = format!(":{}_eq{}", self.name, index);
        *index += 1;
        let value = to_attribute_value(self.value)?;
        let operation = common::ExpressionInput {
            expression: format!("{name_placeholder} = {value_placeholder}"),
            expression_attribute_names: collections::HashMap::from([(
                name_placeholder,
                self.name,
            )]),
            expression_attribute_values: collections::HashMap::from([(value_placeholder, value)]),
        };
        Ok(operation)
    }
}

/// Conjunction of equality conditions, used as a scan filter.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct ConditionMap<T>(pub(crate) Vec<Equals<T>>);

impl<T: Serialize> TryFrom<ConditionMap<T>> for common::ExpressionInput {
    type Error = Error;

    fn try_from(condition_map: ConditionMap<T>) -> Result<Self> {
        let mut index = 0;
        let mut operations = Vec::with_capacity(condition_map.0.len());
        for condition in condition_map.0 {
            operations.push(condition.get_expression(&mut index)?);
        }
        Ok(common::ExpressionInput::merge(AND, operations))
    }
}
