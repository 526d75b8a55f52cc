use crate::read;

use aws_sdk_dynamodb::{Client, error, operation};
use serde::Serialize;
use serde_dynamo::{Error, Result};

/// scan operation
#[derive(Clone, Debug, Default, PartialEq)]
struct ScanInput {
    multiple_read_operation: read::common::MultipleReadInput,
}

/// Scan request for a single page.
///
/// Pagination is left to the caller: the returned `last_evaluated_key` tells
/// whether the table holds more items past this page.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Scan<T> {
    /// Table name, filter and limit.
    pub(crate) multiple_read_args: read::common::MultipleReadArgs<T>,
}

impl<T: Serialize> TryFrom<Scan<T>> for ScanInput {
    type Error = Error;

    fn try_from(scan: Scan<T>) -> Result<Self> {
        let multiple_read_operation: read::common::MultipleReadInput =
            scan.multiple_read_args.try_into()?;
        Ok(Self {
            multiple_read_operation,
        })
    }
}

impl<T: Serialize> Scan<T> {
    /// Execute the scan request and return its first page.
    pub(crate) async fn send(
        self,
        client: &Client,
    ) -> Result<operation::scan::ScanOutput, error::SdkError<operation::scan::ScanError>> {
        let scan: ScanInput = self.try_into().map_err(error::BuildError::other)?;
        let builder = client.scan();
        read::common::apply_multiple_read_operation!(builder, scan.multiple_read_operation)
            .send()
            .await
    }
}
