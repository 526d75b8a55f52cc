//! Process start-up shared by the handler binaries.

use crate::{config::Config, store::dynamo::DynamoStore};

use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::Client;
use lambda_runtime::{Error, tracing};

/// Install the log subscriber.
///
/// Honours `AWS_LAMBDA_LOG_LEVEL` / `RUST_LOG` for the level and
/// `AWS_LAMBDA_LOG_FORMAT` for plain text or JSON output.
pub fn init_tracing() {
    tracing::init_default_subscriber();
}

/// Build the DynamoDB store from the environment.
///
/// Called once per process; the store is reused by every invocation.
pub async fn dynamo_store() -> Result<DynamoStore, Error> {
    let config = Config::from_env()?;
    let shared_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let store = DynamoStore::new(Client::new(&shared_config), config.table_name);
    tracing::info!(table = store.table_name(), "DynamoDB store ready");
    Ok(store)
}
