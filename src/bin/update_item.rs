use items_crud::{bootstrap, handlers::update_item};

use lambda_runtime::{Error, run, service_fn};

#[tokio::main]
async fn main() -> Result<(), Error> {
    bootstrap::init_tracing();
    let store = bootstrap::dynamo_store().await?;
    run(service_fn(|event| update_item::function_handler(event, &store))).await
}
