use items_crud::{bootstrap, handlers::list_items};

use lambda_runtime::{Error, run, service_fn};

#[tokio::main]
async fn main() -> Result<(), Error> {
    bootstrap::init_tracing();
    let store = bootstrap::dynamo_store().await?;
    run(service_fn(|event| list_items::function_handler(event, &store))).await
}
