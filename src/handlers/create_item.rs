use crate::{
    error::ApiError,
    handlers,
    item::{self, Item, NewItem},
    response,
    store::ItemStore,
};

use aws_lambda_events::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use http::StatusCode;
use lambda_runtime::{Error, LambdaEvent};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Created {
    message: &'static str,
    item_id: String,
    item: Item,
}

async fn create_item<S: ItemStore>(
    request: &ApiGatewayProxyRequest,
    store: &S,
) -> Result<(StatusCode, Created), ApiError> {
    tracing::debug!(?request, "Received event");
    let body = request
        .body
        .as_deref()
        .ok_or_else(|| ApiError::bad_request("Request body required"))?;
    let new_item: NewItem = handlers::json_body(body)?;
    let item = new_item
        .into_item(Uuid::new_v4().to_string(), item::now())
        .ok_or_else(|| ApiError::bad_request("Name field is required"))?;
    store.put(&item).await?;
    tracing::info!(id = %item.id, "Item created successfully");
    Ok((
        StatusCode::CREATED,
        Created {
            message: "Item created successfully",
            item_id: item.id.clone(),
            item,
        },
    ))
}

/// Create an item from the JSON body and return it with status 201.
pub async fn function_handler<S: ItemStore>(
    event: LambdaEvent<ApiGatewayProxyRequest>,
    store: &S,
) -> Result<ApiGatewayProxyResponse, Error> {
    let result = create_item(&event.payload, store).await;
    response::render("creating item", result)
}
