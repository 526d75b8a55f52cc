use crate::{
    error::ApiError,
    handlers,
    item::{self, Item, ItemPatch},
    response,
    store::ItemStore,
};

use aws_lambda_events::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use http::StatusCode;
use lambda_runtime::{Error, LambdaEvent};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct Updated {
    message: &'static str,
    item: Item,
}

async fn update_item<S: ItemStore>(
    request: &ApiGatewayProxyRequest,
    store: &S,
) -> Result<(StatusCode, Updated), ApiError> {
    let id = handlers::item_id(request)?;
    let body = request
        .body
        .as_deref()
        .ok_or_else(|| ApiError::bad_request("Request body is required"))?;
    let patch: ItemPatch = handlers::json_body(body)?;
    let existing = store
        .get(id)
        .await?
        .ok_or_else(|| ApiError::item_not_found(id))?;
    let updated_at = item::next_updated_at(existing.updated_at, item::now());
    let item = store.update(id, &patch, updated_at).await?;
    tracing::info!(id, "Item updated successfully");
    Ok((
        StatusCode::OK,
        Updated {
            message: "Item updated successfully",
            item,
        },
    ))
}

/// Change the allow-listed fields of an existing item and refresh its `updatedAt`.
pub async fn function_handler<S: ItemStore>(
    event: LambdaEvent<ApiGatewayProxyRequest>,
    store: &S,
) -> Result<ApiGatewayProxyResponse, Error> {
    let result = update_item(&event.payload, store).await;
    response::render("updating item", result)
}
