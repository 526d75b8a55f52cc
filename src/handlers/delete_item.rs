use crate::{error::ApiError, handlers, response, store::ItemStore};

use aws_lambda_events::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use http::StatusCode;
use lambda_runtime::{Error, LambdaEvent};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Deleted {
    message: &'static str,
    item_id: String,
}

async fn delete_item<S: ItemStore>(
    request: &ApiGatewayProxyRequest,
    store: &S,
) -> Result<(StatusCode, Deleted), ApiError> {
    let id = handlers::item_id(request)?;
    if store.get(id).await?.is_none() {
        return Err(ApiError::item_not_found(id));
    }
    store.delete(id).await?;
    tracing::info!(id, "Item deleted successfully");
    Ok((
        StatusCode::OK,
        Deleted {
            message: "Item deleted successfully",
            item_id: id.to_string(),
        },
    ))
}

/// Delete the item named by the `itemId` path parameter.
pub async fn function_handler<S: ItemStore>(
    event: LambdaEvent<ApiGatewayProxyRequest>,
    store: &S,
) -> Result<ApiGatewayProxyResponse, Error> {
    let result = delete_item(&event.payload, store).await;
    response::render("deleting item", result)
}
