use crate::{error::ApiError, handlers, item::Item, response, store::ItemStore};

use aws_lambda_events::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use http::StatusCode;
use lambda_runtime::{Error, LambdaEvent};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct Retrieved {
    message: &'static str,
    item: Item,
}

async fn get_item<S: ItemStore>(
    request: &ApiGatewayProxyRequest,
    store: &S,
) -> Result<(StatusCode, Retrieved), ApiError> {
    let id = handlers::item_id(request)?;
    let item = store
        .get(id)
        .await?
        .ok_or_else(|| ApiError::item_not_found(id))?;
    Ok((
        StatusCode::OK,
        Retrieved {
            message: "Item retrieved successfully",
            item,
        },
    ))
}

/// Return the item named by the `itemId` path parameter.
pub async fn function_handler<S: ItemStore>(
    event: LambdaEvent<ApiGatewayProxyRequest>,
    store: &S,
) -> Result<ApiGatewayProxyResponse, Error> {
    let result = get_item(&event.payload, store).await;
    response::render("retrieving item", result)
}
