use crate::{
    error::ApiError,
    item::Item,
    response,
    store::{ItemStore, ScanRequest},
};

use aws_lambda_events::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use http::StatusCode;
use lambda_runtime::{Error, LambdaEvent};
use serde::Serialize;

/// Query parameter filtering the listed items by category.
pub const CATEGORY_PARAMETER: &str = "category";

/// Query parameter bounding the number of items the scan evaluates.
pub const LIMIT_PARAMETER: &str = "limit";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Listed {
    message: &'static str,
    count: usize,
    items: Vec<Item>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    has_more: bool,
}

fn parameter<'a>(request: &'a ApiGatewayProxyRequest, name: &str) -> Option<&'a str> {
    request
        .query_string_parameters
        .first(name)
        .filter(|value| !value.is_empty())
}

fn parse_limit(value: &str) -> Result<i32, ApiError> {
    let limit: i32 = value
        .parse()
        .map_err(|_| ApiError::bad_request("Limit must be a number"))?;
    if limit < 1 {
        return Err(ApiError::bad_request("Limit must be greater than zero"));
    }
    Ok(limit)
}

async fn list_items<S: ItemStore>(
    request: &ApiGatewayProxyRequest,
    store: &S,
) -> Result<(StatusCode, Listed), ApiError> {
    let scan = ScanRequest {
        category: parameter(request, CATEGORY_PARAMETER).map(str::to_string),
        limit: parameter(request, LIMIT_PARAMETER)
            .map(parse_limit)
            .transpose()?,
    };
    let page = store.scan(&scan).await?;
    tracing::info!(
        count = page.items.len(),
        has_more = page.has_more,
        "Items retrieved successfully"
    );
    Ok((
        StatusCode::OK,
        Listed {
            message: "Items retrieved successfully",
            count: page.items.len(),
            items: page.items,
            has_more: page.has_more,
        },
    ))
}

/// List one page of items, optionally filtered by category.
pub async fn function_handler<S: ItemStore>(
    event: LambdaEvent<ApiGatewayProxyRequest>,
    store: &S,
) -> Result<ApiGatewayProxyResponse, Error> {
    let result = list_items(&event.payload, store).await;
    response::render("listing items", result)
}
