//! Request handlers, one per deployed function.
//!
//! Each handler turns an API Gateway proxy event into a response with at most
//! two store calls. Client input errors are answered directly; everything else
//! becomes a logged internal error.

/// `POST /items`
pub mod create_item;

/// `DELETE /items/{itemId}`
pub mod delete_item;

/// `GET /items/{itemId}`
pub mod get_item;

/// `GET /items`
pub mod list_items;

/// `PUT /items/{itemId}`
pub mod update_item;

use crate::error::ApiError;

use aws_lambda_events::apigw::ApiGatewayProxyRequest;
use serde::de::DeserializeOwned;

/// Path parameter holding the item id.
pub const ITEM_ID_PARAMETER: &str = "itemId";

/// The item id from the request path.
pub(crate) fn item_id(request: &ApiGatewayProxyRequest) -> Result<&str, ApiError> {
    request
        .path_parameters
        .get(ITEM_ID_PARAMETER)
        .map(String::as_str)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::bad_request("itemId is required in path parameters"))
}

/// Parse a request body that must be a JSON object.
pub(crate) fn json_body<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    let invalid = || ApiError::bad_request("Invalid JSON format");
    let value: serde_json::Value = serde_json::from_str(body).map_err(|_| invalid())?;
    if !value.is_object() {
        return Err(invalid());
    }
    serde_json::from_value(value).map_err(|_| invalid())
}
