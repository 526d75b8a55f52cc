//! API Gateway proxy responses.
//!
//! Every response carries a JSON body together with the `Content-Type` and
//! CORS headers; errors use the `{"error": <message>}` shape.

use crate::error::ApiError;

use aws_lambda_events::{apigw::ApiGatewayProxyResponse, encodings::Body};
use http::{HeaderMap, HeaderValue, StatusCode, header};
use serde::Serialize;

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(2);
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers
}

/// A response with `body` serialized as JSON.
pub fn json<T: Serialize>(
    status: StatusCode,
    body: &T,
) -> Result<ApiGatewayProxyResponse, serde_json::Error> {
    let body = serde_json::to_string(body)?;
    let mut response = ApiGatewayProxyResponse::default();
    response.status_code = i64::from(status.as_u16());
    response.headers = default_headers();
    response.body = Some(Body::Text(body));
    Ok(response)
}

/// The response for a failed request. Internal errors are logged here.
pub fn error(operation: &str, error: &ApiError) -> Result<ApiGatewayProxyResponse, serde_json::Error> {
    match error {
        ApiError::Internal(source) => tracing::error!(error = %source, "Error {operation}"),
        client_error => tracing::warn!(
            status = client_error.status_code().as_u16(),
            error = %client_error,
            "Rejected request while {operation}"
        ),
    }
    json(
        error.status_code(),
        &ErrorBody {
            error: error.public_message(),
        },
    )
}

/// Render the outcome of a handler.
///
/// `operation` names what the handler was doing, for the logs.
pub fn render<T: Serialize>(
    operation: &str,
    result: Result<(StatusCode, T), ApiError>,
) -> Result<ApiGatewayProxyResponse, lambda_runtime::Error> {
    let response = match result {
        Ok((status, body)) => json(status, &body)?,
        Err(api_error) => error(operation, &api_error)?,
    };
    Ok(response)
}
