#![deny(missing_docs)]

//! # Items CRUD
//!
//! Serverless create, read, update, delete and list operations over a single
//! DynamoDB table of items, exposed through API Gateway proxy integrations.
//!
//! ## Overview
//!
//! Every operation is deployed as its own Lambda function. A function:
//! - Reads its input from the path parameters, query string or JSON body
//! - Performs at most two single-item requests against the table
//! - Answers with a JSON body, `Content-Type: application/json` and a
//!   permissive CORS header
//!
//! ## Quick Example
//!
//! Handlers are generic over [`store::ItemStore`], so they can be driven
//! without AWS:
//!
//! ```no_run
//! use aws_lambda_events::apigw::ApiGatewayProxyRequest;
//! use items_crud::{handlers::list_items, store::memory::MemoryStore};
//! use lambda_runtime::{Context, LambdaEvent};
//!
//! # async fn example() -> Result<(), lambda_runtime::Error> {
//! let store = MemoryStore::new();
//! let event = LambdaEvent {
//!     payload: ApiGatewayProxyRequest::default(),
//!     context: Context::default(),
//! };
//! let response = list_items::function_handler(event, &store).await?;
//! assert_eq!(response.status_code, 200);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`mod@handlers`] - One entry point per deployed function
//! - [`mod@item`] - The item record and request payloads
//! - [`mod@store`] - Persistence behind the [`store::ItemStore`] trait
//! - [`mod@response`] and [`mod@error`] - Response and error rendering
//! - [`mod@config`] and [`mod@bootstrap`] - Process start-up

pub mod bootstrap;

pub(crate) mod common;

pub mod config;

pub mod error;

pub mod handlers;

pub mod item;

pub(crate) mod read;

pub mod response;

pub mod store;

pub(crate) mod write;
