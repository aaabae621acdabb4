//! Backend resource services.
//!
//! One module per backend resource, one function per endpoint. Each call
//! issues exactly one HTTP request through the authenticating
//! [`crate::client::ApiClient`]; there are no retries, no caching and no
//! batching. Responses are returned as parsed DTOs, errors propagate as
//! [`crate::error::ApiError`] except where a service localizes them.

pub mod auth;
pub mod catalog;
pub mod complaints;
pub mod dashboard;
pub mod messages;
pub mod news;
pub mod requests;
pub mod users;
