//! HTTP request/response types and extractors.
//!
//! Provides the status-specific response wrappers, the JSON-or-form
//! [`Payload`] extractor, and the [`RouteModule`] trait for organizing routes.

pub mod payload;
pub mod response;
pub mod routes;

pub use payload::Payload;
pub use response::{CreatedResponse, NoContentResponse};
pub use routes::RouteModule;
