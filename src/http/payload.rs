//! Request body extractor accepting JSON or URL-encoded form data.

use crate::error::ApiError;
use axum::{
    Form, Json,
    extract::{FromRequest, Request},
    http::header,
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Validated request body, decoded from `application/json` or
/// `application/x-www-form-urlencoded` depending on the `Content-Type` header
///
/// # Example
///
/// ```rust,no_run
/// use courses_api::http::Payload;
/// use serde::Deserialize;
/// use validator::Validate;
///
/// #[derive(Deserialize, Validate)]
/// struct Rename {
///     #[validate(length(min = 1))]
///     name: String,
/// }
///
/// async fn rename(Payload(body): Payload<Rename>) -> String {
///     body.name
/// }
/// ```
pub struct Payload<T>(pub T);

#[derive(Debug, PartialEq, Eq)]
enum BodyKind {
    Json,
    Form,
}

fn body_kind(content_type: &str) -> Option<BodyKind> {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    match mime.as_str() {
        "application/json" => Some(BodyKind::Json),
        "application/x-www-form-urlencoded" => Some(BodyKind::Form),
        m if m.starts_with("application/") && m.ends_with("+json") => Some(BodyKind::Json),
        _ => None,
    }
}

impl<T, S> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        let value: T = match body_kind(&content_type) {
            Some(BodyKind::Json) => {
                let Json(value) = Json::<T>::from_request(req, state)
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Invalid JSON: {}", e.body_text())))?;
                value
            }
            Some(BodyKind::Form) => {
                let Form(value) = Form::<T>::from_request(req, state)
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Invalid form data: {}", e.body_text())))?;
                value
            }
            None => {
                let shown = if content_type.is_empty() {
                    "missing Content-Type".to_string()
                } else {
                    content_type
                };
                return Err(ApiError::unsupported_media_type(shown));
            }
        };

        value.validate()?;

        Ok(Payload(value))
    }
}
