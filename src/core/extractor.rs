use axum::{
    body::Body,
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Request},
    http::request::Parts,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;

use crate::core::error::AppError;

/// Custom JSON extractor that provides consistent error responses
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppJsonRejection;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(value) => Ok(Self(value.0)),
            Err(rejection) => Err(AppJsonRejection(rejection)),
        }
    }
}

pub struct AppJsonRejection(JsonRejection);

impl IntoResponse for AppJsonRejection {
    fn into_response(self) -> Response {
        let message = match self.0 {
            JsonRejection::JsonDataError(err) => format!("Invalid JSON data: {}", err),
            JsonRejection::JsonSyntaxError(err) => format!("Invalid JSON syntax: {}", err),
            JsonRejection::MissingJsonContentType(err) => {
                format!("Missing JSON content type: {}", err)
            }
            _ => "Failed to parse JSON body".to_string(),
        };

        AppError::BadRequest(message).into_response()
    }
}

/// Verified operator identity, inserted by the admin auth middleware.
///
/// The actual credential check happens before the handlers run; handlers only
/// assert that the middleware did its job by extracting this.
#[derive(Debug, Clone)]
pub struct AuthenticatedOperator {
    pub subject: String,
}

impl<S> FromRequestParts<S> for AuthenticatedOperator
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedOperator>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Operator authentication required".to_string()))
    }
}

/// Best-effort origin address of the reporting visitor.
///
/// Purely informational: taken from proxy headers, never authenticated.
#[derive(Debug, Clone, Default)]
pub struct CallerContext {
    pub ip: Option<String>,
}

impl<S> FromRequestParts<S> for CallerContext
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let from_header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                // x-forwarded-for may carry a proxy chain; the client is first
                .and_then(|v| v.split(',').next())
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let ip = from_header("x-forwarded-for").or_else(|| from_header("x-real-ip"));

        Ok(CallerContext { ip })
    }
}
