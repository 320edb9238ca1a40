//! Plain JSON / query extractors that answer rejections with the
//! `ApiResponse` envelope and 400 instead of axum's plain-text bodies.

use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;

use super::ApiResponse;

/// `axum::Json<T>` with an enveloped 400 rejection
pub struct ApiJson<T>(pub T);

/// `axum::extract::Query<T>` with an enveloped 400 rejection
pub struct ApiQuery<T>(pub T);

pub struct BadRequest(pub String);

impl IntoResponse for BadRequest {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error(self.0)),
        )
            .into_response()
    }
}

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = BadRequest;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| BadRequest(format!("Invalid JSON: {}", e.body_text())))?;
        Ok(ApiJson(value))
    }
}

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = BadRequest;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| BadRequest(format!("Invalid query: {}", e.body_text())))?;
        Ok(ApiQuery(value))
    }
}
