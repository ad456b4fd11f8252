//! Error responses.
//!
//! Every failure, whether a service error or an extractor rejection, is
//! answered with the same JSON body and the same status, 502 Bad Gateway.
//! Clients relying on 4xx/5xx to tell bad input from server faults cannot
//! do so here; the distinction is only in `message`.

use std::fmt::Display;

use axum::Json;
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Status used for every error response.
pub const ERROR_STATUS: StatusCode = StatusCode::BAD_GATEWAY;

/// JSON body of an error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub timestamp: NaiveDateTime,
    pub message: String,
    /// Request context, `uri=<path>`.
    pub description: String,
}

#[derive(Debug)]
pub struct WebError {
    message: String,
    description: String,
}

impl WebError {
    pub fn new(err: impl Display, uri: &Uri) -> Self {
        Self {
            message: err.to_string(),
            description: format!("uri={}", uri.path()),
        }
    }

    /// `map_err` adapter bound to the request URI.
    pub fn at<E: Display>(uri: &Uri) -> impl FnOnce(E) -> Self + '_ {
        move |err| Self::new(err, uri)
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        warn!(message = %self.message, description = %self.description, "request failed");
        let payload = ErrorPayload {
            timestamp: chrono::Local::now().naive_local(),
            message: self.message,
            description: self.description,
        };
        (ERROR_STATUS, Json(payload)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn payload_shape_and_status() {
        let uri: Uri = "/update/7?x=1".parse().unwrap();
        let resp = WebError::new("no employee found with that id : 7", &uri).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let payload: ErrorPayload = serde_json::from_slice(&body).unwrap();
        assert_eq!(payload.message, "no employee found with that id : 7");
        assert_eq!(payload.description, "uri=/update/7");
    }
}
