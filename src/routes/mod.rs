pub mod guests;
pub mod health;
pub mod rsvp;

use axum::{
    Json, Router,
    http::{Method, StatusCode, header},
    response::{IntoResponse, Response},
};
use rsvp_core::RsvpError;
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};

use crate::state::AppState;

/// Build the full application: every route plus CORS.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .merge(guests::router())
        .merge(rsvp::router())
        .merge(health::router())
        .with_state(state)
        .layer(cors)
}

/// Standard API error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

/// Convert errors to HTTP responses
pub enum AppError {
    /// The request itself is unusable.
    BadRequest(String),
    Internal(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::BadRequest(message) => {
                log::info!("Rejected request: {message}");
                (StatusCode::BAD_REQUEST, message)
            }
            AppError::Internal(err) => {
                log::error!("Request failed: {err:#}");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        };

        let body = Json(ErrorResponse {
            success: false,
            error,
        });
        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();
        match err.downcast_ref::<RsvpError>() {
            Some(RsvpError::InvalidSubmission(_)) => AppError::BadRequest(err.to_string()),
            _ => AppError::Internal(err),
        }
    }
}

#[derive(Serialize)]
struct MethodNotAllowed {
    error: &'static str,
}

/// Any method an endpoint does not serve.
pub async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(MethodNotAllowed {
            error: "Method not allowed",
        }),
    )
}

/// CORS preflight: empty 200.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}
