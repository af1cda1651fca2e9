//! RSVP submission endpoint

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::post,
};
use chrono::Utc;
use rsvp_core::{RsvpSubmission, submit_rsvp};
use serde::Serialize;

use crate::routes::{AppError, method_not_allowed, preflight};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    let rsvp = post(submit).options(preflight).fallback(method_not_allowed);

    Router::new()
        .route("/api/rsvp", rsvp.clone())
        .route("/.netlify/functions/submit-rsvp", rsvp)
}

#[derive(Serialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub message: &'static str,
    /// Rows written. Compare with the number of responses sent to detect drops.
    pub count: usize,
    /// Names that matched no guest row and were skipped.
    pub unmatched: Vec<String>,
}

/// POST /api/rsvp - Record a batch of responses against the guest sheet
async fn submit(
    State(state): State<AppState>,
    payload: Result<Json<RsvpSubmission>, JsonRejection>,
) -> Result<Json<SubmitResponse>, AppError> {
    let Json(submission) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    let today = Utc::now().date_naive();
    let outcome = submit_rsvp(state.store(), state.layout(), &submission, today).await?;

    Ok(Json(SubmitResponse {
        success: true,
        message: "RSVP submitted successfully",
        count: outcome.count,
        unmatched: outcome.unmatched,
    }))
}
