//! Party lookup endpoint

use axum::{Json, Router, extract::State, routing::get};
use rsvp_core::{Parties, resolve_parties};
use serde::Serialize;

use crate::routes::{AppError, method_not_allowed, preflight};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    let guests = get(get_guests).options(preflight).fallback(method_not_allowed);

    Router::new()
        .route("/api/guests", guests.clone())
        .route("/.netlify/functions/get-guests", guests)
}

#[derive(Serialize)]
pub struct GuestsResponse {
    pub success: bool,
    pub parties: Parties,
}

/// GET /api/guests - Every party in the guest sheet, keyed by guest name
async fn get_guests(State(state): State<AppState>) -> Result<Json<GuestsResponse>, AppError> {
    let parties = resolve_parties(state.store(), state.layout()).await?;

    log::info!("Served {} parties", parties.len());

    Ok(Json(GuestsResponse {
        success: true,
        parties,
    }))
}
