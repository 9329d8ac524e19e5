//! HTTP adapter — enquiry endpoint, health check, CORS.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{Method, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tracing::error;

use crate::config::SubmissionBudget;
use crate::submission::{self, EnquiryForm};
use crate::transport::Mailer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub mailer: Arc<dyn Mailer>,
    pub budget: SubmissionBudget,
}

/// Build the Axum router with the enquiry and health routes.
///
/// The CORS layer answers preflight OPTIONS before routing; method
/// routing rejects anything else that isn't a POST on the endpoint.
pub fn enquiry_routes(mailer: Arc<dyn Mailer>, budget: SubmissionBudget) -> Router {
    let state = AppState { mailer, budget };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/api/enquiry", post(submit_enquiry))
        .route("/health", get(health))
        .layer(cors)
        .with_state(state)
}

// ── Health ──────────────────────────────────────────────────────────────

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "enquiry-relay"
    }))
}

// ── Enquiry ─────────────────────────────────────────────────────────────

/// POST /api/enquiry
///
/// Processes the submission and forwards it by email. Transport detail
/// never reaches the caller; any send failure reads as a generic 500.
async fn submit_enquiry(
    State(state): State<AppState>,
    Json(form): Json<EnquiryForm>,
) -> impl IntoResponse {
    let email = submission::process(&form, &state.budget);

    match state.mailer.send(email).await {
        Ok(()) => (StatusCode::OK, Json(serde_json::json!({"ok": true}))),
        Err(e) => {
            error!(error = %e, "Failed to send enquiry email");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"ok": false, "error": "Email failed"})),
            )
        }
    }
}
