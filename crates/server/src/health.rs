use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::Utc;
use rishta_core::CandidateDirectory;
use serde::Serialize;

#[derive(Clone)]
pub struct HealthState {
    directory: Arc<CandidateDirectory>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthCheck {
    pub status: &'static str,
    pub detail: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: HealthCheck,
    pub roster: HealthCheck,
    pub checked_at: String,
}

pub fn router(directory: Arc<CandidateDirectory>) -> Router {
    Router::new().route("/health", get(health)).with_state(HealthState { directory })
}

pub async fn health(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let roster = roster_check(&state.directory);
    let ready = roster.status == "ready";

    let payload = HealthResponse {
        status: if ready { "ready" } else { "degraded" },
        service: HealthCheck {
            status: "ready",
            detail: "rishta-server runtime initialized".to_string(),
        },
        roster,
        checked_at: Utc::now().to_rfc3339(),
    };

    let status_code = if ready { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (status_code, Json(payload))
}

fn roster_check(directory: &CandidateDirectory) -> HealthCheck {
    if directory.is_empty() {
        HealthCheck { status: "degraded", detail: "candidate roster is empty".to_string() }
    } else {
        HealthCheck {
            status: "ready",
            detail: format!("{} candidates loaded", directory.len()),
        }
    }
}
