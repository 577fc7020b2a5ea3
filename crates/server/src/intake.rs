//! Intake routes - the user-facing matchmaking form.
//!
//! Endpoints:
//! - `GET  /`              — intake form (HTML)
//! - `POST /api/v1/intake` — run one matchmaking turn for a submission
//!
//! Boundary validation lives here, not in the core: the WhatsApp number must
//! carry a leading `+` country code and the minimum age preference is bound
//! to 16..=40. Each accepted submission triggers exactly one agent turn.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Json, Router,
};
use rishta_agent::runtime::AgentRuntime;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

const MIN_AGE_FLOOR: i64 = 16;
const MIN_AGE_CEILING: i64 = 40;

#[derive(Clone)]
pub struct IntakeState {
    agent_runtime: Arc<AgentRuntime>,
}

#[derive(Debug, Deserialize)]
pub struct IntakeRequest {
    pub whatsapp_number: String,
    pub min_age: i64,
    pub gender: String,
}

#[derive(Debug, Serialize)]
pub struct IntakeResponse {
    pub reply: String,
}

#[derive(Debug, Serialize)]
pub struct IntakeError {
    pub error: String,
}

pub fn router(agent_runtime: Arc<AgentRuntime>) -> Router {
    Router::new()
        .route("/", get(intake_page))
        .route("/api/v1/intake", post(submit_intake))
        .with_state(IntakeState { agent_runtime })
}

async fn intake_page() -> Html<&'static str> {
    Html(INTAKE_PAGE)
}

pub async fn submit_intake(
    State(state): State<IntakeState>,
    Json(payload): Json<IntakeRequest>,
) -> Result<Json<IntakeResponse>, (StatusCode, Json<IntakeError>)> {
    let number = payload.whatsapp_number.trim();
    if !number.starts_with('+') {
        return Err(bad_request(
            "whatsapp_number must include a country code starting with `+` (e.g. +923001112222)",
        ));
    }
    if payload.min_age < MIN_AGE_FLOOR || payload.min_age > MIN_AGE_CEILING {
        return Err(bad_request("min_age must be between 16 and 40"));
    }

    let correlation_id = Uuid::new_v4().simple().to_string();
    info!(
        event_name = "intake.turn.started",
        correlation_id = %correlation_id,
        min_age = payload.min_age,
        "intake submission accepted"
    );

    let turn_message = format!(
        "My WhatsApp number is {number} and I am a {gender}. I want matches above age {min_age}.",
        gender = payload.gender.trim(),
        min_age = payload.min_age,
    );

    match state.agent_runtime.run_turn(&turn_message).await {
        Ok(reply) => {
            info!(
                event_name = "intake.turn.completed",
                correlation_id = %correlation_id,
                "turn completed"
            );
            Ok(Json(IntakeResponse { reply }))
        }
        Err(error) => {
            warn!(
                event_name = "intake.turn.failed",
                correlation_id = %correlation_id,
                error = %error,
                "turn failed"
            );
            Err((
                StatusCode::BAD_GATEWAY,
                Json(IntakeError {
                    error: "the matchmaking turn could not be completed".to_string(),
                }),
            ))
        }
    }
}

fn bad_request(message: &str) -> (StatusCode, Json<IntakeError>) {
    (StatusCode::BAD_REQUEST, Json(IntakeError { error: message.to_string() }))
}

const INTAKE_PAGE: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Rishta Auntie</title>
  <style>
    body { font-family: system-ui, sans-serif; max-width: 28rem; margin: 3rem auto; padding: 0 1rem; }
    label { display: block; margin-top: 1rem; font-weight: 600; }
    input, select { width: 100%; padding: 0.5rem; margin-top: 0.25rem; box-sizing: border-box; }
    button { margin-top: 1.5rem; padding: 0.6rem 1.2rem; }
    #status { margin-top: 1rem; white-space: pre-wrap; }
  </style>
</head>
<body>
  <h1>Rishta Auntie</h1>
  <p>Salam beta! Tell Auntie where to send the matches.</p>
  <form id="intake">
    <label for="number">WhatsApp number (with country code)</label>
    <input id="number" name="number" type="tel" pattern="\+[0-9]{6,15}" placeholder="+923001112222" required>
    <label for="min_age">Minimum age preference</label>
    <input id="min_age" name="min_age" type="number" min="16" max="40" value="20" required>
    <label for="gender">Your category</label>
    <select id="gender" name="gender">
      <option value="male">male</option>
      <option value="female">female</option>
    </select>
    <button type="submit">Find matches</button>
  </form>
  <p id="status"></p>
  <script>
    const form = document.getElementById('intake');
    const status = document.getElementById('status');
    form.addEventListener('submit', async (event) => {
      event.preventDefault();
      const number = document.getElementById('number').value.trim();
      if (!number.startsWith('+')) {
        status.textContent = 'Please include the country code, e.g. +92...';
        return;
      }
      status.textContent = 'Auntie is searching...';
      try {
        const response = await fetch('/api/v1/intake', {
          method: 'POST',
          headers: { 'Content-Type': 'application/json' },
          body: JSON.stringify({
            whatsapp_number: number,
            min_age: Number(document.getElementById('min_age').value),
            gender: document.getElementById('gender').value,
          }),
        });
        const payload = await response.json();
        status.textContent = response.ok ? payload.reply : payload.error;
      } catch (error) {
        status.textContent = 'Request failed: ' + error;
      }
    });
  </script>
</body>
</html>
"#;
