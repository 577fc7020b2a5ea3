use std::collections::VecDeque;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use rishta_core::config::MessagingConfig;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// One outbound message: destination address and text body.
///
/// The destination is expected to be a phone-number-like string; format
/// validation happens at the intake boundary, not here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeliveryRequest {
    pub to: String,
    pub body: String,
}

/// Result of one delivery attempt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DeliveryOutcome {
    pub succeeded: bool,
    pub detail: String,
}

impl DeliveryOutcome {
    pub fn sent() -> Self {
        Self { succeeded: true, detail: "sent".to_string() }
    }

    pub fn failed(detail: impl Into<String>) -> Self {
        Self { succeeded: false, detail: detail.into() }
    }
}

/// Outbound messaging capability held by the agent.
///
/// Contract: every implementation makes exactly one delivery attempt per
/// call and reports the result as an outcome. Provider rejections and
/// network-level transport failures are both folded into a failed outcome
/// carrying the provider or transport error text; `send` never raises.
#[async_trait]
pub trait MessageGateway: Send + Sync {
    async fn send(&self, request: &DeliveryRequest) -> DeliveryOutcome;
}

/// UltraMsg chat-message gateway.
///
/// Issues a single form-encoded POST to
/// `{base_url}/{instance_id}/messages/chat` per delivery. Success is exactly
/// HTTP 200; any other status is a failure whose detail is the raw response
/// body.
pub struct UltraMsgGateway {
    http: Client,
    base_url: String,
    instance_id: String,
    token: SecretString,
}

impl UltraMsgGateway {
    pub fn new(base_url: String, instance_id: String, token: SecretString) -> Self {
        Self { http: Client::new(), base_url, instance_id, token }
    }

    pub fn from_config(config: &MessagingConfig) -> Self {
        Self::new(config.base_url.clone(), config.instance_id.clone(), config.token.clone())
    }

    fn chat_url(&self) -> String {
        format!("{}/{}/messages/chat", self.base_url.trim_end_matches('/'), self.instance_id)
    }
}

#[async_trait]
impl MessageGateway for UltraMsgGateway {
    async fn send(&self, request: &DeliveryRequest) -> DeliveryOutcome {
        let form = [
            ("token", self.token.expose_secret()),
            ("to", request.to.as_str()),
            ("body", request.body.as_str()),
        ];

        let response = match self.http.post(self.chat_url()).form(&form).send().await {
            Ok(response) => response,
            Err(error) => {
                warn!(
                    event_name = "messaging.delivery.transport_failed",
                    to = %request.to,
                    error = %error,
                    "message transport failed"
                );
                return DeliveryOutcome::failed(error.to_string());
            }
        };

        let status = response.status();
        if status == StatusCode::OK {
            debug!(
                event_name = "messaging.delivery.sent",
                to = %request.to,
                "message accepted by gateway"
            );
            return DeliveryOutcome::sent();
        }

        let detail = response.text().await.unwrap_or_else(|error| error.to_string());
        warn!(
            event_name = "messaging.delivery.rejected",
            to = %request.to,
            status = %status,
            "gateway rejected message"
        );
        DeliveryOutcome::failed(detail)
    }
}

/// Test double that records every request and replays scripted outcomes.
///
/// When the script runs dry it keeps answering with a sent outcome.
#[derive(Default)]
pub struct RecordingGateway {
    outcomes: Mutex<VecDeque<DeliveryOutcome>>,
    requests: Mutex<Vec<DeliveryRequest>>,
}

impl RecordingGateway {
    pub fn with_outcomes(outcomes: Vec<DeliveryOutcome>) -> Self {
        Self { outcomes: Mutex::new(outcomes.into()), requests: Mutex::new(Vec::new()) }
    }

    pub async fn requests(&self) -> Vec<DeliveryRequest> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl MessageGateway for RecordingGateway {
    async fn send(&self, request: &DeliveryRequest) -> DeliveryOutcome {
        self.requests.lock().await.push(request.clone());
        self.outcomes.lock().await.pop_front().unwrap_or_else(DeliveryOutcome::sent)
    }
}
