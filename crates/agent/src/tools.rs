use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use rishta_core::CandidateDirectory;
use rishta_messaging::{DeliveryRequest, MessageGateway};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::llm::ToolSpec;

#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn parameters(&self) -> Value;
    async fn execute(&self, input: Value) -> Result<Value>;
}

/// Tools available to the agent, in registration order.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn register<T>(&mut self, tool: T)
    where
        T: Tool + 'static,
    {
        self.tools.push(Arc::new(tool));
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Wire-format specs advertised to the chat endpoint.
    pub fn specs(&self) -> Vec<ToolSpec> {
        self.tools
            .iter()
            .map(|tool| ToolSpec::function(tool.name(), tool.description(), tool.parameters()))
            .collect()
    }

    pub async fn dispatch(&self, name: &str, input: Value) -> Result<Value> {
        let tool = self
            .tools
            .iter()
            .find(|tool| tool.name() == name)
            .ok_or_else(|| anyhow!("unknown tool `{name}`"))?;
        tool.execute(input).await
    }
}

/// Candidate lookup over the fixed roster.
pub struct FindMatchesTool {
    directory: Arc<CandidateDirectory>,
}

impl FindMatchesTool {
    pub fn new(directory: Arc<CandidateDirectory>) -> Self {
        Self { directory }
    }
}

#[derive(Deserialize)]
struct FindMatchesArgs {
    min_age: i64,
    requester_category: String,
}

#[async_trait]
impl Tool for FindMatchesTool {
    fn name(&self) -> &'static str {
        "find_matches"
    }

    fn description(&self) -> &'static str {
        "Look up candidates of the opposite category whose age meets the minimum age preference."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "min_age": {
                    "type": "integer",
                    "description": "Minimum candidate age, inclusive."
                },
                "requester_category": {
                    "type": "string",
                    "description": "The requester's own category: male or female."
                }
            },
            "required": ["min_age", "requester_category"]
        })
    }

    async fn execute(&self, input: Value) -> Result<Value> {
        let args: FindMatchesArgs = serde_json::from_value(input)?;
        let matches = self.directory.find_matches(args.min_age, &args.requester_category)?;
        Ok(json!({ "results": matches.candidates }))
    }
}

/// WhatsApp delivery through the configured gateway.
pub struct SendWhatsAppTool {
    gateway: Arc<dyn MessageGateway>,
}

impl SendWhatsAppTool {
    pub fn new(gateway: Arc<dyn MessageGateway>) -> Self {
        Self { gateway }
    }
}

#[derive(Deserialize)]
struct SendWhatsAppArgs {
    number: String,
    message: String,
}

#[async_trait]
impl Tool for SendWhatsAppTool {
    fn name(&self) -> &'static str {
        "send_whatsapp_message"
    }

    fn description(&self) -> &'static str {
        "Send a WhatsApp text message to the given number and report the delivery outcome."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "number": {
                    "type": "string",
                    "description": "Destination WhatsApp number with country code, e.g. +923001112222."
                },
                "message": {
                    "type": "string",
                    "description": "Message text to deliver."
                }
            },
            "required": ["number", "message"]
        })
    }

    async fn execute(&self, input: Value) -> Result<Value> {
        let args: SendWhatsAppArgs = serde_json::from_value(input)?;
        let request = DeliveryRequest { to: args.number, body: args.message };
        let outcome = self.gateway.send(&request).await;
        Ok(serde_json::to_value(outcome)?)
    }
}
