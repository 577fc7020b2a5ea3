use std::sync::Arc;

use serde_json::{json, Value};
use thiserror::Error;
use tracing::{info, warn};

use crate::llm::{ChatMessage, LlmClient, LlmError};
use crate::prompts::MATCHMAKER_SYSTEM_PROMPT;
use crate::tools::ToolRegistry;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error(transparent)]
    Llm(#[from] LlmError),
    #[error("turn exceeded {0} tool rounds without a final reply")]
    ToolRoundsExhausted(usize),
    #[error("assistant reply carried neither text nor tool calls")]
    EmptyReply,
}

const DEFAULT_MAX_TOOL_ROUNDS: usize = 8;

/// Runs one conversational turn per intake submission.
pub struct AgentRuntime {
    llm: Arc<dyn LlmClient>,
    tools: ToolRegistry,
    max_tool_rounds: usize,
}

impl AgentRuntime {
    pub fn new(llm: Arc<dyn LlmClient>, tools: ToolRegistry) -> Self {
        Self { llm, tools, max_tool_rounds: DEFAULT_MAX_TOOL_ROUNDS }
    }

    pub fn with_max_tool_rounds(mut self, max_tool_rounds: usize) -> Self {
        self.max_tool_rounds = max_tool_rounds;
        self
    }

    /// One complete request/response cycle: persona prompt plus the intake
    /// message, then completions until the model answers in text.
    ///
    /// Requested tool calls are executed sequentially, never concurrently.
    /// A tool failure is folded into its tool-result message as an error
    /// object so the model can recover conversationally; the turn itself
    /// only fails on LLM errors or when the round limit is hit.
    pub async fn run_turn(&self, user_message: &str) -> Result<String, AgentError> {
        let specs = self.tools.specs();
        let mut messages = vec![
            ChatMessage::system(MATCHMAKER_SYSTEM_PROMPT),
            ChatMessage::user(user_message),
        ];

        for round in 0..self.max_tool_rounds {
            let reply = self.llm.chat(&messages, &specs).await?;

            if reply.tool_calls.is_empty() {
                let Some(content) = reply.content.clone().filter(|text| !text.trim().is_empty())
                else {
                    return Err(AgentError::EmptyReply);
                };
                info!(event_name = "agent.turn.completed", rounds = round, "turn completed");
                return Ok(content);
            }

            let tool_calls = reply.tool_calls.clone();
            messages.push(reply);

            for call in tool_calls {
                let arguments = parse_arguments(&call.function.arguments);
                let result = match self.tools.dispatch(&call.function.name, arguments).await {
                    Ok(value) => {
                        info!(
                            event_name = "agent.tool.completed",
                            tool = %call.function.name,
                            "tool executed"
                        );
                        value
                    }
                    Err(error) => {
                        warn!(
                            event_name = "agent.tool.failed",
                            tool = %call.function.name,
                            error = %error,
                            "tool execution failed"
                        );
                        json!({ "error": error.to_string() })
                    }
                };
                messages.push(ChatMessage::tool(call.id, result.to_string()));
            }
        }

        Err(AgentError::ToolRoundsExhausted(self.max_tool_rounds))
    }
}

fn parse_arguments(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| json!({ "raw": raw }))
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Arc;

    use async_trait::async_trait;
    use rishta_core::CandidateDirectory;
    use rishta_messaging::RecordingGateway;
    use serde_json::json;
    use tokio::sync::Mutex;

    use super::{AgentError, AgentRuntime};
    use crate::llm::{ChatMessage, FunctionCall, LlmClient, LlmError, ToolCall, ToolSpec};
    use crate::tools::{FindMatchesTool, SendWhatsAppTool, ToolRegistry};

    /// Replays scripted assistant replies and records every transcript it
    /// was shown.
    #[derive(Default)]
    struct ScriptedLlm {
        replies: Mutex<VecDeque<ChatMessage>>,
        transcripts: Mutex<Vec<Vec<ChatMessage>>>,
    }

    impl ScriptedLlm {
        fn with_replies(replies: Vec<ChatMessage>) -> Self {
            Self { replies: Mutex::new(replies.into()), transcripts: Mutex::new(Vec::new()) }
        }

        async fn transcripts(&self) -> Vec<Vec<ChatMessage>> {
            self.transcripts.lock().await.clone()
        }
    }

    #[async_trait]
    impl LlmClient for ScriptedLlm {
        async fn chat(
            &self,
            messages: &[ChatMessage],
            _tools: &[ToolSpec],
        ) -> Result<ChatMessage, LlmError> {
            self.transcripts.lock().await.push(messages.to_vec());
            self.replies.lock().await.pop_front().ok_or(LlmError::EmptyResponse)
        }
    }

    fn assistant_text(content: &str) -> ChatMessage {
        ChatMessage {
            role: "assistant".to_string(),
            content: Some(content.to_string()),
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }

    fn assistant_tool_call(id: &str, name: &str, arguments: serde_json::Value) -> ChatMessage {
        ChatMessage {
            role: "assistant".to_string(),
            content: None,
            tool_calls: vec![ToolCall {
                id: id.to_string(),
                call_type: "function".to_string(),
                function: FunctionCall {
                    name: name.to_string(),
                    arguments: arguments.to_string(),
                },
            }],
            tool_call_id: None,
        }
    }

    fn registry(gateway: Arc<RecordingGateway>) -> ToolRegistry {
        let mut registry = ToolRegistry::default();
        registry.register(FindMatchesTool::new(Arc::new(CandidateDirectory::default())));
        registry.register(SendWhatsAppTool::new(gateway));
        registry
    }

    #[tokio::test]
    async fn plain_reply_ends_the_turn_without_tool_calls() {
        let llm = Arc::new(ScriptedLlm::with_replies(vec![assistant_text("ji beta, bataiye?")]));
        let gateway = Arc::new(RecordingGateway::default());
        let runtime = AgentRuntime::new(llm.clone(), registry(gateway.clone()));

        let reply = runtime.run_turn("salam").await.expect("turn should complete");

        assert_eq!(reply, "ji beta, bataiye?");
        assert!(gateway.requests().await.is_empty());

        let transcripts = llm.transcripts().await;
        assert_eq!(transcripts.len(), 1);
        assert_eq!(transcripts[0][0].role, "system");
        assert_eq!(transcripts[0][1].content.as_deref(), Some("salam"));
    }

    #[tokio::test]
    async fn tool_calls_are_executed_and_their_results_fed_back() {
        let llm = Arc::new(ScriptedLlm::with_replies(vec![
            assistant_tool_call(
                "call-1",
                "find_matches",
                json!({"min_age": 20, "requester_category": "male"}),
            ),
            assistant_tool_call(
                "call-2",
                "send_whatsapp_message",
                json!({"number": "+923001112222", "message": "Fariha, Kinza"}),
            ),
            assistant_text("Sent the matches to your WhatsApp!"),
        ]));
        let gateway = Arc::new(RecordingGateway::default());
        let runtime = AgentRuntime::new(llm.clone(), registry(gateway.clone()));

        let reply = runtime
            .run_turn("My WhatsApp number is +923001112222 and I want matches above age 20.")
            .await
            .expect("turn should complete");

        assert_eq!(reply, "Sent the matches to your WhatsApp!");

        let requests = gateway.requests().await;
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].to, "+923001112222");

        // The second completion saw the first tool's result in a tool message.
        let transcripts = llm.transcripts().await;
        assert_eq!(transcripts.len(), 3);
        let tool_message = transcripts[1].last().expect("tool message appended");
        assert_eq!(tool_message.role, "tool");
        assert_eq!(tool_message.tool_call_id.as_deref(), Some("call-1"));
        let tool_content = tool_message.content.as_deref().expect("tool content");
        assert!(tool_content.contains("Fariha"));
        assert!(tool_content.contains("Kinza"));
        assert!(!tool_content.contains("muneeb"), "own-category candidates must not appear");
    }

    #[tokio::test]
    async fn unknown_tool_names_are_folded_into_error_results() {
        let llm = Arc::new(ScriptedLlm::with_replies(vec![
            assistant_tool_call("call-1", "make_tea", json!({})),
            assistant_text("Sorry, something went sideways."),
        ]));
        let runtime =
            AgentRuntime::new(llm.clone(), registry(Arc::new(RecordingGateway::default())));

        let reply = runtime.run_turn("salam").await.expect("turn should still complete");

        assert_eq!(reply, "Sorry, something went sideways.");
        let transcripts = llm.transcripts().await;
        let tool_message = transcripts[1].last().expect("tool message appended");
        assert!(tool_message.content.as_deref().expect("content").contains("unknown tool"));
    }

    #[tokio::test]
    async fn endless_tool_requests_hit_the_round_limit() {
        let repeated = (0..4)
            .map(|index| {
                assistant_tool_call(
                    &format!("call-{index}"),
                    "find_matches",
                    json!({"min_age": 0, "requester_category": "male"}),
                )
            })
            .collect();
        let llm = Arc::new(ScriptedLlm::with_replies(repeated));
        let runtime = AgentRuntime::new(llm, registry(Arc::new(RecordingGateway::default())))
            .with_max_tool_rounds(3);

        let error = runtime.run_turn("salam").await.expect_err("turn should fail");

        assert!(matches!(error, AgentError::ToolRoundsExhausted(3)));
    }

    #[tokio::test]
    async fn blank_assistant_text_is_an_empty_reply_error() {
        let llm = Arc::new(ScriptedLlm::with_replies(vec![assistant_text("   ")]));
        let runtime = AgentRuntime::new(llm, registry(Arc::new(RecordingGateway::default())));

        let error = runtime.run_turn("salam").await.expect_err("turn should fail");

        assert!(matches!(error, AgentError::EmptyReply));
    }
}
