//! Agent runtime - conversational matchmaking over tool calls
//!
//! This crate provides the "brain" of rishta - the agent runtime that:
//! - Talks to an OpenAI-compatible chat-completions endpoint (`llm`)
//! - Exposes the two capabilities as callable tools (`tools`)
//! - Runs one conversational turn per intake submission (`runtime`)
//!
//! # Architecture
//!
//! The agent follows a constrained loop:
//! 1. **Prompt** (`prompts`) - persona instructions + the intake message
//! 2. **Completion** (`llm`) - one chat call, possibly requesting tool calls
//! 3. **Tool Execution** (`tools`) - candidate lookup, WhatsApp delivery,
//!    invoked sequentially, never concurrently
//! 4. **Reply** - the assistant text relayed back to the intake surface
//!
//! # Safety Principle
//!
//! The LLM is strictly a translator. It never decides who is in the roster
//! or whether a delivery succeeded; those are deterministic results produced
//! by the directory and the gateway.

pub mod llm;
pub mod prompts;
pub mod runtime;
pub mod tools;
