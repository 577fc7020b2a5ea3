//! Messaging integration - outbound WhatsApp delivery
//!
//! This crate provides the notification side of rishta:
//! - **Gateway** (`gateway`) - the `MessageGateway` capability the agent
//!   holds, its UltraMsg implementation, and a recording test double
//!
//! # Architecture
//!
//! ```text
//! Agent tool call → MessageGateway::send → one POST → DeliveryOutcome
//! ```
//!
//! One delivery attempt per call. There is no retry, no rate limiting, and
//! no queue: the caller receives the outcome of exactly one POST.
//!
//! # Key Types
//!
//! - `MessageGateway` - capability trait with a single `send` operation
//! - `UltraMsgGateway` - form-encoded POST to the UltraMsg chat endpoint
//! - `RecordingGateway` - scripted double for exercising callers

pub mod gateway;

pub use gateway::{
    DeliveryOutcome, DeliveryRequest, MessageGateway, RecordingGateway, UltraMsgGateway,
};
