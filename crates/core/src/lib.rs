//! Core domain for rishta - configuration, candidate roster, match filtering
//!
//! This crate holds everything the rest of the workspace composes:
//! - **Configuration** (`config`) - explicit `AppConfig` built once at startup
//!   from defaults, an optional `rishta.toml`, `RISHTA_*` environment
//!   variables, and programmatic overrides
//! - **Domain types** (`domain`) - candidate records, the two-valued gender
//!   category and its complement, match queries and results
//! - **Roster** (`roster`) - the fixed in-memory candidate directory and the
//!   `find_matches` scan over it
//!
//! # Key Types
//!
//! - `AppConfig` - validated, fail-fast startup configuration
//! - `CandidateDirectory` - read-only roster with the match query surface
//! - `CategoryPolicy` - lenient (silent empty) vs strict (explicit error)
//!   handling of unrecognized requester categories

pub mod config;
pub mod domain;
pub mod errors;
pub mod roster;

pub use domain::{CandidateRecord, Gender, MatchQuery, MatchResult};
pub use errors::MatchError;
pub use roster::{default_roster, CandidateDirectory, CategoryPolicy};
