//! # Strix Core
//!
//! Domain types, traits, and error definitions for the Strix message
//! engine. This crate has **zero framework dependencies** — it defines the
//! domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! Every subsystem boundary is defined as a trait here. Implementations
//! live in their respective crates. This enables:
//! - Swapping implementations via configuration
//! - Easy testing with mock/stub implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod channel;
pub mod context;
pub mod error;
pub mod facts;
pub mod inference;
pub mod task;

// Re-export key types at crate root for ergonomics
pub use channel::{Channel, ChannelEvent, ChannelId};
pub use context::{ChatContext, PlanAction, MESSAGE_KEY};
pub use error::{Error, Result};
pub use facts::{FactValue, Facts};
pub use inference::{GenerateRequest, Generation, InferenceClient};
pub use task::{SamplingProfile, TaskKind, TaskProfiles, TaskRequest};
