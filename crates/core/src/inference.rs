//! InferenceClient trait — the abstraction over generative backends.
//!
//! A client knows how to send a rendered prompt to a language-model backend
//! and return the generated text together with how long the call took.
//! Failures come back as values; nothing downstream should have to catch a
//! panic to survive a dead backend.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::InferenceError;
use crate::task::SamplingProfile;

/// One generation request: a model, a prompt, and the sampling profile
/// the prompt's task type is tuned with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub sampling: SamplingProfile,
}

impl GenerateRequest {
    pub fn new(
        model: impl Into<String>,
        prompt: impl Into<String>,
        sampling: SamplingProfile,
    ) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            sampling,
        }
    }
}

/// A completed generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Generation {
    /// The generated text.
    pub text: String,

    /// Which model actually responded (may differ from requested).
    pub model: String,

    /// Wall-clock time the backend call took, measured by the client.
    pub elapsed: Duration,
}

/// The core inference trait.
///
/// Every backend (Ollama today, anything wire-compatible tomorrow)
/// implements this. The brain calls `generate()` without knowing which
/// backend is wired in.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// A human-readable name for this client (e.g., "ollama").
    fn name(&self) -> &str;

    /// Send a request and wait for the complete generation.
    async fn generate(
        &self,
        request: GenerateRequest,
    ) -> std::result::Result<Generation, InferenceError>;

    /// List models the backend currently serves.
    async fn list_models(&self) -> std::result::Result<Vec<String>, InferenceError> {
        Ok(Vec::new())
    }

    /// Health check — can we reach the backend?
    async fn health_check(&self) -> std::result::Result<bool, InferenceError> {
        Ok(true)
    }
}
