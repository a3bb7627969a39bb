//! Inference client implementations for Strix.
//!
//! All clients implement the `strix_core::InferenceClient` trait; the
//! brain is wired to whichever one configuration names.

pub mod ollama;

pub use ollama::{OllamaClient, DEFAULT_BASE_URL};
