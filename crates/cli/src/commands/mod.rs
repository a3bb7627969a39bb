pub mod chat;
pub mod doctor;
pub mod init;
pub mod rules;
pub mod serve;
pub mod task;

use std::sync::Arc;
use std::time::Duration;

use strix_brain::Brain;
use strix_config::AppConfig;
use strix_inference::OllamaClient;

/// Build the inference client the configuration points at.
pub fn inference_client(config: &AppConfig) -> Arc<OllamaClient> {
    Arc::new(OllamaClient::new(
        &config.ollama.base_url,
        Duration::from_secs(config.ollama.timeout_secs),
    ))
}

/// Build a brain wired to the configured backend and profiles.
pub fn build_brain(config: &AppConfig) -> Brain {
    Brain::new(
        "strix",
        inference_client(config),
        &config.model,
        config.tasks,
    )
}
