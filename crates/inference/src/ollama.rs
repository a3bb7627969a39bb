//! Native Ollama client.
//!
//! Talks to Ollama's own API (not an OpenAI shim): single-shot generation
//! via `POST /api/generate` with `stream: false`, model listing via
//! `GET /api/tags`. Sampling parameters travel in the `options` object as
//! `temperature` / `num_ctx` / `num_predict`.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use strix_core::error::InferenceError;
use strix_core::inference::{GenerateRequest, Generation, InferenceClient};

/// Where a stock Ollama install listens.
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// An Ollama inference backend.
pub struct OllamaClient {
    base_url: String,
    client: reqwest::Client,
}

impl OllamaClient {
    /// Create a client for the given base URL with a request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Client for a local Ollama on the default port (convenience constructor).
    pub fn local() -> Self {
        Self::new(DEFAULT_BASE_URL, Duration::from_secs(120))
    }

    fn to_api_request(request: &GenerateRequest) -> ApiGenerateRequest {
        ApiGenerateRequest {
            model: request.model.clone(),
            prompt: request.prompt.clone(),
            options: ApiOptions {
                temperature: request.sampling.temperature,
                num_ctx: request.sampling.context_window,
                num_predict: request.sampling.max_tokens,
            },
            stream: false,
        }
    }
}

#[async_trait]
impl InferenceClient for OllamaClient {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn generate(
        &self,
        request: GenerateRequest,
    ) -> std::result::Result<Generation, InferenceError> {
        let url = format!("{}/api/generate", self.base_url);
        let body = Self::to_api_request(&request);

        debug!(model = %request.model, "Sending generate request");

        let started = Instant::now();
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    InferenceError::Timeout(e.to_string())
                } else {
                    InferenceError::Network(e.to_string())
                }
            })?;
        let elapsed = started.elapsed();

        let status = response.status().as_u16();

        if status == 404 {
            // Ollama answers 404 both for unknown routes and unloaded models.
            let error_body = response.text().await.unwrap_or_default();
            return Err(InferenceError::ModelNotFound(if error_body.is_empty() {
                request.model
            } else {
                error_body
            }));
        }

        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Backend returned error");
            return Err(InferenceError::ApiError {
                status_code: status,
                message: error_body,
            });
        }

        let api_response: ApiGenerateResponse =
            response.json().await.map_err(|e| InferenceError::ApiError {
                status_code: 200,
                message: format!("Failed to parse response: {e}"),
            })?;

        debug!(
            model = %api_response.model,
            elapsed_ms = elapsed.as_millis() as u64,
            "Generation complete"
        );

        Ok(Generation {
            text: api_response.response,
            model: api_response.model,
            elapsed,
        })
    }

    async fn list_models(&self) -> std::result::Result<Vec<String>, InferenceError> {
        let url = format!("{}/api/tags", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| InferenceError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Ok(Vec::new());
        }

        let body: ApiTagsResponse = response
            .json()
            .await
            .map_err(|e| InferenceError::Network(e.to_string()))?;

        Ok(body.models.into_iter().map(|m| m.name).collect())
    }

    async fn health_check(&self) -> std::result::Result<bool, InferenceError> {
        let url = format!("{}/api/tags", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| InferenceError::Network(e.to_string()))?;

        Ok(response.status().is_success())
    }
}

// --- Ollama API types (internal) ---

#[derive(Debug, Serialize)]
struct ApiGenerateRequest {
    model: String,
    prompt: String,
    options: ApiOptions,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ApiOptions {
    temperature: f32,
    num_ctx: u32,
    num_predict: u32,
}

#[derive(Debug, Deserialize)]
struct ApiGenerateResponse {
    model: String,
    response: String,
    #[serde(default)]
    done: bool,
}

#[derive(Debug, Deserialize)]
struct ApiTagsResponse {
    #[serde(default)]
    models: Vec<ApiModelTag>,
}

#[derive(Debug, Deserialize)]
struct ApiModelTag {
    name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strix_core::task::SamplingProfile;

    #[test]
    fn base_url_is_normalized() {
        let client = OllamaClient::new("http://ollama.internal:11434/", Duration::from_secs(5));
        assert_eq!(client.base_url, "http://ollama.internal:11434");
    }

    #[test]
    fn local_constructor_targets_the_default_port() {
        let client = OllamaClient::local();
        assert_eq!(client.name(), "ollama");
        assert!(client.base_url.contains("localhost:11434"));
    }

    #[test]
    fn request_shaping_matches_the_wire_format() {
        let request = GenerateRequest::new(
            "llama3.2:latest",
            "Summarize this.",
            SamplingProfile::new(0.6, 150, 200),
        );
        let body = OllamaClient::to_api_request(&request);
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["model"], "llama3.2:latest");
        assert_eq!(json["prompt"], "Summarize this.");
        assert_eq!(json["options"]["num_ctx"], 150);
        assert_eq!(json["options"]["num_predict"], 200);
        assert_eq!(json["stream"], false);
        let temperature = json["options"]["temperature"].as_f64().unwrap();
        assert!((temperature - 0.6).abs() < 1e-6);
    }

    // --- response parsing tests ---

    #[test]
    fn parse_generate_response() {
        let data = r#"{
            "model": "llama3.2:latest",
            "created_at": "2025-03-01T12:00:00.000Z",
            "response": "Photosynthesis converts light into chemical energy.",
            "done": true,
            "total_duration": 1}"#;
        let parsed: ApiGenerateResponse = serde_json::from_str(data).unwrap();
        assert_eq!(parsed.model, "llama3.2:latest");
        assert!(parsed.response.starts_with("Photosynthesis"));
        assert!(parsed.done);
    }

    #[test]
    fn parse_generate_response_without_done_flag() {
        let data = r#"{"model": "m", "response": "ok"}"#;
        let parsed: ApiGenerateResponse = serde_json::from_str(data).unwrap();
        assert!(!parsed.done);
    }

    #[test]
    fn parse_tags_response() {
        let data = r#"{
            "models": [
                {"name": "llama3.2:latest", "size": 2019393189},
                {"name": "mistral:7b", "size": 4109865159}
            ]
        }"#;
        let parsed: ApiTagsResponse = serde_json::from_str(data).unwrap();
        let names: Vec<&str> = parsed.models.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["llama3.2:latest", "mistral:7b"]);
    }

    #[test]
    fn parse_empty_tags_response() {
        let parsed: ApiTagsResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.models.is_empty());
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_network_error() {
        // Port 9 is the discard service; nothing is listening there.
        let client = OllamaClient::new("http://127.0.0.1:9", Duration::from_millis(200));
        let err = client
            .generate(GenerateRequest::new(
                "m",
                "hi",
                SamplingProfile::new(0.6, 150, 200),
            ))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            InferenceError::Network(_) | InferenceError::Timeout(_)
        ));
    }
}
