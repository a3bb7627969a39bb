//! Configuration loading and validation for Strix.
//!
//! Loads configuration from `~/.strix/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use strix_core::task::TaskProfiles;

/// The root configuration structure.
///
/// Maps directly to `~/.strix/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Model name sent to the inference backend
    #[serde(default = "default_model")]
    pub model: String,

    /// Inference backend connection
    #[serde(default)]
    pub ollama: OllamaConfig,

    /// Rule table location
    #[serde(default)]
    pub rules: RulesConfig,

    /// Discord transport settings
    #[serde(default)]
    pub discord: DiscordConfig,

    /// Per-task sampling profiles
    #[serde(default)]
    pub tasks: TaskProfiles,
}

fn default_model() -> String {
    "llama3.2:latest".into()
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("model", &self.model)
            .field("ollama", &self.ollama)
            .field("rules", &self.rules)
            .field("discord", &self.discord)
            .field("tasks", &self.tasks)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout for one generation, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:11434".into()
}
fn default_timeout_secs() -> u64 {
    120
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Path to the CSV rule table. A missing file is announced, not fatal.
    #[serde(default = "default_rules_file")]
    pub file: PathBuf,
}

fn default_rules_file() -> PathBuf {
    PathBuf::from("rules/bot.csv")
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            file: default_rules_file(),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct DiscordConfig {
    /// Bot token. Usually set via `STRIX_DISCORD_TOKEN` or `DISCORD_TOKEN`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Allowlist of sender IDs. Empty = deny all. ["*"] = allow all.
    #[serde(default = "default_allowed_users")]
    pub allowed_users: Vec<String>,

    /// Respond to every message, not only mentions and DMs.
    #[serde(default)]
    pub promiscuous: bool,
}

fn default_allowed_users() -> Vec<String> {
    vec!["*".into()]
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            token: None,
            allowed_users: default_allowed_users(),
            promiscuous: false,
        }
    }
}

impl std::fmt::Debug for DiscordConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscordConfig")
            .field("token", &redact(&self.token))
            .field("allowed_users", &self.allowed_users)
            .field("promiscuous", &self.promiscuous)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.strix/config.toml).
    ///
    /// Environment variables take precedence over the file:
    /// - `STRIX_MODEL` — model name
    /// - `STRIX_OLLAMA_URL` — backend base URL
    /// - `STRIX_RULES` — rule table path
    /// - `STRIX_DISCORD_TOKEN` / `DISCORD_TOKEN` — bot token
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;

        if let Ok(model) = std::env::var("STRIX_MODEL") {
            config.model = model;
        }

        if let Ok(url) = std::env::var("STRIX_OLLAMA_URL") {
            config.ollama.base_url = url;
        }

        if let Ok(rules) = std::env::var("STRIX_RULES") {
            config.rules.file = PathBuf::from(rules);
        }

        if config.discord.token.is_none() {
            config.discord.token = std::env::var("STRIX_DISCORD_TOKEN")
                .ok()
                .or_else(|| std::env::var("DISCORD_TOKEN").ok());
        }

        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".strix")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, profile) in [
            ("summarization", self.tasks.summarization),
            ("flashcards", self.tasks.flashcards),
            ("quiz", self.tasks.quiz),
        ] {
            if profile.temperature < 0.0 || profile.temperature > 2.0 {
                return Err(ConfigError::ValidationError(format!(
                    "tasks.{name}.temperature must be between 0.0 and 2.0"
                )));
            }
            if profile.context_window == 0 {
                return Err(ConfigError::ValidationError(format!(
                    "tasks.{name}.context_window must be at least 1"
                )));
            }
            if profile.max_tokens == 0 {
                return Err(ConfigError::ValidationError(format!(
                    "tasks.{name}.max_tokens must be at least 1"
                )));
            }
        }

        if self.ollama.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "ollama.timeout_secs must be at least 1".into(),
            ));
        }

        if self.model.is_empty() {
            return Err(ConfigError::ValidationError("model cannot be empty".into()));
        }

        Ok(())
    }

    /// Generate a default config TOML string (for first-run setup).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            ollama: OllamaConfig::default(),
            rules: RulesConfig::default(),
            discord: DiscordConfig::default(),
            tasks: TaskProfiles::default(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.model, "llama3.2:latest");
        assert_eq!(config.ollama.base_url, "http://localhost:11434");
        assert_eq!(config.rules.file, PathBuf::from("rules/bot.csv"));
        assert_eq!(config.discord.allowed_users, vec!["*"]);
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.model, config.model);
        assert_eq!(parsed.ollama.base_url, config.ollama.base_url);
        assert_eq!(parsed.tasks.flashcards, config.tasks.flashcards);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let toml_str = r#"
model = "mistral:7b"

[tasks.summarization]
temperature = 0.75
context_window = 300
max_tokens = 350
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.model, "mistral:7b");
        assert_eq!(config.tasks.summarization.temperature, 0.75);
        assert_eq!(config.tasks.summarization.context_window, 300);
        // Untouched sections keep their defaults.
        assert_eq!(config.tasks.quiz.temperature, 0.6);
        assert_eq!(config.ollama.timeout_secs, 120);
    }

    #[test]
    fn invalid_temperature_rejected() {
        let mut config = AppConfig::default();
        config.tasks.quiz.temperature = 5.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("quiz"));
    }

    #[test]
    fn zero_token_budget_rejected() {
        let mut config = AppConfig::default();
        config.tasks.flashcards.max_tokens = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let result = AppConfig::load_from(Path::new("/nonexistent/config.toml"));
        assert!(result.is_ok());
        assert_eq!(result.unwrap().model, "llama3.2:latest");
    }

    #[test]
    fn file_with_bad_values_is_rejected_on_load() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[ollama]\ntimeout_secs = 0").unwrap();
        file.flush().unwrap();
        let err = AppConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn debug_output_redacts_the_token() {
        let mut config = AppConfig::default();
        config.discord.token = Some("very-secret-token".into());
        let debugged = format!("{config:?}");
        assert!(debugged.contains("[REDACTED]"));
        assert!(!debugged.contains("very-secret-token"));
    }

    #[test]
    fn default_toml_generation() {
        let toml_str = AppConfig::default_toml();
        assert!(toml_str.contains("llama3.2:latest"));
        assert!(toml_str.contains("11434"));
    }
}
