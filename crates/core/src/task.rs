//! Generative task domain types.
//!
//! A task is a structured request for the inference backend: which kind of
//! output is wanted, the fully-rendered prompt, and the sampling profile
//! that kind of output is tuned with.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TaskError;

/// The closed set of generative task types the engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    Summarization,
    Flashcards,
    Quiz,
}

impl TaskKind {
    pub const ALL: [TaskKind; 3] = [
        TaskKind::Summarization,
        TaskKind::Flashcards,
        TaskKind::Quiz,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::Summarization => "summarization",
            TaskKind::Flashcards => "flashcards",
            TaskKind::Quiz => "quiz",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskKind {
    type Err = TaskError;

    /// Accepts the canonical names only. Anything else is a contract
    /// violation, not a routing miss.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "summarization" => Ok(TaskKind::Summarization),
            "flashcards" => Ok(TaskKind::Flashcards),
            "quiz" => Ok(TaskKind::Quiz),
            other => Err(TaskError::Unsupported(other.to_string())),
        }
    }
}

/// Sampling parameters for one task type.
///
/// Fixed per task kind at configuration time; callers never tune these
/// per invocation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingProfile {
    /// Output randomness, valid range 0.0 to 2.0.
    pub temperature: f32,
    /// Context window size in tokens.
    pub context_window: u32,
    /// Output length cap in tokens.
    pub max_tokens: u32,
}

impl SamplingProfile {
    pub const fn new(temperature: f32, context_window: u32, max_tokens: u32) -> Self {
        Self {
            temperature,
            context_window,
            max_tokens,
        }
    }
}

/// The sampling profile for each task kind.
///
/// Engine defaults below; deployments may tune each triple in
/// configuration, but every invocation of a kind uses that kind's one
/// profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaskProfiles {
    #[serde(default = "default_summarization")]
    pub summarization: SamplingProfile,
    #[serde(default = "default_flashcards")]
    pub flashcards: SamplingProfile,
    #[serde(default = "default_quiz")]
    pub quiz: SamplingProfile,
}

fn default_summarization() -> SamplingProfile {
    SamplingProfile::new(0.6, 150, 200)
}
fn default_flashcards() -> SamplingProfile {
    SamplingProfile::new(0.5, 150, 200)
}
fn default_quiz() -> SamplingProfile {
    SamplingProfile::new(0.6, 150, 200)
}

impl Default for TaskProfiles {
    fn default() -> Self {
        Self {
            summarization: default_summarization(),
            flashcards: default_flashcards(),
            quiz: default_quiz(),
        }
    }
}

impl TaskProfiles {
    pub fn for_kind(&self, kind: TaskKind) -> SamplingProfile {
        match kind {
            TaskKind::Summarization => self.summarization,
            TaskKind::Flashcards => self.flashcards,
            TaskKind::Quiz => self.quiz,
        }
    }
}

/// A fully-prepared generative request: ready for an inference client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRequest {
    pub kind: TaskKind,
    pub prompt: String,
    pub sampling: SamplingProfile,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_through_str() {
        for kind in TaskKind::ALL {
            assert_eq!(kind.as_str().parse::<TaskKind>().unwrap(), kind);
        }
    }

    #[test]
    fn kind_parse_ignores_case_and_whitespace() {
        assert_eq!(" Quiz ".parse::<TaskKind>().unwrap(), TaskKind::Quiz);
        assert_eq!(
            "FLASHCARDS".parse::<TaskKind>().unwrap(),
            TaskKind::Flashcards
        );
    }

    #[test]
    fn unknown_kind_fails_fast() {
        let err = "translate".parse::<TaskKind>().unwrap_err();
        assert_eq!(err, TaskError::Unsupported("translate".into()));
    }

    #[test]
    fn profile_is_a_plain_triple() {
        let profile = SamplingProfile::new(0.6, 150, 200);
        assert_eq!(profile.temperature, 0.6);
        assert_eq!(profile.context_window, 150);
        assert_eq!(profile.max_tokens, 200);
    }

    #[test]
    fn default_profiles_differ_where_they_should() {
        let profiles = TaskProfiles::default();
        assert_eq!(profiles.for_kind(TaskKind::Summarization).temperature, 0.6);
        assert_eq!(profiles.for_kind(TaskKind::Flashcards).temperature, 0.5);
        assert_eq!(profiles.for_kind(TaskKind::Quiz).temperature, 0.6);
        for kind in TaskKind::ALL {
            let profile = profiles.for_kind(kind);
            assert_eq!(profile.context_window, 150);
            assert_eq!(profile.max_tokens, 200);
        }
    }
}
