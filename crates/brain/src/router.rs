//! Trigger detection for generative tasks.

use strix_core::task::{TaskKind, TaskProfiles, TaskRequest};

use crate::prompts;

/// Ordered trigger table. Command-prefixed forms come first so the bare
/// scan never sees a leading `!`. Matching is by prefix, exactly like the
/// bare forms: `summarized notes` routes to summarization with payload
/// `d notes`.
const TRIGGERS: [(&str, TaskKind); 6] = [
    ("!summarize", TaskKind::Summarization),
    ("!flashcards", TaskKind::Flashcards),
    ("!quiz", TaskKind::Quiz),
    ("summarize", TaskKind::Summarization),
    ("flashcards", TaskKind::Flashcards),
    ("quiz", TaskKind::Quiz),
];

/// Scans message text for task triggers and assembles the generative
/// request when one fires.
///
/// Stateless apart from its sampling profiles; one router serves any
/// number of concurrent dispatches.
#[derive(Debug, Clone)]
pub struct TaskRouter {
    profiles: TaskProfiles,
}

impl TaskRouter {
    pub fn new(profiles: TaskProfiles) -> Self {
        Self { profiles }
    }

    /// Check the message for a task trigger.
    ///
    /// The message is trimmed and lowercased before the prefix scan; the
    /// payload is what remains after the trigger, trimmed again. Returns
    /// `None` when no trigger fires, handing control to rule matching.
    pub fn route(&self, message: &str) -> Option<TaskRequest> {
        let text = message.trim().to_lowercase();
        for (trigger, kind) in TRIGGERS {
            if let Some(rest) = text.strip_prefix(trigger) {
                let payload = rest.trim();
                return Some(TaskRequest {
                    kind,
                    prompt: prompts::build_prompt(kind, payload),
                    sampling: self.profiles.for_kind(kind),
                });
            }
        }
        None
    }
}

impl Default for TaskRouter {
    fn default() -> Self {
        Self::new(TaskProfiles::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_triggers_route_to_their_kinds() {
        let router = TaskRouter::default();
        let cases = [
            ("summarize the water cycle", TaskKind::Summarization),
            ("flashcards ancient rome", TaskKind::Flashcards),
            ("quiz newton's laws", TaskKind::Quiz),
        ];
        for (message, expected) in cases {
            let request = router.route(message).unwrap();
            assert_eq!(request.kind, expected, "message: {message}");
        }
    }

    #[test]
    fn command_prefixed_triggers_route_the_same() {
        let router = TaskRouter::default();
        assert_eq!(
            router.route("!summarize the water cycle").unwrap().kind,
            TaskKind::Summarization
        );
        assert_eq!(
            router.route("!flashcards rome").unwrap().kind,
            TaskKind::Flashcards
        );
        assert_eq!(router.route("!quiz gravity").unwrap().kind, TaskKind::Quiz);
    }

    #[test]
    fn matching_ignores_case_and_outer_whitespace() {
        let router = TaskRouter::default();
        let request = router.route("  Summarize  Photosynthesis is ...  ").unwrap();
        assert_eq!(request.kind, TaskKind::Summarization);
        assert!(request.prompt.contains("\"photosynthesis is ...\""));
    }

    #[test]
    fn payload_is_the_trimmed_remainder() {
        let router = TaskRouter::default();
        let request = router.route("summarize photosynthesis is ...").unwrap();
        assert!(request.prompt.contains("Text: \"photosynthesis is ...\""));
        assert_eq!(request.sampling.temperature, 0.6);
        assert_eq!(request.sampling.context_window, 150);
        assert_eq!(request.sampling.max_tokens, 200);
    }

    #[test]
    fn trigger_must_be_a_prefix() {
        let router = TaskRouter::default();
        assert!(router.route("please summarize this").is_none());
        assert!(router.route("the quiz was hard").is_none());
        assert!(router.route("hello there").is_none());
    }

    #[test]
    fn empty_payload_still_routes() {
        let router = TaskRouter::default();
        let request = router.route("quiz").unwrap();
        assert_eq!(request.kind, TaskKind::Quiz);
        assert!(request.prompt.contains("Topic: \"\""));
    }

    #[test]
    fn sampling_follows_the_configured_profile() {
        let mut profiles = TaskProfiles::default();
        profiles.summarization = strix_core::task::SamplingProfile::new(0.75, 300, 350);
        let router = TaskRouter::new(profiles);
        let request = router.route("summarize anything").unwrap();
        assert_eq!(request.sampling.temperature, 0.75);
        assert_eq!(request.sampling.context_window, 300);
        assert_eq!(request.sampling.max_tokens, 350);
    }
}
