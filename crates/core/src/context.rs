//! Chat context: the per-message record that flows through the engine.
//!
//! A channel adapter builds one `ChatContext` per inbound message, the
//! brain enriches it with match results and a response, the adapter sends
//! the response back, and the context is dropped. Nothing persists across
//! messages.

use serde::{Deserialize, Serialize};

use crate::facts::{FactValue, Facts};

/// Fact key under which every adapter stores the raw message text.
pub const MESSAGE_KEY: &str = "message";

/// What a matched rule resolves to.
///
/// The two arms are distinct at construction time so downstream code never
/// inspects the payload string to learn its kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum PlanAction {
    /// Send this text back verbatim.
    Reply(String),
    /// Hand off to a named action handler.
    Invoke(String),
}

/// Ordered facts about one inbound message plus the engine's verdict on it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatContext {
    /// Everything known about the message, in the order it was learned.
    pub facts: Facts,

    /// Action of the most specific matching plan, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_result: Option<PlanAction>,

    /// Actions of every matching plan, in repository order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub all_results: Vec<PlanAction>,

    /// Specificity of the winning plan. 0 until a match pass ran, and 0
    /// after a pass where nothing (or only wildcard plans) matched.
    #[serde(default)]
    pub match_score: u32,

    /// The reply to send. Always set once the brain has processed the
    /// context; `None` before that.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
}

impl ChatContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context carrying just a message fact. The common case for tests
    /// and the CLI chat loop.
    pub fn from_message(text: impl Into<String>) -> Self {
        let mut ctx = Self::new();
        ctx.facts.set(MESSAGE_KEY, text.into());
        ctx
    }

    /// The raw message text, when present and textual.
    pub fn message(&self) -> Option<&str> {
        match self.facts.get(MESSAGE_KEY) {
            Some(FactValue::Text(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Record the outcome of a rule-match pass.
    pub fn record_match(
        &mut self,
        best: Option<PlanAction>,
        all: Vec<PlanAction>,
        score: u32,
    ) {
        self.best_result = best;
        self.all_results = all;
        self.match_score = score;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_context_has_no_verdict() {
        let ctx = ChatContext::from_message("hello");
        assert_eq!(ctx.message(), Some("hello"));
        assert!(ctx.best_result.is_none());
        assert!(ctx.all_results.is_empty());
        assert_eq!(ctx.match_score, 0);
        assert!(ctx.response.is_none());
    }

    #[test]
    fn record_match_fills_verdict_fields() {
        let mut ctx = ChatContext::from_message("hi");
        ctx.record_match(
            Some(PlanAction::Reply("hey".into())),
            vec![PlanAction::Reply("hey".into())],
            2,
        );
        assert_eq!(ctx.best_result, Some(PlanAction::Reply("hey".into())));
        assert_eq!(ctx.all_results.len(), 1);
        assert_eq!(ctx.match_score, 2);
    }

    #[test]
    fn action_serialization_keeps_the_tag() {
        let action = PlanAction::Invoke("lookup".into());
        let json = serde_json::to_string(&action).unwrap();
        assert!(json.contains("invoke"));
        let back: PlanAction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, action);
    }

    #[test]
    fn non_text_message_fact_is_not_a_message() {
        let mut ctx = ChatContext::new();
        ctx.facts.set(MESSAGE_KEY, 42i64);
        assert!(ctx.message().is_none());
    }
}
