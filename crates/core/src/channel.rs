//! Channel trait — the abstraction over chat transports.
//!
//! A Channel connects Strix to a messaging platform (Discord, CLI, test
//! harness). It yields inbound events and carries responses back. The
//! engine never talks to a platform API directly; it sees facts.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::context::{ChatContext, MESSAGE_KEY};
use crate::error::ChannelError;

/// Unique identifier for a channel instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelId(pub String);

impl std::fmt::Display for ChannelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One inbound message event from a transport.
///
/// Transport ids are kept as text: Discord snowflakes overflow the safe
/// integer range of a double, and rules compare canonical text anyway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelEvent {
    /// Unique event ID.
    pub id: String,

    /// The channel instance this event arrived on.
    pub channel_id: ChannelId,

    /// Sender identifier (platform-specific user ID).
    pub sender_id: String,

    /// Sender's short name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_name: Option<String>,

    /// Sender's display/full name, when the platform distinguishes one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_fullname: Option<String>,

    /// The text content, already stripped of bot-mention tokens.
    pub content: String,

    /// The chat/thread identifier to send the response to.
    pub chat_id: String,

    /// Server (guild) id and name; absent for direct messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_name: Option<String>,

    /// Name of the channel within the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_name: Option<String>,

    /// Thread id and name when the message arrived inside a thread.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_name: Option<String>,

    /// When the event was received.
    pub timestamp: DateTime<Utc>,
}

impl ChannelEvent {
    pub fn new(
        channel_id: ChannelId,
        sender_id: impl Into<String>,
        content: impl Into<String>,
        chat_id: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            channel_id,
            sender_id: sender_id.into(),
            sender_name: None,
            sender_fullname: None,
            content: content.into(),
            chat_id: chat_id.into(),
            guild_id: None,
            server_name: None,
            channel_name: None,
            thread_id: None,
            thread_name: None,
            timestamp: Utc::now(),
        }
    }

    pub fn with_sender_name(mut self, name: impl Into<String>) -> Self {
        self.sender_name = Some(name.into());
        self
    }

    pub fn with_sender_fullname(mut self, name: impl Into<String>) -> Self {
        self.sender_fullname = Some(name.into());
        self
    }

    pub fn with_guild(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.guild_id = Some(id.into());
        self.server_name = Some(name.into());
        self
    }

    pub fn with_channel_name(mut self, name: impl Into<String>) -> Self {
        self.channel_name = Some(name.into());
        self
    }

    pub fn with_thread(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.thread_id = Some(id.into());
        self.thread_name = Some(name.into());
        self
    }

    /// Flatten this event into the fact vocabulary the engine matches on.
    /// Absent transport fields become `Null` facts, so wildcard conditions
    /// on them fail while the keys still exist.
    pub fn to_context(&self) -> ChatContext {
        let mut ctx = ChatContext::new();
        ctx.facts.set("guild_id", self.guild_id.clone());
        ctx.facts.set("channel_id", self.chat_id.as_str());
        ctx.facts.set("thread_id", self.thread_id.clone());
        ctx.facts.set("author_id", self.sender_id.as_str());
        ctx.facts.set("server_name", self.server_name.clone());
        ctx.facts.set("channel_name", self.channel_name.clone());
        ctx.facts.set("thread_name", self.thread_name.clone());
        ctx.facts.set("author_name", self.sender_name.clone());
        ctx.facts.set("author_fullname", self.sender_fullname.clone());
        ctx.facts.set(MESSAGE_KEY, self.content.as_str());
        ctx
    }
}

/// The core Channel trait.
///
/// Implementations handle platform-specific connection logic and
/// authentication. The service loop drives them uniformly.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Human-readable channel name (e.g., "discord", "cli").
    fn name(&self) -> &str;

    /// Unique ID for this channel instance.
    fn id(&self) -> &ChannelId;

    /// Start listening for incoming events.
    ///
    /// Returns a receiver that yields inbound events. The implementation
    /// handles polling or gateway connections internally.
    async fn start(
        &self,
    ) -> std::result::Result<
        tokio::sync::mpsc::Receiver<std::result::Result<ChannelEvent, ChannelError>>,
        ChannelError,
    >;

    /// Send a response to a specific chat.
    async fn send(
        &self,
        chat_id: &str,
        content: &str,
        reply_to: Option<&str>,
    ) -> std::result::Result<(), ChannelError>;

    /// Check if a sender is allowed (allowlist check).
    fn is_allowed(&self, sender_id: &str) -> bool;

    /// Stop the channel gracefully.
    async fn stop(&self) -> std::result::Result<(), ChannelError> {
        Ok(())
    }

    /// Health check — is the channel connected and operational?
    async fn health_check(&self) -> std::result::Result<bool, ChannelError> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::FactValue;

    fn guild_event() -> ChannelEvent {
        ChannelEvent::new(ChannelId("discord".into()), "42", "hello there", "900")
            .with_sender_name("alice")
            .with_sender_fullname("Alice Liddell")
            .with_guild("7", "wonderland")
            .with_channel_name("general")
    }

    #[test]
    fn event_flattens_to_facts_in_a_stable_order() {
        let ctx = guild_event().to_context();
        let keys: Vec<&str> = ctx.facts.iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec![
                "guild_id",
                "channel_id",
                "thread_id",
                "author_id",
                "server_name",
                "channel_name",
                "thread_name",
                "author_name",
                "author_fullname",
                "message",
            ]
        );
        assert_eq!(ctx.message(), Some("hello there"));
    }

    #[test]
    fn absent_fields_become_null_facts() {
        let ctx = ChannelEvent::new(ChannelId("cli".into()), "local", "hi", "stdin").to_context();
        assert_eq!(ctx.facts.get("guild_id"), Some(&FactValue::Null));
        assert_eq!(ctx.facts.get("thread_name"), Some(&FactValue::Null));
        assert_eq!(
            ctx.facts.get("author_id"),
            Some(&FactValue::Text("local".into()))
        );
    }

    #[test]
    fn thread_fields_carry_through() {
        let ctx = guild_event().with_thread("55", "homework").to_context();
        assert_eq!(
            ctx.facts.get("thread_name"),
            Some(&FactValue::Text("homework".into()))
        );
        assert_eq!(
            ctx.facts.get("thread_id"),
            Some(&FactValue::Text("55".into()))
        );
    }
}
