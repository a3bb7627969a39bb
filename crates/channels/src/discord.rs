//! Discord channel adapter (stub).
//!
//! Implements the Channel trait for Discord. In production this would
//! run a `serenity` gateway connection; currently a stub with in-process
//! event injection for testing. The parts the engine depends on are
//! live: mention stripping, the promiscuity gate, and `#dm` naming for
//! direct messages, so gateway wiring only has to feed platform
//! messages through the helpers here.

use async_trait::async_trait;
use regex_lite::Regex;
use strix_core::channel::{Channel, ChannelEvent, ChannelId};
use strix_core::error::ChannelError;
use tokio::sync::mpsc;
use tracing::info;

/// Server and channel name used for direct messages, which have neither.
pub const DM_SENTINEL: &str = "#dm";

/// Discord channel configuration.
#[derive(Clone)]
pub struct DiscordConfig {
    /// Bot token from the Discord Developer Portal.
    pub token: String,
    /// Allowed user IDs. Empty = deny all, ["*"] = allow all.
    pub allowed_users: Vec<String>,
    /// Process every guild message, not only mentions and DMs.
    pub promiscuous: bool,
}

impl std::fmt::Debug for DiscordConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscordConfig")
            .field("token", &"[REDACTED]")
            .field("allowed_users", &self.allowed_users)
            .field("promiscuous", &self.promiscuous)
            .finish()
    }
}

/// Discord channel adapter.
pub struct DiscordChannel {
    config: DiscordConfig,
    channel_id: ChannelId,
    mention: Regex,
    inject_tx: tokio::sync::Mutex<Option<mpsc::Sender<Result<ChannelEvent, ChannelError>>>>,
}

impl DiscordChannel {
    pub fn new(config: DiscordConfig) -> Self {
        Self {
            config,
            channel_id: ChannelId("discord".into()),
            mention: Regex::new(r"<@\d+>").expect("mention pattern is valid"),
            inject_tx: tokio::sync::Mutex::new(None),
        }
    }

    /// Remove `<@id>` mention tokens and trim the remainder.
    ///
    /// Runs before an event is built, so the engine never sees the
    /// addressing syntax that summoned the bot.
    pub fn strip_mentions(&self, content: &str) -> String {
        self.mention.replace_all(content, "").trim().to_string()
    }

    /// Whether a message should be processed at all.
    ///
    /// Guild traffic requires a mention unless the channel runs
    /// promiscuous; direct messages always pass.
    pub fn accepts(&self, mentioned: bool, is_dm: bool) -> bool {
        self.config.promiscuous || mentioned || is_dm
    }

    /// Build the event for a guild message, mention-stripped.
    pub fn guild_event(&self, sender_id: &str, content: &str, chat_id: &str) -> ChannelEvent {
        ChannelEvent::new(
            self.channel_id.clone(),
            sender_id,
            self.strip_mentions(content),
            chat_id,
        )
    }

    /// Build the event for a direct message. DMs have no guild or named
    /// channel, so both names carry the `#dm` sentinel and the guild id
    /// stays absent.
    pub fn dm_event(&self, sender_id: &str, content: &str, chat_id: &str) -> ChannelEvent {
        let mut event = self.guild_event(sender_id, content, chat_id);
        event.server_name = Some(DM_SENTINEL.into());
        event.channel_name = Some(DM_SENTINEL.into());
        event
    }

    /// Inject an event as if it came from the gateway (for testing).
    pub async fn inject_event(&self, event: ChannelEvent) -> Result<(), ChannelError> {
        let guard = self.inject_tx.lock().await;
        if let Some(tx) = guard.as_ref() {
            tx.send(Ok(event))
                .await
                .map_err(|_| ChannelError::ConnectionLost("event stream closed".into()))
        } else {
            Err(ChannelError::ConnectionLost("channel not started".into()))
        }
    }
}

#[async_trait]
impl Channel for DiscordChannel {
    fn name(&self) -> &str {
        "discord"
    }

    fn id(&self) -> &ChannelId {
        &self.channel_id
    }

    async fn start(
        &self,
    ) -> Result<mpsc::Receiver<Result<ChannelEvent, ChannelError>>, ChannelError> {
        info!("Discord channel starting (stub mode)");
        let (tx, rx) = mpsc::channel(64);
        *self.inject_tx.lock().await = Some(tx);
        Ok(rx)
    }

    async fn send(
        &self,
        chat_id: &str,
        content: &str,
        reply_to: Option<&str>,
    ) -> Result<(), ChannelError> {
        info!(
            chat_id = %chat_id,
            reply_to = ?reply_to,
            content_len = content.len(),
            "Discord send (stub)"
        );
        Ok(())
    }

    fn is_allowed(&self, sender_id: &str) -> bool {
        if self.config.allowed_users.is_empty() {
            return false;
        }
        if self.config.allowed_users.iter().any(|u| u == "*") {
            return true;
        }
        self.config.allowed_users.iter().any(|u| u == sender_id)
    }

    async fn stop(&self) -> Result<(), ChannelError> {
        info!("Discord channel stopping");
        *self.inject_tx.lock().await = None;
        Ok(())
    }

    async fn health_check(&self) -> Result<bool, ChannelError> {
        Ok(!self.config.token.is_empty())
    }
}
