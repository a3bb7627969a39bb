//! Pumps one channel's event stream through the brain.

use std::sync::Arc;

use strix_core::channel::{Channel, ChannelEvent};
use strix_core::Result;
use tracing::{debug, info, warn};

use crate::brain::Brain;

/// Owns one channel/brain pairing and drives it to completion.
///
/// One service per channel; the brain may be shared across services.
pub struct ChannelService {
    channel: Arc<dyn Channel>,
    brain: Arc<Brain>,
}

impl ChannelService {
    pub fn new(channel: Arc<dyn Channel>, brain: Arc<Brain>) -> Self {
        Self { channel, brain }
    }

    /// Receive events until the channel's stream closes.
    ///
    /// Stream-level errors are logged and skipped; a broken event never
    /// takes the loop down. Returns once the channel stops producing.
    pub async fn run(&self) -> Result<()> {
        let mut events = self.channel.start().await?;
        info!(channel = %self.channel.name(), "channel started");

        while let Some(event) = events.recv().await {
            match event {
                Ok(event) => self.handle(event).await,
                Err(e) => {
                    warn!(channel = %self.channel.name(), error = %e, "channel stream error");
                }
            }
        }

        info!(channel = %self.channel.name(), "channel stream closed");
        Ok(())
    }

    async fn handle(&self, event: ChannelEvent) {
        if !self.channel.is_allowed(&event.sender_id) {
            debug!(
                channel = %self.channel.name(),
                sender = %event.sender_id,
                "sender not allowed, ignoring"
            );
            return;
        }

        let mut context = event.to_context();
        self.brain.process(&mut context).await;

        // process() always sets a response; stay total anyway.
        let Some(response) = context.response else {
            return;
        };

        if let Err(e) = self.channel.send(&event.chat_id, &response, None).await {
            warn!(
                channel = %self.channel.name(),
                chat = %event.chat_id,
                error = %e,
                "failed to deliver response"
            );
        }
    }
}
