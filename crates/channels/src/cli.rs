//! CLI channel — interactive terminal chat.
//!
//! The simplest transport: stdin lines become events, responses print to
//! stdout. Used by `strix chat` interactive mode.

use async_trait::async_trait;
use strix_core::channel::{Channel, ChannelEvent, ChannelId};
use strix_core::error::ChannelError;
use tokio::io::{self, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

/// Words that end the interactive session.
const EXIT_WORDS: [&str; 5] = ["exit", "quit", "/exit", "/quit", ":q"];

/// Interactive CLI channel for terminal chat.
pub struct CliChannel {
    id: ChannelId,
}

impl CliChannel {
    pub fn new() -> Self {
        Self {
            id: ChannelId("cli".into()),
        }
    }

    fn is_exit_word(line: &str) -> bool {
        EXIT_WORDS.contains(&line)
    }
}

impl Default for CliChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Channel for CliChannel {
    fn name(&self) -> &str {
        "cli"
    }

    fn id(&self) -> &ChannelId {
        &self.id
    }

    async fn start(
        &self,
    ) -> Result<mpsc::Receiver<Result<ChannelEvent, ChannelError>>, ChannelError> {
        let (tx, rx) = mpsc::channel(32);
        let channel_id = self.id.clone();

        tokio::spawn(async move {
            let stdin = io::stdin();
            let reader = BufReader::new(stdin);
            let mut lines = reader.lines();

            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        let line = line.trim().to_string();
                        if line.is_empty() {
                            continue;
                        }
                        if CliChannel::is_exit_word(&line) {
                            break;
                        }

                        let event =
                            ChannelEvent::new(channel_id.clone(), "local_user", line, "cli-session")
                                .with_sender_name("you");

                        if tx.send(Ok(event)).await.is_err() {
                            break;
                        }
                    }
                    // EOF (Ctrl+D)
                    Ok(None) => break,
                    Err(e) => {
                        let _ = tx
                            .send(Err(ChannelError::ConnectionLost(e.to_string())))
                            .await;
                        break;
                    }
                }
            }
        });

        Ok(rx)
    }

    async fn send(
        &self,
        _chat_id: &str,
        content: &str,
        _reply_to: Option<&str>,
    ) -> Result<(), ChannelError> {
        println!("{content}");
        Ok(())
    }

    // Local user, always trusted.
    fn is_allowed(&self, _sender_id: &str) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_channel_properties() {
        let ch = CliChannel::new();
        assert_eq!(ch.name(), "cli");
        assert_eq!(ch.id().0, "cli");
        assert!(ch.is_allowed("anyone"));
    }

    #[test]
    fn exit_words_cover_common_conventions() {
        for word in ["exit", "quit", "/exit", "/quit", ":q"] {
            assert!(CliChannel::is_exit_word(word), "{word} should exit");
        }
        assert!(!CliChannel::is_exit_word("exit now"));
        assert!(!CliChannel::is_exit_word("hello"));
    }
}
