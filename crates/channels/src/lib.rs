//! Channel adapters for Strix.
//!
//! Each adapter implements the `strix_core::channel::Channel` trait for
//! one transport. The adapters own every platform quirk (mention syntax,
//! DM naming, allowlists); the engine behind them sees only fact
//! contexts and response strings.
//!
//! Available channels:
//! - **CLI** — interactive terminal chat (stdin/stdout)
//! - **Discord** — Discord Bot API (stub, needs serenity in production)

pub mod cli;
pub mod discord;

pub use cli::CliChannel;
pub use discord::{DiscordChannel, DiscordConfig, DM_SENTINEL};
