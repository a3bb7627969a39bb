//! `strix serve` — Connect the Discord channel and process messages.

use std::sync::Arc;

use strix_brain::ChannelService;
use strix_channels::{DiscordChannel, DiscordConfig};
use strix_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    // Fail early with a clear message when no token is configured.
    let Some(token) = config.discord.token.clone() else {
        eprintln!();
        eprintln!("  ERROR: No Discord token configured!");
        eprintln!();
        eprintln!("  Set one of these environment variables:");
        eprintln!("    STRIX_DISCORD_TOKEN");
        eprintln!("    DISCORD_TOKEN");
        eprintln!();
        eprintln!("  Or add it to your config file:");
        eprintln!("    {}", AppConfig::config_dir().join("config.toml").display());
        eprintln!();
        return Err("No Discord token found. See above for setup instructions.".into());
    };

    let brain = Arc::new(super::build_brain(&config));
    let announcement = brain
        .reload_rules(&config.rules.file)
        .await
        .map_err(|e| format!("Failed to load rules: {e}"))?;

    println!("Strix serving on Discord");
    println!("  Model:   {}", config.model);
    println!("  Backend: {}", config.ollama.base_url);
    println!("  {announcement}");

    let channel = Arc::new(DiscordChannel::new(DiscordConfig {
        token,
        allowed_users: config.discord.allowed_users.clone(),
        promiscuous: config.discord.promiscuous,
    }));

    let service = ChannelService::new(channel, brain);
    service.run().await?;

    Ok(())
}
