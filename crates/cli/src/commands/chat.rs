//! `strix chat` — Interactive or single-message chat mode.

use std::path::PathBuf;
use std::sync::Arc;

use strix_channels::CliChannel;
use strix_config::AppConfig;
use strix_core::channel::Channel;

pub async fn run(
    message: Option<String>,
    rules: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    let brain = Arc::new(super::build_brain(&config));
    let rules_path = rules.unwrap_or_else(|| config.rules.file.clone());
    let announcement = brain
        .reload_rules(&rules_path)
        .await
        .map_err(|e| format!("Failed to load rules: {e}"))?;

    if let Some(msg) = message {
        // Single message mode
        let mut ctx = strix_core::ChatContext::from_message(&msg);
        brain.process(&mut ctx).await;
        println!("{}", ctx.response.unwrap_or_default());
        return Ok(());
    }

    // Interactive mode
    println!();
    println!("  ╔══════════════════════════════════════════════╗");
    println!("  ║          Strix — Interactive Mode            ║");
    println!("  ╚══════════════════════════════════════════════╝");
    println!();
    println!("  Model:     {}", config.model);
    println!("  Backend:   {}", config.ollama.base_url);
    println!("  Rules:     {} plans loaded", brain.plan_count().await);
    println!("  ({announcement})");
    println!();
    println!("  Triggers: summarize | flashcards | quiz — anything else hits the rules.");
    println!("  Type 'exit' or Ctrl+C to quit.");
    println!();

    let channel = CliChannel::new();
    let mut events = channel
        .start()
        .await
        .map_err(|e| format!("Channel error: {e}"))?;

    print!("  You > ");
    use std::io::Write;
    std::io::stdout().flush()?;

    while let Some(result) = events.recv().await {
        match result {
            Ok(event) => {
                let mut ctx = event.to_context();
                brain.process(&mut ctx).await;

                if let Some(response) = ctx.response {
                    println!();
                    for line in response.lines() {
                        println!("  Strix > {line}");
                    }
                    println!();
                }

                print!("  You > ");
                std::io::stdout().flush()?;
            }
            Err(e) => {
                eprintln!("  [Channel Error] {e}");
                break;
            }
        }
    }

    println!();
    println!("  Goodbye!");
    println!();

    Ok(())
}
