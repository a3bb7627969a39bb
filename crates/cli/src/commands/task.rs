//! `strix task` — Run one generative task directly.
//!
//! Bypasses trigger detection, so the kind argument is validated the hard
//! way: an unknown kind is an invalid-argument error, not a silent
//! fallthrough to rule matching.

use strix_brain::prompts;
use strix_config::AppConfig;
use strix_core::inference::InferenceClient;
use strix_core::task::TaskKind;
use strix_core::GenerateRequest;

pub async fn run(kind: &str, input: &str) -> Result<(), Box<dyn std::error::Error>> {
    let kind: TaskKind = kind.parse().map_err(|e| format!("{e}"))?;

    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let client = super::inference_client(&config);

    let request = GenerateRequest::new(
        &config.model,
        prompts::build_prompt(kind, input),
        config.tasks.for_kind(kind),
    );

    eprint!("  Generating {kind}...");
    let generation = client
        .generate(request)
        .await
        .map_err(|e| format!("Error: {e}"))?;
    eprint!("\r                             \r");

    println!("{}", generation.text);
    eprintln!();
    eprintln!(
        "  ({} on {} in {:.2}s)",
        kind,
        generation.model,
        generation.elapsed.as_secs_f64()
    );

    Ok(())
}
