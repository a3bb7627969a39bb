//! `strix doctor` — Diagnose configuration and backend health.

use strix_config::AppConfig;
use strix_core::inference::InferenceClient;
use strix_rules::load_plans;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("Strix Doctor — System Diagnostics");
    println!("=================================\n");

    let mut issues = 0;

    // Config file
    let config_path = AppConfig::config_dir().join("config.toml");
    let config = if config_path.exists() {
        match AppConfig::load() {
            Ok(config) => {
                println!("  ✅ Config file valid");
                config
            }
            Err(e) => {
                println!("  ❌ Config file invalid: {e}");
                println!("     Falling back to defaults for the remaining checks");
                issues += 1;
                AppConfig::default()
            }
        }
    } else {
        println!("  ⚠️  No config file — run `strix init` (using defaults)");
        issues += 1;
        AppConfig::load().unwrap_or_default()
    };

    // Rule table
    match load_plans(&config.rules.file) {
        Ok(report) if report.source_missing => {
            println!(
                "  ⚠️  No rule table at {} — run `strix init`",
                config.rules.file.display()
            );
            issues += 1;
        }
        Ok(report) => {
            if report.skipped > 0 {
                println!(
                    "  ⚠️  Rule table loaded: {} rules, {} rows skipped",
                    report.loaded, report.skipped
                );
                issues += 1;
            } else {
                println!("  ✅ Rule table loaded: {} rules", report.loaded);
            }
        }
        Err(e) => {
            println!("  ❌ Rule table unreadable: {e}");
            issues += 1;
        }
    }

    // Discord token (only needed for `strix serve`)
    if config.discord.token.is_some() {
        println!("  ✅ Discord token configured");
    } else {
        println!("  ⚠️  No Discord token — `strix serve` will not start");
        issues += 1;
    }

    // Inference backend
    let client = super::inference_client(&config);
    match client.health_check().await {
        Ok(true) => {
            println!("  ✅ Ollama reachable at {}", config.ollama.base_url);

            match client.list_models().await {
                Ok(models) if models.iter().any(|m| m == &config.model) => {
                    println!("  ✅ Model available: {}", config.model);
                }
                Ok(_) => {
                    println!(
                        "  ⚠️  Model not pulled: run `ollama pull {}`",
                        config.model
                    );
                    issues += 1;
                }
                Err(e) => {
                    println!("  ⚠️  Could not list models: {e}");
                    issues += 1;
                }
            }
        }
        Ok(false) | Err(_) => {
            println!(
                "  ❌ Ollama unreachable at {} — is `ollama serve` running?",
                config.ollama.base_url
            );
            issues += 1;
        }
    }

    // Summary
    println!();
    if issues == 0 {
        println!("  All checks passed!");
    } else {
        println!("  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}
