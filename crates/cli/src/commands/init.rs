//! `strix init` — First-time setup.

use strix_config::AppConfig;

const STARTER_RULES: &str = "\
# Strix rule table.
# Columns other than 'response' are condition keys; '_' matches any value.
# Prefix a response with '@' to dispatch a named action instead of text.
message,response
hello,Hi! What would you like to study today?
help,\"Try: summarize <text>, flashcards <topic>, or quiz <topic>\"
";

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_dir = AppConfig::config_dir();
    let config_path = config_dir.join("config.toml");

    println!("Strix — First-Time Setup");
    println!("========================\n");

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
        println!("✅ Created config directory: {}", config_dir.display());
    } else {
        println!("  Config directory exists: {}", config_dir.display());
    }

    if !config_path.exists() {
        std::fs::write(&config_path, AppConfig::default_toml())?;
        println!("✅ Created {}", config_path.display());
    } else {
        println!("  Config file exists: {}", config_path.display());
    }

    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let rules_path = &config.rules.file;
    if !rules_path.exists() {
        if let Some(parent) = rules_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(rules_path, STARTER_RULES)?;
        println!("✅ Created starter rule table: {}", rules_path.display());
    } else {
        println!("  Rule table exists: {}", rules_path.display());
    }

    println!();
    println!("Next steps:");
    println!("  1. Make sure Ollama is running: ollama serve");
    println!("  2. Pull the model: ollama pull {}", config.model);
    println!("  3. Talk to the engine: strix chat");
    println!("  4. Check everything: strix doctor");

    Ok(())
}
