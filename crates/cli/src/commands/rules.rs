//! `strix rules` — Load a rule table and show what the engine would see.

use std::path::PathBuf;

use strix_config::AppConfig;
use strix_core::PlanAction;
use strix_rules::{load_plans, specificity, ConditionValue};

pub async fn run(file: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let path = match file {
        Some(path) => path,
        None => {
            let config =
                AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
            config.rules.file
        }
    };

    let report = load_plans(&path).map_err(|e| format!("Failed to load rules: {e}"))?;
    println!("{}", report.announcement(&path.display().to_string()));

    if report.source_missing {
        println!("  (create it with `strix init`, or point --rules somewhere else)");
        return Ok(());
    }

    println!();
    for (index, plan) in report.set.iter().enumerate() {
        let conditions: Vec<String> = plan
            .condition
            .iter()
            .map(|(key, value)| match value {
                ConditionValue::Literal(text) => format!("{key}={text}"),
                ConditionValue::Any => format!("{key}=_"),
            })
            .collect();
        let action = match &plan.action {
            PlanAction::Reply(text) => format!("reply: {text}"),
            PlanAction::Invoke(name) => format!("invoke: @{name}"),
        };
        println!(
            "  {:>3}. [{}] {:40} -> {}",
            index + 1,
            specificity(plan),
            conditions.join(", "),
            action
        );
    }

    if report.skipped > 0 {
        println!();
        println!("  {} row(s) skipped — run with -v for details", report.skipped);
    }

    Ok(())
}
