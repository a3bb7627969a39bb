//! Rule table loading.
//!
//! Rule tables are CSV with a header row: every column names a condition
//! key except the reserved `response` column, which holds the action.
//! `#` lines are comments, blank lines and empty cells are skipped, and a
//! `_` cell is a wildcard.
//!
//! ```csv
//! topic,level,response
//! math,,algebra help
//! math,101,advanced algebra help
//! grades,_,@lookup_grade
//! ```

use std::path::Path;

use csv::{ReaderBuilder, Trim};
use tracing::{debug, warn};

use crate::model::{action_from_cell, ConditionValue, Plan, PlanSet};
use crate::RuleError;

/// Reserved header naming the action column, matched case-insensitively.
pub const RESPONSE_COLUMN: &str = "response";

/// Outcome of loading one rule table.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    /// The plans that made it in, in file order.
    pub set: PlanSet,
    /// Rows that became plans.
    pub loaded: usize,
    /// Rows dropped for having no conditions or no action.
    pub skipped: usize,
    /// The file was absent. Absence is not an error; bots may start
    /// before their rule tables exist.
    pub source_missing: bool,
}

impl LoadReport {
    /// One-line human summary, announced at startup.
    pub fn announcement(&self, source: &str) -> String {
        if self.source_missing {
            format!("no rule file at {source}, starting with 0 rules")
        } else {
            format!("loaded {} rules from {source}", self.loaded)
        }
    }
}

/// Load a rule table from disk.
///
/// Rows are tolerated generously: short rows pair up with as many headers
/// as they have cells, degenerate rows are skipped with a warning. Only
/// file-level problems (unreadable file, no `response` column, malformed
/// CSV framing) are errors.
pub fn load_plans(path: impl AsRef<Path>) -> Result<LoadReport, RuleError> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(LoadReport {
            source_missing: true,
            ..Default::default()
        });
    }

    let mut reader = ReaderBuilder::new()
        .comment(Some(b'#'))
        .trim(Trim::All)
        .flexible(true)
        .from_path(path)?;

    let headers = reader.headers()?.clone();
    let response_index = headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(RESPONSE_COLUMN))
        .ok_or(RuleError::MissingResponseColumn)?;

    let mut report = LoadReport::default();
    for (row, record) in reader.records().enumerate() {
        let record = record?;

        let condition: Vec<(String, ConditionValue)> = headers
            .iter()
            .zip(record.iter())
            .enumerate()
            .filter(|(i, (key, value))| {
                *i != response_index && !key.is_empty() && !value.is_empty()
            })
            .map(|(_, (key, value))| (key.to_string(), ConditionValue::from(value)))
            .collect();

        let action_cell = record.get(response_index).unwrap_or_default();
        if condition.is_empty() || action_cell.is_empty() {
            warn!(row = row + 1, "rule row has no conditions or no action, skipping");
            report.skipped += 1;
            continue;
        }

        let plan = Plan {
            condition,
            action: action_from_cell(action_cell),
        };
        match plan.validate() {
            Ok(()) => {
                report.set.add(plan);
                report.loaded += 1;
            }
            Err(reason) => {
                warn!(row = row + 1, %reason, "invalid rule row, skipping");
                report.skipped += 1;
            }
        }
    }

    debug!(
        loaded = report.loaded,
        skipped = report.skipped,
        path = %path.display(),
        "rule table loaded"
    );
    Ok(report)
}
