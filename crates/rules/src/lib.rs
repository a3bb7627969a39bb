//! Rule tables — deterministic condition/action matching for Strix.
//!
//! A rule (a `Plan`) says "when these facts hold, respond like this".
//! Plans load from CSV tables or are built in code, collect into an
//! ordered `PlanSet`, and a pure matcher picks the most specific match
//! for a given fact record:
//!
//! - `topic = math` answers any math question
//! - `topic = math, level = 101` outranks it for the intro course
//! - `message = _` is the catch-all that keeps a bot from going silent
//!
//! # Architecture
//!
//! ```text
//! ┌───────────┐    ┌──────────────┐    ┌────────────┐
//! │ CSV table │───▶│   PlanSet    │◀───│ code-built │
//! └───────────┘    └──────┬───────┘    │   plans    │
//!                         │            └────────────┘
//!                    ┌────▼─────┐
//!                    │ evaluate │◀── Facts
//!                    └────┬─────┘
//!                         │
//!                  ┌──────▼───────┐
//!                  │ MatchResult  │
//!                  │ best / all / │
//!                  │    score     │
//!                  └──────────────┘
//! ```
//!
//! Specificity is the count of literal conditions; wildcards (`_`) check
//! presence but add nothing. Ties go to the earlier plan, so table order
//! is the final word in conflicts.

mod loader;
mod matcher;
mod model;

pub use loader::{load_plans, LoadReport, RESPONSE_COLUMN};
pub use matcher::{condition_matches, evaluate, specificity, MatchResult};
pub use model::{action_from_cell, ConditionValue, Plan, PlanSet, ACTION_PREFIX, WILDCARD};

/// Re-export for convenience.
pub type RuleResult<T> = std::result::Result<T, RuleError>;

/// Errors from the rule subsystem.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    #[error("invalid plan: {reason}")]
    InvalidPlan { reason: String },

    #[error("rule table has no 'response' column")]
    MissingResponseColumn,

    #[error("rule file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),
}
