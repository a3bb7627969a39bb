//! Plan matching and scoring.
//!
//! A pure pass over the plan set: no I/O, no mutation, same inputs same
//! output. No-match is a normal outcome here, never an error.

use strix_core::facts::{FactValue, Facts};
use strix_core::PlanAction;

use crate::model::{ConditionValue, Plan, PlanSet};

/// Outcome of one match pass over a plan set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchResult {
    /// Action of the most specific match; ties go to the earliest plan.
    pub best: Option<PlanAction>,
    /// Actions of every matching plan, in set order.
    pub all: Vec<PlanAction>,
    /// Specificity of the winner. 0 when nothing matched, and 0 when only
    /// wildcard conditions matched; `all.is_empty()` tells the two apart.
    pub score: u32,
}

/// Does one required condition accept the fact it points at?
///
/// Wildcards accept any present, non-null value. Literals compare
/// case-insensitively against the fact's canonical text, so the number
/// `101` and the string `"101"` satisfy the same literal.
pub fn condition_matches(required: &ConditionValue, fact: Option<&FactValue>) -> bool {
    let Some(value) = fact else {
        return false;
    };
    match required {
        ConditionValue::Any => !value.is_null(),
        ConditionValue::Literal(expected) => match value.canonical() {
            Some(text) => text.to_lowercase() == expected.to_lowercase(),
            None => false,
        },
    }
}

/// Count of literal requirements. Wildcards check presence but claim no
/// specificity, so a catch-all scores 0 even when it matches.
pub fn specificity(plan: &Plan) -> u32 {
    plan.condition
        .iter()
        .filter(|(_, v)| matches!(v, ConditionValue::Literal(_)))
        .count() as u32
}

fn plan_matches(facts: &Facts, plan: &Plan) -> bool {
    plan.condition
        .iter()
        .all(|(key, required)| condition_matches(required, facts.get(key)))
}

/// Evaluate every plan against the facts, in set order.
///
/// An empty condition list matches vacuously with specificity 0; plans
/// are expected to be validated before they get here.
pub fn evaluate(facts: &Facts, plans: &PlanSet) -> MatchResult {
    let mut all = Vec::new();
    let mut best: Option<&PlanAction> = None;
    let mut best_score = 0u32;

    for plan in plans.iter() {
        if !plan_matches(facts, plan) {
            continue;
        }
        let score = specificity(plan);
        // Strictly greater, so the earliest plan keeps ties.
        if best.is_none() || score > best_score {
            best = Some(&plan.action);
            best_score = score;
        }
        all.push(plan.action.clone());
    }

    MatchResult {
        best: best.cloned(),
        all,
        score: best_score,
    }
}
