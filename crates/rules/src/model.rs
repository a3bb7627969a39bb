//! Plan data model — the types a rule table parses into.

use serde::{Deserialize, Serialize};
use strix_core::PlanAction;

/// Sentinel written in rule tables for "any present value".
pub const WILDCARD: &str = "_";

/// Prefix marking an action-reference cell in a rule table.
pub const ACTION_PREFIX: char = '@';

/// What one condition key requires of the fact it points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ConditionValue {
    /// Fact's canonical text must equal this, case-insensitively.
    Literal(String),
    /// Fact must be present with a non-null value (`_` in tables).
    Any,
}

impl From<String> for ConditionValue {
    fn from(s: String) -> Self {
        if s == WILDCARD {
            ConditionValue::Any
        } else {
            ConditionValue::Literal(s)
        }
    }
}

impl From<&str> for ConditionValue {
    fn from(s: &str) -> Self {
        ConditionValue::from(s.to_string())
    }
}

impl From<ConditionValue> for String {
    fn from(v: ConditionValue) -> Self {
        match v {
            ConditionValue::Literal(s) => s,
            ConditionValue::Any => WILDCARD.to_string(),
        }
    }
}

/// Parse a rule-table action cell. A leading `@` marks an action
/// reference; everything else is a verbatim reply.
pub fn action_from_cell(cell: &str) -> PlanAction {
    match cell.strip_prefix(ACTION_PREFIX) {
        Some(name) => PlanAction::Invoke(name.to_string()),
        None => PlanAction::Reply(cell.to_string()),
    }
}

/// One condition/action rule.
///
/// Conditions are ordered key/requirement pairs; all of them must hold
/// for the plan to match. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub condition: Vec<(String, ConditionValue)>,
    pub action: PlanAction,
}

impl Plan {
    pub fn new<K, V, I>(condition: I, action: PlanAction) -> Self
    where
        K: Into<String>,
        V: Into<ConditionValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            condition: condition
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            action,
        }
    }

    /// Validate that the plan is well-formed.
    pub fn validate(&self) -> Result<(), crate::RuleError> {
        if self.condition.is_empty() {
            return Err(crate::RuleError::InvalidPlan {
                reason: "plan has no conditions".into(),
            });
        }
        if self.condition.iter().any(|(k, _)| k.is_empty()) {
            return Err(crate::RuleError::InvalidPlan {
                reason: "condition key cannot be empty".into(),
            });
        }
        let payload = match &self.action {
            PlanAction::Reply(text) => text,
            PlanAction::Invoke(name) => name,
        };
        if payload.is_empty() {
            return Err(crate::RuleError::InvalidPlan {
                reason: "action cannot be empty".into(),
            });
        }
        Ok(())
    }
}

/// An ordered, append-only collection of plans.
///
/// Insertion order doubles as match priority: among equally specific
/// matches the earliest plan wins, so there is no dedup and no conflict
/// check here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanSet {
    #[serde(default)]
    pub plans: Vec<Plan>,
}

impl PlanSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a plan. Never rejects a well-formed plan.
    pub fn add(&mut self, plan: Plan) {
        self.plans.push(plan);
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Plan> {
        self.plans.iter()
    }

    /// Validate all plans in the set.
    pub fn validate(&self) -> Result<(), crate::RuleError> {
        for plan in &self.plans {
            plan.validate()?;
        }
        Ok(())
    }
}

impl Extend<Plan> for PlanSet {
    fn extend<I: IntoIterator<Item = Plan>>(&mut self, iter: I) {
        self.plans.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn condition_value_from_string() {
        assert_eq!(ConditionValue::from("_"), ConditionValue::Any);
        assert_eq!(
            ConditionValue::from("math"),
            ConditionValue::Literal("math".into())
        );
        // Round-trip through the table form.
        assert_eq!(String::from(ConditionValue::Any), "_");
        assert_eq!(String::from(ConditionValue::Literal("math".into())), "math");
    }

    #[test]
    fn action_cell_parsing() {
        assert_eq!(
            action_from_cell("hello there"),
            PlanAction::Reply("hello there".into())
        );
        assert_eq!(
            action_from_cell("@lookup_grade"),
            PlanAction::Invoke("lookup_grade".into())
        );
        // Only a leading @ marks a reference.
        assert_eq!(
            action_from_cell("email me @ noon"),
            PlanAction::Reply("email me @ noon".into())
        );
    }

    #[test]
    fn plan_validation() {
        let ok = Plan::new(
            [("topic", "math")],
            PlanAction::Reply("algebra help".into()),
        );
        assert!(ok.validate().is_ok());

        let no_conditions = Plan {
            condition: vec![],
            action: PlanAction::Reply("hi".into()),
        };
        assert!(no_conditions.validate().is_err());

        let empty_action = Plan::new([("topic", "math")], PlanAction::Reply(String::new()));
        assert!(empty_action.validate().is_err());
    }

    #[test]
    fn set_appends_in_order() {
        let mut set = PlanSet::new();
        assert!(set.is_empty());
        set.add(Plan::new([("a", "1")], PlanAction::Reply("first".into())));
        set.add(Plan::new([("a", "1")], PlanAction::Reply("second".into())));
        assert_eq!(set.len(), 2);
        let actions: Vec<&PlanAction> = set.iter().map(|p| &p.action).collect();
        assert_eq!(actions[0], &PlanAction::Reply("first".into()));
        assert_eq!(actions[1], &PlanAction::Reply("second".into()));
    }

    #[test]
    fn wildcard_survives_serde() {
        let plan = Plan::new(
            [("message", "_"), ("topic", "math")],
            PlanAction::Reply("hi".into()),
        );
        let json = serde_json::to_string(&plan).unwrap();
        let back: Plan = serde_json::from_str(&json).unwrap();
        assert_eq!(back.condition[0].1, ConditionValue::Any);
        assert_eq!(back.condition[1].1, ConditionValue::Literal("math".into()));
    }
}
