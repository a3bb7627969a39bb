//! Fact domain types.
//!
//! A fact is one `key → value` observation about an inbound message:
//! who sent it, where it arrived, what it says. Facts are what rules
//! match against, so their canonical text form is part of the contract.

use serde::{Deserialize, Serialize};

/// A single dynamically-typed fact value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FactValue {
    /// Free text (names, message bodies, transport ids).
    Text(String),
    /// Numeric facts (levels, counts).
    Number(f64),
    /// Present-but-empty. Wildcard conditions do not match this.
    Null,
}

impl FactValue {
    /// Canonical text used for rule comparison. `Null` has none;
    /// integral numbers render without a fractional part.
    pub fn canonical(&self) -> Option<String> {
        match self {
            FactValue::Text(s) => Some(s.clone()),
            FactValue::Number(n) => Some(n.to_string()),
            FactValue::Null => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FactValue::Null)
    }
}

impl From<&str> for FactValue {
    fn from(s: &str) -> Self {
        FactValue::Text(s.to_string())
    }
}

impl From<String> for FactValue {
    fn from(s: String) -> Self {
        FactValue::Text(s)
    }
}

impl From<i64> for FactValue {
    fn from(n: i64) -> Self {
        FactValue::Number(n as f64)
    }
}

impl From<u32> for FactValue {
    fn from(n: u32) -> Self {
        FactValue::Number(n as f64)
    }
}

impl From<f64> for FactValue {
    fn from(n: f64) -> Self {
        FactValue::Number(n)
    }
}

impl<T: Into<FactValue>> From<Option<T>> for FactValue {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => FactValue::Null,
        }
    }
}

/// An insertion-ordered `key → value` record.
///
/// Order matters twice: rule evaluation reports candidates in a stable
/// order, and debugging output reads in the order facts were learned.
/// Replacing a value keeps the key's original position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Facts {
    entries: Vec<(String, FactValue)>,
}

impl Facts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a fact, replacing in place if the key already exists.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<FactValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&FactValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FactValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<FactValue>> FromIterator<(K, V)> for Facts {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut facts = Facts::new();
        for (k, v) in iter {
            facts.set(k, v);
        }
        facts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_get() {
        let mut facts = Facts::new();
        facts.set("message", "hello");
        facts.set("level", 101i64);
        assert_eq!(facts.get("message"), Some(&FactValue::Text("hello".into())));
        assert_eq!(facts.get("level"), Some(&FactValue::Number(101.0)));
        assert!(facts.get("missing").is_none());
    }

    #[test]
    fn replace_keeps_position() {
        let mut facts = Facts::new();
        facts.set("a", "1");
        facts.set("b", "2");
        facts.set("a", "updated");
        let keys: Vec<&str> = facts.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(facts.get("a"), Some(&FactValue::Text("updated".into())));
    }

    #[test]
    fn integral_number_renders_without_fraction() {
        let value = FactValue::Number(101.0);
        assert_eq!(value.canonical().as_deref(), Some("101"));
        let value = FactValue::Number(1.5);
        assert_eq!(value.canonical().as_deref(), Some("1.5"));
    }

    #[test]
    fn null_has_no_canonical_text() {
        let value: FactValue = Option::<String>::None.into();
        assert!(value.is_null());
        assert!(value.canonical().is_none());
    }

    #[test]
    fn from_pairs_preserves_order() {
        let facts: Facts = [("topic", "math"), ("level", "101")].into_iter().collect();
        let keys: Vec<&str> = facts.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["topic", "level"]);
    }
}
