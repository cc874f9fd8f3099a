use crate::error::{DnaError, Result};
use std::collections::BTreeMap;
use std::fmt;

/// The deduplicated declarations of one selector within one scope.
///
/// Properties are kept sorted by name, so rendering and the fingerprint do not
/// depend on the order declarations were added in.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    selector: String,
    /// Empty for top-level rules, otherwise e.g. "media print".
    scope: String,
    properties: BTreeMap<String, String>,
    fingerprint: String,
}

impl RuleSet {
    pub fn new(selector: impl Into<String>, scope: impl Into<String>) -> Self {
        RuleSet {
            selector: selector.into(),
            scope: scope.into(),
            properties: BTreeMap::new(),
            fingerprint: String::new(),
        }
    }

    pub fn selector(&self) -> &str {
        &self.selector
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Sets `name` to `value`, replacing any earlier value (last write wins).
    pub fn add_property(&mut self, name: &str, value: &str) -> Result<()> {
        if name.is_empty() {
            return Err(DnaError::invalid("property"));
        }
        if value.is_empty() {
            return Err(DnaError::invalid("value"));
        }

        if self.properties.get(name).map(String::as_str) == Some(value) {
            return Ok(());
        }
        self.properties.insert(name.to_string(), value.to_string());
        self.regenerate_fingerprint();
        Ok(())
    }

    pub fn get_property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    /// `prop:value|` for every property, in property-name order.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn properties(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Owned (property, value) pairs, ready to replay through `add_rule_set`.
    pub fn declarations(&self) -> Vec<(String, String)> {
        self.properties
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }

    /// Tab-indented `prop: value;` lines joined by newlines.
    pub fn body(&self) -> String {
        self.properties
            .iter()
            .map(|(name, value)| format!("\t{}: {};", name, value))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn render(&self) -> String {
        if self.properties.is_empty() {
            return String::new();
        }
        format!("{} {{\n{}\n}}", self.selector, self.body())
    }

    fn regenerate_fingerprint(&mut self) {
        let mut fingerprint = String::new();
        for (name, value) in &self.properties {
            fingerprint.push_str(name);
            fingerprint.push(':');
            fingerprint.push_str(value);
            fingerprint.push('|');
        }
        self.fingerprint = fingerprint;
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
