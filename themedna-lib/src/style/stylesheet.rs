use crate::error::Result;
use crate::style::rule_set::RuleSet;
use crate::style::serialize;
use indexmap::IndexMap;
use log::debug;
use std::fmt;

/// Identity of a rule set inside a stylesheet.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RuleKey {
    pub scope: String,
    pub selector: String,
}

impl RuleKey {
    pub fn new(scope: impl Into<String>, selector: impl Into<String>) -> Self {
        RuleKey {
            scope: scope.into(),
            selector: selector.into(),
        }
    }
}

/// A normalized stylesheet: one rule set per (scope, selector), kept in
/// first-insertion order so serialization is deterministic.
#[derive(Debug, Clone, Default)]
pub struct Stylesheet {
    entries: IndexMap<RuleKey, RuleSet>,
}

impl Stylesheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies `declarations` in order to the rule set for (scope, selector),
    /// creating it on first use. Later declarations of a property win.
    ///
    /// All declarations are checked before anything is inserted, so a failing
    /// call leaves the stylesheet untouched.
    pub fn add_rule_set<P, V>(
        &mut self,
        selector: &str,
        scope: &str,
        declarations: &[(P, V)],
    ) -> Result<()>
    where
        P: AsRef<str>,
        V: AsRef<str>,
    {
        let key = RuleKey::new(scope, selector);
        let mut rule_set = self
            .entries
            .get(&key)
            .cloned()
            .unwrap_or_else(|| RuleSet::new(selector, scope));

        for (prop, value) in declarations {
            rule_set.add_property(prop.as_ref(), value.as_ref())?;
        }

        self.entries.insert(key, rule_set);
        Ok(())
    }

    pub fn get(&self, scope: &str, selector: &str) -> Option<&RuleSet> {
        self.entries.get(&RuleKey::new(scope, selector))
    }

    pub fn iter(&self) -> impl Iterator<Item = &RuleSet> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Union of both stylesheets; on conflicting properties `other` wins.
    pub fn merge(&self, other: &Stylesheet) -> Stylesheet {
        let mut merged = Stylesheet::new();
        for rule_set in self.iter().chain(other.iter()) {
            merged.copy_rule_set(rule_set, &rule_set.declarations());
        }
        debug!(
            "merged {} + {} rule sets into {}",
            self.len(),
            other.len(),
            merged.len()
        );
        merged
    }

    /// What `other` adds or changes relative to `self`.
    ///
    /// Selectors unknown to `self` are copied whole; shared selectors keep only
    /// the properties whose value differs. Selectors only in `self` are dropped.
    pub fn difference(&self, other: &Stylesheet) -> Stylesheet {
        let mut diff = Stylesheet::new();

        for (key, other_set) in &other.entries {
            match self.entries.get(key) {
                None if other_set.is_empty() => {}
                None => diff.copy_rule_set(other_set, &other_set.declarations()),
                Some(base_set) => {
                    let changed: Vec<(String, String)> = other_set
                        .properties()
                        .filter(|(name, value)| base_set.get_property(name) != Some(*value))
                        .map(|(name, value)| (name.to_string(), value.to_string()))
                        .collect();

                    if !changed.is_empty() {
                        diff.copy_rule_set(other_set, &changed);
                    }
                }
            }
        }

        debug!(
            "difference kept {} of {} rule sets",
            diff.len(),
            other.len()
        );
        diff
    }

    /// True when both hold the same keys with content-equal rule sets.
    pub fn content_eq(&self, other: &Stylesheet) -> bool {
        self.len() == other.len()
            && self.entries.iter().all(|(key, rule_set)| {
                other
                    .entries
                    .get(key)
                    .is_some_and(|theirs| theirs.fingerprint() == rule_set.fingerprint())
            })
    }

    pub fn to_canonical_text(&self) -> String {
        serialize::canonical_text(self)
    }

    // Declarations taken from an existing rule set are already validated.
    fn copy_rule_set(&mut self, source: &RuleSet, declarations: &[(String, String)]) {
        let key = RuleKey::new(source.scope(), source.selector());
        let target = self
            .entries
            .entry(key)
            .or_insert_with(|| RuleSet::new(source.selector(), source.scope()));
        for (prop, value) in declarations {
            let result = target.add_property(prop, value);
            debug_assert!(result.is_ok(), "invalid declaration {}: {:?}", prop, result);
        }
    }
}

impl fmt::Display for Stylesheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_canonical_text())
    }
}
