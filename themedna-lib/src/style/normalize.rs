use crate::error::{DnaError, Result};
use crate::style::ast::{Node, RuleNode};
use crate::style::stylesheet::Stylesheet;
use log::{debug, warn};

/// Splits a selector list such as `"p, foo.bar"` into trimmed selectors.
///
/// Fails on an empty or whitespace-only list.
pub fn get_all_selectors(selector: &str) -> Result<Vec<String>> {
    if selector.trim().is_empty() {
        return Err(DnaError::invalid("selector"));
    }
    Ok(selector.split(',').map(|part| part.trim().to_string()).collect())
}

/// Flattens an AST forest into a fresh stylesheet.
pub fn normalize(nodes: &[Node]) -> Result<Stylesheet> {
    let mut stylesheet = Stylesheet::new();
    normalize_into(&mut stylesheet, nodes)?;
    Ok(stylesheet)
}

/// Folds every rule of `nodes` into `stylesheet`.
pub fn normalize_into(stylesheet: &mut Stylesheet, nodes: &[Node]) -> Result<()> {
    for node in nodes {
        flatten(stylesheet, node, "")?;
    }
    Ok(())
}

// Only the innermost at-rule is kept as the scope; outer conditions are dropped.
fn flatten(stylesheet: &mut Stylesheet, node: &Node, scope: &str) -> Result<()> {
    match node {
        Node::Rule(rule) => add_rule(stylesheet, rule, scope),
        Node::AtRule(at_rule) => {
            let inner_scope = at_rule.scope();
            for child in &at_rule.children {
                flatten(stylesheet, child, &inner_scope)?;
            }
            Ok(())
        }
        Node::Declaration(decl) => {
            debug!("ignoring declaration {} outside of a rule", decl.prop);
            Ok(())
        }
    }
}

fn add_rule(stylesheet: &mut Stylesheet, rule: &RuleNode, scope: &str) -> Result<()> {
    let declarations: Vec<(&str, &str)> = rule
        .declarations()
        .map(|decl| (decl.prop.as_str(), decl.value.as_str()))
        .collect();

    for selector in get_all_selectors(&rule.selector)? {
        if selector.is_empty() {
            warn!("skipping empty selector in list {:?}", rule.selector);
            continue;
        }
        stylesheet.add_rule_set(&selector, scope, &declarations)?;
    }
    Ok(())
}
