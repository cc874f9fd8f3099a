// A fully-owned CSS tree: what the normalizer consumes, independent of the parser's lifetimes.
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Rule(RuleNode),
    AtRule(AtRuleNode),
    Declaration(Declaration),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleNode {
    /// Raw selector list, e.g. ".a, div.b:first-child"
    pub selector: String,
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtRuleNode {
    /// e.g. "media", "supports"
    pub name: String,
    /// e.g. "(max-width: 600px)"
    pub params: String,
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub prop: String,
    pub value: String,
}

impl Node {
    /// Discriminator matching the node kinds of a postcss-style tree.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Rule(_) => "rule",
            Node::AtRule(_) => "at-rule",
            Node::Declaration(_) => "declaration",
        }
    }

    pub fn rule(selector: impl Into<String>, declarations: &[(&str, &str)]) -> Self {
        Node::Rule(RuleNode {
            selector: selector.into(),
            children: declarations
                .iter()
                .map(|(prop, value)| Node::Declaration(Declaration::new(*prop, *value)))
                .collect(),
        })
    }

    pub fn at_rule(name: impl Into<String>, params: impl Into<String>, children: Vec<Node>) -> Self {
        Node::AtRule(AtRuleNode {
            name: name.into(),
            params: params.into(),
            children,
        })
    }
}

impl RuleNode {
    /// Declaration children in source order; nested rules are not included.
    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.children.iter().filter_map(|child| match child {
            Node::Declaration(decl) => Some(decl),
            _ => None,
        })
    }
}

impl AtRuleNode {
    /// Scope identifier for rules directly inside this at-rule.
    pub fn scope(&self) -> String {
        if self.params.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.name, self.params)
        }
    }
}

impl Declaration {
    pub fn new(prop: impl Into<String>, value: impl Into<String>) -> Self {
        Declaration {
            prop: prop.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Rule(rule) => {
                writeln!(f, "{} {{", rule.selector)?;
                for child in &rule.children {
                    write!(f, "{}", child)?;
                }
                writeln!(f, "}}")
            }
            Node::AtRule(at_rule) => {
                writeln!(f, "@{} {{", at_rule.scope())?;
                for child in &at_rule.children {
                    write!(f, "{}", child)?;
                }
                writeln!(f, "}}")
            }
            Node::Declaration(decl) => writeln!(f, "  {}: {};", decl.prop, decl.value),
        }
    }
}
