use crate::error::{DnaError, Result};
use crate::parser::CssParser;
use crate::style::ast::{Declaration, Node, RuleNode};
use lightningcss::declaration::DeclarationBlock;
use lightningcss::printer::PrinterOptions;
use lightningcss::rules::{style::StyleRule, CssRule, CssRuleList};
use lightningcss::stylesheet::{ParserOptions, StyleSheet as LightningStyleSheet};
use lightningcss::traits::ToCss;
use log::debug;

/// CSS parser backed by LightningCSS.
#[derive(Debug, Clone, Copy, Default)]
pub struct LightningParser {
    /// Skip invalid rules instead of failing the whole stylesheet.
    pub error_recovery: bool,
}

impl LightningParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lenient() -> Self {
        LightningParser {
            error_recovery: true,
        }
    }
}

impl CssParser for LightningParser {
    fn parse(&self, source: &str) -> Result<Vec<Node>> {
        let parser_opts = ParserOptions {
            error_recovery: self.error_recovery,
            ..ParserOptions::default()
        };

        let sheet = LightningStyleSheet::parse(source, parser_opts).map_err(|e| DnaError::Parse {
            message: e.to_string(),
        })?;

        convert_rules(&sheet.rules)
    }
}

fn convert_rules<R>(rules: &CssRuleList<'_, R>) -> Result<Vec<Node>> {
    let mut nodes = Vec::new();

    for rule in &rules.0 {
        match rule {
            CssRule::Style(style_rule) => nodes.push(convert_style_rule(style_rule)?),
            CssRule::Media(media_rule) => {
                nodes.push(Node::at_rule(
                    "media",
                    print(&media_rule.query)?,
                    convert_rules(&media_rule.rules)?,
                ));
            }
            CssRule::Supports(supports_rule) => {
                nodes.push(Node::at_rule(
                    "supports",
                    print(&supports_rule.condition)?,
                    convert_rules(&supports_rule.rules)?,
                ));
            }
            // @font-face, @keyframes, @import and friends carry no selectors.
            _ => debug!("skipping unsupported at-rule"),
        }
    }

    Ok(nodes)
}

/// Copies a single StyleRule's selectors + declarations into an owned rule node.
fn convert_style_rule<R>(style_rule: &StyleRule<'_, R>) -> Result<Node> {
    let mut selectors = Vec::new();
    for selector in &style_rule.selectors.0 {
        selectors.push(print(selector)?);
    }

    if !style_rule.rules.0.is_empty() {
        debug!("skipping nested rules under {}", selectors.join(", "));
    }

    Ok(Node::Rule(RuleNode {
        selector: selectors.join(", "),
        children: convert_declarations(&style_rule.declarations)?,
    }))
}

// Important declarations come last so they win over normal ones of the same property.
fn convert_declarations(block: &DeclarationBlock<'_>) -> Result<Vec<Node>> {
    let mut children = Vec::new();

    for property in &block.declarations {
        children.push(Node::Declaration(Declaration::new(
            property.property_id().name(),
            property
                .value_to_css_string(PrinterOptions::default())
                .map_err(printer_error)?,
        )));
    }

    for property in &block.important_declarations {
        let value = property
            .value_to_css_string(PrinterOptions::default())
            .map_err(printer_error)?;
        children.push(Node::Declaration(Declaration::new(
            property.property_id().name(),
            format!("{} !important", value),
        )));
    }

    Ok(children)
}

fn print<T: ToCss>(value: &T) -> Result<String> {
    value
        .to_css_string(PrinterOptions::default())
        .map_err(printer_error)
}

fn printer_error(err: impl std::fmt::Display) -> DnaError {
    DnaError::Parse {
        message: err.to_string(),
    }
}
