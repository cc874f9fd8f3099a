use crate::error::{DnaError, Result};
use crate::parser::{CssParser, LightningParser};
use crate::style::normalize;
use crate::style::stylesheet::Stylesheet;
use log::debug;
use rayon::prelude::*;

/// Entry point: compacts stylesheets and diffs them against a base.
#[derive(Debug, Clone, Default)]
pub struct ThemeDna<P = LightningParser> {
    parser: P,
}

impl<P: CssParser> ThemeDna<P> {
    pub fn new(parser: P) -> Self {
        ThemeDna { parser }
    }

    /// Parses `source` and folds it into a normalized stylesheet, one rule
    /// set per (scope, selector).
    pub fn compact(&self, source: &str) -> Result<Stylesheet> {
        let nodes = self.parser.parse(source)?;
        let stylesheet = normalize::normalize(&nodes)?;
        debug!(
            "compacted {} top-level nodes into {} rule sets",
            nodes.len(),
            stylesheet.len()
        );
        Ok(stylesheet)
    }

    /// Everything `others` add or change relative to `base`.
    ///
    /// The comparison sources are merged left to right before diffing, so a
    /// later source wins over an earlier one on the same property.
    pub fn difference<S: AsRef<str> + Sync>(&self, base: &str, others: &[S]) -> Result<Stylesheet> {
        if others.is_empty() {
            return Err(DnaError::invalid("others"));
        }

        let (base, compacted) = rayon::join(
            || self.compact(base),
            || {
                others
                    .par_iter()
                    .map(|source| self.compact(source.as_ref()))
                    .collect::<Result<Vec<_>>>()
            },
        );
        let base = base?;
        let mut compacted = compacted?.into_iter();

        let first = compacted.next().unwrap_or_default();
        let others_merged = compacted.fold(first, |merged, next| merged.merge(&next));

        Ok(base.difference(&others_merged))
    }

    /// Like [`ThemeDna::difference`], with the first source as the base.
    pub fn difference_all<S: AsRef<str> + Sync>(&self, sources: &[S]) -> Result<Stylesheet> {
        match sources.split_first() {
            Some((base, others)) => self.difference(base.as_ref(), others),
            None => Err(DnaError::invalid("sources")),
        }
    }

    /// Splits a selector list such as `".foo, span.bar"` into its selectors.
    pub fn get_all_selectors(&self, selector: &str) -> Result<Vec<String>> {
        normalize::get_all_selectors(selector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::ast::Node;

    /// Hands out a fixed forest per source text, bypassing real CSS parsing.
    struct FixtureParser;

    impl CssParser for FixtureParser {
        fn parse(&self, source: &str) -> Result<Vec<Node>> {
            let media = |children| Node::at_rule("media", "(max-width: 600px)", children);
            match source {
                "base" => Ok(vec![Node::rule(".a", &[("color", "red"), ("margin", "1px")])]),
                "recolor" => Ok(vec![Node::rule(".a", &[("color", "blue"), ("margin", "1px")])]),
                "responsive" => Ok(vec![
                    Node::rule(".a", &[("color", "red")]),
                    media(vec![Node::rule(".b", &[("color", "blue")])]),
                ]),
                "green" => Ok(vec![Node::rule(".a", &[("color", "green")])]),
                "" => Ok(Vec::new()),
                other => Err(DnaError::Parse {
                    message: format!("unknown fixture {}", other),
                }),
            }
        }
    }

    fn dna() -> ThemeDna<FixtureParser> {
        ThemeDna::new(FixtureParser)
    }

    #[test]
    fn compact_normalizes_source() {
        let stylesheet = dna().compact("responsive").unwrap();
        assert_eq!(stylesheet.len(), 2);
        assert!(stylesheet.get("media (max-width: 600px)", ".b").is_some());
    }

    #[test]
    fn difference_reports_changed_properties() {
        let diff = dna().difference("base", &["recolor"]).unwrap();

        assert_eq!(diff.len(), 1);
        assert_eq!(diff.get("", ".a").unwrap().fingerprint(), "color:blue|");
    }

    #[test]
    fn difference_reports_new_scoped_rules() {
        let diff = dna().difference("base", &["responsive"]).unwrap();

        assert_eq!(diff.len(), 1);
        let b = diff.get("media (max-width: 600px)", ".b").unwrap();
        assert_eq!(b.get_property("color"), Some("blue"));
    }

    #[test]
    fn later_comparison_sources_win() {
        let diff = dna().difference("base", &["recolor", "green"]).unwrap();
        assert_eq!(diff.get("", ".a").unwrap().get_property("color"), Some("green"));
    }

    #[test]
    fn difference_requires_a_comparison_source() {
        let none: [&str; 0] = [];
        assert_eq!(
            dna().difference("base", &none).unwrap_err(),
            DnaError::InvalidArgument { argument: "others" }
        );
        assert_eq!(
            dna().difference_all(&none).unwrap_err(),
            DnaError::InvalidArgument { argument: "sources" }
        );
        assert_eq!(
            dna().difference_all(&["base"]).unwrap_err(),
            DnaError::InvalidArgument { argument: "others" }
        );
    }

    #[test]
    fn difference_all_uses_first_source_as_base() {
        let diff = dna().difference_all(&["base", "recolor"]).unwrap();
        assert_eq!(diff.get("", ".a").unwrap().fingerprint(), "color:blue|");
    }

    #[test]
    fn identical_sources_have_no_difference() {
        assert!(dna().difference("base", &["base"]).unwrap().is_empty());
        assert!(dna().difference("", &[""]).unwrap().is_empty());
    }

    #[test]
    fn parse_failures_propagate() {
        let err = dna().difference("base", &["recolor", "broken"]).unwrap_err();
        assert!(matches!(err, DnaError::Parse { .. }));
    }

    #[test]
    fn get_all_selectors_delegates() {
        assert_eq!(
            dna().get_all_selectors(".foo, span.bar").unwrap(),
            vec![".foo", "span.bar"]
        );
        assert!(dna().get_all_selectors("").is_err());
    }
}
