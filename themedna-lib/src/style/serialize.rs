//! Canonical text output for a [`Stylesheet`].
//!
//! Rule sets are grouped by scope, then by fingerprint: selectors with
//! identical declarations share one block with a combined selector list.
//! Scoped groups are re-wrapped in their at-rule, one tab deeper.

use crate::style::rule_set::RuleSet;
use crate::style::stylesheet::Stylesheet;
use indexmap::IndexMap;

pub fn canonical_text(stylesheet: &Stylesheet) -> String {
    let mut scopes: IndexMap<&str, Vec<&RuleSet>> = IndexMap::new();
    for rule_set in stylesheet.iter() {
        scopes.entry(rule_set.scope()).or_default().push(rule_set);
    }

    let mut out = String::new();
    for (scope, rule_sets) in scopes {
        let blocks = render_blocks(&rule_sets);
        if blocks.is_empty() {
            continue;
        }

        let joined = blocks.join("\n");
        if scope.is_empty() {
            out.push_str(&joined);
        } else {
            out.push_str(&format!("\n@{}{{\n{}\n}}\n", scope, indent(&joined)));
        }
    }
    out
}

/// One block per distinct fingerprint, in order of first encounter.
fn render_blocks(rule_sets: &[&RuleSet]) -> Vec<String> {
    let mut groups: IndexMap<&str, Vec<&RuleSet>> = IndexMap::new();
    for &rule_set in rule_sets {
        groups.entry(rule_set.fingerprint()).or_default().push(rule_set);
    }

    groups
        .values()
        .filter(|group| !group[0].is_empty())
        .map(|group| {
            let selectors = group
                .iter()
                .map(|rule_set| rule_set.selector())
                .collect::<Vec<_>>()
                .join(", ");
            format!("{} {{\n{}\n}}", selectors, group[0].body())
        })
        .collect()
}

fn indent(text: &str) -> String {
    text.split('\n')
        .map(|line| format!("\t{}", line))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const MEDIA: &str = "media (max-width: 600px)";

    #[test]
    fn groups_selectors_with_identical_content() {
        let mut stylesheet = Stylesheet::new();
        let decls = [("color", "purple"), ("text-align", "center")];
        stylesheet.add_rule_set("a", "", &decls).unwrap();
        stylesheet.add_rule_set("p.foo", "", &[("background", "#999")]).unwrap();
        stylesheet.add_rule_set("b", "", &decls).unwrap();

        assert_eq!(
            canonical_text(&stylesheet),
            "a, b {\n\tcolor: purple;\n\ttext-align: center;\n}\np.foo {\n\tbackground: #999;\n}"
        );
    }

    #[test]
    fn wraps_scoped_groups() {
        let mut stylesheet = Stylesheet::new();
        stylesheet.add_rule_set(".a", "", &[("color", "red")]).unwrap();
        stylesheet.add_rule_set(".b", MEDIA, &[("color", "blue")]).unwrap();
        stylesheet.add_rule_set(".c", MEDIA, &[("margin", "0")]).unwrap();

        assert_eq!(
            canonical_text(&stylesheet),
            ".a {\n\tcolor: red;\n}\
             \n@media (max-width: 600px){\n\
             \t.b {\n\t\tcolor: blue;\n\t}\n\
             \t.c {\n\t\tmargin: 0;\n\t}\n}\n"
        );
    }

    #[test]
    fn scopes_follow_first_encounter_order() {
        let mut stylesheet = Stylesheet::new();
        stylesheet.add_rule_set(".x", "media print", &[("color", "red")]).unwrap();
        stylesheet.add_rule_set(".y", "", &[("color", "red")]).unwrap();
        stylesheet.add_rule_set(".z", "media screen", &[("color", "red")]).unwrap();

        let text = canonical_text(&stylesheet);
        let print = text.find("@media print").unwrap();
        let top = text.find(".y {").unwrap();
        let screen = text.find("@media screen").unwrap();
        assert!(print < top && top < screen);
    }

    #[test]
    fn same_content_in_different_scopes_is_not_grouped() {
        let mut stylesheet = Stylesheet::new();
        stylesheet.add_rule_set(".a", "", &[("color", "red")]).unwrap();
        stylesheet.add_rule_set(".b", MEDIA, &[("color", "red")]).unwrap();

        let text = canonical_text(&stylesheet);
        assert!(text.starts_with(".a {\n"));
        assert!(text.contains("\t.b {\n"));
        assert!(!text.contains(".a, .b"));
    }

    #[test]
    fn empty_rule_sets_and_scopes_are_omitted() {
        let mut stylesheet = Stylesheet::new();
        let none: [(&str, &str); 0] = [];
        stylesheet.add_rule_set(".empty", MEDIA, &none).unwrap();
        stylesheet.add_rule_set(".also-empty", "", &none).unwrap();

        assert_eq!(canonical_text(&stylesheet), "");
    }

    #[test]
    fn output_is_stable() {
        let mut stylesheet = Stylesheet::new();
        stylesheet.add_rule_set(".a", "", &[("margin", "0"), ("color", "red")]).unwrap();
        stylesheet.add_rule_set(".b", MEDIA, &[("color", "red")]).unwrap();

        assert_eq!(stylesheet.to_canonical_text(), stylesheet.to_canonical_text());
        assert_eq!(stylesheet.to_string(), stylesheet.to_canonical_text());
    }

    #[test]
    fn indent_prefixes_every_line() {
        assert_eq!(indent("a {\n\tb: c;\n}"), "\ta {\n\t\tb: c;\n\t}");
    }
}
