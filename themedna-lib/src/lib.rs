//! Normalizes stylesheets into selector → declarations maps and answers
//! "what does this theme add or change relative to that one".
//!
//! ```no_run
//! use themedna_lib::ThemeDna;
//!
//! let dna: ThemeDna = ThemeDna::default();
//! let diff = dna
//!     .difference(".a { color: red }", &[".a { color: red } .b { width: 1px }"])
//!     .unwrap();
//! print!("{}", diff.to_canonical_text());
//! ```

pub mod error;
pub mod parser;
pub mod style;
pub mod theme_dna;

pub use error::{DnaError, Result};
pub use parser::{CssParser, LightningParser};
pub use style::ast::{AtRuleNode, Declaration, Node, RuleNode};
pub use style::normalize::get_all_selectors;
pub use style::rule_set::RuleSet;
pub use style::stylesheet::{RuleKey, Stylesheet};
pub use theme_dna::ThemeDna;
