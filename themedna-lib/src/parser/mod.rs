pub mod lightning;

use crate::error::Result;
use crate::style::ast::Node;

pub use lightning::LightningParser;

/// Turns stylesheet source text into an owned AST forest.
///
/// Implementations must be `Sync`: diff sources are parsed in parallel.
pub trait CssParser: Sync {
    fn parse(&self, source: &str) -> Result<Vec<Node>>;
}
