pub mod ast;
pub mod normalize;
pub mod rule_set;
pub mod serialize;
pub mod stylesheet;
