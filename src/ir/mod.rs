//! Intermediate representations: the parsed regex tree and the symbolic algebra

pub mod expr;
pub mod node;

// Re-export commonly used types
pub use expr::SymbolicExpr;
pub use node::{AnchorKind, Category, RegexNode, SetItem};
