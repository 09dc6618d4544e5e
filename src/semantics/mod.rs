//! Regex semantics: compilation to the symbolic algebra and its Z3 lowering

pub mod compile;
pub mod smt;

pub use compile::compile_pattern;
pub use smt::SolverConfig;
