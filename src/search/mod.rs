//! Constraint assembly and sample enumeration
//!
//! Every resolved pattern becomes one membership constraint on a single
//! string variable:
//! - full match: the string is in the pattern's language
//! - full mismatch: the string is in the complement
//! - partial (mis)match: the same, after rewriting `p` to `.*(p).*`
//!
//! The session then bounds the length, restricts every position to
//! printable ASCII and is queried once per requested sample, excluding
//! each sample as soon as it is found.

pub mod config;
pub mod enumerate;
pub mod result;
pub mod session;

pub use config::{GenerateConfig, PatternSet};
pub use enumerate::generate;
