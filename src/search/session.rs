//! Solver session holding the constraints on the generated string
//!
//! A session owns one Z3 solver and one free string variable. Constraints
//! only accumulate: once the session is unsatisfiable it stays that way.

use std::str::FromStr;

use crate::ir::SymbolicExpr;
use crate::search::result::SampleOutcome;
use crate::semantics::smt::{create_solver_with_config, escape_literal, lower, unescape_model_string};
use crate::semantics::SolverConfig;
use z3::ast::{Bool, String as Z3String};
use z3::{Model, SatResult, Solver};

/// Name of the free string variable
pub const VARIABLE_NAME: &str = "bypass";

pub struct Session {
    solver: Solver,
    bypass: Z3String,
    constraints: usize,
    queries: usize,
}

impl Session {
    pub fn new(config: &SolverConfig) -> Self {
        Self {
            solver: create_solver_with_config(config),
            bypass: Z3String::new_const(VARIABLE_NAME),
            constraints: 0,
            queries: 0,
        }
    }

    fn assert(&mut self, constraint: &Bool) {
        self.solver.assert(constraint);
        self.constraints += 1;
    }

    /// The string must be in the language of `expr`
    pub fn require(&mut self, expr: &SymbolicExpr) {
        let member = self.bypass.regex_matches(&lower(expr));
        self.assert(&member);
    }

    /// The string must be in the complement of the language of `expr`
    pub fn forbid(&mut self, expr: &SymbolicExpr) {
        let outside = self.bypass.regex_matches(&lower(expr).complement());
        self.assert(&outside);
    }

    /// `min_len <= length <= max_len`
    pub fn bound_length(&mut self, min_len: u32, max_len: u32) {
        let length = self.bypass.length();
        let at_least = length.ge(min_len);
        let at_most = length.le(max_len);
        self.assert(&at_least);
        self.assert(&at_most);
    }

    /// Every position in `[0, positions)` holds a character in `lo..=hi`
    ///
    /// `str.at` past the end of the string is the empty string, which the
    /// optional accepts, so positions beyond the actual length are free.
    pub fn restrict_alphabet(&mut self, positions: u32, lo: char, hi: char) {
        let allowed = lower(&SymbolicExpr::Range(lo, hi)).option();
        for i in 0..positions {
            let c = self.bypass.at(i);
            let in_range = c.regex_matches(&allowed);
            self.assert(&in_range);
        }
    }

    pub fn check(&mut self) -> SatResult {
        self.queries += 1;
        self.solver.check()
    }

    /// Query for a model, then exclude the string it assigns
    pub fn next_sample(&mut self) -> SampleOutcome {
        match self.check() {
            SatResult::Sat => {}
            SatResult::Unsat => return SampleOutcome::Unsatisfiable,
            SatResult::Unknown => return SampleOutcome::Unknown,
        }

        let Some(model) = self.solver.get_model() else {
            log::warn!("solver reported sat without a model");
            return SampleOutcome::Unknown;
        };
        let Some(value) = model.eval(&self.bypass, true) else {
            log::warn!("model has no value for {}", VARIABLE_NAME);
            return SampleOutcome::Unknown;
        };

        // Exclude the model value itself, not its decoded text
        let differs = self.bypass.ne(&value);
        self.assert(&differs);

        match value.as_string().and_then(|raw| decode_model_string(&model, &value, &raw)) {
            Some(sample) => SampleOutcome::Found(sample),
            None => {
                log::warn!("cannot decode the value of {}: {}", VARIABLE_NAME, value);
                SampleOutcome::Unknown
            }
        }
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints
    }

    pub fn query_count(&self) -> usize {
        self.queries
    }
}

/// Recover the exact text of a model string
///
/// `Z3_get_string` escapes some characters without escaping the backslashes
/// already in the text, so `\x41` may be four characters or one. The raw
/// text and its decoding are both candidates; the model picks the one equal
/// to `value`.
fn decode_model_string(model: &Model, value: &Z3String, raw: &str) -> Option<String> {
    let decoded = unescape_model_string(raw);
    [raw.to_string(), decoded].into_iter().find(|candidate| {
        Z3String::from_str(&escape_literal(candidate))
            .ok()
            .and_then(|literal| model.eval(&value.eq(&literal), true))
            .and_then(|same| same.as_bool())
            == Some(true)
    })
}
