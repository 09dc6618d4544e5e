//! Configuration types for sample generation

use crate::semantics::SolverConfig;
use std::ops::RangeInclusive;

/// Characters every generated position must fall in: codes strictly
/// between 31 and 128, i.e. space through DEL
pub const PRINTABLE: RangeInclusive<char> = ' '..='\u{7f}';

/// How a pattern constrains the generated string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    /// The string must fully match
    FullMatch,
    /// The string must not fully match
    FullMismatch,
    /// The string must contain a match
    PartialMatch,
    /// The string must not contain a match
    PartialMismatch,
}

impl ConstraintKind {
    /// All kinds, in the order their constraints are asserted
    pub const ALL: [ConstraintKind; 4] = [
        ConstraintKind::FullMatch,
        ConstraintKind::FullMismatch,
        ConstraintKind::PartialMatch,
        ConstraintKind::PartialMismatch,
    ];

    /// Whether patterns are rewritten to match anywhere in the string
    pub fn is_partial(&self) -> bool {
        matches!(
            self,
            ConstraintKind::PartialMatch | ConstraintKind::PartialMismatch
        )
    }

    /// Whether the string must stay outside the pattern's language
    pub fn is_forbidden(&self) -> bool {
        matches!(
            self,
            ConstraintKind::FullMismatch | ConstraintKind::PartialMismatch
        )
    }

    /// Prefix printed before each pattern in verbose mode
    pub fn marker(&self) -> &'static str {
        match self {
            ConstraintKind::FullMatch => " [+] ",
            ConstraintKind::FullMismatch => " [-] ",
            ConstraintKind::PartialMatch => "  +  ",
            ConstraintKind::PartialMismatch => "  -  ",
        }
    }
}

impl std::fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConstraintKind::FullMatch => write!(f, "full-match"),
            ConstraintKind::FullMismatch => write!(f, "full-mismatch"),
            ConstraintKind::PartialMatch => write!(f, "partial-match"),
            ConstraintKind::PartialMismatch => write!(f, "partial-mismatch"),
        }
    }
}

/// The four ordered lists of regex sources
///
/// Each source is a literal pattern or the path of a file of patterns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternSet {
    pub full_match: Vec<String>,
    pub full_mismatch: Vec<String>,
    pub partial_match: Vec<String>,
    pub partial_mismatch: Vec<String>,
}

impl PatternSet {
    /// Sources of one kind
    pub fn sources(&self, kind: ConstraintKind) -> &[String] {
        match kind {
            ConstraintKind::FullMatch => &self.full_match,
            ConstraintKind::FullMismatch => &self.full_mismatch,
            ConstraintKind::PartialMatch => &self.partial_match,
            ConstraintKind::PartialMismatch => &self.partial_mismatch,
        }
    }

    pub fn has_full(&self) -> bool {
        !self.full_match.is_empty() || !self.full_mismatch.is_empty()
    }

    pub fn has_partial(&self) -> bool {
        !self.partial_match.is_empty() || !self.partial_mismatch.is_empty()
    }
}

/// Configuration for a generation run
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    /// Minimum length of generated samples
    pub min_len: u32,
    /// Maximum length of generated samples
    pub max_len: u32,
    /// Number of samples to request
    pub samples: usize,
    /// Echo patterns and prefix samples
    pub verbose: bool,
    /// Solver session configuration
    pub solver: SolverConfig,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            min_len: 1,
            max_len: 100,
            samples: 1,
            verbose: false,
            solver: SolverConfig::no_timeout(),
        }
    }
}

impl GenerateConfig {
    pub fn with_min_len(mut self, min_len: u32) -> Self {
        self.min_len = min_len;
        self
    }

    pub fn with_max_len(mut self, max_len: u32) -> Self {
        self.max_len = max_len;
        self
    }

    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }
}
