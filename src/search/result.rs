//! Generation results and statistics

use std::time::Duration;

/// Outcome of one enumeration round
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SampleOutcome {
    /// A new sample, already excluded from later rounds
    Found(String),
    /// The accumulated constraints admit no further sample
    Unsatisfiable,
    /// The solver gave up (timeout or resource limit)
    Unknown,
}

/// Summary of a generation run
#[derive(Debug, Clone, Default)]
pub struct GenerateReport {
    /// Samples in discovery order
    pub samples: Vec<String>,
    /// Rounds that produced no sample
    pub unavailable: usize,
    /// Rounds the solver could not decide
    pub unknown: usize,
    /// Constraints asserted in the session
    pub constraints: usize,
    /// Satisfiability checks issued
    pub queries: usize,
    /// Wall time of the whole run
    pub elapsed: Duration,
}

impl GenerateReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of a round
    pub fn record(&mut self, outcome: &SampleOutcome) {
        match outcome {
            SampleOutcome::Found(sample) => self.samples.push(sample.clone()),
            SampleOutcome::Unsatisfiable => self.unavailable += 1,
            SampleOutcome::Unknown => {
                self.unavailable += 1;
                self.unknown += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_record_outcomes() {
        let mut report = GenerateReport::new();
        report.record(&SampleOutcome::Found("a".to_string()));
        report.record(&SampleOutcome::Unsatisfiable);
        report.record(&SampleOutcome::Unknown);

        assert_eq!(report.samples, vec!["a".to_string()]);
        assert_eq!(report.unavailable, 2);
        assert_eq!(report.unknown, 1);
    }
}
