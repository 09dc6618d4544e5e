//! Constraint assembly and the distinct-sample enumeration loop

use std::io::Write;
use std::time::Instant;

use crate::error::Result;
use crate::ir::SymbolicExpr;
use crate::search::config::{ConstraintKind, GenerateConfig, PatternSet, PRINTABLE};
use crate::search::result::{GenerateReport, SampleOutcome};
use crate::search::session::Session;
use crate::semantics::compile_pattern;
use crate::source;

/// Written in place of a sample when a round finds none
pub const UNAVAILABLE_NOTICE: &str = "No available samples for given constraints";

/// A resolved pattern together with its compiled expression
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pub kind: ConstraintKind,
    /// Pattern text after resolution and the partial rewrite
    pub regex: String,
    pub expr: SymbolicExpr,
}

/// Resolve and compile every source, in assertion order
///
/// Partial patterns are compiled as written and then wrapped as
/// `.*(p).*` in the algebra, so a malformed pattern stays malformed.
/// Fails on the first pattern that does not compile.
pub fn compile_patterns(patterns: &PatternSet) -> Result<Vec<CompiledPattern>> {
    let mut compiled = Vec::new();

    for kind in ConstraintKind::ALL {
        for src in patterns.sources(kind) {
            for pattern in source::resolve(src)? {
                let expr = compile_pattern(&pattern)?;
                let (regex, expr) = if kind.is_partial() {
                    (source::partial_pattern(&pattern), SymbolicExpr::containing(expr))
                } else {
                    (pattern, expr)
                };
                log::debug!("{} {:?} => {}", kind, regex, expr);
                compiled.push(CompiledPattern { kind, regex, expr });
            }
        }
    }

    Ok(compiled)
}

/// Assert all constraints of a run into `session`
pub fn assemble(session: &mut Session, compiled: &[CompiledPattern], config: &GenerateConfig) {
    for pattern in compiled {
        if pattern.kind.is_forbidden() {
            session.forbid(&pattern.expr);
        } else {
            session.require(&pattern.expr);
        }
    }

    session.bound_length(config.min_len, config.max_len);
    session.restrict_alphabet(config.max_len, *PRINTABLE.start(), *PRINTABLE.end());
}

fn echo_patterns<W: Write>(
    patterns: &PatternSet,
    compiled: &[CompiledPattern],
    out: &mut W,
) -> Result<()> {
    let (full, partial): (Vec<_>, Vec<_>) = compiled.iter().partition(|p| !p.kind.is_partial());

    if patterns.has_full() {
        writeln!(out, "# Full matches")?;
        for pattern in full {
            writeln!(out, "{}{}", pattern.kind.marker(), pattern.regex)?;
        }
    }
    if patterns.has_partial() {
        writeln!(out, "## Partial Matches")?;
        for pattern in partial {
            writeln!(out, "{}{}", pattern.kind.marker(), pattern.regex)?;
        }
    }

    Ok(())
}

/// Generate up to `config.samples` distinct strings satisfying `patterns`
///
/// Every pattern is compiled before the solver session exists, so a pattern
/// error leaves `out` untouched. Each round writes either a sample or
/// [`UNAVAILABLE_NOTICE`] on its own line.
pub fn generate<W: Write>(
    patterns: &PatternSet,
    config: &GenerateConfig,
    out: &mut W,
) -> Result<GenerateReport> {
    let start = Instant::now();
    let compiled = compile_patterns(patterns)?;

    if config.verbose {
        echo_patterns(patterns, &compiled, out)?;
    }

    let mut session = Session::new(&config.solver);
    assemble(&mut session, &compiled, config);
    log::debug!(
        "asserted {} constraints for {} patterns",
        session.constraint_count(),
        compiled.len()
    );

    let mut report = GenerateReport::new();
    for round in 0..config.samples {
        let outcome = session.next_sample();
        log::debug!("round {}: {:?}", round, outcome);

        match &outcome {
            SampleOutcome::Found(sample) if config.verbose => writeln!(out, "Sample: {}", sample)?,
            SampleOutcome::Found(sample) => writeln!(out, "{}", sample)?,
            SampleOutcome::Unsatisfiable => writeln!(out, "{}", UNAVAILABLE_NOTICE)?,
            SampleOutcome::Unknown => {
                log::warn!("solver could not decide round {}", round);
                writeln!(out, "{}", UNAVAILABLE_NOTICE)?;
            }
        }
        report.record(&outcome);
    }

    report.constraints = session.constraint_count();
    report.queries = session.query_count();
    report.elapsed = start.elapsed();

    log::info!(
        "generated {} of {} samples, {} rounds unavailable ({} constraints, {} queries) in {:?}",
        report.samples.len(),
        config.samples,
        report.unavailable,
        report.constraints,
        report.queries,
        report.elapsed
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::collections::HashSet;
    use test_log::test;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn full_match(pattern: &str) -> PatternSet {
        PatternSet {
            full_match: strings(&[pattern]),
            ..PatternSet::default()
        }
    }

    fn run(patterns: &PatternSet, config: &GenerateConfig) -> (GenerateReport, Vec<String>) {
        let mut out = Vec::new();
        let report = generate(patterns, config, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        (report, text.lines().map(String::from).collect())
    }

    #[test]
    fn test_single_sample_matches() {
        let (report, lines) = run(&full_match("abc"), &GenerateConfig::default());
        assert_eq!(lines, vec!["abc"]);
        assert_eq!(report.samples, vec!["abc".to_string()]);
        assert_eq!(report.queries, 1);
    }

    #[test]
    fn test_distinct_samples() {
        let config = GenerateConfig::default().with_samples(5);
        let (report, lines) = run(&full_match("[a-z]{3}"), &config);

        assert_eq!(lines.len(), 5);
        let unique: HashSet<_> = lines.iter().collect();
        assert_eq!(unique.len(), 5);
        for line in &lines {
            assert_eq!(line.len(), 3);
            assert!(line.chars().all(|c| c.is_ascii_lowercase()));
        }
        assert_eq!(report.unavailable, 0);
    }

    #[test]
    fn test_exhausted_rounds_print_notices() {
        let config = GenerateConfig::default().with_samples(5);
        let (report, lines) = run(&full_match("a|b"), &config);

        let mut found: Vec<_> = lines[..2].to_vec();
        found.sort();
        assert_eq!(found, vec!["a", "b"]);
        assert!(lines[2..].iter().all(|l| l == UNAVAILABLE_NOTICE));
        assert_eq!(lines.len(), 5);
        assert_eq!(report.unavailable, 3);
    }

    #[test]
    fn test_escape_like_sample_is_not_repeated() {
        let config = GenerateConfig::default().with_samples(2);
        let (report, lines) = run(&full_match(r"\\x41"), &config);
        assert_eq!(lines, vec![r"\x41", UNAVAILABLE_NOTICE]);
        assert_eq!(report.samples, vec![r"\x41".to_string()]);
    }

    #[test]
    fn test_mismatch_and_partial_constraints() {
        let patterns = PatternSet {
            full_match: strings(&["[a-c]{3}"]),
            full_mismatch: strings(&["aaa"]),
            partial_match: strings(&["b"]),
            partial_mismatch: strings(&["cc"]),
        };
        let config = GenerateConfig::default().with_samples(30);
        let (report, _) = run(&patterns, &config);

        assert!(!report.samples.is_empty());
        for sample in &report.samples {
            assert_eq!(sample.len(), 3);
            assert_ne!(sample, "aaa");
            assert!(sample.contains('b'));
            assert!(!sample.contains("cc"));
        }
    }

    #[test]
    fn test_length_bounds_apply() {
        let config = GenerateConfig::default()
            .with_min_len(2)
            .with_max_len(4)
            .with_samples(4);
        let (report, lines) = run(&full_match("x*"), &config);

        let mut found = report.samples.clone();
        found.sort();
        assert_eq!(found, vec!["xx", "xxx", "xxxx"]);
        assert_eq!(lines[3], UNAVAILABLE_NOTICE);
    }

    #[test]
    fn test_forbid_everything_reports_each_round() {
        let patterns = PatternSet {
            full_mismatch: strings(&[".*"]),
            ..PatternSet::default()
        };
        let config = GenerateConfig::default().with_samples(3);
        let (report, lines) = run(&patterns, &config);
        assert_eq!(lines, vec![UNAVAILABLE_NOTICE; 3]);
        assert!(report.samples.is_empty());
        assert_eq!(report.queries, 3);
    }

    #[test]
    fn test_verbose_output() {
        let patterns = PatternSet {
            full_match: strings(&["ab"]),
            partial_mismatch: strings(&["c"]),
            ..PatternSet::default()
        };
        let config = GenerateConfig::default().with_verbose(true);
        let (_, lines) = run(&patterns, &config);

        assert_eq!(
            lines,
            vec![
                "# Full matches",
                " [+] ab",
                "## Partial Matches",
                "  -  .*(c).*",
                "Sample: ab",
            ]
        );
    }

    #[test]
    fn test_compile_error_writes_nothing() {
        let patterns = PatternSet {
            full_match: strings(&["abc"]),
            partial_match: strings(&["^x"]),
            ..PatternSet::default()
        };
        let config = GenerateConfig::default().with_verbose(true);
        let mut out = Vec::new();

        let err = generate(&patterns, &config, &mut out).unwrap_err();
        assert!(matches!(err, Error::UnsupportedConstruct(_)));
        assert!(out.is_empty());
    }

    #[test]
    fn test_unbalanced_partial_pattern_is_rejected() {
        for partial in ["a)(b", "(a", "a)"] {
            let patterns = PatternSet {
                partial_match: strings(&[partial]),
                ..PatternSet::default()
            };
            let err = compile_patterns(&patterns).unwrap_err();
            assert!(matches!(err, Error::PatternSyntax { .. }), "{:?}", partial);

            let patterns = PatternSet {
                partial_mismatch: strings(&[partial]),
                ..PatternSet::default()
            };
            assert!(compile_patterns(&patterns).is_err());
        }
    }

    #[test]
    fn test_empty_pattern_is_rejected() {
        let mut out = Vec::new();
        let err = generate(&full_match(""), &GenerateConfig::default(), &mut out).unwrap_err();
        assert!(matches!(err, Error::EmptyRegex));
    }

    #[test]
    fn test_syntax_error_is_rejected() {
        let patterns = PatternSet {
            full_mismatch: strings(&["a(b"]),
            ..PatternSet::default()
        };
        let mut out = Vec::new();
        let err = generate(&patterns, &GenerateConfig::default(), &mut out).unwrap_err();
        assert!(matches!(err, Error::PatternSyntax { .. }));
    }

    #[test]
    fn test_compile_patterns_order() {
        let patterns = PatternSet {
            partial_mismatch: strings(&["d"]),
            full_match: strings(&["a"]),
            partial_match: strings(&["c"]),
            full_mismatch: strings(&["b"]),
        };
        let compiled = compile_patterns(&patterns).unwrap();
        let kinds: Vec<_> = compiled.iter().map(|p| p.kind).collect();
        assert_eq!(kinds, ConstraintKind::ALL.to_vec());
        assert_eq!(compiled[2].regex, ".*(c).*");
        assert_eq!(
            compiled[2].expr,
            SymbolicExpr::containing(SymbolicExpr::Char('c'))
        );
        assert_eq!(compiled[1].expr, SymbolicExpr::Char('b'));
    }

    #[test]
    fn test_no_patterns_yields_printable_samples() {
        let config = GenerateConfig::default().with_max_len(3).with_samples(10);
        let (report, _) = run(&PatternSet::default(), &config);
        assert_eq!(report.samples.len(), 10);
        for sample in &report.samples {
            assert!(sample.chars().all(|c| PRINTABLE.contains(&c)));
            assert!((1..=3).contains(&sample.chars().count()));
        }
    }
}
