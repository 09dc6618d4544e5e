use std::collections::HashSet;

use super::{run_rexgen, stdout_lines};

const NOTICE: &str = "No available samples for given constraints";

#[test]
fn test_single_match() {
    let output = run_rexgen(&["--matching", "hello"]);

    assert!(
        output.status.success(),
        "Command failed with status: {:?}",
        output.status
    );
    assert_eq!(stdout_lines(&output), vec!["hello"]);
}

#[test]
fn test_distinct_samples() {
    let output = run_rexgen(&["--matching", "[0-9]{4}", "-N", "5"]);
    assert!(output.status.success());

    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 5);
    let unique: HashSet<_> = lines.iter().collect();
    assert_eq!(unique.len(), 5, "Samples should be pairwise distinct");
    for line in &lines {
        assert!(line.len() == 4 && line.chars().all(|c| c.is_ascii_digit()));
    }
}

#[test]
fn test_exhausted_constraints() {
    let output = run_rexgen(&["--matching", "x|y", "--samples", "4"]);
    assert!(output.status.success(), "Unavailable rounds are not errors");

    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 4);
    assert_eq!(&lines[2..], [NOTICE, NOTICE]);
}

#[test]
fn test_combined_constraints() {
    let output = run_rexgen(&[
        "--matching",
        "[a-z]+",
        "--not-matching",
        "abc",
        "--partial-matching",
        "q",
        "--not-partial-matching",
        "z",
        "--min-len",
        "3",
        "--max-len",
        "3",
        "-N",
        "10",
    ]);
    assert!(output.status.success());

    for line in stdout_lines(&output) {
        assert_eq!(line.len(), 3);
        assert!(line.contains('q'));
        assert!(!line.contains('z'));
        assert!(line.chars().all(|c| c.is_ascii_lowercase()));
    }
}

#[test]
fn test_verbose_prefix() {
    let output = run_rexgen(&["--matching", "ab", "-v"]);
    assert!(output.status.success());

    assert_eq!(
        stdout_lines(&output),
        vec!["# Full matches", " [+] ab", "Sample: ab"]
    );
}

#[test]
fn test_anchor_is_fatal() {
    let output = run_rexgen(&["--matching", "^abc$", "-N", "3"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty(), "No output before a compile error");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: unsupported regex construct"));
}

#[test]
fn test_syntax_error_is_fatal() {
    let output = run_rexgen(&["--not-matching", "a{3,1}"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("min repeat greater than max repeat"));
}

#[test]
fn test_unbalanced_partial_pattern_is_fatal() {
    for flag in ["--partial-matching", "--not-partial-matching"] {
        let output = run_rexgen(&[flag, "a)(b"]);

        assert_eq!(output.status.code(), Some(1), "{} a)(b", flag);
        assert!(output.stdout.is_empty());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("unbalanced parenthesis"));
    }
}

#[test]
fn test_escape_like_sample_is_printed_verbatim() {
    let output = run_rexgen(&["--matching", r"\\x41", "-N", "3"]);
    assert!(output.status.success());

    assert_eq!(stdout_lines(&output), vec![r"\x41", NOTICE, NOTICE]);
}

#[test]
fn test_no_constraints() {
    let output = run_rexgen(&["--max-len", "5", "-N", "3"]);
    assert!(output.status.success());

    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 3);
    for line in &lines {
        assert!(line.chars().all(|c| (' '..='\u{7f}').contains(&c)));
    }
}
