use std::io::Write;

use tempfile::NamedTempFile;

use super::{run_rexgen, stdout_lines};

fn write_regex_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_every_line_is_required() {
    let file = write_regex_file("[a-c]{2}\n\n  .*b.*  \n");
    let output = run_rexgen(&["--matching", file.path().to_str().unwrap(), "-N", "10"]);

    assert!(output.status.success());
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 10);

    // Five two-letter strings over a-c contain b
    let samples: Vec<_> = lines.iter().filter(|l| l.len() == 2).collect();
    assert_eq!(samples.len(), 5);
    for sample in samples {
        assert!(sample.contains('b'));
    }
}

#[test]
fn test_partial_file_verbose_echo() {
    let file = write_regex_file("foo\nbar\n");
    let output = run_rexgen(&[
        "--not-partial-matching",
        file.path().to_str().unwrap(),
        "--max-len",
        "4",
        "-v",
    ]);

    assert!(output.status.success());
    let lines = stdout_lines(&output);
    assert_eq!(
        &lines[..3],
        ["## Partial Matches", "  -  .*(foo).*", "  -  .*(bar).*"]
    );
    let sample = lines[3].strip_prefix("Sample: ").unwrap();
    assert!(!sample.contains("foo") && !sample.contains("bar"));
}
