mod cli_test;
mod file_source_test;

use std::path::PathBuf;
use std::process::{Command, Output};

fn get_binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_rexgen"))
}

/// Run the binary with `args`, returning its output
fn run_rexgen(args: &[&str]) -> Output {
    Command::new(get_binary_path())
        .args(args)
        .output()
        .expect("Failed to execute rexgen")
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(String::from)
        .collect()
}
