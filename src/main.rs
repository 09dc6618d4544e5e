use clap::{Parser, ValueEnum};
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};
use std::io::{self, Write};

mod error;
mod ir;
mod parser;
mod search;
mod semantics;
mod source;

use error::Result;
use search::{GenerateConfig, PatternSet, generate};
use semantics::SolverConfig;

// --- Command Line Arguments ---

#[derive(Parser)]
#[command(name = "rexgen")]
#[command(about = "rexgen - generate strings satisfying regex constraints")]
#[command(version)]
struct Args {
    /// Regex (or file of regexes, one per line) the string must fully match
    #[arg(long = "matching", value_name = "REGEX")]
    matching: Vec<String>,
    /// Regex (or file) the string must not fully match
    #[arg(long = "not-matching", value_name = "REGEX")]
    not_matching: Vec<String>,
    /// Regex (or file) the string must contain a match of
    #[arg(long = "partial-matching", value_name = "REGEX")]
    partial_matching: Vec<String>,
    /// Regex (or file) the string must not contain a match of
    #[arg(long = "not-partial-matching", value_name = "REGEX")]
    not_partial_matching: Vec<String>,

    /// Minimum length of generated strings
    #[arg(long, default_value = "1")]
    min_len: u32,
    /// Maximum length of generated strings
    #[arg(long, default_value = "100")]
    max_len: u32,
    /// Number of distinct strings to generate
    #[arg(short = 'N', long = "samples", default_value = "1")]
    samples: usize,

    /// Echo the constraints and prefix each sample
    #[arg(long, short)]
    verbose: bool,
    /// Per-query solver timeout in seconds (no timeout if omitted)
    #[arg(long)]
    solver_timeout: Option<u64>,
    /// Diagnostic log level (logs go to stderr)
    #[arg(long, value_enum, default_value = "warn")]
    log_level: CliLogLevel,
}

/// CLI log level selection
#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliLogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LevelFilter {
    fn from(cli: CliLogLevel) -> Self {
        match cli {
            CliLogLevel::Off => LevelFilter::Off,
            CliLogLevel::Error => LevelFilter::Error,
            CliLogLevel::Warn => LevelFilter::Warn,
            CliLogLevel::Info => LevelFilter::Info,
            CliLogLevel::Debug => LevelFilter::Debug,
            CliLogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn init_logging(level: LevelFilter) {
    let config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .build();
    // A logger already being installed is not fatal
    let _ = TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto);
}

impl Args {
    fn patterns(&self) -> PatternSet {
        PatternSet {
            full_match: self.matching.clone(),
            full_mismatch: self.not_matching.clone(),
            partial_match: self.partial_matching.clone(),
            partial_mismatch: self.not_partial_matching.clone(),
        }
    }

    fn generate_config(&self) -> GenerateConfig {
        let solver = match self.solver_timeout {
            Some(secs) => SolverConfig::with_timeout_secs(secs),
            None => SolverConfig::no_timeout(),
        };

        GenerateConfig::default()
            .with_min_len(self.min_len)
            .with_max_len(self.max_len)
            .with_samples(self.samples)
            .with_verbose(self.verbose)
            .with_solver(solver)
    }
}

fn run(args: &Args) -> Result<()> {
    let patterns = args.patterns();
    let config = args.generate_config();

    if config.min_len > config.max_len {
        log::warn!(
            "--min-len {} exceeds --max-len {}, no sample can exist",
            config.min_len,
            config.max_len
        );
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let report = generate(&patterns, &config, &mut out)?;
    out.flush()?;

    if report.unknown > 0 {
        log::warn!(
            "{} of {} rounds were undecided by the solver; try a larger --solver-timeout",
            report.unknown,
            config.samples
        );
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(args.log_level.into());

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
