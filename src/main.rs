use std::io;
use std::path::PathBuf;
use std::process;

use anyhow::Result;
use chrono::Utc;
use clap::Parser;

use vybench::config;
use vybench::display;
use vybench::errors::BenchError;
use vybench::executor::SystemExecutor;
use vybench::logging;
use vybench::report;
use vybench::runner::{self, Runner};

#[derive(Parser)]
#[command(
    name = "vybench",
    version,
    about = "Time benchmark scripts across language interpreters"
)]
struct Cli {
    /// Disable colored output
    #[arg(long)]
    nocolor: bool,

    /// Run only the benchmark with this base filename (e.g. "fib")
    #[arg(long, value_name = "FILENAME")]
    bench: Option<String>,

    /// Run only on this language (case-insensitive)
    #[arg(long, value_name = "NAME")]
    lang: Option<String>,

    /// Repeat each invocation N times and report the average
    #[arg(long, value_name = "N", default_value = "1", allow_hyphen_values = true, value_parser = parse_times)]
    times: usize,

    /// Registry file to use instead of the built-in benchmark list
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// List benchmarks and languages, then exit
    #[arg(long)]
    list: bool,

    /// Write a JSON report of all timings to PATH
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,

    /// Exit with status 1 if any invocation failed to start or exited non-zero
    #[arg(long)]
    strict: bool,

    /// Log every invocation to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn parse_times(raw: &str) -> Result<usize, String> {
    Ok(runner::parse_repeat_count(raw))
}

/// Returns the number of failed invocations.
fn run() -> Result<usize> {
    let cli = Cli::parse();

    if cli.nocolor {
        display::disable_color();
    }
    logging::init_tracing(cli.verbose);

    let (registry, source) = config::load_registry(cli.config.as_deref())?;
    tracing::debug!(?source, "loaded registry");

    if cli.list {
        print!("{}", display::format_listing(&registry));
        return Ok(0);
    }

    let benchmarks = match cli.bench.as_deref() {
        Some(filename) => match registry.find_benchmark(filename) {
            Some(bench) => Some(vec![bench.clone()]),
            None => {
                return Err(BenchError::BenchmarkNotFound {
                    filename: filename.to_string(),
                }
                .into());
            }
        },
        None => None,
    };

    let languages = match cli.lang.as_deref() {
        Some(name) => match registry.find_language(name) {
            Some(lang) => vec![lang.clone()],
            None => {
                return Err(BenchError::LanguageNotFound {
                    name: name.to_string(),
                }
                .into());
            }
        },
        None => registry.languages().to_vec(),
    };

    let repeat_count = cli.times as i64;
    let mut runner = Runner::new(&registry, SystemExecutor, io::stdout());
    let reports = match &benchmarks {
        Some(selected) => runner.run_selected(selected, &languages, repeat_count)?,
        None => runner.run_all(&languages, repeat_count)?,
    };

    if let Some(path) = &cli.report {
        report::write_json(path, &reports, cli.times, Utc::now())?;
        tracing::debug!(path = %path.display(), "wrote report");
    }

    let failures: usize = reports.iter().map(|r| r.failures()).sum();
    if cli.strict {
        Ok(failures)
    } else {
        Ok(0)
    }
}

fn main() {
    match run() {
        Ok(0) => {}
        Ok(failures) => {
            eprintln!("{} invocation(s) failed", failures);
            process::exit(1);
        }
        Err(err) => {
            eprintln!("{}", err);
            let selection_miss = err
                .downcast_ref::<BenchError>()
                .is_some_and(BenchError::is_selection_miss);
            if !selection_miss {
                process::exit(1);
            }
        }
    }
}
