use std::io::Write;
use std::time::{Duration, Instant};

use anyhow::Result;

use crate::display;
use crate::errors::BenchError;
use crate::executor::CommandExecutor;
use crate::registry::Registry;
use crate::types::{BenchmarkDescriptor, BenchmarkReport, LanguageDescriptor, LanguageTiming};

/// Repeat counts below 1 run once.
pub fn effective_repeat_count(requested: i64) -> usize {
    if requested < 1 { 1 } else { requested as usize }
}

/// Parse a `--times` value. Anything unparseable or below 1 runs once.
pub fn parse_repeat_count(raw: &str) -> usize {
    effective_repeat_count(raw.trim().parse().unwrap_or(1))
}

/// Arithmetic mean of the samples; zero for an empty slice.
pub fn mean_duration(samples: &[Duration]) -> Duration {
    if samples.is_empty() {
        return Duration::ZERO;
    }
    let total: Duration = samples.iter().sum();
    Duration::from_nanos((total.as_nanos() / samples.len() as u128) as u64)
}

/// Upper bound on up-front sample storage; longer runs grow the buffer as they go.
const PREALLOCATED_SAMPLES: usize = 1024;

/// Drives timed invocations through an executor and writes progress to `out`.
pub struct Runner<'r, E, W> {
    registry: &'r Registry,
    executor: E,
    out: W,
}

impl<'r, E: CommandExecutor, W: Write> Runner<'r, E, W> {
    pub fn new(registry: &'r Registry, executor: E, out: W) -> Self {
        Self {
            registry,
            executor,
            out,
        }
    }

    #[cfg(test)]
    fn into_parts(self) -> (E, W) {
        (self.executor, self.out)
    }

    /// Run one benchmark on each language in order, `repeat_count` times each.
    ///
    /// Exit status never changes control flow: a failed or missing executable is
    /// still timed and averaged, and only counted in `LanguageTiming::failures`.
    pub fn run_benchmark(
        &mut self,
        benchmark: &BenchmarkDescriptor,
        languages: &[LanguageDescriptor],
        repeat_count: i64,
    ) -> Result<BenchmarkReport> {
        let runs = effective_repeat_count(repeat_count);
        self.out.write_all(display::format_header(benchmark).as_bytes())?;

        let mut timings = Vec::with_capacity(languages.len());
        for language in languages {
            self.out.write_all(display::format_running(language).as_bytes())?;

            let path = language.target_path(benchmark);
            let mut samples = Vec::with_capacity(runs.min(PREALLOCATED_SAMPLES));
            let mut failures = 0;

            for run in 0..runs {
                // Child output goes straight to the inherited stdout.
                self.out.flush()?;

                tracing::debug!(
                    language = %language.name,
                    command = %language.command,
                    path = %path.display(),
                    run = run + 1,
                    of = runs,
                    "invoking"
                );

                let start = Instant::now();
                let outcome = self.executor.execute(&language.command, &path);
                let elapsed = start.elapsed();

                if outcome.is_failure() {
                    failures += 1;
                    tracing::debug!(
                        language = %language.name,
                        path = %path.display(),
                        ?outcome,
                        "invocation failed; timing recorded anyway"
                    );
                }
                samples.push(elapsed);
            }

            let mean = mean_duration(&samples);
            self.out
                .write_all(display::format_time_taken(mean, runs).as_bytes())?;

            timings.push(LanguageTiming {
                language: language.name.clone(),
                path,
                samples,
                failures,
                mean,
            });
        }

        self.out.flush()?;
        Ok(BenchmarkReport {
            benchmark: benchmark.clone(),
            timings,
        })
    }

    /// Run the given benchmarks in order. Reports `NoLanguages` without running
    /// anything when `languages` is empty.
    pub fn run_selected(
        &mut self,
        benchmarks: &[BenchmarkDescriptor],
        languages: &[LanguageDescriptor],
        repeat_count: i64,
    ) -> Result<Vec<BenchmarkReport>> {
        if languages.is_empty() {
            return Err(BenchError::NoLanguages.into());
        }

        let mut reports = Vec::with_capacity(benchmarks.len());
        for benchmark in benchmarks {
            reports.push(self.run_benchmark(benchmark, languages, repeat_count)?);
        }
        Ok(reports)
    }

    /// Run every registered benchmark in registry order.
    pub fn run_all(
        &mut self,
        languages: &[LanguageDescriptor],
        repeat_count: i64,
    ) -> Result<Vec<BenchmarkReport>> {
        let registry = self.registry;
        self.run_selected(registry.benchmarks(), languages, repeat_count)
    }
}
