use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::errors::BenchError;
use crate::types::BenchmarkReport;

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: String,
    repeat_count: usize,
    benchmarks: Vec<JsonBenchmark<'a>>,
}

#[derive(Serialize)]
struct JsonBenchmark<'a> {
    name: &'a str,
    filename: &'a str,
    timings: Vec<JsonTiming<'a>>,
}

#[derive(Serialize)]
struct JsonTiming<'a> {
    language: &'a str,
    path: String,
    runs: usize,
    failures: usize,
    mean_secs: f64,
    samples_secs: Vec<f64>,
}

pub fn format_json(reports: &[BenchmarkReport], repeat_count: usize, now: DateTime<Utc>) -> String {
    let report = JsonReport {
        generated_at: now.to_rfc3339_opts(SecondsFormat::Secs, true),
        repeat_count,
        benchmarks: reports
            .iter()
            .map(|r| JsonBenchmark {
                name: &r.benchmark.name,
                filename: &r.benchmark.filename,
                timings: r
                    .timings
                    .iter()
                    .map(|t| JsonTiming {
                        language: &t.language,
                        path: t.path.to_string_lossy().to_string(),
                        runs: t.runs(),
                        failures: t.failures,
                        mean_secs: t.mean.as_secs_f64(),
                        samples_secs: t.samples.iter().map(|d| d.as_secs_f64()).collect(),
                    })
                    .collect(),
            })
            .collect(),
    };

    serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_string())
}

pub fn write_json(
    path: &Path,
    reports: &[BenchmarkReport],
    repeat_count: usize,
    now: DateTime<Utc>,
) -> Result<()> {
    let mut json = format_json(reports, repeat_count, now);
    json.push('\n');
    std::fs::write(path, json).map_err(|source| BenchError::ReportWrite {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}
