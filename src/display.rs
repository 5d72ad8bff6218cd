use std::time::Duration;

use owo_colors::{AnsiColors, OwoColorize, Stream, Style};

use crate::registry::Registry;
use crate::types::{BenchmarkDescriptor, LanguageDescriptor};

fn style_header() -> Style {
    Style::new().bold()
}

/// Turns color off for the rest of the process, regardless of terminal support.
pub fn disable_color() {
    owo_colors::set_override(false);
}

/// Format a duration as fractional seconds with microsecond precision.
pub fn format_seconds(duration: Duration) -> String {
    format!("{:.6}s", duration.as_secs_f64())
}

/// `--- Fibonacci ---`
pub fn format_header(benchmark: &BenchmarkDescriptor) -> String {
    let header = format!("--- {} ---", benchmark.name);
    format!(
        "{}\n",
        header.if_supports_color(Stream::Stdout, |s| s.style(style_header()))
    )
}

/// `Running on lang: Python`, with the language name in its display color.
pub fn format_running(language: &LanguageDescriptor) -> String {
    let color: AnsiColors = language.color.into();
    format!(
        "Running on lang: {}\n",
        language
            .name
            .if_supports_color(Stream::Stdout, |s| s.color(color))
    )
}

/// The averaged timing line printed after the last run of a language.
pub fn format_time_taken(mean: Duration, runs: usize) -> String {
    let secs = format_seconds(mean);
    let secs_colored = secs
        .if_supports_color(Stream::Stdout, |s| s.green())
        .to_string();
    if runs > 1 {
        format!("Time taken: {} (avg of {} runs)\n\n", secs_colored, runs)
    } else {
        format!("Time taken: {}\n\n", secs_colored)
    }
}

/// Listing for `--list`: benchmarks first, then languages with their invocation.
pub fn format_listing(registry: &Registry) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{}\n",
        "Benchmarks:".if_supports_color(Stream::Stdout, |s| s.style(style_header()))
    ));
    let name_width = registry
        .benchmarks()
        .iter()
        .map(|b| b.filename.len())
        .max()
        .unwrap_or(0);
    for bench in registry.benchmarks() {
        out.push_str(&format!(
            "  {:<width$}  {}\n",
            bench.filename,
            bench.name,
            width = name_width
        ));
    }

    out.push('\n');
    out.push_str(&format!(
        "{}\n",
        "Languages:".if_supports_color(Stream::Stdout, |s| s.style(style_header()))
    ));
    let lang_width = registry
        .languages()
        .iter()
        .map(|l| l.name.len())
        .max()
        .unwrap_or(0);
    for lang in registry.languages() {
        let color: AnsiColors = lang.color.into();
        let padded = format!("{:<width$}", lang.name, width = lang_width);
        let example = lang.target_path(&BenchmarkDescriptor::new("", "<bench>"));
        out.push_str(&format!(
            "  {}  {} {}\n",
            padded.if_supports_color(Stream::Stdout, |s| s.color(color)),
            lang.command,
            example.display()
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DisplayColor;

    // Colors may or may not be emitted depending on the terminal running the
    // tests, so assertions only look at substrings that are never split by escapes.

    fn python() -> LanguageDescriptor {
        LanguageDescriptor::new("Python", "python", "python", ".py", DisplayColor::Yellow)
    }

    #[test]
    fn seconds_microsecond_precision() {
        assert_eq!(format_seconds(Duration::from_millis(1500)), "1.500000s");
        assert_eq!(format_seconds(Duration::ZERO), "0.000000s");
        assert_eq!(format_seconds(Duration::from_micros(12)), "0.000012s");
    }

    #[test]
    fn header_line() {
        let bench = BenchmarkDescriptor::new("Fibonacci", "fib");
        assert!(format_header(&bench).contains("--- Fibonacci ---"));
    }

    #[test]
    fn running_line() {
        let line = format_running(&python());
        assert!(line.starts_with("Running on lang: "));
        assert!(line.contains("Python"));
    }

    #[test]
    fn time_taken_single_run() {
        let line = format_time_taken(Duration::from_millis(250), 1);
        assert!(line.contains("Time taken: "));
        assert!(line.contains("0.250000s"));
        assert!(!line.contains("avg of"));
    }

    #[test]
    fn time_taken_multiple_runs() {
        let line = format_time_taken(Duration::from_millis(250), 3);
        assert!(line.contains("0.250000s"));
        assert!(line.contains("(avg of 3 runs)"));
    }

    #[test]
    fn listing_contains_everything() {
        let out = format_listing(&Registry::builtin());
        assert!(out.contains("Benchmarks:"));
        assert!(out.contains("binary-trees"));
        assert!(out.contains("Method Calls"));
        assert!(out.contains("Languages:"));
        assert!(out.contains("../bin/vy"));
        assert!(out.contains("Lua"));
    }

    #[test]
    fn listing_empty_registry() {
        let out = format_listing(&Registry::new(vec![], vec![]));
        assert!(out.contains("Benchmarks:"));
        assert!(out.contains("Languages:"));
    }
}
