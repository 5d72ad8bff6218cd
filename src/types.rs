use std::path::PathBuf;
use std::time::Duration;

use owo_colors::AnsiColors;
use serde::{Deserialize, Serialize};

/// A benchmark program, present once per language under the same base filename.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BenchmarkDescriptor {
    pub name: String,
    pub filename: String,
}

impl BenchmarkDescriptor {
    pub fn new(name: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            filename: filename.into(),
        }
    }
}

/// How to invoke one language's runtime against a benchmark file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LanguageDescriptor {
    pub name: String,
    pub command: String,
    pub directory: String,
    pub extension: String,
    #[serde(default)]
    pub color: DisplayColor,
}

impl LanguageDescriptor {
    pub fn new(
        name: impl Into<String>,
        command: impl Into<String>,
        directory: impl Into<String>,
        extension: impl Into<String>,
        color: DisplayColor,
    ) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
            directory: directory.into(),
            extension: extension.into(),
            color,
        }
    }

    /// `directory/filename+extension`, e.g. `python/fib.py`.
    pub fn target_path(&self, benchmark: &BenchmarkDescriptor) -> PathBuf {
        PathBuf::from(&self.directory).join(format!("{}{}", benchmark.filename, self.extension))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    #[default]
    White,
}

impl From<DisplayColor> for AnsiColors {
    fn from(color: DisplayColor) -> Self {
        match color {
            DisplayColor::Black => AnsiColors::Black,
            DisplayColor::Red => AnsiColors::Red,
            DisplayColor::Green => AnsiColors::Green,
            DisplayColor::Yellow => AnsiColors::Yellow,
            DisplayColor::Blue => AnsiColors::Blue,
            DisplayColor::Magenta => AnsiColors::Magenta,
            DisplayColor::Cyan => AnsiColors::Cyan,
            DisplayColor::White => AnsiColors::White,
        }
    }
}

/// Timings for one (benchmark, language) pair.
#[derive(Debug, Clone)]
pub struct LanguageTiming {
    pub language: String,
    pub path: PathBuf,
    pub samples: Vec<Duration>,
    /// Invocations that failed to spawn or exited non-zero. They are still timed.
    pub failures: usize,
    pub mean: Duration,
}

impl LanguageTiming {
    pub fn runs(&self) -> usize {
        self.samples.len()
    }
}

#[derive(Debug, Clone)]
pub struct BenchmarkReport {
    pub benchmark: BenchmarkDescriptor,
    pub timings: Vec<LanguageTiming>,
}

impl BenchmarkReport {
    pub fn failures(&self) -> usize {
        self.timings.iter().map(|t| t.failures).sum()
    }
}
