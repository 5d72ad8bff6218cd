use crate::types::{BenchmarkDescriptor, DisplayColor, LanguageDescriptor};

/// Ordered benchmark and language lists the runner draws from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    benchmarks: Vec<BenchmarkDescriptor>,
    languages: Vec<LanguageDescriptor>,
}

impl Registry {
    pub fn new(benchmarks: Vec<BenchmarkDescriptor>, languages: Vec<LanguageDescriptor>) -> Self {
        Self {
            benchmarks,
            languages,
        }
    }

    /// The benchmark suite shipped with the Vyse repository.
    pub fn builtin() -> Self {
        Self::new(
            vec![
                BenchmarkDescriptor::new("Binary Trees", "binary-trees"),
                BenchmarkDescriptor::new("Fibonacci", "fib"),
                BenchmarkDescriptor::new("Method Calls", "method-call"),
            ],
            vec![
                LanguageDescriptor::new("Vyse", "../bin/vy", "vyse", ".vy", DisplayColor::Cyan),
                LanguageDescriptor::new("Lua", "lua", "lua", ".lua", DisplayColor::Blue),
                LanguageDescriptor::new("Python", "python", "python", ".py", DisplayColor::Yellow),
            ],
        )
    }

    pub fn benchmarks(&self) -> &[BenchmarkDescriptor] {
        &self.benchmarks
    }

    pub fn languages(&self) -> &[LanguageDescriptor] {
        &self.languages
    }

    /// Exact match on the base filename.
    pub fn find_benchmark(&self, filename: &str) -> Option<&BenchmarkDescriptor> {
        self.benchmarks.iter().find(|b| b.filename == filename)
    }

    /// Case-insensitive match on the language name.
    pub fn find_language(&self, name: &str) -> Option<&LanguageDescriptor> {
        self.languages
            .iter()
            .find(|l| l.name.to_lowercase() == name.to_lowercase())
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}
