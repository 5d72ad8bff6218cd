use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum BenchError {
    #[error("No benchmark named '{filename}'. Run with --list to see available benchmarks")]
    BenchmarkNotFound { filename: String },

    #[error("No such language '{name}'. Run with --list to see available languages")]
    LanguageNotFound { name: String },

    #[error("No such language")]
    NoLanguages,

    #[error("Failed to read registry file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse registry file {path}: {detail}")]
    ConfigParse { path: PathBuf, detail: String },

    #[error("Invalid registry file {path}: {detail}")]
    InvalidConfig { path: PathBuf, detail: String },

    #[error("Failed to write report {path}: {source}")]
    ReportWrite {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl BenchError {
    /// Selection misses are reported to the user but are not run failures.
    pub fn is_selection_miss(&self) -> bool {
        matches!(
            self,
            BenchError::BenchmarkNotFound { .. }
                | BenchError::LanguageNotFound { .. }
                | BenchError::NoLanguages
        )
    }
}
