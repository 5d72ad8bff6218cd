use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Deserialize;

use crate::errors::BenchError;
use crate::registry::Registry;
use crate::types::{BenchmarkDescriptor, LanguageDescriptor};

/// On-disk registry layout: `[[benchmark]]` and `[[language]]` tables.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RegistryFile {
    #[serde(default, rename = "benchmark")]
    benchmarks: Vec<BenchmarkDescriptor>,
    #[serde(default, rename = "language")]
    languages: Vec<LanguageDescriptor>,
}

/// Where the registry came from, for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrySource {
    File(PathBuf),
    Builtin,
}

/// `<config_dir>/vybench/registry.toml`, if the platform has a config directory.
pub fn default_registry_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("vybench").join("registry.toml"))
}

/// Load from `explicit` if given, else the default path if it exists, else the built-in registry.
pub fn load_registry(explicit: Option<&Path>) -> Result<(Registry, RegistrySource)> {
    if let Some(path) = explicit {
        return Ok((load_registry_file(path)?, RegistrySource::File(path.to_path_buf())));
    }

    match default_registry_path() {
        Some(path) if path.is_file() => {
            let registry = load_registry_file(&path)?;
            Ok((registry, RegistrySource::File(path)))
        }
        _ => Ok((Registry::builtin(), RegistrySource::Builtin)),
    }
}

pub fn load_registry_file(path: &Path) -> Result<Registry> {
    let content = std::fs::read_to_string(path).map_err(|source| BenchError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_registry(&content, path)?)
}

/// Parse and validate registry TOML. `path` is only used in error messages.
pub fn parse_registry(content: &str, path: &Path) -> Result<Registry, BenchError> {
    let file: RegistryFile = toml::from_str(content).map_err(|e| BenchError::ConfigParse {
        path: path.to_path_buf(),
        detail: e.message().to_string(),
    })?;

    let invalid = |detail: String| BenchError::InvalidConfig {
        path: path.to_path_buf(),
        detail,
    };

    if file.benchmarks.is_empty() {
        return Err(invalid("no [[benchmark]] entries".to_string()));
    }
    if file.languages.is_empty() {
        return Err(invalid("no [[language]] entries".to_string()));
    }

    let mut filenames = HashSet::new();
    for bench in &file.benchmarks {
        if bench.filename.trim().is_empty() {
            return Err(invalid(format!("benchmark '{}' has an empty filename", bench.name)));
        }
        if !filenames.insert(bench.filename.as_str()) {
            return Err(invalid(format!("duplicate benchmark filename '{}'", bench.filename)));
        }
    }

    let mut names = HashSet::new();
    for lang in &file.languages {
        if lang.command.trim().is_empty() {
            return Err(invalid(format!("language '{}' has an empty command", lang.name)));
        }
        if !names.insert(lang.name.to_lowercase()) {
            return Err(invalid(format!("duplicate language name '{}'", lang.name)));
        }
    }

    Ok(Registry::new(file.benchmarks, file.languages))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DisplayColor;
    use std::io::Write;

    const SAMPLE: &str = r#"
[[benchmark]]
name = "Fibonacci"
filename = "fib"

[[benchmark]]
name = "Binary Trees"
filename = "binary-trees"

[[language]]
name = "Python"
command = "python3 -O"
directory = "python"
extension = ".py"
color = "yellow"

[[language]]
name = "Lua"
command = "lua"
directory = "lua"
extension = ".lua"
"#;

    fn parse(content: &str) -> Result<Registry, BenchError> {
        parse_registry(content, Path::new("registry.toml"))
    }

    #[test]
    fn parses_sample() {
        let registry = parse(SAMPLE).unwrap();
        assert_eq!(registry.benchmarks().len(), 2);
        assert_eq!(registry.benchmarks()[1].filename, "binary-trees");
        let python = registry.find_language("python").unwrap();
        assert_eq!(python.command, "python3 -O");
        assert_eq!(python.color, DisplayColor::Yellow);
    }

    #[test]
    fn color_defaults_to_white() {
        let registry = parse(SAMPLE).unwrap();
        assert_eq!(registry.find_language("lua").unwrap().color, DisplayColor::White);
    }

    #[test]
    fn rejects_unknown_color() {
        let content = SAMPLE.replace("\"yellow\"", "\"chartreuse\"");
        let err = parse(&content).unwrap_err();
        assert!(matches!(err, BenchError::ConfigParse { .. }));
    }

    #[test]
    fn rejects_missing_field() {
        let content = r#"
[[benchmark]]
name = "Fibonacci"

[[language]]
name = "Lua"
command = "lua"
directory = "lua"
extension = ".lua"
"#;
        let err = parse(content).unwrap_err();
        assert!(matches!(err, BenchError::ConfigParse { .. }));
        assert!(err.to_string().contains("filename"), "got: {err}");
    }

    #[test]
    fn rejects_no_languages() {
        let content = "[[benchmark]]\nname = \"Fibonacci\"\nfilename = \"fib\"\n";
        let err = parse(content).unwrap_err();
        assert!(err.to_string().contains("no [[language]] entries"), "got: {err}");
    }

    #[test]
    fn rejects_no_benchmarks() {
        let content = "[[language]]\nname = \"Lua\"\ncommand = \"lua\"\ndirectory = \"lua\"\nextension = \".lua\"\n";
        let err = parse(content).unwrap_err();
        assert!(err.to_string().contains("no [[benchmark]] entries"), "got: {err}");
    }

    #[test]
    fn rejects_duplicate_filenames() {
        let content = SAMPLE.replace("\"binary-trees\"", "\"fib\"");
        let err = parse(&content).unwrap_err();
        assert!(err.to_string().contains("duplicate benchmark filename 'fib'"), "got: {err}");
    }

    #[test]
    fn rejects_duplicate_language_names_case_insensitive() {
        let content = SAMPLE.replace("name = \"Lua\"", "name = \"PYTHON\"");
        let err = parse(&content).unwrap_err();
        assert!(err.to_string().contains("duplicate language name"), "got: {err}");
    }

    #[test]
    fn rejects_empty_command() {
        let content = SAMPLE.replace("command = \"lua\"", "command = \"  \"");
        let err = parse(&content).unwrap_err();
        assert!(err.to_string().contains("empty command"), "got: {err}");
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let (registry, source) = load_registry(Some(file.path())).unwrap();
        assert_eq!(source, RegistrySource::File(file.path().to_path_buf()));
        assert!(registry.find_benchmark("fib").is_some());
    }

    #[test]
    fn load_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = load_registry_file(&missing).unwrap_err();
        let bench_err = err.downcast_ref::<BenchError>().unwrap();
        assert!(matches!(bench_err, BenchError::ConfigRead { .. }));
    }
}
