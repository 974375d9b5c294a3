//! distrib.toml configuration parser.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{LoadError, LoadResult};
use crate::types::DEFAULT_SENTINEL;

/// File name looked up in the working directory when no config is given.
pub const CONFIG_FILE_NAME: &str = "distrib.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DistribConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub allocation: AllocationConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputConfig {
    pub files: Option<PathBuf>,
    pub nodes: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: Option<OutputFormat>,
    pub path: Option<PathBuf>,
    pub chart: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationConfig {
    #[serde(default = "default_sentinel")]
    pub sentinel: String,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            sentinel: default_sentinel(),
        }
    }
}

fn default_sentinel() -> String {
    DEFAULT_SENTINEL.to_string()
}

/// The sentinel is written as the second column of space-separated output,
/// so it must be a single non-empty token.
pub fn validate_sentinel(label: &str) -> LoadResult<()> {
    if label.is_empty() {
        return Err(LoadError::Config("sentinel must not be empty".to_string()));
    }
    if label.chars().any(char::is_whitespace) {
        return Err(LoadError::Config(format!(
            "sentinel '{label}' must not contain whitespace"
        )));
    }
    Ok(())
}

/// How the allocation is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Csv,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{other}' (expected text, csv or json)")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Text => "text",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        })
    }
}

impl DistribConfig {
    pub fn from_file(path: &Path) -> LoadResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> LoadResult<Self> {
        let config: DistribConfig =
            toml::from_str(content).map_err(|e| LoadError::Config(e.to_string()))?;
        validate_sentinel(&config.allocation.sentinel)?;
        Ok(config)
    }

    /// Load `explicit` if given, else `distrib.toml` in `dir` if it exists,
    /// else the defaults.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> LoadResult<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "using config");
            Self::from_file(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    pub fn to_toml_string(&self) -> LoadResult<String> {
        toml::to_string_pretty(self).map_err(|e| LoadError::Config(e.to_string()))
    }

    /// Scaffold a distrib.toml pointing at the conventional input files.
    pub fn scaffold() -> Self {
        DistribConfig {
            input: InputConfig {
                files: Some(PathBuf::from("files.txt")),
                nodes: Some(PathBuf::from("nodes.txt")),
            },
            output: OutputConfig {
                format: Some(OutputFormat::Text),
                path: None,
                chart: None,
            },
            allocation: AllocationConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaffold() {
        let config = DistribConfig::scaffold();
        let toml_str = config.to_toml_string().unwrap();
        assert!(toml_str.contains("files.txt"));
        assert!(toml_str.contains("nodes.txt"));
        assert!(toml_str.contains("NULL"));

        let parsed = DistribConfig::from_toml_str(&toml_str).unwrap();
        assert_eq!(parsed.output.format, Some(OutputFormat::Text));
    }

    #[test]
    fn test_parse_empty() {
        let config = DistribConfig::from_toml_str("").unwrap();
        assert!(config.input.files.is_none());
        assert_eq!(config.allocation.sentinel, "NULL");
    }

    #[test]
    fn test_parse_full() {
        let toml_str = r#"
[input]
files = "in/files.txt"
nodes = "in/nodes.txt"

[output]
format = "csv"
path = "out.txt"
chart = "chart.svg"

[allocation]
sentinel = "NONE"
"#;
        let config = DistribConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.input.files, Some(PathBuf::from("in/files.txt")));
        assert_eq!(config.output.format, Some(OutputFormat::Csv));
        assert_eq!(config.output.chart, Some(PathBuf::from("chart.svg")));
        assert_eq!(config.allocation.sentinel, "NONE");
    }

    #[test]
    fn test_rejects_unknown_format() {
        let err = DistribConfig::from_toml_str("[output]\nformat = \"xml\"\n").unwrap_err();
        assert!(matches!(err, LoadError::Config(_)));
    }

    #[test]
    fn test_rejects_blank_sentinel() {
        let err = DistribConfig::from_toml_str("[allocation]\nsentinel = \" \"\n").unwrap_err();
        assert!(err.to_string().contains("sentinel"));
    }

    #[test]
    fn test_rejects_sentinel_with_whitespace() {
        let err = DistribConfig::from_toml_str("[allocation]\nsentinel = \"no node\"\n").unwrap_err();
        assert!(matches!(err, LoadError::Config(ref msg) if msg.contains("whitespace")), "{err}");

        assert!(DistribConfig::from_toml_str("[allocation]\nsentinel = \"\"\n").is_err());
    }

    #[test]
    fn test_validate_sentinel() {
        assert!(validate_sentinel("NULL").is_ok());
        assert!(validate_sentinel("-").is_ok());
        assert!(validate_sentinel("").is_err());
        assert!(validate_sentinel("a\tb").is_err());
        assert!(validate_sentinel(" NULL").is_err());
    }

    #[test]
    fn test_discover_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = DistribConfig::discover(None, dir.path()).unwrap();
        assert!(config.input.nodes.is_none());

        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[input]\nnodes = \"n.txt\"\n").unwrap();
        let config = DistribConfig::discover(None, dir.path()).unwrap();
        assert_eq!(config.input.nodes, Some(PathBuf::from("n.txt")));
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("yaml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::Csv.to_string(), "csv");
    }
}
