//! Configuration for data dictionary generation.

use serde::Deserialize;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Output format for the data dictionary
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Pretty-printed JSON (2-space indent)
    #[default]
    Json,
    /// YAML block style
    Yaml,
    /// Markdown with an erDiagram block
    Markdown,
    /// Any other value: the raw dictionary is returned unrendered
    Unrecognized(String),
}

impl FromStr for OutputFormat {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            "yaml" | "yml" => OutputFormat::Yaml,
            "markdown" | "md" => OutputFormat::Markdown,
            _ => OutputFormat::Unrecognized(s.to_string()),
        })
    }
}

impl From<String> for OutputFormat {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(format) => format,
            Err(never) => match never {},
        }
    }
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Yaml => write!(f, "yaml"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Unrecognized(s) => write!(f, "{}", s),
        }
    }
}

impl<'de> Deserialize<'de> for OutputFormat {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer).map(OutputFormat::from)
    }
}

impl OutputFormat {
    /// Get file extension for this format
    pub fn extension(&self) -> Option<&'static str> {
        match self {
            OutputFormat::Json => Some("json"),
            OutputFormat::Yaml => Some("yaml"),
            OutputFormat::Markdown => Some("md"),
            OutputFormat::Unrecognized(_) => None,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, OutputFormat::Unrecognized(_))
    }
}

/// Options for a single generation call
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DictionaryConfig {
    pub format: OutputFormat,
}

impl DictionaryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_format(mut self, format: impl Into<OutputFormat>) -> Self {
        self.format = format.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parsing() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("YAML".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
        assert_eq!("yml".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
        assert_eq!(
            "Markdown".parse::<OutputFormat>().unwrap(),
            OutputFormat::Markdown
        );
        assert_eq!(
            "xml".parse::<OutputFormat>().unwrap(),
            OutputFormat::Unrecognized("xml".to_string())
        );
    }

    #[test]
    fn test_default_is_json() {
        assert_eq!(DictionaryConfig::new().format, OutputFormat::Json);
    }

    #[test]
    fn test_config_from_yaml() {
        let config: DictionaryConfig = serde_yaml_ng::from_str("format: markdown").unwrap();
        assert_eq!(config.format, OutputFormat::Markdown);

        let config: DictionaryConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.format, OutputFormat::Json);

        let config: DictionaryConfig = serde_json::from_str(r#"{"format":"csv"}"#).unwrap();
        assert_eq!(config.format, OutputFormat::Unrecognized("csv".to_string()));
        assert_eq!(config.format.extension(), None);
    }
}
