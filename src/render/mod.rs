//! Output format implementations for the data dictionary.

mod markdown;
mod mermaid;

pub use markdown::render_markdown;
pub use mermaid::render_diagram;

use crate::config::OutputFormat;
use crate::schema::{to_structured, DataDictionary};

/// Pretty-printed JSON of the structured form (2-space indent)
pub fn render_json(dictionary: &DataDictionary) -> String {
    serde_json::to_string_pretty(&to_structured(dictionary)).unwrap_or_else(|_| "{}".to_string())
}

/// YAML of the structured form, identical in content to [`render_json`]
pub fn render_yaml(dictionary: &DataDictionary) -> String {
    serde_yaml_ng::to_string(&to_structured(dictionary)).unwrap_or_default()
}

/// Render in the requested format; `None` for an unrecognized format
pub fn render(dictionary: &DataDictionary, format: &OutputFormat) -> Option<String> {
    match format {
        OutputFormat::Json => Some(render_json(dictionary)),
        OutputFormat::Yaml => Some(render_yaml(dictionary)),
        OutputFormat::Markdown => Some(render_markdown(dictionary)),
        OutputFormat::Unrecognized(_) => None,
    }
}
