//! The data dictionary generation entry point.

use crate::config::DictionaryConfig;
use crate::error::IntrospectionError;
use crate::introspect::SchemaIntrospector;
use crate::logging::{LogFacade, SchemaLog};
use crate::render;
use crate::schema::{DataDictionary, SchemaCollector};

/// Result of a generation call
#[derive(Debug, Clone, PartialEq)]
pub enum DictionaryOutput {
    /// Rendered JSON, YAML or Markdown
    Text(String),
    /// The unrendered dictionary, returned for an unrecognized format
    Raw(DataDictionary),
}

impl DictionaryOutput {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            DictionaryOutput::Text(text) => Some(text),
            DictionaryOutput::Raw(_) => None,
        }
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            DictionaryOutput::Text(text) => Some(text),
            DictionaryOutput::Raw(_) => None,
        }
    }

    pub fn into_raw(self) -> Option<DataDictionary> {
        match self {
            DictionaryOutput::Raw(dictionary) => Some(dictionary),
            DictionaryOutput::Text(_) => None,
        }
    }
}

/// Collects a fresh dictionary on every call and renders it
pub struct DataDictionaryGenerator<'a> {
    introspector: &'a dyn SchemaIntrospector,
    log: &'a dyn SchemaLog,
}

impl<'a> DataDictionaryGenerator<'a> {
    pub fn new(introspector: &'a dyn SchemaIntrospector) -> Self {
        Self {
            introspector,
            log: &LogFacade,
        }
    }

    pub fn with_log(mut self, log: &'a dyn SchemaLog) -> Self {
        self.log = log;
        self
    }

    pub async fn generate(
        &self,
        config: &DictionaryConfig,
    ) -> Result<DictionaryOutput, IntrospectionError> {
        let dictionary = SchemaCollector::new(self.introspector)
            .with_log(self.log)
            .collect()
            .await?;

        Ok(match render::render(&dictionary, &config.format) {
            Some(text) => DictionaryOutput::Text(text),
            None => {
                self.log.info(&format!(
                    "Unrecognized format \"{}\", returning the raw dictionary",
                    config.format
                ));
                DictionaryOutput::Raw(dictionary)
            }
        })
    }
}

/// Generate a data dictionary, logging through the `log` facade
pub async fn generate_data_dictionary(
    introspector: &dyn SchemaIntrospector,
    config: &DictionaryConfig,
) -> Result<DictionaryOutput, IntrospectionError> {
    DataDictionaryGenerator::new(introspector)
        .generate(config)
        .await
}
