//! Data dictionary generation from database schema metadata.
//!
//! Metadata is read through a [`SchemaIntrospector`], assembled into a
//! [`DataDictionary`] and rendered as JSON, YAML or Markdown with a Mermaid
//! entity-relationship diagram.

pub mod config;
pub mod error;
pub mod generate;
pub mod introspect;
pub mod json_schema;
pub mod logging;
pub mod render;
pub mod schema;
pub mod snapshot;

pub use config::{DictionaryConfig, OutputFormat};
pub use error::{IntrospectionError, IntrospectionStage};
pub use generate::{generate_data_dictionary, DataDictionaryGenerator, DictionaryOutput};
pub use introspect::{
    ColumnAttributes, DescribedColumn, ForeignKeyDescriptor, SchemaIntrospector, TableDescription,
};
pub use logging::{LogFacade, MemoryLog, SchemaLog};
pub use render::{render_diagram, render_json, render_markdown, render_yaml};
pub use schema::{ColumnDescriptor, DataDictionary, StructuredDictionary, TableDocument};
pub use snapshot::{SchemaSnapshot, SnapshotTable};
