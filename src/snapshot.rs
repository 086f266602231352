//! Schema snapshots: captured metadata served back as an introspection source.
//!
//! A snapshot is a JSON or YAML document listing tables with their column
//! descriptions, foreign keys and indexes, in the shape the introspection
//! calls return them:
//!
//! ```yaml
//! tables:
//!   - name: Users
//!     columns:
//!       id: { type: INTEGER, allowNull: false, primaryKey: true }
//!     foreignKeys: []
//!     indexes: []
//! ```

use crate::introspect::{ForeignKeyDescriptor, SchemaIntrospector, TableDescription};
use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// One table of a snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotTable {
    pub name: String,
    #[serde(default)]
    pub columns: TableDescription,
    #[serde(default)]
    pub foreign_keys: Vec<ForeignKeyDescriptor>,
    #[serde(default)]
    pub indexes: Vec<Value>,
}

impl SnapshotTable {
    pub fn new(name: impl Into<String>, columns: TableDescription) -> Self {
        Self {
            name: name.into(),
            columns,
            foreign_keys: Vec::new(),
            indexes: Vec::new(),
        }
    }

    pub fn with_foreign_key(mut self, fk: ForeignKeyDescriptor) -> Self {
        self.foreign_keys.push(fk);
        self
    }

    pub fn with_index(mut self, index: Value) -> Self {
        self.indexes.push(index);
        self
    }
}

/// Captured schema metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaSnapshot {
    #[serde(default)]
    pub tables: Vec<SnapshotTable>,
}

impl SchemaSnapshot {
    pub fn new(tables: Vec<SnapshotTable>) -> Self {
        Self { tables }
    }

    pub fn from_json_str(s: &str) -> anyhow::Result<Self> {
        serde_json::from_str(s).context("Failed to parse JSON schema snapshot")
    }

    pub fn from_yaml_str(s: &str) -> anyhow::Result<Self> {
        serde_yaml_ng::from_str(s).context("Failed to parse YAML schema snapshot")
    }

    /// Load a snapshot file; `.json` is read as JSON, anything else as YAML
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read schema snapshot: {:?}", path))?;

        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        let snapshot = if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        };
        snapshot.with_context(|| format!("Invalid schema snapshot: {:?}", path))
    }

    fn table(&self, name: &str) -> anyhow::Result<&SnapshotTable> {
        self.tables
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| anyhow::anyhow!("No description found for \"{}\" table", name))
    }
}

#[async_trait]
impl SchemaIntrospector for SchemaSnapshot {
    async fn list_tables(&self) -> anyhow::Result<Vec<String>> {
        Ok(self.tables.iter().map(|t| t.name.clone()).collect())
    }

    async fn describe_table(&self, table: &str) -> anyhow::Result<TableDescription> {
        Ok(self.table(table)?.columns.clone())
    }

    async fn foreign_keys(&self, table: &str) -> anyhow::Result<Vec<ForeignKeyDescriptor>> {
        Ok(self.table(table)?.foreign_keys.clone())
    }

    async fn indexes(&self, table: &str) -> anyhow::Result<Vec<Value>> {
        Ok(self.table(table)?.indexes.clone())
    }
}
