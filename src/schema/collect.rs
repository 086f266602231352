//! Schema collection from an introspection source.

use super::{DataDictionary, TableDocument};
use crate::error::{IntrospectionError, IntrospectionStage};
use crate::introspect::SchemaIntrospector;
use crate::logging::{LogFacade, SchemaLog};

/// Walks every table of an introspection source and builds a [`DataDictionary`].
///
/// Tables are processed one after another, and within a table the column,
/// foreign key and index calls are awaited in sequence, so at most one request
/// is outstanding against the source at any time.
pub struct SchemaCollector<'a> {
    introspector: &'a dyn SchemaIntrospector,
    log: &'a dyn SchemaLog,
}

impl<'a> SchemaCollector<'a> {
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

    /// Build a fresh dictionary. The first failing call aborts the whole run;
    /// nothing collected so far is returned.
    pub async fn collect(&self) -> Result<DataDictionary, IntrospectionError> {
        let tables = self
            .introspector
            .list_tables()
            .await
            .map_err(|e| self.fail(IntrospectionStage::ListTables, e))?;

        self.log
            .info(&format!("Found {} tables to document", tables.len()));

        let mut dictionary = DataDictionary::new();
        for table in tables {
            let document = self.collect_table(&table).await?;
            self.log.info(&format!(
                "Processed table {} ({} columns, {} foreign keys, {} indexes)",
                table,
                document.columns.len(),
                document.foreign_keys.len(),
                document.indexes.len()
            ));
            dictionary.insert(document);
        }

        Ok(dictionary)
    }

    async fn collect_table(&self, table: &str) -> Result<TableDocument, IntrospectionError> {
        let description = self
            .introspector
            .describe_table(table)
            .await
            .map_err(|e| self.fail(IntrospectionStage::DescribeTable(table.to_string()), e))?;

        let foreign_keys = self
            .introspector
            .foreign_keys(table)
            .await
            .map_err(|e| self.fail(IntrospectionStage::ForeignKeys(table.to_string()), e))?;

        let indexes = self
            .introspector
            .indexes(table)
            .await
            .map_err(|e| self.fail(IntrospectionStage::Indexes(table.to_string()), e))?;

        Ok(TableDocument::new(table, description, foreign_keys, indexes))
    }

    fn fail(&self, stage: IntrospectionStage, source: anyhow::Error) -> IntrospectionError {
        let err = IntrospectionError::new(stage, source);
        self.log.error(&format!("Error generating data dictionary: {}", err));
        err
    }
}

/// Collect with the default `log` facade
pub async fn collect(
    introspector: &dyn SchemaIntrospector,
) -> Result<DataDictionary, IntrospectionError> {
    SchemaCollector::new(introspector).collect().await
}
