//! Error types for schema collection.

use std::fmt;
use thiserror::Error;

/// The introspection call that was in progress when a failure occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntrospectionStage {
    /// Listing the table names
    ListTables,
    /// Describing the columns of a table
    DescribeTable(String),
    /// Listing the foreign keys of a table
    ForeignKeys(String),
    /// Listing the indexes of a table
    Indexes(String),
}

impl IntrospectionStage {
    /// Table being processed, if the stage is table-scoped
    pub fn table(&self) -> Option<&str> {
        match self {
            IntrospectionStage::ListTables => None,
            IntrospectionStage::DescribeTable(t)
            | IntrospectionStage::ForeignKeys(t)
            | IntrospectionStage::Indexes(t) => Some(t),
        }
    }
}

impl fmt::Display for IntrospectionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntrospectionStage::ListTables => write!(f, "listing tables"),
            IntrospectionStage::DescribeTable(t) => write!(f, "describing table {}", t),
            IntrospectionStage::ForeignKeys(t) => {
                write!(f, "listing foreign keys of table {}", t)
            }
            IntrospectionStage::Indexes(t) => write!(f, "listing indexes of table {}", t),
        }
    }
}

/// Failure of the underlying introspection capability.
///
/// The wrapped error is whatever the capability reported; it is not
/// interpreted, only tagged with the stage that was running.
#[derive(Error, Debug)]
#[error("Introspection failed while {stage}: {source}")]
pub struct IntrospectionError {
    stage: IntrospectionStage,
    #[source]
    source: anyhow::Error,
}

impl IntrospectionError {
    pub fn new(stage: IntrospectionStage, source: anyhow::Error) -> Self {
        Self { stage, source }
    }

    pub fn stage(&self) -> &IntrospectionStage {
        &self.stage
    }

    pub fn table(&self) -> Option<&str> {
        self.stage.table()
    }

    /// The error raised by the capability
    pub fn inner(&self) -> &anyhow::Error {
        &self.source
    }

    pub fn into_inner(self) -> anyhow::Error {
        self.source
    }
}
