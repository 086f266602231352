//! Logging capability injected into the schema collector.

use std::sync::Mutex;

/// Sink for the collector's progress and failure events
pub trait SchemaLog: Send + Sync {
    fn info(&self, message: &str);
    fn error(&self, message: &str);
}

/// Forwards events to the `log` crate facade
#[derive(Debug, Clone, Copy, Default)]
pub struct LogFacade;

impl SchemaLog for LogFacade {
    fn info(&self, message: &str) {
        log::info!(target: "schema_dictionary", "{}", message);
    }

    fn error(&self, message: &str) {
        log::error!(target: "schema_dictionary", "{}", message);
    }
}

/// Keeps every event in memory, in emission order
#[derive(Debug, Default)]
pub struct MemoryLog {
    entries: Mutex<Vec<(log::Level, String)>>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of recorded entries
    pub fn entries(&self) -> Vec<(log::Level, String)> {
        match self.entries.lock() {
            Ok(entries) => entries.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Messages recorded at the given level
    pub fn messages(&self, level: log::Level) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m)
            .collect()
    }

    fn push(&self, level: log::Level, message: &str) {
        let mut entries = match self.entries.lock() {
            Ok(entries) => entries,
            Err(poisoned) => poisoned.into_inner(),
        };
        entries.push((level, message.to_string()));
    }
}

impl SchemaLog for MemoryLog {
    fn info(&self, message: &str) {
        self.push(log::Level::Info, message);
    }

    fn error(&self, message: &str) {
        self.push(log::Level::Error, message);
    }
}
