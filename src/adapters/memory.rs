use crate::domain::model::{FetchConfig, FetchFailure};
use crate::domain::ports::DataSource;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;

/// In-memory transport: a fixture table keyed by locator. The default choice
/// for tests and for scenes that carry their data inline.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    fixtures: HashMap<String, Value>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_table(fixtures: HashMap<String, Value>) -> Self {
        Self { fixtures }
    }

    pub fn with_fixture(mut self, locator: impl Into<String>, value: Value) -> Self {
        self.fixtures.insert(locator.into(), value);
        self
    }
}

#[async_trait]
impl DataSource for MemorySource {
    async fn retrieve(
        &self,
        locator: &str,
        _config: &FetchConfig,
    ) -> std::result::Result<Value, FetchFailure> {
        self.fixtures
            .get(locator)
            .cloned()
            .ok_or_else(|| FetchFailure::new(locator, "no fixture for locator"))
    }
}
