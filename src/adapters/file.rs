use crate::domain::model::{FetchConfig, FetchFailure};
use crate::domain::ports::DataSource;
use async_trait::async_trait;
use serde_json::Value;
use std::path::Path;

/// Filesystem transport: locators name JSON documents under a base directory.
#[derive(Debug, Clone)]
pub struct FileSource {
    base_path: String,
}

impl FileSource {
    pub fn new(base_path: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

#[async_trait]
impl DataSource for FileSource {
    async fn retrieve(
        &self,
        locator: &str,
        _config: &FetchConfig,
    ) -> std::result::Result<Value, FetchFailure> {
        let full_path = Path::new(&self.base_path).join(locator.trim_start_matches('/'));
        tracing::debug!("Reading document {}", full_path.display());

        let raw = std::fs::read_to_string(&full_path)
            .map_err(|e| FetchFailure::new(locator, format!("read failed: {}", e)))?;

        serde_json::from_str(&raw)
            .map_err(|e| FetchFailure::new(locator, format!("invalid JSON document: {}", e)))
    }
}
