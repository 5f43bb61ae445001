use crate::domain::model::{FetchConfig, FetchFailure};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;

/// The single boundary through which units obtain external data. Transports
/// (network, filesystem, memory) implement this; nothing else in the crate
/// knows which one is in play. Implementations never retry — retry policy,
/// if any, belongs to the caller.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn retrieve(
        &self,
        locator: &str,
        config: &FetchConfig,
    ) -> std::result::Result<Value, FetchFailure>;
}

/// Read-only settings a concrete source is built from.
pub trait ConfigProvider: Send + Sync {
    fn endpoint(&self) -> &str;

    fn default_headers(&self) -> Option<&HashMap<String, String>> {
        None
    }

    fn timeout_seconds(&self) -> Option<u64> {
        None
    }
}
