use crate::adapters::{FileSource, HttpSource, MemorySource};
use crate::app::catalog;
use crate::config::scene::{toml_to_json, SceneConfig, SourceConfig};
use crate::core::composer::Composer;
use crate::core::producer::SourceHandle;
use crate::domain::model::RenderNode;
use crate::utils::error::{ComposeError, Result};
use crate::utils::monitor::PassMonitor;
use std::collections::HashMap;

/// Runs one composition pass for a scene: registry from the catalog plus the
/// scene's declarations, source adapter from the `[source]` section, compose
/// from the root.
pub struct SceneRunner {
    scene: SceneConfig,
    endpoint_override: Option<String>,
    monitor_enabled: bool,
}

impl SceneRunner {
    pub fn new(scene: SceneConfig) -> Self {
        Self::new_with_monitoring(scene, false)
    }

    pub fn new_with_monitoring(scene: SceneConfig, monitor_enabled: bool) -> Self {
        Self {
            scene,
            endpoint_override: None,
            monitor_enabled,
        }
    }

    /// Replace the scene's HTTP endpoint. Rejected at run time for non-http
    /// sources.
    pub fn with_endpoint_override(mut self, endpoint: Option<String>) -> Self {
        self.endpoint_override = endpoint;
        self
    }

    pub async fn run(&self) -> Result<RenderNode> {
        println!("Composing scene '{}'...", self.scene.scene.name);
        let monitor = PassMonitor::new(self.monitor_enabled);

        let mut registry = catalog::standard_registry()?;
        if let Some(components) = &self.scene.components {
            catalog::apply_scene_components(&mut registry, components)?;
        }
        tracing::debug!("Registry holds {} components", registry.len());

        let source = self.build_source()?;
        let composer = Composer::with_handle(registry, source);

        let input = self.scene.root_input();
        let tree = composer.compose(&self.scene.root.component, &input).await?;

        println!(
            "Rendered {} nodes ({} failed)",
            tree.node_count(),
            tree.collect_failures().len()
        );
        monitor.log_stats(&tree);

        Ok(tree)
    }

    // 依 [source] 區段挑選傳輸層；沒有宣告時用空的記憶體來源
    fn build_source(&self) -> Result<SourceHandle> {
        let kind = self.scene.source_kind();

        if self.endpoint_override.is_some() && kind != "http" {
            return Err(ComposeError::ConfigError {
                message: format!("endpoint override only applies to http sources, not '{}'", kind),
            });
        }

        match (kind, &self.scene.source) {
            ("http", Some(source)) => {
                let effective = match &self.endpoint_override {
                    Some(endpoint) => SourceConfig {
                        endpoint: Some(endpoint.clone()),
                        ..source.clone()
                    },
                    None => source.clone(),
                };
                Ok(SourceHandle::new(HttpSource::from_config(&effective)?))
            }
            ("file", Some(source)) => {
                let base = source.endpoint.as_deref().unwrap_or(".");
                Ok(SourceHandle::new(FileSource::new(base)))
            }
            ("memory", Some(source)) => {
                let mut fixtures = HashMap::new();
                for (locator, value) in source.fixtures.iter().flatten() {
                    fixtures.insert(locator.clone(), toml_to_json(value));
                }
                Ok(SourceHandle::new(MemorySource::from_table(fixtures)))
            }
            (_, None) => Ok(SourceHandle::new(MemorySource::new())),
            (other, Some(_)) => Err(ComposeError::InvalidConfigValueError {
                field: "source.type".to_string(),
                value: other.to_string(),
                reason: "Supported source types: http, file, memory".to_string(),
            }),
        }
    }
}
