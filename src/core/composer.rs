use crate::core::producer::{FetchOutcome, SourceHandle};
use crate::core::registry::ComponentRegistry;
use crate::domain::model::{InputRecord, RenderNode, RenderState};
use crate::domain::ports::DataSource;
use crate::utils::error::{ComposeError, Result};
use std::future::Future;
use std::pin::Pin;

/// 組合引擎：從根元件開始遞迴組裝渲染樹。
///
/// Each unit only ever sees the projection of the available data onto its
/// declared shape; the full parent record is never passed through. Renders
/// are synchronous and pure — the only suspension point is producer
/// settlement, so concurrent `compose` calls share no mutable state.
pub struct Composer {
    registry: ComponentRegistry,
    source: SourceHandle,
}

impl Composer {
    pub fn new(registry: ComponentRegistry, source: impl DataSource + 'static) -> Self {
        Self {
            registry,
            source: SourceHandle::new(source),
        }
    }

    pub fn with_handle(registry: ComponentRegistry, source: SourceHandle) -> Self {
        Self { registry, source }
    }

    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    pub async fn compose(&self, root: &str, input: &InputRecord) -> Result<RenderNode> {
        tracing::debug!("Composing scene from root '{}'", root);
        self.compose_unit(root.to_string(), input.clone(), Vec::new())
            .await
    }

    fn compose_unit(
        &self,
        name: String,
        available: InputRecord,
        ancestors: Vec<String>,
    ) -> Pin<Box<dyn Future<Output = Result<RenderNode>> + Send + '_>> {
        Box::pin(async move {
            // 檢查元件鏈是否成環
            if ancestors.contains(&name) {
                return Err(ComposeError::CompositionError {
                    component: name.clone(),
                    reason: format!("cycle detected: {} -> {}", ancestors.join(" -> "), name),
                });
            }

            let definition = self.registry.resolve(&name)?;

            // 投影前先確認宣告的欄位都拿得到
            let missing = definition.shape().missing_from(&available);
            if !missing.is_empty() {
                return Err(ComposeError::CompositionError {
                    component: name.clone(),
                    reason: format!(
                        "declared shape cannot be satisfied, missing fields: {}",
                        missing.join(", ")
                    ),
                });
            }
            let mut record = available.project(definition.shape());

            // Binding lifecycle: the producer is created here, settled once,
            // and dropped when this unit's node completes.
            if let Some(binding) = definition.binding() {
                tracing::debug!("Fetching '{}' for component '{}'", binding.locator, name);
                let producer = self.source.fetch(&binding.locator, binding.config.clone());
                match producer.settle().await {
                    FetchOutcome::Success(value) => {
                        record = record.with(binding.field.clone(), value);
                    }
                    FetchOutcome::Failure(failure) => {
                        tracing::warn!(
                            "Component '{}' failed to fetch '{}': {}",
                            name,
                            failure.locator,
                            failure.reason
                        );
                        // Well-defined failed node; the pass itself keeps going.
                        return Ok(RenderNode::failed(name, failure));
                    }
                }
            }

            let output = definition.render(&record)?;

            let mut chain = ancestors;
            chain.push(name.clone());

            // 子元件只拿到父元件有效記錄中、其形狀宣告的部分
            let mut children = Vec::new();
            for child in definition.children() {
                let node = self
                    .compose_unit(child.clone(), record.clone(), chain.clone())
                    .await?;
                children.push(node);
            }

            Ok(RenderNode {
                component: name,
                output,
                state: RenderState::Rendered,
                children,
            })
        })
    }
}
