use crate::domain::model::{FieldShape, InputRecord, UnitDefinition};
use crate::utils::error::{ComposeError, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Table of named unit definitions. Registration is write-once per name;
/// resolution hands out shared, immutable definitions.
#[derive(Debug, Default, Clone)]
pub struct ComponentRegistry {
    table: HashMap<String, Arc<UnitDefinition>>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, definition: UnitDefinition) -> Result<()> {
        let name = name.into();
        if self.table.contains_key(&name) {
            return Err(ComposeError::DuplicateNameError { name });
        }
        tracing::debug!("Registering component '{}'", name);
        self.table.insert(name, Arc::new(definition));
        Ok(())
    }

    pub fn resolve(&self, name: &str) -> Result<Arc<UnitDefinition>> {
        self.table
            .get(name)
            .cloned()
            .ok_or_else(|| ComposeError::NotFoundError {
                name: name.to_string(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.table.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Extend behavior by registering a wrapper around an existing definition.
    /// The wrapper's shape is the wrapped shape unioned with `extra_shape`,
    /// its single child is `inner`, and the wrapped definition is left
    /// untouched. Wrapping a wrapper forms a linear delegation chain.
    pub fn register_wrapper<F>(
        &mut self,
        name: impl Into<String>,
        inner: &str,
        extra_shape: FieldShape,
        render: F,
    ) -> Result<()>
    where
        F: Fn(&InputRecord) -> Result<Value> + Send + Sync + 'static,
    {
        let wrapped = self.resolve(inner)?;
        let shape = wrapped.shape().union(&extra_shape);
        let definition = UnitDefinition::new(shape, render).with_child(inner);
        self.register(name, definition)
    }
}
