use crate::utils::error::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// An immutable, insertion-ordered set of named fields handed to a unit at
/// render time. Owned by the caller; units only ever see `&InputRecord`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputRecord {
    fields: IndexMap<String, Value>,
}

impl InputRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// New record holding only the fields named by `shape`, in the shape's
    /// declaration order. Absent fields are simply not carried; callers check
    /// `FieldShape::missing_from` first when absence is an error.
    pub fn project(&self, shape: &FieldShape) -> InputRecord {
        let mut projected = InputRecord::new();
        for name in shape.iter() {
            if let Some(value) = self.fields.get(name) {
                projected = projected.with(name, value.clone());
            }
        }
        projected
    }
}

impl FromIterator<(String, Value)> for InputRecord {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// The explicit set of fields a unit declares reading. A unit never gets
/// implicit access to a larger enclosing record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldShape {
    fields: Vec<String>,
}

impl FieldShape {
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = Vec::new();
        for field in fields {
            let field = field.into();
            if !seen.contains(&field) {
                seen.push(field);
            }
        }
        Self { fields: seen }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn union(&self, other: &FieldShape) -> FieldShape {
        FieldShape::new(self.iter().chain(other.iter()))
    }

    /// Declared fields the record does not carry.
    pub fn missing_from(&self, record: &InputRecord) -> Vec<String> {
        self.fields
            .iter()
            .filter(|f| !record.contains(f))
            .cloned()
            .collect()
    }
}

/// Request settings for a single fetch: method, headers, body. All optional;
/// transports pick their own defaults (HTTP defaults to GET).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FetchConfig {
    pub method: Option<String>,
    pub headers: Option<HashMap<String, String>>,
    pub body: Option<Value>,
}

/// The failure half of a settled fetch. Carried as a value: into `RenderState`
/// for the consuming unit, or into `ComposeError::FetchError` for callers.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[error("Fetch failed for '{locator}': {reason}")]
pub struct FetchFailure {
    pub locator: String,
    pub reason: String,
}

impl FetchFailure {
    pub fn new(locator: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            locator: locator.into(),
            reason: reason.into(),
        }
    }
}

/// Association between a retrieval key and the field the settled value lands
/// in. Created when the composer reaches the unit, dropped when its node
/// completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BindingSpec {
    pub locator: String,
    pub field: String,
    #[serde(default)]
    pub config: FetchConfig,
}

impl BindingSpec {
    pub fn new(locator: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            locator: locator.into(),
            field: field.into(),
            config: FetchConfig::default(),
        }
    }

    pub fn with_config(mut self, config: FetchConfig) -> Self {
        self.config = config;
        self
    }
}

pub type RenderFn = Arc<dyn Fn(&InputRecord) -> Result<Value> + Send + Sync>;

/// A pure mapping from a projected input record to a renderable output, plus
/// the child components and optional data binding it declares. The name lives
/// in the registry, not here.
#[derive(Clone)]
pub struct UnitDefinition {
    shape: FieldShape,
    render: RenderFn,
    children: Vec<String>,
    binding: Option<BindingSpec>,
}

impl UnitDefinition {
    pub fn new<F>(shape: FieldShape, render: F) -> Self
    where
        F: Fn(&InputRecord) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            shape,
            render: Arc::new(render),
            children: Vec::new(),
            binding: None,
        }
    }

    pub fn with_child(mut self, name: impl Into<String>) -> Self {
        self.children.push(name.into());
        self
    }

    pub fn with_binding(mut self, binding: BindingSpec) -> Self {
        self.binding = Some(binding);
        self
    }

    pub fn shape(&self) -> &FieldShape {
        &self.shape
    }

    pub fn children(&self) -> &[String] {
        &self.children
    }

    pub fn binding(&self) -> Option<&BindingSpec> {
        self.binding.as_ref()
    }

    pub fn render(&self, record: &InputRecord) -> Result<Value> {
        (self.render)(record)
    }
}

impl fmt::Debug for UnitDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnitDefinition")
            .field("shape", &self.shape)
            .field("children", &self.children)
            .field("binding", &self.binding)
            .finish_non_exhaustive()
    }
}

/// One node of a composed tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderNode {
    pub component: String,
    pub output: Value,
    pub state: RenderState,
    pub children: Vec<RenderNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RenderState {
    Rendered,
    Failed { failure: FetchFailure },
}

impl RenderNode {
    pub fn rendered(component: impl Into<String>, output: Value) -> Self {
        Self {
            component: component.into(),
            output,
            state: RenderState::Rendered,
            children: Vec::new(),
        }
    }

    /// A unit whose binding settled with Failure renders as exactly this: no
    /// output, no children, the failure value attached.
    pub fn failed(component: impl Into<String>, failure: FetchFailure) -> Self {
        Self {
            component: component.into(),
            output: Value::Null,
            state: RenderState::Failed { failure },
            children: Vec::new(),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.state, RenderState::Failed { .. })
    }

    pub fn failure(&self) -> Option<&FetchFailure> {
        match &self.state {
            RenderState::Failed { failure } => Some(failure),
            RenderState::Rendered => None,
        }
    }

    /// All failures in the tree, depth-first.
    pub fn collect_failures(&self) -> Vec<&FetchFailure> {
        let mut failures = Vec::new();
        if let Some(failure) = self.failure() {
            failures.push(failure);
        }
        for child in &self.children {
            failures.extend(child.collect_failures());
        }
        failures
    }

    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(RenderNode::node_count).sum::<usize>()
    }

    /// Depth-first lookup by component name.
    pub fn find(&self, component: &str) -> Option<&RenderNode> {
        if self.component == component {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(component))
    }
}
