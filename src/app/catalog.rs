use crate::config::scene::ComponentConfig;
use crate::core::registry::ComponentRegistry;
use crate::domain::model::{BindingSpec, FieldShape, InputRecord, UnitDefinition};
use crate::utils::error::{ComposeError, Result};
use serde_json::{json, Map, Value};

fn record_to_value(record: &InputRecord) -> Value {
    let mut map = Map::new();
    for (name, value) in record.iter() {
        map.insert(name.to_string(), value.clone());
    }
    Value::Object(map)
}

/// 內建元件集：場景配置在這個基礎上疊加自己的宣告。
pub fn standard_registry() -> Result<ComponentRegistry> {
    let mut registry = ComponentRegistry::new();

    registry.register(
        "text",
        UnitDefinition::new(FieldShape::new(["text"]), |record| {
            Ok(json!({ "kind": "text", "text": record.get("text") }))
        }),
    )?;

    registry.register(
        "badge",
        UnitDefinition::new(FieldShape::new(["label"]), |record| {
            Ok(json!({ "kind": "badge", "label": record.get("label") }))
        }),
    )?;

    registry.register(
        "button",
        UnitDefinition::new(FieldShape::new(["text"]), |record| {
            Ok(json!({ "kind": "button", "text": record.get("text") }))
        }),
    )?;

    registry.register(
        "list",
        UnitDefinition::new(FieldShape::new(["items"]), |record| {
            Ok(json!({ "kind": "list", "items": record.get("items") }))
        }),
    )?;

    Ok(registry)
}

/// Layer `[[components]]` entries from a scene onto the registry, in
/// declaration order. Wrappers must name an already-registered component.
pub fn apply_scene_components(
    registry: &mut ComponentRegistry,
    components: &[ComponentConfig],
) -> Result<()> {
    for config in components {
        if let Some(inner) = &config.wraps {
            register_wrapper_component(registry, config, inner)?;
        } else if let Some(locator) = &config.source_locator {
            register_source_component(registry, config, locator)?;
        } else if config.children.is_some() {
            register_container_component(registry, config)?;
        } else {
            register_record_component(registry, config)?;
        }
    }
    Ok(())
}

/// 包裝器：形狀 = 被包裝元件的形狀 ∪ extra_fields，輸出裝飾欄位並委派給內層。
fn register_wrapper_component(
    registry: &mut ComponentRegistry,
    config: &ComponentConfig,
    inner: &str,
) -> Result<()> {
    let extra = FieldShape::new(config.extra_fields.clone().unwrap_or_default());
    let decoration_fields: Vec<String> = extra.iter().map(String::from).collect();
    let name = config.name.clone();

    registry.register_wrapper(&config.name, inner, extra, move |record| {
        let mut decoration = Map::new();
        for field in &decoration_fields {
            if let Some(value) = record.get(field) {
                decoration.insert(field.clone(), value.clone());
            }
        }
        Ok(json!({
            "kind": "decorated",
            "name": name,
            "with": Value::Object(decoration),
        }))
    })
}

fn register_source_component(
    registry: &mut ComponentRegistry,
    config: &ComponentConfig,
    locator: &str,
) -> Result<()> {
    let field = config
        .source_field
        .clone()
        .ok_or_else(|| ComposeError::MissingConfigError {
            field: "components.source_field".to_string(),
        })?;
    let shape = FieldShape::new(config.fields.clone().unwrap_or_default());
    let name = config.name.clone();
    let output_field = field.clone();

    let definition = UnitDefinition::new(shape, move |record| {
        Ok(json!({
            "kind": "panel",
            "name": name,
            "data": record.get(&output_field),
        }))
    })
    .with_binding(BindingSpec::new(locator, field));

    registry.register(&config.name, definition)
}

fn register_container_component(
    registry: &mut ComponentRegistry,
    config: &ComponentConfig,
) -> Result<()> {
    let shape = FieldShape::new(config.fields.clone().unwrap_or_default());
    let name = config.name.clone();

    let mut definition = UnitDefinition::new(shape, move |_| {
        Ok(json!({ "kind": "container", "name": name }))
    });
    for child in config.children.iter().flatten() {
        definition = definition.with_child(child);
    }

    registry.register(&config.name, definition)
}

fn register_record_component(
    registry: &mut ComponentRegistry,
    config: &ComponentConfig,
) -> Result<()> {
    let shape = FieldShape::new(config.fields.clone().unwrap_or_default());
    let definition = UnitDefinition::new(shape, |record| {
        Ok(json!({ "kind": "record", "fields": record_to_value(record) }))
    });
    registry.register(&config.name, definition)
}
