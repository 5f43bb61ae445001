use serde_json::json;
use small_compose::adapters::MemorySource;
use small_compose::{ComponentRegistry, Composer, FieldShape, InputRecord, UnitDefinition};

fn registry_with_button() -> ComponentRegistry {
    let mut registry = ComponentRegistry::new();
    registry
        .register(
            "button",
            UnitDefinition::new(FieldShape::new(["text"]), |record| {
                Ok(json!({ "kind": "button", "text": record.get("text") }))
            }),
        )
        .unwrap();
    registry
}

#[tokio::test]
async fn test_icon_button_wraps_button_without_altering_it() {
    let mut registry = registry_with_button();
    registry
        .register_wrapper("icon_button", "button", FieldShape::new(["icon"]), |record| {
            Ok(json!({ "kind": "icon_decoration", "icon": record.get("icon") }))
        })
        .unwrap();

    let composer = Composer::new(registry, MemorySource::new());
    let input = InputRecord::new()
        .with("text", json!("Submit"))
        .with("icon", json!("heart"));

    let tree = composer.compose("icon_button", &input).await.unwrap();

    // The wrapper adds its decoration from the full input...
    assert_eq!(tree.output["icon"], json!("heart"));

    // ...and delegates to a plain button render that saw only {text}.
    assert_eq!(tree.children.len(), 1);
    let button = &tree.children[0];
    assert_eq!(button.component, "button");
    assert_eq!(button.output, json!({ "kind": "button", "text": "Submit" }));
}

#[tokio::test]
async fn test_wrapped_button_standalone_behavior_is_unchanged() {
    let mut registry = registry_with_button();
    registry
        .register_wrapper("icon_button", "button", FieldShape::new(["icon"]), |record| {
            Ok(json!({ "icon": record.get("icon") }))
        })
        .unwrap();

    let composer = Composer::new(registry, MemorySource::new());

    // Composing the wrapped definition directly behaves exactly as before
    // the wrapper existed, including with surplus input fields present.
    let input = InputRecord::new()
        .with("text", json!("Submit"))
        .with("icon", json!("heart"));
    let standalone = composer.compose("button", &input).await.unwrap();

    assert_eq!(
        standalone.output,
        json!({ "kind": "button", "text": "Submit" })
    );
    assert!(standalone.children.is_empty());

    // Its declared shape is also untouched.
    let def = composer.registry().resolve("button").unwrap();
    assert_eq!(def.shape().len(), 1);
    assert!(def.shape().contains("text"));
}

#[tokio::test]
async fn test_wrapping_a_wrapper_forms_a_linear_chain() {
    let mut registry = registry_with_button();
    registry
        .register_wrapper("icon_button", "button", FieldShape::new(["icon"]), |record| {
            Ok(json!({ "icon": record.get("icon") }))
        })
        .unwrap();
    registry
        .register_wrapper(
            "glow_icon_button",
            "icon_button",
            FieldShape::new(["glow"]),
            |record| Ok(json!({ "glow": record.get("glow") })),
        )
        .unwrap();

    let composer = Composer::new(registry, MemorySource::new());
    let input = InputRecord::new()
        .with("text", json!("Submit"))
        .with("icon", json!("heart"))
        .with("glow", json!("soft"));

    let tree = composer.compose("glow_icon_button", &input).await.unwrap();

    // glow_icon_button -> icon_button -> button, one hop each.
    assert_eq!(tree.output["glow"], json!("soft"));
    assert_eq!(tree.children.len(), 1);

    let icon = &tree.children[0];
    assert_eq!(icon.component, "icon_button");
    assert_eq!(icon.output["icon"], json!("heart"));
    assert_eq!(icon.children.len(), 1);

    let button = &icon.children[0];
    assert_eq!(button.component, "button");
    assert_eq!(button.output, json!({ "kind": "button", "text": "Submit" }));
    assert!(button.children.is_empty());
}

#[tokio::test]
async fn test_wrapper_input_missing_extra_field_fails_composition() {
    let mut registry = registry_with_button();
    registry
        .register_wrapper("icon_button", "button", FieldShape::new(["icon"]), |record| {
            Ok(json!({ "icon": record.get("icon") }))
        })
        .unwrap();

    let composer = Composer::new(registry, MemorySource::new());
    let input = InputRecord::new().with("text", json!("Submit"));

    let err = composer.compose("icon_button", &input).await.unwrap_err();
    assert!(matches!(
        err,
        small_compose::ComposeError::CompositionError { ref component, .. }
            if component == "icon_button"
    ));
}
