use crate::domain::model::InputRecord;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{ComposeError, Result};
use crate::utils::validation::{
    validate_component_name, validate_path, validate_required_field, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneConfig {
    pub scene: SceneMeta,
    pub root: RootConfig,
    pub source: Option<SourceConfig>,
    pub components: Option<Vec<ComponentConfig>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneMeta {
    pub name: String,
    pub description: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootConfig {
    pub component: String,
    pub input: Option<HashMap<String, toml::Value>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub r#type: String,
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub headers: Option<HashMap<String, String>>,
    pub fixtures: Option<HashMap<String, toml::Value>>,
}

/// 場景宣告的元件：容器（children）、包裝器（wraps + extra_fields）、
/// 或綁定遠端資料的面板（source_locator + source_field）。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentConfig {
    pub name: String,
    pub fields: Option<Vec<String>>,
    pub children: Option<Vec<String>>,
    pub wraps: Option<String>,
    pub extra_fields: Option<Vec<String>>,
    pub source_locator: Option<String>,
    pub source_field: Option<String>,
}

impl SceneConfig {
    /// 從 TOML 檔案載入場景配置
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: SceneConfig = toml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_str(raw: &str) -> Result<Self> {
        let config: SceneConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// The root input record, converted from the TOML table.
    pub fn root_input(&self) -> InputRecord {
        let mut record = InputRecord::new();
        if let Some(input) = &self.root.input {
            for (name, value) in input {
                record = record.with(name, toml_to_json(value));
            }
        }
        record
    }

    pub fn source_kind(&self) -> &str {
        self.source
            .as_ref()
            .map(|s| s.r#type.as_str())
            .unwrap_or("memory")
    }
}

impl ConfigProvider for SourceConfig {
    fn endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or("")
    }

    fn default_headers(&self) -> Option<&HashMap<String, String>> {
        self.headers.as_ref()
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.timeout_seconds
    }
}

impl Validate for SceneConfig {
    fn validate(&self) -> Result<()> {
        validate_component_name("root.component", &self.root.component)?;

        if let Some(source) = &self.source {
            match source.r#type.as_str() {
                "http" => {
                    let endpoint =
                        validate_required_field("source.endpoint", &source.endpoint)?;
                    validate_url("source.endpoint", endpoint)?;
                }
                "file" => {
                    let endpoint =
                        validate_required_field("source.endpoint", &source.endpoint)?;
                    validate_path("source.endpoint", endpoint)?;
                }
                "memory" => {}
                other => {
                    return Err(ComposeError::InvalidConfigValueError {
                        field: "source.type".to_string(),
                        value: other.to_string(),
                        reason: "Supported source types: http, file, memory".to_string(),
                    })
                }
            }
        }

        for component in self.components.iter().flatten() {
            validate_component_name("components.name", &component.name)?;

            if component.wraps.is_some() && component.children.is_some() {
                return Err(ComposeError::ConfigError {
                    message: format!(
                        "component '{}' declares both 'wraps' and 'children'",
                        component.name
                    ),
                });
            }
            if component.source_locator.is_some() {
                validate_required_field("components.source_field", &component.source_field)?;
            }
        }

        Ok(())
    }
}

/// TOML 值轉成 JSON 值（datetime 以字串表示）
pub fn toml_to_json(value: &toml::Value) -> serde_json::Value {
    match value {
        toml::Value::String(s) => serde_json::Value::String(s.clone()),
        toml::Value::Integer(i) => serde_json::Value::Number((*i).into()),
        toml::Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        toml::Value::Boolean(b) => serde_json::Value::Bool(*b),
        toml::Value::Datetime(dt) => serde_json::Value::String(dt.to_string()),
        toml::Value::Array(items) => {
            serde_json::Value::Array(items.iter().map(toml_to_json).collect())
        }
        toml::Value::Table(table) => serde_json::Value::Object(
            table
                .iter()
                .map(|(k, v)| (k.clone(), toml_to_json(v)))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const MINIMAL: &str = r#"
[scene]
name = "demo"
description = "Minimal scene"
version = "0.1.0"

[root]
component = "text"

[root.input]
text = "hello"
"#;

    #[test]
    fn parses_a_minimal_scene() {
        let config = SceneConfig::from_str(MINIMAL).unwrap();
        assert_eq!(config.scene.name, "demo");
        assert_eq!(config.root.component, "text");
        assert_eq!(config.source_kind(), "memory");

        let input = config.root_input();
        assert_eq!(input.get("text"), Some(&json!("hello")));
    }

    #[test]
    fn parses_sources_components_and_fixtures() {
        let raw = r#"
[scene]
name = "dashboard"
description = "Full scene"
version = "0.2.0"

[root]
component = "user_panel"

[source]
type = "memory"

[source.fixtures."/users"]
count = 2

[[components]]
name = "user_panel"
source_locator = "/users"
source_field = "users"

[[components]]
name = "icon_button"
wraps = "button"
extra_fields = ["icon"]
"#;
        let config = SceneConfig::from_str(raw).unwrap();
        let source = config.source.as_ref().unwrap();
        assert_eq!(source.r#type, "memory");
        assert!(source.fixtures.as_ref().unwrap().contains_key("/users"));

        let components = config.components.as_ref().unwrap();
        assert_eq!(components.len(), 2);
        assert_eq!(components[0].source_locator.as_deref(), Some("/users"));
        assert_eq!(components[1].wraps.as_deref(), Some("button"));
    }

    #[test]
    fn http_source_requires_a_valid_endpoint() {
        let raw = r#"
[scene]
name = "bad"
description = ""
version = "0"

[root]
component = "text"

[source]
type = "http"
"#;
        let err = SceneConfig::from_str(raw).unwrap_err();
        assert!(matches!(err, ComposeError::MissingConfigError { .. }));

        let raw_bad_url = raw.replace("type = \"http\"", "type = \"http\"\nendpoint = \"ftp://x\"");
        let err = SceneConfig::from_str(&raw_bad_url).unwrap_err();
        assert!(matches!(err, ComposeError::InvalidConfigValueError { .. }));
    }

    #[test]
    fn unknown_source_type_is_rejected() {
        let raw = r#"
[scene]
name = "bad"
description = ""
version = "0"

[root]
component = "text"

[source]
type = "carrier-pigeon"
"#;
        let err = SceneConfig::from_str(raw).unwrap_err();
        assert!(matches!(
            err,
            ComposeError::InvalidConfigValueError { ref field, .. } if field == "source.type"
        ));
    }

    #[test]
    fn wrapper_and_children_are_mutually_exclusive() {
        let raw = r#"
[scene]
name = "bad"
description = ""
version = "0"

[root]
component = "x"

[[components]]
name = "x"
wraps = "y"
children = ["z"]
"#;
        let err = SceneConfig::from_str(raw).unwrap_err();
        assert!(matches!(err, ComposeError::ConfigError { .. }));
    }

    #[test]
    fn toml_values_convert_to_json() {
        let value: toml::Value = toml::from_str(
            r#"
s = "str"
i = 3
f = 1.5
b = true
a = [1, 2]

[t]
nested = "yes"
"#,
        )
        .unwrap();

        let json = toml_to_json(&value);
        assert_eq!(json["s"], json!("str"));
        assert_eq!(json["i"], json!(3));
        assert_eq!(json["f"], json!(1.5));
        assert_eq!(json["b"], json!(true));
        assert_eq!(json["a"], json!([1, 2]));
        assert_eq!(json["t"]["nested"], json!("yes"));
    }
}
