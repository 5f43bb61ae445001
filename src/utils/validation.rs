use crate::utils::error::{ComposeError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(ComposeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ComposeError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(ComposeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ComposeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ComposeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// Component names double as registry keys and child references, so keep them
/// to a predictable charset.
pub fn validate_component_name(field_name: &str, name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ComposeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: "Component name cannot be empty".to_string(),
        });
    }

    let valid = name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-');
    if !valid {
        return Err(ComposeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: "Component names use lowercase ascii, digits, '_' and '-'".to_string(),
        });
    }

    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| ComposeError::MissingConfigError {
        field: field_name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_http_and_https_urls() {
        assert!(validate_url("endpoint", "https://api.example.com").is_ok());
        assert!(validate_url("endpoint", "http://localhost:8080").is_ok());
    }

    #[test]
    fn rejects_other_schemes_and_garbage() {
        assert!(validate_url("endpoint", "ftp://example.com").is_err());
        assert!(validate_url("endpoint", "not a url").is_err());
        assert!(validate_url("endpoint", "").is_err());
    }

    #[test]
    fn rejects_empty_and_null_byte_paths() {
        assert!(validate_path("dir", "").is_err());
        assert!(validate_path("dir", "a\0b").is_err());
        assert!(validate_path("dir", "./fixtures").is_ok());
    }

    #[test]
    fn component_names_are_constrained() {
        assert!(validate_component_name("name", "icon_button").is_ok());
        assert!(validate_component_name("name", "nav-bar2").is_ok());
        assert!(validate_component_name("name", "").is_err());
        assert!(validate_component_name("name", "IconButton").is_err());
        assert!(validate_component_name("name", "has space").is_err());
    }

    #[test]
    fn required_field_reports_the_field_name() {
        let missing: Option<String> = None;
        let err = validate_required_field("root.component", &missing).unwrap_err();
        assert!(matches!(
            err,
            ComposeError::MissingConfigError { ref field } if field == "root.component"
        ));
    }
}
