use crate::domain::model::FetchFailure;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("Component '{name}' is already registered")]
    DuplicateNameError { name: String },

    #[error("Component '{name}' is not registered")]
    NotFoundError { name: String },

    #[error("Composition failed for '{component}': {reason}")]
    CompositionError { component: String, reason: String },

    #[error(transparent)]
    FetchError(#[from] FetchFailure),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Registry,
    Composition,
    Fetch,
    Config,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ComposeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::DuplicateNameError { .. } | Self::NotFoundError { .. } => ErrorCategory::Registry,
            Self::CompositionError { .. } => ErrorCategory::Composition,
            Self::FetchError(_) => ErrorCategory::Fetch,
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. }
            | Self::TomlError(_) => ErrorCategory::Config,
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // Fetch failures are data errors; the pass can still report a tree.
            Self::FetchError(_) => ErrorSeverity::Medium,
            Self::DuplicateNameError { .. }
            | Self::NotFoundError { .. }
            | Self::CompositionError { .. } => ErrorSeverity::High,
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. }
            | Self::TomlError(_) => ErrorSeverity::High,
            Self::IoError(_) | Self::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::DuplicateNameError { name } => {
                format!(
                    "Pick a different name or wrap '{}' instead of re-registering it",
                    name
                )
            }
            Self::NotFoundError { name } => {
                format!(
                    "Register '{}' before composing, or fix the child declaration",
                    name
                )
            }
            Self::CompositionError { .. } => {
                "Check that the input record carries every field the component declares"
                    .to_string()
            }
            Self::FetchError(failure) => {
                format!(
                    "Verify that '{}' is reachable from the configured source",
                    failure.locator
                )
            }
            Self::ConfigError { .. } | Self::TomlError(_) => {
                "Review the scene file against the documented schema".to_string()
            }
            Self::InvalidConfigValueError { field, .. } => {
                format!("Correct the value of '{}' in the scene or CLI flags", field)
            }
            Self::MissingConfigError { field } => {
                format!("Add the required '{}' setting", field)
            }
            Self::IoError(_) => "Check file paths and permissions".to_string(),
            Self::SerializationError(_) => "Check that the data is valid JSON".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Registry => format!("Component registry problem: {}", self),
            ErrorCategory::Composition => format!("Scene could not be composed: {}", self),
            ErrorCategory::Fetch => format!("Data retrieval failed: {}", self),
            ErrorCategory::Config => format!("Configuration problem: {}", self),
            ErrorCategory::System => format!("System problem: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ComposeError>;
