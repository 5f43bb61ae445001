pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use app::runner::SceneRunner;
pub use config::SceneConfig;
pub use core::composer::Composer;
pub use core::producer::{FetchOutcome, Producer, SourceHandle};
pub use core::registry::ComponentRegistry;
pub use domain::model::{
    BindingSpec, FetchConfig, FetchFailure, FieldShape, InputRecord, RenderNode, RenderState,
    UnitDefinition,
};
pub use domain::ports::{ConfigProvider, DataSource};
pub use utils::error::{ComposeError, Result};
