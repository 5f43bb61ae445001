pub mod composer;
pub mod producer;
pub mod registry;

pub use crate::domain::model::{
    BindingSpec, FetchConfig, FetchFailure, FieldShape, InputRecord, RenderNode, RenderState,
    UnitDefinition,
};
pub use crate::domain::ports::{ConfigProvider, DataSource};
pub use crate::utils::error::Result;
