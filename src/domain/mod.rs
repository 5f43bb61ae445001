// Domain layer: core models and ports (interfaces). No external dependencies
// beyond serde/indexmap where needed.

pub mod model;
pub mod ports;
