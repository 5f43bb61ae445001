pub mod scene;

pub use scene::{ComponentConfig, RootConfig, SceneConfig, SceneMeta, SourceConfig};

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_path, validate_url, Validate};
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "small-compose")]
#[command(about = "Compose a rendered scene from a TOML description")]
pub struct CliConfig {
    /// Scene description file
    #[arg(long, default_value = "scene.toml")]
    pub scene: String,

    /// Override the scene's source endpoint
    #[arg(long)]
    pub endpoint: Option<String>,

    #[arg(long, help = "Pretty-print the rendered tree")]
    pub pretty: bool,

    #[arg(long, help = "Log per-pass composition stats")]
    pub monitor: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("scene", &self.scene)?;
        if let Some(endpoint) = &self.endpoint {
            // Overrides only make sense for http sources; file/memory scenes
            // reject the flag at runner level.
            validate_url("endpoint", endpoint)?;
        }
        Ok(())
    }
}
