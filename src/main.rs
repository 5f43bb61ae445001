use clap::Parser;
use small_compose::utils::{logger, validation::Validate};
use small_compose::{CliConfig, SceneConfig, SceneRunner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting small-compose CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if config.monitor {
        tracing::info!("🔍 Pass monitoring enabled");
    }

    let scene = match SceneConfig::from_file(&config.scene) {
        Ok(scene) => scene,
        Err(e) => {
            tracing::error!("❌ Failed to load scene '{}': {}", config.scene, e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    let runner = SceneRunner::new_with_monitoring(scene, config.monitor)
        .with_endpoint_override(config.endpoint.clone());

    match runner.run().await {
        Ok(tree) => {
            let failures = tree.collect_failures().len();
            let rendered = if config.pretty {
                serde_json::to_string_pretty(&tree)?
            } else {
                serde_json::to_string(&tree)?
            };
            println!("{}", rendered);

            if failures > 0 {
                tracing::warn!("⚠️ Scene rendered with {} failed node(s)", failures);
            } else {
                tracing::info!("✅ Scene rendered successfully");
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Composition failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                small_compose::utils::error::ErrorSeverity::Low => 0,
                small_compose::utils::error::ErrorSeverity::Medium => 2,
                small_compose::utils::error::ErrorSeverity::High => 1,
                small_compose::utils::error::ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
