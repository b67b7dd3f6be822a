use anyhow::Result;
use teddy_bot_backend::infrastructure::config::AppConfig;
use teddy_bot_backend::infrastructure::logging::init_logging;
use teddy_bot_backend::runtime::run_bootstrap;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;

    let logging_runtime = init_logging(&config)?;
    info!(
        root_dir = %config.root_dir.display(),
        config_file = %config.config_path.display(),
        log_file = %logging_runtime.log_file.display(),
        log_level = %config.log_level,
        completion_rule = ?config.completion_rule,
        "teddybot bootstrap logging initialized"
    );

    let outcome = run_bootstrap(&config).await;
    match &outcome {
        Ok(report) => info!(
            created = report.created().count(),
            configured = report.configured(),
            "teddybot bootstrap finished"
        ),
        Err(error) => tracing::error!(error = %format!("{error:#}"), "teddybot bootstrap failed"),
    }

    drop(logging_runtime);
    outcome.map(|_| ())
}
