use anyhow::{bail, Result};
use std::sync::Arc;

use crate::application::Configurator;
use crate::domain::ports::ConfigLoaderPort;
use crate::domain::{ConfigureReport, Manifest};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::settings_loader::StoredSettingsLoader;

pub fn build_configurator(config: &AppConfig) -> Configurator {
    let loader: Arc<dyn ConfigLoaderPort> = Arc::new(StoredSettingsLoader::new(config.info_dir()));
    Configurator::new(
        config.root_dir.clone(),
        Manifest::teddy_bot(),
        loader,
        config.completion_rule,
    )
}

/// Runs the first-start file check. Fails when any file could not be
/// created, after every entry has been tried.
pub async fn run_bootstrap(config: &AppConfig) -> Result<ConfigureReport> {
    tokio::fs::create_dir_all(&config.root_dir).await?;
    tracing::debug!(root_dir = %config.root_dir.display(), "ensured bot root directory");

    let report = build_configurator(config).configure().await?;
    ensure_no_failures(&report)?;
    Ok(report)
}

pub fn ensure_no_failures(report: &ConfigureReport) -> Result<()> {
    if !report.has_failures() {
        return Ok(());
    }
    let failed = report
        .failures()
        .map(|error| error.to_string())
        .collect::<Vec<_>>();
    bail!(
        "{} default file(s) could not be created: {}",
        failed.len(),
        failed.join("; ")
    )
}
