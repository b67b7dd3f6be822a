use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::ports::ConfigLoaderPort;
use crate::domain::{
    CompletionRule, ConfigureReport, DefaultFileEntry, DefaultPayload, EntryOutcome, EntryStatus,
    Manifest,
};
use crate::infrastructure::files;

pub const SUMMARY_COMPLETE: &str = "Configuration complete.";
pub const SUMMARY_CAUTION: &str =
    "The bot will not work properly until the created files are populated with accurate information, if applicable.";

/// Seeds every missing manifest file under `root_dir`, then asks the
/// loader whether setup is still pending.
#[derive(Clone)]
pub struct Configurator {
    root_dir: PathBuf,
    manifest: Manifest,
    loader: Arc<dyn ConfigLoaderPort>,
    rule: CompletionRule,
}

impl Configurator {
    pub fn new(
        root_dir: impl Into<PathBuf>,
        manifest: Manifest,
        loader: Arc<dyn ConfigLoaderPort>,
        rule: CompletionRule,
    ) -> Self {
        Self {
            root_dir: root_dir.into(),
            manifest,
            loader,
            rule,
        }
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn rule(&self) -> CompletionRule {
        self.rule
    }

    pub async fn configure(&self) -> Result<ConfigureReport> {
        let mut outcomes = Vec::with_capacity(self.manifest.len());
        for entry in self.manifest.entries() {
            outcomes.push(self.apply_entry(entry).await);
        }

        let failed = outcomes.iter().filter(|outcome| outcome.error().is_some()).count();
        let loader_configured = if failed > 0 {
            tracing::warn!(failed, "skipping config loader after failed entries");
            None
        } else {
            let pending = self
                .loader
                .load_config()
                .await
                .context("failed to load stored configuration")?;
            Some(pending)
        };

        let report = ConfigureReport {
            outcomes,
            loader_configured,
            rule: self.rule,
        };
        tracing::debug!(
            created = report.created().count(),
            manifest_configured = report.manifest_configured(),
            loader_configured = ?report.loader_configured,
            rule = ?report.rule,
            "manifest pass finished"
        );

        if report.configured() {
            tracing::info!("{SUMMARY_COMPLETE}");
            tracing::warn!("{SUMMARY_CAUTION}");
        }
        Ok(report)
    }

    /// Checks one entry and creates it when absent. Never replaces an
    /// existing file.
    pub async fn apply_entry(&self, entry: &DefaultFileEntry) -> EntryOutcome {
        let target = self.root_dir.join(&entry.path);
        let status = match files::file_exists(&target).await {
            Ok(true) => EntryStatus::AlreadyPresent,
            Ok(false) => self.create(entry, &target).await,
            Err(error) => EntryStatus::Failed(error),
        };
        EntryOutcome::new(entry.path.clone(), status)
    }

    async fn create(&self, entry: &DefaultFileEntry, target: &Path) -> EntryStatus {
        tracing::info!(path = %entry.path.display(), kind = entry.kind.as_str(), "{}", entry.announcement);

        let written = match &entry.payload {
            DefaultPayload::Inline(content) => files::write_new_file(target, content.as_bytes()).await,
            DefaultPayload::CopyFrom(source) => {
                files::copy_new_file(&self.root_dir.join(source), target).await
            }
        };

        match written {
            Ok(()) => {
                tracing::info!(path = %entry.path.display(), "{}", entry.confirmation);
                EntryStatus::Created
            }
            Err(error) => {
                tracing::error!(
                    path = %entry.path.display(),
                    code = error.code_str(),
                    error = %error.message(),
                    "failed to create default file"
                );
                EntryStatus::Failed(error)
            }
        }
    }
}
