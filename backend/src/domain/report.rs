use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::domain::error::SetupError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntryStatus {
    Created,
    AlreadyPresent,
    Failed(SetupError),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryOutcome {
    pub path: PathBuf,
    pub status: EntryStatus,
}

impl EntryOutcome {
    pub fn new(path: impl Into<PathBuf>, status: EntryStatus) -> Self {
        Self {
            path: path.into(),
            status,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self.status, EntryStatus::Created)
    }

    pub fn error(&self) -> Option<&SetupError> {
        match &self.status {
            EntryStatus::Failed(error) => Some(error),
            _ => None,
        }
    }
}

/// How the manifest pass and the settings loader combine into the final
/// "configured" report.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CompletionRule {
    /// The loader result replaces whatever the manifest pass found.
    #[default]
    LoaderOverrides,
    /// Configured when either the manifest pass created a file or the
    /// loader reports pending setup.
    Either,
}

impl CompletionRule {
    pub fn combine(self, manifest_configured: bool, loader_configured: bool) -> bool {
        match self {
            Self::LoaderOverrides => loader_configured,
            Self::Either => manifest_configured || loader_configured,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "loader_overrides" | "override" => Some(Self::LoaderOverrides),
            "either" | "or" => Some(Self::Either),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigureReport {
    pub outcomes: Vec<EntryOutcome>,
    /// `None` when the loader was skipped because an entry failed.
    pub loader_configured: Option<bool>,
    pub rule: CompletionRule,
}

impl ConfigureReport {
    pub fn manifest_configured(&self) -> bool {
        self.outcomes.iter().any(EntryOutcome::is_created)
    }

    pub fn configured(&self) -> bool {
        let manifest = self.manifest_configured();
        match self.loader_configured {
            Some(loader) => self.rule.combine(manifest, loader),
            None => manifest,
        }
    }

    pub fn created(&self) -> impl Iterator<Item = &Path> {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.is_created())
            .map(|outcome| outcome.path.as_path())
    }

    pub fn failures(&self) -> impl Iterator<Item = &SetupError> {
        self.outcomes.iter().filter_map(EntryOutcome::error)
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }
}
