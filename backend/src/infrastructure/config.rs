use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::manifest::INFO_DIR;
use crate::domain::CompletionRule;
use crate::infrastructure::runtime_assets::DEFAULT_BOOTSTRAP_JSON;

const DEFAULT_CONFIG_FILE_NAME: &str = "teddybot.json";
const DEFAULT_LOG_DIR: &str = "logs";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub root_dir: PathBuf,
    pub config_path: PathBuf,
    pub log_level: String,
    pub log_retention_days: u16,
    pub log_dir: PathBuf,
    pub completion_rule: CompletionRule,
}

impl Default for AppConfig {
    fn default() -> Self {
        let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::defaults_for_root(cwd)
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::load_from(EnvOverrides::from_env()?, cwd)
    }

    pub fn load_from(overrides: EnvOverrides, cwd: PathBuf) -> Result<Self> {
        let root_dir = match &overrides.root_dir {
            Some(root) => resolve_against(&cwd, root),
            None => cwd,
        };
        let config_path = match &overrides.config_path {
            Some(path) => resolve_against(&root_dir, path),
            None => default_config_path_for_root(&root_dir),
        };
        ensure_file_exists_with_default(&config_path, DEFAULT_BOOTSTRAP_JSON)?;
        let file_config = read_config_file(&config_path)?;
        let mut app = Self::from_inputs(file_config, overrides, root_dir);
        app.config_path = config_path;
        Ok(app)
    }

    pub fn from_inputs(
        file_config: BootstrapFileConfig,
        overrides: EnvOverrides,
        root_dir: PathBuf,
    ) -> Self {
        let mut config = Self::defaults_for_root(root_dir);
        // Priority: defaults < config file < env overrides

        if let Some(level) = file_config.logging.level {
            config.log_level = normalize_log_level(level);
        }
        if let Some(retention_days) = file_config.logging.retention_days {
            config.log_retention_days = retention_days.max(1);
        }
        if let Some(directory) = file_config.logging.directory {
            config.log_dir = resolve_against(&config.root_dir, &directory);
        }
        if let Some(rule) = file_config.setup.completion_rule {
            config.completion_rule = rule;
        }

        if let Some(level) = overrides.log_level {
            config.log_level = normalize_log_level(level);
        }
        if let Some(rule) = overrides.completion_rule {
            config.completion_rule = rule;
        }

        config
    }

    pub fn defaults_for_root(root_dir: PathBuf) -> Self {
        Self {
            config_path: default_config_path_for_root(&root_dir),
            log_level: "info".to_string(),
            log_retention_days: 7,
            log_dir: root_dir.join(DEFAULT_LOG_DIR),
            completion_rule: CompletionRule::default(),
            root_dir,
        }
    }

    pub fn info_dir(&self) -> PathBuf {
        self.root_dir.join(INFO_DIR)
    }
}

/// Values taken from the process environment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    pub root_dir: Option<PathBuf>,
    pub config_path: Option<PathBuf>,
    pub log_level: Option<String>,
    pub completion_rule: Option<CompletionRule>,
}

impl EnvOverrides {
    pub fn from_env() -> Result<Self> {
        let completion_rule = match non_empty_var("TEDDY_BOT_COMPLETION_RULE") {
            Some(raw) => Some(
                CompletionRule::parse(&raw)
                    .ok_or_else(|| anyhow!("invalid TEDDY_BOT_COMPLETION_RULE: {raw}"))?,
            ),
            None => None,
        };
        Ok(Self {
            root_dir: non_empty_var("TEDDY_BOT_ROOT").map(PathBuf::from),
            config_path: non_empty_var("TEDDY_BOT_CONFIG_PATH").map(PathBuf::from),
            log_level: non_empty_var("TEDDY_BOT_LOG_LEVEL"),
            completion_rule,
        })
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct BootstrapFileConfig {
    pub logging: LoggingFileConfig,
    pub setup: SetupFileConfig,
}

#[derive(Clone, Debug, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct LoggingFileConfig {
    pub level: Option<String>,
    pub retention_days: Option<u16>,
    pub directory: Option<PathBuf>,
}

#[derive(Clone, Debug, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SetupFileConfig {
    pub completion_rule: Option<CompletionRule>,
}

pub fn default_config_path_for_root(root_dir: &Path) -> PathBuf {
    root_dir.join(DEFAULT_CONFIG_FILE_NAME)
}

pub fn read_config_file(path: &Path) -> Result<BootstrapFileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    serde_json::from_str::<BootstrapFileConfig>(&raw)
        .with_context(|| format!("invalid config json: {}", path.display()))
}

fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

fn normalize_log_level(level: String) -> String {
    match level.to_ascii_lowercase().as_str() {
        "trace" => "trace".to_string(),
        "debug" => "debug".to_string(),
        "info" => "info".to_string(),
        "warning" | "warn" => "warn".to_string(),
        "error" => "error".to_string(),
        _ => "info".to_string(),
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn ensure_file_exists_with_default(path: &Path, default_content: &str) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config dir: {}", parent.display()))?;
    }
    fs::write(path, default_content)
        .with_context(|| format!("failed to write config: {}", path.display()))?;
    Ok(())
}
