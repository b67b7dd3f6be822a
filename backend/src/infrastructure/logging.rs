use anyhow::{Context, Result};
use chrono::{Days, NaiveDate, Utc};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::infrastructure::config::AppConfig;

const LOG_FILE_PREFIX: &str = "teddybot-";
const LOG_FILE_SUFFIX: &str = ".log";
const LOG_DATE_FORMAT: &str = "%Y-%m-%d";

/// Keeps the file writer alive; dropping it flushes queued lines.
pub struct LoggingRuntime {
    _guard: WorkerGuard,
    pub log_file: PathBuf,
}

/// Console plus one file per day under `log_dir`, after sweeping files
/// that fell out of the retention window.
pub fn init_logging(config: &AppConfig) -> Result<LoggingRuntime> {
    std::fs::create_dir_all(&config.log_dir)
        .with_context(|| format!("failed to create log dir: {}", config.log_dir.display()))?;
    let today = Utc::now().date_naive();
    let removed = LogRetention::from_config(config).sweep(today)?;

    let (file_writer, guard, log_file) = open_daily_writer(&config.log_dir, today);
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(file_writer),
        )
        .try_init()
        .context("failed to initialize tracing subscriber")?;

    for path in &removed {
        tracing::debug!(path = %path.display(), "removed expired log file");
    }

    Ok(LoggingRuntime {
        _guard: guard,
        log_file,
    })
}

pub fn log_file_name(date: NaiveDate) -> String {
    format!("{LOG_FILE_PREFIX}{}{LOG_FILE_SUFFIX}", date.format(LOG_DATE_FORMAT))
}

/// Date encoded in a `teddybot-YYYY-MM-DD.log` name, if it is one.
pub fn log_file_date(path: &Path) -> Option<NaiveDate> {
    let name = path.file_name()?.to_str()?;
    let date = name
        .strip_prefix(LOG_FILE_PREFIX)?
        .strip_suffix(LOG_FILE_SUFFIX)?;
    NaiveDate::parse_from_str(date, LOG_DATE_FORMAT).ok()
}

/// Age limit for the dated files in one log directory. `keep_days`
/// includes today, so `1` keeps only today's file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogRetention {
    pub dir: PathBuf,
    pub keep_days: u16,
}

impl LogRetention {
    pub fn new(dir: impl Into<PathBuf>, keep_days: u16) -> Self {
        Self {
            dir: dir.into(),
            keep_days: keep_days.max(1),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.log_dir, config.log_retention_days)
    }

    /// Oldest date still kept.
    pub fn cutoff(&self, today: NaiveDate) -> NaiveDate {
        today
            .checked_sub_days(Days::new(u64::from(self.keep_days) - 1))
            .unwrap_or(NaiveDate::MIN)
    }

    /// Deletes expired dated files and returns their paths. Anything not
    /// named like a daily log is left alone.
    pub fn sweep(&self, today: NaiveDate) -> Result<Vec<PathBuf>> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }
        let cutoff = self.cutoff(today);
        let listing = std::fs::read_dir(&self.dir)
            .with_context(|| format!("failed to read log dir: {}", self.dir.display()))?;

        let mut removed = Vec::new();
        for entry in listing {
            let path = entry
                .with_context(|| format!("failed to list log dir: {}", self.dir.display()))?
                .path();
            let expired = path.is_file() && log_file_date(&path).is_some_and(|date| date < cutoff);
            if expired {
                std::fs::remove_file(&path)
                    .with_context(|| format!("failed to remove old log file: {}", path.display()))?;
                removed.push(path);
            }
        }
        removed.sort();
        Ok(removed)
    }
}

fn open_daily_writer(log_dir: &Path, today: NaiveDate) -> (NonBlocking, WorkerGuard, PathBuf) {
    let file_name = log_file_name(today);
    let log_file = log_dir.join(&file_name);
    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(log_dir, file_name));
    (writer, guard, log_file)
}
