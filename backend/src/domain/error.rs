use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCode {
    Io,
    MissingSource,
    AlreadyExists,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Io => "io",
            Self::MissingSource => "missing_source",
            Self::AlreadyExists => "already_exists",
        }
    }
}

/// Failure to seed a single manifest entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetupError {
    code: ErrorCode,
    path: PathBuf,
    message: String,
}

impl SetupError {
    pub fn io(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Io,
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn missing_source(path: impl Into<PathBuf>, source: &Path) -> Self {
        Self {
            code: ErrorCode::MissingSource,
            path: path.into(),
            message: format!("default source not found: {}", source.display()),
        }
    }

    pub fn already_exists(path: impl Into<PathBuf>) -> Self {
        Self {
            code: ErrorCode::AlreadyExists,
            path: path.into(),
            message: "file appeared before it could be created".to_string(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): {}",
            self.path.display(),
            self.code.as_str(),
            self.message
        )
    }
}

impl std::error::Error for SetupError {}
