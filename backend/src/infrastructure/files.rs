use std::io::ErrorKind;
use std::path::Path;
use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;

use crate::domain::SetupError;

/// True when anything occupies `path`, including a symlink whose target is
/// gone. Such a link would make `create_new` fail, so it counts as present.
pub async fn file_exists(path: &Path) -> Result<bool, SetupError> {
    let link = match fs::symlink_metadata(path).await {
        Ok(metadata) => metadata,
        Err(error) if error.kind() == ErrorKind::NotFound => return Ok(false),
        Err(error) => {
            return Err(SetupError::io(path, format!("failed to check existence: {error}")));
        }
    };
    if link.file_type().is_symlink() && fs::metadata(path).await.is_err() {
        tracing::warn!(path = %path.display(), "dangling symlink left in place of default file");
    }
    Ok(true)
}

/// Writes `content` to a file that must not exist yet, then flushes it to
/// disk. A half-written file is removed again so the next start retries.
pub async fn write_new_file(path: &Path, content: &[u8]) -> Result<(), SetupError> {
    let mut file = create_new(path).await?;
    let written = async {
        file.write_all(content).await?;
        file.sync_all().await?;
        Ok::<(), std::io::Error>(())
    }
    .await;
    if let Err(error) = written {
        drop(file);
        discard_partial(path).await;
        return Err(SetupError::io(path, format!("failed to write: {error}")));
    }
    Ok(())
}

/// Duplicates `source` byte for byte into `path`, which must not exist yet.
pub async fn copy_new_file(source: &Path, path: &Path) -> Result<(), SetupError> {
    let mut reader = match File::open(source).await {
        Ok(file) => file,
        Err(error) if error.kind() == ErrorKind::NotFound => {
            return Err(SetupError::missing_source(path, source));
        }
        Err(error) => {
            return Err(SetupError::io(
                path,
                format!("failed to open {}: {error}", source.display()),
            ));
        }
    };

    let mut file = create_new(path).await?;
    let copied = async {
        let bytes = tokio::io::copy(&mut reader, &mut file).await?;
        file.sync_all().await?;
        Ok::<u64, std::io::Error>(bytes)
    }
    .await;
    match copied {
        Ok(bytes) => {
            tracing::debug!(path = %path.display(), source = %source.display(), bytes, "copied default file");
            Ok(())
        }
        Err(error) => {
            drop(file);
            discard_partial(path).await;
            Err(SetupError::io(path, format!("failed to copy: {error}")))
        }
    }
}

async fn create_new(path: &Path) -> Result<File, SetupError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await.map_err(|error| {
            SetupError::io(
                path,
                format!("failed to create dir {}: {error}", parent.display()),
            )
        })?;
    }

    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await
        .map_err(|error| match error.kind() {
            ErrorKind::AlreadyExists => SetupError::already_exists(path),
            _ => SetupError::io(path, format!("failed to create: {error}")),
        })
}

async fn discard_partial(path: &Path) {
    if let Err(error) = fs::remove_file(path).await {
        tracing::warn!(path = %path.display(), error = %error, "failed to remove partially written file");
    }
}
