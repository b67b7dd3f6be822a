use anyhow::Result;
use async_trait::async_trait;

/// Loads configuration that already exists on disk.
///
/// Returns `true` when setup is still pending and the operator should be
/// told so.
#[async_trait]
pub trait ConfigLoaderPort: Send + Sync {
    async fn load_config(&self) -> Result<bool>;
}
