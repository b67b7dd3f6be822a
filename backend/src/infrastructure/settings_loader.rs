use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::ports::ConfigLoaderPort;
use crate::domain::settings::BotSettings;

/// Reads the seeded `info/` files back into [`BotSettings`].
#[derive(Clone, Debug)]
pub struct StoredSettingsLoader {
    info_dir: PathBuf,
}

impl StoredSettingsLoader {
    pub fn new(info_dir: impl Into<PathBuf>) -> Self {
        Self {
            info_dir: info_dir.into(),
        }
    }

    pub fn info_dir(&self) -> &Path {
        &self.info_dir
    }

    pub async fn load_settings(&self) -> Result<BotSettings> {
        Ok(BotSettings {
            token: self.read_text("discordToken.txt").await?.trim().to_string(),
            bot_name: self.read_text("botName.txt").await?.trim().to_string(),
            ids: self.read_json("ids.json").await?,
            blacklist: self.read_json("blacklist.json").await?,
            blacklist_ignore: self.read_json("blacklistIgnore.json").await?,
            blacklist_warning_special_cases: self
                .read_json("blacklistWarningSpecialCases.json")
                .await?,
            censorship: self.read_json("censorshipInfo.json").await?,
            member_roles: self.read_json("memberRoles.json").await?,
            mod_roles: self.read_json("modRoles.json").await?,
            intro_messages: self.read_json("introMessages.json").await?,
            role_emoji: self.read_json("roleEmoji.json").await?,
            bot_replies: self.read_json("botReplies.json").await?,
            user_commands: self.read_json("userCommands.json").await?,
            spam: self.read_json("spam.json").await?,
        })
    }

    async fn read_text(&self, name: &str) -> Result<String> {
        let path = self.info_dir.join(name);
        fs::read_to_string(&path)
            .await
            .with_context(|| format!("failed to read settings file: {}", path.display()))
    }

    async fn read_json<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let raw = self.read_text(name).await?;
        serde_json::from_str(&raw)
            .with_context(|| format!("invalid settings json: {}", self.info_dir.join(name).display()))
    }
}

#[async_trait]
impl ConfigLoaderPort for StoredSettingsLoader {
    async fn load_config(&self) -> Result<bool> {
        let settings = self.load_settings().await?;
        let pending = settings.attention_items();
        if pending.is_empty() {
            tracing::debug!(bot_name = settings.bot_name(), "stored settings complete");
            return Ok(false);
        }
        tracing::warn!(
            info_dir = %self.info_dir.display(),
            pending = %pending.join(", "),
            "settings still hold placeholder values"
        );
        Ok(true)
    }
}
