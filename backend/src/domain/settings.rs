use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

pub const TOKEN_PLACEHOLDER: &str = "PutYour.Token_Here";
pub const DEFAULT_BOT_NAME: &str = "TeddyBot";
pub const REQUIRED_ID_PLACEHOLDER: &str = "123456";
pub const UNSET_ID: &str = "0";

/// Server, channel and message IDs the bot posts to or watches.
///
/// Field order is the on-disk key order of `info/ids.json`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChannelIds {
    pub server: String,
    pub rules_channel: String,
    pub announcements_channel: String,
    pub moderation_channel: String,
    pub introductions_channel: String,
    pub gallery_channel: String,
    pub memes_channel: String,
    pub botlog_channel: String,
    pub roles_channel: String,
    pub help_channel: String,
}

impl Default for ChannelIds {
    fn default() -> Self {
        Self {
            server: REQUIRED_ID_PLACEHOLDER.to_string(),
            rules_channel: REQUIRED_ID_PLACEHOLDER.to_string(),
            announcements_channel: REQUIRED_ID_PLACEHOLDER.to_string(),
            moderation_channel: REQUIRED_ID_PLACEHOLDER.to_string(),
            introductions_channel: UNSET_ID.to_string(),
            gallery_channel: UNSET_ID.to_string(),
            memes_channel: UNSET_ID.to_string(),
            botlog_channel: UNSET_ID.to_string(),
            roles_channel: REQUIRED_ID_PLACEHOLDER.to_string(),
            help_channel: UNSET_ID.to_string(),
        }
    }
}

impl ChannelIds {
    pub fn required(&self) -> [(&'static str, &str); 5] {
        [
            ("server", &self.server),
            ("rulesChannel", &self.rules_channel),
            ("announcementsChannel", &self.announcements_channel),
            ("moderationChannel", &self.moderation_channel),
            ("rolesChannel", &self.roles_channel),
        ]
    }

    pub fn optional(&self) -> [(&'static str, &str); 5] {
        [
            ("introductionsChannel", &self.introductions_channel),
            ("galleryChannel", &self.gallery_channel),
            ("memesChannel", &self.memes_channel),
            ("botlogChannel", &self.botlog_channel),
            ("helpChannel", &self.help_channel),
        ]
    }

    /// Required IDs that are still empty or hold the seeded placeholder.
    pub fn unset_required(&self) -> Vec<&'static str> {
        self.required()
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty() || *value == REQUIRED_ID_PLACEHOLDER)
            .map(|(name, _)| name)
            .collect()
    }
}

/// Seeded example for `info/roleEmoji.json`. Operators replace it with
/// emote-id to role-id pairs.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct RoleEmojiExample {
    pub emote: String,
    pub role: String,
}

impl Default for RoleEmojiExample {
    fn default() -> Self {
        Self {
            emote: "11111".to_string(),
            role: "22222".to_string(),
        }
    }
}

/// Everything the seeded `info/` files hold, parsed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BotSettings {
    pub token: String,
    pub bot_name: String,
    pub ids: ChannelIds,
    pub blacklist: Vec<String>,
    pub blacklist_ignore: Vec<String>,
    pub blacklist_warning_special_cases: Vec<String>,
    pub censorship: BTreeMap<String, Value>,
    pub member_roles: Vec<String>,
    pub mod_roles: Vec<String>,
    pub intro_messages: Vec<String>,
    pub role_emoji: BTreeMap<String, String>,
    pub bot_replies: Vec<String>,
    pub user_commands: Vec<Value>,
    pub spam: Vec<String>,
}

impl BotSettings {
    pub fn bot_name(&self) -> &str {
        let trimmed = self.bot_name.trim();
        if trimmed.is_empty() {
            DEFAULT_BOT_NAME
        } else {
            trimmed
        }
    }

    pub fn has_placeholder_token(&self) -> bool {
        let token = self.token.trim();
        token.is_empty() || token == TOKEN_PLACEHOLDER
    }

    /// Looks up an optional channel by its `ids.json` key. `"0"` means the
    /// feature using that channel is turned off.
    pub fn optional_channel(&self, name: &str) -> Option<&str> {
        self.ids
            .optional()
            .into_iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.trim())
            .filter(|value| !value.is_empty() && *value != UNSET_ID)
    }

    /// Reasons the bot cannot run yet. Empty once the operator filled in
    /// the token, the name and every required ID.
    pub fn attention_items(&self) -> Vec<String> {
        let mut items = Vec::new();
        if self.has_placeholder_token() {
            items.push("discordToken.txt".to_string());
        }
        if self.bot_name.trim().is_empty() {
            items.push("botName.txt".to_string());
        }
        items.extend(
            self.ids
                .unset_required()
                .into_iter()
                .map(|name| format!("ids.json:{name}")),
        );
        items
    }
}
