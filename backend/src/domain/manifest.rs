use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::domain::settings::{ChannelIds, RoleEmojiExample, DEFAULT_BOT_NAME, TOKEN_PLACEHOLDER};

pub const INFO_DIR: &str = "info";
pub const IMG_DIR: &str = "img";
pub const AVATAR_DEFAULT_PATH: &str = "img/avatar-default.png";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileKind {
    JsonArray,
    JsonObject,
    PlainText,
    CsvText,
    BinaryCopy,
}

impl FileKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::JsonArray => "json_array",
            Self::JsonObject => "json_object",
            Self::PlainText => "plain_text",
            Self::CsvText => "csv_text",
            Self::BinaryCopy => "binary_copy",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DefaultPayload {
    /// UTF-8 text written verbatim.
    Inline(String),
    /// Raw bytes duplicated from another file under the bot root.
    CopyFrom(PathBuf),
}

/// One file the bot needs before it can start, and what to seed it with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DefaultFileEntry {
    pub path: PathBuf,
    pub kind: FileKind,
    pub payload: DefaultPayload,
    pub announcement: String,
    pub confirmation: String,
}

impl DefaultFileEntry {
    pub fn inline(
        path: impl Into<PathBuf>,
        kind: FileKind,
        content: impl Into<String>,
        announcement: impl Into<String>,
    ) -> Self {
        let path = path.into();
        let confirmation = format!("{} created.", path.display());
        Self {
            path,
            kind,
            payload: DefaultPayload::Inline(content.into()),
            announcement: announcement.into(),
            confirmation,
        }
    }

    pub fn copy_of(
        path: impl Into<PathBuf>,
        source: impl Into<PathBuf>,
        announcement: impl Into<String>,
    ) -> Self {
        let path = path.into();
        let confirmation = format!("{} created.", path.display());
        Self {
            path,
            kind: FileKind::BinaryCopy,
            payload: DefaultPayload::CopyFrom(source.into()),
            announcement: announcement.into(),
            confirmation,
        }
    }

    pub fn with_confirmation(mut self, confirmation: impl Into<String>) -> Self {
        self.confirmation = confirmation.into();
        self
    }

    pub fn inline_content(&self) -> Option<&str> {
        match &self.payload {
            DefaultPayload::Inline(content) => Some(content),
            DefaultPayload::CopyFrom(_) => None,
        }
    }
}

/// Ordered list of files seeded on first run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Manifest {
    entries: Vec<DefaultFileEntry>,
}

impl Manifest {
    pub fn new(entries: Vec<DefaultFileEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[DefaultFileEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The files TeddyBot reads at startup.
    pub fn teddy_bot() -> Self {
        let info = Path::new(INFO_DIR);
        let ids = to_tab_pretty_json(&ChannelIds::default());
        let role_emoji = to_tab_pretty_json(&RoleEmojiExample::default());

        Self::new(vec![
            DefaultFileEntry::inline(
                info.join("blacklistIgnore.json"),
                FileKind::JsonArray,
                "[]",
                "Blacklist Ignore file not found. This file contains an array of Channel IDs in which to not enforce the blacklist.",
            ),
            DefaultFileEntry::inline(
                info.join("blacklist.json"),
                FileKind::JsonArray,
                "[]",
                "Blacklist file not found. This file contains an array of words which, if found, are to have their containing message removed, or warned about.",
            ),
            DefaultFileEntry::inline(
                info.join("blacklistWarningSpecialCases.json"),
                FileKind::JsonArray,
                "[]",
                "Blacklist Warning Special Cases file not found. This file contains any words which, due to their short nature, come up frequently as false warning positives. These are ignored.",
            ),
            DefaultFileEntry::inline(
                info.join("censorshipInfo.json"),
                FileKind::JsonObject,
                "{}",
                "Censorship info not found. This is a list of users with infractions.",
            ),
            DefaultFileEntry::inline(
                info.join("censorshipInfo.csv"),
                FileKind::CsvText,
                "",
                "Censorship info CSV not found. This is a spreadsheet-friendly copy of the infraction list.",
            ),
            DefaultFileEntry::inline(
                info.join("discordToken.txt"),
                FileKind::PlainText,
                TOKEN_PLACEHOLDER,
                "Discord Token text file not found. This file should contain your Discord Bot token.",
            )
            .with_confirmation("info/discordToken.txt created and filled with example token."),
            DefaultFileEntry::inline(
                info.join("botName.txt"),
                FileKind::PlainText,
                DEFAULT_BOT_NAME,
                "Bot name file not found, will default to TeddyBot. Update this file with your desired bot name.",
            )
            .with_confirmation("info/botName.txt created and filled with example name."),
            DefaultFileEntry::copy_of(
                Path::new(IMG_DIR).join("avatar.png"),
                AVATAR_DEFAULT_PATH,
                "Bot avatar file not found, will default to TeddyBot. Update this file with your desired bot avatar png image.",
            )
            .with_confirmation("img/avatar.png created and filled with example avatar."),
            DefaultFileEntry::inline(
                info.join("ids.json"),
                FileKind::JsonObject,
                ids,
                "ids file not found. This file contains the specific IDs of either messages or channels that are used for things like reading specific message reactions, posting to specific server channels, etc.",
            )
            .with_confirmation("info/ids.json created and populated with example data."),
            DefaultFileEntry::inline(
                info.join("memberRoles.json"),
                FileKind::JsonArray,
                "[]",
                "Member roles file not found. List of IDs to use for roles automatically assigned to new members. Leave blank if none.",
            ),
            DefaultFileEntry::inline(
                info.join("modRoles.json"),
                FileKind::JsonArray,
                "[]",
                "Moderator roles file not found. List of IDs to use for moderator and staff roles for advanced bot features.",
            ),
            DefaultFileEntry::inline(
                info.join("introMessages.json"),
                FileKind::JsonArray,
                "[]",
                "Intro messages file not found. List of custom intro messages for new users. These should end with a blank for the user's name (\"Oh hi, \"). Leave blank if none.",
            ),
            DefaultFileEntry::inline(
                info.join("roleEmoji.json"),
                FileKind::JsonObject,
                role_emoji,
                "Role emoji file not found. The first emoji in this list should be your setup reaction. This list is what gets added to any message in the role-assignment channel after it sees a setup reaction, and their corresponding roles. Configured with the !emotelist command.",
            ),
            DefaultFileEntry::inline(
                info.join("botReplies.json"),
                FileKind::JsonArray,
                "[]",
                "Bot replies file not found. This is a list of emotes the bot can reply with to any 'question' (i.e. mention the bot with a question mark).",
            ),
            DefaultFileEntry::inline(
                info.join("userCommands.json"),
                FileKind::JsonArray,
                "[]",
                "User commands file not found. This is the list of dynamically created call-and-response commands for all users, managed with !setcommand, !describecommand, and !deletecommand.",
            ),
            DefaultFileEntry::inline(
                info.join("spam.json"),
                FileKind::JsonArray,
                "[]",
                "Spam file not found. This file contains strings banned from new user IDs to prevent incoming spambots and kick them on join.",
            ),
        ])
    }
}

/// Pretty-prints with tab indentation and no trailing newline.
pub fn to_tab_pretty_json<T: Serialize>(value: &T) -> String {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    // Only called with plain derived structs over strings; writing into a Vec cannot fail.
    value
        .serialize(&mut serializer)
        .expect("manifest defaults must serialize to JSON");
    String::from_utf8_lossy(&buf).into_owned()
}
