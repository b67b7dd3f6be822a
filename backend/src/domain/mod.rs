pub mod error;
pub mod manifest;
pub mod ports;
pub mod report;
pub mod settings;

pub use error::{ErrorCode, SetupError};
pub use manifest::{DefaultFileEntry, DefaultPayload, FileKind, Manifest};
pub use report::{CompletionRule, ConfigureReport, EntryOutcome, EntryStatus};
pub use settings::{BotSettings, ChannelIds};
