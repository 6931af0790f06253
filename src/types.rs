use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, UtcOffset, format_description::FormatItem, macros::format_description};

const TWELVE_HOUR_FORMAT: &[FormatItem<'static>] =
    format_description!("[hour repr:12 padding:zero]:[minute padding:zero] [period case:upper]");
const TWENTY_FOUR_HOUR_FORMAT: &[FormatItem<'static>] =
    format_description!("[hour repr:24 padding:zero]:[minute padding:zero]");

/// Regions whose conventional clock is 12-hour with an AM/PM suffix.
const TWELVE_HOUR_REGIONS: &[&str] = &[
    "US", "CA", "AU", "NZ", "IN", "PH", "PK", "BD", "EG", "SA", "MY",
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ClockStyle {
    #[default]
    TwelveHour,
    TwentyFourHour,
}

impl ClockStyle {
    /// Picks the clock for a POSIX locale such as `en_IN.UTF-8` or `de_DE`.
    /// `C`/`POSIX` and anything without a region keep the 12-hour default.
    pub fn from_locale(locale: &str) -> Self {
        let name = locale.split(['.', '@']).next().unwrap_or_default();
        let Some((_, region)) = name.split_once(['_', '-']) else {
            return Self::default();
        };
        if TWELVE_HOUR_REGIONS
            .iter()
            .any(|known| known.eq_ignore_ascii_case(region))
        {
            Self::TwelveHour
        } else {
            Self::TwentyFourHour
        }
    }

    /// Explicit `12`/`24` override.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "12" | "12h" => Some(Self::TwelveHour),
            "24" | "24h" => Some(Self::TwentyFourHour),
            _ => None,
        }
    }

    fn format(self) -> &'static [FormatItem<'static>] {
        match self {
            Self::TwelveHour => TWELVE_HOUR_FORMAT,
            Self::TwentyFourHour => TWENTY_FOUR_HOUR_FORMAT,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    User,
    Ai,
}

impl Role {
    pub fn avatar(self) -> &'static str {
        match self {
            Role::User => "👤",
            Role::Ai => "🤖",
        }
    }

    /// Author label shown above the bubble.
    pub fn author(self, assistant_name: &str) -> &str {
        match self {
            Role::User => "You",
            Role::Ai => assistant_name,
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Role::User => "user-message",
            Role::Ai => "ai-message",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Message {
    pub role: Role,
    pub text: String,
    pub timestamp: String,
}

impl Message {
    pub fn new(role: Role, text: impl Into<String>, clock: ClockStyle) -> Self {
        Self {
            role,
            text: text.into(),
            timestamp: format_message_timestamp(OffsetDateTime::now_utc(), clock),
        }
    }
}

pub fn format_message_timestamp(timestamp: OffsetDateTime, clock: ClockStyle) -> String {
    let mut datetime = timestamp;
    if let Ok(offset) = UtcOffset::current_local_offset() {
        datetime = datetime.to_offset(offset);
    }
    datetime.format(clock.format()).unwrap_or_default()
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DocumentListing {
    pub count: u64,
    pub names: Vec<String>,
}

// Wire types for the chat backend

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ChatReply {
    pub response: String,
    #[serde(default)]
    pub doc_count: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ReloadReply {
    pub doc_count: u64,
    #[serde(default)]
    pub doc_names: Option<Vec<String>>,
}

impl From<ReloadReply> for DocumentListing {
    fn from(reply: ReloadReply) -> Self {
        Self {
            count: reply.doc_count,
            names: reply.doc_names.unwrap_or_default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct HealthReply {
    pub status: String,
}

impl HealthReply {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}
