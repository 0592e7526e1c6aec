//! One-shot flash messages.
//!
//! Messages carry a numeric [`Level`]; the five built-in levels have a tag (`"success"`,
//! `"error"`, ...) used by templates and by assertions that match on the level name.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Numeric message severity. Custom levels are allowed and have no tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Level(pub u8);

impl Level {
    pub const DEBUG: Level = Level(10);
    pub const INFO: Level = Level(20);
    pub const SUCCESS: Level = Level(25);
    pub const WARNING: Level = Level(30);
    pub const ERROR: Level = Level(40);

    /// Tag of a built-in level, `None` for custom levels.
    pub fn tag(self) -> Option<&'static str> {
        match self {
            Self::DEBUG => Some("debug"),
            Self::INFO => Some("info"),
            Self::SUCCESS => Some("success"),
            Self::WARNING => Some("warning"),
            Self::ERROR => Some("error"),
            _ => None,
        }
    }

    /// Looks up a built-in level by its tag.
    pub fn from_tag(tag: &str) -> Option<Level> {
        match tag {
            "debug" => Some(Self::DEBUG),
            "info" => Some(Self::INFO),
            "success" => Some(Self::SUCCESS),
            "warning" => Some(Self::WARNING),
            "error" => Some(Self::ERROR),
            _ => None,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tag() {
            Some(tag) => f.write_str(tag),
            None => write!(f, "{}", self.0),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub level: Level,
    pub message: String,
    /// Space separated tags, the level tag plus any extra tags
    #[serde(default)]
    pub tags: String,
}

impl Message {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            tags: level.tag().unwrap_or_default().to_string(),
        }
    }
}

/// Displays the message text only.
impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::{Level, Message};

    #[test]
    fn built_in_levels_round_trip_through_tags() {
        for level in [
            Level::DEBUG,
            Level::INFO,
            Level::SUCCESS,
            Level::WARNING,
            Level::ERROR,
        ] {
            let tag = level.tag().unwrap();
            assert_eq!(Level::from_tag(tag), Some(level));
        }
    }

    #[test]
    fn custom_level_has_no_tag() {
        assert_eq!(Level(35).tag(), None);
        assert_eq!(Level(35).to_string(), "35");
    }

    #[test]
    fn new_message_uses_level_tag() {
        let message = Message::new(Level::SUCCESS, "saved");

        assert_eq!(message.tags, "success");
        assert_eq!(message.to_string(), "saved");
    }

    #[test]
    fn level_serializes_as_number() {
        let json = serde_json::to_string(&Message::new(Level::ERROR, "oops")).unwrap();

        assert_eq!(json, r#"{"level":40,"message":"oops","tags":"error"}"#);
    }
}
