//! Value Objects
//!
//! 生成時にバリデーションを行い、不正な値を持つインスタンスが存在しないことを保証します。

use std::fmt;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use uuid::Uuid;

use genkan_shared::time::{parse_rfc3339_utc, to_rfc3339_seconds};

use super::error::ValueObjectError;

const SESSION_ID_MAX_LEN: usize = 128;
const DISPLAY_NAME_MAX_LEN: usize = 64;
const MESSAGE_TEXT_MAX_LEN: usize = 4000;

/// Display name used until a visitor registers one
pub const DEFAULT_DISPLAY_NAME: &str = "Guest";

/// Command word that opens the interactive menu
const MENU_COMMAND: &str = "menu";

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is a valid regex")
});

fn non_empty(field: &'static str, value: &str) -> Result<(), ValueObjectError> {
    if value.is_empty() {
        Err(ValueObjectError::Empty { field })
    } else {
        Ok(())
    }
}

fn bounded(field: &'static str, value: &str, max: usize) -> Result<(), ValueObjectError> {
    let actual = value.chars().count();
    if actual > max {
        Err(ValueObjectError::TooLong { field, actual, max })
    } else {
        Ok(())
    }
}

/// Session (= connection) identifier assigned by the server on connect
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        non_empty("session_id", &value)?;
        bounded("session_id", &value, SESSION_ID_MAX_LEN)?;
        Ok(Self(value))
    }

    /// Fresh random identifier (v4 UUID, simple hex form)
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for SessionId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Visitor display name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    /// Trims the input; a blank name becomes [`DEFAULT_DISPLAY_NAME`].
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(Self::guest());
        }
        bounded("name", trimmed, DISPLAY_NAME_MAX_LEN)?;
        Ok(Self(trimmed.to_string()))
    }

    pub fn from_optional(value: Option<String>) -> Result<Self, ValueObjectError> {
        match value {
            Some(value) => Self::new(value),
            None => Ok(Self::guest()),
        }
    }

    pub fn guest() -> Self {
        Self(DEFAULT_DISPLAY_NAME.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Chat message body (trimmed, never empty)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageText(String);

impl MessageText {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        let trimmed = value.trim();
        non_empty("text", trimmed)?;
        bounded("text", trimmed, MESSAGE_TEXT_MAX_LEN)?;
        Ok(Self(trimmed.to_string()))
    }

    /// `true` when the text is the menu command (case-insensitive)
    pub fn is_menu_command(&self) -> bool {
        self.0.eq_ignore_ascii_case(MENU_COMMAND)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for MessageText {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Message identifier, unique within one transcript
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageId(String);

impl MessageId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        let trimmed = value.trim();
        non_empty("message_id", trimmed)?;
        Ok(Self(trimmed.to_string()))
    }

    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// UTC instant with second precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub fn new(value: DateTime<Utc>) -> Self {
        use chrono::SubsecRound;
        Self(value.trunc_subsecs(0))
    }

    /// Parse an RFC 3339 string; `None` when it is not one
    pub fn parse(value: &str) -> Option<Self> {
        parse_rfc3339_utc(value).map(Self)
    }

    pub fn value(&self) -> DateTime<Utc> {
        self.0
    }

    pub fn to_rfc3339(&self) -> String {
        to_rfc3339_seconds(&self.0)
    }
}

/// Destination address for summary mails
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        let trimmed = value.trim();
        if !EMAIL_PATTERN.is_match(trimmed) {
            return Err(ValueObjectError::InvalidEmail(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifier of a node in the menu tree
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MenuNodeId(String);

impl MenuNodeId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        let trimmed = value.trim();
        non_empty("menu id", trimmed)?;
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MenuNodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
