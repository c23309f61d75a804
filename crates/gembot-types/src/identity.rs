//! Identity types for GemBot
//!
//! Chat transports identify users and chats with 64-bit signed integers.
//! Both are wrapped so a chat id can never be passed where a user id is
//! expected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate integer ID types with common implementations
macro_rules! define_id_type {
    ($name:ident, $prefix:literal, $doc:literal) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);

        impl $name {
            /// Wrap a raw transport id
            pub fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Get the raw transport id
            pub fn as_i64(&self) -> i64 {
                self.0
            }

            /// Parse from a string (with or without prefix)
            pub fn parse(s: &str) -> Result<Self, std::num::ParseIntError> {
                let s = s.strip_prefix(concat!($prefix, "_")).unwrap_or(s);
                Ok(Self(s.trim().parse()?))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}_{}", $prefix, self.0)
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }
    };
}

define_id_type!(UserId, "user", "Stable identity of a message sender");
define_id_type!(ChatId, "chat", "Conversation target that outbound messages are addressed to");

/// The sender attached to an inbound event
///
/// Only `id` is used for identity; the name parts are read once, when the
/// user is first registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sender {
    pub id: UserId,
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

impl Sender {
    pub fn new(id: impl Into<UserId>, first_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: None,
            username: None,
        }
    }

    pub fn with_last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Name shown in bot replies: first and last name joined, trimmed
    pub fn display_name(&self) -> String {
        let last = self.last_name.as_deref().unwrap_or_default();
        format!("{} {}", self.first_name, last).trim().to_string()
    }
}
