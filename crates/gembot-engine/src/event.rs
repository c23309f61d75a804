//! Inbound events from the chat transport

use serde::{Deserialize, Serialize};

use gembot_types::{ChatId, Sender};

/// Text that opens a session when sent as a plain message
pub const START_COMMAND: &str = "/start";

/// An event delivered by the transport
///
/// `sender` is `None` when the transport could not tell who produced the
/// event; such events are answered with a generic error and go no further.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundEvent {
    /// A user opened the conversation
    SessionStart {
        chat: ChatId,
        sender: Option<Sender>,
    },
    /// A user pressed a button carrying `code`
    Choice {
        chat: ChatId,
        sender: Option<Sender>,
        code: String,
    },
}

impl InboundEvent {
    pub fn session_start(chat: ChatId, sender: Sender) -> Self {
        InboundEvent::SessionStart {
            chat,
            sender: Some(sender),
        }
    }

    pub fn choice(chat: ChatId, sender: Sender, code: impl Into<String>) -> Self {
        InboundEvent::Choice {
            chat,
            sender: Some(sender),
            code: code.into(),
        }
    }

    /// Map a plain text message to an event, if it is one the bot reacts to
    ///
    /// Only the exact start command opens a session.
    pub fn from_text(chat: ChatId, sender: Option<Sender>, text: &str) -> Option<Self> {
        (text == START_COMMAND).then_some(InboundEvent::SessionStart { chat, sender })
    }

    pub fn chat(&self) -> ChatId {
        match self {
            InboundEvent::SessionStart { chat, .. } | InboundEvent::Choice { chat, .. } => *chat,
        }
    }

    pub fn sender(&self) -> Option<&Sender> {
        match self {
            InboundEvent::SessionStart { sender, .. } | InboundEvent::Choice { sender, .. } => {
                sender.as_ref()
            }
        }
    }
}
