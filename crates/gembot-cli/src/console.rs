//! Console transport
//!
//! Turns stdin lines into inbound events and prints outbound messages. Each
//! line is one event:
//!
//! - `/start` opens a session
//! - `/whoami <id> <first> [last]` switches the speaking user
//! - `/anon <code>` sends a choice with no sender attached
//! - anything else is a choice code
//!
//! Stdin is read on a plain OS thread. The runtime never waits on it, so a
//! shutdown signal ends the process even while a read is blocked.

use std::io::BufRead;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

use gembot_engine::{InboundEvent, MessageSink, OutboundMessage, SinkError, SinkResult};
use gembot_types::{ChatId, Sender, UserId};

use crate::display;

const WHOAMI_COMMAND: &str = "/whoami";
const ANON_COMMAND: &str = "/anon";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConsoleError {
    #[error("Usage: /whoami <id> <first name> [last name]")]
    WhoAmIUsage,

    #[error("Invalid user id: {0}")]
    InvalidUserId(String),

    #[error("Usage: /anon <code>")]
    AnonUsage,
}

/// Parsed form of one console line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleLine {
    Event(InboundEvent),
    SwitchUser(Sender),
    Blank,
}

/// Console-side session: the chat and the user currently typing
pub struct ConsoleTransport {
    chat: ChatId,
    sender: Sender,
    json: bool,
}

impl ConsoleTransport {
    pub fn new(chat: ChatId, sender: Sender) -> Self {
        Self {
            chat,
            sender,
            json: false,
        }
    }

    /// In JSON mode stdout carries only outbound messages; notices go to the log
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub fn sender(&self) -> &Sender {
        &self.sender
    }

    pub fn parse(&self, line: &str) -> Result<ConsoleLine, ConsoleError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(ConsoleLine::Blank);
        }

        if let Some(event) = InboundEvent::from_text(self.chat, Some(self.sender.clone()), line) {
            return Ok(ConsoleLine::Event(event));
        }

        let mut words = line.split_whitespace();
        match words.next() {
            Some(WHOAMI_COMMAND) => {
                let id = words.next().ok_or(ConsoleError::WhoAmIUsage)?;
                let first = words.next().ok_or(ConsoleError::WhoAmIUsage)?;
                let id = UserId::parse(id).map_err(|_| ConsoleError::InvalidUserId(id.to_string()))?;

                let last: Vec<&str> = words.collect();
                let sender = Sender::new(id, first);
                let sender = if last.is_empty() {
                    sender
                } else {
                    sender.with_last_name(last.join(" "))
                };
                Ok(ConsoleLine::SwitchUser(sender))
            }
            Some(ANON_COMMAND) => {
                let code = words.next().ok_or(ConsoleError::AnonUsage)?;
                Ok(ConsoleLine::Event(InboundEvent::Choice {
                    chat: self.chat,
                    sender: None,
                    code: code.to_string(),
                }))
            }
            _ => Ok(ConsoleLine::Event(InboundEvent::choice(
                self.chat,
                self.sender.clone(),
                line,
            ))),
        }
    }

    /// Feed lines from `input` into the bus until input ends or the bus closes
    ///
    /// Blocks the calling thread; run it off the runtime. Returns the number
    /// of events forwarded.
    pub fn pump<R: BufRead>(
        &mut self,
        input: R,
        events: mpsc::Sender<InboundEvent>,
    ) -> std::io::Result<usize> {
        let mut forwarded = 0;

        for line in input.lines() {
            match self.parse(&line?) {
                Ok(ConsoleLine::Event(event)) => {
                    if events.blocking_send(event).is_err() {
                        tracing::debug!("Event bus closed, console input stopped");
                        break;
                    }
                    forwarded += 1;
                }
                Ok(ConsoleLine::SwitchUser(sender)) => {
                    tracing::info!(user = %sender.id, name = %sender.display_name(), "Console user switched");
                    if !self.json {
                        display::info(&format!("Now speaking as {}", sender.display_name()));
                    }
                    self.sender = sender;
                }
                Ok(ConsoleLine::Blank) => {}
                Err(err) if self.json => tracing::warn!(error = %err, "Console input rejected"),
                Err(err) => display::warning(&err.to_string()),
            }
        }

        Ok(forwarded)
    }
}

/// Prints outbound messages to stdout
pub struct ConsoleSink {
    json: bool,
}

impl ConsoleSink {
    pub fn new(json: bool) -> Self {
        Self { json }
    }
}

#[async_trait]
impl MessageSink for ConsoleSink {
    async fn send(&self, message: OutboundMessage) -> SinkResult<()> {
        if self.json {
            let line = serde_json::to_string(&message)
                .map_err(|e| SinkError::Serialization(e.to_string()))?;
            println!("{line}");
        } else {
            display::bot_message(&message);
        }
        Ok(())
    }

    fn name(&self) -> &str {
        if self.json {
            "console-json"
        } else {
            "console"
        }
    }
}
