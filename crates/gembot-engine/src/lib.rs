//! GemBot Engine - the conversation loop
//!
//! Inbound events arrive over an [`EventBus`] and are handled strictly one at
//! a time by the [`Dispatcher`]:
//!
//! ```text
//! transport -> EventBus -> Dispatcher -> Renderer -> MessageSink -> transport
//!                              |
//!                          UserLedger
//! ```
//!
//! The transport itself lives outside this crate. Anything that can push
//! [`InboundEvent`]s and implement [`MessageSink`] can drive the bot.

pub mod bus;
pub mod choice;
pub mod dispatcher;
pub mod event;
pub mod messages;
pub mod pacing;
pub mod render;
pub mod sink;

pub use bus::EventBus;
pub use choice::Choice;
pub use dispatcher::{DispatchOutcome, Dispatcher, DispatcherConfig, SessionState};
pub use event::{InboundEvent, START_COMMAND};
pub use pacing::Pacing;
pub use render::{Button, IntroPart, OutboundMessage, Render, Renderer};
pub use sink::{MemorySink, MessageSink, SinkError, SinkResult};
