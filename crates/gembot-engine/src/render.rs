//! Render instructions and their mapping to outbound messages
//!
//! The renderer is a pure mapping from a semantic [`Render`] to the text and
//! button rows the transport shows. It never touches the ledger.

use serde::{Deserialize, Serialize};

use gembot_catalog::Catalogs;
use gembot_types::{CatalogKind, ChatId, MenuCommand};

use crate::messages;

/// Which half of the intro to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntroPart {
    First,
    Second,
}

/// A semantic render instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Render {
    /// "Would you like to hear about my mission?" with yes/no buttons
    IntroChoice,
    /// One of the two intro texts, no buttons
    IntroText(IntroPart),
    /// The main menu prompt with its three buttons
    Menu,
    /// Plain text, no buttons
    Text(String),
    /// A catalog listed as buttons, followed by a back-to-menu button
    CatalogList(CatalogKind),
}

/// A single inline button
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub label: String,
    /// Choice code sent back when the button is pressed
    pub code: String,
}

impl Button {
    pub fn new(label: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            code: code.into(),
        }
    }

    fn menu(label: &str, command: MenuCommand) -> Self {
        Self::new(messages::menu_label(label), command.code())
    }
}

/// A message ready for the transport
///
/// Buttons are laid out one per row, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub chat: ChatId,
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<Button>,
}

impl OutboundMessage {
    pub fn text(chat: ChatId, text: impl Into<String>) -> Self {
        Self {
            chat,
            text: text.into(),
            buttons: Vec::new(),
        }
    }

    /// Codes of all buttons, in row order
    pub fn codes(&self) -> Vec<&str> {
        self.buttons.iter().map(|b| b.code.as_str()).collect()
    }
}

pub struct Renderer;

impl Renderer {
    pub fn render(chat: ChatId, render: &Render, catalogs: &Catalogs) -> OutboundMessage {
        match render {
            Render::IntroChoice => OutboundMessage {
                chat,
                text: messages::INTRO_CHOICE.to_string(),
                buttons: vec![
                    Button::menu(messages::LABEL_PRINT_INTRO, MenuCommand::PrintIntro),
                    Button::menu(messages::LABEL_SKIP_INTRO, MenuCommand::SkipIntro),
                ],
            },
            Render::IntroText(IntroPart::First) => {
                OutboundMessage::text(chat, messages::intro_first())
            }
            Render::IntroText(IntroPart::Second) => {
                OutboundMessage::text(chat, messages::intro_second())
            }
            Render::Menu => OutboundMessage {
                chat,
                text: messages::MENU_PROMPT.to_string(),
                buttons: vec![
                    Button::menu(messages::LABEL_BALANCE, MenuCommand::ShowBalance),
                    Button::menu(
                        messages::LABEL_USEFUL_ACTIVITIES,
                        MenuCommand::ShowUsefulActivities,
                    ),
                    Button::menu(messages::LABEL_REWARDS, MenuCommand::ShowRewards),
                ],
            },
            Render::Text(text) => OutboundMessage::text(chat, text.clone()),
            Render::CatalogList(kind) => {
                let mut buttons: Vec<Button> = catalogs
                    .get(*kind)
                    .iter()
                    .map(|entry| Button::new(messages::catalog_label(*kind, entry), &entry.code))
                    .collect();
                buttons.push(Button::menu(messages::LABEL_PRINT_MENU, MenuCommand::PrintMenu));

                OutboundMessage {
                    chat,
                    text: messages::list_prompt(*kind).to_string(),
                    buttons,
                }
            }
        }
    }
}
