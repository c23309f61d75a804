//! Reserved choice codes
//!
//! These are the wire-level tokens attached to the fixed menu buttons. Every
//! other code a user can send is looked up in the catalogs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::GemBotError;

pub const CODE_PRINT_INTRO: &str = "print_intro";
pub const CODE_SKIP_INTRO: &str = "skip_intro";
pub const CODE_SHOW_BALANCE: &str = "show_balance";
pub const CODE_SHOW_USEFUL_ACTIVITIES: &str = "show_useful_activities";
pub const CODE_SHOW_REWARDS: &str = "show_rewards";
pub const CODE_PRINT_MENU: &str = "print_menu";

/// All codes owned by the menu layer, in declaration order
pub const RESERVED_CODES: [&str; 6] = [
    CODE_PRINT_INTRO,
    CODE_SKIP_INTRO,
    CODE_SHOW_BALANCE,
    CODE_SHOW_USEFUL_ACTIVITIES,
    CODE_SHOW_REWARDS,
    CODE_PRINT_MENU,
];

/// Check whether a code belongs to the menu layer
pub fn is_reserved_code(code: &str) -> bool {
    RESERVED_CODES.contains(&code)
}

/// A fixed menu command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuCommand {
    PrintIntro,
    SkipIntro,
    PrintMenu,
    ShowBalance,
    ShowUsefulActivities,
    ShowRewards,
}

impl MenuCommand {
    /// The wire code carried by this command's button
    pub fn code(&self) -> &'static str {
        match self {
            MenuCommand::PrintIntro => CODE_PRINT_INTRO,
            MenuCommand::SkipIntro => CODE_SKIP_INTRO,
            MenuCommand::PrintMenu => CODE_PRINT_MENU,
            MenuCommand::ShowBalance => CODE_SHOW_BALANCE,
            MenuCommand::ShowUsefulActivities => CODE_SHOW_USEFUL_ACTIVITIES,
            MenuCommand::ShowRewards => CODE_SHOW_REWARDS,
        }
    }
}

impl fmt::Display for MenuCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for MenuCommand {
    type Err = GemBotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            CODE_PRINT_INTRO => Ok(MenuCommand::PrintIntro),
            CODE_SKIP_INTRO => Ok(MenuCommand::SkipIntro),
            CODE_PRINT_MENU => Ok(MenuCommand::PrintMenu),
            CODE_SHOW_BALANCE => Ok(MenuCommand::ShowBalance),
            CODE_SHOW_USEFUL_ACTIVITIES => Ok(MenuCommand::ShowUsefulActivities),
            CODE_SHOW_REWARDS => Ok(MenuCommand::ShowRewards),
            other => Err(GemBotError::NotAMenuCommand {
                code: other.to_string(),
            }),
        }
    }
}
