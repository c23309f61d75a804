//! Reply texts and button labels

use gembot_ledger::BalanceError;
use gembot_types::emoji::{BICEPS, BUTTON_END, BUTTON_START, DONT_KNOW, GEM, SAD, SUNGLASSES};
use gembot_types::{CatalogEntry, CatalogKind, Gems};

pub const INTRO_CHOICE: &str = "Hi! I'm a chat bot. Would you like me to tell you about my mission?";
pub const MENU_PROMPT: &str = "Choose an option:";
pub const USEFUL_ACTIVITIES_PROMPT: &str = "Track a useful activity or return to the main menu:";
pub const REWARDS_PROMPT: &str = "Purchase a reward or return to the main menu:";
pub const UNIDENTIFIED_USER: &str = "Unable to identify the user";

pub const LABEL_PRINT_INTRO: &str = "Yes, I'm very interested!";
pub const LABEL_SKIP_INTRO: &str = "No, I already know everything.";
pub const LABEL_BALANCE: &str = "Balance";
pub const LABEL_USEFUL_ACTIVITIES: &str = "Useful activities";
pub const LABEL_REWARDS: &str = "Rewards";
pub const LABEL_PRINT_MENU: &str = "MENU";

/// Wrap a menu label in the arrow markers
pub fn menu_label(text: &str) -> String {
    format!("{BUTTON_START}{text}{BUTTON_END}")
}

pub fn intro_first() -> String {
    format!("My job is to help all of humanity, and you in particular, level up {SUNGLASSES}")
}

pub fn intro_second() -> String {
    format!(
        "I will keep track of your activity.\nUseful deeds get rewarded, and harmful ones cost you {GEM}"
    )
}

/// Label of a catalog list button, e.g. `+ 1 💎: Yoga (15 minutes)`
pub fn catalog_label(kind: CatalogKind, entry: &CatalogEntry) -> String {
    format!("{} {} {GEM}: {}", kind.sign(), entry.gems, entry.name)
}

pub fn list_prompt(kind: CatalogKind) -> &'static str {
    match kind {
        CatalogKind::UsefulActivity => USEFUL_ACTIVITIES_PROMPT,
        CatalogKind::Reward => REWARDS_PROMPT,
    }
}

pub fn balance(name: &str, gems: Gems) -> String {
    if gems.is_zero() {
        format!("{name}, you have 0 {GEM} \nMaybe it's time to do something useful?")
    } else {
        format!("{name}, you have {gems} {GEM}")
    }
}

pub fn earned(name: &str, entry: &CatalogEntry, balance: Gems) -> String {
    format!(
        "{name}, the \"{}\" activity is completed! {} {GEM} has been added to your account. \
         Keep it up! {BICEPS}{SUNGLASSES} Now you have {balance} {GEM}",
        entry.name, entry.gems
    )
}

pub fn earn_rejected(name: &str, entry: &CatalogEntry, error: &BalanceError) -> String {
    let reason = match error {
        BalanceError::ZeroValueEntry { .. } => {
            format!("the activity \"{}\" has no reward and can't be tracked", entry.name)
        }
        BalanceError::CapExceeded { max, .. } => format!(
            "it looks like you're a workaholic (or a fibber). You've reached the maximum of {max} {GEM} \n\
             Spend a little, having fun can be useful too!"
        ),
        BalanceError::InsufficientBalance { balance, .. } => {
            format!("your balance of {balance} {GEM} can't be changed right now")
        }
    };
    format!("{name}, I'm sorry, but {reason} {SAD} Your balance remains unchanged.")
}

pub fn spent(name: &str, entry: &CatalogEntry, balance: Gems) -> String {
    format!(
        "{name}, the reward \"{}\" has been paid for, get started! {} {GEM} has been deducted \
         from your account. Now you have {balance} {GEM}",
        entry.name, entry.gems
    )
}

pub fn spend_rejected(name: &str, entry: &CatalogEntry, error: &BalanceError) -> String {
    let reason = match error {
        BalanceError::ZeroValueEntry { .. } => {
            format!("the reward \"{}\" has no price and can't be redeemed", entry.name)
        }
        BalanceError::InsufficientBalance { balance, cost } => format!(
            "you currently have {balance} {GEM}. You cannot afford \"{}\" for {cost} {GEM}",
            entry.name
        ),
        BalanceError::CapExceeded { max, .. } => {
            format!("your balance is already at the maximum of {max} {GEM}")
        }
    };
    format!("{name}, no luck: {reason} {SAD} This reward is not available {DONT_KNOW}")
}

pub fn unknown_choice(name: &str, code: &str) -> String {
    format!(
        "{name}, I'm sorry, I don't recognize code '{code}' {SAD} Please report this error to my creator."
    )
}
