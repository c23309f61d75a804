//! Display utilities for the console

use colored::*;

use gembot_engine::OutboundMessage;
use gembot_ledger::User;

/// Print a section header
pub fn section(title: &str) {
    println!();
    println!("{}", "━".repeat(60).bright_black());
    println!(" {}", title.bright_white().bold());
    println!("{}", "━".repeat(60).bright_black());
}

/// Print an info message
pub fn info(message: &str) {
    println!("  {} {}", "→".bright_blue(), message);
}

/// Print a warning message
pub fn warning(message: &str) {
    println!("  {} {}", "⚠".yellow(), message.yellow());
}

/// Print a key-value pair
pub fn kv(key: &str, value: &str) {
    println!("      {}: {}", key, value.bright_cyan());
}

/// Print a message from the bot with its buttons, one per row
pub fn bot_message(message: &OutboundMessage) {
    println!();
    for (i, line) in message.text.lines().enumerate() {
        let marker = if i == 0 { "🤖" } else { "  " };
        println!("{} {}", marker, line.bright_white());
    }
    for (i, button) in message.buttons.iter().enumerate() {
        println!(
            "   {} {} {}",
            format!("{}.", i + 1).bright_black(),
            button.label.bright_cyan(),
            format!("[{}]", button.code).bright_black()
        );
    }
}

/// Print the startup banner and the console commands
pub fn banner(bot_name: &str, speaking_as: &str) {
    section(&format!("{bot_name} console"));
    kv("speaking as", speaking_as);
    info("Type /start to begin, or a button code in [brackets] to press it");
    info("/whoami <id> <first> [last] switches user, /anon <code> sends without a sender");
}

/// Print every user and balance
pub fn ledger_summary(users: &[User]) {
    section("Balances");
    if users.is_empty() {
        info("No users");
        return;
    }
    for user in users {
        kv(&format!("{} ({})", user.name, user.id), &format!("{} 💎", user.gems));
    }
}
