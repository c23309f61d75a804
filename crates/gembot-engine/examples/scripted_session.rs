//! GemBot Demo - a scripted conversation
//!
//! Plays one user through the whole loop without a transport:
//!
//! Start → Skip intro → Earn → Refused reward → Save up → Redeem → Balance
//!
//! Run with:
//!   cargo run -p gembot-engine --example scripted_session

use std::sync::Arc;

use gembot_catalog::Catalogs;
use gembot_engine::{Dispatcher, DispatcherConfig, InboundEvent, MemorySink, Pacing};
use gembot_ledger::UserLedger;
use gembot_types::{ChatId, Sender};

#[tokio::main]
async fn main() {
    let chat = ChatId::new(1);
    let ada = Sender::new(1, "Ada").with_last_name("Lovelace");

    let sink = MemorySink::new();
    let mut dispatcher = Dispatcher::new(DispatcherConfig {
        ledger: UserLedger::new(),
        catalogs: Arc::new(Catalogs::builtin()),
        sink: Arc::new(sink.clone()),
        pacing: Pacing::none(),
    });

    let mut script = vec![
        InboundEvent::session_start(chat, ada.clone()),
        InboundEvent::choice(chat, ada.clone(), "skip_intro"),
        InboundEvent::choice(chat, ada.clone(), "yoga"),
        InboundEvent::choice(chat, ada.clone(), "watch_series"),
    ];
    script.extend((0..9).map(|_| InboundEvent::choice(chat, ada.clone(), "reading")));
    script.push(InboundEvent::choice(chat, ada.clone(), "watch_series"));
    script.push(InboundEvent::choice(chat, ada.clone(), "show_balance"));

    for event in script {
        let label = match &event {
            InboundEvent::SessionStart { .. } => "/start".to_string(),
            InboundEvent::Choice { code, .. } => code.clone(),
        };
        let outcome = dispatcher.handle(event).await;

        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        println!(" > {label}    ({outcome:?})");
        for message in sink.take().await {
            println!("  {}", message.text.replace('\n', "\n  "));
            for button in &message.buttons {
                println!("     [{}] {}", button.code, button.label);
            }
        }
    }

    let users = dispatcher.ledger().users().await;
    println!();
    for user in users {
        let history = dispatcher.ledger().history(&user.id).await;
        println!("  {} : {} 💎 after {} entries", user.name, user.gems, history.len());
    }
}
