//! Conversation dispatcher
//!
//! Takes inbound events one at a time, resolves the sender to a ledger
//! record, and turns the choice into balance changes and render requests.
//! Every failure is answered in-conversation; nothing here is fatal.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use gembot_catalog::Catalogs;
use gembot_ledger::{BalanceError, LedgerError, User, UserLedger};
use gembot_types::{CatalogEntry, CatalogKind, ChatId, Gems, MenuCommand, Sender};

use crate::choice::Choice;
use crate::event::InboundEvent;
use crate::messages;
use crate::pacing::{pause, Pacing};
use crate::render::{IntroPart, Render, Renderer};
use crate::sink::MessageSink;

/// Where the conversation currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// The intro yes/no question is on screen
    AwaitingIntroChoice,
    /// The menu (or one of its lists) is on screen
    MenuActive,
}

/// What a single event resulted in
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DispatchOutcome {
    IntroOffered,
    IntroShown,
    MenuShown,
    BalanceShown {
        gems: Gems,
    },
    ListShown {
        kind: CatalogKind,
    },
    Earned {
        code: String,
        amount: Gems,
        balance: Gems,
    },
    Spent {
        code: String,
        amount: Gems,
        balance: Gems,
    },
    Rejected {
        code: String,
        reason: BalanceError,
    },
    UnknownChoice {
        code: String,
    },
    Unidentified,
}

pub struct DispatcherConfig {
    pub ledger: UserLedger,
    pub catalogs: Arc<Catalogs>,
    pub sink: Arc<dyn MessageSink>,
    pub pacing: Pacing,
}

pub struct Dispatcher {
    ledger: UserLedger,
    catalogs: Arc<Catalogs>,
    sink: Arc<dyn MessageSink>,
    pacing: Pacing,
    state: Option<SessionState>,
    target: Option<ChatId>,
}

impl Dispatcher {
    pub fn new(config: DispatcherConfig) -> Self {
        Self {
            ledger: config.ledger,
            catalogs: config.catalogs,
            sink: config.sink,
            pacing: config.pacing,
            state: None,
            target: None,
        }
    }

    pub fn ledger(&self) -> &UserLedger {
        &self.ledger
    }

    pub fn catalogs(&self) -> &Catalogs {
        &self.catalogs
    }

    pub fn pacing(&self) -> &Pacing {
        &self.pacing
    }

    /// `None` until the first session starts
    pub fn session_state(&self) -> Option<SessionState> {
        self.state
    }

    /// Chat every reply is delivered to
    pub fn conversation_target(&self) -> Option<ChatId> {
        self.target
    }

    /// Drain events until every sender handle is dropped
    ///
    /// Returns the number of events handled.
    pub async fn run(&mut self, mut events: mpsc::Receiver<InboundEvent>) -> usize {
        let mut handled = 0;
        while let Some(event) = events.recv().await {
            let outcome = self.handle(event).await;
            tracing::debug!(?outcome, "Event handled");
            handled += 1;
        }
        tracing::info!(handled, "Event stream closed");
        handled
    }

    pub async fn handle(&mut self, event: InboundEvent) -> DispatchOutcome {
        match event {
            InboundEvent::SessionStart { chat, sender } => self.start_session(chat, sender).await,
            InboundEvent::Choice { chat, sender, code } => {
                self.handle_choice(chat, sender, &code).await
            }
        }
    }

    async fn start_session(&mut self, chat: ChatId, sender: Option<Sender>) -> DispatchOutcome {
        let Some(sender) = sender else {
            return self.reject_unidentified(chat).await;
        };

        let user = self.ledger.get_or_create(&sender).await;
        self.target = Some(chat);
        self.state = Some(SessionState::AwaitingIntroChoice);
        tracing::info!(
            user = %user.id,
            chat = %chat,
            username = sender.username.as_deref().unwrap_or_default(),
            "Session started"
        );

        self.emit(Render::IntroChoice).await;
        DispatchOutcome::IntroOffered
    }

    async fn handle_choice(
        &mut self,
        chat: ChatId,
        sender: Option<Sender>,
        code: &str,
    ) -> DispatchOutcome {
        let Some(sender) = sender else {
            return self.reject_unidentified(chat).await;
        };

        if self.target.is_none() {
            self.target = Some(chat);
        }

        let user = self.ledger.get_or_create(&sender).await;
        tracing::info!(user = %user.id, code = %code, "Choice received");

        match Choice::resolve(code, &self.catalogs) {
            Choice::Menu(command) => self.handle_menu(&user, command).await,
            Choice::UsefulActivity(entry) => self.handle_earn(&user, entry).await,
            Choice::Reward(entry) => self.handle_spend(&user, entry).await,
            Choice::Unknown(code) => {
                tracing::warn!(user = %user.id, code = %code, "Unknown choice code");
                self.emit(Render::Text(messages::unknown_choice(&user.name, &code)))
                    .await;
                DispatchOutcome::UnknownChoice { code }
            }
        }
    }

    async fn handle_menu(&mut self, user: &User, command: MenuCommand) -> DispatchOutcome {
        match command {
            MenuCommand::PrintIntro => {
                self.emit(Render::IntroText(IntroPart::First)).await;
                pause(self.pacing.intro_first).await;
                self.emit(Render::IntroText(IntroPart::Second)).await;
                pause(self.pacing.intro_second).await;
                self.show_menu().await;
                DispatchOutcome::IntroShown
            }
            MenuCommand::SkipIntro | MenuCommand::PrintMenu => {
                self.show_menu().await;
                DispatchOutcome::MenuShown
            }
            MenuCommand::ShowBalance => {
                let gems = self.ledger.balance(&user.id).await.unwrap_or(user.gems);
                self.emit(Render::Text(messages::balance(&user.name, gems))).await;
                self.show_menu().await;
                DispatchOutcome::BalanceShown { gems }
            }
            MenuCommand::ShowUsefulActivities => {
                self.show_list(CatalogKind::UsefulActivity).await;
                DispatchOutcome::ListShown {
                    kind: CatalogKind::UsefulActivity,
                }
            }
            MenuCommand::ShowRewards => {
                self.show_list(CatalogKind::Reward).await;
                DispatchOutcome::ListShown {
                    kind: CatalogKind::Reward,
                }
            }
        }
    }

    async fn handle_earn(&mut self, user: &User, entry: CatalogEntry) -> DispatchOutcome {
        let outcome = match self.ledger.earn(&user.id, &entry).await {
            Ok(balance) => {
                self.emit(Render::Text(messages::earned(&user.name, &entry, balance)))
                    .await;
                DispatchOutcome::Earned {
                    code: entry.code.clone(),
                    amount: entry.gems,
                    balance,
                }
            }
            Err(LedgerError::Balance(reason)) => {
                tracing::debug!(user = %user.id, code = %entry.code, %reason, "Earn rejected");
                self.emit(Render::Text(messages::earn_rejected(&user.name, &entry, &reason)))
                    .await;
                DispatchOutcome::Rejected {
                    code: entry.code.clone(),
                    reason,
                }
            }
            Err(err) => return self.ledger_failure(user, err).await,
        };

        pause(self.pacing.after_action).await;
        self.show_list(CatalogKind::UsefulActivity).await;
        outcome
    }

    async fn handle_spend(&mut self, user: &User, entry: CatalogEntry) -> DispatchOutcome {
        let outcome = match self.ledger.spend(&user.id, &entry).await {
            Ok(balance) => {
                self.emit(Render::Text(messages::spent(&user.name, &entry, balance)))
                    .await;
                DispatchOutcome::Spent {
                    code: entry.code.clone(),
                    amount: entry.gems,
                    balance,
                }
            }
            Err(LedgerError::Balance(reason)) => {
                tracing::debug!(user = %user.id, code = %entry.code, %reason, "Spend rejected");
                self.emit(Render::Text(messages::spend_rejected(&user.name, &entry, &reason)))
                    .await;
                DispatchOutcome::Rejected {
                    code: entry.code.clone(),
                    reason,
                }
            }
            Err(err) => return self.ledger_failure(user, err).await,
        };

        pause(self.pacing.after_action).await;
        self.show_list(CatalogKind::Reward).await;
        outcome
    }

    /// The user vanished between lookup and mutation
    async fn ledger_failure(&mut self, user: &User, err: LedgerError) -> DispatchOutcome {
        tracing::warn!(user = %user.id, error = %err, "Ledger rejected a resolved user");
        self.emit(Render::Text(messages::UNIDENTIFIED_USER.to_string()))
            .await;
        DispatchOutcome::Unidentified
    }

    async fn reject_unidentified(&mut self, chat: ChatId) -> DispatchOutcome {
        tracing::warn!(chat = %chat, "Event without an identifiable sender");
        let target = self.target.unwrap_or(chat);
        self.send(target, Render::Text(messages::UNIDENTIFIED_USER.to_string()))
            .await;
        DispatchOutcome::Unidentified
    }

    async fn show_menu(&mut self) {
        self.state = Some(SessionState::MenuActive);
        self.emit(Render::Menu).await;
    }

    async fn show_list(&mut self, kind: CatalogKind) {
        self.state = Some(SessionState::MenuActive);
        self.emit(Render::CatalogList(kind)).await;
    }

    /// Send to the active conversation target
    async fn emit(&self, render: Render) {
        match self.target {
            Some(chat) => self.send(chat, render).await,
            None => tracing::warn!(?render, "No conversation target, message dropped"),
        }
    }

    async fn send(&self, chat: ChatId, render: Render) {
        let message = Renderer::render(chat, &render, &self.catalogs);
        if let Err(err) = self.sink.send(message).await {
            tracing::warn!(sink = self.sink.name(), error = %err, "Failed to deliver message");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;

    fn dispatcher() -> (Dispatcher, MemorySink) {
        let sink = MemorySink::new();
        let dispatcher = Dispatcher::new(DispatcherConfig {
            ledger: UserLedger::new(),
            catalogs: Arc::new(Catalogs::builtin()),
            sink: Arc::new(sink.clone()),
            pacing: Pacing::none(),
        });
        (dispatcher, sink)
    }

    #[tokio::test]
    async fn test_session_start_sets_target_and_state() {
        let (mut dispatcher, sink) = dispatcher();
        assert_eq!(dispatcher.session_state(), None);

        let outcome = dispatcher
            .handle(InboundEvent::session_start(ChatId::new(10), Sender::new(1, "Ada")))
            .await;

        assert_eq!(outcome, DispatchOutcome::IntroOffered);
        assert_eq!(dispatcher.conversation_target(), Some(ChatId::new(10)));
        assert_eq!(
            dispatcher.session_state(),
            Some(SessionState::AwaitingIntroChoice)
        );
        assert_eq!(dispatcher.ledger().user_count().await, 1);
        assert_eq!(sink.len().await, 1);
    }

    #[tokio::test]
    async fn test_choice_before_session_adopts_chat() {
        let (mut dispatcher, sink) = dispatcher();

        dispatcher
            .handle(InboundEvent::choice(ChatId::new(5), Sender::new(1, "Ada"), "print_menu"))
            .await;

        assert_eq!(dispatcher.conversation_target(), Some(ChatId::new(5)));
        assert_eq!(dispatcher.session_state(), Some(SessionState::MenuActive));
        assert_eq!(sink.messages().await[0].chat, ChatId::new(5));
    }

    #[tokio::test]
    async fn test_replies_follow_active_target() {
        let (mut dispatcher, sink) = dispatcher();
        dispatcher
            .handle(InboundEvent::session_start(ChatId::new(1), Sender::new(1, "Ada")))
            .await;
        sink.take().await;

        dispatcher
            .handle(InboundEvent::choice(ChatId::new(2), Sender::new(1, "Ada"), "show_balance"))
            .await;

        assert!(sink.messages().await.iter().all(|m| m.chat == ChatId::new(1)));
    }

    #[tokio::test]
    async fn test_unidentified_session_start_creates_nothing() {
        let (mut dispatcher, sink) = dispatcher();

        let outcome = dispatcher
            .handle(InboundEvent::SessionStart {
                chat: ChatId::new(3),
                sender: None,
            })
            .await;

        assert_eq!(outcome, DispatchOutcome::Unidentified);
        assert_eq!(dispatcher.session_state(), None);
        assert_eq!(dispatcher.conversation_target(), None);
        assert_eq!(dispatcher.ledger().user_count().await, 0);

        let sent = sink.messages().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].chat, ChatId::new(3));
        assert_eq!(sent[0].text, messages::UNIDENTIFIED_USER);
    }

    #[tokio::test]
    async fn test_run_drains_until_closed() {
        let (mut dispatcher, sink) = dispatcher();
        let (tx, rx) = mpsc::channel(8);
        let ada = Sender::new(1, "Ada");

        tx.send(InboundEvent::session_start(ChatId::new(1), ada.clone()))
            .await
            .unwrap();
        tx.send(InboundEvent::choice(ChatId::new(1), ada, "skip_intro"))
            .await
            .unwrap();
        drop(tx);

        assert_eq!(dispatcher.run(rx).await, 2);
        assert_eq!(sink.len().await, 2);
    }
}
