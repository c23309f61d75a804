//! GemBot Ledger - in-memory registry of users and their gem balances
//!
//! The ledger is:
//! - Keyed by sender identity (one record per `UserId`, for the process lifetime)
//! - Capped (no balance above the policy's `max_gems`)
//! - Non-negative (spends are rejected before they could underflow)
//! - Append-only in its history (every successful earn/spend is recorded)
//!
//! Balances only change through [`balance::earn`] and [`balance::spend`],
//! applied under the ledger's write lock. That lock is the single point of
//! mutual exclusion if events are ever handled concurrently.

pub mod balance;
pub mod error;
pub mod user;

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use gembot_types::{CatalogEntry, Gems, Sender, UserId};

pub use balance::{BalanceError, BalancePolicy};
pub use error::{LedgerError, Result};
pub use user::User;

/// Unique identifier for a ledger entry
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(pub String);

impl EntryId {
    pub fn new() -> Self {
        Self(format!("entry_{}", Uuid::new_v4()))
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

/// Direction of a balance change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    /// Gems granted for a useful activity
    Earn,
    /// Gems paid for a reward
    Spend,
}

/// A single successful balance change
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub entry_id: EntryId,
    pub user: UserId,
    pub kind: EntryKind,
    /// Catalog code that caused the change
    pub code: String,
    pub amount: Gems,
    pub balance_after: Gems,
    pub created_at: DateTime<Utc>,
}

/// The GemBot user ledger
///
/// Cheap to clone; clones share the same state.
#[derive(Clone)]
pub struct UserLedger {
    users: Arc<RwLock<HashMap<UserId, User>>>,
    /// Registration order; only written while the `users` write lock is held
    order: Arc<RwLock<Vec<UserId>>>,
    entries: Arc<RwLock<Vec<LedgerEntry>>>,
    policy: BalancePolicy,
}

impl UserLedger {
    /// Create an empty ledger with the default `MAX_GEMS` cap
    pub fn new() -> Self {
        Self::with_policy(BalancePolicy::default())
    }

    pub fn with_policy(policy: BalancePolicy) -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            order: Arc::new(RwLock::new(Vec::new())),
            entries: Arc::new(RwLock::new(Vec::new())),
            policy,
        }
    }

    pub fn policy(&self) -> &BalancePolicy {
        &self.policy
    }

    /// Look up a user by identity
    pub async fn find_user(&self, id: &UserId) -> Option<User> {
        self.users.read().await.get(id).cloned()
    }

    /// Register a new user with a zero balance
    ///
    /// Fails if the identity is already known; use [`Self::get_or_create`]
    /// when handling events.
    pub async fn register_user(&self, id: &UserId, name: impl Into<String>) -> Result<User> {
        let mut users = self.users.write().await;
        if users.contains_key(id) {
            return Err(LedgerError::AlreadyRegistered { user: *id });
        }

        let user = User::new(*id, name);
        users.insert(*id, user.clone());
        self.order.write().await.push(*id);
        tracing::info!(user = %id, name = %user.name, "User registered");
        Ok(user)
    }

    /// Return the existing record for the sender, registering it first if unseen
    ///
    /// The display name is only read from `sender` on first contact.
    pub async fn get_or_create(&self, sender: &Sender) -> User {
        if let Some(user) = self.find_user(&sender.id).await {
            return user;
        }

        let mut users = self.users.write().await;
        if let Some(user) = users.get(&sender.id) {
            return user.clone();
        }

        let user = User::new(sender.id, sender.display_name());
        users.insert(sender.id, user.clone());
        self.order.write().await.push(sender.id);
        tracing::info!(user = %sender.id, name = %user.name, "User registered");
        user
    }

    /// Current balance, if the user is known
    pub async fn balance(&self, id: &UserId) -> Option<Gems> {
        self.users.read().await.get(id).map(|u| u.gems)
    }

    /// Credit a useful activity to a user
    ///
    /// Returns the new balance. On failure the balance is unchanged and no
    /// entry is recorded.
    pub async fn earn(&self, id: &UserId, entry: &CatalogEntry) -> Result<Gems> {
        let policy = self.policy;
        self.apply(id, entry, EntryKind::Earn, |user| {
            balance::earn(user, entry, &policy)
        })
        .await
    }

    /// Charge a reward to a user
    ///
    /// Returns the new balance. On failure the balance is unchanged and no
    /// entry is recorded.
    pub async fn spend(&self, id: &UserId, entry: &CatalogEntry) -> Result<Gems> {
        self.apply(id, entry, EntryKind::Spend, |user| balance::spend(user, entry))
            .await
    }

    async fn apply<F>(&self, id: &UserId, entry: &CatalogEntry, kind: EntryKind, op: F) -> Result<Gems>
    where
        F: FnOnce(&mut User) -> std::result::Result<Gems, BalanceError>,
    {
        let mut users = self.users.write().await;
        let mut entries = self.entries.write().await;

        let user = users
            .get_mut(id)
            .ok_or(LedgerError::UserNotFound { user: *id })?;

        let balance_after = op(user)?;

        entries.push(LedgerEntry {
            entry_id: EntryId::new(),
            user: *id,
            kind,
            code: entry.code.clone(),
            amount: entry.gems,
            balance_after,
            created_at: Utc::now(),
        });

        Ok(balance_after)
    }

    /// All entries for a user, oldest first
    pub async fn history(&self, id: &UserId) -> Vec<LedgerEntry> {
        let entries = self.entries.read().await;
        entries.iter().filter(|e| &e.user == id).cloned().collect()
    }

    /// Get recent entries (newest first)
    pub async fn recent_entries(&self, limit: usize) -> Vec<LedgerEntry> {
        let entries = self.entries.read().await;
        entries.iter().rev().take(limit).cloned().collect()
    }

    pub async fn entry_count(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }

    /// Snapshot of all users in registration order
    pub async fn users(&self) -> Vec<User> {
        let users = self.users.read().await;
        let order = self.order.read().await;
        order.iter().filter_map(|id| users.get(id).cloned()).collect()
    }
}

impl Default for UserLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gembot_types::MAX_GEMS;

    fn yoga() -> CatalogEntry {
        CatalogEntry::new("yoga", "Yoga (15 minutes)", 1)
    }

    fn movie() -> CatalogEntry {
        CatalogEntry::new("watch_movie", "Watching a movie (1 item)", 30)
    }

    #[tokio::test]
    async fn test_register_and_find() {
        let ledger = UserLedger::new();
        let id = UserId::new(7);

        assert!(ledger.find_user(&id).await.is_none());

        let user = ledger.register_user(&id, "Ada").await.unwrap();
        assert_eq!(user.gems, Gems::zero());
        assert_eq!(ledger.find_user(&id).await, Some(user));
    }

    #[tokio::test]
    async fn test_register_twice_fails() {
        let ledger = UserLedger::new();
        let id = UserId::new(7);

        ledger.register_user(&id, "Ada").await.unwrap();
        let result = ledger.register_user(&id, "Other").await;
        assert_eq!(result, Err(LedgerError::AlreadyRegistered { user: id }));
        assert_eq!(ledger.user_count().await, 1);
    }

    #[tokio::test]
    async fn test_get_or_create_returns_same_record() {
        let ledger = UserLedger::new();
        let sender = Sender::new(1, "Ada").with_last_name("Lovelace");

        let first = ledger.get_or_create(&sender).await;
        let renamed = Sender::new(1, "Countess");
        let second = ledger.get_or_create(&renamed).await;

        assert_eq!(first, second);
        assert_eq!(second.name, "Ada Lovelace");
        assert_eq!(ledger.user_count().await, 1);
    }

    #[tokio::test]
    async fn test_earn_and_spend_record_history() {
        let ledger = UserLedger::new();
        let id = UserId::new(1);
        ledger.register_user(&id, "Ada").await.unwrap();

        for _ in 0..31 {
            ledger.earn(&id, &yoga()).await.unwrap();
        }
        let balance = ledger.spend(&id, &movie()).await.unwrap();

        assert_eq!(balance, Gems(1));
        assert_eq!(ledger.balance(&id).await, Some(Gems(1)));

        let history = ledger.history(&id).await;
        assert_eq!(history.len(), 32);
        assert_eq!(history.last().map(|e| e.kind), Some(EntryKind::Spend));
        assert_eq!(ledger.recent_entries(1).await[0].code, "watch_movie");
    }

    #[tokio::test]
    async fn test_failed_spend_leaves_no_trace() {
        let ledger = UserLedger::new();
        let id = UserId::new(1);
        ledger.register_user(&id, "Ada").await.unwrap();
        ledger.earn(&id, &yoga()).await.unwrap();

        let result = ledger.spend(&id, &movie()).await;
        assert!(matches!(
            result,
            Err(LedgerError::Balance(BalanceError::InsufficientBalance { .. }))
        ));
        assert_eq!(ledger.balance(&id).await, Some(Gems(1)));
        assert_eq!(ledger.entry_count().await, 1);
    }

    #[tokio::test]
    async fn test_cap_enforced() {
        let ledger = UserLedger::new();
        let id = UserId::new(1);
        ledger.register_user(&id, "Ada").await.unwrap();

        let bulk = CatalogEntry::new("marathon", "Marathon", 500);
        assert_eq!(ledger.earn(&id, &bulk).await, Ok(MAX_GEMS));

        let result = ledger.earn(&id, &yoga()).await;
        assert!(matches!(
            result,
            Err(LedgerError::Balance(BalanceError::CapExceeded { .. }))
        ));
        assert_eq!(ledger.balance(&id).await, Some(MAX_GEMS));
    }

    #[tokio::test]
    async fn test_custom_policy_cap() {
        let ledger = UserLedger::with_policy(BalancePolicy::with_cap(Gems(2)));
        let id = UserId::new(1);
        ledger.register_user(&id, "Ada").await.unwrap();

        ledger.earn(&id, &yoga()).await.unwrap();
        ledger.earn(&id, &yoga()).await.unwrap();
        assert!(ledger.earn(&id, &yoga()).await.is_err());
        assert_eq!(ledger.balance(&id).await, Some(Gems(2)));
    }

    #[tokio::test]
    async fn test_unknown_user() {
        let ledger = UserLedger::new();
        let id = UserId::new(99);

        assert_eq!(
            ledger.earn(&id, &yoga()).await,
            Err(LedgerError::UserNotFound { user: id })
        );
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let ledger = UserLedger::new();
        let other = ledger.clone();
        let sender = Sender::new(5, "Grace");

        ledger.get_or_create(&sender).await;
        other.earn(&sender.id, &yoga()).await.unwrap();

        assert_eq!(ledger.balance(&sender.id).await, Some(Gems(1)));
        assert_eq!(ledger.users().await.len(), 1);
    }

    #[tokio::test]
    async fn test_users_keep_registration_order() {
        let ledger = UserLedger::new();
        ledger.register_user(&UserId::new(3), "Carol").await.unwrap();
        ledger.get_or_create(&Sender::new(2, "Bob")).await;
        ledger.register_user(&UserId::new(1), "Alice").await.unwrap();
        ledger.get_or_create(&Sender::new(3, "Carol again")).await;

        let ids: Vec<i64> = ledger
            .users()
            .await
            .iter()
            .map(|u| u.id.as_i64())
            .collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }
}
