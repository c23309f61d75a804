//! Balance engine
//!
//! Pure validation and mutation of a single user's gem balance. Every check
//! runs before the arithmetic, so a failed call never touches the balance.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use gembot_types::{CatalogEntry, Gems, MAX_GEMS};

use crate::User;

/// Why an earn or spend was refused
///
/// These are ordinary outcomes reported back to the user, not faults.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BalanceError {
    #[error("Entry {code} has no gem value")]
    ZeroValueEntry { code: String, name: String },

    #[error("Balance cap exceeded: have {balance}, adding {value} would pass {max}")]
    CapExceeded { balance: Gems, value: Gems, max: Gems },

    #[error("Insufficient balance: have {balance}, need {cost}")]
    InsufficientBalance { balance: Gems, cost: Gems },
}

/// Limits applied by the balance engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalancePolicy {
    pub max_gems: Gems,
}

impl BalancePolicy {
    /// Policy with a custom cap, clamped to `MAX_GEMS`
    pub fn with_cap(max_gems: Gems) -> Self {
        Self {
            max_gems: max_gems.min(MAX_GEMS),
        }
    }
}

impl Default for BalancePolicy {
    fn default() -> Self {
        Self { max_gems: MAX_GEMS }
    }
}

/// Credit a useful activity's reward to the user
///
/// Returns the new balance.
pub fn earn(user: &mut User, entry: &CatalogEntry, policy: &BalancePolicy) -> Result<Gems, BalanceError> {
    if entry.gems.is_zero() {
        return Err(zero_value(entry));
    }

    let new_balance = user
        .gems
        .checked_add(entry.gems)
        .filter(|total| *total <= policy.max_gems)
        .ok_or(BalanceError::CapExceeded {
            balance: user.gems,
            value: entry.gems,
            max: policy.max_gems,
        })?;

    user.gems = new_balance;
    Ok(new_balance)
}

/// Charge a reward's cost to the user
///
/// Returns the new balance.
pub fn spend(user: &mut User, entry: &CatalogEntry) -> Result<Gems, BalanceError> {
    if entry.gems.is_zero() {
        return Err(zero_value(entry));
    }

    if user.gems < entry.gems {
        return Err(BalanceError::InsufficientBalance {
            balance: user.gems,
            cost: entry.gems,
        });
    }

    let new_balance = user
        .gems
        .checked_sub(entry.gems)
        .ok_or(BalanceError::InsufficientBalance {
            balance: user.gems,
            cost: entry.gems,
        })?;

    user.gems = new_balance;
    Ok(new_balance)
}

fn zero_value(entry: &CatalogEntry) -> BalanceError {
    BalanceError::ZeroValueEntry {
        code: entry.code.clone(),
        name: entry.name.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gembot_types::UserId;
    use proptest::prelude::*;

    fn user_with(gems: u16) -> User {
        let mut user = User::new(UserId::new(1), "Ada");
        user.gems = Gems(gems);
        user
    }

    #[test]
    fn test_earn_increments() {
        let mut user = user_with(0);
        let yoga = CatalogEntry::new("yoga", "Yoga (15 minutes)", 1);

        let balance = earn(&mut user, &yoga, &BalancePolicy::default()).unwrap();
        assert_eq!(balance, Gems(1));
        assert_eq!(user.gems, Gems(1));
    }

    #[test]
    fn test_earn_up_to_cap_exactly() {
        let mut user = user_with(499);
        let yoga = CatalogEntry::new("yoga", "Yoga (15 minutes)", 1);

        assert_eq!(earn(&mut user, &yoga, &BalancePolicy::default()), Ok(MAX_GEMS));
    }

    #[test]
    fn test_earn_past_cap_rejected() {
        let mut user = user_with(500);
        let yoga = CatalogEntry::new("yoga", "Yoga (15 minutes)", 1);

        let result = earn(&mut user, &yoga, &BalancePolicy::default());
        assert!(matches!(result, Err(BalanceError::CapExceeded { .. })));
        assert_eq!(user.gems, Gems(500));
    }

    #[test]
    fn test_earn_overflowing_u16_rejected_as_cap() {
        let mut user = user_with(400);
        let jackpot = CatalogEntry::new("jackpot", "Jackpot", u16::MAX);

        let result = earn(&mut user, &jackpot, &BalancePolicy::default());
        assert!(matches!(result, Err(BalanceError::CapExceeded { .. })));
        assert_eq!(user.gems, Gems(400));
    }

    #[test]
    fn test_spend_decrements() {
        let mut user = user_with(40);
        let movie = CatalogEntry::new("watch_movie", "Watching a movie (1 item)", 30);

        assert_eq!(spend(&mut user, &movie), Ok(Gems(10)));
        assert_eq!(user.gems, Gems(10));
    }

    #[test]
    fn test_spend_insufficient_rejected() {
        let mut user = user_with(1);
        let movie = CatalogEntry::new("watch_movie", "Watching a movie (1 item)", 30);

        assert_eq!(
            spend(&mut user, &movie),
            Err(BalanceError::InsufficientBalance {
                balance: Gems(1),
                cost: Gems(30),
            })
        );
        assert_eq!(user.gems, Gems(1));
    }

    #[test]
    fn test_zero_value_entries_rejected() {
        let mut user = user_with(10);
        let free = CatalogEntry::new("free", "Free lunch", 0);

        assert!(matches!(
            earn(&mut user, &free, &BalancePolicy::default()),
            Err(BalanceError::ZeroValueEntry { .. })
        ));
        assert!(matches!(
            spend(&mut user, &free),
            Err(BalanceError::ZeroValueEntry { .. })
        ));
        assert_eq!(user.gems, Gems(10));
    }

    #[test]
    fn test_policy_cap_is_clamped() {
        assert_eq!(BalancePolicy::with_cap(Gems(100)).max_gems, Gems(100));
        assert_eq!(BalancePolicy::with_cap(Gems(9_000)).max_gems, MAX_GEMS);
    }

    proptest! {
        #[test]
        fn earn_succeeds_iff_within_cap(balance in 0_u16..=500, value in 1_u16..=600) {
            let mut user = user_with(balance);
            let entry = CatalogEntry::new("x", "X", value);

            let result = earn(&mut user, &entry, &BalancePolicy::default());
            if u32::from(balance) + u32::from(value) <= 500 {
                prop_assert_eq!(result, Ok(Gems(balance + value)));
                prop_assert_eq!(user.gems, Gems(balance + value));
            } else {
                let is_cap_exceeded = matches!(result, Err(BalanceError::CapExceeded { .. }));
                prop_assert!(is_cap_exceeded);
                prop_assert_eq!(user.gems, Gems(balance));
            }
        }

        #[test]
        fn spend_succeeds_iff_affordable(balance in 0_u16..=500, cost in 1_u16..=600) {
            let mut user = user_with(balance);
            let entry = CatalogEntry::new("x", "X", cost);

            let result = spend(&mut user, &entry);
            if balance >= cost {
                prop_assert_eq!(result, Ok(Gems(balance - cost)));
                prop_assert_eq!(user.gems, Gems(balance - cost));
            } else {
                let is_insufficient = matches!(result, Err(BalanceError::InsufficientBalance { .. }));
                prop_assert!(is_insufficient);
                prop_assert_eq!(user.gems, Gems(balance));
            }
        }

        #[test]
        fn repeated_failures_are_idempotent(balance in 0_u16..30, repeats in 1_usize..10) {
            let mut user = user_with(balance);
            let movie = CatalogEntry::new("watch_movie", "Movie", 30);

            let first = spend(&mut user, &movie);
            for _ in 0..repeats {
                prop_assert_eq!(spend(&mut user, &movie), first.clone());
            }
            prop_assert_eq!(user.gems, Gems(balance));
        }

        #[test]
        fn balance_stays_in_bounds(ops in proptest::collection::vec((any::<bool>(), 1_u16..80), 0..200)) {
            let mut user = user_with(0);
            let policy = BalancePolicy::default();

            for (is_earn, value) in ops {
                let entry = CatalogEntry::new("x", "X", value);
                let _ = if is_earn {
                    earn(&mut user, &entry, &policy)
                } else {
                    spend(&mut user, &entry)
                };
                prop_assert!(user.gems <= MAX_GEMS);
            }
        }
    }
}
