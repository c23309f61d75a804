//! User records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gembot_types::{Gems, UserId};

/// A known user and their gem balance
///
/// The name is captured at registration and never updated, even if the
/// sender later changes it on the transport side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub gems: Gems,
    pub registered_at: DateTime<Utc>,
}

impl User {
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            gems: Gems::zero(),
            registered_at: Utc::now(),
        }
    }
}
