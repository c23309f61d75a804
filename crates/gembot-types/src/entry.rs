//! Catalog entries
//!
//! A catalog entry is an immutable (code, name, gems) triple. Whether the
//! gems are granted or charged depends on which catalog holds the entry.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Gems;

/// Which of the two catalogs an entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogKind {
    /// Activities that earn gems
    UsefulActivity,
    /// Rewards that cost gems
    Reward,
}

impl CatalogKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CatalogKind::UsefulActivity => "useful_activity",
            CatalogKind::Reward => "reward",
        }
    }

    /// Sign shown in front of the gem value on list buttons
    pub fn sign(&self) -> char {
        match self {
            CatalogKind::UsefulActivity => '+',
            CatalogKind::Reward => '-',
        }
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of a catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Wire-level choice token, unique across both catalogs
    pub code: String,
    /// Human-readable name
    pub name: String,
    /// Gems granted (useful activity) or charged (reward)
    pub gems: Gems,
}

impl CatalogEntry {
    pub fn new(code: impl Into<String>, name: impl Into<String>, gems: u16) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            gems: Gems(gems),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_deserializes_from_config_shape() {
        let entry: CatalogEntry =
            serde_json::from_str(r#"{"code":"yoga","name":"Yoga (15 minutes)","gems":1}"#).unwrap();
        assert_eq!(entry, CatalogEntry::new("yoga", "Yoga (15 minutes)", 1));
    }
}
