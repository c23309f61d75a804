//! GemBot Catalog - the two fixed tables of gem-bearing actions
//!
//! - Useful activities grant their gem value when logged
//! - Rewards cost their gem value when redeemed
//!
//! Catalogs are built once at startup (from the builtin tables or from
//! configuration), validated, and never change afterwards. Iteration order is
//! declaration order, which is also the order buttons are rendered in.
//!
//! # Invariants
//!
//! 1. Codes are unique within a catalog
//! 2. Codes never collide across catalogs
//! 3. Codes never shadow a reserved menu code

pub mod builtin;
pub mod error;

use serde::{Deserialize, Serialize};

use gembot_types::{is_reserved_code, CatalogEntry, CatalogKind};

pub use error::{CatalogError, Result};

/// An ordered, read-only table of entries of one kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    kind: CatalogKind,
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(kind: CatalogKind, entries: Vec<CatalogEntry>) -> Self {
        Self { kind, entries }
    }

    pub fn kind(&self) -> CatalogKind {
        self.kind
    }

    /// Look up an entry by its choice code
    pub fn find(&self, code: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|entry| entry.code == code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.find(code).is_some()
    }

    /// Entries in declaration order
    pub fn iter(&self) -> std::slice::Iter<'_, CatalogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn validate(&self) -> Result<()> {
        for (index, entry) in self.entries.iter().enumerate() {
            if entry.code.trim().is_empty() {
                return Err(CatalogError::EmptyCode {
                    kind: self.kind,
                    name: entry.name.clone(),
                });
            }
            if is_reserved_code(&entry.code) {
                return Err(CatalogError::ReservedCode {
                    kind: self.kind,
                    code: entry.code.clone(),
                });
            }
            if self.entries[..index].iter().any(|e| e.code == entry.code) {
                return Err(CatalogError::DuplicateCode {
                    kind: self.kind,
                    code: entry.code.clone(),
                });
            }
            if entry.gems.is_zero() {
                tracing::warn!(
                    kind = %self.kind,
                    code = %entry.code,
                    "Catalog entry has no gem value and will be rejected when used"
                );
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CatalogEntry;
    type IntoIter = std::slice::Iter<'a, CatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Both catalogs the bot works with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalogs {
    pub useful_activities: Catalog,
    pub rewards: Catalog,
}

impl Catalogs {
    /// Build and validate a catalog pair
    pub fn new(useful_activities: Vec<CatalogEntry>, rewards: Vec<CatalogEntry>) -> Result<Self> {
        let catalogs = Self {
            useful_activities: Catalog::new(CatalogKind::UsefulActivity, useful_activities),
            rewards: Catalog::new(CatalogKind::Reward, rewards),
        };
        catalogs.validate()?;
        Ok(catalogs)
    }

    /// The tables the bot ships with
    pub fn builtin() -> Self {
        Self {
            useful_activities: Catalog::new(
                CatalogKind::UsefulActivity,
                builtin::useful_activities(),
            ),
            rewards: Catalog::new(CatalogKind::Reward, builtin::rewards()),
        }
    }

    pub fn get(&self, kind: CatalogKind) -> &Catalog {
        match kind {
            CatalogKind::UsefulActivity => &self.useful_activities,
            CatalogKind::Reward => &self.rewards,
        }
    }

    /// Check the code invariants across both catalogs
    pub fn validate(&self) -> Result<()> {
        self.useful_activities.validate()?;
        self.rewards.validate()?;

        if let Some(entry) = self
            .rewards
            .iter()
            .find(|entry| self.useful_activities.contains(&entry.code))
        {
            return Err(CatalogError::CrossCatalogCollision {
                code: entry.code.clone(),
            });
        }
        Ok(())
    }
}

impl Default for Catalogs {
    fn default() -> Self {
        Self::builtin()
    }
}
