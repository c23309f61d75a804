//! The gem amount type
//!
//! Gems are whole, unsigned units. All arithmetic is checked: callers must
//! reject an overflow or underflow instead of wrapping.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Hard ceiling on any user balance
pub const MAX_GEMS: Gems = Gems(500);

/// An amount of gems
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Gems(pub u16);

impl Gems {
    pub fn zero() -> Self {
        Self(0)
    }

    pub fn new(value: u16) -> Self {
        Self(value)
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn value(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for Gems {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u16> for Gems {
    fn from(value: u16) -> Self {
        Self(value)
    }
}
