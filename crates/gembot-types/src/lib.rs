//! GemBot Types - Canonical domain types for the gem-tracking chat bot
//!
//! This crate contains the foundational types shared by every other gembot
//! crate, with zero dependencies on them:
//!
//! - Identity types (`UserId`, `ChatId`, `Sender`)
//! - The `Gems` currency amount and the global `MAX_GEMS` cap
//! - Catalog entries (useful activities and rewards)
//! - Reserved menu choice codes and display emoji
//!
//! # Invariants
//!
//! 1. A balance is always within `0..=MAX_GEMS`
//! 2. Catalog codes never collide with the reserved menu codes
//! 3. One user record per sender identity

pub mod codes;
pub mod emoji;
pub mod entry;
pub mod error;
pub mod gems;
pub mod identity;

pub use codes::*;
pub use entry::*;
pub use error::*;
pub use gems::*;
pub use identity::*;
