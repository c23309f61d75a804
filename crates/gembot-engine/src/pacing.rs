//! Conversational pacing
//!
//! Short pauses between messages so the bot reads like a person typing. The
//! waits go through `tokio::time`, so they never block a worker thread and
//! tests can run them on a paused clock.

use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pacing {
    /// Pause after the first intro message
    pub intro_first: Duration,
    /// Pause after the second intro message, before the menu
    pub intro_second: Duration,
    /// Pause between an earn/spend outcome and the list re-render
    pub after_action: Duration,
}

impl Pacing {
    pub fn from_secs(intro_first: u64, intro_second: u64, after_action: u64) -> Self {
        Self {
            intro_first: Duration::from_secs(intro_first),
            intro_second: Duration::from_secs(intro_second),
            after_action: Duration::from_secs(after_action),
        }
    }

    /// No pauses at all
    pub fn none() -> Self {
        Self {
            intro_first: Duration::ZERO,
            intro_second: Duration::ZERO,
            after_action: Duration::ZERO,
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self::from_secs(4, 7, 2)
    }
}

pub(crate) async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_delays() {
        let pacing = Pacing::default();
        assert_eq!(pacing.intro_first, Duration::from_secs(4));
        assert_eq!(pacing.intro_second, Duration::from_secs(7));
        assert_eq!(pacing.after_action, Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_advances_paused_clock() {
        let start = tokio::time::Instant::now();
        pause(Duration::from_secs(2)).await;
        assert_eq!(start.elapsed(), Duration::from_secs(2));

        let start = tokio::time::Instant::now();
        pause(Duration::ZERO).await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
