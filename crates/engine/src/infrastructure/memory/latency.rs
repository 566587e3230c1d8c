//! Simulated network latency for the in-memory adapters.
//!
//! The adapters stand in for a remote API, so by default every call waits as
//! long as a round trip would. Tests and scripted runs turn this off.

use std::time::Duration;

/// Repository call being simulated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListStories,
    ListUsers,
    ListMessages,
    ListPosts,
    ListActivities,
    ListConversations,
    Get,
    Create,
    Update,
    Delete,
    MarkRead,
}

impl Operation {
    pub fn delay(self) -> Duration {
        let millis = match self {
            Self::ListStories | Self::ListUsers | Self::ListMessages => 250,
            Self::ListPosts | Self::ListActivities | Self::ListConversations => 300,
            Self::Get | Self::MarkRead => 200,
            Self::Create => 400,
            Self::Update | Self::Delete => 300,
        };
        Duration::from_millis(millis)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SimulatedLatency {
    enabled: bool,
}

impl SimulatedLatency {
    pub fn enabled() -> Self {
        Self { enabled: true }
    }

    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    pub fn from_flag(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(self) -> bool {
        self.enabled
    }

    pub async fn wait(self, operation: Operation) {
        if self.enabled {
            tokio::time::sleep(operation.delay()).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delays_follow_the_operation() {
        assert_eq!(Operation::ListStories.delay(), Duration::from_millis(250));
        assert_eq!(Operation::ListPosts.delay(), Duration::from_millis(300));
        assert_eq!(Operation::Get.delay(), Duration::from_millis(200));
        assert_eq!(Operation::Create.delay(), Duration::from_millis(400));
        assert_eq!(Operation::Delete.delay(), Duration::from_millis(300));
    }

    #[tokio::test(start_paused = true)]
    async fn enabled_latency_sleeps() {
        let start = tokio::time::Instant::now();
        SimulatedLatency::enabled().wait(Operation::Create).await;
        assert!(start.elapsed() >= Duration::from_millis(400));
    }

    #[tokio::test(start_paused = true)]
    async fn disabled_latency_returns_immediately() {
        let start = tokio::time::Instant::now();
        SimulatedLatency::disabled().wait(Operation::Create).await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
