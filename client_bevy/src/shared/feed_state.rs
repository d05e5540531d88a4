use bevy::prelude::Resource;

#[derive(Debug, Clone, PartialEq)]
pub enum FeedPhase {
    Waiting,
    Healthy,
    Failing(String),
}

/// What the diagnostic overlay knows about snapshot polling.
#[derive(Resource, Debug, Clone)]
pub struct FeedStatus {
    pub phase: FeedPhase,
    pub users_in_last_snapshot: usize,
    /// Elapsed app seconds at the last good snapshot
    pub last_success_time: Option<f64>,
    pub consecutive_failures: u32,
}

impl Default for FeedStatus {
    fn default() -> Self {
        Self {
            phase: FeedPhase::Waiting,
            users_in_last_snapshot: 0,
            last_success_time: None,
            consecutive_failures: 0,
        }
    }
}

impl FeedStatus {
    pub fn record_success(&mut self, users: usize, now: f64) {
        self.phase = FeedPhase::Healthy;
        self.users_in_last_snapshot = users;
        self.last_success_time = Some(now);
        self.consecutive_failures = 0;
    }

    pub fn record_failure(&mut self, reason: String) {
        self.phase = FeedPhase::Failing(reason);
        self.consecutive_failures += 1;
    }

    /// One-line summary for the overlay.
    pub fn summary(&self, balloons: usize, now: f64) -> String {
        let age = self
            .last_success_time
            .map(|t| format!("{:.0}s ago", (now - t).max(0.0)))
            .unwrap_or_else(|| "never".to_string());
        match &self.phase {
            FeedPhase::Waiting => format!("feed: waiting | {balloons} balloons"),
            FeedPhase::Healthy => format!(
                "feed: ok ({} users) | {balloons} balloons | synced {age}",
                self.users_in_last_snapshot
            ),
            FeedPhase::Failing(reason) => format!(
                "feed: error x{} ({reason}) | {balloons} balloons | synced {age}",
                self.consecutive_failures
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_keeps_last_success_time() {
        let mut status = FeedStatus::default();
        status.record_success(4, 10.0);
        status.record_failure("connection refused".to_string());
        status.record_failure("connection refused".to_string());

        assert_eq!(status.last_success_time, Some(10.0));
        assert_eq!(status.consecutive_failures, 2);
        let line = status.summary(4, 25.0);
        assert!(line.contains("error x2"));
        assert!(line.contains("synced 15s ago"));
    }

    #[test]
    fn success_resets_failures() {
        let mut status = FeedStatus::default();
        status.record_failure("timeout".to_string());
        status.record_success(2, 3.0);
        assert_eq!(status.phase, FeedPhase::Healthy);
        assert_eq!(status.consecutive_failures, 0);
        assert_eq!(status.summary(2, 3.0), "feed: ok (2 users) | 2 balloons | synced 0s ago");
    }

    #[test]
    fn waiting_summary_before_first_poll() {
        let status = FeedStatus::default();
        assert_eq!(status.summary(0, 1.0), "feed: waiting | 0 balloons");
    }
}
