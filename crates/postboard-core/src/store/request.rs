//! Lifecycle tracking for one outstanding backend call.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Status of the most recent call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

impl RequestStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RequestStatus::Idle => "idle",
            RequestStatus::Loading => "loading",
            RequestStatus::Succeeded => "succeeded",
            RequestStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status plus the last error message of a single kind of call.
///
/// Overlapping calls sharing one tracker are not told apart; the last
/// transition wins. Keep one tracker per call when that matters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestTracker {
    status: RequestStatus,
    error: Option<String>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> RequestStatus {
        self.status
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_idle(&self) -> bool {
        self.status == RequestStatus::Idle
    }

    pub fn is_loading(&self) -> bool {
        self.status == RequestStatus::Loading
    }

    /// A call was issued. The previous error is kept until the call settles.
    pub fn on_start(&self) -> Self {
        Self {
            status: RequestStatus::Loading,
            error: self.error.clone(),
        }
    }

    pub fn on_success(&self) -> Self {
        Self {
            status: RequestStatus::Succeeded,
            error: None,
        }
    }

    pub fn on_failure(&self, message: impl Into<String>) -> Self {
        Self {
            status: RequestStatus::Failed,
            error: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_idle() {
        let tracker = RequestTracker::new();
        assert!(tracker.is_idle());
        assert_eq!(tracker.error(), None);
    }

    #[test]
    fn test_start_then_success() {
        let tracker = RequestTracker::new().on_start();
        assert!(tracker.is_loading());

        let tracker = tracker.on_success();
        assert_eq!(tracker.status(), RequestStatus::Succeeded);
        assert_eq!(tracker.error(), None);
    }

    #[test]
    fn test_start_then_failure() {
        let tracker = RequestTracker::new().on_start().on_failure("x");
        assert_eq!(tracker.status(), RequestStatus::Failed);
        assert_eq!(tracker.error(), Some("x"));
    }

    #[test]
    fn test_success_clears_previous_failure() {
        let failed = RequestTracker::new().on_start().on_failure("boom");
        let tracker = failed.on_start().on_success();
        assert_eq!(tracker.status(), RequestStatus::Succeeded);
        assert_eq!(tracker.error(), None);
    }

    #[test]
    fn test_fresh_start_after_terminal_status() {
        let done = RequestTracker::new().on_start().on_success();
        assert!(done.on_start().is_loading());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(RequestStatus::Succeeded.to_string(), "succeeded");
        assert_eq!(
            serde_json::to_string(&RequestStatus::Loading).unwrap(),
            "\"loading\""
        );
    }
}
