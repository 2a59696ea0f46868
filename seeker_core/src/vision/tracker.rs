// seeker_core/src/vision/tracker.rs

use serde::{Deserialize, Serialize};

use super::VisionResponse;
use crate::error::{SeekerError, SeekerResult};

/// Identifies one capture sent to the vision service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestToken(pub u64);

/// Rate-limits captures and discards results that arrive after the agent
/// has moved on (mission step change, view switch, reset).
#[derive(Debug, Clone, PartialEq)]
pub struct VisionRequestTracker {
    /// Minimum seconds between two captures.
    pub interval: f64,
    issued: u64,
    in_flight: Option<RequestToken>,
    last_capture: Option<f64>,
}

impl Default for VisionRequestTracker {
    fn default() -> Self {
        Self::new(0.6)
    }
}

impl VisionRequestTracker {
    pub fn new(interval: f64) -> Self {
        Self {
            interval,
            issued: 0,
            in_flight: None,
            last_capture: None,
        }
    }

    pub fn in_flight(&self) -> Option<RequestToken> {
        self.in_flight
    }

    /// Starts a capture at `now` (seconds) if none is pending and the
    /// interval has elapsed.
    pub fn try_begin(&mut self, now: f64) -> Option<RequestToken> {
        if self.in_flight.is_some() {
            return None;
        }
        if matches!(self.last_capture, Some(t) if now - t < self.interval) {
            return None;
        }
        self.issued += 1;
        let token = RequestToken(self.issued);
        self.in_flight = Some(token);
        self.last_capture = Some(now);
        Some(token)
    }

    /// Accepts the result for `token` if it is the pending one.
    pub fn complete(&mut self, token: RequestToken) -> SeekerResult<()> {
        if self.in_flight == Some(token) {
            self.in_flight = None;
            Ok(())
        } else {
            Err(SeekerError::StaleVisionResult { token: token.0 })
        }
    }

    /// Settles a service reply. Stale replies yield `None`; failures are
    /// converted into a SCAN fallback.
    pub fn resolve(
        &mut self,
        token: RequestToken,
        result: SeekerResult<VisionResponse>,
    ) -> Option<VisionResponse> {
        self.complete(token).ok()?;
        Some(result.unwrap_or_else(|e| VisionResponse::fallback(format!("Vision error: {e}"))))
    }

    /// Forgets the pending request. Its result will be treated as stale.
    pub fn invalidate(&mut self) {
        self.in_flight = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NavigationCommand;

    #[test]
    fn one_request_at_a_time_and_rate_limited() {
        let mut tracker = VisionRequestTracker::default();
        let first = tracker.try_begin(0.0).unwrap();
        assert!(tracker.try_begin(1.0).is_none());
        tracker.complete(first).unwrap();
        assert!(tracker.try_begin(0.5).is_none());
        assert!(tracker.try_begin(0.6).is_some());
    }

    #[test]
    fn invalidated_results_are_stale() {
        let mut tracker = VisionRequestTracker::default();
        let old = tracker.try_begin(0.0).unwrap();
        tracker.invalidate();
        let new = tracker.try_begin(1.0).unwrap();
        assert_ne!(old, new);
        assert!(tracker
            .resolve(old, Ok(VisionResponse::fallback("late")))
            .is_none());
        assert!(tracker.complete(new).is_ok());
    }

    #[test]
    fn service_errors_become_scan() {
        let mut tracker = VisionRequestTracker::default();
        let token = tracker.try_begin(0.0).unwrap();
        let response = tracker
            .resolve(token, Err(SeekerError::VisionService("timeout".into())))
            .unwrap();
        assert_eq!(response.action, NavigationCommand::Scan);
        assert!(response.reasoning.contains("timeout"));
    }
}
