//! Consecutive failure monitor
//!
//! Tracks back-to-back sensor failures and tells the polling loop when to
//! stop retrying quietly and show an error on screen.

/// Default number of consecutive failures before escalating
pub const DEFAULT_MAX_ERRORS: u8 = 3;

/// What the caller should do after a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FailureAction {
    /// Below threshold, try again next cycle
    Retry,
    /// Threshold reached; the counter has been reset
    Escalate,
}

/// Consecutive failure counter
#[derive(Debug, Clone)]
pub struct ErrorMonitor {
    /// Failures since the last success or escalation
    consecutive: u8,
    /// Failures that trigger an escalation
    threshold: u8,
}

impl Default for ErrorMonitor {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ERRORS)
    }
}

impl ErrorMonitor {
    /// Create a monitor escalating after `threshold` failures
    ///
    /// A threshold of 0 is treated as 1.
    pub fn new(threshold: u8) -> Self {
        Self {
            consecutive: 0,
            threshold: threshold.max(1),
        }
    }

    /// Record a successful cycle
    pub fn record_success(&mut self) {
        self.consecutive = 0;
    }

    /// Record a failed cycle
    pub fn record_failure(&mut self) -> FailureAction {
        self.consecutive = self.consecutive.saturating_add(1);
        if self.consecutive >= self.threshold {
            self.consecutive = 0;
            FailureAction::Escalate
        } else {
            FailureAction::Retry
        }
    }

    /// Failures since the last success or escalation
    pub fn consecutive_failures(&self) -> u8 {
        self.consecutive
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }
}
