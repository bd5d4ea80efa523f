//! Data layer: probe reports, configuration, and terminal outcomes.

use std::time::Duration;

use thiserror::Error;

/// Normalized phase of the remote job as seen by one probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobPhase {
    /// Accepted but not started.
    Pending,
    /// Actively generating.
    Running,
    /// Finished; item count decides whether the session is done.
    Succeeded,
    /// Explicitly failed on the remote side.
    Failed,
    /// The job record is not indexed yet. Read-after-write lag, not an error.
    NotVisible,
}

/// One probe invocation's normalized result, consumed immediately by the
/// classification logic and not retained.
#[derive(Debug, Clone)]
pub struct ProbeReport<T> {
    pub phase:       JobPhase,
    /// Result items visible so far.
    pub item_count:  u32,
    /// Application-level failure code; terminal whenever present.
    pub fail_code:   Option<String>,
    /// Remote completion timestamp, when the service reports one.
    pub finished_at: Option<i64>,
    /// Whatever snapshot the probe fetched; carried into [`Outcome::Completed`].
    pub data:        T,
}

impl<T> ProbeReport<T> {
    pub fn new(phase: JobPhase, data: T) -> Self {
        Self {
            phase,
            item_count: 0,
            fail_code: None,
            finished_at: None,
            data,
        }
    }

    pub fn with_items(mut self, item_count: u32) -> Self {
        self.item_count = item_count;
        self
    }

    pub fn with_fail_code(mut self, code: impl Into<String>) -> Self {
        self.fail_code = Some(code.into());
        self
    }

    pub fn with_finished_at(mut self, finished_at: i64) -> Self {
        self.finished_at = Some(finished_at);
        self
    }
}

/// Per-session polling configuration. All timing lives here, at construction
/// time — parallel sessions with different profiles never interfere.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Hard cap on probe invocations.
    pub max_attempts:     u32,
    /// Delay between early probes; the schedule backs off from here.
    pub base_interval:    Duration,
    /// Ceiling the backoff never exceeds.
    pub max_interval:     Duration,
    /// One-time wait before the first probe; submission is asynchronous and
    /// an immediate probe is wasted.
    pub settle_delay:     Duration,
    /// Wall-clock budget for the whole session, independent of the attempt cap.
    pub timeout:          Duration,
    /// Items that must be present for a succeeded report to count as done.
    pub expected_items:   u32,
    /// Consecutive not-yet-visible probes tolerated before the session is
    /// declared failed. Zero disables the limit.
    pub max_stale_probes: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            max_attempts:     900,
            base_interval:    Duration::from_secs(2),
            max_interval:     Duration::from_secs(10),
            settle_delay:     Duration::from_secs(5),
            timeout:          Duration::from_secs(1200),
            expected_items:   1,
            max_stale_probes: 60,
        }
    }
}

/// Why a session ended in failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FailReason {
    /// The remote job reported an explicit failure code, surfaced verbatim.
    #[error("remote job failed with code {code}")]
    Remote { code: String },

    /// The record stayed invisible past the configured staleness limit —
    /// something is wrong beyond ordinary read-after-write lag.
    #[error("job record never became visible after {probes} consecutive probes")]
    NeverVisible { probes: u32 },
}

/// Observability counters attached to every outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollStats {
    pub attempts: u32,
    pub elapsed:  Duration,
}

/// Terminal result of one polling session. Exactly one is produced per
/// session and it is immutable once returned. Exhausted budgets are
/// distinguishable outcomes rather than errors, so callers can decide
/// whether a degraded result is still worth offering.
#[derive(Debug, Clone)]
pub enum Outcome<T> {
    Completed { data: T, stats: PollStats },
    Failed { reason: FailReason, stats: PollStats },
    TimedOut { stats: PollStats },
    MaxAttemptsExceeded { stats: PollStats },
    Cancelled { stats: PollStats },
}

impl<T> Outcome<T> {
    pub fn stats(&self) -> PollStats {
        match self {
            Outcome::Completed { stats, .. }
            | Outcome::Failed { stats, .. }
            | Outcome::TimedOut { stats }
            | Outcome::MaxAttemptsExceeded { stats }
            | Outcome::Cancelled { stats } => *stats,
        }
    }
}
