//! Timing profiles for the kinds of jobs the service runs.

use std::time::Duration;

use upstage_poll::PollConfig;

/// Poll timing for one job kind, convertible into a [`PollConfig`].
///
/// Profiles exist so concurrent sessions can run with different budgets;
/// nothing here is global or mutable.
#[derive(Debug, Clone)]
pub struct PollProfile {
    pub settle_delay:     Duration,
    pub base_interval:    Duration,
    pub max_interval:     Duration,
    pub max_attempts:     u32,
    pub timeout:          Duration,
    pub expected_items:   u32,
    pub max_stale_probes: u32,
}

impl PollProfile {
    /// Video renders run up to tens of minutes; give them a long budget and
    /// a backoff ceiling that stops hammering the status endpoint.
    pub fn video() -> Self {
        Self {
            settle_delay:     Duration::from_secs(5),
            base_interval:    Duration::from_secs(2),
            max_interval:     Duration::from_secs(10),
            max_attempts:     900,
            timeout:          Duration::from_secs(1200),
            expected_items:   1,
            max_stale_probes: 60,
        }
    }

    /// Image batches come back in a few minutes and deliver four items.
    pub fn image() -> Self {
        Self {
            settle_delay:     Duration::from_secs(2),
            base_interval:    Duration::from_secs(1),
            max_interval:     Duration::from_secs(5),
            max_attempts:     600,
            timeout:          Duration::from_secs(600),
            expected_items:   4,
            max_stale_probes: 60,
        }
    }
}

impl Default for PollProfile {
    fn default() -> Self { Self::video() }
}

impl From<PollProfile> for PollConfig {
    fn from(profile: PollProfile) -> Self {
        PollConfig {
            max_attempts:     profile.max_attempts,
            base_interval:    profile.base_interval,
            max_interval:     profile.max_interval,
            settle_delay:     profile.settle_delay,
            timeout:          profile.timeout,
            expected_items:   profile.expected_items,
            max_stale_probes: profile.max_stale_probes,
        }
    }
}
