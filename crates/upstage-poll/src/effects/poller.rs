use std::future::Future;
use std::time::{Duration, Instant};

use crate::core::{Verdict, classify, poll_delay};
use crate::data::{FailReason, JobPhase, Outcome, PollConfig, PollStats, ProbeReport};
use crate::effects::cancel::CancelToken;

/// Drives a caller-supplied probe until the session reaches exactly one
/// terminal [`Outcome`].
///
/// The poller owns its own attempt counter and elapsed-time clock; it never
/// touches job or upload state, which belongs to the probe and the remote
/// service. Suspension points are exactly two: the sleep between attempts
/// and whatever the probe itself awaits.
pub struct Poller {
    config: PollConfig,
}

impl Poller {
    pub fn new(config: PollConfig) -> Self { Self { config } }

    pub fn config(&self) -> &PollConfig { &self.config }

    /// Poll without external cancellation.
    ///
    /// The probe receives the 1-based attempt index and must not fail for a
    /// merely-invisible record — it reports [`JobPhase::NotVisible`] instead.
    pub async fn poll<T, F, Fut>(&self, probe: F) -> Outcome<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = ProbeReport<T>>,
    {
        self.poll_with_cancel(probe, CancelToken::never()).await
    }

    /// Poll with an external cancellation token. Cancellation is honored
    /// between attempts, never mid-probe.
    pub async fn poll_with_cancel<T, F, Fut>(
        &self,
        mut probe: F,
        mut cancel: CancelToken,
    ) -> Outcome<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = ProbeReport<T>>,
    {
        let started = Instant::now();

        // Submission is asynchronous on the remote side; probing before the
        // settle delay elapses only burns an attempt.
        if !self.config.settle_delay.is_zero()
            && sleep_or_cancelled(self.config.settle_delay, &mut cancel).await
        {
            return Outcome::Cancelled { stats: stats_at(started, 0) };
        }

        let mut attempts = 0u32;
        let mut consecutive_stale = 0u32;

        loop {
            if cancel.is_cancelled() {
                return Outcome::Cancelled { stats: stats_at(started, attempts) };
            }

            attempts += 1;
            let report = probe(attempts).await;
            tracing::debug!(
                attempt = attempts,
                phase = ?report.phase,
                items = report.item_count,
                "probe returned"
            );

            match classify(
                report.phase,
                report.item_count,
                report.fail_code.as_deref(),
                self.config.expected_items,
            ) {
                Verdict::Success => {
                    return Outcome::Completed {
                        data:  report.data,
                        stats: stats_at(started, attempts),
                    };
                }
                Verdict::Failure(reason) => {
                    tracing::warn!(attempt = attempts, reason = %reason, "job failed");
                    return Outcome::Failed {
                        reason,
                        stats: stats_at(started, attempts),
                    };
                }
                Verdict::Continue => {}
            }

            if report.phase == JobPhase::NotVisible {
                consecutive_stale += 1;
                if self.config.max_stale_probes > 0
                    && consecutive_stale >= self.config.max_stale_probes
                {
                    tracing::warn!(
                        probes = consecutive_stale,
                        "job record never became visible"
                    );
                    return Outcome::Failed {
                        reason: FailReason::NeverVisible { probes: consecutive_stale },
                        stats:  stats_at(started, attempts),
                    };
                }
            } else {
                consecutive_stale = 0;
            }

            if attempts >= self.config.max_attempts {
                return Outcome::MaxAttemptsExceeded { stats: stats_at(started, attempts) };
            }
            // The wall-clock budget stops the session even with attempts to
            // spare; it is an independent condition, not a refinement of the
            // attempt cap.
            if started.elapsed() >= self.config.timeout {
                return Outcome::TimedOut { stats: stats_at(started, attempts) };
            }

            let delay = poll_delay(attempts, self.config.base_interval, self.config.max_interval);
            if sleep_or_cancelled(delay, &mut cancel).await {
                return Outcome::Cancelled { stats: stats_at(started, attempts) };
            }
        }
    }
}

fn stats_at(started: Instant, attempts: u32) -> PollStats {
    PollStats {
        attempts,
        elapsed: started.elapsed(),
    }
}

/// Suspend for `duration`, waking early on cancellation. Returns whether the
/// session was cancelled.
async fn sleep_or_cancelled(duration: Duration, cancel: &mut CancelToken) -> bool {
    tokio::select! {
        _ = tokio::time::sleep(duration) => false,
        _ = cancel.cancelled() => true,
    }
}
