use std::time::Duration;

/// Attempts per backoff step: the delay doubles once per full window.
const ESCALATION_WINDOW: u32 = 8;

/// Calculate the delay before the next probe.
///
/// The first window of attempts polls at `base`; each further window doubles
/// the delay, saturating at `cap`. Short jobs get tight feedback while long
/// jobs are not hammered for their whole runtime.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use upstage_poll::poll_delay;
///
/// let base = Duration::from_secs(2);
/// let cap = Duration::from_secs(10);
///
/// // First window: base interval
/// assert_eq!(poll_delay(1, base, cap), Duration::from_secs(2));
/// assert_eq!(poll_delay(7, base, cap), Duration::from_secs(2));
///
/// // Second window: doubled
/// assert_eq!(poll_delay(8, base, cap), Duration::from_secs(4));
///
/// // Far out: clamped to the cap
/// assert_eq!(poll_delay(100, base, cap), Duration::from_secs(10));
/// ```
pub fn poll_delay(completed_attempts: u32, base: Duration, cap: Duration) -> Duration {
    let doublings = completed_attempts / ESCALATION_WINDOW;

    // Saturating arithmetic keeps pathological attempt counts from wrapping
    let multiplier = 2_u32.saturating_pow(doublings);
    base.saturating_mul(multiplier).min(cap)
}
