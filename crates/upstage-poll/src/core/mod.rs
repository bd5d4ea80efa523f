//! Pure decision logic: report classification and the interval schedule.
//! Nothing in this module suspends or reads a clock.

mod classify;
mod schedule;

pub use classify::{Verdict, classify};
pub use schedule::poll_delay;
