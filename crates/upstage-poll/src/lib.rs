//! Adaptive polling engine for asynchronous remote jobs.
//!
//! A remote generation job finishes on its own schedule: seconds for small
//! work, many minutes for large. The poller repeatedly invokes a
//! caller-supplied probe, classifies each normalized report, and either keeps
//! waiting on a backing-off interval or stops with exactly one terminal
//! [`Outcome`]. Four stop conditions are independent of each other:
//! terminal classification, the attempt cap, the wall-clock budget, and
//! external cancellation.
//!
//! A probe reporting "record not yet visible" is treated as processing, not
//! failure — the remote index lags job creation, and punishing that lag would
//! fail every freshly-submitted job. A dedicated consecutive-staleness limit
//! bounds how long that tolerance lasts.
//!
//! # Architecture
//!
//! This crate follows the three-layer pattern:
//! - `data` - Immutable configuration, probe reports, outcomes
//! - `core` - Pure classification and interval schedule
//! - `effects` - The suspending loop and cancellation plumbing
//!
//! Each polling session owns its own counters, clock, and cancellation flag;
//! concurrent sessions share nothing.

mod core;
mod data;
mod effects;

pub use self::core::{Verdict, classify, poll_delay};
pub use self::data::{FailReason, JobPhase, Outcome, PollConfig, PollStats, ProbeReport};
pub use self::effects::{CancelHandle, CancelToken, Poller};
