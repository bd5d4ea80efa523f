//! I/O layer: the suspending poll loop and cancellation plumbing.

mod cancel;
mod poller;

pub use cancel::{CancelHandle, CancelToken};
pub use poller::Poller;
