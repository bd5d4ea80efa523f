use tokio::sync::watch;

/// Requests cancellation of one polling session.
///
/// Cancellation takes effect before the next probe is issued; a probe
/// already in flight is never interrupted.
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

/// The poller-side view of a cancellation request.
#[derive(Debug, Clone)]
pub struct CancelToken {
    rx: watch::Receiver<bool>,
}

impl CancelHandle {
    pub fn pair() -> (CancelHandle, CancelToken) {
        let (tx, rx) = watch::channel(false);
        (CancelHandle { tx }, CancelToken { rx })
    }

    pub fn cancel(&self) { let _ = self.tx.send(true); }
}

impl CancelToken {
    /// A token that can never fire, for sessions nobody intends to cancel.
    pub fn never() -> Self {
        let (tx, rx) = watch::channel(false);
        drop(tx);
        CancelToken { rx }
    }

    pub fn is_cancelled(&self) -> bool { *self.rx.borrow() }

    /// Resolve once cancellation is requested. A dropped [`CancelHandle`]
    /// can never cancel, so this pends forever in that case.
    pub(crate) async fn cancelled(&mut self) {
        if self.rx.wait_for(|cancelled| *cancelled).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_starts_uncancelled() {
        let (_handle, token) = CancelHandle::pair();
        assert!(!token.is_cancelled());
    }

    #[test]
    fn test_cancel_is_visible_to_clones() {
        let (handle, token) = CancelHandle::pair();
        let clone = token.clone();
        handle.cancel();
        assert!(token.is_cancelled());
        assert!(clone.is_cancelled());
    }

    #[test]
    fn test_never_token_stays_quiet() {
        let token = CancelToken::never();
        assert!(!token.is_cancelled());
    }
}
