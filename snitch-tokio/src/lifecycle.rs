use tokio::sync::watch;

/// Tracks whether background I/O of a snitch has stopped.
///
/// The flag can be set and rearmed any number of times, which allows repeating
/// `start()`/`stop()` and `pause_io()`/`resume_io()` sequences on the same snitch.
#[derive(Debug)]
pub struct IoLifecycle {
    stopped: watch::Sender<bool>,
}

impl Default for IoLifecycle {
    fn default() -> Self {
        IoLifecycle {
            stopped: watch::Sender::new(false),
        }
    }
}

impl IoLifecycle {
    pub fn new() -> Self {
        Default::default()
    }

    /// Signals that background I/O has stopped. Wakes all waiters.
    #[inline]
    pub fn mark_stopped(&self) {
        self.stopped.send_replace(true);
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        *self.stopped.borrow()
    }

    /// Rearms the flag. Has no effect if it's not set.
    #[inline]
    pub fn reset(&self) {
        self.stopped.send_if_modified(|stopped| std::mem::replace(stopped, false));
    }

    /// Waits until background I/O is marked as stopped.
    pub async fn wait_stopped(&self) {
        let mut receiver = self.stopped.subscribe();
        // the sender lives as long as self, so this can't fail
        let _ = receiver.wait_for(|stopped| *stopped).await;
    }
}
