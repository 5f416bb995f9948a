use std::future::Future;
use std::time::Duration;

use tokio::task::AbortHandle;
use tokio::time::sleep;

/// A one-shot delayed action owned by a pipeline task.
///
/// A pending action is never replaced or pushed back. The owner calls [`PipelineTimer::fired`] when the action's command
/// arrives, which makes the timer idle again.
#[derive(Debug, Default)]
pub(crate) struct PipelineTimer {
    pending: Option<AbortHandle>,
}

impl PipelineTimer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Schedules `action` unless one is already pending. Returns whether it
    /// scheduled.
    pub(crate) fn start_if_idle<F>(&mut self, delay: Duration, action: F) -> bool
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if self.is_pending() {
            return false;
        }
        self.schedule(delay, action);
        true
    }

    pub(crate) fn fired(&mut self) {
        self.pending = None;
    }

    pub(crate) fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    fn schedule<F>(&mut self, delay: Duration, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let join = tokio::spawn(async move {
            sleep(delay).await;
            action.await;
        });
        self.pending = Some(join.abort_handle());
    }
}

impl Drop for PipelineTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
