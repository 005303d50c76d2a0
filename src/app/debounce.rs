use crate::app::action::Action;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Trailing-edge timer for palette searches.
///
/// At most one timer is pending; arming a new one aborts the previous task,
/// so only the last edit of a burst produces [`Action::SearchDue`].
pub struct SearchDebouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl SearchDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn schedule(&mut self, ticket: u64, tx: mpsc::Sender<Action>) {
        self.cancel();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(Action::SearchDue(ticket)).await;
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for SearchDebouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
