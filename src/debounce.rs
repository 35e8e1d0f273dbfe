use std::pin::Pin;
use std::time::Duration;

use tokio::time::{Sleep, sleep};

/// Collapses a rapidly-changing input value into one settled output.
///
/// Each `push` replaces the pending value and restarts the delay timer, so at
/// most one timer is alive at a time. `settled` resolves with the latest
/// value only once no newer value has arrived within the delay window; with
/// nothing pending it stays unresolved, which makes it safe to poll from a
/// `select!` loop. Dropping the debouncer cancels the pending timer.
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Pin<Box<Sleep>>)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Replaces any pending value and restarts the delay timer.
    pub fn push(&mut self, value: T) {
        self.pending = Some((value, Box::pin(sleep(self.delay))));
    }

    /// Resolves with the pending value once it has been stable for the full
    /// delay. Pending forever when no value has been pushed.
    pub async fn settled(&mut self) -> T {
        loop {
            match self.pending.as_mut() {
                Some((_, timer)) => {
                    timer.as_mut().await;
                    if let Some((value, _)) = self.pending.take() {
                        return value;
                    }
                }
                None => std::future::pending::<()>().await,
            }
        }
    }
}
