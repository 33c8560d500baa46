//! Value debouncing.
//!
//! A [`Debouncer`] holds back a rapidly changing value until it has been
//! quiet for a fixed delay. Observers read a [`DebounceState`] snapshot or
//! subscribe to its `watch` channel.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Settled value plus whether a newer value is still waiting out the delay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebounceState<T> {
    pub settled: T,
    pub pending: bool,
}

struct Shared<T> {
    /// Bumped on every arm and on teardown; a timer only applies its value
    /// while the generation it was armed with is still current.
    generation: AtomicU64,
    state: watch::Sender<DebounceState<T>>,
}

/// Delays propagation of a value until it stops changing.
///
/// Must be used inside a tokio runtime. Only the last value of a burst is
/// ever settled; dropping the debouncer cancels any armed timer.
pub struct Debouncer<T> {
    raw: T,
    delay: Duration,
    shared: Arc<Shared<T>>,
    timer: Option<JoinHandle<()>>,
}

impl<T> Debouncer<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    /// Start settled on `initial` with nothing pending.
    pub fn new(initial: T, delay: Duration) -> Self {
        let (state, _) = watch::channel(DebounceState {
            settled: initial.clone(),
            pending: false,
        });

        Self {
            raw: initial,
            delay,
            shared: Arc::new(Shared {
                generation: AtomicU64::new(0),
                state,
            }),
            timer: None,
        }
    }

    /// Feed a new raw value. Equal values are ignored.
    pub fn set(&mut self, value: T) {
        if value == self.raw {
            return;
        }
        self.raw = value;
        self.arm();
    }

    /// Change the quiet period. Re-arms the timer with the current raw value.
    pub fn set_delay(&mut self, delay: Duration) {
        if delay == self.delay {
            return;
        }
        self.delay = delay;
        self.arm();
    }

    /// The latest raw value, settled or not.
    pub fn raw(&self) -> &T {
        &self.raw
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn state(&self) -> DebounceState<T> {
        self.shared.state.borrow().clone()
    }

    pub fn settled(&self) -> T {
        self.shared.state.borrow().settled.clone()
    }

    pub fn is_pending(&self) -> bool {
        self.shared.state.borrow().pending
    }

    /// Receive every state change (pending flips and settlements).
    pub fn subscribe(&self) -> watch::Receiver<DebounceState<T>> {
        self.shared.state.subscribe()
    }

    /// Drop the armed timer, if any, without settling.
    ///
    /// The raw value reverts to the settled one, so feeding the cancelled
    /// value again arms a fresh timer.
    pub fn cancel(&mut self) {
        self.shared.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
        self.shared.state.send_if_modified(|state| {
            let was_pending = state.pending;
            state.pending = false;
            was_pending
        });
        self.raw = self.settled();
    }

    fn arm(&mut self) {
        let generation = self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }

        self.shared.state.send_if_modified(|state| {
            let was_pending = state.pending;
            state.pending = true;
            !was_pending
        });

        let shared = Arc::clone(&self.shared);
        let value = self.raw.clone();
        let delay = self.delay;

        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Checked under the channel lock so a concurrent re-arm either
            // wins outright or observes the settled value.
            shared.state.send_if_modified(|state| {
                if shared.generation.load(Ordering::SeqCst) != generation {
                    return false;
                }
                state.settled = value;
                state.pending = false;
                true
            });
        }));
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.shared.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}
