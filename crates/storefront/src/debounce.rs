//! Debouncing: fire a callback once a burst of calls has gone quiet.
//!
//! Every [`Debouncer::call`] aborts the pending timer task, if any, and
//! schedules a new one. Only the last call of a burst reaches the trigger;
//! earlier calls are discarded, not queued.
//!
//! The debouncer owns at most one Tokio task at a time. Dropping the
//! debouncer aborts it, so a torn-down caller never gets a late fire.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

/// Delays a trigger until calls have stopped for a fixed quiet period.
///
/// # Example
///
/// ```rust,ignore
/// use std::time::Duration;
/// use qkart_storefront::debounce::Debouncer;
///
/// let mut search = Debouncer::new(Duration::from_millis(500), |text: String| {
///     println!("searching for {text}");
/// });
/// search.call("ip".to_string());
/// search.call("iphone".to_string()); // only this one fires, 500ms from now
/// ```
pub struct Debouncer<T> {
    delay: Duration,
    trigger: Arc<dyn Fn(T) + Send + Sync>,
    pending: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Create a debouncer that calls `trigger` after `delay` of quiet.
    pub fn new<F>(delay: Duration, trigger: F) -> Self
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        Self {
            delay,
            trigger: Arc::new(trigger),
            pending: None,
        }
    }

    /// Schedule the trigger with `arg`, replacing any pending call.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn call(&mut self, arg: T) {
        if self.cancel() {
            debug!("Replaced pending debounced call");
        }

        let trigger = Arc::clone(&self.trigger);
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            trigger(arg);
        }));
    }
}

impl<T> Debouncer<T> {
    /// Cancel the pending call, if any.
    ///
    /// Returns `true` if a call was pending and will no longer fire.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some_and(|handle| {
            let was_pending = !handle.is_finished();
            handle.abort();
            was_pending
        })
    }

    /// Whether a call is scheduled and has not fired yet.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// The quiet period.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl<T> std::fmt::Debug for Debouncer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debouncer")
            .field("delay", &self.delay)
            .field("pending", &self.is_pending())
            .finish_non_exhaustive()
    }
}

/// Debounce a zero-argument trigger.
///
/// Each `call(())` on the returned handle restarts the quiet period.
pub fn debounce<F>(trigger: F, delay: Duration) -> Debouncer<()>
where
    F: Fn() + Send + Sync + 'static,
{
    Debouncer::new(delay, move |()| trigger())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tokio::time::{Instant, sleep};

    use super::*;

    const DELAY: Duration = Duration::from_millis(500);

    type Fired<T> = Arc<Mutex<Vec<(Duration, T)>>>;

    /// A debouncer that records when (relative to `start`) and with what it fired.
    fn recording<T: Send + 'static>(start: Instant) -> (Debouncer<T>, Fired<T>) {
        let fired: Fired<T> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&fired);
        let debouncer = Debouncer::new(DELAY, move |arg: T| {
            sink.lock().unwrap().push((start.elapsed(), arg));
        });
        (debouncer, fired)
    }

    fn assert_near(actual: Duration, expected_ms: u64) {
        let expected = Duration::from_millis(expected_ms);
        assert!(
            actual >= expected && actual < expected + Duration::from_millis(10),
            "fired at {actual:?}, expected ~{expected:?}"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_call_fires_after_delay() {
        let start = Instant::now();
        let (mut debouncer, fired) = recording(start);

        debouncer.call("iphone");
        assert!(debouncer.is_pending());

        sleep(Duration::from_millis(499)).await;
        assert!(fired.lock().unwrap().is_empty());

        sleep(Duration::from_millis(100)).await;
        let fired = fired.lock().unwrap();
        assert_eq!(fired.len(), 1);
        assert_near(fired[0].0, 500);
        assert_eq!(fired[0].1, "iphone");
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_fires_once_with_last_argument() {
        let start = Instant::now();
        let (mut debouncer, fired) = recording(start);

        debouncer.call("i");
        sleep(Duration::from_millis(100)).await;
        debouncer.call("ip");
        sleep(Duration::from_millis(100)).await;
        debouncer.call("iph");

        // 200 + 500 = 700; nothing before that
        sleep(Duration::from_millis(499)).await;
        assert!(fired.lock().unwrap().is_empty());

        sleep(Duration::from_millis(300)).await;
        let fired = fired.lock().unwrap();
        assert_eq!(fired.len(), 1);
        assert_near(fired[0].0, 700);
        assert_eq!(fired[0].1, "iph");
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_bursts_fire_separately() {
        let start = Instant::now();
        let (mut debouncer, fired) = recording(start);

        debouncer.call(1);
        sleep(Duration::from_millis(1000)).await;
        debouncer.call(2);
        sleep(Duration::from_millis(1000)).await;

        let fired = fired.lock().unwrap();
        assert_eq!(fired.len(), 2);
        assert_near(fired[0].0, 500);
        assert_eq!(fired[0].1, 1);
        assert_near(fired[1].0, 1500);
        assert_eq!(fired[1].1, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_fire() {
        let (mut debouncer, fired) = recording::<&str>(Instant::now());

        debouncer.call("basketball");
        sleep(Duration::from_millis(100)).await;
        assert!(debouncer.cancel());
        assert!(!debouncer.is_pending());

        sleep(Duration::from_secs(2)).await;
        assert!(fired.lock().unwrap().is_empty());

        // Nothing left to cancel
        assert!(!debouncer.cancel());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_prevents_fire() {
        let (mut debouncer, fired) = recording::<&str>(Instant::now());

        debouncer.call("duffle");
        drop(debouncer);

        sleep(Duration::from_secs(2)).await;
        assert!(fired.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_argument_debounce() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let mut debouncer = debounce(
            move || {
                counter.fetch_add(1, Ordering::SeqCst);
            },
            DELAY,
        );
        assert_eq!(debouncer.delay(), DELAY);

        for _ in 0..5 {
            debouncer.call(());
            sleep(Duration::from_millis(50)).await;
        }
        sleep(Duration::from_secs(1)).await;

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
