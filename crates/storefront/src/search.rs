//! Debounced search input.
//!
//! Keystrokes go into [`SearchInput::on_change`]; the text that is still
//! current once typing pauses for the configured delay comes out of the
//! receiver returned by [`SearchInput::new`]. The consumer runs one catalog
//! search per settled query, in order, so the last response it sees is for
//! the last query typed.

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::debug;

use crate::debounce::Debouncer;

/// A text input that emits settled queries.
#[derive(Debug)]
pub struct SearchInput {
    debouncer: Debouncer<String>,
}

impl SearchInput {
    /// Create an input and the receiving end for its settled queries.
    ///
    /// The receiver yields `None` once the input is dropped.
    #[must_use]
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let debouncer = Debouncer::new(delay, move |text: String| {
            debug!(query = %text, "Search query settled");
            if tx.send(text).is_err() {
                debug!("Search receiver dropped, discarding query");
            }
        });
        (Self { debouncer }, rx)
    }

    /// Record the current input text, restarting the quiet period.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn on_change(&mut self, text: impl Into<String>) {
        self.debouncer.call(text.into());
    }

    /// Drop the pending query, if any. Returns `true` if one was pending.
    pub fn cancel(&mut self) -> bool {
        self.debouncer.cancel()
    }

    /// Whether a query is waiting for the quiet period to end.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }
}
