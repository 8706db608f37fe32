//! Change notifications raised by the filter panel and the language manager.
//!
//! Listeners (the game grid, the CLI printer) subscribe explicitly instead of
//! reaching for shared globals. Each bus is a `tokio` broadcast channel, so any
//! number of receivers can observe the same event stream.

use serde::Serialize;
use tokio::sync::broadcast;

use crate::state::{CatalogItem, FilterCriteria, SortSpec};

/// Buffered events per subscriber before the oldest are dropped.
pub const EVENT_CAPACITY: usize = 32;

/// Raised after every filter or sort mutation of the catalog view.
#[derive(Clone, Debug, Serialize)]
pub struct FilterChange {
    /// Criteria now active.
    pub filters: FilterCriteria,
    /// Sort now active.
    pub sort: SortSpec,
    /// Filtered, sorted view.
    pub games: Vec<CatalogItem>,
}

/// Raised after a successful language switch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageChange {
    /// Language now active.
    pub language: String,
    /// Language active before the switch, if any.
    pub previous_language: Option<String>,
}

/// Broadcast channel for one event type.
#[derive(Debug)]
pub struct EventBus<E> {
    /// Sending half; receivers are created on demand.
    tx: broadcast::Sender<E>,
}

impl<E: Clone> EventBus<E> {
    /// Create a bus buffering up to `capacity` events per subscriber.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Register a new listener; it sees events emitted from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<E> {
        self.tx.subscribe()
    }

    /// What: Deliver an event to every current listener.
    ///
    /// Inputs:
    /// - `event`: Event to deliver
    ///
    /// Output:
    /// - Number of listeners that received it (0 when nobody is subscribed)
    pub fn emit(&self, event: E) -> usize {
        self.tx.send(event).unwrap_or(0)
    }

    /// Number of live listeners.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl<E: Clone> Default for EventBus<E> {
    fn default() -> Self {
        Self::new(EVENT_CAPACITY)
    }
}
