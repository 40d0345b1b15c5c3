//! Change notifications published by the stores.
//!
//! UI components subscribe once and re-read the store on every event.
//! Events carry only what changed, never the new data.

use serde::Serialize;
use tokio::sync::broadcast;

/// Capacity of each store's event channel.
///
/// A subscriber that falls more than this many events behind receives
/// [`broadcast::error::RecvError::Lagged`] and should re-read the whole
/// store.
pub const EVENT_CAPACITY: usize = 64;

/// Which store published an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreKind {
    /// [`crate::ProjectStore`].
    Project,
    /// [`crate::IndexStore`].
    Index,
}

/// A state change in one of the stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum StoreEvent {
    /// The loading flag flipped.
    Loading {
        /// Publishing store.
        store: StoreKind,
        /// New flag value.
        loading: bool,
    },
    /// A fetch failed and its message was recorded in the store's `error`.
    Failed {
        /// Publishing store.
        store: StoreKind,
        /// Recorded message.
        message: String,
    },
    /// The cached project list changed.
    Projects,
    /// The current project was set, replaced or cleared.
    CurrentProject,
    /// The cached index list changed.
    Indexes,
    /// The current index was set or cleared.
    CurrentIndex,
    /// The cached settings of the current index changed.
    Settings,
}

/// Sending half shared by a store's actions.
#[derive(Debug, Clone)]
pub(crate) struct Events {
    tx: broadcast::Sender<StoreEvent>,
}

impl Events {
    pub(crate) fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_CAPACITY);
        Self { tx }
    }

    pub(crate) fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.tx.subscribe()
    }

    /// Publish `event`, returning how many subscribers will see it.
    pub(crate) fn publish(&self, event: StoreEvent) -> usize {
        self.tx.send(event).unwrap_or(0)
    }
}
