//! Lock-wrapped store for multi-threaded hosts.

use std::sync::Arc;

use parking_lot::RwLock;

use super::GraphStore;

/// A [`GraphStore`] shared between threads.
///
/// `set_graph`, `set_zoom_level` and the filter operations all rewrite the
/// canonical graph and its projection together; the write lock keeps readers
/// from observing one without the other.
pub type SharedGraphStore = Arc<RwLock<GraphStore>>;

impl GraphStore {
    pub fn into_shared(self) -> SharedGraphStore {
        Arc::new(RwLock::new(self))
    }
}
