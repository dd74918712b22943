//! Shared holder for the current configuration snapshot.

use parking_lot::RwLock;
use quotedesk_common::ConfigSnapshot;
use std::sync::Arc;
use tracing::debug;

/// Thread-safe cell holding the latest configuration snapshot.
///
/// Quoting threads take an `Arc` to the snapshot for the duration of one
/// call; a refresher swaps in new snapshots without disturbing calls already
/// running.
#[derive(Debug, Default)]
pub struct SnapshotCell {
    current: RwLock<Arc<ConfigSnapshot>>,
}

impl SnapshotCell {
    /// Create a cell holding `snapshot`.
    pub fn new(snapshot: ConfigSnapshot) -> Self {
        Self {
            current: RwLock::new(Arc::new(snapshot)),
        }
    }

    /// The snapshot to use for one quote.
    pub fn current(&self) -> Arc<ConfigSnapshot> {
        self.current.read().clone()
    }

    /// Replace the snapshot, returning the previous one.
    pub fn replace(&self, snapshot: ConfigSnapshot) -> Arc<ConfigSnapshot> {
        let channels = snapshot.channels.len();
        let previous = std::mem::replace(&mut *self.current.write(), Arc::new(snapshot));
        debug!(channels, "Replaced configuration snapshot");
        previous
    }
}

/// Shared snapshot cell.
pub type SharedSnapshot = Arc<SnapshotCell>;

#[cfg(test)]
mod tests {
    use super::*;
    use quotedesk_common::{ChannelProfile, ChannelSlug};
    use std::thread;

    fn channel(slug: &str) -> ChannelProfile {
        ChannelProfile {
            slug: ChannelSlug::from(slug),
            label: slug.to_string(),
            enabled: true,
            sell_profiles: Vec::new(),
            buy_profiles: Vec::new(),
        }
    }

    #[test]
    fn test_replace_keeps_old_snapshot_alive() {
        let cell = SnapshotCell::new(ConfigSnapshot::new(vec![channel("PAYPAL")]));
        let held = cell.current();

        let previous = cell.replace(ConfigSnapshot::new(vec![channel("USDT")]));

        assert!(Arc::ptr_eq(&held, &previous));
        assert!(held.channel(&ChannelSlug::primary()).is_some());
        assert!(cell.current().channel(&ChannelSlug::from("USDT")).is_some());
    }

    #[test]
    fn test_concurrent_readers() {
        let cell: SharedSnapshot = Arc::new(SnapshotCell::new(ConfigSnapshot::new(vec![channel("PAYPAL")])));

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let cell = cell.clone();
                thread::spawn(move || (0..100).all(|_| cell.current().channels.len() == 1))
            })
            .collect();
        cell.replace(ConfigSnapshot::new(vec![channel("USDT")]));

        for reader in readers {
            assert!(reader.join().unwrap());
        }
    }
}
