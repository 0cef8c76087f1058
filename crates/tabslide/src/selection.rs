// ── Selection binding ──
//
// The selected index is owned by the caller and shared with the widget
// through a `watch` channel. Both sides read the latest value, both may
// write it, and anyone interested in changes holds a receiver.

use std::sync::Arc;

use tokio::sync::watch;

/// Shared handle to the selected tab index.
///
/// Cloning is cheap and every clone points at the same value. Writes notify
/// subscribers only when the index actually changes.
#[derive(Debug, Clone)]
pub struct Selection {
    tx: Arc<watch::Sender<usize>>,
}

impl Selection {
    pub fn new(index: usize) -> Self {
        let (tx, _) = watch::channel(index);
        Self { tx: Arc::new(tx) }
    }

    /// Current index.
    pub fn get(&self) -> usize {
        *self.tx.borrow()
    }

    /// Write a new index. Returns `true` if the value changed.
    pub fn set(&self, index: usize) -> bool {
        self.tx.send_if_modified(|current| {
            if *current == index {
                false
            } else {
                *current = index;
                true
            }
        })
    }

    /// Subscribe to changes. The current value is marked as already seen.
    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.tx.subscribe()
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_value() {
        let a = Selection::new(1);
        let b = a.clone();
        b.set(3);
        assert_eq!(a.get(), 3);
    }

    #[test]
    fn set_reports_change() {
        let selection = Selection::new(0);
        assert!(selection.set(2));
        assert!(!selection.set(2));
    }

    #[test]
    fn subscribers_see_only_real_changes() {
        let selection = Selection::new(0);
        let mut rx = selection.subscribe();
        assert!(!rx.has_changed().unwrap());

        selection.set(0);
        assert!(!rx.has_changed().unwrap());

        selection.set(1);
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), 1);
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn set_without_subscribers_still_updates() {
        let selection = Selection::default();
        assert!(selection.set(4));
        assert_eq!(selection.get(), 4);
    }
}
