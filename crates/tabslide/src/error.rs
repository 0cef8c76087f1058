// ── Widget error types ──
//
// Every invariant the tab bar relies on is checked at construction or at
// the selection entry points and reported here instead of panicking.

use thiserror::Error;

/// Errors raised while building or driving a [`SlidingTabs`](crate::SlidingTabs).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TabsError {
    #[error("a tab bar needs at least 2 tabs, got {count}")]
    TooFewTabs { count: usize },

    #[error("selection {index} is out of range for {count} tabs")]
    SelectionOutOfRange { index: usize, count: usize },

    #[error("duplicate tab label '{label}'")]
    DuplicateLabel { label: String },

    #[error("no tab labelled '{label}'")]
    UnknownLabel { label: String },
}
