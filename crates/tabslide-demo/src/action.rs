//! All possible UI actions. Actions are the sole mechanism for state mutation.

use std::fmt;

/// Identifies each tab bar mounted by the demo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BarId {
    /// Tabs from the config file.
    Sections,
    /// Fixed time-period selector.
    Period,
}

impl fmt::Display for BarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Sections => "Sections",
            Self::Period => "Period",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    Tick,
    Render,
    Resize(u16, u16),
    FocusNext,
    FocusPrev,
    /// A bar wrote a new index into its selection.
    Selected { bar: BarId, index: usize },
    /// Advance the period selection from outside its widget.
    CyclePeriod,
}
