//! Sliding tab selector for [ratatui](https://ratatui.rs).
//!
//! A row of clickable tab labels sits over a two-layer indicator: a faint
//! full-width track and a bar one tab wide that glides to the active tab.
//!
//! - **[`SlidingTabs`]** — The widget. Validated at construction (at least
//!   two distinct labels, selection in range), configured builder-style,
//!   rendered by reference so it can keep animation state between frames.
//!
//! - **[`Selection`]** — Caller-owned selected index shared with the widget
//!   over a `tokio::sync::watch` channel. Clicks and keys write it; the
//!   widget follows any writer on its next [`tick`](SlidingTabs::tick).
//!
//! - **[`geometry`]** — Pure arithmetic: segment width is
//!   `track_width / tab_count`, offset is `width * index`.
//!
//! - **[`TabStyle`]** / **[`Animation`]** — Colors, bar heights, label
//!   attributes and easing (via `tachyonfx`). Serde-enabled for config files.

pub mod animation;
pub mod error;
pub mod geometry;
pub mod label;
pub mod selection;
pub mod style;
pub mod theme;
pub mod widget;

pub use animation::{Animation, Curve, Tween};
pub use error::TabsError;
pub use geometry::IndicatorGeometry;
pub use label::Tab;
pub use selection::Selection;
pub use style::TabStyle;
pub use widget::SlidingTabs;
