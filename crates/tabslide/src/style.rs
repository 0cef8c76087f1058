//! Presentation parameters for the tab bar.

use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

use crate::animation::Animation;
use crate::theme;

/// Glyph used for the faint full-width track.
pub const TRACK_SYMBOL: &str = "─";
/// Glyph used for the sliding indicator.
pub const BAR_SYMBOL: &str = "━";

/// Colors, bar sizes and animation of a [`SlidingTabs`](crate::SlidingTabs).
///
/// Supplied once at construction. Heights are in terminal rows; a height of
/// zero hides that layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabStyle {
    /// Text attributes applied to every label (the terminal's "font").
    pub font: Modifier,
    pub active_accent: Color,
    pub inactive_accent: Color,
    pub active_background: Color,
    pub inactive_background: Color,
    pub bar_color: Color,
    pub bar_height: u16,
    pub track_color: Color,
    pub track_height: u16,
    pub animation: Animation,
}

impl Default for TabStyle {
    fn default() -> Self {
        Self {
            font: Modifier::empty(),
            active_accent: theme::ELECTRIC_PURPLE,
            inactive_accent: theme::DIM_WHITE,
            active_background: Color::Reset,
            inactive_background: Color::Reset,
            bar_color: theme::ELECTRIC_PURPLE,
            bar_height: 1,
            track_color: theme::BORDER_GRAY,
            track_height: 1,
            animation: Animation::default(),
        }
    }
}

impl TabStyle {
    /// Label style for an active or inactive tab.
    pub fn label(&self, active: bool) -> Style {
        let (fg, bg) = if active {
            (self.active_accent, self.active_background)
        } else {
            (self.inactive_accent, self.inactive_background)
        };
        Style::default().fg(fg).bg(bg).add_modifier(self.font)
    }

    pub fn bar(&self) -> Style {
        Style::default().fg(self.bar_color)
    }

    pub fn track(&self) -> Style {
        Style::default().fg(self.track_color).add_modifier(Modifier::DIM)
    }

    /// Rows taken by the indicator: the taller of bar and track.
    pub fn indicator_height(&self) -> u16 {
        self.bar_height.max(self.track_height)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::animation::Curve;

    #[test]
    fn active_and_inactive_labels_differ() {
        let style = TabStyle::default();
        assert_eq!(style.label(true).fg, Some(theme::ELECTRIC_PURPLE));
        assert_eq!(style.label(false).fg, Some(theme::DIM_WHITE));
    }

    #[test]
    fn font_applies_to_both_states() {
        let style = TabStyle {
            font: Modifier::ITALIC,
            ..TabStyle::default()
        };
        assert!(style.label(true).add_modifier.contains(Modifier::ITALIC));
        assert!(style.label(false).add_modifier.contains(Modifier::ITALIC));
    }

    #[test]
    fn indicator_height_is_the_taller_layer() {
        let style = TabStyle {
            bar_height: 2,
            track_height: 1,
            ..TabStyle::default()
        };
        assert_eq!(style.indicator_height(), 2);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let style: TabStyle = toml::from_str(
            r##"
            bar_color = "#ff6ac1"
            bar_height = 2

            [animation]
            curve = "ease-in-out"
            "##,
        )
        .unwrap();

        assert_eq!(style.bar_color, theme::CORAL);
        assert_eq!(style.bar_height, 2);
        assert_eq!(style.animation.curve, Curve::EaseInOut);
        assert_eq!(style.animation.duration_ms, 300);
        assert_eq!(style.track_color, theme::BORDER_GRAY);
    }
}
