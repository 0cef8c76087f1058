//! Semantic styles for the demo chrome around the tab bars.

use ratatui::style::{Modifier, Style};
use tabslide::theme::{BORDER_GRAY, CORAL, DIM_WHITE, ELECTRIC_PURPLE, NEON_CYAN};

/// Title text for blocks/panels.
pub fn title_style() -> Style {
    Style::default().fg(NEON_CYAN).add_modifier(Modifier::BOLD)
}

pub fn border_focused() -> Style {
    Style::default().fg(ELECTRIC_PURPLE)
}

pub fn border_default() -> Style {
    Style::default().fg(BORDER_GRAY)
}

pub fn body() -> Style {
    Style::default().fg(DIM_WHITE)
}

/// Highlighted value in the content pane.
pub fn value() -> Style {
    Style::default().fg(CORAL).add_modifier(Modifier::BOLD)
}

/// Key hint text (e.g., "q quit").
pub fn key_hint() -> Style {
    Style::default().fg(BORDER_GRAY)
}

pub fn key_hint_key() -> Style {
    Style::default().fg(NEON_CYAN).add_modifier(Modifier::BOLD)
}
