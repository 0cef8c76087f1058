//! Tab labels and fitting them into their column span.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// A tab's display text, with an optional compact form for narrow bars.
///
/// Labels may contain line breaks; the label row is as tall as the tallest
/// label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    label: String,
    short: Option<String>,
}

impl Tab {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            short: None,
        }
    }

    /// Compact label used when the full one doesn't fit.
    #[must_use]
    pub fn with_short(mut self, short: impl Into<String>) -> Self {
        self.short = Some(short.into());
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn short(&self) -> Option<&str> {
        self.short.as_deref()
    }

    /// Number of rendered lines.
    pub fn height(&self) -> u16 {
        line_count(&self.label)
    }

    /// Lines to draw in a box `width` columns wide.
    ///
    /// The full label wins if it fits, then the compact label; otherwise the
    /// best candidate is clipped line by line.
    pub fn fit(&self, width: u16) -> Vec<String> {
        let width = usize::from(width);
        if text_width(&self.label) <= width {
            return self.label.lines().map(str::to_owned).collect();
        }
        let text = match self.short.as_deref() {
            Some(short) if text_width(short) <= width => {
                return short.lines().map(str::to_owned).collect();
            }
            Some(short) => short,
            None => self.label.as_str(),
        };
        text.lines().map(|line| clip(line, width)).collect()
    }
}

impl From<&str> for Tab {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for Tab {
    fn from(label: String) -> Self {
        Self::new(label)
    }
}

/// Height of the label row: the tallest label, at least one line.
pub fn measured_height(tabs: &[Tab]) -> u16 {
    tabs.iter().map(Tab::height).max().unwrap_or(1).max(1)
}

/// Display width of the widest line.
pub fn text_width(text: &str) -> usize {
    text.lines().map(UnicodeWidthStr::width).max().unwrap_or(0)
}

fn line_count(text: &str) -> u16 {
    u16::try_from(text.lines().count()).unwrap_or(u16::MAX).max(1)
}

fn clip(line: &str, width: usize) -> String {
    let mut used = 0;
    line.chars()
        .take_while(|c| {
            used += c.width().unwrap_or(0);
            used <= width
        })
        .collect()
}
