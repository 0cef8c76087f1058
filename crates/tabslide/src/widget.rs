//! The sliding tab bar itself.

use std::cell::Cell;
use std::collections::HashSet;
use std::time::Instant;

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Widget;
use tokio::sync::watch;
use tracing::{debug, warn};
use unicode_width::UnicodeWidthStr;

use crate::animation::{Animation, Tween};
use crate::error::TabsError;
use crate::geometry::{self, IndicatorGeometry};
use crate::label::{self, Tab};
use crate::selection::Selection;
use crate::style::{BAR_SYMBOL, TRACK_SYMBOL, TabStyle};

/// A row of clickable tab labels over a sliding indicator bar.
///
/// The selected index lives in a caller-owned [`Selection`]. The widget
/// writes it when a tab is clicked or a navigation key is pressed, and
/// follows it when anyone else writes it: call [`tick`](Self::tick) from
/// the host loop and the indicator glides to the new tab.
///
/// ```ignore
/// let selection = Selection::new(0);
/// let mut tabs = SlidingTabs::new(selection.clone(), ["First", "Second"])?;
/// tabs.tick(Instant::now());
/// frame.render_widget(&tabs, area);
/// ```
#[derive(Debug)]
pub struct SlidingTabs {
    tabs: Vec<Tab>,
    selection: Selection,
    observer: watch::Receiver<usize>,
    style: TabStyle,
    label_height: u16,
    /// Index the indicator is heading to.
    target: usize,
    tween: Option<Tween>,
    /// Area of the last render, for hit testing.
    area: Cell<Rect>,
}

impl SlidingTabs {
    /// Build a tab bar bound to `selection`.
    ///
    /// Fails if there are fewer than two tabs, if two tabs share a label, or
    /// if the selection does not point at one of the tabs.
    pub fn new<I, T>(selection: Selection, tabs: I) -> Result<Self, TabsError>
    where
        I: IntoIterator<Item = T>,
        T: Into<Tab>,
    {
        let tabs: Vec<Tab> = tabs.into_iter().map(Into::into).collect();
        if tabs.len() < 2 {
            return Err(TabsError::TooFewTabs { count: tabs.len() });
        }

        let mut seen = HashSet::with_capacity(tabs.len());
        if let Some(dup) = tabs.iter().find(|tab| !seen.insert(tab.label())) {
            return Err(TabsError::DuplicateLabel {
                label: dup.label().to_owned(),
            });
        }

        let index = selection.get();
        if index >= tabs.len() {
            return Err(TabsError::SelectionOutOfRange {
                index,
                count: tabs.len(),
            });
        }

        let observer = selection.subscribe();
        let label_height = label::measured_height(&tabs);

        Ok(Self {
            tabs,
            selection,
            observer,
            style: TabStyle::default(),
            label_height,
            target: index,
            tween: None,
            area: Cell::new(Rect::default()),
        })
    }

    // ── Builder ─────────────────────────────────────────────────────

    pub fn style(mut self, style: TabStyle) -> Self {
        self.style = style;
        self
    }

    pub fn font(mut self, font: Modifier) -> Self {
        self.style.font = font;
        self
    }

    pub fn animation(mut self, animation: Animation) -> Self {
        self.style.animation = animation;
        self
    }

    pub fn active_accent(mut self, color: Color) -> Self {
        self.style.active_accent = color;
        self
    }

    pub fn inactive_accent(mut self, color: Color) -> Self {
        self.style.inactive_accent = color;
        self
    }

    pub fn active_background(mut self, color: Color) -> Self {
        self.style.active_background = color;
        self
    }

    pub fn inactive_background(mut self, color: Color) -> Self {
        self.style.inactive_background = color;
        self
    }

    pub fn bar_color(mut self, color: Color) -> Self {
        self.style.bar_color = color;
        self
    }

    pub fn bar_height(mut self, height: u16) -> Self {
        self.style.bar_height = height;
        self
    }

    pub fn track_color(mut self, color: Color) -> Self {
        self.style.track_color = color;
        self
    }

    pub fn track_height(mut self, height: u16) -> Self {
        self.style.track_height = height;
        self
    }

    // ── Accessors ───────────────────────────────────────────────────

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn tab_style(&self) -> &TabStyle {
        &self.style
    }

    /// The bound selection handle.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Currently selected index, clamped to the tab list.
    pub fn selected(&self) -> usize {
        (*self.observer.borrow()).min(self.last_index())
    }

    /// Rows needed to draw the whole widget.
    pub fn height(&self) -> u16 {
        self.label_height + self.style.indicator_height()
    }

    /// Split `area` into the label row and the indicator row.
    pub fn layout(&self, area: Rect) -> (Rect, Rect) {
        let [labels, indicator] = Layout::vertical([
            Constraint::Length(self.label_height),
            Constraint::Length(self.style.indicator_height()),
        ])
        .areas(area);
        (labels, indicator)
    }

    // ── Selection ───────────────────────────────────────────────────

    /// Select tab `index`.
    pub fn select(&mut self, index: usize) -> Result<(), TabsError> {
        if index >= self.tabs.len() {
            return Err(TabsError::SelectionOutOfRange {
                index,
                count: self.tabs.len(),
            });
        }
        self.selection.set(index);
        Ok(())
    }

    /// Select the first tab whose label is `label`, returning its index.
    pub fn select_label(&mut self, label: &str) -> Result<usize, TabsError> {
        let index = self
            .tabs
            .iter()
            .position(|tab| tab.label() == label)
            .ok_or_else(|| TabsError::UnknownLabel {
                label: label.to_owned(),
            })?;
        self.selection.set(index);
        Ok(index)
    }

    /// Follow selection changes. Returns `true` if the selection moved since
    /// the last tick, in which case the indicator starts gliding towards it.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.observer.has_changed().unwrap_or(false) {
            if self.tween.is_some_and(|tween| tween.is_finished(now)) {
                self.tween = None;
            }
            return false;
        }

        let requested = *self.observer.borrow_and_update();
        let index = if requested > self.last_index() {
            warn!(
                requested,
                count = self.tabs.len(),
                "selection out of range, clamping to last tab"
            );
            self.last_index()
        } else {
            requested
        };

        if index == self.target {
            return false;
        }

        let from = self.position(now);
        debug!(from, to = index, "tab selection changed");
        self.tween = Some(Tween::new(
            from,
            index_to_position(index),
            now,
            self.style.animation,
        ));
        self.target = index;
        true
    }

    /// Whether the indicator is still moving at `now`.
    pub fn is_animating(&self, now: Instant) -> bool {
        self.tween.is_some_and(|tween| !tween.is_finished(now))
    }

    /// Indicator position at `now`, in tab units.
    pub fn position(&self, now: Instant) -> f64 {
        self.tween
            .map_or_else(|| index_to_position(self.target), |tween| tween.sample(now))
    }

    // ── Input ───────────────────────────────────────────────────────

    /// Tab under the given screen cell, based on the rows drawn by the last
    /// render.
    pub fn tab_at(&self, column: u16, row: u16) -> Option<usize> {
        let area = self.area.get();
        if !area.contains(Position::new(column, row)) {
            return None;
        }
        geometry::tab_at(area.x, area.width, self.tabs.len(), column)
    }

    /// A left click on a tab selects it. Returns the new index if it changed.
    pub fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Option<usize> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return None;
        }
        let index = self.tab_at(mouse.column, mouse.row)?;
        self.write(index)
    }

    /// Arrow keys, `h`/`l`, `Home`/`End` and digits move the selection.
    /// Returns the new index if it changed.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<usize> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        if !(key.modifiers - KeyModifiers::SHIFT).is_empty() {
            return None;
        }
        let count = self.tabs.len();
        let current = self.selected();
        let index = match key.code {
            KeyCode::Left | KeyCode::Char('h') => (current + count - 1) % count,
            KeyCode::Right | KeyCode::Char('l') => (current + 1) % count,
            KeyCode::Home => 0,
            KeyCode::End => self.last_index(),
            KeyCode::Char(c @ '1'..='9') => {
                let index = c.to_digit(10).and_then(|d| usize::try_from(d).ok())? - 1;
                if index >= count {
                    return None;
                }
                index
            }
            _ => return None,
        };
        self.write(index)
    }

    fn write(&self, index: usize) -> Option<usize> {
        self.selection.set(index).then_some(index)
    }

    fn last_index(&self) -> usize {
        self.tabs.len() - 1
    }

    // ── Rendering ───────────────────────────────────────────────────

    /// Render as of `now`. The [`Widget`] impl uses the current instant.
    pub fn render_at(&self, area: Rect, buf: &mut Buffer, now: Instant) {
        let area = area.intersection(buf.area);
        let drawn = Rect {
            height: area.height.min(self.height()),
            ..area
        };
        self.area.set(drawn);
        if area.is_empty() {
            return;
        }

        let (labels, indicator) = self.layout(area);
        self.render_labels(labels, buf);
        self.render_indicator(indicator, buf, now);
    }

    fn render_labels(&self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let selected = self.selected();
        let count = self.tabs.len();

        for (index, tab) in self.tabs.iter().enumerate() {
            let (x, width) = geometry::tab_span(area.x, area.width, count, index);
            let cell = Rect::new(x, area.y, width, area.height);
            let style = self.style.label(index == selected);
            buf.set_style(cell, style);

            let lines = tab.fit(width);
            let used = u16::try_from(lines.len()).unwrap_or(u16::MAX);
            let top = cell.y + cell.height.saturating_sub(used) / 2;
            for (line, y) in lines.iter().zip(top..cell.bottom()) {
                let line_width = u16::try_from(line.width()).unwrap_or(u16::MAX);
                let left = cell.x + width.saturating_sub(line_width) / 2;
                buf.set_stringn(left, y, line, usize::from(width), style);
            }
        }
    }

    fn render_indicator(&self, area: Rect, buf: &mut Buffer, now: Instant) {
        if area.is_empty() {
            return;
        }

        let track_rows = self.style.track_height.min(area.height);
        fill(
            buf,
            Rect::new(area.x, area.bottom() - track_rows, area.width, track_rows),
            TRACK_SYMBOL,
            self.style.track(),
        );

        let geometry =
            IndicatorGeometry::at_position(f64::from(area.width), self.tabs.len(), self.position(now));
        let (x, width) = geometry.cells(area.x, area.width);
        let bar_rows = self.style.bar_height.min(area.height);
        fill(
            buf,
            Rect::new(x, area.bottom() - bar_rows, width, bar_rows),
            BAR_SYMBOL,
            self.style.bar(),
        );
    }
}

impl Widget for &SlidingTabs {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.render_at(area, buf, Instant::now());
    }
}

#[allow(clippy::cast_precision_loss)]
fn index_to_position(index: usize) -> f64 {
    index as f64
}

fn fill(buf: &mut Buffer, area: Rect, symbol: &str, style: Style) {
    for position in area.positions() {
        if let Some(cell) = buf.cell_mut(position) {
            cell.set_symbol(symbol).set_style(style);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use std::time::Duration;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::animation::Curve;

    fn tabs(labels: &[&str]) -> (Selection, SlidingTabs) {
        let selection = Selection::new(0);
        let widget = SlidingTabs::new(selection.clone(), labels.iter().copied()).unwrap();
        (selection, widget)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Press)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn rejects_fewer_than_two_tabs() {
        let err = SlidingTabs::new(Selection::new(0), ["Only"]).unwrap_err();
        assert_eq!(err, TabsError::TooFewTabs { count: 1 });

        let err = SlidingTabs::new(Selection::new(0), Vec::<&str>::new()).unwrap_err();
        assert_eq!(err, TabsError::TooFewTabs { count: 0 });
    }

    #[test]
    fn rejects_duplicate_labels() {
        let err = SlidingTabs::new(Selection::new(0), ["A", "B", "A"]).unwrap_err();
        assert_eq!(
            err,
            TabsError::DuplicateLabel {
                label: "A".into()
            }
        );
    }

    #[test]
    fn rejects_out_of_range_selection() {
        let err = SlidingTabs::new(Selection::new(2), ["A", "B"]).unwrap_err();
        assert_eq!(err, TabsError::SelectionOutOfRange { index: 2, count: 2 });
    }

    #[test]
    fn select_writes_through_to_the_binding() {
        let (selection, mut widget) = tabs(&["A", "B", "C"]);
        widget.select(2).unwrap();
        assert_eq!(selection.get(), 2);
        assert!(widget.select(3).is_err());
        assert_eq!(selection.get(), 2);
    }

    #[test]
    fn select_label_resolves_first_match() {
        let (selection, mut widget) = tabs(&["First", "Second"]);
        assert_eq!(widget.select_label("Second").unwrap(), 1);
        assert_eq!(selection.get(), 1);
        assert_eq!(
            widget.select_label("Third").unwrap_err(),
            TabsError::UnknownLabel {
                label: "Third".into()
            }
        );
    }

    #[test]
    fn tick_follows_external_writes() {
        let (selection, mut widget) = tabs(&["A", "B", "C"]);
        let now = Instant::now();
        assert!(!widget.tick(now));

        selection.set(2);
        assert_eq!(widget.selected(), 2);
        assert!(widget.tick(now));
        assert!(widget.is_animating(now));
        assert_eq!(widget.position(now), 0.0);
        assert_eq!(widget.position(now + Duration::from_secs(1)), 2.0);
        assert!(!widget.is_animating(now + Duration::from_secs(1)));
    }

    #[test]
    fn retarget_mid_flight_starts_from_current_position() {
        let (selection, widget) = tabs(&["A", "B", "C", "D"]);
        let mut widget = widget.animation(Animation {
            curve: Curve::Linear,
            duration_ms: 100,
        });
        let start = Instant::now();

        selection.set(2);
        widget.tick(start);
        let halfway = start + Duration::from_millis(50);
        assert!((widget.position(halfway) - 1.0).abs() < 1e-6);

        selection.set(3);
        widget.tick(halfway);
        assert!((widget.position(halfway) - 1.0).abs() < 1e-6);
        assert_eq!(widget.position(halfway + Duration::from_millis(100)), 3.0);
    }

    #[test]
    fn out_of_range_external_write_is_clamped() {
        let (selection, mut widget) = tabs(&["A", "B", "C"]);
        selection.set(9);
        assert_eq!(widget.selected(), 2);
        assert!(widget.tick(Instant::now()));
        assert_eq!(widget.position(Instant::now() + Duration::from_secs(1)), 2.0);
    }

    #[test]
    fn keys_move_the_selection() {
        let (selection, mut widget) = tabs(&["A", "B", "C"]);
        assert_eq!(widget.handle_key_event(key(KeyCode::Right)), Some(1));
        assert_eq!(widget.handle_key_event(key(KeyCode::Char('l'))), Some(2));
        assert_eq!(widget.handle_key_event(key(KeyCode::Right)), Some(0));
        assert_eq!(widget.handle_key_event(key(KeyCode::Left)), Some(2));
        assert_eq!(widget.handle_key_event(key(KeyCode::Home)), Some(0));
        assert_eq!(widget.handle_key_event(key(KeyCode::End)), Some(2));
        assert_eq!(widget.handle_key_event(key(KeyCode::Char('2'))), Some(1));
        assert_eq!(widget.handle_key_event(key(KeyCode::Char('9'))), None);
        assert_eq!(widget.handle_key_event(key(KeyCode::Char('2'))), None);
        assert_eq!(selection.get(), 1);
    }

    #[test]
    fn ctrl_keys_are_ignored() {
        let (_, mut widget) = tabs(&["A", "B"]);
        let ctrl = KeyEvent::new(KeyCode::Right, KeyModifiers::CONTROL);
        assert_eq!(widget.handle_key_event(ctrl), None);
    }

    #[test]
    fn release_and_repeat_events_are_ignored() {
        let (selection, mut widget) = tabs(&["A", "B", "C"]);
        for kind in [KeyEventKind::Release, KeyEventKind::Repeat] {
            let event = KeyEvent::new_with_kind(KeyCode::Right, KeyModifiers::NONE, kind);
            assert_eq!(widget.handle_key_event(event), None);
        }
        assert_eq!(selection.get(), 0);
    }

    #[test]
    fn click_selects_every_tab() {
        let (selection, mut widget) = tabs(&["A", "B", "C", "D"]);
        let mut buf = Buffer::empty(Rect::new(0, 0, 40, 4));
        widget.render_at(Rect::new(0, 1, 40, 2), &mut buf, Instant::now());

        for index in (0..4).rev() {
            let column = u16::try_from(index * 10 + 5).unwrap();
            widget.handle_mouse_event(click(column, 1));
            assert_eq!(selection.get(), index);
        }
    }

    #[test]
    fn click_outside_or_other_buttons_do_nothing() {
        let (selection, mut widget) = tabs(&["A", "B"]);
        let mut buf = Buffer::empty(Rect::new(0, 0, 20, 4));
        widget.render_at(Rect::new(0, 1, 20, 2), &mut buf, Instant::now());

        assert_eq!(widget.handle_mouse_event(click(15, 0)), None);
        assert_eq!(widget.handle_mouse_event(click(15, 3)), None);

        let right = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Right),
            ..click(15, 1)
        };
        assert_eq!(widget.handle_mouse_event(right), None);
        assert_eq!(selection.get(), 0);

        assert_eq!(widget.handle_mouse_event(click(15, 2)), Some(1));
        assert_eq!(widget.handle_mouse_event(click(15, 2)), None);
    }

    #[test]
    fn clicks_below_the_drawn_rows_do_nothing() {
        let (selection, mut widget) = tabs(&["A", "B"]);
        let mut buf = Buffer::empty(Rect::new(0, 0, 20, 10));
        widget.render_at(Rect::new(0, 0, 20, 10), &mut buf, Instant::now());

        assert_eq!(widget.handle_mouse_event(click(15, 9)), None);
        assert_eq!(widget.handle_mouse_event(click(15, 2)), None);
        assert_eq!(selection.get(), 0);

        assert_eq!(widget.handle_mouse_event(click(15, 1)), Some(1));
    }

    #[test]
    fn height_accounts_for_labels_and_bars() {
        let (_, widget) = tabs(&["One", "Two\nlines"]);
        assert_eq!(widget.height(), 3);
        let widget = widget.bar_height(2);
        assert_eq!(widget.height(), 4);

        let (labels, indicator) = widget.layout(Rect::new(0, 0, 10, 4));
        assert_eq!(labels, Rect::new(0, 0, 10, 2));
        assert_eq!(indicator, Rect::new(0, 2, 10, 2));
    }
}
