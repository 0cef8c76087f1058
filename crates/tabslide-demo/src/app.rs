//! Application core — event loop, focus management, action dispatch.

use std::collections::VecDeque;
use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info};

use tabslide::{Selection, SlidingTabs, Tab};
use tabslide_config::Config;

use crate::action::{Action, BarId};
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::tab_bar::TabBar;
use crate::theme;
use crate::tui::Tui;

/// Labels for the period selector, full and compact.
const PERIODS: [(&str, &str); 4] = [
    ("1 hour", "1h"),
    ("24 hours", "24h"),
    ("7 days", "7d"),
    ("30 days", "30d"),
];

/// Selection changes kept in the history pane.
const HISTORY_LEN: usize = 8;

/// Top-level application state and event loop.
pub struct App {
    /// Tab bars, top to bottom.
    bars: Vec<TabBar>,
    /// Index into `bars` of the focused bar.
    focus: usize,
    running: bool,
    /// Caller-side selection handles, one per bar.
    sections: Selection,
    period: Selection,
    /// Subscriptions used to notice selection changes from any writer.
    watchers: Vec<(BarId, watch::Receiver<usize>)>,
    /// Most recent selection changes, newest first.
    history: VecDeque<String>,
    tick_rate: Duration,
    frame_rate: Duration,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    /// Build both tab bars from `config`. Fails if the config's tabs can't
    /// form a valid bar.
    pub fn new(config: &Config) -> Result<Self> {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        let sections = Selection::new(config.selected);
        let period = Selection::default();

        let sections_tabs = config.build_tabs(sections.clone())?;
        let period_tabs = SlidingTabs::new(
            period.clone(),
            PERIODS
                .iter()
                .map(|(label, short)| Tab::new(*label).with_short(*short)),
        )?
        .style(config.style);

        let mut bars = vec![
            TabBar::new(BarId::Sections, sections_tabs),
            TabBar::new(BarId::Period, period_tabs),
        ];
        bars[0].set_focused(true);

        let watchers = vec![
            (BarId::Sections, sections.subscribe()),
            (BarId::Period, period.subscribe()),
        ];

        Ok(Self {
            bars,
            focus: 0,
            running: true,
            sections,
            period,
            watchers,
            history: VecDeque::with_capacity(HISTORY_LEN),
            tick_rate: Duration::from_millis(config.tick_rate_ms),
            frame_rate: Duration::from_millis(config.frame_rate_ms),
            action_tx,
            action_rx,
        })
    }

    /// Run the main event loop until the user quits.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;

        let mut events = EventReader::new(self.tick_rate, self.frame_rate);
        info!("event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            let action = match event {
                Event::Key(key) => self.handle_key_event(key)?,
                Event::Mouse(mouse) => self.handle_mouse_event(mouse)?,
                Event::Resize(w, h) => Some(Action::Resize(w, h)),
                Event::Tick => Some(Action::Tick),
                Event::Frame => Some(Action::Render),
            };
            if let Some(action) = action {
                self.action_tx.send(action)?;
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;
                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        events.stop();
        info!("event loop ended");
        Ok(())
    }

    /// Global keys first, then the focused bar.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c'))
            | (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(Some(Action::Quit)),
            (KeyModifiers::NONE, KeyCode::Tab) => return Ok(Some(Action::FocusNext)),
            (KeyModifiers::SHIFT, KeyCode::BackTab) => return Ok(Some(Action::FocusPrev)),
            (KeyModifiers::NONE, KeyCode::Char('r')) => return Ok(Some(Action::CyclePeriod)),
            _ => {}
        }

        match self.bars.iter_mut().find(|bar| bar.focused()) {
            Some(bar) => bar.handle_key_event(key),
            None => Ok(None),
        }
    }

    /// Clicks go to whichever bar is under the pointer.
    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        for bar in &mut self.bars {
            if let Some(action) = bar.handle_mouse_event(mouse)? {
                return Ok(Some(action));
            }
        }
        Ok(None)
    }

    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => self.running = false,

            Action::Resize(w, h) => debug!(w, h, "terminal resized"),

            Action::FocusNext => self.set_focus((self.focus + 1) % self.bars.len()),

            Action::FocusPrev => {
                self.set_focus((self.focus + self.bars.len() - 1) % self.bars.len());
            }

            Action::Selected { bar, index } => {
                debug!(%bar, index, "selected by input");
                if let Some(pos) = self.bars.iter().position(|b| b.id() == *bar) {
                    self.set_focus(pos);
                }
            }

            Action::CyclePeriod => {
                let next = (self.period.get() + 1) % PERIODS.len();
                self.period.set(next);
            }

            Action::Tick => self.record_changes(),

            Action::Render => {}
        }

        for bar in &mut self.bars {
            if let Some(follow_up) = bar.update(action)? {
                self.action_tx.send(follow_up)?;
            }
        }
        Ok(())
    }

    fn set_focus(&mut self, focus: usize) {
        if focus == self.focus {
            return;
        }
        if let Some(bar) = self.bars.get_mut(self.focus) {
            bar.set_focused(false);
        }
        self.focus = focus;
        if let Some(bar) = self.bars.get_mut(self.focus) {
            bar.set_focused(true);
        }
    }

    /// Drain selection subscriptions into the history pane.
    fn record_changes(&mut self) {
        for (bar, rx) in &mut self.watchers {
            if !rx.has_changed().unwrap_or(false) {
                continue;
            }
            let index = *rx.borrow_and_update();
            let label = self
                .bars
                .iter()
                .find(|b| b.id() == *bar)
                .and_then(|b| b.tabs().tabs().get(index))
                .map_or("?", Tab::label);
            info!(%bar, index, label, "selection changed");

            if self.history.len() == HISTORY_LEN {
                self.history.pop_back();
            }
            self.history.push_front(format!("{bar} → {label}"));
        }
    }

    fn selected_label(&self, id: BarId) -> &str {
        let selection = match id {
            BarId::Sections => &self.sections,
            BarId::Period => &self.period,
        };
        self.bars
            .iter()
            .find(|b| b.id() == id)
            .and_then(|b| b.tabs().tabs().get(selection.get()))
            .map_or("?", Tab::label)
    }

    // ── Rendering ───────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let mut constraints: Vec<Constraint> = self
            .bars
            .iter()
            .map(|bar| Constraint::Length(bar.height().unwrap_or(3)))
            .collect();
        constraints.push(Constraint::Min(3));
        constraints.push(Constraint::Length(1));

        let areas = Layout::vertical(constraints).split(frame.area());
        for (bar, area) in self.bars.iter().zip(areas.iter()) {
            bar.render(frame, *area);
        }

        let n = self.bars.len();
        self.render_content(frame, areas[n]);
        self.render_status_bar(frame, areas[n + 1]);
    }

    fn render_content(&self, frame: &mut Frame, area: Rect) {
        let mut lines = vec![
            Line::from(vec![
                Span::styled("Section  ", theme::body()),
                Span::styled(self.selected_label(BarId::Sections), theme::value()),
            ]),
            Line::from(vec![
                Span::styled("Period   ", theme::body()),
                Span::styled(self.selected_label(BarId::Period), theme::value()),
            ]),
            Line::default(),
        ];
        lines.extend(
            self.history
                .iter()
                .map(|entry| Line::from(Span::styled(entry.as_str(), theme::key_hint()))),
        );

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default())
            .title(Line::from(Span::styled(" Selection ", theme::title_style())));
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let hints = [
            ("←/→", "move"),
            ("1-9", "jump"),
            ("tab", "focus"),
            ("r", "cycle period"),
            ("q", "quit"),
        ];
        let mut spans = Vec::with_capacity(hints.len() * 2);
        for (key, what) in hints {
            spans.push(Span::styled(format!(" {key} "), theme::key_hint_key()));
            spans.push(Span::styled(format!("{what} "), theme::key_hint()));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crossterm::event::{KeyEventKind, MouseButton, MouseEventKind};
    use pretty_assertions::assert_eq;
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Press)
    }

    /// Feed a key through the same path the event loop uses.
    fn press(app: &mut App, code: KeyCode) {
        if let Some(action) = app.handle_key_event(key(code)).unwrap() {
            app.process_action(&action).unwrap();
        }
        while let Ok(action) = app.action_rx.try_recv() {
            app.process_action(&action).unwrap();
        }
    }

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        let buf = terminal.backend().buffer();
        buf.content.iter().map(ratatui::buffer::Cell::symbol).collect()
    }

    #[test]
    fn arrows_drive_the_focused_bar() {
        let mut app = App::new(&Config::default()).unwrap();
        press(&mut app, KeyCode::Right);
        assert_eq!(app.sections.get(), 1);
        assert_eq!(app.period.get(), 0);

        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::End);
        assert_eq!(app.period.get(), 3);
        assert_eq!(app.sections.get(), 1);
    }

    #[test]
    fn focus_wraps_both_ways() {
        let mut app = App::new(&Config::default()).unwrap();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, 1);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, 0);

        let back = KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT);
        let action = app.handle_key_event(back).unwrap().unwrap();
        app.process_action(&action).unwrap();
        assert_eq!(app.focus, 1);
    }

    #[test]
    fn cycle_period_writes_from_outside_the_widget() {
        let mut app = App::new(&Config::default()).unwrap();
        for expected in [1, 2, 3, 0] {
            press(&mut app, KeyCode::Char('r'));
            assert_eq!(app.period.get(), expected);
        }
    }

    #[test]
    fn history_records_changes_on_tick() {
        let mut app = App::new(&Config::default()).unwrap();
        press(&mut app, KeyCode::Char('3'));
        app.process_action(&Action::Tick).unwrap();
        assert_eq!(app.history.front().map(String::as_str), Some("Sections → Third"));

        app.process_action(&Action::Tick).unwrap();
        assert_eq!(app.history.len(), 1);
    }

    #[test]
    fn click_on_period_bar_selects_and_focuses_it() {
        let mut app = App::new(&Config::default()).unwrap();
        screen(&app);

        // Period bar sits below the sections bar (4 rows); its labels are on
        // row 5. Inside the border 58 columns split into four tabs, the third
        // spanning columns 30..45.
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 32,
            row: 5,
            modifiers: KeyModifiers::NONE,
        };
        let action = app.handle_mouse_event(click).unwrap().unwrap();
        assert_eq!(
            action,
            Action::Selected {
                bar: BarId::Period,
                index: 2
            }
        );
        app.process_action(&action).unwrap();
        assert_eq!(app.period.get(), 2);
        assert_eq!(app.focus, 1);
        assert!(app.bars[1].focused());
        assert!(!app.bars[0].focused());
    }

    #[test]
    fn renders_labels_and_selection_summary() {
        let app = App::new(&Config::default()).unwrap();
        let text = screen(&app);
        assert!(text.contains("First"));
        assert!(text.contains("24 hours"));
        assert!(text.contains("Section  First"));
        assert!(text.contains("Period   1 hour"));
    }

    #[test]
    fn invalid_config_is_an_error() {
        let config = Config {
            selected: 7,
            ..Config::default()
        };
        assert!(App::new(&config).is_err());
    }
}
