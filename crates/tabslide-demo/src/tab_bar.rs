//! A bordered, focusable panel hosting one sliding tab bar.

use std::time::Instant;

use color_eyre::eyre::Result;
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders},
};
use tabslide::SlidingTabs;

use crate::action::{Action, BarId};
use crate::component::Component;
use crate::theme;

pub struct TabBar {
    id: BarId,
    tabs: SlidingTabs,
    focused: bool,
}

impl TabBar {
    pub fn new(id: BarId, tabs: SlidingTabs) -> Self {
        Self {
            id,
            tabs,
            focused: false,
        }
    }

    pub fn id(&self) -> BarId {
        self.id
    }

    pub fn tabs(&self) -> &SlidingTabs {
        &self.tabs
    }

    fn selected(&self, index: Option<usize>) -> Option<Action> {
        index.map(|index| Action::Selected {
            bar: self.id,
            index,
        })
    }
}

impl Component for TabBar {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if !self.focused {
            return Ok(None);
        }
        let index = self.tabs.handle_key_event(key);
        Ok(self.selected(index))
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        let index = self.tabs.handle_mouse_event(mouse);
        Ok(self.selected(index))
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::Render = action {
            self.tabs.tick(Instant::now());
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let border = if self.focused {
            theme::border_focused()
        } else {
            theme::border_default()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border)
            .title(Line::from(Span::styled(
                format!(" {} ", self.id),
                theme::title_style(),
            )));

        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(&self.tabs, inner);
    }

    fn height(&self) -> Option<u16> {
        Some(self.tabs.height() + 2)
    }

    fn focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}
