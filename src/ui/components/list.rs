use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{List as RatatuiList, ListItem, ListState};

use crate::Theme;
use crate::config::{KeyResolver, NavAction};
use crate::ui::{Component, Handled, Result};

const PAGE_STEP: usize = 5;

pub enum ListEvent<T> {
    /// Selection moved to another row.
    Changed(T),
    /// The selected row was activated.
    Activated(T),
}

pub trait ListRow {
    fn render_row(&self, theme: &Theme) -> ListItem<'static>;
}

/// Keyboard-navigable list that owns its rows.
pub struct List<T: ListRow + Clone> {
    items: Vec<T>,
    state: ListState,
    resolver: Arc<KeyResolver>,
}

impl<T: ListRow + Clone> List<T> {
    pub fn new(items: Vec<T>, resolver: Arc<KeyResolver>) -> Self {
        let mut state = ListState::default();
        if !items.is_empty() {
            state.select(Some(0));
        }
        Self {
            items,
            state,
            resolver,
        }
    }

    pub fn selected(&self) -> Option<&T> {
        self.state.selected().and_then(|i| self.items.get(i))
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Replace the rows, keeping the selected index in range.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;

        match self.state.selected() {
            _ if self.items.is_empty() => self.state.select(None),
            Some(i) if i >= self.items.len() => self.state.select(Some(self.items.len() - 1)),
            Some(_) => {}
            None => self.state.select(Some(0)),
        }
    }

    /// Select the first row matching `predicate`. Returns false and leaves
    /// the selection alone when nothing matches.
    pub fn select_where(&mut self, predicate: impl Fn(&T) -> bool) -> bool {
        match self.items.iter().position(predicate) {
            Some(index) => {
                self.state.select(Some(index));
                true
            }
            None => false,
        }
    }

    fn change_event(&self, before: Option<usize>) -> Handled<ListEvent<T>> {
        match self.state.selected() {
            Some(selected) if Some(selected) != before => self
                .items
                .get(selected)
                .map_or(Handled::Consumed, |item| ListEvent::Changed(item.clone()).into()),
            _ => Handled::Consumed,
        }
    }

    fn last_index(&self) -> usize {
        self.items.len().saturating_sub(1)
    }
}

impl<T: ListRow + Clone> Component for List<T> {
    type Output = ListEvent<T>;

    fn handle_key(&mut self, key: KeyEvent) -> Result<Handled<Self::Output>> {
        if self.items.is_empty() {
            return Ok(Handled::Ignored);
        }

        let before = self.state.selected();
        let current = before.unwrap_or(0);

        let target = if self.resolver.matches_nav(&key, NavAction::Down) {
            usize::min(current + 1, self.last_index())
        } else if self.resolver.matches_nav(&key, NavAction::Up) {
            current.saturating_sub(1)
        } else if self.resolver.matches_nav(&key, NavAction::Home) {
            0
        } else if self.resolver.matches_nav(&key, NavAction::End) {
            self.last_index()
        } else if self.resolver.matches_nav(&key, NavAction::PageDown) {
            usize::min(current + PAGE_STEP, self.last_index())
        } else if self.resolver.matches_nav(&key, NavAction::PageUp) {
            current.saturating_sub(PAGE_STEP)
        } else if self.resolver.matches_nav(&key, NavAction::Select) {
            return Ok(self
                .selected()
                .map_or(Handled::Ignored, |item| ListEvent::Activated(item.clone()).into()));
        } else {
            return Ok(Handled::Ignored);
        };

        self.state.select(Some(target));
        Ok(self.change_event(before))
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let items: Vec<ListItem> = self.items.iter().map(|i| i.render_row(theme)).collect();

        let list = RatatuiList::new(items)
            .highlight_style(
                Style::default()
                    .bg(theme.selection())
                    .fg(theme.border_focused())
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        frame.render_stateful_widget(list, area, &mut self.state);
    }
}
