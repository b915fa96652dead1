use color_eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::Theme;
use crate::commands::Command;
use crate::ui::{Handled, Keybinding, StatusInfo};

pub enum UpdateResult {
    /// Nothing to run.
    Idle,
    /// Spawn these commands.
    Commands(Vec<Box<dyn Command>>),
}

impl<T: Command> From<T> for UpdateResult {
    fn from(value: T) -> Self {
        Self::Commands(vec![Box::new(value)])
    }
}

/// The screen the App is hosting.
///
/// Services keep their own message queue. The App calls methods in this order:
///
/// 1. `init()` once, then `update()` to process startup messages
/// 2. For each event:
///    - `on_tick()` on tick events
///    - `handle_key()` on key events, then `update()` if the key was consumed
/// 3. `update()` whenever a command completes
pub trait Service {
    /// Queue startup message(s).
    fn init(&mut self) {}

    fn on_tick(&mut self) {}

    fn handle_key(&mut self, key: KeyEvent) -> Result<Handled<()>>;

    /// Process all queued messages.
    ///
    /// # Errors
    /// The App shows the error as a toast and keeps running.
    fn update(&mut self) -> Result<UpdateResult>;

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme);

    /// Breadcrumb segments for the header.
    fn breadcrumbs(&self) -> Vec<String>;

    /// Key hints for the current view.
    fn keybindings(&self) -> Vec<Keybinding> {
        vec![]
    }

    fn status(&self) -> StatusInfo {
        StatusInfo::default()
    }
}
