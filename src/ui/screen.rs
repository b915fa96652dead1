//! Screen trait for full-page views.

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::Theme;
use crate::ui::{Handled, Result};

/// Full-page view that orchestrates components.
///
/// Screens translate component events into domain messages, e.g. the movie
/// list screen turns a key press into `MoviesMsg::Refresh`.
pub trait Screen {
    /// The message type this screen emits (e.g., `MoviesMsg`)
    type Msg;

    /// Handle a key event, possibly emitting a domain message.
    fn handle_key(&mut self, key: KeyEvent) -> Result<Handled<Self::Msg>> {
        _ = key;
        Ok(Handled::Ignored)
    }

    /// Called on each tick for animations and time-based updates.
    fn on_tick(&mut self) {}

    /// Render the screen to the frame.
    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme);

    /// Breadcrumb segments for navigation context, e.g. `["Movies", "/hope"]`.
    fn breadcrumbs(&self) -> Vec<String> {
        vec![]
    }
}
