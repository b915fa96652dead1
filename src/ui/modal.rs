//! Modal trait for ephemeral overlay dialogs.

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::Theme;
use crate::ui::{Handled, Result};

/// Ephemeral overlay that blocks the screen below.
///
/// Modals capture all input until dismissed. The add-movie form is one.
pub trait Modal {
    /// The message type this modal emits (same as the parent screen's)
    type Msg;

    /// Handle a key event. Modals should consume every key they receive.
    fn handle_key(&mut self, key: KeyEvent) -> Result<Handled<Self::Msg>>;

    /// Render the modal as a centered overlay.
    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme);

    /// Title shown in the modal header (optional).
    fn title(&self) -> Option<&str> {
        None
    }
}
