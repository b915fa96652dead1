use std::collections::VecDeque;
use std::time::{Duration, Instant};

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::Theme;
use crate::ui::Component;

const TOAST_DURATION: Duration = Duration::from_secs(3);
const MAX_VISIBLE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastType {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    message: String,
    toast_type: ToastType,
    created_at: Instant,
}

impl Toast {
    pub fn new(message: impl Into<String>, toast_type: ToastType) -> Self {
        Self {
            message: message.into(),
            toast_type,
            created_at: Instant::now(),
        }
    }

    fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= TOAST_DURATION
    }
}

/// Short-lived notifications stacked in the bottom-right corner.
#[derive(Default)]
pub struct ToastManager {
    toasts: VecDeque<Toast>,
}

impl ToastManager {
    pub fn show(&mut self, toast: Toast) {
        self.toasts.push_back(toast);
        while self.toasts.len() > MAX_VISIBLE {
            self.toasts.pop_front();
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.toasts.len()
    }
}

impl Component for ToastManager {
    type Output = ();

    fn on_tick(&mut self) {
        self.toasts.retain(|t| !t.is_expired());
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        const HEIGHT: u16 = 3;
        const SPACING: u16 = 1;
        let width = 50u16.min(area.width.saturating_sub(4));

        // Newest toast at the bottom, older ones stacked above it.
        for (i, toast) in self.toasts.iter().rev().enumerate() {
            let offset = (i as u16) * (HEIGHT + SPACING) + HEIGHT + 1;
            if offset > area.height {
                break;
            }
            let toast_area = Rect::new(
                area.x + area.width.saturating_sub(width + 2),
                area.y + area.height - offset,
                width,
                HEIGHT,
            );

            let (color, icon) = match toast.toast_type {
                ToastType::Success => (theme.success(), "✓"),
                ToastType::Error => (theme.error(), "✗"),
            };

            frame.render_widget(Clear, toast_area);
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(Style::default().fg(color))
                .style(Style::default().bg(theme.surface()));

            let paragraph = Paragraph::new(format!("{icon} {}", toast.message))
                .style(Style::default().fg(theme.text()).add_modifier(Modifier::BOLD))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(block);
            frame.render_widget(paragraph, toast_area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_newest_toasts_are_kept() {
        let mut toasts = ToastManager::default();
        for i in 0..5 {
            toasts.show(Toast::new(format!("toast {i}"), ToastType::Success));
        }

        assert_eq!(toasts.len(), MAX_VISIBLE);
        assert_eq!(toasts.toasts.front().map(|t| t.message.as_str()), Some("toast 2"));
    }

    #[test]
    fn test_fresh_toasts_survive_tick() {
        let mut toasts = ToastManager::default();
        toasts.show(Toast::new("Movie added", ToastType::Success));
        toasts.on_tick();
        assert_eq!(toasts.len(), 1);
    }
}
