use std::sync::Arc;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::Theme;
use crate::config::{GlobalAction, KeyResolver};

const LOGO: &[&str] = &[
    r" .-----------. ",
    r" |[]|     |[]| ",
    r" |  | >_  |  | ",
    r" |[]|     |[]| ",
    r" '-----------' ",
    r"  lazymovies   ",
];

/// A key hint shown in the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keybinding {
    pub key: String,
    pub description: String,
    /// Hints are shown in the bar; everything else only exists for
    /// completeness of the list.
    pub hint: bool,
}

impl Keybinding {
    pub fn new(key: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            description: description.into(),
            hint: false,
        }
    }

    pub fn hint(key: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            hint: true,
            ..Self::new(key, description)
        }
    }
}

/// Left-hand block of the status bar: a heading plus labelled values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusInfo {
    pub heading: String,
    pub fields: Vec<(&'static str, String)>,
}

impl StatusInfo {
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn field(mut self, label: &'static str, value: impl Into<String>) -> Self {
        self.fields.push((label, value.into()));
        self
    }
}

pub struct StatusBar {
    resolver: Arc<KeyResolver>,
}

impl StatusBar {
    pub const fn new(resolver: Arc<KeyResolver>) -> Self {
        Self { resolver }
    }

    /// Rows needed to show the bar without clipping the logo.
    pub const fn height() -> u16 {
        LOGO.len() as u16 + 2
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        theme: &Theme,
        info: &StatusInfo,
        local_keybindings: &[Keybinding],
    ) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.border()));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [status_area, keys_area, logo_area] = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(42),
                Constraint::Min(20),
                Constraint::Length(16),
            ])
            .areas(inner);

        Self::render_status_info(frame, status_area, theme, info);
        self.render_keybindings(frame, keys_area, theme, local_keybindings);
        Self::render_logo(frame, logo_area, theme);
    }

    fn render_status_info(frame: &mut Frame, area: Rect, theme: &Theme, info: &StatusInfo) {
        let width = area.width as usize;
        let label_style = Style::default().fg(theme.dim());
        let value_style = Style::default().fg(theme.text());

        let mut lines = vec![
            Line::from(Span::styled(
                truncate_str(&info.heading, width),
                Style::default().fg(theme.border_focused()).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        lines.extend(
            info.fields
                .iter()
                .map(|(label, value)| status_line(label, value, width, label_style, value_style)),
        );

        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_keybindings(
        &self,
        frame: &mut Frame,
        area: Rect,
        theme: &Theme,
        local_keybindings: &[Keybinding],
    ) {
        let global = self.global_keybindings();
        let hints: Vec<&Keybinding> = local_keybindings
            .iter()
            .chain(global.iter())
            .filter(|kb| kb.hint)
            .collect();

        if hints.is_empty() || area.height == 0 {
            return;
        }

        // Align separators by sizing columns to the widest key and description.
        let key_width = hints.iter().map(|kb| kb.key.chars().count()).max().unwrap_or(1);
        let desc_width = hints
            .iter()
            .map(|kb| kb.description.chars().count())
            .max()
            .unwrap_or(1);
        let col_width = u16::try_from(key_width + 3 + desc_width + 2).unwrap_or(u16::MAX);
        let num_cols = (area.width / col_width).max(1) as usize;
        let num_rows = area.height as usize;

        let mut columns: Vec<Vec<Line>> = vec![Vec::new(); num_cols];
        for (i, kb) in hints.iter().enumerate() {
            let Some(column) = columns.get_mut(i / num_rows) else {
                break;
            };
            column.push(Line::from(vec![
                Span::styled(format!("{:>key_width$}", kb.key), Style::default().fg(theme.key())),
                Span::styled(" │ ", Style::default().fg(theme.border())),
                Span::styled(kb.description.clone(), Style::default().fg(theme.muted())),
            ]));
        }

        let col_areas = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Length(col_width); num_cols])
            .split(area);

        for (lines, col_area) in columns.into_iter().zip(col_areas.iter()) {
            frame.render_widget(Paragraph::new(lines), *col_area);
        }
    }

    fn render_logo(frame: &mut Frame, area: Rect, theme: &Theme) {
        let style = Style::default().fg(theme.accent()).add_modifier(Modifier::BOLD);
        let lines: Vec<Line> = LOGO.iter().map(|line| Line::from(Span::styled(*line, style))).collect();
        frame.render_widget(Paragraph::new(lines), area);
    }

    pub fn global_keybindings(&self) -> Vec<Keybinding> {
        vec![
            Keybinding::hint(self.resolver.display_global(GlobalAction::Quit), "Quit"),
            Keybinding::new(self.resolver.display_global(GlobalAction::Suspend), "Suspend"),
        ]
    }
}

/// `     label value`, with the label right-aligned.
fn status_line<'a>(
    label: &str,
    value: &str,
    max_width: usize,
    label_style: Style,
    value_style: Style,
) -> Line<'a> {
    const LABEL_W: usize = 10;
    let available = max_width.saturating_sub(LABEL_W + 1);
    Line::from(vec![
        Span::styled(format!("{label:>LABEL_W$}"), label_style),
        Span::raw(" "),
        Span::styled(truncate_str(value, available), value_style),
    ])
}

/// Cut `s` to `max_width` characters, ending in "..." when shortened.
fn truncate_str(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return s.chars().take(max_width).collect();
    }
    let mut out: String = s.chars().take(max_width - 3).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("swapi.dev", 20), "swapi.dev");
        assert_eq!(truncate_str("swapi.dev/api/films/", 12), "swapi.dev...");
        assert_eq!(truncate_str("Amélie", 2), "Am");
    }

    #[test]
    fn test_status_info_builder() {
        let info = StatusInfo::new("Movies").field("shape", "list").field("movies", "6");
        assert_eq!(info.fields, vec![("shape", "list".to_string()), ("movies", "6".to_string())]);
    }
}
