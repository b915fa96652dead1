//! Modal form for adding a movie.

use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::Theme;
use crate::config::{FormAction, KeyResolver};
use crate::movies::NewMovie;
use crate::movies::message::MoviesMsg;
use crate::ui::{Component, Handled, Modal, Result, TextInput, TextInputEvent};

const TITLE: usize = 0;
const OPENING_TEXT: usize = 1;
const RELEASE_DATE: usize = 2;
const FIELD_COUNT: usize = 3;

const TITLE_REQUIRED: &str = "A title is required.";

pub struct AddMovieForm {
    fields: [TextInput; FIELD_COUNT],
    focus: usize,
    error: Option<&'static str>,
    resolver: Arc<KeyResolver>,
}

impl AddMovieForm {
    pub fn new(resolver: Arc<KeyResolver>) -> Self {
        let mut form = Self {
            fields: [
                TextInput::new("Title"),
                TextInput::new("Opening Text"),
                TextInput::new("Release Date").with_placeholder("YYYY-MM-DD"),
            ],
            focus: TITLE,
            error: None,
            resolver,
        };
        form.focus_field(TITLE);
        form
    }

    fn focus_field(&mut self, index: usize) {
        self.focus = index;
        for (i, field) in self.fields.iter_mut().enumerate() {
            field.set_focused(i == index);
        }
    }

    fn movie(&self) -> NewMovie {
        NewMovie {
            title: self.fields[TITLE].value().trim().to_string(),
            opening_text: self.fields[OPENING_TEXT].value().trim().to_string(),
            release_date: self.fields[RELEASE_DATE].value().trim().to_string(),
        }
    }

    fn submit(&mut self) -> Handled<MoviesMsg> {
        let movie = self.movie();
        if movie.title.is_empty() {
            self.error = Some(TITLE_REQUIRED);
            self.focus_field(TITLE);
            return Handled::Consumed;
        }
        MoviesMsg::SubmitMovie(movie).into()
    }
}

impl Modal for AddMovieForm {
    type Msg = MoviesMsg;

    fn handle_key(&mut self, key: KeyEvent) -> Result<Handled<Self::Msg>> {
        if self.resolver.matches_form(&key, FormAction::Cancel) {
            return Ok(MoviesMsg::FormCancelled.into());
        }
        if self.resolver.matches_form(&key, FormAction::Submit) {
            return Ok(self.submit());
        }
        if self.resolver.matches_form(&key, FormAction::NextField) {
            self.focus_field((self.focus + 1) % FIELD_COUNT);
            return Ok(Handled::Consumed);
        }
        if self.resolver.matches_form(&key, FormAction::PrevField) {
            self.focus_field((self.focus + FIELD_COUNT - 1) % FIELD_COUNT);
            return Ok(Handled::Consumed);
        }

        Ok(match self.fields[self.focus].handle_key(key)? {
            Handled::Event(TextInputEvent::Submitted(_)) if self.focus == FIELD_COUNT - 1 => self.submit(),
            Handled::Event(TextInputEvent::Submitted(_)) => {
                self.focus_field(self.focus + 1);
                Handled::Consumed
            }
            Handled::Event(TextInputEvent::Cancelled) => MoviesMsg::FormCancelled.into(),
            Handled::Event(TextInputEvent::Changed(_)) => {
                self.error = None;
                Handled::Consumed
            }
            Handled::Consumed | Handled::Ignored => Handled::Consumed,
        })
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let popup = area.centered(Constraint::Percentage(60), Constraint::Length(15));
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .title(format!(" {} ", self.title().unwrap_or_default()))
            .title_style(Style::default().fg(theme.accent()).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.border_focused()))
            .style(Style::default().bg(theme.surface()));
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let [title, opening, release, footer] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(1),
            ])
            .areas(inner);

        for (field, field_area) in self.fields.iter_mut().zip([title, opening, release]) {
            field.render(frame, field_area, theme);
        }

        let footer_line = match self.error {
            Some(error) => Line::from(Span::styled(error, Style::default().fg(theme.error()))),
            None => Line::from(vec![
                Span::styled(
                    self.resolver.display_form(FormAction::NextField),
                    Style::default().fg(theme.key()),
                ),
                Span::styled(" next field  ", Style::default().fg(theme.muted())),
                Span::styled(
                    self.resolver.display_form(FormAction::Submit),
                    Style::default().fg(theme.key()),
                ),
                Span::styled(" save  ", Style::default().fg(theme.muted())),
                Span::styled(
                    self.resolver.display_form(FormAction::Cancel),
                    Style::default().fg(theme.key()),
                ),
                Span::styled(" cancel", Style::default().fg(theme.muted())),
            ]),
        };
        frame.render_widget(Paragraph::new(footer_line), footer);
    }

    fn title(&self) -> Option<&str> {
        Some("Add Movie")
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};

    use super::*;

    fn form() -> AddMovieForm {
        AddMovieForm::new(Arc::new(KeyResolver::default()))
    }

    fn press(form: &mut AddMovieForm, code: KeyCode, modifiers: KeyModifiers) -> Handled<MoviesMsg> {
        form.handle_key(KeyEvent::new(code, modifiers)).unwrap()
    }

    fn type_str(form: &mut AddMovieForm, text: &str) {
        for c in text.chars() {
            press(form, KeyCode::Char(c), KeyModifiers::NONE);
        }
    }

    #[test]
    fn test_fill_and_submit_with_enter() {
        let mut form = form();
        type_str(&mut form, "Rogue One");
        press(&mut form, KeyCode::Enter, KeyModifiers::NONE);
        type_str(&mut form, "Rebels steal the plans.");
        press(&mut form, KeyCode::Tab, KeyModifiers::NONE);
        type_str(&mut form, "2016-12-16");

        match press(&mut form, KeyCode::Enter, KeyModifiers::NONE) {
            Handled::Event(MoviesMsg::SubmitMovie(movie)) => assert_eq!(
                movie,
                NewMovie {
                    title: "Rogue One".to_string(),
                    opening_text: "Rebels steal the plans.".to_string(),
                    release_date: "2016-12-16".to_string(),
                }
            ),
            other => panic!("expected submit, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_title_keeps_form_open() {
        let mut form = form();
        press(&mut form, KeyCode::Tab, KeyModifiers::NONE);
        type_str(&mut form, "text only");

        let result = press(&mut form, KeyCode::Char('s'), KeyModifiers::CONTROL);

        assert!(matches!(result, Handled::Consumed));
        assert_eq!(form.error, Some(TITLE_REQUIRED));
        assert_eq!(form.focus, TITLE);
    }

    #[test]
    fn test_shift_tab_wraps_to_last_field() {
        let mut form = form();
        press(&mut form, KeyCode::BackTab, KeyModifiers::SHIFT);
        assert_eq!(form.focus, RELEASE_DATE);
    }

    #[test]
    fn test_esc_cancels() {
        let mut form = form();
        type_str(&mut form, "half typed");
        assert!(matches!(
            press(&mut form, KeyCode::Esc, KeyModifiers::NONE),
            Handled::Event(MoviesMsg::FormCancelled)
        ));
    }

    #[test]
    fn test_modal_swallows_unknown_keys() {
        let mut form = form();
        assert!(press(&mut form, KeyCode::F(5), KeyModifiers::NONE).is_consumed());
    }
}
