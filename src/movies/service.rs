use std::sync::Arc;

use color_eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::Theme;
use crate::commands::Command;
use crate::config::{FormAction, KeyResolver, MoviesAction, NavAction, SearchAction};
use crate::movies::command::{AddMovieCmd, FetchMoviesCmd};
use crate::movies::controller::FetchController;
use crate::movies::form::AddMovieForm;
use crate::movies::list::MovieListScreen;
use crate::movies::message::MoviesMsg;
use crate::movies::view::{Branch, LOADING_TEXT, NO_MOVIES_TEXT};
use crate::movies::{FetchStatus, MovieSource};
use crate::service::{Service, UpdateResult};
use crate::ui::{Component, Handled, Keybinding, Modal, Screen, Spinner, StatusInfo};

/// Hosts the movie collection: fetch lifecycle, the four display branches and
/// the add-movie form.
pub struct MoviesService {
    controller: FetchController,
    writable: bool,
    resolver: Arc<KeyResolver>,
    spinner: Spinner,
    screen: MovieListScreen,
    form: Option<AddMovieForm>,
    msg_tx: UnboundedSender<MoviesMsg>,
    msg_rx: UnboundedReceiver<MoviesMsg>,
}

impl MoviesService {
    pub fn new(source: Arc<dyn MovieSource>, writable: bool, resolver: Arc<KeyResolver>) -> Self {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        Self {
            controller: FetchController::new(source),
            writable,
            screen: MovieListScreen::new(Vec::new(), Arc::clone(&resolver)),
            resolver,
            spinner: Spinner::with_label(LOADING_TEXT),
            form: None,
            msg_tx,
            msg_rx,
        }
    }

    fn queue(&self, msg: MoviesMsg) {
        let _ = self.msg_tx.send(msg);
    }

    fn process_message(&mut self, msg: MoviesMsg) -> UpdateResult {
        match msg {
            MoviesMsg::Refresh => {
                let request = self.controller.begin_refresh();
                FetchMoviesCmd::new(self.controller.source(), request, self.msg_tx.clone()).into()
            }

            MoviesMsg::FetchCompleted { request, result } => {
                if self.controller.complete(request, result) {
                    self.screen.set_movies(self.controller.state().movies.clone());
                }
                UpdateResult::Idle
            }

            MoviesMsg::ShowAddForm => {
                if self.writable {
                    self.form = Some(AddMovieForm::new(Arc::clone(&self.resolver)));
                }
                UpdateResult::Idle
            }

            MoviesMsg::FormCancelled => {
                self.form = None;
                UpdateResult::Idle
            }

            MoviesMsg::SubmitMovie(movie) => {
                self.form = None;
                AddMovieCmd::new(self.controller.source(), movie, self.msg_tx.clone()).into()
            }
        }
    }

    fn render_message(frame: &mut Frame, area: Rect, lines: Vec<Line<'static>>) {
        let height = u16::try_from(lines.len()).unwrap_or(u16::MAX);
        let area = area.centered(Constraint::Percentage(80), Constraint::Length(height));
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
    }

    fn render_error(&self, frame: &mut Frame, area: Rect, theme: &Theme, message: &str) {
        let hint = Line::from(vec![
            Span::styled("Press ", Style::default().fg(theme.muted())),
            Span::styled(
                self.resolver.display_movies(MoviesAction::Refresh),
                Style::default().fg(theme.key()),
            ),
            Span::styled(" to try again.", Style::default().fg(theme.muted())),
        ]);
        let lines = vec![
            Line::from(Span::styled(
                message.to_string(),
                Style::default().fg(theme.error()).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            hint,
        ];
        Self::render_message(frame, area, lines);
    }

    fn status_label(&self) -> &'static str {
        match self.controller.state().status {
            FetchStatus::Idle if self.controller.state().latest_request == 0 => "not loaded",
            FetchStatus::Idle => "ready",
            FetchStatus::Loading => "loading",
            FetchStatus::Error(_) => "error",
        }
    }
}

impl Service for MoviesService {
    fn init(&mut self) {
        self.queue(MoviesMsg::Refresh);
    }

    fn on_tick(&mut self) {
        if self.controller.state().is_loading() {
            self.spinner.on_tick();
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<Handled<()>> {
        if let Some(form) = &mut self.form {
            if let Some(msg) = form.handle_key(key)?.event() {
                self.queue(msg);
            }
            return Ok(Handled::Consumed);
        }

        if self.controller.branch() == Branch::Movies {
            match self.screen.handle_key(key)? {
                Handled::Event(msg) => {
                    self.queue(msg);
                    return Ok(Handled::Consumed);
                }
                Handled::Consumed => return Ok(Handled::Consumed),
                Handled::Ignored => {}
            }
        }

        if self.resolver.matches_movies(&key, MoviesAction::Refresh) {
            self.queue(MoviesMsg::Refresh);
            return Ok(Handled::Consumed);
        }
        if self.writable && self.resolver.matches_movies(&key, MoviesAction::Add) {
            self.queue(MoviesMsg::ShowAddForm);
            return Ok(Handled::Consumed);
        }

        Ok(Handled::Ignored)
    }

    fn update(&mut self) -> Result<UpdateResult> {
        let mut commands: Vec<Box<dyn Command>> = Vec::new();

        while let Ok(msg) = self.msg_rx.try_recv() {
            match self.process_message(msg) {
                UpdateResult::Idle => {}
                UpdateResult::Commands(cmds) => commands.extend(cmds),
            }
        }

        Ok(if commands.is_empty() {
            UpdateResult::Idle
        } else {
            UpdateResult::Commands(commands)
        })
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        match self.controller.branch() {
            Branch::Loading => self.spinner.render(frame, area, theme),
            Branch::Error => {
                let message = self.controller.state().error_message().unwrap_or_default().to_string();
                self.render_error(frame, area, theme, &message);
            }
            Branch::NoMovies => Self::render_message(
                frame,
                area,
                vec![Line::from(Span::styled(NO_MOVIES_TEXT, Style::default().fg(theme.muted())))],
            ),
            Branch::Movies => self.screen.render(frame, area, theme),
        }

        if let Some(form) = &mut self.form {
            form.render(frame, area, theme);
        }
    }

    fn breadcrumbs(&self) -> Vec<String> {
        let mut crumbs = match self.controller.branch() {
            Branch::Movies => self.screen.breadcrumbs(),
            _ => vec!["Movies".to_string()],
        };
        if let Some(title) = self.form.as_ref().and_then(|form| form.title()) {
            crumbs.push(title.to_string());
        }
        crumbs
    }

    fn keybindings(&self) -> Vec<Keybinding> {
        let r = &self.resolver;

        if self.form.is_some() {
            return vec![
                Keybinding::hint(r.display_form(FormAction::NextField), "Next field"),
                Keybinding::hint(r.display_form(FormAction::PrevField), "Previous field"),
                Keybinding::hint(r.display_form(FormAction::Submit), "Save"),
                Keybinding::hint(r.display_form(FormAction::Cancel), "Cancel"),
            ];
        }

        if self.screen.is_searching() && self.controller.branch() == Branch::Movies {
            return vec![
                Keybinding::hint("Enter", "Apply filter"),
                Keybinding::hint(r.display_search(SearchAction::Exit), "Clear search"),
            ];
        }

        let mut bindings = vec![Keybinding::hint(r.display_movies(MoviesAction::Refresh), "Refresh")];
        if self.writable {
            bindings.push(Keybinding::hint(r.display_movies(MoviesAction::Add), "Add movie"));
        }
        if self.controller.branch() == Branch::Movies {
            bindings.push(Keybinding::hint(r.display_search(SearchAction::Toggle), "Search"));
            bindings.push(Keybinding::hint(
                format!("{}/{}", r.display_nav(NavAction::Up), r.display_nav(NavAction::Down)),
                "Navigate",
            ));
        }
        bindings
    }

    fn status(&self) -> StatusInfo {
        let state = self.controller.state();
        StatusInfo::new(self.controller.source().describe())
            .field("status", self.status_label())
            .field("movies", state.movies.len().to_string())
            .field("access", if self.writable { "read/write" } else { "read-only" })
            .field("request", format!("#{}", state.latest_request))
    }
}
