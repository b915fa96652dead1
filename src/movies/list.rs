//! The movie list screen: a searchable list with a detail pane.

use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, ListItem, Paragraph, Wrap};

use crate::Theme;
use crate::config::{KeyResolver, SearchAction};
use crate::movies::Movie;
use crate::movies::message::MoviesMsg;
use crate::search::Matcher;
use crate::ui::{Component, Handled, List, ListRow, Result, Screen, TextInput, TextInputEvent};

impl ListRow for Movie {
    fn render_row(&self, theme: &Theme) -> ListItem<'static> {
        let mut spans = vec![Span::styled(self.title.clone(), Style::default().fg(theme.text()))];
        if let Some(year) = self.release_year() {
            spans.push(Span::styled(format!("  {year}"), Style::default().fg(theme.dim())));
        }
        ListItem::new(Line::from(spans))
    }
}

pub struct MovieListScreen {
    movies: Vec<Movie>,
    list: List<Movie>,
    search: TextInput,
    searching: bool,
    matcher: Matcher,
    resolver: Arc<KeyResolver>,
}

impl MovieListScreen {
    pub fn new(movies: Vec<Movie>, resolver: Arc<KeyResolver>) -> Self {
        let mut search = TextInput::new("Search").with_placeholder("title or opening text");
        search.set_focused(false);
        Self {
            list: List::new(movies.clone(), Arc::clone(&resolver)),
            movies,
            search,
            searching: false,
            matcher: Matcher::default(),
            resolver,
        }
    }

    /// Replace the collection, keeping the selected movie selected if it is
    /// still present and the active filter applied.
    pub fn set_movies(&mut self, movies: Vec<Movie>) {
        let selected = self.list.selected().map(|m| m.id.clone());
        self.movies = movies;
        self.apply_filter();
        if let Some(id) = selected {
            self.list.select_where(|m| m.id == id);
        }
    }

    pub const fn is_searching(&self) -> bool {
        self.searching
    }

    pub fn query(&self) -> &str {
        self.search.value()
    }

    pub fn selected(&self) -> Option<&Movie> {
        self.list.selected()
    }

    pub fn visible(&self) -> &[Movie] {
        self.list.items()
    }

    fn apply_filter(&mut self) {
        let visible: Vec<Movie> = self
            .matcher
            .filter(&self.movies, self.search.value(), |m| {
                [m.title.as_str(), m.opening_text.as_str()]
            })
            .into_iter()
            .cloned()
            .collect();
        self.list.set_items(visible);
    }

    fn set_searching(&mut self, searching: bool) {
        self.searching = searching;
        self.search.set_focused(searching);
    }

    fn clear_search(&mut self) {
        self.search.clear();
        self.apply_filter();
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> Result<Handled<MoviesMsg>> {
        match self.search.handle_key(key)? {
            Handled::Event(TextInputEvent::Changed(_)) => self.apply_filter(),
            Handled::Event(TextInputEvent::Submitted(_)) => self.set_searching(false),
            Handled::Event(TextInputEvent::Cancelled) => {
                self.set_searching(false);
                self.clear_search();
            }
            Handled::Consumed => {}
            // Navigation keys still move the selection while typing.
            Handled::Ignored => return Ok(self.list.handle_key(key)?.discard()),
        }
        Ok(Handled::Consumed)
    }

    fn render_detail(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let block = Block::default()
            .title(" Details ")
            .title_style(Style::default().fg(theme.title()).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.border()));

        let Some(movie) = self.list.selected() else {
            let empty = Paragraph::new(Span::styled("No matching movies.", Style::default().fg(theme.dim())))
                .block(block);
            frame.render_widget(empty, area);
            return;
        };

        let label = Style::default().fg(theme.dim());
        let mut lines = vec![
            Line::from(Span::styled(
                movie.title.clone(),
                Style::default().fg(theme.accent()).add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::styled("Released ", label),
                Span::styled(movie.display_release_date(), Style::default().fg(theme.text())),
            ]),
            Line::from(vec![
                Span::styled("Id       ", label),
                Span::styled(movie.id.clone(), Style::default().fg(theme.muted())),
            ]),
            Line::from(""),
        ];
        lines.extend(
            movie
                .opening_text
                .lines()
                .map(|line| Line::from(Span::styled(line.trim().to_string(), Style::default().fg(theme.text())))),
        );

        let detail = Paragraph::new(lines).wrap(Wrap { trim: false }).block(block);
        frame.render_widget(detail, area);
    }
}

impl Screen for MovieListScreen {
    type Msg = MoviesMsg;

    fn handle_key(&mut self, key: KeyEvent) -> Result<Handled<Self::Msg>> {
        if self.searching {
            return self.handle_search_key(key);
        }

        if self.resolver.matches_search(&key, SearchAction::Toggle) {
            self.set_searching(true);
            return Ok(Handled::Consumed);
        }
        if self.resolver.matches_search(&key, SearchAction::Exit) && !self.query().is_empty() {
            self.clear_search();
            return Ok(Handled::Consumed);
        }

        Ok(self.list.handle_key(key)?.discard())
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let [left, right] = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .areas(area);

        let list_area = if self.searching || !self.query().is_empty() {
            let [search_area, list_area] = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(3), Constraint::Min(1)])
                .areas(left);
            self.search.render(frame, search_area, theme);
            list_area
        } else {
            left
        };

        let title = format!(" Movies ({}/{}) ", self.list.items().len(), self.movies.len());
        let block = Block::default()
            .title(title)
            .title_style(Style::default().fg(theme.title()).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(if self.searching {
                theme.border()
            } else {
                theme.border_focused()
            }));
        let inner = block.inner(list_area);
        frame.render_widget(block, list_area);
        self.list.render(frame, inner, theme);

        self.render_detail(frame, right, theme);
    }

    fn breadcrumbs(&self) -> Vec<String> {
        let mut crumbs = vec!["Movies".to_string()];
        if !self.query().is_empty() {
            crumbs.push(format!("/{}", self.query()));
        }
        crumbs
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};

    use super::*;
    use crate::movies::controller::tests::movie;

    fn screen() -> MovieListScreen {
        MovieListScreen::new(
            vec![
                movie("4", "A New Hope"),
                movie("5", "The Empire Strikes Back"),
                movie("6", "Return of the Jedi"),
            ],
            Arc::new(KeyResolver::default()),
        )
    }

    fn press(screen: &mut MovieListScreen, code: KeyCode) -> Handled<MoviesMsg> {
        screen.handle_key(KeyEvent::new(code, KeyModifiers::NONE)).unwrap()
    }

    fn type_str(screen: &mut MovieListScreen, text: &str) {
        for c in text.chars() {
            press(screen, KeyCode::Char(c));
        }
    }

    fn titles(screen: &MovieListScreen) -> Vec<&str> {
        screen.visible().iter().map(|m| m.title.as_str()).collect()
    }

    #[test]
    fn test_search_filters_in_arrival_order() {
        let mut screen = screen();

        assert!(press(&mut screen, KeyCode::Char('/')).is_consumed());
        assert!(screen.is_searching());
        type_str(&mut screen, "the");

        assert_eq!(titles(&screen), ["The Empire Strikes Back", "Return of the Jedi"]);
        assert_eq!(screen.breadcrumbs(), ["Movies", "/the"]);
    }

    #[test]
    fn test_enter_keeps_filter_and_esc_clears_it() {
        let mut screen = screen();
        press(&mut screen, KeyCode::Char('/'));
        type_str(&mut screen, "jedi");
        press(&mut screen, KeyCode::Enter);

        assert!(!screen.is_searching());
        assert_eq!(titles(&screen), ["Return of the Jedi"]);

        press(&mut screen, KeyCode::Esc);
        assert_eq!(titles(&screen).len(), 3);
        assert_eq!(screen.breadcrumbs(), ["Movies"]);
    }

    #[test]
    fn test_unhandled_keys_fall_through() {
        let mut screen = screen();
        assert!(matches!(press(&mut screen, KeyCode::Char('r')), Handled::Ignored));
        assert!(matches!(press(&mut screen, KeyCode::Esc), Handled::Ignored));
        assert!(press(&mut screen, KeyCode::Down).is_consumed());
        assert_eq!(screen.selected().map(|m| m.id.as_str()), Some("5"));
    }

    #[test]
    fn test_set_movies_keeps_selection_by_id() {
        let mut screen = screen();
        press(&mut screen, KeyCode::End);

        screen.set_movies(vec![
            movie("1", "The Phantom Menace"),
            movie("6", "Return of the Jedi"),
            movie("7", "The Force Awakens"),
        ]);

        assert_eq!(screen.selected().map(|m| m.id.as_str()), Some("6"));
    }
}
