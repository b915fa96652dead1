use std::sync::Arc;

use color_eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, error, info, warn};

use crate::Theme;
use crate::commands::Command;
use crate::config::{GlobalAction, KeyResolver};
use crate::service::{Service, UpdateResult};
use crate::tui::{Event, Tui};
use crate::ui::{Component, StatusBar, Toast, ToastManager, ToastType};

const FRAME_RATE: f64 = 30.0;
const TICK_RATE: f64 = 8.0;

#[derive(Debug)]
pub enum AppMessage {
    Tick,
    Render,
    Resize(u16, u16),
    Suspend,
    Resume,
    Quit,
    ClearScreen,
    ShowToast {
        message: String,
        toast_type: ToastType,
    },
    CommandCompleted {
        name: String,
        result: std::result::Result<(), String>,
    },
}

pub struct App {
    service: Box<dyn Service>,
    resolver: Arc<KeyResolver>,
    theme: Theme,
    status_bar: StatusBar,
    toasts: ToastManager,
    should_quit: bool,
    should_suspend: bool,
    app_tx: UnboundedSender<AppMessage>,
    app_rx: UnboundedReceiver<AppMessage>,
}

impl App {
    pub fn new(service: Box<dyn Service>, resolver: Arc<KeyResolver>, theme: Theme) -> Self {
        let (app_tx, app_rx) = mpsc::unbounded_channel();
        Self {
            service,
            status_bar: StatusBar::new(Arc::clone(&resolver)),
            resolver,
            theme,
            toasts: ToastManager::default(),
            should_quit: false,
            should_suspend: false,
            app_tx,
            app_rx,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new(FRAME_RATE, TICK_RATE)?;
        tui.enter()?;

        self.service.init();
        self.update_service();

        loop {
            if let Some(event) = tui.next_event().await {
                self.handle_event(event);
            }
            self.handle_messages(&mut tui)?;

            if self.should_suspend {
                tui.suspend()?;
                self.send(AppMessage::Resume);
                self.send(AppMessage::ClearScreen);
                tui.enter()?;
            } else if self.should_quit {
                break;
            }
        }

        tui.exit()?;
        info!("Exiting");
        Ok(())
    }

    fn send(&self, msg: AppMessage) {
        let _ = self.app_tx.send(msg);
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Init => {}
            Event::Quit => self.send(AppMessage::Quit),
            Event::Tick => self.send(AppMessage::Tick),
            Event::Render => self.send(AppMessage::Render),
            Event::Resize(width, height) => self.send(AppMessage::Resize(width, height)),
            Event::Key(key) => self.handle_key(key),
            Event::Error(e) => warn!("Terminal event error: {e}"),
        }
    }

    /// Suspend always wins; otherwise the service sees the key first so a
    /// focused text field can take `q`.
    fn handle_key(&mut self, key: KeyEvent) {
        if self.resolver.matches_global(&key, GlobalAction::Suspend) {
            self.send(AppMessage::Suspend);
            return;
        }

        match self.service.handle_key(key) {
            Ok(handled) if handled.is_consumed() => {
                self.update_service();
                return;
            }
            Ok(_) => {}
            Err(e) => {
                error!("Key handling failed: {e:?}");
                self.show_error(&e.to_string());
                return;
            }
        }

        if self.resolver.matches_global(&key, GlobalAction::Quit) {
            self.send(AppMessage::Quit);
        }
    }

    fn update_service(&mut self) {
        match self.service.update() {
            Ok(UpdateResult::Idle) => {}
            Ok(UpdateResult::Commands(commands)) => {
                for command in commands {
                    self.spawn_command(command);
                }
            }
            Err(e) => {
                error!("Service update failed: {e:?}");
                self.show_error(&e.to_string());
            }
        }
    }

    fn spawn_command(&self, command: Box<dyn Command>) {
        let name = command.name();
        debug!("Spawning command: {name}");
        let app_tx = self.app_tx.clone();
        tokio::spawn(async move {
            let result = command.execute(app_tx.clone()).await.map_err(|e| e.to_string());
            let _ = app_tx.send(AppMessage::CommandCompleted { name, result });
        });
    }

    fn show_error(&mut self, message: &str) {
        self.toasts.show(Toast::new(message, ToastType::Error));
    }

    fn handle_messages(&mut self, tui: &mut Tui) -> Result<()> {
        while let Ok(msg) = self.app_rx.try_recv() {
            if !matches!(msg, AppMessage::Tick | AppMessage::Render) {
                debug!("Handling message: {msg:?}");
            }

            match msg {
                AppMessage::Tick => {
                    self.service.on_tick();
                    self.toasts.on_tick();
                }
                AppMessage::Render => self.render(tui)?,
                AppMessage::Resize(width, height) => {
                    tui.resize(Rect::new(0, 0, width, height))?;
                    self.render(tui)?;
                }
                AppMessage::Suspend => self.should_suspend = true,
                AppMessage::Resume => self.should_suspend = false,
                AppMessage::Quit => self.should_quit = true,
                AppMessage::ClearScreen => tui.clear()?,
                AppMessage::ShowToast { message, toast_type } => {
                    self.toasts.show(Toast::new(message, toast_type));
                }
                AppMessage::CommandCompleted { name, result } => {
                    if let Err(e) = result {
                        error!("Command '{name}' failed: {e}");
                        self.show_error(&format!("{name} failed"));
                    }
                    // The command may have queued messages for the service.
                    self.update_service();
                }
            }
        }
        Ok(())
    }

    fn render(&mut self, tui: &mut Tui) -> Result<()> {
        tui.draw(|frame| self.draw(frame))?;
        Ok(())
    }

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(
            Block::default().style(Style::default().bg(self.theme.background())),
            area,
        );

        let [header, body, footer] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(StatusBar::height()),
            ])
            .areas(area);

        self.render_breadcrumbs(frame, header);
        self.service.render(frame, body, &self.theme);
        self.status_bar.render(
            frame,
            footer,
            &self.theme,
            &self.service.status(),
            &self.service.keybindings(),
        );
        self.toasts.render(frame, area, &self.theme);
    }

    fn render_breadcrumbs(&self, frame: &mut Frame, area: Rect) {
        let theme = &self.theme;
        let mut spans = vec![Span::styled(
            " lazymovies ",
            Style::default().fg(theme.accent()).add_modifier(Modifier::BOLD),
        )];
        for crumb in self.service.breadcrumbs() {
            spans.push(Span::styled("› ", Style::default().fg(theme.dim())));
            spans.push(Span::styled(format!("{crumb} "), Style::default().fg(theme.text())));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};

    use super::*;
    use crate::ui::Handled;

    /// Consumes every key while `capturing` is set.
    struct FakeService {
        capturing: bool,
        fail_updates: bool,
    }

    impl Service for FakeService {
        fn handle_key(&mut self, _key: KeyEvent) -> Result<Handled<()>> {
            Ok(if self.capturing {
                Handled::Consumed
            } else {
                Handled::Ignored
            })
        }

        fn update(&mut self) -> Result<UpdateResult> {
            if self.fail_updates {
                return Err(color_eyre::eyre::eyre!("boom"));
            }
            Ok(UpdateResult::Idle)
        }

        fn render(&mut self, _frame: &mut Frame, _area: Rect, _theme: &Theme) {}

        fn breadcrumbs(&self) -> Vec<String> {
            vec!["Fake".to_string()]
        }
    }

    fn app(capturing: bool, fail_updates: bool) -> App {
        App::new(
            Box::new(FakeService {
                capturing,
                fail_updates,
            }),
            Arc::new(KeyResolver::default()),
            Theme::default(),
        )
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_quit_when_service_ignores_key() {
        let mut app = app(false, false);
        app.handle_key(key(KeyCode::Char('q'), KeyModifiers::NONE));
        assert!(matches!(app.app_rx.try_recv(), Ok(AppMessage::Quit)));
    }

    #[test]
    fn test_service_can_take_quit_key() {
        let mut app = app(true, false);
        app.handle_key(key(KeyCode::Char('q'), KeyModifiers::NONE));
        assert!(app.app_rx.try_recv().is_err());
    }

    #[test]
    fn test_suspend_beats_service() {
        let mut app = app(true, false);
        app.handle_key(key(KeyCode::Char('z'), KeyModifiers::CONTROL));
        assert!(matches!(app.app_rx.try_recv(), Ok(AppMessage::Suspend)));
    }

    #[test]
    fn test_failed_update_becomes_toast() {
        let mut app = app(true, true);
        app.handle_key(key(KeyCode::Char('x'), KeyModifiers::NONE));
        assert_eq!(app.toasts.len(), 1);
    }
}
