use crate::game::Session;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use std::io;
use tracing::warn;

pub struct App {
    session: Session,
    selected_column: usize,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    pub fn new(session: Session) -> Self {
        let selected_column = session.board().columns() / 2; // Start in middle
        let message = Some(super::turn_message(session.current_player()));
        App {
            session,
            selected_column,
            should_quit: false,
            message,
        }
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_column + 1 < self.session.board().columns() {
                    self.selected_column += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_token();
            }
            KeyCode::Char('r') => {
                self.restart();
            }
            _ => {}
        }
    }

    /// Drop the current player's token in the selected column. After a game
    /// has ended the next drop starts a new one.
    fn drop_token(&mut self) {
        if self.session.is_terminal() {
            self.restart();
            return;
        }

        self.message = Some(match self.session.play(self.selected_column) {
            Ok(outcome) => {
                let mut text = super::outcome_message(&outcome, self.session.current_player());
                if self.session.is_terminal() {
                    text.push_str("  Press Enter to start a new game.");
                }
                text
            }
            Err(err) => super::error_message(&err),
        });
    }

    fn restart(&mut self) {
        self.message = Some(match self.session.restart() {
            Ok(()) => format!(
                "New game started! {}",
                super::turn_message(self.session.current_player())
            ),
            Err(err) => {
                warn!(error = %err, "restart failed");
                super::error_message(&err)
            }
        });
        self.selected_column = self.session.board().columns() / 2;
    }

    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(frame, &self.session, self.selected_column, &self.message);
    }
}
