use crate::configuration::ConfigurationSource;
use crate::game::{GameEngine, MoveError, MAX_COLUMNS};
use crossterm::event::{self, Event, KeyCode, KeyEvent};
use ratatui::{backend::Backend, Terminal};
use std::io;
use std::time::Duration;

use super::screen::ScreenState;

pub struct App<C> {
    engine: GameEngine<ScreenState, C>,
    selected_column: usize,
    should_quit: bool,
    hint: Option<String>,
    tick: Duration,
}

impl<C: ConfigurationSource> App<C> {
    pub fn new(source: C, tick: Duration) -> Self {
        App {
            engine: GameEngine::new(ScreenState::new(), source),
            selected_column: MAX_COLUMNS / 2, // Start in middle
            should_quit: false,
            hint: Some("Press 's' to start a game".to_string()),
            tick,
        }
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            self.engine.poll_configuration();
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
        if event::poll(self.tick)? {
            if let Event::Key(key) = event::read()? {
                self.handle_key(key);
            }
        }
        Ok(())
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) {
        // Clear hint on any key press
        self.hint = None;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_column + 1 < MAX_COLUMNS {
                    self.selected_column += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_counter();
            }
            KeyCode::Char('s') => {
                if self.engine.is_fetching() {
                    self.hint = Some("Still loading players...".to_string());
                } else {
                    self.engine.start_game();
                }
            }
            KeyCode::Char('e') => {
                self.engine.end_game();
            }
            _ => {}
        }
    }

    /// Drop a counter in the selected column
    fn drop_counter(&mut self) {
        // Full columns are not selectable.
        if self.engine.board().is_column_full(self.selected_column) {
            self.hint = Some("Column is full!".to_string());
            return;
        }

        match self.engine.make_move(self.selected_column) {
            Ok(_) => {}
            Err(MoveError::NotInProgress) => {
                self.hint = Some("Game over! Press 's' to start.".to_string());
            }
            Err(MoveError::InvalidColumn(_)) => {
                self.hint = Some("Invalid column!".to_string());
            }
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(
            frame,
            self.engine.sink(),
            self.engine.current_player(),
            self.selected_column,
            &self.hint,
        );
    }
}
