use ratatui::style::Color;

use crate::error::FetchError;
use crate::game::{
    to_engine, Board, Counter, CounterState, PlayerColor, PlayerIdentity, PresentationPosition,
};
use crate::presentation::PresentationSink;

/// What the terminal shows, kept up to date by engine notifications.
/// The cells live in a mirror board read by presentation address.
#[derive(Debug, Clone)]
pub struct ScreenState {
    board: Board,
    players: Option<[PlayerIdentity; 2]>,
    message: Option<String>,
    error: Option<String>,
    game_over: bool,
}

impl ScreenState {
    pub fn new() -> Self {
        ScreenState {
            board: Board::new(),
            players: None,
            message: None,
            error: None,
            game_over: true,
        }
    }

    pub fn cell(&self, cell: PresentationPosition) -> CounterState {
        self.board.presentation_status(cell)
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn player_name(&self, color: PlayerColor) -> &str {
        match &self.players {
            Some(players) => &players[color.index()].name,
            None => color.default_name(),
        }
    }

    /// Terminal color for a player; unparseable hex falls back to red/blue.
    pub fn player_color(&self, color: PlayerColor) -> Color {
        let parsed = self
            .players
            .as_ref()
            .and_then(|players| players[color.index()].color().ok());
        match (parsed, color) {
            (Some(rgb), _) => Color::Rgb(rgb.r, rgb.g, rgb.b),
            (None, PlayerColor::PlayerA) => Color::Red,
            (None, PlayerColor::PlayerB) => Color::Blue,
        }
    }
}

impl Default for ScreenState {
    fn default() -> Self {
        Self::new()
    }
}

impl PresentationSink for ScreenState {
    fn on_board_reset(&mut self) {
        self.board = Board::new();
        self.message = None;
        self.game_over = false;
    }

    fn on_players_ready(&mut self, player_a: &PlayerIdentity, player_b: &PlayerIdentity) {
        self.players = Some([player_a.clone(), player_b.clone()]);
        self.error = None;
    }

    fn on_cell_changed(&mut self, cell: PresentationPosition, state: CounterState) {
        // New cells always arrive on top of their column.
        if self.board.presentation_exists(cell) {
            self.board.counter_at_mut(to_engine(cell)).state = state;
        } else {
            self.board.add(cell.column, Counter::new(state));
        }
    }

    fn on_status_message(&mut self, text: &str) {
        self.message = Some(text.to_string());
    }

    fn on_game_over(&mut self) {
        self.game_over = true;
    }

    fn on_configuration_error(&mut self, error: &FetchError) {
        self.error = Some(format!("Could not load players: {error}"));
    }
}
