//! Outbound notifications from the engine to whatever draws the game.

use crate::error::FetchError;
use crate::game::{CounterState, PlayerIdentity, PresentationPosition};

/// Receives every state change the engine makes, synchronously and in order.
pub trait PresentationSink {
    /// The board was replaced with an empty one and play can begin.
    fn on_board_reset(&mut self);

    fn on_players_ready(&mut self, player_a: &PlayerIdentity, player_b: &PlayerIdentity);

    fn on_cell_changed(&mut self, cell: PresentationPosition, state: CounterState);

    fn on_status_message(&mut self, text: &str);

    fn on_game_over(&mut self);

    fn on_configuration_error(&mut self, error: &FetchError);
}

/// A recorded sink notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
    BoardReset,
    PlayersReady {
        player_a: PlayerIdentity,
        player_b: PlayerIdentity,
    },
    CellChanged {
        cell: PresentationPosition,
        state: CounterState,
    },
    StatusMessage(String),
    GameOver,
    ConfigurationError(String),
}

/// Sink that keeps every notification in arrival order.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<SinkEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[SinkEvent] {
        &self.events
    }

    /// Take everything recorded so far, leaving the log empty.
    pub fn drain(&mut self) -> Vec<SinkEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn last_message(&self) -> Option<&str> {
        self.events.iter().rev().find_map(|event| match event {
            SinkEvent::StatusMessage(text) => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn contains(&self, event: &SinkEvent) -> bool {
        self.events.contains(event)
    }
}

impl PresentationSink for EventLog {
    fn on_board_reset(&mut self) {
        self.events.push(SinkEvent::BoardReset);
    }

    fn on_players_ready(&mut self, player_a: &PlayerIdentity, player_b: &PlayerIdentity) {
        self.events.push(SinkEvent::PlayersReady {
            player_a: player_a.clone(),
            player_b: player_b.clone(),
        });
    }

    fn on_cell_changed(&mut self, cell: PresentationPosition, state: CounterState) {
        self.events.push(SinkEvent::CellChanged { cell, state });
    }

    fn on_status_message(&mut self, text: &str) {
        self.events.push(SinkEvent::StatusMessage(text.to_string()));
    }

    fn on_game_over(&mut self) {
        self.events.push(SinkEvent::GameOver);
    }

    fn on_configuration_error(&mut self, error: &FetchError) {
        self.events.push(SinkEvent::ConfigurationError(error.to_string()));
    }
}

/// Forwards every notification to both sinks, left first.
impl<L: PresentationSink, R: PresentationSink> PresentationSink for (L, R) {
    fn on_board_reset(&mut self) {
        self.0.on_board_reset();
        self.1.on_board_reset();
    }

    fn on_players_ready(&mut self, player_a: &PlayerIdentity, player_b: &PlayerIdentity) {
        self.0.on_players_ready(player_a, player_b);
        self.1.on_players_ready(player_a, player_b);
    }

    fn on_cell_changed(&mut self, cell: PresentationPosition, state: CounterState) {
        self.0.on_cell_changed(cell, state);
        self.1.on_cell_changed(cell, state);
    }

    fn on_status_message(&mut self, text: &str) {
        self.0.on_status_message(text);
        self.1.on_status_message(text);
    }

    fn on_game_over(&mut self) {
        self.0.on_game_over();
        self.1.on_game_over();
    }

    fn on_configuration_error(&mut self, error: &FetchError) {
        self.0.on_configuration_error(error);
        self.1.on_configuration_error(error);
    }
}
