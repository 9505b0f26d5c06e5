//! Core Connect Four game logic: board model, coordinate conversion, win
//! detection, and the engine state machine.

mod board;
mod engine;
mod player;
mod position;
mod win;

pub use board::{
    Board, Column, Counter, CounterState, Direction, Position, MAX_COLUMNS, MAX_ROWS, WIN_LENGTH,
};
pub use engine::{GameEngine, GamePhase, MoveError, MoveOutcome};
pub use player::{PlayerColor, PlayerIdentity, Players, Rgb};
pub use position::{to_engine, to_presentation, PresentationPosition};
pub use win::Line;
