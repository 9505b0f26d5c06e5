//! Terminal front end: renders engine notifications with Ratatui and feeds
//! key presses back into the engine.

mod app;
mod game_view;
mod screen;

pub use app::App;
pub use screen::ScreenState;
