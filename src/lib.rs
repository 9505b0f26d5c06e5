//! # Connect Four
//!
//! A two-player Connect Four engine. The engine owns the board, turn order
//! and win detection, and pushes every state change to a presentation sink.
//! Player names and colors arrive asynchronously from a configuration source.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board, coordinates, win detection, engine
//! - [`presentation`] — Sink contract the engine notifies, plus a recording sink
//! - [`configuration`] — Player configuration sources and payload format
//! - [`ui`] — Terminal UI built with Ratatui
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod config;
pub mod configuration;
pub mod error;
pub mod game;
pub mod presentation;
pub mod ui;
