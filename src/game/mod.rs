//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The terminal front end drives it through [`Session`] and observes it through [`GameView`].

pub mod action;
pub mod config;
pub mod engine;
pub mod food;
pub mod grid;
pub mod session;
pub mod state;
pub mod view;

// Re-export commonly used types
pub use action::Direction;
pub use config::{GameConfig, Rules};
pub use engine::{StepOutcome, step};
pub use food::place_food;
pub use grid::Grid;
pub use session::{Session, TickOutcome};
pub use state::{Cell, CollisionKind, GameState, Phase, Snake};
pub use view::GameView;
