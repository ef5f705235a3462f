//! Grid Snake - a grid-based snake game
//!
//! This library provides:
//! - Core game logic: grid sizing, movement, food, collisions (game module)
//! - Movement and elapsed-time triggers (clock module)
//! - Score and timer bookkeeping (metrics module)
//! - High-score persistence (store module)
//! - TUI rendering and input (render, input and modes modules)

pub mod clock;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod store;
