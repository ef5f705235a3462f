pub mod board;
pub mod renderer;

pub use board::{Board, CellMarks};
pub use renderer::Renderer;
