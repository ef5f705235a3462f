use super::grid::Grid;
use super::state::{Cell, Phase};
use crate::metrics::ElapsedTime;

/// Rendering collaborator notified by a [`Session`](super::Session).
///
/// The session only ever talks to the display through this trait; how cells
/// are drawn is up to the implementor.
pub trait GameView {
    /// Discard all cell handles and allocate new ones for `grid`
    fn regenerate(&mut self, grid: Grid);

    /// Unmark `previous` snake cells and mark `current` ones as filled
    fn draw_snake(&mut self, previous: &[Cell], current: &[Cell]);

    /// Move the food marker
    fn draw_food(&mut self, previous: Option<Cell>, current: Cell);

    fn show_score(&mut self, score: u32, high_score: u32);

    fn show_time(&mut self, elapsed: ElapsedTime);

    /// Show the start screen, hide overlays, or show the game-over surface
    fn show_phase(&mut self, phase: Phase);
}
