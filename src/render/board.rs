use crate::game::{Cell, GameView, Grid, Phase};
use crate::metrics::ElapsedTime;

/// Marks carried by one drawn cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellMarks {
    pub filled: bool,
    pub food: bool,
}

/// Terminal-side copy of everything the session publishes.
///
/// Holds one [`CellMarks`] per grid cell plus the HUD values, and is what the
/// [`Renderer`](super::Renderer) draws each frame.
#[derive(Debug, Clone)]
pub struct Board {
    grid: Grid,
    cells: Vec<CellMarks>,
    head: Option<Cell>,
    score: u32,
    high_score: u32,
    elapsed: ElapsedTime,
    phase: Phase,
}

impl Board {
    pub fn new() -> Self {
        Self {
            grid: Grid::default(),
            cells: Vec::new(),
            head: None,
            score: 0,
            high_score: 0,
            elapsed: ElapsedTime::new(),
            phase: Phase::Ready,
        }
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Marks for a cell; `None` outside the grid
    pub fn marks(&self, cell: Cell) -> Option<CellMarks> {
        self.index(cell).map(|i| self.cells[i])
    }

    pub fn head(&self) -> Option<Cell> {
        self.head
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn elapsed(&self) -> ElapsedTime {
        self.elapsed
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        if self.grid.contains(cell) {
            Some(cell.row as usize * self.grid.cols as usize + cell.col as usize)
        } else {
            None
        }
    }

    fn update(&mut self, cell: Cell, apply: impl FnOnce(&mut CellMarks)) {
        if let Some(i) = self.index(cell) {
            apply(&mut self.cells[i]);
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl GameView for Board {
    fn regenerate(&mut self, grid: Grid) {
        self.grid = grid;
        self.cells = vec![CellMarks::default(); grid.cell_count()];
        self.head = None;
    }

    fn draw_snake(&mut self, previous: &[Cell], current: &[Cell]) {
        for &cell in previous {
            self.update(cell, |marks| marks.filled = false);
        }
        for &cell in current {
            self.update(cell, |marks| marks.filled = true);
        }
        self.head = current.first().copied();
    }

    fn draw_food(&mut self, previous: Option<Cell>, current: Cell) {
        if let Some(cell) = previous {
            self.update(cell, |marks| marks.food = false);
        }
        self.update(current, |marks| marks.food = true);
    }

    fn show_score(&mut self, score: u32, high_score: u32) {
        self.score = score;
        self.high_score = high_score;
    }

    fn show_time(&mut self, elapsed: ElapsedTime) {
        self.elapsed = elapsed;
    }

    fn show_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regenerate_clears_marks() {
        let mut board = Board::new();
        board.regenerate(Grid::new(3, 4));
        board.draw_snake(&[], &[Cell::new(1, 1)]);
        board.draw_food(None, Cell::new(2, 2));

        board.regenerate(Grid::new(2, 2));
        assert_eq!(board.grid(), Grid::new(2, 2));
        assert_eq!(board.marks(Cell::new(1, 1)), Some(CellMarks::default()));
        assert_eq!(board.marks(Cell::new(2, 2)), None);
        assert_eq!(board.head(), None);
    }

    #[test]
    fn test_snake_marks_follow_moves() {
        let mut board = Board::new();
        board.regenerate(Grid::new(5, 5));

        board.draw_snake(&[], &[Cell::new(1, 3)]);
        board.draw_snake(&[Cell::new(1, 3)], &[Cell::new(1, 4), Cell::new(1, 3)]);
        board.draw_snake(
            &[Cell::new(1, 4), Cell::new(1, 3)],
            &[Cell::new(2, 4), Cell::new(1, 4)],
        );

        assert!(board.marks(Cell::new(2, 4)).unwrap().filled);
        assert!(board.marks(Cell::new(1, 4)).unwrap().filled);
        assert!(!board.marks(Cell::new(1, 3)).unwrap().filled);
        assert_eq!(board.head(), Some(Cell::new(2, 4)));
    }

    #[test]
    fn test_food_and_snake_can_share_a_cell() {
        let mut board = Board::new();
        board.regenerate(Grid::new(5, 5));
        board.draw_snake(&[], &[Cell::new(2, 2)]);
        board.draw_food(None, Cell::new(2, 2));

        let marks = board.marks(Cell::new(2, 2)).unwrap();
        assert!(marks.filled && marks.food);

        board.draw_food(Some(Cell::new(2, 2)), Cell::new(0, 0));
        assert!(!board.marks(Cell::new(2, 2)).unwrap().food);
        assert!(board.marks(Cell::new(0, 0)).unwrap().food);
    }

    #[test]
    fn test_off_grid_cells_ignored() {
        let mut board = Board::new();
        board.regenerate(Grid::new(0, 0));
        board.draw_snake(&[], &[Cell::new(1, 3)]);
        board.draw_food(None, Cell::new(0, 0));
        assert_eq!(board.marks(Cell::new(0, 0)), None);
    }
}
