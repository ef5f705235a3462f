use super::state::Cell;

/// Largest number of rows or columns; every in-grid coordinate fits a
/// [`Cell`] component
pub const MAX_DIMENSION: u32 = i32::MAX as u32;

/// Playable area measured in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Grid {
    pub rows: u32,
    pub cols: u32,
}

impl Grid {
    /// Dimensions above [`MAX_DIMENSION`] are clamped to it
    pub fn new(rows: u32, cols: u32) -> Self {
        Self {
            rows: rows.min(MAX_DIMENSION),
            cols: cols.min(MAX_DIMENSION),
        }
    }

    /// Derive grid dimensions from a viewport size.
    ///
    /// Each dimension is floor-divided by `cell_size`. A viewport smaller than
    /// one cell (or a zero cell size) gives an empty dimension; the next
    /// movement step then collides immediately.
    pub fn compute_dimensions(viewport_width: u32, viewport_height: u32, cell_size: u32) -> Self {
        if cell_size == 0 {
            return Self::default();
        }

        Self::new(viewport_height / cell_size, viewport_width / cell_size)
    }

    /// Check if a cell is within the grid bounds
    pub fn contains(&self, cell: Cell) -> bool {
        cell.row >= 0
            && i64::from(cell.row) < i64::from(self.rows)
            && cell.col >= 0
            && i64::from(cell.col) < i64::from(self.cols)
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    pub fn cell_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }
}
