use std::fmt;

use super::action::Direction;
use super::grid::Grid;
use serde::{Deserialize, Serialize};

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Move cell by delta
    pub fn moved_by(&self, d_row: i32, d_col: i32) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }

    /// The neighbouring cell in a direction
    pub fn offset(&self, direction: Direction) -> Self {
        let (d_row, d_col) = direction.delta();
        self.moved_by(d_row, d_col)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    /// Body segments, with head at index 0
    body: Vec<Cell>,
}

impl Snake {
    /// A one-segment snake
    pub fn new(head: Cell) -> Self {
        Self { body: vec![head] }
    }

    /// Build a snake from its segments, head first. Returns `None` for an
    /// empty body.
    pub fn from_cells(body: Vec<Cell>) -> Option<Self> {
        if body.is_empty() {
            None
        } else {
            Some(Self { body })
        }
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    pub fn cells(&self) -> &[Cell] {
        &self.body
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Cell] {
        &self.body[1..]
    }

    /// Check if a cell collides with the snake body (excluding head)
    pub fn collides_with_body(&self, cell: Cell) -> bool {
        self.body_segments().contains(&cell)
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Prepend a new head, dropping the tail unless growing
    pub fn advance(&mut self, new_head: Cell, grow: bool) {
        self.body.insert(0, new_head);

        if !grow {
            self.body.pop();
        }
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a snake keeps at least its head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Lifecycle phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the first start command
    Ready,
    Running,
    /// Terminal until an explicit restart
    GameOver,
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionKind {
    /// Head left the grid
    Wall,
    /// Head entered its own body (only with the self-collision rule)
    SelfCollision,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub direction: Direction,
    pub food: Cell,
    pub grid: Grid,
    pub phase: Phase,
    pub steps: u32,
}

impl GameState {
    pub fn new(snake: Snake, direction: Direction, food: Cell, grid: Grid) -> Self {
        Self {
            snake,
            direction,
            food,
            grid,
            phase: Phase::Ready,
            steps: 0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }
}
