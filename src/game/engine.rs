use super::{
    action::Direction,
    config::Rules,
    grid::Grid,
    state::{Cell, CollisionKind, Snake},
};

/// Result of a single movement step
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    /// The snake after the step; unchanged when a collision occurred
    pub snake: Snake,
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision: Option<CollisionKind>,
}

impl StepOutcome {
    pub fn collided(&self) -> bool {
        self.collision.is_some()
    }
}

/// Advance the snake one cell in `direction`.
///
/// A head that leaves the grid collides and the snake is returned unchanged.
/// A head landing on food grows the snake by one; otherwise the tail is
/// dropped and the length stays the same.
pub fn step(
    snake: &Snake,
    direction: Direction,
    grid: Grid,
    food: Cell,
    rules: &Rules,
) -> StepOutcome {
    let new_head = snake.head().offset(direction);
    let ate_food = new_head == food;

    if let Some(collision) = check_collision(snake, grid, new_head, ate_food, rules) {
        return StepOutcome {
            snake: snake.clone(),
            ate_food: false,
            collision: Some(collision),
        };
    }

    let mut next = snake.clone();
    next.advance(new_head, ate_food);

    StepOutcome {
        snake: next,
        ate_food,
        collision: None,
    }
}

/// Check if the new head position causes a collision
fn check_collision(
    snake: &Snake,
    grid: Grid,
    head: Cell,
    grows: bool,
    rules: &Rules,
) -> Option<CollisionKind> {
    if !grid.contains(head) {
        return Some(CollisionKind::Wall);
    }

    // Unless growing, the tail moves out of the way this tick
    if rules.self_collision {
        let body = snake.body_segments();
        let obstacles = if grows {
            body
        } else {
            &body[..body.len().saturating_sub(1)]
        };
        if obstacles.contains(&head) {
            return Some(CollisionKind::SelfCollision);
        }
    }

    None
}

/// The direction to apply this tick given the last applied one and the
/// pending input, if any.
pub fn resolve_direction(
    current: Direction,
    pending: Option<Direction>,
    rules: &Rules,
) -> Direction {
    match pending {
        Some(next) if rules.block_reversal && current.is_opposite(next) => current,
        Some(next) => next,
        None => current,
    }
}
