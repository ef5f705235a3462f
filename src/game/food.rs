use rand::Rng;
use rand::seq::IteratorRandom;

use super::grid::{Grid, MAX_DIMENSION};
use super::state::{Cell, Snake};

/// Pick a uniformly random cell in `[0, rows) x [0, cols)`.
///
/// A zero dimension yields coordinate 0 on that axis, so a degenerate grid
/// still gets a (necessarily off-grid) food cell instead of a panic.
pub fn place_food<R: Rng + ?Sized>(rng: &mut R, rows: u32, cols: u32) -> Cell {
    Cell::new(draw(rng, rows), draw(rng, cols))
}

fn draw<R: Rng + ?Sized>(rng: &mut R, bound: u32) -> i32 {
    let bound = bound.min(MAX_DIMENSION);
    if bound == 0 {
        return 0;
    }
    i32::try_from(rng.gen_range(0..bound)).unwrap_or(i32::MAX - 1)
}

/// Coordinates `0..len` along one axis
fn axis(len: u32) -> std::ops::Range<i32> {
    0..i32::try_from(len).unwrap_or(i32::MAX)
}

/// Pick a random cell not occupied by the snake, falling back to
/// [`place_food`] when the snake covers the whole grid.
pub fn place_food_avoiding<R: Rng + ?Sized>(rng: &mut R, grid: Grid, snake: &Snake) -> Cell {
    let free = axis(grid.rows)
        .flat_map(|row| axis(grid.cols).map(move |col| Cell::new(row, col)))
        .filter(|cell| !snake.occupies(*cell));

    match free.choose(rng) {
        Some(cell) => cell,
        None => place_food(rng, grid.rows, grid.cols),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_degenerate_grid() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(place_food(&mut rng, 0, 0), Cell::new(0, 0));

        let cell = place_food(&mut rng, 0, 5);
        assert_eq!(cell.row, 0);
        assert!((0..5).contains(&cell.col));
    }

    #[test]
    fn test_avoiding_picks_only_free_cell() {
        let mut rng = StdRng::seed_from_u64(1);
        let grid = Grid::new(1, 3);
        let snake = Snake::from_cells(vec![Cell::new(0, 0), Cell::new(0, 2)]).unwrap();

        for _ in 0..20 {
            assert_eq!(place_food_avoiding(&mut rng, grid, &snake), Cell::new(0, 1));
        }
    }

    #[test]
    fn test_avoiding_full_grid_falls_back() {
        let mut rng = StdRng::seed_from_u64(1);
        let grid = Grid::new(1, 2);
        let snake = Snake::from_cells(vec![Cell::new(0, 0), Cell::new(0, 1)]).unwrap();

        let cell = place_food_avoiding(&mut rng, grid, &snake);
        assert!(grid.contains(cell));
    }

    #[test]
    fn test_covers_whole_grid() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(place_food(&mut rng, 3, 4));
        }
        assert_eq!(seen.len(), 12);
    }

    #[test]
    fn test_huge_bounds_stay_non_negative() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let cell = place_food(&mut rng, u32::MAX, u32::MAX);
            assert!(cell.row >= 0 && cell.col >= 0);
            assert!(Grid::new(u32::MAX, u32::MAX).contains(cell));
        }
    }

    proptest! {
        #[test]
        fn food_is_always_in_bounds(rows in 1u32..200, cols in 1u32..200, seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            let cell = place_food(&mut rng, rows, cols);
            prop_assert!(Grid::new(rows, cols).contains(cell));
        }
    }
}
