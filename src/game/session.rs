use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::{
    action::Direction,
    config::GameConfig,
    engine::{self, StepOutcome},
    food,
    grid::Grid,
    state::{Cell, CollisionKind, GameState, Phase, Snake},
    view::GameView,
};
use crate::clock::{GameClock, Tick};
use crate::metrics::{ElapsedTime, ScoreTracker};
use crate::store::KeyValueStore;

/// What a movement tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The session was not running; nothing changed
    Idle,
    /// The snake moved one cell
    Moved { ate_food: bool },
    /// The snake collided and the game ended
    GameOver(CollisionKind),
}

/// Owns one game: its state, score, clock and high-score store.
///
/// All methods are synchronous; the caller drives the session by awaiting
/// [`Session::next_tick`] and feeding the result back into [`Session::tick`].
pub struct Session<S: KeyValueStore> {
    config: GameConfig,
    state: GameState,
    pending_direction: Option<Direction>,
    tracker: ScoreTracker,
    elapsed: ElapsedTime,
    clock: GameClock,
    store: S,
    rng: StdRng,
}

impl<S: KeyValueStore> Session<S> {
    /// Create a session waiting for its start command
    pub fn new(config: GameConfig, grid: Grid, store: S) -> Self {
        Self::with_rng(config, grid, store, StdRng::from_entropy())
    }

    /// Create a session with a deterministic food sequence
    pub fn with_seed(config: GameConfig, grid: Grid, store: S, seed: u64) -> Self {
        Self::with_rng(config, grid, store, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, grid: Grid, store: S, rng: StdRng) -> Self {
        let tracker = ScoreTracker::load(config.food_score, &store);
        let clock = GameClock::new(config.move_interval(), config.time_interval());
        let snake = Snake::new(config.start_cell);
        let state = GameState::new(snake, config.start_direction, Cell::new(0, 0), grid);

        let mut session = Self {
            config,
            state,
            pending_direction: None,
            tracker,
            elapsed: ElapsedTime::new(),
            clock,
            store,
            rng,
        };
        session.state.food = session.spawn_food();

        info!(
            "Session created on a {}x{} grid (high score {})",
            grid.rows,
            grid.cols,
            session.tracker.high_score()
        );
        session
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn grid(&self) -> Grid {
        self.state.grid
    }

    pub fn score(&self) -> u32 {
        self.tracker.score()
    }

    pub fn high_score(&self) -> u32 {
        self.tracker.high_score()
    }

    pub fn elapsed(&self) -> ElapsedTime {
        self.elapsed
    }

    pub fn clock(&self) -> &GameClock {
        &self.clock
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Send the whole current state to a view, e.g. right after attaching it
    pub fn publish_all<V: GameView + ?Sized>(&self, view: &mut V) {
        view.regenerate(self.state.grid);
        view.draw_snake(&[], self.state.snake.cells());
        view.draw_food(None, self.state.food);
        view.show_score(self.tracker.score(), self.tracker.high_score());
        view.show_time(self.elapsed);
        view.show_phase(self.state.phase);
    }

    /// Leave the start screen and arm both triggers. Ignored unless `Ready`.
    pub fn start<V: GameView + ?Sized>(&mut self, view: &mut V) -> bool {
        if self.state.phase != Phase::Ready {
            return false;
        }

        self.state.phase = Phase::Running;
        self.clock.start();
        view.show_phase(Phase::Running);
        info!("Game started");
        true
    }

    /// Start a fresh game from any phase. The high score is kept.
    pub fn restart<V: GameView + ?Sized>(&mut self, view: &mut V) {
        self.clock.stop();

        let previous_snake = self.state.snake.clone();
        let previous_food = self.state.food;

        self.tracker.reset();
        self.elapsed.reset();
        self.pending_direction = None;
        self.state.snake = Snake::new(self.config.start_cell);
        self.state.direction = self.config.start_direction;
        self.state.steps = 0;
        self.state.food = self.spawn_food();
        self.state.phase = Phase::Running;

        view.draw_snake(previous_snake.cells(), self.state.snake.cells());
        view.draw_food(Some(previous_food), self.state.food);
        view.show_score(self.tracker.score(), self.tracker.high_score());
        view.show_time(self.elapsed);
        view.show_phase(Phase::Running);

        self.clock.start();
        info!("Game restarted");
    }

    /// Queue a direction for the next movement tick. Last write wins.
    pub fn set_direction(&mut self, direction: Direction) {
        self.pending_direction = Some(direction);
    }

    /// Wait for the next trigger firing
    pub async fn next_tick(&mut self) -> Tick {
        self.clock.next_tick().await
    }

    /// Handle a trigger firing
    pub fn tick<V: GameView + ?Sized>(&mut self, tick: Tick, view: &mut V) -> Option<TickOutcome> {
        match tick {
            Tick::Move => Some(self.on_move_tick(view)),
            Tick::Time => {
                self.on_time_tick(view);
                None
            }
        }
    }

    /// Advance the snake one cell
    pub fn on_move_tick<V: GameView + ?Sized>(&mut self, view: &mut V) -> TickOutcome {
        // A firing queued before a stop must not move the snake
        if !self.state.is_running() {
            return TickOutcome::Idle;
        }

        let direction = engine::resolve_direction(
            self.state.direction,
            self.pending_direction.take(),
            &self.config.rules,
        );
        self.state.direction = direction;

        let StepOutcome {
            snake,
            ate_food,
            collision,
        } = engine::step(
            &self.state.snake,
            direction,
            self.state.grid,
            self.state.food,
            &self.config.rules,
        );

        if let Some(kind) = collision {
            self.clock.stop();
            self.state.phase = Phase::GameOver;
            view.show_phase(Phase::GameOver);
            info!(
                "Game over ({:?}) at {} after {} steps, score {}",
                kind,
                self.state.snake.head(),
                self.state.steps,
                self.tracker.score()
            );
            return TickOutcome::GameOver(kind);
        }

        let previous = std::mem::replace(&mut self.state.snake, snake);
        self.state.steps += 1;

        if ate_food {
            let eaten = self.state.food;
            self.state.food = self.spawn_food();
            self.tracker.record_food(&mut self.store);
            debug!("Ate food at {}, next food at {}", eaten, self.state.food);
            view.draw_food(Some(eaten), self.state.food);
            view.show_score(self.tracker.score(), self.tracker.high_score());
        }

        view.draw_snake(previous.cells(), self.state.snake.cells());
        TickOutcome::Moved { ate_food }
    }

    /// Count one second of play
    pub fn on_time_tick<V: GameView + ?Sized>(&mut self, view: &mut V) {
        if !self.state.is_running() {
            return;
        }

        self.elapsed.tick();
        view.show_time(self.elapsed);
    }

    /// Rebuild the grid for a new viewport size.
    ///
    /// Food is re-placed and the view regenerated. A running game also
    /// advances one step straight away.
    pub fn resize<V: GameView + ?Sized>(
        &mut self,
        viewport_width: u32,
        viewport_height: u32,
        view: &mut V,
    ) -> Option<TickOutcome> {
        let grid = Grid::compute_dimensions(viewport_width, viewport_height, self.config.cell_size);
        info!(
            "Viewport resized to {}x{}, grid is now {}x{}",
            viewport_width, viewport_height, grid.rows, grid.cols
        );

        self.state.grid = grid;
        self.state.food = self.spawn_food();
        self.publish_all(view);

        if self.state.is_running() {
            Some(self.on_move_tick(view))
        } else {
            None
        }
    }

    fn spawn_food(&mut self) -> Cell {
        let grid = self.state.grid;
        if self.config.rules.food_avoids_snake {
            food::place_food_avoiding(&mut self.rng, grid, &self.state.snake)
        } else {
            food::place_food(&mut self.rng, grid.rows, grid.cols)
        }
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}
