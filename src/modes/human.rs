use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::{debug, info};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;

use crate::game::{GameConfig, Grid, Session};
use crate::input::{InputHandler, KeyAction};
use crate::render::{Board, Renderer};
use crate::store::KeyValueStore;

pub struct HumanMode<S: KeyValueStore> {
    session: Session<S>,
    board: Board,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl<S: KeyValueStore> HumanMode<S> {
    /// The grid stays empty until the terminal size is known
    pub fn new(config: GameConfig, store: S) -> Self {
        let renderer = Renderer::with_footprint(config.cell_footprint());
        let session = Session::new(config, Grid::default(), store);
        let mut board = Board::new();
        session.publish_all(&mut board);

        Self {
            session,
            board,
            renderer,
            input_handler: InputHandler::new(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let size = terminal.size().context("Failed to read terminal size")?;
        self.resize_to(size.width, size.height);

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => {
                            return Err(err).context("Failed to read terminal event");
                        }
                        None => self.should_quit = true,
                    }
                }

                // Movement and elapsed-time triggers
                tick = self.session.next_tick() => {
                    self.session.tick(tick, &mut self.board);
                }

                // Render frame
                _ = render_timer.tick() => {
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.board);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                info!(
                    "Quitting with score {} (high score {})",
                    self.session.score(),
                    self.session.high_score()
                );
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => {
                // Only process key press events, not release
                if key.kind != KeyEventKind::Press {
                    return;
                }

                match self.input_handler.handle_key_event(key) {
                    KeyAction::Move(direction) => self.session.set_direction(direction),
                    KeyAction::Start => {
                        self.session.start(&mut self.board);
                    }
                    KeyAction::Restart => self.session.restart(&mut self.board),
                    KeyAction::Quit => self.should_quit = true,
                    KeyAction::None => {}
                }
            }
            Event::Resize(columns, rows) => self.resize_to(columns, rows),
            _ => {}
        }
    }

    /// Regenerate the grid for a terminal of `columns` x `rows`
    fn resize_to(&mut self, columns: u16, rows: u16) {
        let inner = Renderer::board_area(Rect::new(0, 0, columns, rows));
        let (width, height) = self
            .session
            .config()
            .viewport_for_terminal(inner.width, inner.height);
        debug!(
            "Terminal {}x{} gives a {}x{} board area",
            columns, rows, inner.width, inner.height
        );
        self.session.resize(width, height, &mut self.board);
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, Phase};
    use crate::store::MemoryStore;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventState, KeyModifiers};

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn release(code: KeyCode) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        })
    }

    fn sized_mode() -> HumanMode<MemoryStore> {
        let mut mode = HumanMode::new(GameConfig::default(), MemoryStore::new());
        mode.handle_event(Event::Resize(80, 24));
        mode
    }

    #[test]
    fn test_game_initialization() {
        let mode = HumanMode::new(GameConfig::default(), MemoryStore::new());
        assert_eq!(mode.session.phase(), Phase::Ready);
        assert_eq!(mode.session.grid(), Grid::default());
        assert_eq!(mode.board.phase(), Phase::Ready);
    }

    #[test]
    fn test_resize_event_regenerates_grid() {
        let mode = sized_mode();
        // 78x16 board area -> 1950x800 units -> 16 rows of 39 cells
        assert_eq!(mode.session.grid(), Grid::new(16, 39));
        assert_eq!(mode.board.grid(), Grid::new(16, 39));
        assert!(mode.board.marks(Cell::new(1, 3)).unwrap().filled);
    }

    #[test]
    fn test_grid_fits_board_for_any_cell_size() {
        for cell_size in [10, 25, 50, 60, 100, 175] {
            let config = GameConfig {
                cell_size,
                ..GameConfig::default()
            };
            let (cell_columns, cell_rows) = config.cell_footprint();
            let mut mode = HumanMode::new(config, MemoryStore::new());
            mode.handle_event(Event::Resize(80, 24));

            let inner = Renderer::board_area(Rect::new(0, 0, 80, 24));
            let grid = mode.session.grid();
            assert!(grid.cols * u32::from(cell_columns) <= u32::from(inner.width));
            assert!(grid.rows * u32::from(cell_rows) <= u32::from(inner.height));
        }
    }

    #[test]
    fn test_small_cells_use_whole_board() {
        let config = GameConfig {
            cell_size: 25,
            ..GameConfig::default()
        };
        let mut mode = HumanMode::new(config, MemoryStore::new());
        mode.handle_event(Event::Resize(80, 24));
        assert_eq!(mode.session.grid(), Grid::new(16, 78));
    }

    #[test]
    fn test_start_and_direction_keys() {
        let mut mode = sized_mode();

        mode.handle_event(press(KeyCode::Enter));
        assert_eq!(mode.session.phase(), Phase::Running);
        assert_eq!(mode.board.phase(), Phase::Running);

        mode.handle_event(press(KeyCode::Down));
        assert_eq!(
            mode.session.pending_direction(),
            Some(crate::game::Direction::Down)
        );

        mode.handle_event(release(KeyCode::Up));
        assert_eq!(
            mode.session.pending_direction(),
            Some(crate::game::Direction::Down)
        );
    }

    #[test]
    fn test_game_restart() {
        let mut mode = sized_mode();
        mode.handle_event(press(KeyCode::Char('r')));
        assert_eq!(mode.session.phase(), Phase::Running);
        assert_eq!(mode.session.score(), 0);
        assert!(mode.session.clock().is_running());
    }

    #[test]
    fn test_quit_key() {
        let mut mode = sized_mode();
        mode.handle_event(press(KeyCode::Char('q')));
        assert!(mode.should_quit);
    }
}
