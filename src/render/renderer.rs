use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use super::board::Board;
use crate::game::{Cell, Phase};

const HEADER_HEIGHT: u16 = 3;
const FOOTER_HEIGHT: u16 = 3;

/// Draws a [`Board`] with each grid cell spanning `cell_columns` x
/// `cell_rows` terminal characters
pub struct Renderer {
    cell_columns: u16,
    cell_rows: u16,
}

impl Renderer {
    /// Two columns by one row per cell
    pub fn new() -> Self {
        Self::with_footprint((2, 1))
    }

    pub fn with_footprint((cell_columns, cell_rows): (u16, u16)) -> Self {
        Self {
            cell_columns: cell_columns.max(1),
            cell_rows: cell_rows.max(1),
        }
    }

    fn split(area: Rect) -> [Rect; 3] {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT), // Header
                Constraint::Min(0),                // Game area
                Constraint::Length(FOOTER_HEIGHT), // Footer
            ])
            .split(area);
        [chunks[0], chunks[1], chunks[2]]
    }

    /// The area inside the board border, i.e. the terminal viewport the
    /// grid is sized from
    pub fn board_area(area: Rect) -> Rect {
        let [_, game_area, _] = Self::split(area);
        Block::default().borders(Borders::ALL).inner(game_area)
    }

    pub fn render(&self, frame: &mut Frame, board: &Board) {
        let [header, game_area, footer] = Self::split(frame.area());

        frame.render_widget(self.render_stats(board), header);
        frame.render_widget(self.render_grid(board), game_area);

        match board.phase() {
            Phase::Ready => {
                let popup = centered(game_area, 36, 7);
                frame.render_widget(Clear, popup);
                frame.render_widget(self.render_start(board), popup);
            }
            Phase::GameOver => {
                let popup = centered(game_area, 36, 8);
                frame.render_widget(Clear, popup);
                frame.render_widget(self.render_game_over(board), popup);
            }
            Phase::Running => {}
        }

        frame.render_widget(self.render_controls(), footer);
    }

    fn render_grid(&self, board: &Board) -> Paragraph<'_> {
        let grid = board.grid();
        let rows = i32::try_from(grid.rows).unwrap_or(i32::MAX);
        let cols = i32::try_from(grid.cols).unwrap_or(i32::MAX);
        let mut lines = Vec::with_capacity(grid.rows as usize * usize::from(self.cell_rows));

        for row in 0..rows {
            let mut spans = Vec::with_capacity(grid.cols as usize);

            for col in 0..cols {
                let cell = Cell::new(row, col);
                let marks = board.marks(cell).unwrap_or_default();

                let (glyph, style) = if board.head() == Some(cell) {
                    // Snake head - distinct color
                    (
                        '■',
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if marks.filled {
                    ('□', Style::default().fg(Color::Green))
                } else if marks.food {
                    (
                        'O',
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    ('.', Style::default().fg(Color::DarkGray))
                };

                spans.push(Span::styled(self.cell_text(glyph), style));
            }

            let line = Line::from(spans);
            for _ in 1..self.cell_rows {
                lines.push(line.clone());
            }
            lines.push(line);
        }

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(" Snake "),
        )
    }

    /// The glyph padded with spaces to the cell width
    fn cell_text(&self, glyph: char) -> String {
        let mut text = String::with_capacity(usize::from(self.cell_columns) + 2);
        text.push(glyph);
        for _ in 1..self.cell_columns {
            text.push(' ');
        }
        text
    }

    fn render_stats(&self, board: &Board) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                board.score().to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("High Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                board.high_score().to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(board.elapsed().to_string(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::BOTTOM))
    }

    fn render_start(&self, board: &Board) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "SNAKE",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )]),
            Line::from(format!("High Score: {}", board.high_score())),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Enter",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to start", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        )
    }

    fn render_game_over(&self, board: &Board) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    board.score().to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(format!("Time: {}", board.elapsed())),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::TOP))
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// A `width` x `height` rectangle centred in `area`, clamped to fit
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameView, Grid};
    use ratatui::{Terminal, backend::TestBackend};

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_board_area_excludes_chrome() {
        let area = Rect::new(0, 0, 80, 24);
        let inner = Renderer::board_area(area);
        assert_eq!(inner, Rect::new(1, 4, 78, 16));
    }

    #[test]
    fn test_centered_clamps() {
        let area = Rect::new(0, 0, 10, 4);
        assert_eq!(centered(area, 36, 8), area);
        assert_eq!(centered(Rect::new(0, 0, 40, 10), 20, 4), Rect::new(10, 3, 20, 4));
    }

    #[test]
    fn test_render_running_board() {
        let mut board = Board::new();
        board.regenerate(Grid::new(4, 10));
        board.draw_snake(&[], &[Cell::new(1, 3), Cell::new(1, 2)]);
        board.draw_food(None, Cell::new(2, 5));
        board.show_score(30, 90);
        board.show_phase(Phase::Running);

        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        let renderer = Renderer::new();
        terminal.draw(|frame| renderer.render(frame, &board)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Score: 30"));
        assert!(text.contains("High Score: 90"));
        assert!(text.contains("Time: 00:00"));
        assert!(text.contains("■"));
        assert!(text.contains("□"));
        assert!(text.contains("O"));
        assert!(!text.contains("GAME OVER"));
    }

    #[test]
    fn test_wide_cells_fill_footprint() {
        let mut board = Board::new();
        board.regenerate(Grid::new(2, 3));
        board.draw_snake(&[], &[Cell::new(0, 0)]);
        board.show_phase(Phase::Running);

        let renderer = Renderer::with_footprint((4, 2));
        assert_eq!(renderer.cell_text('O'), "O   ");

        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        terminal.draw(|frame| renderer.render(frame, &board)).unwrap();

        let text = screen_text(&terminal);
        let rows: Vec<&str> = text.lines().collect();
        // Board content starts inside the border, below the 3-row header
        assert!(rows[4].starts_with("║■   .   .   "));
        assert!(rows[5].starts_with("║■   .   .   "));
        assert!(rows[6].starts_with("║.   .   .   "));
    }

    #[test]
    fn test_render_game_over() {
        let mut board = Board::new();
        board.regenerate(Grid::new(8, 19));
        board.show_phase(Phase::GameOver);

        let mut terminal = Terminal::new(TestBackend::new(40, 16)).unwrap();
        let renderer = Renderer::new();
        terminal.draw(|frame| renderer.render(frame, &board)).unwrap();

        assert!(screen_text(&terminal).contains("GAME OVER"));
    }
}
