use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::game::config::CELL_WIDTH;
use crate::game::{GameSnapshot, Position};
use crate::metrics::GameMetrics;
use crate::score::HighScore;

const OVERLAY_WIDTH: u16 = 28;
const OVERLAY_HEIGHT: u16 = 8;

/// Draws published snapshots; never touches game state
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        snapshot: &GameSnapshot,
        high_score: HighScore,
        metrics: &GameMetrics,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(snapshot, high_score, metrics);
        frame.render_widget(stats, chunks[0]);

        let game_area = Self::grid_area(chunks[1], snapshot);
        frame.render_widget(self.render_grid(snapshot), game_area);

        // The board stays visible under the overlay
        if snapshot.is_over {
            let popup = Self::centered(chunks[1], OVERLAY_WIDTH, OVERLAY_HEIGHT);
            frame.render_widget(Clear, popup);
            frame.render_widget(self.render_game_over(snapshot, high_score), popup);
        }

        let controls = self.render_controls();
        frame.render_widget(controls, chunks[2]);
    }

    /// Bordered rectangle exactly fitting the grid, centered in `area`
    fn grid_area(area: Rect, snapshot: &GameSnapshot) -> Rect {
        let width = snapshot.grid_width as u16 * CELL_WIDTH + 2;
        let height = snapshot.grid_height as u16 + 2;
        Self::centered(area, width, height)
    }

    fn centered(area: Rect, width: u16, height: u16) -> Rect {
        let [row] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(area);
        let [cell] = Layout::horizontal([Constraint::Length(width)])
            .flex(Flex::Center)
            .areas(row);
        cell
    }

    fn cell(glyph: char, style: Style) -> Span<'static> {
        let mut text = glyph.to_string();
        text.extend(std::iter::repeat_n(' ', CELL_WIDTH.saturating_sub(1) as usize));
        Span::styled(text, style)
    }

    fn render_grid(&self, snapshot: &GameSnapshot) -> Paragraph<'static> {
        let head = snapshot.head();
        let mut lines = Vec::with_capacity(snapshot.grid_height);

        for y in 0..snapshot.grid_height {
            let mut spans = Vec::with_capacity(snapshot.grid_width);

            for x in 0..snapshot.grid_width {
                let pos = Position::new(x as i32, y as i32);

                let cell = if pos == head {
                    Self::cell(
                        '■',
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if snapshot.occupies(pos) {
                    Self::cell('□', Style::default().fg(Color::Green))
                } else if pos == snapshot.food {
                    Self::cell(
                        '●',
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Self::cell('·', Style::default().fg(Color::DarkGray))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::White))
                .title(" Snake Pro "),
        )
    }

    fn render_stats(
        &self,
        snapshot: &GameSnapshot,
        high_score: HighScore,
        metrics: &GameMetrics,
    ) -> Paragraph<'static> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(snapshot.score.to_string(), value),
            Span::raw("    "),
            Span::styled("High Score: ", label),
            Span::styled(high_score.best.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Games: ", label),
            Span::styled(
                metrics.games_played.to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Last: ", label),
            Span::styled(
                metrics
                    .last_score
                    .map_or_else(|| "-".to_string(), |score| score.to_string()),
                Style::default().fg(Color::White),
            ),
        ])];

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::BOTTOM))
    }

    fn render_game_over(
        &self,
        snapshot: &GameSnapshot,
        high_score: HighScore,
    ) -> Paragraph<'static> {
        let mut text = vec![
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    snapshot.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
        ];

        if high_score.beaten_this_game {
            text.push(Line::from(Span::styled(
                "New high score!",
                Style::default().fg(Color::Green),
            )));
        } else {
            text.push(Line::from(""));
        }

        text.push(Line::from(vec![
            Span::styled("R", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::styled(" play again  ", Style::default().fg(Color::Gray)),
            Span::styled("Q", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::styled(" quit", Style::default().fg(Color::Gray)),
        ]));

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" restart | "),
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
