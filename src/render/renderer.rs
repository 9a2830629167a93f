use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::game::{Cell, GameState, Outcome};
use crate::metrics::SessionMetrics;
use crate::modes::Phase;

const HEADER_HEIGHT: u16 = 3;
const FOOTER_HEIGHT: u16 = 3;
/// Terminal columns per grid cell
const CELL_WIDTH: u16 = 2;
/// Rows or columns taken by the grid border, both sides
const BORDER: u16 = 2;

/// Largest grid (rows, cols) that fits a terminal of the given size, at least 1x1
pub fn grid_for_viewport(width: u16, height: u16) -> (i32, i32) {
    let rows = height
        .saturating_sub(HEADER_HEIGHT + FOOTER_HEIGHT + BORDER)
        .max(1);
    let cols = (width.saturating_sub(BORDER) / CELL_WIDTH).max(1);
    (rows as i32, cols as i32)
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        state: &GameState,
        metrics: &SessionMetrics,
        phase: Phase,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(state, metrics), chunks[0]);

        let board = centered(
            chunks[1],
            u16::try_from(state.cols)
                .unwrap_or(u16::MAX)
                .saturating_mul(CELL_WIDTH)
                .saturating_add(BORDER),
            u16::try_from(state.rows)
                .unwrap_or(u16::MAX)
                .saturating_add(BORDER),
        );
        frame.render_widget(self.render_grid(state), board);

        match phase {
            Phase::Ready => self.render_overlay(frame, board, self.render_start()),
            Phase::Over => self.render_overlay(frame, board, self.render_game_over(state, metrics)),
            Phase::Running => {}
        }

        frame.render_widget(self.render_controls(phase), chunks[2]);
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'_> {
        let head = state.snake.head();
        let mut lines = Vec::with_capacity(state.rows);

        for row in 0..state.rows {
            let mut spans = Vec::with_capacity(state.cols);

            for col in 0..state.cols {
                let cell = Cell::new(row as i32, col as i32);

                let span = if cell == head {
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if state.snake.contains(cell) {
                    Span::styled("□ ", Style::default().fg(Color::Green))
                } else if state.food == Some(cell) {
                    Span::styled(
                        "● ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(span);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(" Snake "),
        )
    }

    fn render_stats(&self, state: &GameState, metrics: &SessionMetrics) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(state.score.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("High Score: ", label),
            Span::styled(metrics.high_score.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(state.format_elapsed(), value),
        ])];

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::BOTTOM))
    }

    fn render_start(&self) -> Paragraph<'static> {
        let text = vec![
            Line::from(Span::styled(
                "SNAKE",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
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

    fn render_game_over(&self, state: &GameState, metrics: &SessionMetrics) -> Paragraph<'static> {
        let (title, color) = match state.outcome {
            Some(Outcome::BoardFilled) => ("BOARD CLEARED", Color::Green),
            _ => ("GAME OVER", Color::Red),
        };

        let text = vec![
            Line::from(Span::styled(
                title,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("High Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(metrics.high_score.to_string(), Style::default().fg(Color::White)),
            ]),
            Line::from(""),
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
                .border_style(Style::default().fg(color)),
        )
    }

    fn render_overlay(&self, frame: &mut Frame, board: Rect, content: Paragraph<'_>) {
        let area = centered(board, 36, 8);
        frame.render_widget(Clear, area);
        frame.render_widget(content, area);
    }

    fn render_controls(&self, phase: Phase) -> Paragraph<'_> {
        let key = Style::default().fg(Color::Cyan);
        let mut spans = vec![
            Span::styled("↑↓←→", key),
            Span::raw(" or "),
            Span::styled("WASD", key),
            Span::raw(" to move | "),
        ];
        if phase == Phase::Ready {
            spans.push(Span::styled("Enter", key));
            spans.push(Span::raw(" to start | "));
        } else {
            spans.push(Span::styled("R", key));
            spans.push(Span::raw(" to restart | "));
        }
        spans.push(Span::styled("Q", Style::default().fg(Color::Red)));
        spans.push(Span::raw(" to quit"));

        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::TOP))
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// A width x height rect centred in area, shrunk to fit
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
