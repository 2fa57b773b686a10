//! Terminal UI rendering with ratatui

use crate::board::{Cell, BOARD_HEIGHT, BOARD_WIDTH};
use crate::game::{GameState, Snapshot};
use crate::piece::{Piece, Pos};
use crate::settings::Settings;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const EMPTY: &str = "  ";

/// Total width needed: board(22) + next/stats(16) = 38
const GAME_WIDTH: u16 = 38;
/// Board(20) + 2 for borders
const GAME_HEIGHT: u16 = 22;

/// Render the entire game UI
pub fn render_game(frame: &mut Frame, snapshot: &Snapshot, settings: &Settings) {
    let area = frame.area();
    let (block_char, empty_char) = settings.visual.block_chars();

    // Center the game area
    let game_area = center_rect(area, GAME_WIDTH, GAME_HEIGHT);

    // Create main layout: board | next + stats
    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(22), // Board (10*2 + 2 for borders)
            Constraint::Length(16), // Next piece + stats
        ])
        .split(game_area);

    render_board(frame, main_layout[0], snapshot, block_char, empty_char);

    let right_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Next piece
            Constraint::Min(6),    // Stats
        ])
        .split(main_layout[1]);

    render_next(frame, right_layout[0], &snapshot.next, block_char);
    render_stats(frame, right_layout[1], snapshot);

    // Overlays
    match snapshot.state {
        GameState::Ready => render_overlay(frame, area, "BLOCKFALL", "Press S to start"),
        GameState::Pausing => render_overlay(frame, area, "PAUSED", "Press C to resume"),
        GameState::Over => render_overlay(frame, area, "GAME OVER", "Press S to restart"),
        GameState::Running => {}
    }
}

/// Center a rect within another rect
fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Render the next piece preview, trimmed to its bounding box
fn render_next(frame: &mut Frame, area: Rect, next: &Piece, block_char: &str) {
    let block = Block::default()
        .title(" NEXT ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let color = next.kind().color();
    let cells = next.cells();
    let min_row = cells.iter().map(|c| c.row).min().unwrap_or(0);
    let max_row = cells.iter().map(|c| c.row).max().unwrap_or(0);
    let min_col = cells.iter().map(|c| c.col).min().unwrap_or(0);
    let max_col = cells.iter().map(|c| c.col).max().unwrap_or(0);

    let lines: Vec<Line> = (min_row..=max_row)
        .map(|row| {
            let spans: Vec<Span> = (min_col..=max_col)
                .map(|col| {
                    if cells.contains(&Pos::new(row, col)) {
                        Span::styled(block_char, Style::default().fg(color))
                    } else {
                        Span::raw(EMPTY)
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}

/// Render the game board with the falling piece on top.
/// Cells above row 0 are not drawn.
fn render_board(frame: &mut Frame, area: Rect, snapshot: &Snapshot, block_char: &str, empty_char: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let falling = snapshot.current.cells();
    let falling_color = snapshot.current.kind().color();

    let mut lines: Vec<Line> = Vec::with_capacity(BOARD_HEIGHT);
    for (row, cells) in snapshot.board.rows().enumerate() {
        let mut spans = Vec::with_capacity(BOARD_WIDTH);
        for (col, cell) in cells.iter().enumerate() {
            let pos = Pos::new(row as i32, col as i32);
            let span = if falling.contains(&pos) {
                Span::styled(block_char, Style::default().fg(falling_color))
            } else {
                match cell {
                    Cell::Filled(kind) => Span::styled(block_char, Style::default().fg(kind.color())),
                    Cell::Empty => Span::styled(empty_char, Style::default().fg(Color::DarkGray)),
                }
            };
            spans.push(span);
        }
        lines.push(Line::from(spans));
    }

    let paragraph = Paragraph::new(lines);
    frame.render_widget(paragraph, inner);
}

/// Render stats panel
fn render_stats(frame: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![
        Line::from(Span::styled("SCORE", Style::default().fg(Color::Gray))),
        Line::from(Span::styled(
            format!("{}", snapshot.score.points),
            Style::default().fg(Color::Yellow).bold(),
        )),
        Line::raw(""),
        Line::from(Span::styled("LINES", Style::default().fg(Color::Gray))),
        Line::from(Span::styled(
            format!("{}", snapshot.score.lines),
            Style::default().fg(Color::Green),
        )),
    ];

    // Show the last clear, if it scored
    if let Some(lock) = snapshot.last_lock.filter(|l| l.lines_cleared > 0) {
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            format!("+{} ({}L)", lock.points, lock.lines_cleared),
            Style::default().fg(Color::Magenta).bold(),
        ));
    }

    let paragraph = Paragraph::new(lines);
    frame.render_widget(paragraph, inner);
}

/// Render an overlay (for ready/pause/game over)
fn render_overlay(frame: &mut Frame, area: Rect, title: &str, subtitle: &str) {
    let popup_width = 24u16;
    let popup_height = 5u16;
    let popup_area = center_rect(area, popup_width, popup_height);

    // Clear the background
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let text = vec![
        Line::styled(title, Style::default().fg(Color::Yellow).bold()),
        Line::raw(""),
        Line::styled(subtitle, Style::default().fg(Color::Gray)),
    ];

    let paragraph = Paragraph::new(text).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Game;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(snapshot: &Snapshot) -> String {
        let backend = TestBackend::new(60, 26);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render_game(frame, snapshot, &Settings::default()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_ready_overlay() {
        let snapshot = Game::with_seed(1).snapshot();
        let screen = draw(&snapshot);
        assert!(screen.contains("Press S to start"));
        assert!(screen.contains("NEXT"));
    }

    #[test]
    fn test_running_shows_score() {
        let mut game = Game::with_seed(1);
        game.start();
        let screen = draw(&game.snapshot());
        assert!(screen.contains("SCORE"));
        assert!(!screen.contains("PAUSED"));
    }

    #[test]
    fn test_paused_overlay() {
        let mut game = Game::with_seed(1);
        game.start();
        game.pause();
        assert!(draw(&game.snapshot()).contains("PAUSED"));
    }

    #[test]
    fn test_center_rect_clamps() {
        let area = Rect::new(0, 0, 10, 5);
        let centered = center_rect(area, 20, 3);
        assert_eq!(centered, Rect::new(0, 1, 10, 3));
    }
}
