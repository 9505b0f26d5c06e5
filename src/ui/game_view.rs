use crate::game::{CounterState, PlayerColor, PresentationPosition, MAX_COLUMNS, MAX_ROWS};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::screen::ScreenState;

pub fn render(
    frame: &mut Frame,
    screen: &ScreenState,
    current_player: PlayerColor,
    selected_column: usize,
    hint: &Option<String>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(11),   // Board
            Constraint::Length(4), // Messages
            Constraint::Length(3), // Controls
        ])
        .split(frame.area());

    render_header(frame, screen, current_player, chunks[0]);
    render_board(frame, screen, selected_column, chunks[1]);
    render_messages(frame, screen, hint, chunks[2]);
    render_controls(frame, chunks[3]);
}

fn render_header(frame: &mut Frame, screen: &ScreenState, current_player: PlayerColor, area: Rect) {
    let (status, color) = if screen.is_game_over() {
        ("Game Over".to_string(), Color::White)
    } else {
        (
            format!("Current Player: {}", screen.player_name(current_player)),
            screen.player_color(current_player),
        )
    };

    let header = Paragraph::new(status)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Connect Four"),
        );

    frame.render_widget(header, area);
}

fn counter_span(screen: &ScreenState, state: CounterState) -> Span<'static> {
    match state {
        CounterState::Empty => Span::styled(" . ", Style::default().fg(Color::DarkGray)),
        CounterState::PlayerA => Span::styled(
            " \u{25cf} ",
            Style::default().fg(screen.player_color(PlayerColor::PlayerA)),
        ),
        CounterState::PlayerB => Span::styled(
            " \u{25cf} ",
            Style::default().fg(screen.player_color(PlayerColor::PlayerB)),
        ),
        CounterState::Winning => Span::styled(
            " \u{25c6} ",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
    }
}

fn render_board(frame: &mut Frame, screen: &ScreenState, selected_column: usize, area: Rect) {
    let mut lines = Vec::new();

    // Column numbers with selection indicator
    let mut col_line = vec![Span::raw("   ")]; // Padding (3 chars to match "  ║")
    for col in 0..MAX_COLUMNS {
        let label = format!(" {} ", col + 1);
        if col == selected_column {
            col_line.push(Span::styled(
                label,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ));
        } else {
            col_line.push(Span::raw(label));
        }
    }
    col_line.push(Span::raw("  ")); // Suffix padding to match " ║"
    lines.push(Line::from(col_line));

    let rule = "═".repeat(MAX_COLUMNS * 3 + 1);
    lines.push(Line::from(format!("  ╔{rule}╗")));

    for row in 0..MAX_ROWS {
        let mut row_spans = vec![Span::raw("  ║")];
        for col in 0..MAX_COLUMNS {
            let state = screen.cell(PresentationPosition::new(row, col));
            row_spans.push(counter_span(screen, state));
        }
        row_spans.push(Span::raw(" ║"));
        lines.push(Line::from(row_spans));
    }

    lines.push(Line::from(format!("  ╚{rule}╝")));

    let board_widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

fn render_messages(frame: &mut Frame, screen: &ScreenState, hint: &Option<String>, area: Rect) {
    let mut lines = Vec::new();
    if let Some(message) = screen.message() {
        lines.push(Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::Yellow),
        )));
    }
    if let Some(error) = screen.error() {
        lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red),
        )));
    }
    if let Some(hint) = hint {
        lines.push(Line::from(Span::raw(hint.clone())));
    }

    let msg_widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let controls = Paragraph::new(Line::from(
        "←/→: Move  |  Enter: Drop  |  S: Start  |  E: End  |  Q: Quit",
    ))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Controls"),
    );

    frame.render_widget(controls, area);
}
