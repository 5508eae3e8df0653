use crate::game::{Board, Cell, GameState, Phase, Player, Position, RoundOutcome};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(frame: &mut Frame, game_state: &GameState, cursor: Position, message: &Option<String>) {
    let board_rows = game_state.board().size() as u16 + 3;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),       // Header
            Constraint::Min(board_rows), // Board
            Constraint::Length(3),       // Message
            Constraint::Length(3),       // Controls
        ])
        .split(frame.area());

    render_header(frame, game_state, chunks[0]);
    render_board(frame, game_state, cursor, chunks[1]);
    render_message(frame, message, chunks[2]);
    render_controls(frame, chunks[3]);
}

fn player_color(player: Player) -> Color {
    match player {
        Player::Black => Color::LightBlue,
        Player::White => Color::White,
    }
}

fn render_header(frame: &mut Frame, game_state: &GameState, area: Rect) {
    let scores = game_state.scores();
    let status = match game_state.phase() {
        Phase::InProgress => format!("{} to move", game_state.active_player().name()),
        Phase::RoundOver(RoundOutcome::Winner(p)) => format!("{} won the round", p.name()),
        Phase::RoundOver(RoundOutcome::Draw) => "Round drawn".to_string(),
        Phase::MatchOver(_) => "Match over".to_string(),
    };
    let color = match game_state.phase() {
        Phase::InProgress => player_color(game_state.active_player()),
        _ => Color::Yellow,
    };

    let line = Line::from(vec![
        Span::styled(status, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::raw(format!(
            "  |  Round {}  |  Black {} - {} White  |  {}",
            game_state.round() + 1,
            scores.get(Player::Black),
            scores.get(Player::White),
            game_state.mode()
        )),
    ]);

    let header = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Gomoku"));

    frame.render_widget(header, area);
}

fn render_board(frame: &mut Frame, game_state: &GameState, cursor: Position, area: Rect) {
    let board = game_state.board();
    let winning = game_state
        .last_move()
        .and_then(|pos| board.winning_line(pos.row, pos.col))
        .unwrap_or_default();

    let mut lines = Vec::with_capacity(board.size() + 1);

    // Column letters
    let mut header = vec![Span::raw("   ")];
    for col in 0..board.size() {
        header.push(Span::styled(
            format!(" {} ", column_label(col)),
            Style::default().fg(Color::DarkGray),
        ));
    }
    lines.push(Line::from(header));

    for row in 0..board.size() {
        let mut spans = vec![Span::styled(
            format!("{:>2} ", row + 1),
            Style::default().fg(Color::DarkGray),
        )];
        for col in 0..board.size() {
            let pos = Position::new(row, col);
            spans.push(cell_span(board, pos, cursor, game_state.last_move(), &winning));
        }
        lines.push(Line::from(spans));
    }

    let board_widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

fn column_label(col: usize) -> char {
    (b'A' + col as u8) as char
}

fn cell_span(
    board: &Board,
    pos: Position,
    cursor: Position,
    last_move: Option<Position>,
    winning: &[Position],
) -> Span<'static> {
    let (symbol, mut style) = match board.get(pos.row, pos.col) {
        Cell::Empty => (" · ", Style::default().fg(Color::DarkGray)),
        Cell::Black => (" ● ", Style::default().fg(player_color(Player::Black))),
        Cell::White => (" ○ ", Style::default().fg(player_color(Player::White))),
    };

    if winning.contains(&pos) {
        style = style.bg(Color::Green).add_modifier(Modifier::BOLD);
    } else if last_move == Some(pos) {
        style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
    }
    if pos == cursor {
        style = style.bg(Color::Cyan).fg(Color::Black);
    }
    Span::styled(symbol, style)
}

fn render_message(frame: &mut Frame, message: &Option<String>, area: Rect) {
    let text = message.as_deref().unwrap_or("");
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let controls = Paragraph::new(
        "Arrows: Move  |  Enter: Place  |  M: Toggle mode  |  R: New match  |  Esc: Menu  |  Q: Quit",
    )
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title("Controls"));

    frame.render_widget(controls, area);
}
