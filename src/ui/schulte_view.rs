use std::time::Instant;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::app::RunSummary;
use crate::leaderboard::{format_time, LeaderboardEntry};
use crate::schulte::{SchulteSession, SessionStatus};

fn split(frame: &Frame, body: u16) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(body), // Body
            Constraint::Length(3), // Message
            Constraint::Length(3), // Controls
        ])
        .split(frame.area())
}

fn bordered<'a>(text: impl Into<ratatui::text::Text<'a>>, title: &'a str) -> Paragraph<'a> {
    Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(title))
}

fn render_message(frame: &mut Frame, message: &Option<String>, area: Rect) {
    let text = message.as_deref().unwrap_or("");
    let msg = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(msg, area);
}

/// Name entry and grid size selection
pub fn render_setup(
    frame: &mut Frame,
    name: &str,
    sizes: &[u32],
    selected: usize,
    message: &Option<String>,
) {
    let chunks = split(frame, 6);
    frame.render_widget(bordered("Click 1 to N² in order, as fast as you can", "Schulte Grid"), chunks[0]);

    let mut size_spans = vec![Span::raw("Size:  ")];
    for (i, size) in sizes.iter().enumerate() {
        let label = format!(" {size}×{size} ");
        if i == selected {
            size_spans.push(Span::styled(
                label,
                Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD),
            ));
        } else {
            size_spans.push(Span::raw(label));
        }
    }

    let body = vec![
        Line::from(""),
        Line::from(vec![
            Span::raw("Name:  "),
            Span::styled(name.to_string(), Style::default().add_modifier(Modifier::BOLD)),
            Span::styled("_", Style::default().fg(Color::Cyan)),
        ]),
        Line::from(""),
        Line::from(size_spans),
    ];
    frame.render_widget(bordered(body, "New run"), chunks[1]);
    render_message(frame, message, chunks[2]);
    frame.render_widget(
        bordered("Type: Name  |  Left/Right: Size  |  Enter: Start  |  Esc: Menu", "Controls"),
        chunks[3],
    );
}

pub fn render_playing(frame: &mut Frame, session: &SchulteSession, cursor: usize, now: Instant) {
    let grid = session.grid();
    let size = grid.size();
    let chunks = split(frame, size as u16 * 2 + 2);

    let elapsed = format_time(session.elapsed(now).as_secs_f64());
    let header = Line::from(vec![
        Span::styled(session.player().to_string(), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(format!("  |  {size}×{size}  |  Next: ")),
        Span::styled(
            grid.next_expected().min(grid.total()).to_string(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  |  "),
        Span::styled(elapsed, Style::default().fg(Color::Cyan)),
    ]);
    frame.render_widget(bordered(header, "Schulte Grid"), chunks[0]);

    let width = grid.total().to_string().len() + 2;
    let mut lines = Vec::with_capacity(size * 2);
    for row in 0..size {
        let mut spans = Vec::with_capacity(size);
        for col in 0..size {
            let index = row * size + col;
            let value = grid.value_at(index).unwrap_or_default();
            let mut style = if grid.is_cell_solved(index) {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            };
            if session.flash() == Some(index) {
                style = style.bg(Color::Red).fg(Color::White);
            } else if index == cursor {
                style = style.bg(Color::Cyan).fg(Color::Black);
            }
            spans.push(Span::styled(format!("{value:^width$}"), style));
            spans.push(Span::raw(" "));
        }
        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), chunks[1]);

    let hint = match session.status() {
        SessionStatus::Paused => "Paused",
        _ => "",
    };
    frame.render_widget(bordered(hint, ""), chunks[2]);
    frame.render_widget(
        bordered("Arrows: Move  |  Enter: Click  |  P: Pause  |  Esc: Give up", "Controls"),
        chunks[3],
    );

    if session.status() == SessionStatus::Paused {
        render_pause_overlay(frame, chunks[1]);
    }
}

fn render_pause_overlay(frame: &mut Frame, area: Rect) {
    let popup = Rect {
        x: area.x + area.width.saturating_sub(30) / 2,
        y: area.y + area.height.saturating_sub(5) / 2,
        width: area.width.min(30),
        height: area.height.min(5),
    };
    frame.render_widget(Clear, popup);
    let text = vec![
        Line::from(""),
        Line::styled("PAUSED", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        Line::from("Press P to resume"),
    ];
    frame.render_widget(bordered(text, ""), popup);
}

pub fn render_result(
    frame: &mut Frame,
    run: Option<&RunSummary>,
    best: Option<&LeaderboardEntry>,
    message: &Option<String>,
) {
    let chunks = split(frame, 6);
    frame.render_widget(bordered("Grid solved!", "Schulte Grid"), chunks[0]);

    let body = match run {
        Some(run) => {
            let rank = match run.rank {
                Some(rank) => format!("#{rank} on the {0}×{0} board", run.entry.difficulty),
                None => "Not in the top times".to_string(),
            };
            let mut lines = vec![
                Line::from(""),
                Line::from(format!("Player: {}", run.entry.name)),
                Line::from(format!("Grid: {0}×{0}", run.entry.difficulty)),
                Line::styled(
                    format!("Time: {}", format_time(run.entry.time)),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Line::from(rank),
            ];
            if let Some(best) = best {
                lines.push(Line::from(format!(
                    "Record: {} by {}",
                    format_time(best.time),
                    best.name
                )));
            }
            lines
        }
        None => vec![Line::from("No result")],
    };
    frame.render_widget(bordered(body, "Result"), chunks[1]);
    render_message(frame, message, chunks[2]);
    frame.render_widget(
        bordered("Enter: Play again  |  L: Leaderboard  |  Esc: Menu  |  Q: Quit", "Controls"),
        chunks[3],
    );
}
