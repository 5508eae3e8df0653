use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Row, Table, Tabs},
    Frame,
};

use crate::leaderboard::{format_time, Leaderboard};

pub fn render(
    frame: &mut Frame,
    leaderboard: &Leaderboard,
    sizes: &[u32],
    filter_index: usize,
    filter: Option<u32>,
    limit: usize,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tabs
            Constraint::Min(5),    // Table
            Constraint::Length(3), // Controls
        ])
        .split(frame.area());

    let titles: Vec<Line> = std::iter::once("All".to_string())
        .chain(sizes.iter().map(|s| format!("{s}×{s}")))
        .map(Line::from)
        .collect();
    let tabs = Tabs::new(titles)
        .select(filter_index)
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL).title("Leaderboard"));
    frame.render_widget(tabs, chunks[0]);

    let entries = leaderboard.list(filter, Some(limit));

    if entries.is_empty() {
        let empty = Paragraph::new("No times recorded yet")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(empty, chunks[1]);
    } else {
        let header = Row::new(["#", "Name", "Size", "Time"])
            .style(Style::default().add_modifier(Modifier::BOLD));
        let rows = entries.iter().enumerate().map(|(i, e)| {
            Row::new([
                (i + 1).to_string(),
                e.name.clone(),
                format!("{0}×{0}", e.difficulty),
                format_time(e.time),
            ])
        });
        let table = Table::new(
            rows,
            [
                Constraint::Length(4),
                Constraint::Min(12),
                Constraint::Length(6),
                Constraint::Length(10),
            ],
        )
        .header(header)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(table, chunks[1]);
    }

    let controls = Paragraph::new("Tab/Arrows: Filter size  |  Esc: Menu  |  Q: Quit")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));
    frame.render_widget(controls, chunks[2]);
}
