use anyhow::Result;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::app::state::{AppState, MENU_ENTRIES};

pub fn render(f: &mut Frame, area: Rect, state: &AppState) -> Result<()> {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(5),    // Entries
            Constraint::Length(4), // Help
        ])
        .split(area);

    let title = Paragraph::new("Welcome to the board")
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::Cyan));
    f.render_widget(title, chunks[0]);

    let items: Vec<ListItem> = MENU_ENTRIES
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let style = if i == state.selected_index {
                Style::default().bg(Color::Blue).fg(Color::White)
            } else {
                Style::default()
            };
            ListItem::new(*entry).style(style)
        })
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Menu"));
    f.render_widget(list, chunks[1]);

    let help_text = vec![
        Line::from(vec![
            Span::styled("Navigation: ", Style::default().fg(Color::Yellow)),
            Span::raw("↑/↓ or j/k - Move, "),
            Span::styled("Enter", Style::default().fg(Color::Green)),
            Span::raw(" - Open, "),
            Span::styled("q", Style::default().fg(Color::Red)),
            Span::raw(" - Quit"),
        ]),
        Line::from(Span::raw("All board sections currently open the topic list.")),
    ];

    let help = Paragraph::new(help_text)
        .block(Block::default().borders(Borders::ALL).title("Help"))
        .wrap(Wrap { trim: true });
    f.render_widget(help, chunks[2]);

    Ok(())
}
