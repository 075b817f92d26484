use anyhow::Result;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::state::{AppMode, AppState};

pub fn render(f: &mut Frame, area: Rect, state: &AppState) -> Result<()> {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Create-topic input
            Constraint::Length(1), // Error / loading line
            Constraint::Min(0),    // Topic list
        ])
        .split(area);

    render_create_input(f, chunks[0], state);
    render_message_line(f, chunks[1], state);
    render_topic_list(f, chunks[2], state);

    Ok(())
}

fn render_create_input(f: &mut Frame, area: Rect, state: &AppState) {
    let list = &state.topic_list;

    let title = if list.is_loading {
        "Create New Topic (Creating...)"
    } else {
        "Create New Topic"
    };

    let border_style = if state.mode == AppMode::Insert {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    };

    let content = if list.title_input.is_empty() && state.mode != AppMode::Insert {
        Span::styled(
            "Type your topic here...",
            Style::default().fg(Color::DarkGray),
        )
    } else {
        Span::raw(list.title_input.as_str())
    };

    let input = Paragraph::new(Line::from(content)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title),
    );

    f.render_widget(input, area);
}

fn render_message_line(f: &mut Frame, area: Rect, state: &AppState) {
    let list = &state.topic_list;

    let line = if let Some(error) = &list.error {
        Line::from(Span::styled(
            error.as_str(),
            Style::default().fg(Color::Red),
        ))
    } else if list.is_loading {
        Line::from(Span::styled(
            "Loading...",
            Style::default().fg(Color::Yellow),
        ))
    } else {
        Line::from(Span::styled(
            "i: new topic  Enter: open  r: refresh",
            Style::default().fg(Color::DarkGray),
        ))
    };

    f.render_widget(Paragraph::new(line), area);
}

fn render_topic_list(f: &mut Frame, area: Rect, state: &AppState) {
    let list = &state.topic_list;

    let items: Vec<ListItem> = list
        .topics
        .iter()
        .enumerate()
        .skip(state.scroll_offset)
        .map(|(i, topic)| {
            let post_count = topic.post_count();
            let count_label = if post_count == 1 {
                "1 post".to_string()
            } else {
                format!("{} posts", post_count)
            };

            let count_style = if post_count == 0 {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default().fg(Color::Green)
            };

            let mut lines = vec![Line::from(vec![
                Span::styled(
                    topic.title.as_str(),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(count_label, count_style),
            ])];

            if post_count == 0 {
                lines.push(Line::from(Span::styled(
                    "No posts yet - Be the first to contribute!",
                    Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
                )));
            }

            let style = if i == state.selected_index {
                Style::default().bg(Color::Blue).fg(Color::White)
            } else {
                Style::default()
            };

            ListItem::new(lines).style(style)
        })
        .collect();

    let widget = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Popular Topics"))
        .style(Style::default().fg(Color::White));

    f.render_widget(widget, area);
}
