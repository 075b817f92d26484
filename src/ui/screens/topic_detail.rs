use anyhow::Result;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::state::{AppMode, AppState, DetailField};

pub fn render(f: &mut Frame, area: Rect, state: &AppState) -> Result<()> {
    let detail = &state.topic_detail;

    // A request in flight replaces the whole page.
    if detail.is_loading {
        let loading = Paragraph::new("Loading...")
            .style(Style::default().fg(Color::Yellow))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(loading, area);
        return Ok(());
    }

    // Without a loaded topic there is nothing to show beyond the error.
    let Some(topic) = &detail.topic else {
        if let Some(error) = &detail.error {
            let banner = Paragraph::new(error.as_str())
                .style(Style::default().fg(Color::Red))
                .block(Block::default().borders(Borders::ALL).title("Esc: back to topics"));
            f.render_widget(banner, area);
        }
        return Ok(());
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Topic title
            Constraint::Length(1), // Error banner
            Constraint::Length(3), // Post title input
            Constraint::Length(1), // Title field error
            Constraint::Length(3), // Post content input
            Constraint::Length(1), // Content field error
            Constraint::Min(0),    // Posts
        ])
        .split(area);

    let header = Paragraph::new(Span::styled(
        topic.title.as_str(),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    ))
    .block(Block::default().borders(Borders::ALL).title("Topic (Esc: back)"));
    f.render_widget(header, chunks[0]);

    if let Some(error) = &detail.error {
        let banner = Paragraph::new(Span::styled(
            error.as_str(),
            Style::default().fg(Color::Red),
        ));
        f.render_widget(banner, chunks[1]);
    }

    render_form_input(
        f,
        chunks[2],
        state,
        DetailField::Title,
        "Post Title",
        &detail.title_input,
    );
    render_field_error(f, chunks[3], detail.title_error.as_deref());

    render_form_input(
        f,
        chunks[4],
        state,
        DetailField::Content,
        "Write your post...",
        &detail.content_input,
    );
    render_field_error(f, chunks[5], detail.content_error.as_deref());

    render_posts(f, chunks[6], state);

    Ok(())
}

fn render_form_input(
    f: &mut Frame,
    area: Rect,
    state: &AppState,
    field: DetailField,
    title: &str,
    value: &str,
) {
    let focused = state.mode == AppMode::Insert && state.detail_field == field;

    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    };

    let content = if value.is_empty() && !focused {
        Span::styled(title, Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(value)
    };

    let input = Paragraph::new(Line::from(content)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title),
    );

    f.render_widget(input, area);
}

fn render_field_error(f: &mut Frame, area: Rect, error: Option<&str>) {
    if let Some(error) = error {
        let line = Paragraph::new(Span::styled(error, Style::default().fg(Color::Red)));
        f.render_widget(line, area);
    }
}

fn render_posts(f: &mut Frame, area: Rect, state: &AppState) {
    let posts = state.topic_detail.posts();

    if posts.is_empty() {
        let empty = Paragraph::new("No posts yet. Be the first to post!")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title("Posts"));
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = posts
        .iter()
        .enumerate()
        .skip(state.scroll_offset)
        .map(|(i, post)| {
            let timestamp = post.created_at.format("%Y-%m-%d %H:%M").to_string();

            let lines = vec![
                Line::from(vec![
                    Span::styled(
                        post.title.as_str(),
                        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(
                        format!("♥ {}", post.like_count()),
                        Style::default().fg(Color::Yellow),
                    ),
                ]),
                Line::from(Span::raw(post.content.as_str())),
                Line::from(vec![
                    Span::styled(
                        format!("Posted by: {}", post.author_name()),
                        Style::default().fg(Color::Gray),
                    ),
                    Span::raw("  "),
                    Span::styled(timestamp, Style::default().fg(Color::Gray)),
                ]),
            ];

            let style = if i == state.selected_index {
                Style::default().bg(Color::Blue).fg(Color::White)
            } else {
                Style::default()
            };

            ListItem::new(lines).style(style)
        })
        .collect();

    let widget = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Posts"))
        .style(Style::default().fg(Color::White));

    f.render_widget(widget, area);
}
