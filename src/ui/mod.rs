pub mod screens;

use anyhow::Result;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use crate::app::state::{AppMode, AppState, Screen};

pub struct UI {
    // UI state if needed
}

impl UI {
    pub fn new() -> Self {
        Self {}
    }

    pub fn render(&self, f: &mut Frame, state: &AppState) -> Result<()> {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Top tabs
                Constraint::Min(0),    // Main content
                Constraint::Length(3), // Status bar
            ])
            .split(f.size());

        // Render top tabs
        self.render_tabs(f, chunks[0], state);

        // Render main content based on current screen
        match state.current_screen {
            Screen::Menu => screens::menu::render(f, chunks[1], state)?,
            Screen::TopicList => screens::topics::render(f, chunks[1], state)?,
            Screen::TopicDetail => screens::topic_detail::render(f, chunks[1], state)?,
        }

        // Render status bar
        self.render_status_bar(f, chunks[2], state);

        // Render command input if in command mode
        if state.mode == AppMode::Command {
            self.render_command_input(f, f.size(), state);
        }

        Ok(())
    }

    fn render_tabs(&self, f: &mut Frame, area: Rect, state: &AppState) {
        let titles = vec!["Menu", "Topics", "Posts"];

        let selected_index = match state.current_screen {
            Screen::Menu => 0,
            Screen::TopicList => 1,
            Screen::TopicDetail => 2,
        };

        let tabs = Tabs::new(titles)
            .block(Block::default().borders(Borders::ALL).title("Forum Eye"))
            .style(Style::default().fg(Color::White))
            .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            .select(selected_index);

        f.render_widget(tabs, area);
    }

    fn render_status_bar(&self, f: &mut Frame, area: Rect, state: &AppState) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(0),     // Left side
                Constraint::Length(34), // Right side
            ])
            .split(area);

        let loading = match state.current_screen {
            Screen::TopicList => state.topic_list.is_loading,
            Screen::TopicDetail => state.topic_detail.is_loading,
            Screen::Menu => false,
        };

        // Left side - status and current mode
        let left_content = format!(
            " {} | Mode: {}{}",
            state.status_message,
            match state.mode {
                AppMode::Normal => "NORMAL",
                AppMode::Insert => "INSERT",
                AppMode::Command => "COMMAND",
            },
            if loading { " | Loading..." } else { "" }
        );

        let left_paragraph = Paragraph::new(left_content)
            .style(Style::default().fg(Color::White))
            .block(Block::default().borders(Borders::ALL));

        f.render_widget(left_paragraph, chunks[0]);

        // Right side - help text
        let help_text = match (state.mode, state.current_screen) {
            (AppMode::Normal, Screen::TopicDetail) => "l:like i:write Esc:back :cmd",
            (AppMode::Normal, _) => "q:quit i:edit Enter:open :cmd",
            (AppMode::Insert, Screen::TopicDetail) => "ESC:normal Tab:field Enter:send",
            (AppMode::Insert, _) => "ESC:normal Enter:send",
            (AppMode::Command, _) => "ESC:cancel Enter:exec",
        };

        let right_paragraph = Paragraph::new(help_text)
            .style(Style::default().fg(Color::Cyan))
            .block(Block::default().borders(Borders::ALL));

        f.render_widget(right_paragraph, chunks[1]);
    }

    fn render_command_input(&self, f: &mut Frame, area: Rect, state: &AppState) {
        let popup_area = self.centered_rect(60, 3, area);

        // Clear the area
        f.render_widget(Clear, popup_area);

        let input_text = format!(":{}", state.command_input);
        let input_paragraph = Paragraph::new(input_text)
            .style(Style::default().fg(Color::Yellow))
            .block(Block::default().borders(Borders::ALL).title("Command"));

        f.render_widget(input_paragraph, popup_area);
    }

    fn centered_rect(&self, percent_x: u16, height: u16, r: Rect) -> Rect {
        let popup_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage((100 - height) / 2),
                Constraint::Length(height),
                Constraint::Percentage((100 - height) / 2),
            ])
            .split(r);

        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ])
            .split(popup_layout[1])[1]
    }
}

impl Default for UI {
    fn default() -> Self {
        Self::new()
    }
}
