pub mod commands;
pub mod events;
pub mod state;
pub mod topic_detail;
pub mod topic_list;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::api::ForumBackend;
use crate::config::Config;
use crate::ui::UI;
use commands::Command;
use events::{AppEvent, InputEvent};
use state::{AppMode, AppState, DetailField, Screen, MENU_ENTRIES};

pub struct App {
    state: AppState,
    ui: UI,
    config: Config,
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
    event_tx: mpsc::UnboundedSender<AppEvent>,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config, backend: Arc<dyn ForumBackend>, user_id: String) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let mut state = AppState::new(backend, user_id, config.api.list_limit);
        state.set_status(format!("Ready — {}", config.api.endpoint));

        Self {
            state,
            ui: UI::new(),
            config,
            event_rx,
            event_tx,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Clone event sender for input handler
        let event_tx = self.event_tx.clone();
        let tick_rate = Duration::from_millis(self.config.ui.tick_rate_ms);

        // Spawn input handler task
        tokio::spawn(async move {
            let mut last_tick = Instant::now();

            loop {
                let timeout = tick_rate
                    .checked_sub(last_tick.elapsed())
                    .unwrap_or_else(|| Duration::from_secs(0));

                if crossterm::event::poll(timeout).unwrap_or(false) {
                    if let Ok(event) = event::read() {
                        match event {
                            Event::Key(key) => {
                                if key.kind == KeyEventKind::Press {
                                    if event_tx.send(AppEvent::Input(InputEvent::Key(key))).is_err() {
                                        break;
                                    }
                                }
                            }
                            Event::Mouse(mouse) => {
                                if event_tx.send(AppEvent::Input(InputEvent::Mouse(mouse))).is_err() {
                                    break;
                                }
                            }
                            Event::Resize(w, h) => {
                                if event_tx.send(AppEvent::Input(InputEvent::Resize(w, h))).is_err() {
                                    break;
                                }
                            }
                            _ => {}
                        }
                    }
                }

                if last_tick.elapsed() >= tick_rate {
                    if event_tx.send(AppEvent::Tick).is_err() {
                        break;
                    }
                    last_tick = Instant::now();
                }
            }
        });

        // Main application loop
        while !self.should_quit {
            // Draw UI
            terminal.draw(|f| {
                if let Err(e) = self.ui.render(f, &self.state) {
                    error!("Failed to render UI: {}", e);
                }
            })?;

            // Handle events
            if let Ok(event) = self.event_rx.try_recv() {
                self.handle_event(event).await?;
            }

            // Small delay to prevent busy waiting
            tokio::time::sleep(Duration::from_millis(16)).await;
        }

        // Cleanup terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        Ok(())
    }

    async fn handle_event(&mut self, event: AppEvent) -> Result<()> {
        debug!("Handling event: {:?}", event);

        match event {
            AppEvent::Input(input_event) => {
                self.handle_input_event(input_event).await?;
            }
            AppEvent::Tick => {}
        }

        Ok(())
    }

    async fn handle_input_event(&mut self, input_event: InputEvent) -> Result<()> {
        match input_event {
            InputEvent::Key(key) => match self.state.mode {
                AppMode::Normal => self.handle_normal_mode_key(key).await?,
                AppMode::Insert => self.handle_insert_mode_key(key).await?,
                AppMode::Command => self.handle_command_mode_key(key).await?,
            },
            InputEvent::Mouse(_mouse) => {
                // Mouse interaction not wired up
            }
            InputEvent::Resize(w, h) => {
                info!("Terminal resized to {}x{}", w, h);
            }
        }

        Ok(())
    }

    async fn handle_normal_mode_key(&mut self, key: crossterm::event::KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Char(':') => {
                self.state.mode = AppMode::Command;
                self.state.command_input.clear();
            }
            KeyCode::Char('i') => {
                if self.state.current_screen != Screen::Menu {
                    self.state.mode = AppMode::Insert;
                }
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.state.move_down();
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.state.move_up();
            }
            KeyCode::Char('g') => {
                // Handle 'gg' for go to top
                if self.state.last_key == Some('g') {
                    self.state.go_to_top();
                }
                self.state.last_key = Some('g');
                return Ok(());
            }
            KeyCode::Char('G') => {
                self.state.go_to_bottom();
            }
            KeyCode::Char('r') => {
                self.refresh_current_screen().await?;
            }
            KeyCode::Char('l') | KeyCode::Char(' ') => {
                if self.state.current_screen == Screen::TopicDetail {
                    self.like_selected_post().await;
                }
            }
            KeyCode::Enter => {
                self.activate_selection().await;
            }
            KeyCode::Esc => {
                self.navigate_back();
            }
            _ => {}
        }

        self.state.last_key = None;
        Ok(())
    }

    async fn handle_insert_mode_key(&mut self, key: crossterm::event::KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => {
                self.state.mode = AppMode::Normal;
            }
            KeyCode::Tab => {
                if self.state.current_screen == Screen::TopicDetail {
                    self.state.detail_field = match self.state.detail_field {
                        DetailField::Title => DetailField::Content,
                        DetailField::Content => DetailField::Title,
                    };
                }
            }
            KeyCode::Char(c) => {
                self.edit_active_input(|buffer| buffer.push(c));
            }
            KeyCode::Backspace => {
                self.edit_active_input(|buffer| {
                    buffer.pop();
                });
            }
            KeyCode::Enter => {
                self.submit_active_form().await;
            }
            _ => {}
        }

        Ok(())
    }

    async fn handle_command_mode_key(&mut self, key: crossterm::event::KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => {
                self.state.mode = AppMode::Normal;
                self.state.command_input.clear();
            }
            KeyCode::Char(c) => {
                self.state.command_input.push(c);
            }
            KeyCode::Backspace => {
                self.state.command_input.pop();
            }
            KeyCode::Enter => {
                let command = self.state.command_input.clone();
                self.state.command_input.clear();
                self.state.mode = AppMode::Normal;
                self.execute_command(command).await?;
            }
            _ => {}
        }

        Ok(())
    }

    /// Route a character edit to whichever input buffer the screen owns,
    /// re-running that field's validation where the view defines one.
    fn edit_active_input(&mut self, edit: impl FnOnce(&mut String)) {
        match self.state.current_screen {
            Screen::TopicList => {
                edit(&mut self.state.topic_list.title_input);
            }
            Screen::TopicDetail => match self.state.detail_field {
                DetailField::Title => {
                    edit(&mut self.state.topic_detail.title_input);
                    self.state.topic_detail.title_input_changed();
                }
                DetailField::Content => {
                    edit(&mut self.state.topic_detail.content_input);
                    self.state.topic_detail.content_input_changed();
                }
            },
            Screen::Menu => {}
        }
    }

    async fn submit_active_form(&mut self) {
        match self.state.current_screen {
            Screen::TopicList => {
                self.state.topic_list.submit_new_topic().await;
                if self.state.topic_list.error.is_none() {
                    self.state.mode = AppMode::Normal;
                }
            }
            Screen::TopicDetail => {
                self.state.topic_detail.submit_new_post().await;
                let detail = &self.state.topic_detail;
                if detail.error.is_none()
                    && detail.title_error.is_none()
                    && detail.content_error.is_none()
                {
                    self.state.mode = AppMode::Normal;
                    self.state.detail_field = DetailField::Title;
                }
            }
            Screen::Menu => {}
        }
    }

    async fn activate_selection(&mut self) {
        match self.state.current_screen {
            Screen::Menu => {
                let entry = MENU_ENTRIES.get(self.state.selected_index).copied();
                match entry {
                    Some("Quit") => self.should_quit = true,
                    Some(_) => {
                        // Every board entry leads to the topic list
                        self.state.enter_screen(Screen::TopicList);
                        self.state.topic_list.load_topics().await;
                    }
                    None => {}
                }
            }
            Screen::TopicList => {
                self.open_selected_topic().await;
            }
            Screen::TopicDetail => {}
        }
    }

    async fn open_selected_topic(&mut self) {
        let Some(topic) = self.state.topic_list.topic_at(self.state.selected_index) else {
            return;
        };
        let topic_id = topic.id.clone();
        let title = topic.title.clone();

        self.state.select_topic(topic_id);

        // The recorded selection is what the detail view consumes
        let Some(topic_id) = self.state.selected_topic_id.clone() else {
            return;
        };
        self.state.topic_detail.open(topic_id);
        self.state.enter_screen(Screen::TopicDetail);
        self.state.set_status(format!("Viewing topic: {}", title));
        self.state.topic_detail.load_topic().await;
    }

    fn navigate_back(&mut self) {
        match self.state.current_screen {
            Screen::TopicDetail => {
                self.state.topic_detail.close();
                self.state.selected_topic_id = None;
                self.state.enter_screen(Screen::TopicList);
            }
            Screen::TopicList => {
                self.state.enter_screen(Screen::Menu);
            }
            Screen::Menu => {}
        }
    }

    async fn refresh_current_screen(&mut self) -> Result<()> {
        match self.state.current_screen {
            Screen::TopicList => {
                info!("Refreshing topics...");
                self.state.topic_list.load_topics().await;
            }
            Screen::TopicDetail => {
                info!("Refreshing topic details...");
                self.state.topic_detail.load_topic().await;
            }
            Screen::Menu => {}
        }

        Ok(())
    }

    async fn like_selected_post(&mut self) {
        let Some(post) = self.state.topic_detail.post_at(self.state.selected_index) else {
            return;
        };
        let post_id = post.id.clone();
        let current_likes = post.like_count();

        self.state.topic_detail.like_post(&post_id, current_likes).await;
    }

    async fn execute_command(&mut self, command: String) -> Result<()> {
        let cmd = Command::parse(&command);
        match cmd {
            Command::Refresh => {
                self.refresh_current_screen().await?;
            }
            Command::Topics => {
                if self.state.current_screen == Screen::TopicDetail {
                    self.state.topic_detail.close();
                    self.state.selected_topic_id = None;
                }
                self.state.enter_screen(Screen::TopicList);
                self.state.topic_list.load_topics().await;
            }
            Command::Back => {
                self.navigate_back();
            }
            Command::Quit => {
                self.should_quit = true;
            }
            Command::Unknown(msg) => {
                warn!("Unknown command: {}", msg);
                self.state.set_status(msg);
            }
        }
        Ok(())
    }
}
