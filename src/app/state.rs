use std::sync::Arc;

use crate::api::ForumBackend;

use super::topic_detail::TopicDetailController;
use super::topic_list::TopicListController;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppMode {
    Normal,
    Insert,
    Command,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Screen {
    Menu,
    TopicList,
    TopicDetail,
}

/// Which field of the new-post form is being edited.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DetailField {
    Title,
    Content,
}

pub const MENU_ENTRIES: &[&str] = &[
    "Home Page",
    "Followed Topics",
    "For You",
    "Your Posts",
    "Quit",
];

pub struct AppState {
    pub mode: AppMode,
    pub current_screen: Screen,
    pub last_key: Option<char>,

    // Input handling
    pub command_input: String,
    pub detail_field: DetailField,

    // Navigation
    pub selected_index: usize,
    pub scroll_offset: usize,
    pub selected_topic_id: Option<String>,

    // Per-view state, owned exclusively by each view
    pub topic_list: TopicListController,
    pub topic_detail: TopicDetailController,

    pub status_message: String,
}

impl AppState {
    pub fn new(backend: Arc<dyn ForumBackend>, user_id: String, list_limit: Option<i32>) -> Self {
        Self {
            mode: AppMode::Normal,
            current_screen: Screen::Menu,
            last_key: None,

            command_input: String::new(),
            detail_field: DetailField::Title,

            selected_index: 0,
            scroll_offset: 0,
            selected_topic_id: None,

            topic_list: TopicListController::new(backend.clone(), list_limit),
            topic_detail: TopicDetailController::new(backend, user_id),

            status_message: "Ready".to_string(),
        }
    }

    // Navigation methods
    pub fn move_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
            self.adjust_scroll();
        }
    }

    pub fn move_down(&mut self) {
        let max_index = self.get_max_index();
        if self.selected_index < max_index {
            self.selected_index += 1;
            self.adjust_scroll();
        }
    }

    pub fn go_to_top(&mut self) {
        self.selected_index = 0;
        self.scroll_offset = 0;
    }

    pub fn go_to_bottom(&mut self) {
        self.selected_index = self.get_max_index();
        self.adjust_scroll();
    }

    /// Record the chosen topic id. Pure state transition, no network call.
    pub fn select_topic(&mut self, id: String) {
        self.selected_topic_id = Some(id);
    }

    pub fn enter_screen(&mut self, screen: Screen) {
        self.current_screen = screen;
        self.reset_selection();
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    // Helper methods
    fn get_max_index(&self) -> usize {
        match self.current_screen {
            Screen::Menu => MENU_ENTRIES.len().saturating_sub(1),
            Screen::TopicList => self.topic_list.topics.len().saturating_sub(1),
            Screen::TopicDetail => self.topic_detail.posts().len().saturating_sub(1),
        }
    }

    fn adjust_scroll(&mut self) {
        let visible_items = 20; // This should be based on terminal height

        if self.selected_index < self.scroll_offset {
            self.scroll_offset = self.selected_index;
        } else if self.selected_index >= self.scroll_offset + visible_items {
            self.scroll_offset = self.selected_index.saturating_sub(visible_items - 1);
        }
    }

    fn reset_selection(&mut self) {
        self.selected_index = 0;
        self.scroll_offset = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::TopicConnection;
    use crate::api::{
        CreatePostInput, CreateTopicInput, ListTopicsVariables, Post, Topic, TopicSummary,
        UpdatePostInput,
    };
    use crate::utils::error::Result;
    use async_trait::async_trait;

    struct NullBackend;

    #[async_trait]
    impl ForumBackend for NullBackend {
        async fn list_topics(&self, _variables: ListTopicsVariables) -> Result<TopicConnection> {
            Ok(TopicConnection {
                items: vec![],
                next_token: None,
            })
        }

        async fn get_topic(&self, _id: &str) -> Result<Option<Topic>> {
            Ok(None)
        }

        async fn create_topic(&self, _input: CreateTopicInput) -> Result<TopicSummary> {
            unimplemented!()
        }

        async fn create_post(&self, _input: CreatePostInput) -> Result<Post> {
            unimplemented!()
        }

        async fn update_post_likes(&self, _input: UpdatePostInput) -> Result<Post> {
            unimplemented!()
        }
    }

    fn state() -> AppState {
        AppState::new(Arc::new(NullBackend), "u-1".to_string(), None)
    }

    #[test]
    fn starts_on_menu_in_normal_mode() {
        let state = state();
        assert_eq!(state.current_screen, Screen::Menu);
        assert_eq!(state.mode, AppMode::Normal);
        assert!(state.selected_topic_id.is_none());
    }

    #[test]
    fn select_topic_records_id_without_side_effects() {
        let mut state = state();
        state.select_topic("t-42".to_string());
        assert_eq!(state.selected_topic_id.as_deref(), Some("t-42"));
        assert_eq!(state.current_screen, Screen::Menu);
    }

    #[test]
    fn menu_navigation_is_bounded() {
        let mut state = state();
        state.move_up();
        assert_eq!(state.selected_index, 0);

        for _ in 0..20 {
            state.move_down();
        }
        assert_eq!(state.selected_index, MENU_ENTRIES.len() - 1);

        state.go_to_top();
        assert_eq!(state.selected_index, 0);
        state.go_to_bottom();
        assert_eq!(state.selected_index, MENU_ENTRIES.len() - 1);
    }

    #[test]
    fn entering_a_screen_resets_selection() {
        let mut state = state();
        state.move_down();
        state.enter_screen(Screen::TopicList);
        assert_eq!(state.selected_index, 0);
        assert_eq!(state.scroll_offset, 0);
    }
}
