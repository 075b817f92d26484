use std::sync::Arc;

use tracing::error;

use crate::api::{CreateTopicInput, ForumBackend, ListTopicsVariables, TopicSummary};

/// View state for the topic list screen.
///
/// Owns its input buffer, the last fetched topic collection, the loading
/// flag, and the current error message. Nothing here is shared with the
/// detail view; the selected topic id travels through app navigation state.
pub struct TopicListController {
    backend: Arc<dyn ForumBackend>,
    list_limit: Option<i32>,
    pub topics: Vec<TopicSummary>,
    pub title_input: String,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl TopicListController {
    pub fn new(backend: Arc<dyn ForumBackend>, list_limit: Option<i32>) -> Self {
        Self {
            backend,
            list_limit,
            topics: Vec::new(),
            title_input: String::new(),
            is_loading: false,
            error: None,
        }
    }

    /// Fetch the topic collection. On success the local collection is
    /// replaced and the error cleared; on failure the previous collection is
    /// kept. The loading flag is cleared on every completion path.
    pub async fn load_topics(&mut self) {
        self.is_loading = true;
        self.error = None;

        match self.backend.list_topics(self.list_variables()).await {
            Ok(connection) => {
                self.topics = connection.items;
                self.error = None;
            }
            Err(err) => {
                error!("Error fetching topics: {}", err);
                self.error = Some("Failed to load topics. Please try again later.".to_string());
            }
        }

        self.is_loading = false;
    }

    /// Create a topic from the input buffer. An empty-after-trim title sends
    /// nothing; a successful create clears the input and reloads the list so
    /// post counts stay current; a failed create keeps the input for retry.
    pub async fn submit_new_topic(&mut self) {
        let trimmed = self.title_input.trim().to_string();

        if trimmed.is_empty() {
            self.error = Some("Please enter a topic.".to_string());
            return;
        }

        self.is_loading = true;

        match self.backend.create_topic(CreateTopicInput { title: trimmed }).await {
            Ok(_) => {
                self.title_input.clear();
                self.error = None;
                self.load_topics().await;
            }
            Err(err) => {
                error!("Error creating topic: {}", err);
                self.error = Some("Failed to create topic. Please try again.".to_string());
            }
        }

        self.is_loading = false;
    }

    pub fn topic_at(&self, index: usize) -> Option<&TopicSummary> {
        self.topics.get(index)
    }

    fn list_variables(&self) -> ListTopicsVariables {
        ListTopicsVariables {
            limit: self.list_limit,
            ..Default::default()
        }
    }
}
