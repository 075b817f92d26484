use std::sync::Arc;

use tracing::error;

use crate::api::{CreatePostInput, ForumBackend, Post, Topic, UpdatePostInput};

/// View state for a single topic's screen: the fetched topic with its posts,
/// the new-post form buffers with per-field errors, and the loading flag.
///
/// The topic id and the signed-in user's id arrive by value when the screen
/// opens; everything else is created here and discarded on close.
pub struct TopicDetailController {
    backend: Arc<dyn ForumBackend>,
    user_id: String,
    pub topic_id: Option<String>,
    pub topic: Option<Topic>,
    pub title_input: String,
    pub content_input: String,
    pub title_error: Option<String>,
    pub content_error: Option<String>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl TopicDetailController {
    pub fn new(backend: Arc<dyn ForumBackend>, user_id: String) -> Self {
        Self {
            backend,
            user_id,
            topic_id: None,
            topic: None,
            title_input: String::new(),
            content_input: String::new(),
            title_error: None,
            content_error: None,
            is_loading: false,
            error: None,
        }
    }

    /// Enter the screen for one topic with fresh view state.
    pub fn open(&mut self, topic_id: String) {
        self.topic_id = Some(topic_id);
        self.topic = None;
        self.title_input.clear();
        self.content_input.clear();
        self.title_error = None;
        self.content_error = None;
        self.error = None;
    }

    /// Leave the screen, discarding all transient state.
    pub fn close(&mut self) {
        self.topic_id = None;
        self.topic = None;
        self.title_input.clear();
        self.content_input.clear();
        self.title_error = None;
        self.content_error = None;
        self.error = None;
    }

    /// Fetch the open topic with its full post list. When the fetch fails,
    /// or the id is unknown (null topic), the screen has nothing to show
    /// beyond the error banner.
    pub async fn load_topic(&mut self) {
        let Some(topic_id) = self.topic_id.clone() else {
            return;
        };

        self.is_loading = true;
        self.error = None;

        match self.backend.get_topic(&topic_id).await {
            Ok(topic) => {
                self.topic = topic;
            }
            Err(err) => {
                error!("Error fetching topic details: {}", err);
                self.error =
                    Some("Failed to load topic details. Please try again later.".to_string());
            }
        }

        self.is_loading = false;
    }

    /// Re-validate the title while the user edits it.
    pub fn title_input_changed(&mut self) {
        self.title_error = if self.title_input.trim().chars().count() < 3 {
            Some("Title must be at least 3 characters".to_string())
        } else {
            None
        };
    }

    /// Re-validate the content while the user edits it.
    pub fn content_input_changed(&mut self) {
        self.content_error = if self.content_input.trim().chars().count() < 10 {
            Some("Content must be at least 10 characters".to_string())
        } else {
            None
        };
    }

    /// Create a post from the form buffers. Validation runs locally before
    /// any request; both field errors can be set at once. A successful create
    /// clears the form and re-fetches the topic; a failed request keeps the
    /// buffers for resubmission.
    pub async fn submit_new_post(&mut self) {
        let title = self.title_input.trim().to_string();
        let content = self.content_input.trim().to_string();

        let title_error = if title.is_empty() {
            Some("Title is required".to_string())
        } else if title.chars().count() < 3 {
            Some("Title must be at least 3 characters".to_string())
        } else {
            None
        };
        let content_error = if content.is_empty() {
            Some("Content is required".to_string())
        } else if content.chars().count() < 10 {
            Some("Content must be at least 10 characters".to_string())
        } else {
            None
        };

        if title_error.is_some() || content_error.is_some() {
            self.title_error = title_error;
            self.content_error = content_error;
            return;
        }

        let Some(topic_id) = self.topic_id.clone() else {
            return;
        };

        self.is_loading = true;
        self.error = None;

        let input = CreatePostInput {
            title,
            content,
            likes: 0,
            created_by_id: self.user_id.clone(),
            topic_id,
        };

        match self.backend.create_post(input).await {
            Ok(_) => {
                self.title_input.clear();
                self.content_input.clear();
                self.title_error = None;
                self.content_error = None;
                self.load_topic().await;
            }
            Err(err) => {
                error!("Error creating post: {}", err);
                self.error = Some("Failed to create post. Please try again.".to_string());
            }
        }

        self.is_loading = false;
    }

    /// Send a like for one post, setting its count to `current_likes + 1`.
    /// The local count is bumped only after the backend confirms; a failed
    /// request leaves it untouched.
    pub async fn like_post(&mut self, post_id: &str, current_likes: u32) {
        let new_likes = current_likes + 1;
        let input = UpdatePostInput {
            id: post_id.to_string(),
            likes: new_likes,
        };

        match self.backend.update_post_likes(input).await {
            Ok(_) => {
                if let Some(topic) = &mut self.topic {
                    for post in &mut topic.posts.items {
                        if post.id == post_id {
                            post.likes = Some(new_likes);
                        }
                    }
                }
            }
            Err(err) => {
                error!("Error liking post: {}", err);
                self.error = Some("Failed to like post".to_string());
            }
        }
    }

    pub fn posts(&self) -> &[Post] {
        self.topic
            .as_ref()
            .map(|topic| topic.posts.items.as_slice())
            .unwrap_or(&[])
    }

    pub fn post_at(&self, index: usize) -> Option<&Post> {
        self.posts().get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{PostConnection, User};
    use crate::api::{CreateTopicInput, ListTopicsVariables, TopicConnection, TopicSummary};
    use crate::utils::error::{ForumEyeError, Result};
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn post(id: &str, likes: Option<u32>) -> Post {
        Post {
            id: id.to_string(),
            title: format!("post {}", id),
            content: "some content long enough".to_string(),
            likes,
            created_by_id: "u-1".to_string(),
            created_by: Some(User {
                id: "u-1".to_string(),
                username: "ada".to_string(),
                email: "ada@example.com".to_string(),
            }),
            topic_id: "t-1".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn topic_with_posts(posts: Vec<Post>) -> Topic {
        Topic {
            id: "t-1".to_string(),
            title: "Rust".to_string(),
            posts: PostConnection {
                items: posts,
                next_token: None,
            },
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[derive(Default)]
    struct FakeBackend {
        topic: Mutex<Option<Topic>>,
        get_calls: AtomicUsize,
        created_posts: Mutex<Vec<CreatePostInput>>,
        updates: Mutex<Vec<UpdatePostInput>>,
        fail_get: bool,
        fail_create: bool,
        fail_update: bool,
    }

    #[async_trait]
    impl ForumBackend for FakeBackend {
        async fn list_topics(&self, _variables: ListTopicsVariables) -> Result<TopicConnection> {
            unimplemented!("not exercised by the detail view")
        }

        async fn get_topic(&self, _id: &str) -> Result<Option<Topic>> {
            self.get_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_get {
                return Err(ForumEyeError::GraphQl("network down".to_string()));
            }
            Ok(self.topic.lock().unwrap().clone())
        }

        async fn create_topic(&self, _input: CreateTopicInput) -> Result<TopicSummary> {
            unimplemented!("not exercised by the detail view")
        }

        async fn create_post(&self, input: CreatePostInput) -> Result<Post> {
            if self.fail_create {
                return Err(ForumEyeError::GraphQl("rejected".to_string()));
            }
            let created = post("p-new", Some(0));
            self.created_posts.lock().unwrap().push(input);
            Ok(created)
        }

        async fn update_post_likes(&self, input: UpdatePostInput) -> Result<Post> {
            if self.fail_update {
                return Err(ForumEyeError::GraphQl("rejected".to_string()));
            }
            let updated = post(&input.id, Some(input.likes));
            self.updates.lock().unwrap().push(input);
            Ok(updated)
        }
    }

    fn controller(backend: Arc<FakeBackend>) -> TopicDetailController {
        let mut detail = TopicDetailController::new(backend, "u-1".to_string());
        detail.open("t-1".to_string());
        detail
    }

    #[tokio::test]
    async fn load_stores_topic_and_posts() {
        let backend = Arc::new(FakeBackend::default());
        *backend.topic.lock().unwrap() = Some(topic_with_posts(vec![post("p-1", Some(2))]));

        let mut detail = controller(backend);
        detail.load_topic().await;

        assert_eq!(detail.posts().len(), 1);
        assert!(detail.error.is_none());
        assert!(!detail.is_loading);
    }

    #[tokio::test]
    async fn load_miss_is_not_an_error() {
        let backend = Arc::new(FakeBackend::default());
        let mut detail = controller(backend);

        detail.load_topic().await;

        assert!(detail.topic.is_none());
        assert!(detail.error.is_none());
        assert!(detail.posts().is_empty());
    }

    #[tokio::test]
    async fn failed_load_sets_error() {
        let backend = Arc::new(FakeBackend {
            fail_get: true,
            ..Default::default()
        });
        let mut detail = controller(backend);

        detail.load_topic().await;

        assert_eq!(
            detail.error.as_deref(),
            Some("Failed to load topic details. Please try again later.")
        );
        assert!(!detail.is_loading);
    }

    #[tokio::test]
    async fn short_fields_send_nothing_and_flag_both() {
        let backend = Arc::new(FakeBackend::default());
        let mut detail = controller(backend.clone());
        detail.title_input = "ab".to_string();
        detail.content_input = "too short".to_string();

        detail.submit_new_post().await;

        assert_eq!(
            detail.title_error.as_deref(),
            Some("Title must be at least 3 characters")
        );
        assert_eq!(
            detail.content_error.as_deref(),
            Some("Content must be at least 10 characters")
        );
        assert!(backend.created_posts.lock().unwrap().is_empty());
        assert_eq!(backend.get_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn empty_fields_are_required() {
        let backend = Arc::new(FakeBackend::default());
        let mut detail = controller(backend.clone());

        detail.submit_new_post().await;

        assert_eq!(detail.title_error.as_deref(), Some("Title is required"));
        assert_eq!(detail.content_error.as_deref(), Some("Content is required"));
        assert!(backend.created_posts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn submit_tags_post_and_reloads() {
        let backend = Arc::new(FakeBackend::default());
        *backend.topic.lock().unwrap() = Some(topic_with_posts(vec![]));

        let mut detail = controller(backend.clone());
        detail.title_input = "  Borrowck  ".to_string();
        detail.content_input = "  Why does this not compile?  ".to_string();

        detail.submit_new_post().await;

        let created = backend.created_posts.lock().unwrap();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].title, "Borrowck");
        assert_eq!(created[0].content, "Why does this not compile?");
        assert_eq!(created[0].likes, 0);
        assert_eq!(created[0].created_by_id, "u-1");
        assert_eq!(created[0].topic_id, "t-1");
        assert_eq!(backend.get_calls.load(Ordering::SeqCst), 1);
        assert_eq!(detail.title_input, "");
        assert_eq!(detail.content_input, "");
        assert!(detail.title_error.is_none());
        assert!(detail.content_error.is_none());
    }

    #[tokio::test]
    async fn failed_submit_keeps_inputs() {
        let backend = Arc::new(FakeBackend {
            fail_create: true,
            ..Default::default()
        });
        let mut detail = controller(backend.clone());
        detail.title_input = "Borrowck".to_string();
        detail.content_input = "Why does this not compile?".to_string();

        detail.submit_new_post().await;

        assert_eq!(
            detail.error.as_deref(),
            Some("Failed to create post. Please try again.")
        );
        assert_eq!(detail.title_input, "Borrowck");
        assert_eq!(detail.content_input, "Why does this not compile?");
        assert_eq!(backend.get_calls.load(Ordering::SeqCst), 0);
        assert!(!detail.is_loading);
    }

    #[tokio::test]
    async fn like_sends_increment_and_updates_only_that_post() {
        let backend = Arc::new(FakeBackend::default());
        let mut detail = controller(backend.clone());
        detail.topic = Some(topic_with_posts(vec![post("p-1", Some(4)), post("p-2", Some(7))]));

        detail.like_post("p-1", 4).await;

        let updates = backend.updates.lock().unwrap();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].id, "p-1");
        assert_eq!(updates[0].likes, 5);
        assert_eq!(detail.post_at(0).unwrap().like_count(), 5);
        assert_eq!(detail.post_at(1).unwrap().like_count(), 7);
        assert!(detail.error.is_none());
    }

    #[tokio::test]
    async fn like_treats_missing_count_as_zero() {
        let backend = Arc::new(FakeBackend::default());
        let mut detail = controller(backend.clone());
        detail.topic = Some(topic_with_posts(vec![post("p-1", None)]));

        let current = detail.post_at(0).unwrap().like_count();
        detail.like_post("p-1", current).await;

        assert_eq!(backend.updates.lock().unwrap()[0].likes, 1);
        assert_eq!(detail.post_at(0).unwrap().like_count(), 1);
    }

    #[tokio::test]
    async fn failed_like_leaves_count_alone() {
        let backend = Arc::new(FakeBackend {
            fail_update: true,
            ..Default::default()
        });
        let mut detail = controller(backend.clone());
        detail.topic = Some(topic_with_posts(vec![post("p-1", Some(4))]));

        detail.like_post("p-1", 4).await;

        assert_eq!(detail.error.as_deref(), Some("Failed to like post"));
        assert_eq!(detail.post_at(0).unwrap().like_count(), 4);
    }

    #[tokio::test]
    async fn live_validation_tracks_edits() {
        let backend = Arc::new(FakeBackend::default());
        let mut detail = controller(backend);

        detail.title_input = "ab".to_string();
        detail.title_input_changed();
        assert!(detail.title_error.is_some());

        detail.title_input = "abc".to_string();
        detail.title_input_changed();
        assert!(detail.title_error.is_none());

        detail.content_input = "short".to_string();
        detail.content_input_changed();
        assert!(detail.content_error.is_some());

        detail.content_input = "long enough content".to_string();
        detail.content_input_changed();
        assert!(detail.content_error.is_none());
    }
}
