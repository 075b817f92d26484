pub mod client;
pub mod models;
pub mod operations;

use async_trait::async_trait;

use crate::utils::error::Result;

pub use client::GraphQlClient;
pub use models::{Post, Topic, TopicConnection, TopicSummary, User};
pub use operations::{CreatePostInput, CreateTopicInput, ListTopicsVariables, UpdatePostInput};

/// The discussion-board service as the views see it.
///
/// Both view controllers receive this as an injected collaborator, so tests
/// can substitute a fake while production wires in [`GraphQlClient`].
#[async_trait]
pub trait ForumBackend: Send + Sync {
    /// Fetch the topic collection with id-only post sub-collections.
    async fn list_topics(&self, variables: ListTopicsVariables) -> Result<TopicConnection>;

    /// Fetch one topic with its full post list. An unknown id is `Ok(None)`,
    /// not an error: the backend returns a null entity for a miss.
    async fn get_topic(&self, id: &str) -> Result<Option<Topic>>;

    async fn create_topic(&self, input: CreateTopicInput) -> Result<TopicSummary>;

    async fn create_post(&self, input: CreatePostInput) -> Result<Post>;

    async fn update_post_likes(&self, input: UpdatePostInput) -> Result<Post>;
}
