use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use super::models::{Post, Topic, TopicConnection, TopicSummary};
use super::operations::{
    CreatePostInput, CreateTopicInput, ListTopicsVariables, UpdatePostInput, CREATE_POST,
    CREATE_TOPIC, GET_TOPIC_WITH_POSTS, LIST_TOPICS_WITH_POST_COUNTS, UPDATE_POST,
};
use super::ForumBackend;
use crate::config::ApiConfig;
use crate::utils::error::{ForumEyeError, Result};

/// Response envelope shared by every GraphQL operation.
#[derive(Debug, Deserialize)]
struct GraphQlEnvelope {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<GraphQlErrorEntry>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlErrorEntry {
    message: String,
}

/// Client for the managed GraphQL endpoint.
///
/// Posts `{ query, variables }` bodies and unwraps the `data`/`errors`
/// envelope. No timeouts, retries, or request deduplication: a request that
/// never completes simply never resolves, matching the service contract the
/// views are written against.
pub struct GraphQlClient {
    endpoint: String,
    api_key: Option<String>,
    client: Client,
}

impl GraphQlClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: None,
            client: Client::new(),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn from_config(config: &ApiConfig) -> Self {
        let mut client = Self::new(config.endpoint.clone());
        if let Some(api_key) = &config.api_key {
            client = client.with_api_key(api_key.clone());
        }
        client
    }

    /// Send one document with its variables and return the `data` payload.
    async fn execute(&self, query: &str, variables: Value) -> Result<Value> {
        debug!("Executing GraphQL operation against {}", self.endpoint);

        let mut request = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(&json!({ "query": query, "variables": variables }));

        if let Some(api_key) = &self.api_key {
            request = request.header("x-api-key", api_key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ForumEyeError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: GraphQlEnvelope = response.json().await?;
        if let Some(errors) = envelope.errors {
            if !errors.is_empty() {
                let message = errors
                    .into_iter()
                    .map(|e| e.message)
                    .collect::<Vec<_>>()
                    .join("; ");
                return Err(ForumEyeError::GraphQl(message));
            }
        }

        envelope
            .data
            .ok_or_else(|| ForumEyeError::MalformedResponse("response carried no data".to_string()))
    }

    /// Pull one named field out of the `data` payload.
    fn field<T: DeserializeOwned>(data: Value, name: &str) -> Result<T> {
        let value = data
            .get(name)
            .cloned()
            .ok_or_else(|| ForumEyeError::MalformedResponse(format!("missing field `{}`", name)))?;
        serde_json::from_value(value).map_err(Into::into)
    }
}

#[async_trait]
impl ForumBackend for GraphQlClient {
    async fn list_topics(&self, variables: ListTopicsVariables) -> Result<TopicConnection> {
        let variables = serde_json::to_value(variables)?;
        let data = self.execute(LIST_TOPICS_WITH_POST_COUNTS, variables).await?;
        Self::field(data, "listTopics")
    }

    async fn get_topic(&self, id: &str) -> Result<Option<Topic>> {
        let data = self.execute(GET_TOPIC_WITH_POSTS, json!({ "id": id })).await?;
        Self::field(data, "getTopic")
    }

    async fn create_topic(&self, input: CreateTopicInput) -> Result<TopicSummary> {
        let data = self.execute(CREATE_TOPIC, json!({ "input": input })).await?;
        Self::field(data, "createTopic")
    }

    async fn create_post(&self, input: CreatePostInput) -> Result<Post> {
        let data = self.execute(CREATE_POST, json!({ "input": input })).await?;
        Self::field(data, "createPost")
    }

    async fn update_post_likes(&self, input: UpdatePostInput) -> Result<Post> {
        let data = self.execute(UPDATE_POST, json!({ "input": input })).await?;
        Self::field(data, "updatePost")
    }
}
