use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A discussion topic as returned by the list query. Carries only post ids,
/// enough to show a count without loading post bodies.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicSummary {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub posts: PostRefConnection,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TopicSummary {
    pub fn post_count(&self) -> usize {
        self.posts.items.len()
    }
}

/// A topic with its full post collection, as returned by the detail query.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: String,
    pub title: String,
    pub posts: PostConnection,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    pub content: String,
    /// The backend may omit the like count on older rows; absent counts as 0.
    #[serde(default)]
    pub likes: Option<u32>,
    #[serde(rename = "createdByID")]
    pub created_by_id: String,
    #[serde(default)]
    pub created_by: Option<User>,
    #[serde(rename = "topicID")]
    pub topic_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn like_count(&self) -> u32 {
        self.likes.unwrap_or(0)
    }

    pub fn author_name(&self) -> &str {
        self.created_by
            .as_ref()
            .map(|user| user.username.as_str())
            .unwrap_or("Anonymous")
    }
}

/// Read-only account data supplied by the external identity service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
}

/// Connection envelope for the topic list query.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicConnection {
    pub items: Vec<TopicSummary>,
    #[serde(default)]
    pub next_token: Option<String>,
}

/// Connection envelope for a topic's posts in the detail query.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostConnection {
    pub items: Vec<Post>,
    #[serde(default)]
    pub next_token: Option<String>,
}

/// Id-only posts sub-collection used by the list query for counts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRefConnection {
    pub items: Vec<PostRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostRef {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_summary_counts_posts() {
        let json = serde_json::json!({
            "id": "t-1",
            "title": "Rust",
            "posts": {
                "items": [{"id": "p-1", "__typename": "Post"}, {"id": "p-2"}],
                "__typename": "ModelPostConnection"
            },
            "createdAt": "2024-01-05T12:00:00.000Z",
            "updatedAt": "2024-01-05T12:00:00.000Z",
            "__typename": "Topic"
        });
        let topic: TopicSummary = serde_json::from_value(json).unwrap();
        assert_eq!(topic.post_count(), 2);
    }

    #[test]
    fn topic_summary_missing_posts_counts_zero() {
        let json = serde_json::json!({
            "id": "t-2",
            "title": "Empty",
            "createdAt": "2024-01-05T12:00:00.000Z",
            "updatedAt": "2024-01-05T12:00:00.000Z"
        });
        let topic: TopicSummary = serde_json::from_value(json).unwrap();
        assert_eq!(topic.post_count(), 0);
    }

    #[test]
    fn post_defaults_for_absent_fields() {
        let json = serde_json::json!({
            "id": "p-1",
            "title": "Hello",
            "content": "First post in this topic",
            "likes": null,
            "createdByID": "u-1",
            "createdBy": null,
            "topicID": "t-1",
            "createdAt": "2024-01-05T12:00:00.000Z",
            "updatedAt": "2024-01-05T12:00:00.000Z"
        });
        let post: Post = serde_json::from_value(json).unwrap();
        assert_eq!(post.like_count(), 0);
        assert_eq!(post.author_name(), "Anonymous");
    }

    #[test]
    fn post_author_username_is_used() {
        let json = serde_json::json!({
            "id": "p-1",
            "title": "Hello",
            "content": "First post in this topic",
            "likes": 3,
            "createdByID": "u-1",
            "createdBy": {"id": "u-1", "username": "ada", "email": "ada@example.com"},
            "topicID": "t-1",
            "createdAt": "2024-01-05T12:00:00.000Z",
            "updatedAt": "2024-01-05T12:00:00.000Z"
        });
        let post: Post = serde_json::from_value(json).unwrap();
        assert_eq!(post.like_count(), 3);
        assert_eq!(post.author_name(), "ada");
    }
}
