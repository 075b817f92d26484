//! The fixed set of GraphQL documents this client sends. These are request
//! shapes only; every document is posted verbatim with its variables.

use serde::Serialize;

/// Topic list with an id-only posts sub-selection, enough for counts.
pub const LIST_TOPICS_WITH_POST_COUNTS: &str = r#"
    query ListTopics(
        $filter: ModelTopicFilterInput
        $limit: Int
        $nextToken: String
    ) {
        listTopics(filter: $filter, limit: $limit, nextToken: $nextToken) {
            items {
                id
                title
                posts {
                    items {
                        id
                    }
                }
                createdAt
                updatedAt
            }
            nextToken
        }
    }
"#;

/// One topic with its full post collection, including each author's account.
pub const GET_TOPIC_WITH_POSTS: &str = r#"
    query GetTopic($id: ID!) {
        getTopic(id: $id) {
            id
            title
            posts {
                items {
                    id
                    title
                    content
                    likes
                    createdByID
                    createdBy {
                        id
                        username
                        email
                    }
                    topicID
                    createdAt
                    updatedAt
                }
                nextToken
            }
            createdAt
            updatedAt
        }
    }
"#;

pub const CREATE_TOPIC: &str = r#"
    mutation CreateTopic($input: CreateTopicInput!) {
        createTopic(input: $input) {
            id
            title
            createdAt
            updatedAt
        }
    }
"#;

pub const CREATE_POST: &str = r#"
    mutation CreatePost($input: CreatePostInput!) {
        createPost(input: $input) {
            id
            title
            content
            likes
            createdByID
            topicID
            createdAt
            updatedAt
        }
    }
"#;

pub const UPDATE_POST: &str = r#"
    mutation UpdatePost($input: UpdatePostInput!) {
        updatePost(input: $input) {
            id
            title
            content
            likes
            createdByID
            topicID
            createdAt
            updatedAt
        }
    }
"#;

/// Variables for the topic list query. The filter is an opaque pass-through;
/// this client never constructs one itself.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTopicsVariables {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateTopicInput {
    pub title: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatePostInput {
    pub title: String,
    pub content: String,
    pub likes: u32,
    #[serde(rename = "createdByID")]
    pub created_by_id: String,
    #[serde(rename = "topicID")]
    pub topic_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdatePostInput {
    pub id: String,
    pub likes: u32,
}
