/// Data models for post-service
///
/// - Post: an image post with its likes and embedded comments
/// - Comment: append-only text owned by a post
/// - User: a username with a derived email, no credentials
///
/// Field names are camelCase on the wire.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub username: String,
    pub image_url: String,
    #[serde(default)]
    pub caption: String,
    pub likes: u64,
    pub liked_by: Vec<String>,
    pub timestamp: DateTime<Utc>,
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub username: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
}

/// A user together with the posts they authored, newest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(flatten)]
    pub user: User,
    pub posts: Vec<Post>,
    pub post_count: usize,
}

impl Post {
    /// A freshly created post: no likes, no comments
    pub fn new(
        username: impl Into<String>,
        image_url: impl Into<String>,
        caption: Option<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            username: username.into(),
            image_url: image_url.into(),
            caption: caption.unwrap_or_default(),
            likes: 0,
            liked_by: Vec::new(),
            timestamp,
            comments: Vec::new(),
        }
    }

    /// Like if `username` has not liked yet, unlike otherwise.
    /// Returns true when the post is liked afterwards.
    pub fn toggle_like(&mut self, username: &str) -> bool {
        let liked = match self.liked_by.iter().position(|u| u == username) {
            Some(index) => {
                self.liked_by.remove(index);
                false
            }
            None => {
                self.liked_by.push(username.to_string());
                true
            }
        };
        self.likes = self.liked_by.len() as u64;
        liked
    }

    pub fn is_liked_by(&self, username: &str) -> bool {
        self.liked_by.iter().any(|u| u == username)
    }
}

impl Comment {
    pub fn new(username: impl Into<String>, text: &str, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            username: username.into(),
            text: text.trim().to_string(),
            timestamp,
        }
    }
}

impl User {
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        let username = username.into();
        Self {
            id: id.into(),
            email: derived_email(&username),
            username,
        }
    }
}

/// Email shown for a username; there is no real address behind it
pub fn derived_email(username: &str) -> String {
    format!("{}@example.com", username)
}

/// Body of `POST /api/posts/{id}/like`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LikeRequest {
    #[validate(custom(function = "not_blank"))]
    #[serde(default)]
    pub username: String,
}

/// Body of `POST /api/posts/{id}/comments`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CommentRequest {
    #[validate(custom(function = "not_blank"))]
    #[serde(default)]
    pub username: String,
    #[validate(custom(function = "not_blank"))]
    #[serde(default)]
    pub text: String,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("blank"))
    } else {
        Ok(())
    }
}
