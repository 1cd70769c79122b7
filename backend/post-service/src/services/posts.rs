/// Post service - feed listing, post creation, likes and comments
use chrono::Utc;
use std::sync::Arc;

use super::uploads::{object_key, validate_upload, ImageUpload, ObjectStorage};
use crate::db::{PostMutation, PostStore};
use crate::error::{AppError, Result};
use crate::models::{Comment, Post};

/// Input of a post creation, as decoded from the multipart form
#[derive(Debug, Default)]
pub struct NewPost {
    pub username: Option<String>,
    pub caption: Option<String>,
    pub image: Option<ImageUpload>,
}

#[derive(Clone)]
pub struct PostService {
    store: Arc<dyn PostStore>,
    storage: Arc<dyn ObjectStorage>,
    max_upload_bytes: usize,
}

impl PostService {
    pub fn new(
        store: Arc<dyn PostStore>,
        storage: Arc<dyn ObjectStorage>,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            store,
            storage,
            max_upload_bytes,
        }
    }

    /// All posts, newest first
    pub async fn list_posts(&self) -> Result<Vec<Post>> {
        self.store.list().await
    }

    /// Validate the request, store the image, then record the post.
    /// Nothing is uploaded or stored when validation fails.
    pub async fn create_post(&self, new_post: NewPost) -> Result<Post> {
        let image = new_post
            .image
            .ok_or_else(|| AppError::validation("No image file provided"))?;

        let username = new_post
            .username
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .ok_or_else(|| AppError::validation("Username is required"))?;

        let content_type = validate_upload(&image, self.max_upload_bytes)?;
        let key = object_key(&image.file_name);
        let size = image.bytes.len();

        let image_url = self
            .storage
            .put_object(&key, image.bytes, content_type.as_ref())
            .await
            .map_err(|e| AppError::storage("Failed to create post", e))?;

        let caption = new_post.caption.filter(|c| !c.trim().is_empty());
        let post = self
            .store
            .insert(Post::new(username, image_url, caption, Utc::now()))
            .await?;

        tracing::info!(
            post_id = %post.id,
            username = %post.username,
            key = %key,
            size,
            "Post created"
        );

        Ok(post)
    }

    /// Like or unlike; returns the updated post
    pub async fn toggle_like(&self, post_id: &str, username: &str) -> Result<Post> {
        let username = required_username(username)?;
        let post = self
            .store
            .update(
                post_id,
                PostMutation::ToggleLike {
                    username: username.to_string(),
                },
            )
            .await?
            .ok_or_else(AppError::post_not_found)?;

        tracing::debug!(
            post_id,
            username,
            likes = post.likes,
            liked = post.is_liked_by(username),
            "Like toggled"
        );

        Ok(post)
    }

    /// Append a comment; returns the created comment
    pub async fn add_comment(&self, post_id: &str, username: &str, text: &str) -> Result<Comment> {
        let username = required_username(username)?;
        if text.trim().is_empty() {
            return Err(AppError::validation("Text is required"));
        }

        let comment = Comment::new(username, text, Utc::now());
        self.store
            .update(post_id, PostMutation::AppendComment(comment.clone()))
            .await?
            .ok_or_else(AppError::post_not_found)?;

        tracing::debug!(post_id, comment_id = %comment.id, "Comment added");

        Ok(comment)
    }
}

fn required_username(username: &str) -> Result<&str> {
    let username = username.trim();
    if username.is_empty() {
        return Err(AppError::validation("Username is required"));
    }
    Ok(username)
}
