use reqwest::multipart::{Form, Part};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use urlencoding::encode;

use crate::models::{Comment, CommentRequest, LikeRequest, Post, UserProfile};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx answer; `message` comes from the JSON error body
    #[error("API error ({status}): {message}")]
    Api { status: StatusCode, message: String },
}

/// Typed client for the post-service REST API
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn list_posts(&self) -> Result<Vec<Post>, ClientError> {
        let resp = self.http.get(self.url("posts")).send().await?;
        decode(resp).await
    }

    pub async fn create_post(
        &self,
        username: &str,
        caption: Option<&str>,
        file_name: &str,
        content_type: &str,
        image: Vec<u8>,
    ) -> Result<Post, ClientError> {
        let part = Part::bytes(image)
            .file_name(file_name.to_string())
            .mime_str(content_type)?;
        let mut form = Form::new()
            .text("username", username.to_string())
            .part("image", part);
        if let Some(caption) = caption {
            form = form.text("caption", caption.to_string());
        }

        let resp = self
            .http
            .post(self.url("posts"))
            .multipart(form)
            .send()
            .await?;
        decode(resp).await
    }

    pub async fn toggle_like(&self, post_id: &str, username: &str) -> Result<Post, ClientError> {
        let body = LikeRequest {
            username: username.to_string(),
        };
        let resp = self
            .http
            .post(self.url(&format!("posts/{}/like", encode(post_id))))
            .json(&body)
            .send()
            .await?;
        decode(resp).await
    }

    pub async fn add_comment(
        &self,
        post_id: &str,
        username: &str,
        text: &str,
    ) -> Result<Comment, ClientError> {
        let body = CommentRequest {
            username: username.to_string(),
            text: text.trim().to_string(),
        };
        let resp = self
            .http
            .post(self.url(&format!("posts/{}/comments", encode(post_id))))
            .json(&body)
            .send()
            .await?;
        decode(resp).await
    }

    pub async fn user_profile(&self, username: &str) -> Result<UserProfile, ClientError> {
        let resp = self
            .http
            .get(self.url(&format!("users/{}", encode(username))))
            .send()
            .await?;
        decode(resp).await
    }

    /// True when `/api/health` answers 2xx
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self.http.get(self.url("health")).send().await?;
        Ok(resp.status().is_success())
    }
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp.json::<T>().await?);
    }

    let message = resp
        .json::<serde_json::Value>()
        .await
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string());

    Err(ClientError::Api { status, message })
}
