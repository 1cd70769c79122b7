/// Post handlers - HTTP endpoints for feed, post creation and likes
use actix_multipart::{Field, Multipart};
use actix_web::{web, HttpResponse};
use futures_util::StreamExt;

use crate::app_state::AppState;
use crate::error::{AppError, Result};
use crate::models::LikeRequest;
use crate::services::uploads::too_large_error;
use crate::services::{ImageUpload, NewPost};
use validator::Validate;

/// Cap on non-file form fields (username, caption)
const MAX_TEXT_FIELD_BYTES: usize = 64 * 1024;

/// List all posts, newest first
/// GET /api/posts
pub async fn list_posts(state: web::Data<AppState>) -> Result<HttpResponse> {
    let posts = state.posts.list_posts().await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// Create a post from a multipart form with `image`, `username`, `caption`
/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    mut payload: Multipart,
) -> Result<HttpResponse> {
    let max_bytes = state.upload.max_bytes;
    let mut new_post = NewPost::default();

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| {
            tracing::warn!(error = %e, "Malformed multipart payload");
            AppError::validation("Malformed multipart payload")
        })?;

        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "image" => {
                let file_name = field
                    .content_disposition()
                    .and_then(|cd| cd.get_filename())
                    .unwrap_or_default()
                    .to_string();
                let content_type = field.content_type().map(|m| m.to_string());
                let bytes = read_field(&mut field, max_bytes)
                    .await?
                    .ok_or_else(|| too_large_error(max_bytes))?;

                // an empty file input still sends a part
                if !file_name.is_empty() || !bytes.is_empty() {
                    new_post.image = Some(ImageUpload {
                        file_name,
                        content_type,
                        bytes,
                    });
                }
            }
            "username" => new_post.username = Some(read_text(&mut field).await?),
            "caption" => new_post.caption = Some(read_text(&mut field).await?),
            other => {
                tracing::debug!(field = other, "Ignoring unknown form field");
                read_field(&mut field, max_bytes).await?;
            }
        }
    }

    let post = state.posts.create_post(new_post).await?;
    Ok(HttpResponse::Created().json(post))
}

/// Toggle the caller's like on a post
/// POST /api/posts/{id}/like
pub async fn toggle_like(
    state: web::Data<AppState>,
    post_id: web::Path<String>,
    req: web::Json<LikeRequest>,
) -> Result<HttpResponse> {
    req.validate()?;
    let post = state.posts.toggle_like(&post_id, &req.username).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// Buffer a field, `None` when it exceeds `limit` bytes
async fn read_field(field: &mut Field, limit: usize) -> Result<Option<Vec<u8>>> {
    let mut buf = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(|e| {
            tracing::warn!(error = %e, "Error reading upload field");
            AppError::validation("Malformed multipart payload")
        })?;
        if buf.len() + chunk.len() > limit {
            return Ok(None);
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(Some(buf))
}

async fn read_text(field: &mut Field) -> Result<String> {
    let bytes = read_field(field, MAX_TEXT_FIELD_BYTES)
        .await?
        .ok_or_else(|| AppError::validation("Form field too large"))?;
    String::from_utf8(bytes).map_err(|_| AppError::validation("Form fields must be UTF-8"))
}
