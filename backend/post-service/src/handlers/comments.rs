/// Comment handlers - HTTP endpoints for comment operations
use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::app_state::AppState;
use crate::error::Result;
use crate::models::CommentRequest;

/// Append a comment to a post
/// POST /api/posts/{id}/comments
pub async fn add_comment(
    state: web::Data<AppState>,
    post_id: web::Path<String>,
    req: web::Json<CommentRequest>,
) -> Result<HttpResponse> {
    req.validate()?;
    let comment = state
        .posts
        .add_comment(&post_id, &req.username, &req.text)
        .await?;

    Ok(HttpResponse::Created().json(comment))
}
