use actix_web::{web, HttpResponse};

use crate::app_state::AppState;
use crate::error::Result;

/// GET /api/users/{username}
pub async fn get_user_profile(
    state: web::Data<AppState>,
    username: web::Path<String>,
) -> Result<HttpResponse> {
    let profile = state.users.get_profile(&username).await?;
    Ok(HttpResponse::Ok().json(profile))
}
