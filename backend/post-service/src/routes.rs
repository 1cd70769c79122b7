/// Route table shared by the binary and the HTTP tests
use actix_web::{error::JsonPayloadError, web, HttpRequest};

use crate::error::AppError;
use crate::handlers;

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(error = %err, "Rejected JSON body");
    AppError::validation(format!("Invalid JSON body: {}", err)).into()
}

/// Register the `/api` scope. The SPA fallback is installed separately as
/// the app's default service.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(
            web::scope("/api")
                .route("/health", web::get().to(handlers::health_check))
                .service(
                    web::resource("/posts")
                        .route(web::get().to(handlers::list_posts))
                        .route(web::post().to(handlers::create_post)),
                )
                .route("/posts/{id}/like", web::post().to(handlers::toggle_like))
                .route(
                    "/posts/{id}/comments",
                    web::post().to(handlers::add_comment),
                )
                .route(
                    "/users/{username}",
                    web::get().to(handlers::get_user_profile),
                ),
        );
}

/// Serve objects of the in-memory storage backend
pub fn configure_uploads(cfg: &mut web::ServiceConfig) {
    cfg.route("/uploads/{key:.*}", web::get().to(handlers::serve_upload));
}
