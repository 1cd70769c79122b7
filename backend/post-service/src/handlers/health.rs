use actix_web::HttpResponse;

/// GET /api/health
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "OK",
        "message": "Picfeed API is running",
        "service": "post-service",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
