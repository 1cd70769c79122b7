/// Client build serving and single-page-application fallback
use actix_web::http::Method;
use actix_web::{web, HttpRequest, HttpResponse};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use crate::services::MemoryObjectStorage;

/// Directory holding the built client (`index.html` plus assets)
#[derive(Debug, Clone)]
pub struct StaticFiles {
    pub dir: PathBuf,
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "Not found",
        "status": 404,
    }))
}

fn content_type_for(path: &Path) -> mime::Mime {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("html") | Some("htm") => mime::TEXT_HTML_UTF_8,
        Some("js") => mime::APPLICATION_JAVASCRIPT_UTF_8,
        Some("css") => mime::TEXT_CSS_UTF_8,
        Some("json") | Some("map") => mime::APPLICATION_JSON,
        Some("png") => mime::IMAGE_PNG,
        Some("jpg") | Some("jpeg") => mime::IMAGE_JPEG,
        Some("gif") => mime::IMAGE_GIF,
        Some("svg") => mime::IMAGE_SVG,
        Some("txt") => mime::TEXT_PLAIN_UTF_8,
        _ => mime::APPLICATION_OCTET_STREAM,
    }
}

/// Map a request path to a file under `root`, refusing anything that
/// would escape it
fn resolve(root: &Path, request_path: &str) -> Option<PathBuf> {
    let relative = Path::new(request_path.trim_start_matches('/'));
    if relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return None;
    }
    Some(root.join(relative))
}

async fn serve_file(path: &Path) -> Option<HttpResponse> {
    let metadata = tokio::fs::metadata(path).await.ok()?;
    if !metadata.is_file() {
        return None;
    }
    match tokio::fs::read(path).await {
        Ok(bytes) => Some(
            HttpResponse::Ok()
                .content_type(content_type_for(path))
                .body(bytes),
        ),
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "Failed to read static file");
            None
        }
    }
}

/// Default service: existing client files are served as-is, every other
/// GET falls back to `index.html` so client-side routes resolve.
pub async fn spa_fallback(req: HttpRequest, files: web::Data<StaticFiles>) -> HttpResponse {
    if req.method() != Method::GET && req.method() != Method::HEAD {
        return not_found();
    }

    let path = req.path();
    if path == "/api" || path.starts_with("/api/") {
        return not_found();
    }

    if let Some(candidate) = resolve(&files.dir, path) {
        if candidate != files.dir {
            if let Some(response) = serve_file(&candidate).await {
                return response;
            }
        }
    }

    match serve_file(&files.dir.join("index.html")).await {
        Some(response) => response,
        None => {
            tracing::warn!(dir = %files.dir.display(), "Client build not found");
            not_found()
        }
    }
}

/// Images held by the in-memory storage backend
/// GET /uploads/{key}
pub async fn serve_upload(
    storage: web::Data<Arc<MemoryObjectStorage>>,
    key: web::Path<String>,
) -> HttpResponse {
    match storage.get(&key).await {
        Some(object) => HttpResponse::Ok()
            .content_type(object.content_type)
            .body(object.bytes),
        None => not_found(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_rejects_traversal() {
        let root = Path::new("/srv/client");
        assert!(resolve(root, "/../etc/passwd").is_none());
        assert!(resolve(root, "/static/../../x").is_none());
        assert_eq!(
            resolve(root, "/static/js/main.js"),
            Some(PathBuf::from("/srv/client/static/js/main.js"))
        );
    }

    #[test]
    fn content_types() {
        assert_eq!(content_type_for(Path::new("index.html")), mime::TEXT_HTML_UTF_8);
        assert_eq!(content_type_for(Path::new("a.PNG")), mime::IMAGE_PNG);
        assert_eq!(
            content_type_for(Path::new("blob")),
            mime::APPLICATION_OCTET_STREAM
        );
    }
}
