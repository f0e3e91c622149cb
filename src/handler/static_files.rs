//! Static file serving module
//!
//! Serves the bundled front-end from the configured static directory.

use crate::config::RoutesConfig;
use crate::handler::router::RequestContext;
use crate::http::{self, cache, mime, query};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Serve a file below `routes.static_prefix`
pub async fn serve_static(ctx: &RequestContext<'_>, routes: &RoutesConfig) -> Response<Full<Bytes>> {
    let relative = ctx
        .path
        .strip_prefix(routes.static_prefix.trim_end_matches('/'))
        .unwrap_or(ctx.path);

    let Some(relative) = query::decode_path_segment(relative) else {
        return http::build_404_response();
    };

    match load_from_directory(&routes.static_dir, &relative, &routes.index_files).await {
        Some((content, content_type)) => {
            let etag = cache::generate_etag(&content);
            if cache::check_etag_match(ctx.if_none_match.as_deref(), &etag) {
                return http::build_304_response(&etag);
            }
            http::build_file_response(content, content_type, &etag)
        }
        None => http::build_404_response(),
    }
}

/// Load a file from `static_dir`, resolving directories to index files
///
/// Paths that resolve outside `static_dir` are rejected.
pub async fn load_from_directory(
    static_dir: &str,
    relative_path: &str,
    index_files: &[String],
) -> Option<(Vec<u8>, &'static str)> {
    let static_dir_canonical = match Path::new(static_dir).canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Static directory not found or inaccessible '{static_dir}': {e}"
            ));
            return None;
        }
    };

    let mut file_path = static_dir_canonical.join(relative_path.trim_start_matches('/'));
    if file_path.is_dir() {
        file_path = find_index_file(&file_path, index_files)?;
    }

    // Missing files are an ordinary 404
    let file_path_canonical = file_path.canonicalize().ok()?;
    if !file_path_canonical.starts_with(&static_dir_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {relative_path} -> {}",
            file_path_canonical.display()
        ));
        return None;
    }

    let content = match fs::read(&file_path_canonical).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {e}",
                file_path_canonical.display()
            ));
            return None;
        }
    };

    let content_type =
        mime::get_content_type(file_path_canonical.extension().and_then(|e| e.to_str()));
    Some((content, content_type))
}

fn find_index_file(dir: &Path, index_files: &[String]) -> Option<PathBuf> {
    index_files
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "mergington-static-{name}-{}",
            std::process::id()
        ));
        std::fs::create_dir_all(dir.join("public/css")).unwrap();
        std::fs::write(dir.join("public/index.html"), "<h1>hi</h1>").unwrap();
        std::fs::write(dir.join("public/css/app.css"), "body {}").unwrap();
        std::fs::write(dir.join("secret.txt"), "nope").unwrap();
        dir
    }

    #[tokio::test]
    async fn test_load_file_and_index() {
        let dir = fixture_dir("load");
        let public = dir.join("public").to_string_lossy().to_string();
        let index = vec!["index.html".to_string()];

        let (content, content_type) = load_from_directory(&public, "/css/app.css", &index)
            .await
            .unwrap();
        assert_eq!(content, b"body {}");
        assert_eq!(content_type, "text/css; charset=utf-8");

        let (content, content_type) = load_from_directory(&public, "/", &index).await.unwrap();
        assert_eq!(content, b"<h1>hi</h1>");
        assert_eq!(content_type, "text/html; charset=utf-8");

        assert!(load_from_directory(&public, "/missing.js", &index).await.is_none());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_traversal_blocked() {
        let dir = fixture_dir("traversal");
        let public = dir.join("public").to_string_lossy().to_string();
        let index = vec!["index.html".to_string()];

        assert!(load_from_directory(&public, "/../secret.txt", &index).await.is_none());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_missing_static_dir() {
        assert!(load_from_directory("no/such/dir", "/index.html", &[]).await.is_none());
    }
}
