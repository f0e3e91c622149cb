//! HTTP response building module
//!
//! Builders for the JSON, redirect, and static file responses the server sends.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::ALLOW;
use hyper::{Response, StatusCode};
use serde::Serialize;
use serde_json::json;

/// Methods accepted on `/activities/{name}/signup`
pub const SIGNUP_ALLOW: &str = "POST, DELETE, OPTIONS";
/// Methods accepted on read-only resources
pub const READ_ALLOW: &str = "GET, HEAD, OPTIONS";

/// Build a JSON response from any serializable body
pub fn build_json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<Full<Bytes>> {
    let json = match serde_json::to_vec(body) {
        Ok(j) => j,
        Err(e) => {
            crate::logger::log_error(&format!("Failed to serialize response: {e}"));
            return build_detail_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error",
            );
        }
    };

    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Content-Length", json.len())
        .body(Full::new(Bytes::from(json)))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// `{"message": ...}` success body
pub fn build_message_response(message: &str) -> Response<Full<Bytes>> {
    build_json_response(StatusCode::OK, &json!({ "message": message }))
}

/// `{"detail": ...}` error body
pub fn build_detail_response(status: StatusCode, detail: &str) -> Response<Full<Bytes>> {
    let body = json!({ "detail": detail }).to_string();
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Content-Length", body.len())
        .body(Full::new(Bytes::from(body)))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(Full::new(Bytes::new()))
        })
}

pub fn build_404_response() -> Response<Full<Bytes>> {
    build_detail_response(StatusCode::NOT_FOUND, "Not Found")
}

/// Build 405 Method Not Allowed response
pub fn build_405_response(allow: &str) -> Response<Full<Bytes>> {
    let mut response = build_detail_response(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed");
    if let Ok(value) = allow.parse() {
        response.headers_mut().insert(ALLOW, value);
    }
    response
}

pub fn build_413_response() -> Response<Full<Bytes>> {
    build_detail_response(StatusCode::PAYLOAD_TOO_LARGE, "Request body too large")
}

/// Build 422 response for a missing or empty query parameter
pub fn build_422_response(param: &str) -> Response<Full<Bytes>> {
    build_detail_response(
        StatusCode::UNPROCESSABLE_ENTITY,
        &format!("Missing required query parameter: {param}"),
    )
}

/// Build OPTIONS response (preflight request)
pub fn build_options_response(allow: &str, enable_cors: bool) -> Response<Full<Bytes>> {
    let mut builder = Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header("Allow", allow);

    if enable_cors {
        builder = builder
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", allow)
            .header("Access-Control-Allow-Headers", "Content-Type")
            .header("Access-Control-Max-Age", "86400");
    }

    builder.body(Full::new(Bytes::new())).unwrap_or_else(|e| {
        log_build_error("OPTIONS", &e);
        Response::new(Full::new(Bytes::new()))
    })
}

/// Build 307 Temporary Redirect response
pub fn build_redirect_response(target: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::TEMPORARY_REDIRECT)
        .header("Location", target)
        .header("Content-Length", 0)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("307", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

pub fn build_health_response(status: &str) -> Response<Full<Bytes>> {
    build_json_response(StatusCode::OK, &json!({ "status": status }))
}

/// Build 304 Not Modified response
pub fn build_304_response(etag: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::NOT_MODIFIED)
        .header("ETag", etag)
        .header("Cache-Control", "no-cache")
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("304", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build static file response; the front-end must revalidate on every load
pub fn build_file_response(data: Vec<u8>, content_type: &str, etag: &str) -> Response<Full<Bytes>> {
    let content_length = data.len();

    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .header("ETag", etag)
        .header("Cache-Control", "no-cache")
        .body(Full::new(Bytes::from(data)))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect() {
        let resp = build_redirect_response("/static/index.html");
        assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(resp.headers()["location"], "/static/index.html");
    }

    #[test]
    fn test_405_has_allow() {
        let resp = build_405_response(SIGNUP_ALLOW);
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(resp.headers()["allow"], SIGNUP_ALLOW);
    }

    #[test]
    fn test_options_cors() {
        let resp = build_options_response(READ_ALLOW, true);
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert_eq!(resp.headers()["access-control-allow-origin"], "*");

        let resp = build_options_response(READ_ALLOW, false);
        assert!(resp.headers().get("access-control-allow-origin").is_none());
    }

    #[test]
    fn test_file_response_headers() {
        let resp = build_file_response(b"<html></html>".to_vec(), "text/html", "\"1\"");
        assert_eq!(resp.headers()["content-length"], "13");
        assert_eq!(resp.headers()["etag"], "\"1\"");
    }
}
