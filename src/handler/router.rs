//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: size checks, route matching,
//! method validation, dispatch, and access logging.

use crate::config::{AppState, RoutesConfig};
use crate::handler::activities::{self, SignupAction};
use crate::handler::static_files;
use crate::http::{self, query, response::READ_ALLOW, response::SIGNUP_ALLOW};
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderValue, SERVER};
use hyper::http::request::Parts;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

const ACTIVITIES_PATH: &str = "/activities";
const SIGNUP_PREFIX: &str = "/activities/";
const SIGNUP_SUFFIX: &str = "/signup";

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    pub method: &'a Method,
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub if_none_match: Option<String>,
}

/// Main entry point for HTTP request handling
///
/// Generic over the body type: no route reads the request body, so it is
/// dropped before any await point.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let (req, body) = req.into_parts();
    drop(body);
    let is_head = req.method == Method::HEAD;

    let mut response = match check_body_size(&req, state.config.http.max_body_size) {
        Some(resp) => resp,
        None => {
            let ctx = RequestContext {
                method: &req.method,
                path: req.uri.path(),
                query: req.uri.query(),
                if_none_match: header_string(&req, "if-none-match"),
            };
            route_request(&ctx, &state).await
        }
    };

    if let Ok(server) = HeaderValue::from_str(&state.config.http.server_name) {
        response.headers_mut().insert(SERVER, server);
    }
    if is_head {
        *response.body_mut() = Full::new(Bytes::new());
    }

    if state.access_log_enabled() {
        log_access(&req, &response, peer_addr, started, &state);
    }
    Ok(response)
}

/// Route request based on path and method
async fn route_request(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    let routes = &state.config.routes;

    if let Some(raw_name) = query::match_resource(ctx.path, SIGNUP_PREFIX, SIGNUP_SUFFIX) {
        return match *ctx.method {
            Method::POST => {
                activities::handle_signup(state, SignupAction::Enroll, raw_name, ctx.query).await
            }
            Method::DELETE => {
                activities::handle_signup(state, SignupAction::Withdraw, raw_name, ctx.query).await
            }
            Method::OPTIONS => options_response(state, SIGNUP_ALLOW),
            _ => method_not_allowed(ctx, SIGNUP_ALLOW),
        };
    }

    // Everything else is read-only
    match *ctx.method {
        Method::GET | Method::HEAD => {}
        Method::OPTIONS => return options_response(state, READ_ALLOW),
        _ => {
            return if is_known_read_path(ctx.path, routes) {
                method_not_allowed(ctx, READ_ALLOW)
            } else {
                http::build_404_response()
            };
        }
    }

    if routes.health.enabled
        && (ctx.path == routes.health.liveness_path || ctx.path == routes.health.readiness_path)
    {
        return http::build_health_response("ok");
    }

    if ctx.path == "/" {
        return http::build_redirect_response(&routes.index_redirect);
    }

    if ctx.path == ACTIVITIES_PATH {
        return activities::list_activities(state).await;
    }

    if is_static_path(ctx.path, routes) {
        return static_files::serve_static(ctx, routes).await;
    }

    http::build_404_response()
}

fn is_known_read_path(path: &str, routes: &RoutesConfig) -> bool {
    path == "/" || path == ACTIVITIES_PATH || is_static_path(path, routes)
}

fn is_static_path(path: &str, routes: &RoutesConfig) -> bool {
    let prefix = routes.static_prefix.trim_end_matches('/');
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

fn options_response(state: &AppState, allow: &str) -> Response<Full<Bytes>> {
    http::build_options_response(allow, state.config.http.enable_cors)
}

fn method_not_allowed(ctx: &RequestContext<'_>, allow: &str) -> Response<Full<Bytes>> {
    logger::log_warning(&format!("Method not allowed: {} {}", ctx.method, ctx.path));
    http::build_405_response(allow)
}

/// Return 413 when the declared `Content-Length` exceeds the limit
fn check_body_size(req: &Parts, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let size_str = header_string(req, "content-length")?;
    match size_str.parse::<u64>() {
        Ok(size) if size > max_body_size => {
            logger::log_warning(&format!(
                "Request body too large: {size} bytes (max: {max_body_size})"
            ));
            Some(http::build_413_response())
        }
        Ok(_) => None,
        Err(_) => {
            logger::log_warning(&format!(
                "Invalid Content-Length value: '{size_str}', skipping size check"
            ));
            None
        }
    }
}

fn header_string(req: &Parts, name: &str) -> Option<String> {
    req.headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

fn log_access(
    req: &Parts,
    response: &Response<Full<Bytes>>,
    peer_addr: SocketAddr,
    started: Instant,
    state: &AppState,
) {
    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method.to_string(),
        req.uri.path().to_string(),
    );
    entry.query = req.uri.query().map(ToString::to_string);
    entry.http_version = format!("{:?}", req.version)
        .trim_start_matches("HTTP/")
        .to_string();
    entry.status = response.status().as_u16();
    entry.body_bytes = response
        .headers()
        .get("content-length")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);
    entry.user_agent = header_string(req, "user-agent");
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);

    logger::log_access(&entry, &state.config.logging.access_log_format);
}
