//! Activities API handlers
//!
//! Maps `/activities` routes onto registry operations and renders the
//! outcome as JSON.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

use crate::config::AppState;
use crate::http::{self, query};
use crate::logger;
use crate::registry::RegistryError;

const EMAIL_PARAM: &str = "email";

/// Which registry mutation a signup route performs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupAction {
    Enroll,
    Withdraw,
}

/// `GET /activities`
pub async fn list_activities(state: &AppState) -> Response<Full<Bytes>> {
    let activities = state.registry.list().await;
    http::build_json_response(StatusCode::OK, &activities)
}

/// `POST|DELETE /activities/{name}/signup?email=...`
///
/// `raw_name` is the still percent-encoded path segment.
pub async fn handle_signup(
    state: &AppState,
    action: SignupAction,
    raw_name: &str,
    query_string: Option<&str>,
) -> Response<Full<Bytes>> {
    let email = match query::query_param(query_string, EMAIL_PARAM) {
        Some(email) if !email.is_empty() => email,
        _ => return http::build_422_response(EMAIL_PARAM),
    };

    // A name that does not decode cannot be a registry key
    let Some(activity_name) = query::decode_path_segment(raw_name) else {
        return error_response(&RegistryError::NotFound);
    };

    let result = match action {
        SignupAction::Enroll => state.registry.enroll(&activity_name, &email).await,
        SignupAction::Withdraw => state.registry.withdraw(&activity_name, &email).await,
    };

    match result {
        Ok(message) => http::build_message_response(&message),
        Err(err) => {
            logger::log_debug(&format!(
                "[Registry] {action:?} rejected for {email} in '{activity_name}': {err}"
            ));
            error_response(&err)
        }
    }
}

fn error_response(err: &RegistryError) -> Response<Full<Bytes>> {
    http::build_detail_response(err.status_code(), &err.to_string())
}
