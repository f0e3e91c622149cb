//! HTTP protocol layer module
//!
//! Protocol helpers shared by the request handlers: response builders,
//! request target decoding, MIME detection, and cache validation.

pub mod cache;
pub mod mime;
pub mod query;
pub mod response;

pub use response::{
    build_304_response, build_404_response, build_405_response, build_413_response,
    build_422_response, build_detail_response, build_file_response, build_health_response,
    build_json_response, build_message_response, build_options_response,
    build_redirect_response,
};
