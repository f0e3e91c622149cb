//! Request handler module
//!
//! Request routing dispatch, the activities API, and static file serving
//! for the bundled front-end.

pub mod activities;
pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
