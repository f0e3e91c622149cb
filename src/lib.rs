//! Mergington High School activities service
//!
//! An HTTP backend to list extracurricular activities and sign students up
//! for them, backed by an in-memory registry.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod registry;
pub mod server;
