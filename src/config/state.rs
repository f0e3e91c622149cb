// Application state module
// Owns the activity registry and the configuration handlers read

use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

use super::types::Config;
use crate::registry::{self, Registry, SeedError};

/// Application state shared by every connection
pub struct AppState {
    pub config: Config,
    pub registry: Registry,
    /// Signalled once when the server should stop accepting connections
    pub shutdown_signal: Arc<Notify>,
    pub active_connections: Arc<AtomicUsize>,

    // Cached config value for lock-free access on the hot path
    pub cached_access_log: AtomicBool,
}

impl AppState {
    /// Build state around an existing registry
    pub fn new(config: Config, registry: Registry) -> Self {
        let cached_access_log = AtomicBool::new(config.logging.access_log);
        Self {
            config,
            registry,
            shutdown_signal: Arc::new(Notify::new()),
            active_connections: Arc::new(AtomicUsize::new(0)),
            cached_access_log,
        }
    }

    /// Build state from configuration, seeding the registry from
    /// `registry.seed_file` when set and from the built-in catalogue otherwise
    pub fn from_config(config: Config) -> Result<Self, SeedError> {
        let activities = match config.registry.seed_file.as_deref() {
            Some(path) => registry::load_seed_file(Path::new(path))?,
            None => registry::default_activities(),
        };
        let registry = Registry::new(activities, config.registry.enforce_capacity);
        Ok(Self::new(config, registry))
    }

    pub fn access_log_enabled(&self) -> bool {
        self.cached_access_log.load(Ordering::Relaxed)
    }

    pub fn set_access_log(&self, enabled: bool) {
        self.cached_access_log.store(enabled, Ordering::Relaxed);
    }
}
