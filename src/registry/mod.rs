//! Activity registry module
//!
//! In-memory store of activities and their participants:
//! - `list` returns an owned snapshot of every activity
//! - `enroll` / `withdraw` validate and mutate one activity's participants
//!
//! All mutations run under a single write lock, so a membership check and
//! the change it guards are never interleaved with another request.

mod activity;
mod error;
mod seed;

pub use activity::Activity;
pub use error::{RegistryError, SeedError};
pub use seed::{default_activities, load_seed_file, parse_seed};

use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::logger;

/// Snapshot of all activities keyed by name
pub type ActivityMap = BTreeMap<String, Activity>;

/// Shared activity store
pub struct Registry {
    activities: RwLock<ActivityMap>,
    enforce_capacity: bool,
}

impl Registry {
    pub fn new(activities: ActivityMap, enforce_capacity: bool) -> Self {
        Self {
            activities: RwLock::new(activities),
            enforce_capacity,
        }
    }

    /// Registry populated with the built-in activities
    pub fn with_defaults() -> Self {
        Self::new(default_activities(), false)
    }

    pub const fn enforces_capacity(&self) -> bool {
        self.enforce_capacity
    }

    /// Copy of every activity
    pub async fn list(&self) -> ActivityMap {
        self.activities.read().await.clone()
    }

    /// Copy of a single activity
    pub async fn get(&self, name: &str) -> Option<Activity> {
        self.activities.read().await.get(name).cloned()
    }

    /// Sign `email` up for `activity_name`
    pub async fn enroll(&self, activity_name: &str, email: &str) -> Result<String, RegistryError> {
        let mut activities = self.activities.write().await;
        let activity = activities
            .get_mut(activity_name)
            .ok_or(RegistryError::NotFound)?;

        if activity.is_registered(email) {
            return Err(RegistryError::AlreadyRegistered);
        }
        if self.enforce_capacity && activity.is_full() {
            return Err(RegistryError::ActivityFull);
        }

        activity.participants.push(email.to_string());
        let count = activity.participants.len();
        drop(activities);

        logger::log_info(&format!(
            "[Registry] {email} enrolled in '{activity_name}' ({count} participants)"
        ));
        Ok(format!("Signed up {email} for {activity_name}"))
    }

    /// Remove `email` from `activity_name`
    pub async fn withdraw(&self, activity_name: &str, email: &str) -> Result<String, RegistryError> {
        let mut activities = self.activities.write().await;
        let activity = activities
            .get_mut(activity_name)
            .ok_or(RegistryError::NotFound)?;

        let position = activity
            .participants
            .iter()
            .position(|p| p == email)
            .ok_or(RegistryError::NotRegistered)?;

        activity.participants.remove(position);
        let count = activity.participants.len();
        drop(activities);

        logger::log_info(&format!(
            "[Registry] {email} withdrew from '{activity_name}' ({count} participants)"
        ));
        Ok(format!("Unregistered {email} from {activity_name}"))
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn small_registry(enforce_capacity: bool) -> Registry {
        let mut activities = ActivityMap::new();
        activities.insert(
            "Chess Club".to_string(),
            Activity::new("Chess", "Fridays", 2, &["michael@mergington.edu"]),
        );
        Registry::new(activities, enforce_capacity)
    }

    #[tokio::test]
    async fn test_enroll_appends_in_order() {
        let registry = small_registry(false);
        let message = registry.enroll("Chess Club", "new@mergington.edu").await.unwrap();
        assert_eq!(message, "Signed up new@mergington.edu for Chess Club");

        let chess = registry.get("Chess Club").await.unwrap();
        assert_eq!(
            chess.participants,
            vec!["michael@mergington.edu", "new@mergington.edu"]
        );
    }

    #[tokio::test]
    async fn test_enroll_duplicate() {
        let registry = small_registry(false);
        let err = registry
            .enroll("Chess Club", "michael@mergington.edu")
            .await
            .unwrap_err();
        assert_eq!(err, RegistryError::AlreadyRegistered);
        assert_eq!(registry.get("Chess Club").await.unwrap().participants.len(), 1);
    }

    #[tokio::test]
    async fn test_enroll_unknown_activity() {
        let registry = small_registry(false);
        let err = registry.enroll("chess club", "a@x.edu").await.unwrap_err();
        assert_eq!(err, RegistryError::NotFound);
    }

    #[tokio::test]
    async fn test_unknown_activity_checked_before_membership() {
        let registry = small_registry(false);
        let err = registry
            .withdraw("Nonexistent Activity XYZ", "michael@mergington.edu")
            .await
            .unwrap_err();
        assert_eq!(err, RegistryError::NotFound);
    }

    #[tokio::test]
    async fn test_capacity_not_enforced_by_default() {
        let registry = small_registry(false);
        registry.enroll("Chess Club", "a@x.edu").await.unwrap();
        registry.enroll("Chess Club", "b@x.edu").await.unwrap();
        assert_eq!(registry.get("Chess Club").await.unwrap().participants.len(), 3);
    }

    #[tokio::test]
    async fn test_capacity_enforced() {
        let registry = small_registry(true);
        registry.enroll("Chess Club", "a@x.edu").await.unwrap();
        let err = registry.enroll("Chess Club", "b@x.edu").await.unwrap_err();
        assert_eq!(err, RegistryError::ActivityFull);

        // Duplicate takes precedence over capacity
        let err = registry.enroll("Chess Club", "a@x.edu").await.unwrap_err();
        assert_eq!(err, RegistryError::AlreadyRegistered);
    }

    #[tokio::test]
    async fn test_withdraw() {
        let registry = small_registry(false);
        registry.enroll("Chess Club", "a@x.edu").await.unwrap();
        registry.enroll("Chess Club", "b@x.edu").await.unwrap();

        let message = registry.withdraw("Chess Club", "a@x.edu").await.unwrap();
        assert_eq!(message, "Unregistered a@x.edu from Chess Club");
        assert_eq!(
            registry.get("Chess Club").await.unwrap().participants,
            vec!["michael@mergington.edu", "b@x.edu"]
        );
    }

    #[tokio::test]
    async fn test_withdraw_not_registered() {
        let registry = small_registry(false);
        let err = registry.withdraw("Chess Club", "a@x.edu").await.unwrap_err();
        assert_eq!(err, RegistryError::NotRegistered);

        registry.withdraw("Chess Club", "michael@mergington.edu").await.unwrap();
        let err = registry
            .withdraw("Chess Club", "michael@mergington.edu")
            .await
            .unwrap_err();
        assert_eq!(err, RegistryError::NotRegistered);
    }

    #[tokio::test]
    async fn test_list_is_a_snapshot() {
        let registry = small_registry(false);
        let mut snapshot = registry.list().await;
        snapshot
            .get_mut("Chess Club")
            .unwrap()
            .participants
            .push("sneaky@x.edu".to_string());

        let chess = registry.get("Chess Club").await.unwrap();
        assert!(!chess.is_registered("sneaky@x.edu"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_duplicate_enroll() {
        let registry = Arc::new(small_registry(false));
        let mut handles = Vec::new();
        for _ in 0..16 {
            let registry = Arc::clone(&registry);
            handles.push(tokio::spawn(async move {
                registry.enroll("Chess Club", "race@x.edu").await
            }));
        }

        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                successes += 1;
            }
        }
        assert_eq!(successes, 1);

        let chess = registry.get("Chess Club").await.unwrap();
        assert_eq!(
            chess.participants.iter().filter(|p| *p == "race@x.edu").count(),
            1
        );
    }

    #[tokio::test]
    async fn test_with_defaults() {
        let registry = Registry::default();
        assert_eq!(registry.list().await.len(), 9);
        assert!(!registry.enforces_capacity());
    }
}
