// Seed data module
// Built-in activity catalogue and optional TOML seed file loading

use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use super::activity::Activity;
use super::error::SeedError;

/// Built-in activities available at process start
pub fn default_activities() -> BTreeMap<String, Activity> {
    let seed = [
        (
            "Chess Club",
            Activity::new(
                "Learn strategies and compete in chess tournaments",
                "Fridays, 3:30 PM - 5:00 PM",
                12,
                &["michael@mergington.edu", "daniel@mergington.edu"],
            ),
        ),
        (
            "Programming Class",
            Activity::new(
                "Learn programming fundamentals and build software projects",
                "Tuesdays and Thursdays, 3:30 PM - 4:30 PM",
                20,
                &["emma@mergington.edu", "sophia@mergington.edu"],
            ),
        ),
        (
            "Gym Class",
            Activity::new(
                "Physical education and sports activities",
                "Mondays, Wednesdays, Fridays, 2:00 PM - 3:00 PM",
                30,
                &["john@mergington.edu", "olivia@mergington.edu"],
            ),
        ),
        (
            "Basketball Team",
            Activity::new(
                "Practice drills and compete in inter-school basketball games",
                "Mondays and Wednesdays, 4:00 PM - 6:00 PM",
                15,
                &["liam@mergington.edu"],
            ),
        ),
        (
            "Tennis Club",
            Activity::new(
                "Improve your serve and play singles and doubles matches",
                "Tuesdays and Thursdays, 4:00 PM - 5:30 PM",
                10,
                &["ava@mergington.edu"],
            ),
        ),
        (
            "Art Studio",
            Activity::new(
                "Explore painting, drawing, and sculpture techniques",
                "Wednesdays, 3:30 PM - 5:00 PM",
                18,
                &["mia@mergington.edu"],
            ),
        ),
        (
            "Music Band",
            Activity::new(
                "Rehearse and perform with the school band",
                "Thursdays, 3:30 PM - 5:30 PM",
                25,
                &["noah@mergington.edu", "isabella@mergington.edu"],
            ),
        ),
        (
            "Robotics Club",
            Activity::new(
                "Design, build, and program robots for competitions",
                "Saturdays, 10:00 AM - 12:00 PM",
                16,
                &["ethan@mergington.edu"],
            ),
        ),
        (
            "Debate Team",
            Activity::new(
                "Sharpen public speaking and argumentation skills",
                "Mondays, 3:30 PM - 5:00 PM",
                14,
                &["charlotte@mergington.edu"],
            ),
        ),
    ];

    seed.into_iter()
        .map(|(name, activity)| (name.to_string(), activity))
        .collect()
}

/// On-disk seed file layout
#[derive(Debug, Deserialize)]
struct SeedFile {
    #[serde(default)]
    activities: BTreeMap<String, Activity>,
}

/// Load activities from a TOML seed file
///
/// ```toml
/// [activities."Chess Club"]
/// description = "Learn strategies and compete in chess tournaments"
/// schedule = "Fridays, 3:30 PM - 5:00 PM"
/// max_participants = 12
/// participants = ["michael@mergington.edu"]
/// ```
pub fn load_seed_file(path: &Path) -> Result<BTreeMap<String, Activity>, SeedError> {
    let content = fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_seed(&content)
}

/// Parse and validate seed TOML
pub fn parse_seed(content: &str) -> Result<BTreeMap<String, Activity>, SeedError> {
    let seed: SeedFile = toml::from_str(content)?;
    for (name, activity) in &seed.activities {
        validate_activity(name, activity)?;
    }
    Ok(seed.activities)
}

fn validate_activity(name: &str, activity: &Activity) -> Result<(), SeedError> {
    if name.is_empty() {
        return Err(SeedError::Invalid("activity name must not be empty".to_string()));
    }
    if activity.max_participants == 0 {
        return Err(SeedError::Invalid(format!(
            "activity '{name}' must allow at least one participant"
        )));
    }

    let mut seen = HashSet::new();
    for email in &activity.participants {
        if email.is_empty() {
            return Err(SeedError::Invalid(format!(
                "activity '{name}' has an empty participant"
            )));
        }
        if !seen.insert(email.as_str()) {
            return Err(SeedError::Invalid(format!(
                "activity '{name}' lists participant '{email}' more than once"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_activities_names() {
        let activities = default_activities();
        let expected = [
            "Chess Club",
            "Programming Class",
            "Gym Class",
            "Basketball Team",
            "Tennis Club",
            "Art Studio",
            "Music Band",
            "Robotics Club",
            "Debate Team",
        ];
        assert_eq!(activities.len(), expected.len());
        for name in expected {
            assert!(activities.contains_key(name), "missing {name}");
        }
    }

    #[test]
    fn test_default_activities_are_valid() {
        for (name, activity) in &default_activities() {
            validate_activity(name, activity).unwrap();
            assert!(activity.participants.iter().all(|p| p.contains('@')));
        }
        assert!(default_activities()["Chess Club"].is_registered("michael@mergington.edu"));
    }

    #[test]
    fn test_parse_seed() {
        let content = r#"
[activities."Chess Club"]
description = "Chess"
schedule = "Fridays"
max_participants = 2
participants = ["a@x.edu"]

[activities."Drama"]
description = "Stage"
schedule = "Mondays"
max_participants = 5
"#;
        let activities = parse_seed(content).unwrap();
        assert_eq!(activities.len(), 2);
        assert_eq!(activities["Chess Club"].participants, vec!["a@x.edu"]);
        assert!(activities["Drama"].participants.is_empty());
    }

    #[test]
    fn test_parse_seed_rejects_duplicates() {
        let content = r#"
[activities.Chess]
description = "Chess"
schedule = "Fridays"
max_participants = 2
participants = ["a@x.edu", "a@x.edu"]
"#;
        assert!(matches!(parse_seed(content), Err(SeedError::Invalid(_))));
    }

    #[test]
    fn test_parse_seed_rejects_zero_capacity() {
        let content = r#"
[activities.Chess]
description = "Chess"
schedule = "Fridays"
max_participants = 0
"#;
        assert!(matches!(parse_seed(content), Err(SeedError::Invalid(_))));
    }

    #[test]
    fn test_parse_seed_malformed() {
        assert!(matches!(parse_seed("activities = 3"), Err(SeedError::Parse(_))));
    }

    #[test]
    fn test_load_seed_file_missing() {
        let err = load_seed_file(Path::new("does/not/exist.toml")).unwrap_err();
        assert!(matches!(err, SeedError::Io { .. }));
        assert!(err.to_string().contains("does/not/exist.toml"));
    }
}
