// Activity data model

use serde::{Deserialize, Serialize};

/// A school activity students can sign up for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub description: String,
    pub schedule: String,
    pub max_participants: u32,
    /// Participant emails in signup order
    #[serde(default)]
    pub participants: Vec<String>,
}

impl Activity {
    pub fn new(description: &str, schedule: &str, max_participants: u32, participants: &[&str]) -> Self {
        Self {
            description: description.to_string(),
            schedule: schedule.to_string(),
            max_participants,
            participants: participants.iter().map(ToString::to_string).collect(),
        }
    }

    pub fn is_registered(&self, email: &str) -> bool {
        self.participants.iter().any(|p| p == email)
    }

    pub fn is_full(&self) -> bool {
        self.participants.len() >= usize::try_from(self.max_participants).unwrap_or(usize::MAX)
    }

    /// Remaining capacity, saturating at zero when over-subscribed
    pub fn spots_left(&self) -> usize {
        usize::try_from(self.max_participants)
            .unwrap_or(usize::MAX)
            .saturating_sub(self.participants.len())
    }
}
