//! Recruiting candidates waiting for (or holding) an interview slot.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identity of a candidate. Events reference candidates by this id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(pub u64);

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for CandidateId {
    fn from(id: u64) -> Self {
        CandidateId(id)
    }
}

/// A candidate profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    /// Position the candidate is interviewing for
    pub position: String,
    /// Address notifications are sent to
    pub email: String,
    /// Set once a notification has been dispatched; never cleared
    #[serde(default)]
    pub notified: bool,
}

impl Candidate {
    pub fn new(
        id: impl Into<CandidateId>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        age: u32,
        position: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Candidate {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            age,
            position: position.into(),
            email: email.into(),
            notified: false,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.full_name(), self.position)
    }
}

/// Roster used when the configuration does not list any candidates.
pub fn default_roster() -> Vec<Candidate> {
    vec![
        Candidate::new(1, "John", "Doe", 30, "Développeur", "john.doe@example.com"),
        Candidate::new(2, "Jane", "Smith", 25, "Designer", "jane.smith@example.com"),
        Candidate::new(3, "Bob", "Johnson", 35, "Manager", "bob.johnson@example.com"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_name_and_position() {
        let candidate = Candidate::new(7, "Ada", "Lovelace", 36, "Analyst", "ada@example.com");
        assert_eq!(candidate.to_string(), "Ada Lovelace (Analyst)");
        assert_eq!(candidate.id.to_string(), "#7");
    }

    #[test]
    fn default_roster_has_unique_ids_and_starts_unnotified() {
        let roster = default_roster();
        assert_eq!(roster.len(), 3);
        let mut ids: Vec<_> = roster.iter().map(|c| c.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 3);
        assert!(roster.iter().all(|c| !c.notified));
    }

    #[test]
    fn notified_defaults_to_false_when_missing() {
        let candidate: Candidate = toml::from_str(
            r#"
            id = 4
            first_name = "Grace"
            last_name = "Hopper"
            age = 40
            position = "Engineer"
            email = "grace@example.com"
            "#,
        )
        .unwrap();
        assert_eq!(candidate.id, CandidateId(4));
        assert!(!candidate.notified);
    }
}
