//! Candidate roster loader
//! Loads the list of selectable candidates from YAML, or falls back to the built-in roster

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::LedgerError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Candidate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub avatar: String,
}

impl Candidate {
    fn new(id: &str, name: &str, role: &str, bio: &str, avatar: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            role: role.to_string(),
            bio: bio.to_string(),
            avatar: avatar.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RosterConfig {
    pub candidates: Vec<Candidate>,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            candidates: vec![
                Candidate::new(
                    "c1",
                    "Devaraj",
                    "Student",
                    "A dependable and hardworking class representative, always ready to help peers and contribute innovative ideas.",
                    "https://i.pravatar.cc/150?img=12",
                ),
                Candidate::new(
                    "c2",
                    "Aatheka",
                    "Student",
                    "Creative, enthusiastic, and an excellent team player who inspires others to achieve their best.",
                    "https://i.pravatar.cc/150?img=47",
                ),
                Candidate::new(
                    "c3",
                    "Arjun",
                    "Student",
                    "Focused, motivated, and always brings positivity and dedication to every project or discussion.",
                    "https://i.pravatar.cc/150?img=54",
                ),
                Candidate::new(
                    "c4",
                    "Christopher",
                    "Student",
                    "Energetic, approachable, and known for helping classmates solve problems efficiently.",
                    "https://i.pravatar.cc/150?img=68",
                ),
                Candidate::new(
                    "c5",
                    "Aasikha",
                    "Student",
                    "Curious, intelligent, and committed to bringing fresh perspectives to class activities.",
                    "https://i.pravatar.cc/150?img=32",
                ),
            ],
        }
    }
}

impl RosterConfig {
    /// Load the roster from `path`, or use the built-in one when no path is configured
    pub fn load(path: Option<&Path>) -> Result<Self, LedgerError> {
        let roster = match path {
            Some(path) => Self::load_from_file(path)?,
            None => {
                info!("No roster file configured, using built-in roster");
                Self::default()
            }
        };

        roster.validate()?;
        Ok(roster)
    }

    /// Load a YAML roster file and deserialize it
    pub fn load_from_file(path: &Path) -> Result<Self, LedgerError> {
        info!("Loading candidate roster from: {:?}", path);

        if !path.exists() {
            return Err(LedgerError::ConfigError(format!(
                "Roster file not found: {:?}",
                path
            )));
        }

        let contents = fs::read_to_string(path).map_err(|e| {
            LedgerError::ConfigError(format!("Failed to read {:?}: {}", path, e))
        })?;

        serde_yaml::from_str(&contents).map_err(|e| {
            LedgerError::ConfigError(format!("Failed to parse {:?}: {}", path, e))
        })
    }

    /// Validate the loaded roster
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.candidates.is_empty() {
            return Err(LedgerError::ConfigError(
                "No candidates defined".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for candidate in &self.candidates {
            if candidate.id.trim().is_empty() {
                return Err(LedgerError::ConfigError(
                    "Candidate with empty id".to_string(),
                ));
            }

            if candidate.name.trim().is_empty() {
                return Err(LedgerError::ConfigError(format!(
                    "Candidate {}: name cannot be empty",
                    candidate.id
                )));
            }

            if !seen.insert(candidate.id.as_str()) {
                return Err(LedgerError::ConfigError(format!(
                    "Duplicate candidate id: {}",
                    candidate.id
                )));
            }
        }

        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Candidate> {
        self.candidates.iter().find(|candidate| candidate.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }
}
