//! Scheduler configuration.

use std::path::{Path, PathBuf};

use chrono::Duration;
use chrono_tz::Tz;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::candidate::{Candidate, default_roster};
use crate::error::{SchedulerError, SchedulerResult};

static DEFAULT_INTERVIEW_DURATION: &str = "1h";

fn default_interview_duration() -> String {
    DEFAULT_INTERVIEW_DURATION.to_string()
}

/// Configuration at ~/.config/recruitcal/config.toml
///
/// Every key can be overridden with a `RECRUITCAL_`-prefixed environment
/// variable, e.g. `RECRUITCAL_INTERVIEW_DURATION=45m`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SchedulerConfig {
    /// Length of every interview, as a humantime string ("1h", "45m")
    #[serde(default = "default_interview_duration")]
    pub interview_duration: String,

    /// IANA zone used for month boundaries. UTC when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    /// Fixed seed for auto-assignment, for reproducible plans
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Candidates waiting for an interview when a session starts
    #[serde(default = "default_roster")]
    pub candidates: Vec<Candidate>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        SchedulerConfig {
            interview_duration: default_interview_duration(),
            timezone: None,
            seed: None,
            candidates: default_roster(),
        }
    }
}

impl SchedulerConfig {
    pub fn config_path() -> SchedulerResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| SchedulerError::Config("Could not determine config directory".into()))?
            .join("recruitcal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, writing a commented template first
    /// if no file exists yet.
    pub fn load() -> SchedulerResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from `path` (missing file means defaults) plus environment overrides.
    pub fn load_from(path: &Path) -> SchedulerResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("RECRUITCAL").try_parsing(true))
            .build()
            .map_err(|e| SchedulerError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| SchedulerError::Config(e.to_string()))
    }

    pub fn interview_duration(&self) -> SchedulerResult<Duration> {
        let std_duration = humantime::parse_duration(&self.interview_duration).map_err(|e| {
            SchedulerError::Config(format!(
                "Invalid interview_duration '{}': {e}",
                self.interview_duration
            ))
        })?;

        let duration = Duration::from_std(std_duration).map_err(|_| {
            SchedulerError::Config(format!(
                "interview_duration '{}' is too large",
                self.interview_duration
            ))
        })?;

        if duration <= Duration::zero() {
            return Err(SchedulerError::Config(
                "interview_duration must be positive".into(),
            ));
        }

        Ok(duration)
    }

    pub fn timezone(&self) -> SchedulerResult<Tz> {
        match &self.timezone {
            Some(name) => parse_timezone(name),
            None => Ok(Tz::UTC),
        }
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> SchedulerResult<()> {
        let contents = format!(
            "\
# recruitcal configuration

# How long each interview lasts:
# interview_duration = \"{}\"

# Time zone used to compute month boundaries for auto-assignment:
# timezone = \"Europe/Paris\"

# Fixed seed for reproducible auto-assignment:
# seed = 42

# Candidates waiting for an interview:
# [[candidates]]
# id = 1
# first_name = \"John\"
# last_name = \"Doe\"
# age = 30
# position = \"Développeur\"
# email = \"john.doe@example.com\"
",
            DEFAULT_INTERVIEW_DURATION
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                SchedulerError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| SchedulerError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

pub fn parse_timezone(name: &str) -> SchedulerResult<Tz> {
    name.parse::<Tz>()
        .map_err(|_| SchedulerError::InvalidTimezone(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::CandidateId;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = SchedulerConfig::load_from(&dir.path().join("config.toml")).unwrap();

        assert_eq!(config.interview_duration().unwrap(), Duration::hours(1));
        assert_eq!(config.timezone().unwrap(), Tz::UTC);
        assert_eq!(config.candidates, default_roster());
    }

    #[test]
    fn reads_values_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
interview_duration = "45m"
timezone = "Europe/Paris"
seed = 42

[[candidates]]
id = 10
first_name = "Grace"
last_name = "Hopper"
age = 40
position = "Engineer"
email = "grace@example.com"
"#,
        )
        .unwrap();

        let config = SchedulerConfig::load_from(&path).unwrap();
        assert_eq!(config.interview_duration().unwrap(), Duration::minutes(45));
        assert_eq!(config.timezone().unwrap(), Tz::Europe__Paris);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.candidates.len(), 1);
        assert_eq!(config.candidates[0].id, CandidateId(10));
    }

    #[test]
    fn default_template_parses_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        SchedulerConfig::create_default_config(&path).unwrap();

        let config = SchedulerConfig::load_from(&path).unwrap();
        assert_eq!(config.interview_duration, "1h");
        assert_eq!(config.candidates.len(), 3);
    }

    #[test]
    fn rejects_bad_duration_and_zone() {
        let config = SchedulerConfig {
            interview_duration: "soon".into(),
            timezone: Some("Mars/Olympus".into()),
            ..SchedulerConfig::default()
        };
        assert!(matches!(
            config.interview_duration(),
            Err(SchedulerError::Config(_))
        ));
        assert!(matches!(
            config.timezone(),
            Err(SchedulerError::InvalidTimezone(_))
        ));
    }

    #[test]
    fn rejects_zero_duration() {
        let config = SchedulerConfig {
            interview_duration: "0s".into(),
            ..SchedulerConfig::default()
        };
        assert!(config.interview_duration().is_err());
    }
}
