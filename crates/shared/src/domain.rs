use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::{dates::ConferenceDates, error::ConfigError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Presenter {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter_handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
}

/// A talk proposal as served by the session asset.
///
/// Only `Title` and `Tags` are required; the descriptive fields are opaque to
/// loading and tag derivation and default to empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub tags: Vec<String>,
    #[serde(rename = "Abstract", default, skip_serializing_if = "String::is_empty")]
    pub summary: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub format: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub level: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub presenters: Vec<Presenter>,
}

impl Session {
    pub fn new(title: impl Into<String>, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            id: None,
            title: title.into(),
            tags: tags.into_iter().map(Into::into).collect(),
            summary: String::new(),
            format: String::new(),
            level: String::new(),
            presenters: Vec::new(),
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConferenceConfig {
    pub name: String,
    pub anonymous_voting: bool,
    pub min_votes: u32,
    pub max_votes: u32,
    pub voting_open_from: DateTime<Utc>,
    pub voting_open_until: DateTime<Utc>,
}

impl Default for ConferenceConfig {
    fn default() -> Self {
        Self {
            name: "Conference".into(),
            anonymous_voting: false,
            min_votes: 1,
            max_votes: 1,
            voting_open_from: DateTime::<Utc>::UNIX_EPOCH,
            voting_open_until: DateTime::<Utc>::UNIX_EPOCH + Duration::days(1),
        }
    }
}

impl ConferenceConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::EmptyName);
        }
        if self.min_votes == 0 {
            return Err(ConfigError::ZeroMinVotes);
        }
        if self.min_votes > self.max_votes {
            return Err(ConfigError::VoteRange {
                min: self.min_votes,
                max: self.max_votes,
            });
        }
        if self.voting_open_from >= self.voting_open_until {
            return Err(ConfigError::VotingWindow {
                from: self.voting_open_from,
                until: self.voting_open_until,
            });
        }
        Ok(())
    }
}

/// Page chrome data handed to every page: the conference plus its dates as of the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMetadata {
    pub conference: ConferenceConfig,
    pub dates: ConferenceDates,
}

impl PageMetadata {
    pub fn new(conference: ConferenceConfig, now: DateTime<Utc>) -> Self {
        let dates = ConferenceDates::compute(&conference, now);
        Self { conference, dates }
    }
}
