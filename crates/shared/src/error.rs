use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    NotFound,
    Internal,
}

/// JSON error envelope returned by the HTTP surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("conference name must not be empty")]
    EmptyName,
    #[error("minimum vote count must be at least 1")]
    ZeroMinVotes,
    #[error("minimum vote count {min} exceeds maximum vote count {max}")]
    VoteRange { min: u32, max: u32 },
    #[error("voting window opens at {from} but closes at {until}")]
    VotingWindow {
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    },
}
