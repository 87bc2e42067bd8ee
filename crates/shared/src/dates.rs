//! Conference date calculations and the date/time source they are evaluated against.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ConferenceConfig;

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConferenceDates {
    pub voting_not_started: bool,
    pub voting_open: bool,
    pub voting_finished: bool,
}

impl ConferenceDates {
    /// Voting is open on the half-open interval `[voting_open_from, voting_open_until)`.
    pub fn compute(conference: &ConferenceConfig, now: DateTime<Utc>) -> Self {
        let voting_not_started = now < conference.voting_open_from;
        let voting_finished = now >= conference.voting_open_until;
        Self {
            voting_not_started,
            voting_open: !voting_not_started && !voting_finished,
            voting_finished,
        }
    }
}
