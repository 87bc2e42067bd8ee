//! Voting-window gate shared by server-rendered and client-side navigation.

use shared::dates::ConferenceDates;
use tracing::info;

pub const HOME_ROUTE: &str = "/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Proceed,
    Redirect { location: &'static str },
}

pub fn check_voting_gate(dates: &ConferenceDates) -> GateDecision {
    if dates.voting_open {
        GateDecision::Proceed
    } else {
        GateDecision::Redirect {
            location: HOME_ROUTE,
        }
    }
}

/// Performs a replace-style navigation: the current location is swapped,
/// nothing is pushed.
pub trait Navigator {
    fn replace(&mut self, location: &str);
}

/// Returns `true` when the page may render. When voting is closed the
/// navigator is sent home instead.
pub fn enforce_gate<N: Navigator + ?Sized>(dates: &ConferenceDates, navigator: &mut N) -> bool {
    match check_voting_gate(dates) {
        GateDecision::Proceed => true,
        GateDecision::Redirect { location } => {
            info!(location, "voting is closed; redirecting");
            navigator.replace(location);
            false
        }
    }
}

/// In-app navigation history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    entries: Vec<String>,
}

impl History {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            entries: vec![initial.into()],
        }
    }

    pub fn push(&mut self, location: impl Into<String>) {
        self.entries.push(location.into());
    }

    pub fn current(&self) -> &str {
        self.entries.last().map(String::as_str).unwrap_or(HOME_ROUTE)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Navigator for History {
    fn replace(&mut self, location: &str) {
        match self.entries.last_mut() {
            Some(current) => *current = location.to_string(),
            None => self.entries.push(location.to_string()),
        }
    }
}
