//! Page state and its single transition function.

use shared::{domain::Session, tags::derive_tags};
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    /// `tags` is derived once from `sessions` when the load settles and is not
    /// recomputed afterwards.
    Loaded {
        sessions: Vec<Session>,
        tags: Vec<String>,
    },
    Failed {
        reason: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageState {
    pub load: LoadState,
    pub expand_all: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    Mounted,
    LoadSucceeded(Vec<Session>),
    LoadFailed(String),
    ToggleExpandAll,
}

impl PageEvent {
    fn name(&self) -> &'static str {
        match self {
            PageEvent::Mounted => "mounted",
            PageEvent::LoadSucceeded(_) => "load_succeeded",
            PageEvent::LoadFailed(_) => "load_failed",
            PageEvent::ToggleExpandAll => "toggle_expand_all",
        }
    }
}

impl PageState {
    pub fn is_loading(&self) -> bool {
        matches!(self.load, LoadState::Loading)
    }

    pub fn is_error(&self) -> bool {
        matches!(self.load, LoadState::Failed { .. })
    }

    pub fn sessions(&self) -> Option<&[Session]> {
        match &self.load {
            LoadState::Loaded { sessions, .. } => Some(sessions),
            _ => None,
        }
    }

    pub fn tags(&self) -> &[String] {
        match &self.load {
            LoadState::Loaded { tags, .. } => tags,
            _ => &[],
        }
    }
}

pub fn transition(state: PageState, event: PageEvent) -> PageState {
    let PageState { load, expand_all } = state;
    match (load, event) {
        (load, PageEvent::ToggleExpandAll) => PageState {
            load,
            expand_all: !expand_all,
        },
        (LoadState::Idle, PageEvent::Mounted) => PageState {
            load: LoadState::Loading,
            expand_all,
        },
        (LoadState::Loading, PageEvent::LoadSucceeded(sessions)) => {
            let tags = derive_tags(&sessions);
            PageState {
                load: LoadState::Loaded { sessions, tags },
                expand_all,
            }
        }
        (LoadState::Loading, PageEvent::LoadFailed(reason)) => PageState {
            load: LoadState::Failed { reason },
            expand_all,
        },
        (load, event) => {
            debug!(event = event.name(), "ignoring page event in current load state");
            PageState { load, expand_all }
        }
    }
}
