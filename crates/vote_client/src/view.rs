//! Presentation model for the voting page, independent of the output format.

use shared::domain::{ConferenceConfig, Session};

use crate::state::PageState;

pub const ANONYMITY_NOTICE: &str = "In order to remove unconscious bias we implement anonymous \
session voting. This means that you will not see the details of the presenters and will need to \
vote based on the content (title, abstract, tags).";

/// Selected tags, kept exactly as given. A session passes when it carries at
/// least one of them; an empty selection passes everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagFilter {
    selected: Vec<String>,
}

impl TagFilter {
    pub fn new<S: Into<String>>(tags: impl IntoIterator<Item = S>) -> Self {
        let mut selected: Vec<String> = Vec::new();
        for tag in tags.into_iter().map(Into::into) {
            if !selected.contains(&tag) {
                selected.push(tag);
            }
        }
        Self { selected }
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.selected.iter().any(|selected| selected == tag)
    }

    pub fn matches(&self, session: &Session) -> bool {
        self.is_empty() || self.selected.iter().any(|tag| session.has_tag(tag))
    }
}

pub fn votes_phrase(min_votes: u32, max_votes: u32) -> String {
    if min_votes != max_votes {
        format!("between {min_votes} and {max_votes}")
    } else {
        min_votes.to_string()
    }
}

pub fn voting_instructions(conference: &ConferenceConfig) -> String {
    format!(
        "You will be required to vote for {} sessions.",
        votes_phrase(conference.min_votes, conference.max_votes)
    )
}

/// Labelled with the action the button performs, i.e. the opposite of the current state.
pub fn expand_toggle_label(expand_all: bool) -> &'static str {
    if expand_all {
        "Collapse all sessions"
    } else {
        "Expand all sessions"
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEntry<'a> {
    /// Position in the loaded list, unaffected by filtering.
    pub index: usize,
    pub session: &'a Session,
    pub show_presenter: bool,
}

#[derive(Debug, Clone)]
pub struct VoteView<'a> {
    pub conference_name: &'a str,
    pub anonymity_notice: bool,
    pub instructions: String,
    pub is_loading: bool,
    pub load_failed: bool,
    pub show_controls: bool,
    pub expand_all: bool,
    pub accordion: bool,
    pub toggle_label: &'static str,
    pub tags: &'a [String],
    pub filter: &'a TagFilter,
    pub entries: Vec<SessionEntry<'a>>,
}

impl<'a> VoteView<'a> {
    pub fn build(
        conference: &'a ConferenceConfig,
        state: &'a PageState,
        filter: &'a TagFilter,
    ) -> Self {
        let show_presenter = !conference.anonymous_voting;
        let entries = state
            .sessions()
            .unwrap_or_default()
            .iter()
            .enumerate()
            .filter(|(_, session)| filter.matches(session))
            .map(|(index, session)| SessionEntry {
                index,
                session,
                show_presenter,
            })
            .collect();

        Self {
            conference_name: &conference.name,
            anonymity_notice: conference.anonymous_voting,
            instructions: voting_instructions(conference),
            is_loading: state.is_loading(),
            load_failed: state.is_error(),
            show_controls: state.sessions().is_some(),
            expand_all: state.expand_all,
            accordion: !state.expand_all,
            toggle_label: expand_toggle_label(state.expand_all),
            tags: state.tags(),
            filter,
            entries,
        }
    }
}
