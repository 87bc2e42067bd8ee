//! HTML rendering for the home and voting pages.

use askama::Template;
use shared::domain::Presenter;
use url::form_urlencoded;
use vote_client::{view::ANONYMITY_NOTICE, SessionEntry, TagFilter, VoteView};

pub(crate) const VOTE_ROUTE: &str = "/vote";

pub(crate) struct PresenterDetails {
    pub(crate) name: String,
    pub(crate) tagline: String,
    pub(crate) bio: String,
}

impl From<&Presenter> for PresenterDetails {
    fn from(presenter: &Presenter) -> Self {
        Self {
            name: presenter.name.clone(),
            tagline: presenter.tagline.clone().unwrap_or_default(),
            bio: presenter.bio.clone().unwrap_or_default(),
        }
    }
}

/// Detail body for one session. Presenters are left out entirely when the
/// entry hides presenter identity.
pub(crate) struct SessionDetails {
    pub(crate) index: usize,
    pub(crate) title: String,
    pub(crate) summary: String,
    pub(crate) format: String,
    pub(crate) level: String,
    pub(crate) tags: Vec<String>,
    pub(crate) presenters: Vec<PresenterDetails>,
}

impl SessionDetails {
    pub(crate) fn from_entry(entry: &SessionEntry<'_>) -> Self {
        let session = entry.session;
        let presenters = if entry.show_presenter {
            session.presenters.iter().map(PresenterDetails::from).collect()
        } else {
            Vec::new()
        };
        Self {
            index: entry.index,
            title: session.title.clone(),
            summary: session.summary.clone(),
            format: session.format.clone(),
            level: session.level.clone(),
            tags: session.tags.clone(),
            presenters,
        }
    }
}

#[derive(Template)]
#[template(path = "vote.html")]
pub(crate) struct VotePageTemplate<'a> {
    view: &'a VoteView<'a>,
    anonymity_notice: &'static str,
    toggle_href: String,
    sessions: Vec<SessionDetails>,
}

impl<'a> VotePageTemplate<'a> {
    pub(crate) fn new(view: &'a VoteView<'a>) -> Self {
        Self {
            view,
            anonymity_notice: ANONYMITY_NOTICE,
            toggle_href: vote_href(!view.expand_all, view.filter),
            sessions: view.entries.iter().map(SessionDetails::from_entry).collect(),
        }
    }
}

#[derive(Template)]
#[template(path = "home.html")]
pub(crate) struct HomeTemplate<'a> {
    pub(crate) conference_name: &'a str,
    pub(crate) voting_open: bool,
}

/// Link to the voting page with the given expand state and tag filter.
pub(crate) fn vote_href(expand_all: bool, filter: &TagFilter) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    if expand_all {
        query.append_pair("expand", "true");
    }
    for tag in filter.selected() {
        query.append_pair("tags", tag);
    }
    let query = query.finish();
    if query.is_empty() {
        VOTE_ROUTE.to_string()
    } else {
        format!("{VOTE_ROUTE}?{query}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::domain::Session;

    #[test]
    fn vote_href_without_state_is_bare_route() {
        assert_eq!(vote_href(false, &TagFilter::default()), "/vote");
    }

    #[test]
    fn vote_href_encodes_expand_and_tags() {
        let filter = TagFilter::new(["c#", "rust"]);
        assert_eq!(
            vote_href(true, &filter),
            "/vote?expand=true&tags=c%23&tags=rust"
        );
    }

    #[test]
    fn vote_href_keeps_commas_and_padding_inside_one_tag() {
        let filter = TagFilter::new([" rust", "C, C++"]);
        assert_eq!(
            vote_href(false, &filter),
            "/vote?tags=+rust&tags=C%2C+C%2B%2B"
        );
    }

    #[test]
    fn hidden_presenters_are_not_rendered() {
        let mut session = Session::new("A", ["x"]);
        session.presenters.push(Presenter {
            name: "Sam".into(),
            tagline: None,
            bio: None,
            twitter_handle: None,
            website_url: None,
        });
        let shown = SessionDetails::from_entry(&SessionEntry {
            index: 0,
            session: &session,
            show_presenter: true,
        });
        let hidden = SessionDetails::from_entry(&SessionEntry {
            index: 0,
            session: &session,
            show_presenter: false,
        });
        assert_eq!(shown.presenters.len(), 1);
        assert!(hidden.presenters.is_empty());
    }
}
