//! Voting page core: session loading, page state, gating and presentation model.

pub mod error;
pub mod gate;
pub mod page;
pub mod source;
pub mod state;
pub mod view;

pub use error::LoadError;
pub use gate::{check_voting_gate, enforce_gate, GateDecision, History, Navigator, HOME_ROUTE};
pub use page::VotePage;
pub use source::{FileSessionSource, HttpSessionSource, SessionSource, SESSIONS_ASSET_PATH};
pub use state::{transition, LoadState, PageEvent, PageState};
pub use view::{SessionEntry, TagFilter, VoteView};
