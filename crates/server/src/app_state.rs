use std::{path::PathBuf, sync::Arc};

use shared::{dates::Clock, domain::ConferenceConfig};
use vote_client::SessionSource;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) conference: ConferenceConfig,
    /// File behind `/static/tmp.json`.
    pub(crate) sessions_path: PathBuf,
    /// Where mounted vote pages load their sessions from.
    pub(crate) sessions: Arc<dyn SessionSource>,
    pub(crate) clock: Arc<dyn Clock>,
}
