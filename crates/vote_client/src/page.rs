use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Weak,
};

use tokio::{sync::RwLock, task::JoinHandle};
use tracing::{debug, error, info, warn};

use crate::{
    source::SessionSource,
    state::{transition, PageEvent, PageState},
};

/// A mounted voting page.
///
/// Mounting starts the one session load for this page. The load continuation
/// only holds a weak handle to the state and checks the liveness flag under
/// the write lock, so results that arrive after the page is dropped are
/// discarded.
pub struct VotePage {
    state: Arc<RwLock<PageState>>,
    alive: Arc<AtomicBool>,
    load: Option<JoinHandle<()>>,
}

impl VotePage {
    /// Must be called from within a tokio runtime.
    pub fn mount(source: Arc<dyn SessionSource>) -> Self {
        let state = Arc::new(RwLock::new(transition(
            PageState::default(),
            PageEvent::Mounted,
        )));
        let alive = Arc::new(AtomicBool::new(true));
        let load = tokio::spawn(load_sessions(
            source,
            Arc::downgrade(&state),
            Arc::clone(&alive),
        ));
        Self {
            state,
            alive,
            load: Some(load),
        }
    }

    /// Waits until the session load has succeeded or failed.
    pub async fn settled(&mut self) {
        if let Some(load) = self.load.take() {
            if let Err(error) = load.await {
                warn!(%error, "session load task ended abnormally");
            }
        }
    }

    pub async fn snapshot(&self) -> PageState {
        self.state.read().await.clone()
    }

    pub async fn toggle_expand_all(&self) -> bool {
        let mut state = self.state.write().await;
        *state = transition(std::mem::take(&mut *state), PageEvent::ToggleExpandAll);
        state.expand_all
    }

    pub fn unmount(self) {}
}

impl Drop for VotePage {
    fn drop(&mut self) {
        self.alive.store(false, Ordering::SeqCst);
    }
}

async fn load_sessions(
    source: Arc<dyn SessionSource>,
    state: Weak<RwLock<PageState>>,
    alive: Arc<AtomicBool>,
) {
    let event = match source.fetch_sessions().await {
        Ok(sessions) => {
            info!(count = sessions.len(), "sessions loaded");
            PageEvent::LoadSucceeded(sessions)
        }
        Err(error) => {
            error!(%error, "error loading sessions");
            PageEvent::LoadFailed(error.to_string())
        }
    };

    let Some(state) = state.upgrade() else {
        debug!("page dropped before sessions settled; discarding result");
        return;
    };
    let mut guard = state.write().await;
    if !alive.load(Ordering::SeqCst) {
        debug!("page unmounted before sessions settled; discarding result");
        return;
    }
    *guard = transition(std::mem::take(&mut *guard), event);
}

#[cfg(test)]
#[path = "tests/page_tests.rs"]
mod tests;
