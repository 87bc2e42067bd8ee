use std::{io, net::SocketAddr, sync::Arc};

use askama::Template;
use axum::{
    extract::{RawQuery, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use shared::{
    dates::{ConferenceDates, SystemClock},
    domain::PageMetadata,
    error::{ApiError, ErrorCode},
};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use url::form_urlencoded;
use vote_client::{
    enforce_gate, FileSessionSource, HttpSessionSource, Navigator, SessionSource, TagFilter,
    VotePage, VoteView, SESSIONS_ASSET_PATH,
};

mod app_state;
mod config;
mod render;

use app_state::AppState;
use config::{load_settings, Settings};
use render::{HomeTemplate, VotePageTemplate, VOTE_ROUTE};

type HttpError = (StatusCode, Json<ApiError>);

/// Query string of the voting page. `tags` may repeat, one value per
/// selected tag, and each value is used exactly as sent.
#[derive(Debug, Default, PartialEq, Eq)]
struct VoteQuery {
    expand: bool,
    tags: Vec<String>,
}

impl VoteQuery {
    fn parse(raw: &str) -> Self {
        let mut query = Self::default();
        for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
            match key.as_ref() {
                "expand" => query.expand = value.parse().unwrap_or(false),
                "tags" => query.tags.push(value.into_owned()),
                _ => {}
            }
        }
        query
    }
}

/// Server-side navigator: a replace becomes a `302 Found` and ends the response.
#[derive(Debug, Default)]
struct RedirectResponse {
    location: Option<String>,
}

impl Navigator for RedirectResponse {
    fn replace(&mut self, location: &str) {
        self.location = Some(location.to_string());
    }
}

impl IntoResponse for RedirectResponse {
    fn into_response(self) -> Response {
        match self.location {
            Some(location) => (StatusCode::FOUND, [(header::LOCATION, location)]).into_response(),
            None => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = load_settings()?;
    let addr: SocketAddr = settings.server_bind.parse()?;
    let state = app_state_from_settings(settings)?;
    info!(
        conference = %state.conference.name,
        voting_open_from = %state.conference.voting_open_from,
        voting_open_until = %state.conference.voting_open_until,
        sessions_path = %state.sessions_path.display(),
        "conference configured"
    );

    let app = build_router(Arc::new(state));
    info!(%addr, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn app_state_from_settings(settings: Settings) -> anyhow::Result<AppState> {
    let sessions: Arc<dyn SessionSource> = match settings.sessions_url.as_deref() {
        Some(site_url) => Arc::new(HttpSessionSource::new(site_url)?),
        None => Arc::new(FileSessionSource::new(settings.sessions_path.clone())),
    };
    Ok(AppState {
        conference: settings.conference,
        sessions_path: settings.sessions_path,
        sessions,
        clock: Arc::new(SystemClock),
    })
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/healthz", get(healthz))
        .route(VOTE_ROUTE, get(vote))
        .route(SESSIONS_ASSET_PATH, get(sessions_asset))
        .route("/api/conference", get(conference_metadata))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

fn page_metadata(state: &AppState) -> PageMetadata {
    PageMetadata::new(state.conference.clone(), state.clock.now())
}

async fn home(State(state): State<Arc<AppState>>) -> Result<Html<String>, HttpError> {
    let metadata = page_metadata(&state);
    let page = HomeTemplate {
        conference_name: &metadata.conference.name,
        voting_open: metadata.dates.voting_open,
    };
    page.render().map(Html).map_err(render_failed)
}

async fn conference_metadata(State(state): State<Arc<AppState>>) -> Json<PageMetadata> {
    Json(page_metadata(&state))
}

async fn vote(
    State(state): State<Arc<AppState>>,
    RawQuery(raw): RawQuery,
) -> Result<Response, HttpError> {
    let q = raw.as_deref().map(VoteQuery::parse).unwrap_or_default();
    let dates = ConferenceDates::compute(&state.conference, state.clock.now());
    let mut redirect = RedirectResponse::default();
    if !enforce_gate(&dates, &mut redirect) {
        return Ok(redirect.into_response());
    }

    let mut page = VotePage::mount(Arc::clone(&state.sessions));
    page.settled().await;
    if q.expand {
        page.toggle_expand_all().await;
    }
    let snapshot = page.snapshot().await;
    page.unmount();

    let filter = TagFilter::new(q.tags);
    let view = VoteView::build(&state.conference, &snapshot, &filter);
    let html = VotePageTemplate::new(&view)
        .render()
        .map_err(render_failed)?;
    Ok(Html(html).into_response())
}

async fn sessions_asset(State(state): State<Arc<AppState>>) -> Result<Response, HttpError> {
    match tokio::fs::read(&state.sessions_path).await {
        Ok(body) => Ok((
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!(path = %state.sessions_path.display(), "session asset missing");
            Err((
                StatusCode::NOT_FOUND,
                Json(ApiError::new(ErrorCode::NotFound, "session list not found")),
            ))
        }
        Err(e) => {
            error!(path = %state.sessions_path.display(), error = %e, "failed to read session asset");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiError::new(ErrorCode::Internal, e.to_string())),
            ))
        }
    }
}

fn render_failed(e: askama::Error) -> HttpError {
    error!(error = %e, "failed to render page");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiError::new(ErrorCode::Internal, e.to_string())),
    )
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
