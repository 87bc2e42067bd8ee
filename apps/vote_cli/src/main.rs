use std::{
    fmt::{self, Write as _},
    sync::Arc,
};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use shared::{
    dates::{Clock, ConferenceDates, FixedClock, SystemClock},
    domain::PageMetadata,
};
use tracing::info;
use tracing_subscriber::EnvFilter;
use url::Url;
use vote_client::{
    enforce_gate, view::ANONYMITY_NOTICE, History, HttpSessionSource, TagFilter, VotePage,
    VoteView, HOME_ROUTE,
};

/// Browse the conference sessions that are up for vote.
#[derive(Parser, Debug)]
struct Args {
    #[arg(long, default_value = "http://127.0.0.1:8080")]
    server_url: String,
    /// Only list sessions carrying at least one of these tags.
    #[arg(long = "tag")]
    tags: Vec<String>,
    /// Show every session's details instead of titles only.
    #[arg(long)]
    expand_all: bool,
    /// Evaluate the voting window at this RFC 3339 instant.
    #[arg(long)]
    now: Option<DateTime<Utc>>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();
    let args = Args::parse();

    let site = Url::parse(&args.server_url)
        .with_context(|| format!("invalid server url '{}'", args.server_url))?;
    let metadata = fetch_page_metadata(&site).await?;
    let clock: Arc<dyn Clock> = match args.now {
        Some(now) => Arc::new(FixedClock(now)),
        None => Arc::new(SystemClock),
    };
    let dates = ConferenceDates::compute(&metadata.conference, clock.now());

    let mut history = History::new(HOME_ROUTE);
    history.push("/vote");
    if !enforce_gate(&dates, &mut history) {
        println!(
            "Voting for {} is not open; returned to {}",
            metadata.conference.name,
            history.current()
        );
        return Ok(());
    }

    let source = HttpSessionSource::new(site.as_str())?;
    info!(url = %source.url(), "loading sessions");
    let mut page = VotePage::mount(Arc::new(source));
    page.settled().await;
    if args.expand_all {
        page.toggle_expand_all().await;
    }
    let state = page.snapshot().await;
    page.unmount();

    let filter = TagFilter::new(args.tags);
    let view = VoteView::build(&metadata.conference, &state, &filter);
    print!("{}", render_text(&view)?);
    Ok(())
}

async fn fetch_page_metadata(site: &Url) -> Result<PageMetadata> {
    let url = site.join("/api/conference")?;
    let metadata = reqwest::get(url.clone())
        .await
        .with_context(|| format!("failed to reach {url}"))?
        .error_for_status()?
        .json::<PageMetadata>()
        .await?;
    Ok(metadata)
}

/// Plain-text rendering of the voting page. Collapsed pages list titles
/// only; expanded pages include every session's details.
fn render_text(view: &VoteView<'_>) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "{} - Voting", view.conference_name)?;
    if view.anonymity_notice {
        writeln!(out, "\n{ANONYMITY_NOTICE}")?;
    }
    writeln!(out, "\n{}", view.instructions)?;

    if view.load_failed {
        writeln!(out, "\nSessions could not be loaded.")?;
        return Ok(out);
    }
    if view.show_controls {
        writeln!(out, "\nTags: {}", view.tags.join(", "))?;
        if !view.filter.is_empty() {
            writeln!(out, "Filtering by: {}", view.filter.selected().join(", "))?;
        }
        let hint = if view.expand_all {
            "omit --expand-all"
        } else {
            "pass --expand-all"
        };
        writeln!(out, "{} ({hint})", view.toggle_label)?;
    }

    writeln!(out, "\nSessions")?;
    for entry in &view.entries {
        let session = entry.session;
        writeln!(out, "{:>3}. {}", entry.index + 1, session.title)?;
        if !view.expand_all {
            continue;
        }
        if !session.summary.is_empty() {
            writeln!(out, "     {}", session.summary)?;
        }
        writeln!(out, "     Tags: {}", session.tags.join(", "))?;
        if entry.show_presenter {
            for presenter in &session.presenters {
                writeln!(out, "     Presented by {}", presenter.name)?;
            }
        }
    }
    Ok(out)
}
