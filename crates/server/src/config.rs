use std::{
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use shared::domain::ConferenceConfig;

pub const DEFAULT_CONFIG_PATH: &str = "vote.toml";

#[derive(Debug, Clone)]
pub struct Settings {
    pub server_bind: String,
    pub sessions_path: PathBuf,
    /// When set, pages load sessions from this site over HTTP instead of
    /// reading `sessions_path`.
    pub sessions_url: Option<String>,
    pub conference: ConferenceConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:8080".into(),
            sessions_path: PathBuf::from("./static/tmp.json"),
            sessions_url: None,
            conference: ConferenceConfig::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    bind_addr: Option<String>,
    sessions_path: Option<PathBuf>,
    sessions_url: Option<String>,
    #[serde(default)]
    conference: FileConference,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConference {
    name: Option<String>,
    anonymous_voting: Option<bool>,
    min_votes: Option<u32>,
    max_votes: Option<u32>,
    voting_open_from: Option<DateTime<Utc>>,
    voting_open_until: Option<DateTime<Utc>>,
}

pub fn load_settings() -> anyhow::Result<Settings> {
    let path = std::env::var("APP__CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
    load_settings_from(Path::new(&path), |key| std::env::var(key).ok())
}

pub fn load_settings_from(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    match fs::read_to_string(path) {
        Ok(raw) => {
            let file_cfg: FileSettings = toml::from_str(&raw)
                .with_context(|| format!("failed to parse settings file '{}'", path.display()))?;
            apply_file_settings(&mut settings, file_cfg);
        }
        Err(error) if error.kind() == io::ErrorKind::NotFound => {}
        Err(error) => {
            return Err(error)
                .with_context(|| format!("failed to read settings file '{}'", path.display()))
        }
    }

    apply_env_overrides(&mut settings, env)?;

    settings
        .conference
        .validate()
        .context("invalid conference settings")?;
    Ok(settings)
}

fn apply_file_settings(settings: &mut Settings, file_cfg: FileSettings) {
    if let Some(v) = file_cfg.bind_addr {
        settings.server_bind = v;
    }
    if let Some(v) = file_cfg.sessions_path {
        settings.sessions_path = v;
    }
    if let Some(v) = file_cfg.sessions_url {
        settings.sessions_url = Some(v);
    }

    let conference = &mut settings.conference;
    let file_conf = file_cfg.conference;
    if let Some(v) = file_conf.name {
        conference.name = v;
    }
    if let Some(v) = file_conf.anonymous_voting {
        conference.anonymous_voting = v;
    }
    if let Some(v) = file_conf.min_votes {
        conference.min_votes = v;
    }
    if let Some(v) = file_conf.max_votes {
        conference.max_votes = v;
    }
    if let Some(v) = file_conf.voting_open_from {
        conference.voting_open_from = v;
    }
    if let Some(v) = file_conf.voting_open_until {
        conference.voting_open_until = v;
    }
}

fn apply_env_overrides(
    settings: &mut Settings,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<()> {
    if let Some(v) = env("APP__BIND_ADDR") {
        settings.server_bind = v;
    }
    if let Some(v) = env("APP__SESSIONS_PATH") {
        settings.sessions_path = PathBuf::from(v);
    }
    if let Some(v) = env("APP__SESSIONS_URL") {
        settings.sessions_url = Some(v).filter(|url| !url.trim().is_empty());
    }

    let conference = &mut settings.conference;
    if let Some(v) = env("APP__CONFERENCE_NAME") {
        conference.name = v;
    }
    if let Some(v) = env("APP__ANONYMOUS_VOTING") {
        conference.anonymous_voting = parse_env("APP__ANONYMOUS_VOTING", &v)?;
    }
    if let Some(v) = env("APP__MIN_VOTES") {
        conference.min_votes = parse_env("APP__MIN_VOTES", &v)?;
    }
    if let Some(v) = env("APP__MAX_VOTES") {
        conference.max_votes = parse_env("APP__MAX_VOTES", &v)?;
    }
    if let Some(v) = env("APP__VOTING_OPEN_FROM") {
        conference.voting_open_from = parse_env("APP__VOTING_OPEN_FROM", &v)?;
    }
    if let Some(v) = env("APP__VOTING_OPEN_UNTIL") {
        conference.voting_open_until = parse_env("APP__VOTING_OPEN_UNTIL", &v)?;
    }

    Ok(())
}

fn parse_env<T>(key: &str, raw: &str) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse::<T>()
        .with_context(|| format!("invalid value '{raw}' for {key}"))
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
