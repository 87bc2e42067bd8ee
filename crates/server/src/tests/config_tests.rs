use super::*;

use std::{
    collections::HashMap,
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn temp_settings_file(contents: &str) -> PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("vote_server_settings_{suffix}.toml"));
    fs::write(&path, contents).expect("write settings");
    path
}

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn missing_settings_file_falls_back_to_defaults() {
    let path = env::temp_dir().join("vote_server_settings_absent.toml");
    let settings = load_settings_from(&path, no_env).expect("settings");
    assert_eq!(settings.server_bind, "127.0.0.1:8080");
    assert_eq!(settings.sessions_path, PathBuf::from("./static/tmp.json"));
    assert_eq!(settings.conference, ConferenceConfig::default());
}

#[test]
fn reads_conference_table_from_file() {
    let path = temp_settings_file(
        r#"
bind_addr = "0.0.0.0:9000"
sessions_path = "/srv/sessions.json"

[conference]
name = "DDD Perth"
anonymous_voting = true
min_votes = 3
max_votes = 5
voting_open_from = "2026-10-01T00:00:00Z"
voting_open_until = "2026-10-14T00:00:00+08:00"
"#,
    );
    let settings = load_settings_from(&path, no_env).expect("settings");
    assert_eq!(settings.server_bind, "0.0.0.0:9000");
    assert_eq!(settings.sessions_path, PathBuf::from("/srv/sessions.json"));
    assert_eq!(settings.conference.name, "DDD Perth");
    assert!(settings.conference.anonymous_voting);
    assert_eq!(
        settings.conference.voting_open_until.to_rfc3339(),
        "2026-10-13T16:00:00+00:00"
    );
    fs::remove_file(path).expect("cleanup");
}

#[test]
fn env_overrides_win_over_file() {
    let path = temp_settings_file(
        r#"
bind_addr = "0.0.0.0:9000"

[conference]
min_votes = 2
max_votes = 2
"#,
    );
    let overrides: HashMap<&str, &str> = [
        ("APP__BIND_ADDR", "127.0.0.1:7000"),
        ("APP__MAX_VOTES", "4"),
        ("APP__SESSIONS_URL", "https://example.org"),
    ]
    .into_iter()
    .collect();
    let settings = load_settings_from(&path, |key| overrides.get(key).map(|v| v.to_string()))
        .expect("settings");
    assert_eq!(settings.server_bind, "127.0.0.1:7000");
    assert_eq!(settings.conference.min_votes, 2);
    assert_eq!(settings.conference.max_votes, 4);
    assert_eq!(settings.sessions_url.as_deref(), Some("https://example.org"));
    fs::remove_file(path).expect("cleanup");
}

#[test]
fn rejects_min_votes_above_max_votes() {
    let path = temp_settings_file(
        r#"
[conference]
min_votes = 5
max_votes = 3
"#,
    );
    let err = load_settings_from(&path, no_env).expect_err("should fail");
    assert!(format!("{err:#}").contains("exceeds maximum"));
    fs::remove_file(path).expect("cleanup");
}

#[test]
fn rejects_unparseable_env_value() {
    let path = env::temp_dir().join("vote_server_settings_absent_env.toml");
    let err = load_settings_from(&path, |key| {
        (key == "APP__ANONYMOUS_VOTING").then(|| "sometimes".to_string())
    })
    .expect_err("should fail");
    assert!(err.to_string().contains("APP__ANONYMOUS_VOTING"));
}

#[test]
fn rejects_unknown_keys_in_file() {
    let path = temp_settings_file("listen_port = 80\n");
    assert!(load_settings_from(&path, no_env).is_err());
    fs::remove_file(path).expect("cleanup");
}

#[test]
fn bind_address_only_comes_from_app_prefixed_env() {
    let path = env::temp_dir().join("vote_server_settings_absent_bind.toml");
    let settings = load_settings_from(&path, |key| {
        (key == "SERVER_BIND").then(|| "0.0.0.0:1".to_string())
    })
    .expect("settings");
    assert_eq!(settings.server_bind, "127.0.0.1:8080");
}
