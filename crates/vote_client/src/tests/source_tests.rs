use super::*;
use axum::{http::StatusCode as AxumStatus, routing::get, Router};
use std::{
    env, fs,
    time::{SystemTime, UNIX_EPOCH},
};
use tokio::net::TcpListener;

async fn spawn_asset_server(status: AxumStatus, body: &'static str) -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let app = Router::new().route(SESSIONS_ASSET_PATH, get(move || async move { (status, body) }));
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

fn temp_file(name: &str, contents: &str) -> PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("vote_client_{name}_{suffix}.json"));
    fs::write(&path, contents).expect("write temp file");
    path
}

#[test]
fn http_source_targets_the_session_asset() {
    let source = HttpSessionSource::new("http://localhost:8080/vote").expect("url");
    assert_eq!(source.url().as_str(), "http://localhost:8080/static/tmp.json");
}

#[tokio::test]
async fn http_source_parses_ok_body() {
    let site = spawn_asset_server(AxumStatus::OK, r#"[{"Title":"A","Tags":["x"]}]"#).await;
    let source = HttpSessionSource::new(&site).expect("url");
    let sessions = source.fetch_sessions().await.expect("sessions");
    assert_eq!(sessions, vec![Session::new("A", ["x"])]);
}

#[tokio::test]
async fn http_source_rejects_server_error_status() {
    let site = spawn_asset_server(AxumStatus::INTERNAL_SERVER_ERROR, "[]").await;
    let source = HttpSessionSource::new(&site).expect("url");
    let err = source.fetch_sessions().await.expect_err("should fail");
    assert!(matches!(
        err,
        LoadError::Status { status, .. } if status == StatusCode::INTERNAL_SERVER_ERROR
    ));
}

#[tokio::test]
async fn http_source_treats_non_200_success_as_failure() {
    let site = spawn_asset_server(AxumStatus::NON_AUTHORITATIVE_INFORMATION, "[]").await;
    let source = HttpSessionSource::new(&site).expect("url");
    let err = source.fetch_sessions().await.expect_err("should fail");
    assert!(matches!(err, LoadError::Status { .. }));
}

#[tokio::test]
async fn http_source_reports_unparseable_body() {
    let site = spawn_asset_server(AxumStatus::OK, "<html>not json</html>").await;
    let source = HttpSessionSource::new(&site).expect("url");
    let err = source.fetch_sessions().await.expect_err("should fail");
    assert!(matches!(err, LoadError::Parse(_)));
}

#[tokio::test]
async fn http_source_reports_unreachable_server() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let source = HttpSessionSource::new(&format!("http://{addr}")).expect("url");
    let err = source.fetch_sessions().await.expect_err("should fail");
    assert!(matches!(err, LoadError::Transport { .. }));
}

#[tokio::test]
async fn file_source_reads_session_list() {
    let path = temp_file("ok", r#"[{"Title":"B","Tags":["go","rust"]}]"#);
    let sessions = FileSessionSource::new(&path)
        .fetch_sessions()
        .await
        .expect("sessions");
    assert_eq!(sessions, vec![Session::new("B", ["go", "rust"])]);
    fs::remove_file(path).expect("cleanup");
}

#[tokio::test]
async fn file_source_reports_missing_file() {
    let path = env::temp_dir().join("vote_client_definitely_missing.json");
    let err = FileSessionSource::new(path)
        .fetch_sessions()
        .await
        .expect_err("should fail");
    assert!(matches!(err, LoadError::Io { .. }));
}
