// tests/monitor_flow.rs
//
// End-to-end monitor sessions against a scripted mock server: launch the
// job, let the poller run at its real cadence and check the event stream.

use std::io::Read;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use tiny_http::{Header, Method, Response, Server};
use tokio::sync::mpsc;

use mediadash::api::ApiClient;
use mediadash::monitor::{launch_upload, LaunchOptions, MonitorEvent, ProgressView};

struct MockUploadServer {
    base_url: String,
}

impl MockUploadServer {
    /// Serves `POST /upload/movies` with `start` and `GET /upload/status`
    /// with the scripted responses in order, repeating the last one.
    fn start(start: (u16, String), statuses: Vec<(u16, String)>) -> Self {
        let server = Server::http("127.0.0.1:0").expect("bind mock server");
        let port = server.server_addr().to_ip().expect("ip listener").port();
        let cursor = Arc::new(Mutex::new(0usize));

        thread::spawn(move || {
            for mut request in server.incoming_requests() {
                let mut body = String::new();
                let _ = request.as_reader().read_to_string(&mut body);

                let (code, json) = match (request.method(), request.url()) {
                    (Method::Post, "/upload/movies") => start.clone(),
                    (Method::Get, "/upload/status") => {
                        let mut i = cursor.lock().expect("cursor lock");
                        let step = statuses
                            .get(*i)
                            .or_else(|| statuses.last())
                            .cloned()
                            .expect("status request with an empty script");
                        *i += 1;
                        step
                    }
                    _ => (404, r#"{"status":"error","message":"not found"}"#.to_string()),
                };

                let header =
                    Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
                        .expect("header");
                let _ = request.respond(
                    Response::from_string(json)
                        .with_status_code(code)
                        .with_header(header),
                );
            }
        });

        Self {
            base_url: format!("http://127.0.0.1:{}", port),
        }
    }
}

fn accepted() -> (u16, String) {
    (200, r#"{"status":"success","message":"started"}"#.to_string())
}

async fn run_session(server: &MockUploadServer) -> Vec<MonitorEvent> {
    let api = ApiClient::new(&server.base_url).expect("api client");
    let (tx, mut rx) = mpsc::unbounded_channel();

    tokio::time::timeout(
        Duration::from_secs(30),
        launch_upload(api, tx, LaunchOptions::default()),
    )
    .await
    .expect("session should finish well inside the timeout");

    let mut events = Vec::new();
    while let Some(event) = rx.recv().await {
        events.push(event);
    }
    events
}

#[tokio::test]
async fn full_session_yields_feed_refreshes_and_summary() {
    let server = MockUploadServer::start(
        accepted(),
        vec![
            (
                200,
                r#"{"is_uploading":true,"total_files":2,"current_index":1,
                    "current_file":"a.mp4","current_file_percent":40,"results":[]}"#
                    .to_string(),
            ),
            (
                200,
                r#"{"is_uploading":true,"total_files":2,"current_index":2,
                    "current_file":"b.mp4","current_file_percent":10,
                    "results":[{"file":"a.mp4","uploaded":true,"file_code":"aaa"}]}"#
                    .to_string(),
            ),
            (
                200,
                r#"{"is_uploading":false,"total_files":2,"current_index":2,
                    "current_file":"b.mp4","current_file_percent":100,
                    "results":[{"file":"a.mp4","uploaded":true,"file_code":"aaa"},
                               {"file":"b.mp4","uploaded":false,"file_code":null}]}"#
                    .to_string(),
            ),
        ],
    );

    let events = run_session(&server).await;

    assert!(events
        .iter()
        .any(|e| matches!(e, MonitorEvent::Log(l) if l.contains("Polling status"))));

    // Progress was projected while files were known
    assert!(events.iter().any(|e| matches!(
        e,
        MonitorEvent::Progress(ProgressView::Active { total: 2, .. })
    )));

    // The feed grew incrementally and stayed most-recent-first
    let feeds: Vec<Vec<String>> = events
        .iter()
        .filter_map(|e| match e {
            MonitorEvent::FeedChanged(f) => {
                Some(f.iter().map(|r| r.file.clone()).collect())
            }
            _ => None,
        })
        .collect();
    assert_eq!(
        feeds,
        vec![
            vec!["a.mp4".to_string()],
            vec!["b.mp4".to_string(), "a.mp4".to_string()],
        ]
    );

    // Two changed-path refreshes plus the forced final one
    let refreshes = events
        .iter()
        .filter(|e| matches!(e, MonitorEvent::RefreshUploads))
        .count();
    assert_eq!(refreshes, 3);

    let summary = events
        .iter()
        .find_map(|e| match e {
            MonitorEvent::SessionFinished(s) => Some(s.clone()),
            _ => None,
        })
        .expect("session summary");
    assert_eq!(summary.results.len(), 2);
    assert_eq!(summary.total_files, 2);

    // Per-result completion log with marks and codes
    assert!(events
        .iter()
        .any(|e| matches!(e, MonitorEvent::Log(l) if l.contains("✅ a.mp4") && l.contains("aaa"))));
    assert!(events
        .iter()
        .any(|e| matches!(e, MonitorEvent::Log(l) if l.contains("❌ b.mp4"))));
}

#[tokio::test]
async fn zero_file_session_reports_the_empty_state() {
    let server = MockUploadServer::start(
        accepted(),
        vec![(
            200,
            r#"{"is_uploading":false,"total_files":0,"current_index":0,
                "current_file":"","current_file_percent":0,"results":[]}"#
                .to_string(),
        )],
    );

    let events = run_session(&server).await;

    assert!(events.contains(&MonitorEvent::Progress(ProgressView::NoFilesFound)));
    assert!(events
        .iter()
        .any(|e| matches!(e, MonitorEvent::Log(l) if l.contains("No video files were found"))));
    assert!(events
        .iter()
        .any(|e| matches!(e, MonitorEvent::SessionFinished(s) if s.total_files == 0)));
}

#[tokio::test]
async fn rejected_launch_creates_no_poller() {
    let server = MockUploadServer::start(
        (
            500,
            r#"{"status":"error","message":"Uploader not configured"}"#.to_string(),
        ),
        vec![],
    );

    let events = run_session(&server).await;

    let rejection = events
        .iter()
        .find_map(|e| match e {
            MonitorEvent::LaunchRejected(reason) => Some(reason.clone()),
            _ => None,
        })
        .expect("launch rejection");
    assert!(rejection.contains("Uploader not configured"));

    // Side effects end at the rejection: no polling ever happened
    assert!(!events
        .iter()
        .any(|e| matches!(e, MonitorEvent::Progress(_) | MonitorEvent::SessionFinished(_))));
}

#[tokio::test]
async fn transient_poll_failure_does_not_stop_the_loop() {
    let server = MockUploadServer::start(
        accepted(),
        vec![
            (500, r#"{"status":"error","message":"hiccup"}"#.to_string()),
            (
                200,
                r#"{"is_uploading":false,"total_files":1,"current_index":1,
                    "current_file":"a.mp4","current_file_percent":100,
                    "results":[{"file":"a.mp4","uploaded":true,"file_code":"aaa"}]}"#
                    .to_string(),
            ),
        ],
    );

    let events = run_session(&server).await;

    // The dropped poll was absorbed and the session still completed
    assert!(events
        .iter()
        .any(|e| matches!(e, MonitorEvent::SessionFinished(s) if s.results.len() == 1)));
}
