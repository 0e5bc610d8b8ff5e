// tests/api_test.rs
//
// `ApiClient` against a mock server: response parsing, request shapes and
// error mapping for each endpoint.

use std::io::Read;
use std::sync::{Arc, Mutex};
use std::thread;

use tiny_http::{Header, Response, Server};

use mediadash::api::{ApiClient, Category, ScrapeKind};

/// One recorded request: method, url, body.
type Recorded = (String, String, String);

struct MockApi {
    base_url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl MockApi {
    /// Responds to every request with `handler(method, url, body)`.
    fn start<F>(handler: F) -> Self
    where
        F: Fn(&str, &str, &str) -> (u16, String) + Send + 'static,
    {
        let server = Server::http("127.0.0.1:0").expect("bind mock server");
        let port = server.server_addr().to_ip().expect("ip listener").port();
        let requests: Arc<Mutex<Vec<Recorded>>> = Arc::new(Mutex::new(Vec::new()));
        let log = requests.clone();

        thread::spawn(move || {
            for mut request in server.incoming_requests() {
                let mut body = String::new();
                let _ = request.as_reader().read_to_string(&mut body);
                let method = request.method().to_string();
                let url = request.url().to_string();
                let (code, json) = handler(&method, &url, &body);
                log.lock()
                    .expect("request log")
                    .push((method, url, body));

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
            requests,
        }
    }

    fn client(&self) -> ApiClient {
        ApiClient::new(&self.base_url).expect("api client")
    }

    fn recorded(&self) -> Vec<Recorded> {
        self.requests.lock().expect("request log").clone()
    }
}

#[tokio::test]
async fn uploads_all_parses_rows_and_display_names() {
    let mock = MockApi::start(|_, url, _| {
        assert_eq!(url, "/uploads/all");
        (
            200,
            r#"{"status":"success","data":[
                {"title":"Blade Runner","file_code":"abc","file_size":"1.2 GB"},
                {"filename":"raw_capture.mp4","file_code":"def"}
            ]}"#
            .to_string(),
        )
    });

    let rows = mock.client().uploads_all().await.expect("rows");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].display_name(), "Blade Runner");
    assert_eq!(rows[0].file_size.as_deref(), Some("1.2 GB"));
    assert_eq!(rows[1].display_name(), "raw_capture.mp4");
    assert_eq!(rows[1].file_size, None);
}

#[tokio::test]
async fn uploads_all_surfaces_the_server_error() {
    let mock = MockApi::start(|_, _, _| {
        (
            200,
            r#"{"status":"error","message":"CSV file missing"}"#.to_string(),
        )
    });

    let err = mock.client().uploads_all().await.unwrap_err();
    assert!(format!("{:#}", err).contains("CSV file missing"));
}

#[tokio::test]
async fn db_collections_parses_all_three_collections() {
    let mock = MockApi::start(|_, url, _| {
        assert_eq!(url, "/db/collections");
        (
            200,
            r#"{"status":"success","data":{
                "movies":[{"title":"Alien","created_at":"2024-01-01"}],
                "series":[{"show_title":"Andor"}],
                "popular":[{"id":"p1","title":"Alien","category":"movie"},
                           {"id":"p2","title":"Andor","category":"series"}]
            }}"#
            .to_string(),
        )
    });

    let collections = mock.client().db_collections().await.expect("collections");
    assert_eq!(collections.movies[0].title, "Alien");
    assert_eq!(collections.series[0].show_title, "Andor");
    assert_eq!(collections.popular.len(), 2);
    assert_eq!(collections.popular[1].category, Category::Series);
}

#[tokio::test]
async fn add_popular_posts_title_and_category() {
    let mock = MockApi::start(|method, url, _| {
        assert_eq!(method, "POST");
        assert_eq!(url, "/db/popular");
        (200, r#"{"status":"success","message":"added"}"#.to_string())
    });

    mock.client()
        .add_popular("Andor", Category::Series)
        .await
        .expect("add");

    let requests = mock.recorded();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_str(&requests[0].2).expect("json body");
    assert_eq!(body["title"], "Andor");
    assert_eq!(body["category"], "series");
}

#[tokio::test]
async fn delete_popular_targets_the_id_path() {
    let mock = MockApi::start(|method, url, _| {
        assert_eq!(method, "DELETE");
        assert_eq!(url, "/db/popular/p1");
        (200, r#"{"status":"success"}"#.to_string())
    });

    mock.client().delete_popular("p1").await.expect("delete");
    assert_eq!(mock.recorded().len(), 1);
}

#[tokio::test]
async fn start_upload_sends_the_delete_flag_and_returns_the_message() {
    let mock = MockApi::start(|method, url, _| {
        assert_eq!(method, "POST");
        assert_eq!(url, "/upload/movies");
        (
            200,
            r#"{"status":"success","message":"Upload started"}"#.to_string(),
        )
    });

    let message = mock.client().start_upload(true).await.expect("start");
    assert_eq!(message, "Upload started");

    let requests = mock.recorded();
    let body: serde_json::Value = serde_json::from_str(&requests[0].2).expect("json body");
    assert_eq!(body["delete_after"], true);
}

#[tokio::test]
async fn start_upload_maps_a_refusal_to_the_server_message() {
    let mock = MockApi::start(|_, _, _| {
        (
            409,
            r#"{"status":"error","message":"An upload is already in progress"}"#.to_string(),
        )
    });

    let err = mock.client().start_upload(true).await.unwrap_err();
    assert!(format!("{:#}", err).contains("already in progress"));
}

#[tokio::test]
async fn scrape_pretty_prints_the_scraped_document() {
    let mock = MockApi::start(|method, url, _| {
        assert_eq!(method, "POST");
        assert_eq!(url, "/scrape/movie");
        (
            200,
            r#"{"status":"success","data":{"title":"Dune","year":2021}}"#.to_string(),
        )
    });

    let pretty = mock
        .client()
        .scrape(ScrapeKind::Movie, "Dune")
        .await
        .expect("scrape");
    assert!(pretty.contains("\"title\": \"Dune\""));

    let requests = mock.recorded();
    let body: serde_json::Value = serde_json::from_str(&requests[0].2).expect("json body");
    assert_eq!(body["name"], "Dune");
}

#[tokio::test]
async fn process_mkv_and_update_csv_return_the_messages() {
    let mock = MockApi::start(|_, url, _| match url {
        "/process/mkv" => (
            200,
            r#"{"status":"success","message":"Processed 3 files"}"#.to_string(),
        ),
        "/update/csv" => (
            200,
            r#"{"status":"success","message":"CSV refreshed"}"#.to_string(),
        ),
        _ => (404, r#"{"status":"error","message":"not found"}"#.to_string()),
    });

    let client = mock.client();
    assert_eq!(client.process_mkv().await.expect("mkv"), "Processed 3 files");
    assert_eq!(client.update_csv().await.expect("csv"), "CSV refreshed");
}
