// src/api.rs

//! Typed client for the media server's REST API. Every network interaction
//! in the application goes through `ApiClient`.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// One poll response from `GET /upload/status`. Immutable once parsed; the
/// monitor folds it into its own state and discards it.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusSnapshot {
    pub is_uploading: bool,
    #[serde(default)]
    pub total_files: u32,
    #[serde(default)]
    pub current_index: u32,
    #[serde(default)]
    pub current_file: String,
    #[serde(default)]
    pub current_file_percent: u8,
    #[serde(default)]
    pub results: Vec<UploadResult>,
}

/// One completed (or failed) file within an upload session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadResult {
    pub file: String,
    pub uploaded: bool,
    #[serde(default)]
    pub file_code: Option<String>,
}

/// A row of the uploads table (`GET /uploads/all`). The server emits either
/// `title` or `filename` depending on how the entry was recorded.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadRow {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub file_code: String,
    #[serde(default)]
    pub file_size: Option<String>,
}

impl UploadRow {
    pub fn display_name(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.is_empty())
            .or(self.filename.as_deref())
            .unwrap_or("-")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Movie,
    Series,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Movie => "movie",
            Category::Series => "series",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MovieDoc {
    pub title: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeriesDoc {
    pub show_title: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PopularTitle {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub category: Category,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DbCollections {
    #[serde(default)]
    pub movies: Vec<MovieDoc>,
    #[serde(default)]
    pub series: Vec<SeriesDoc>,
    #[serde(default)]
    pub popular: Vec<PopularTitle>,
}

/// What the scraper may target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrapeKind {
    Anime,
    Movie,
    Series,
}

impl ScrapeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScrapeKind::Anime => "anime",
            ScrapeKind::Movie => "movie",
            ScrapeKind::Series => "series",
        }
    }

    pub fn next(self) -> Self {
        match self {
            ScrapeKind::Anime => ScrapeKind::Movie,
            ScrapeKind::Movie => ScrapeKind::Series,
            ScrapeKind::Series => ScrapeKind::Anime,
        }
    }
}

// Generic `{status, message}` body used by several endpoints. Only the
// message matters here; acceptance is decided by the HTTP status code.
#[derive(Debug, Default, Deserialize)]
struct StatusMessage {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct UploadsEnvelope {
    #[serde(default)]
    status: String,
    #[serde(default)]
    data: Vec<UploadRow>,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct CollectionsEnvelope {
    #[serde(default)]
    status: String,
    #[serde(default)]
    data: DbCollections,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct ScrapeEnvelope {
    #[serde(default)]
    status: String,
    #[serde(default)]
    data: serde_json::Value,
    #[serde(default)]
    message: String,
}

fn server_said(message: &str) -> &str {
    if message.is_empty() {
        "server returned an error"
    } else {
        message
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let base = Url::parse(base_url)
            .with_context(|| format!("Invalid server URL: {}", base_url))?;
        let http = reqwest::Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { http, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .with_context(|| format!("Invalid endpoint path: {}", path))
    }

    /// Start the server-side batch upload job. Returns the server's
    /// acknowledgement message; any HTTP or transport failure is terminal
    /// for the launch and carries the server's reason where available.
    pub async fn start_upload(&self, delete_after: bool) -> Result<String> {
        let resp = self
            .http
            .post(self.endpoint("/upload/movies")?)
            .json(&serde_json::json!({ "delete_after": delete_after }))
            .send()
            .await
            .context("Upload start request failed")?;
        let ok = resp.status().is_success();
        let body: StatusMessage = resp.json().await.unwrap_or_default();
        if !ok {
            bail!("{}", server_said(&body.message));
        }
        Ok(body.message)
    }

    /// Fetch one status snapshot for the running upload job.
    pub async fn upload_status(&self) -> Result<StatusSnapshot> {
        self.http
            .get(self.endpoint("/upload/status")?)
            .send()
            .await
            .context("Status request failed")?
            .error_for_status()
            .context("Status request was refused")?
            .json()
            .await
            .context("Malformed status payload")
    }

    /// Full uploads table, one row per known file on the hosting service.
    pub async fn uploads_all(&self) -> Result<Vec<UploadRow>> {
        let env: UploadsEnvelope = self
            .http
            .get(self.endpoint("/uploads/all")?)
            .send()
            .await
            .context("Uploads table request failed")?
            .json()
            .await
            .context("Malformed uploads payload")?;
        if env.status != "success" {
            bail!("{}", server_said(&env.message));
        }
        Ok(env.data)
    }

    /// Movie, series and popular collections from the database.
    pub async fn db_collections(&self) -> Result<DbCollections> {
        let env: CollectionsEnvelope = self
            .http
            .get(self.endpoint("/db/collections")?)
            .send()
            .await
            .context("Collections request failed")?
            .json()
            .await
            .context("Malformed collections payload")?;
        if env.status != "success" {
            bail!("{}", server_said(&env.message));
        }
        Ok(env.data)
    }

    pub async fn add_popular(&self, title: &str, category: Category) -> Result<()> {
        let resp = self
            .http
            .post(self.endpoint("/db/popular")?)
            .json(&serde_json::json!({ "title": title, "category": category.as_str() }))
            .send()
            .await
            .context("Add popular request failed")?;
        let ok = resp.status().is_success();
        let body: StatusMessage = resp.json().await.unwrap_or_default();
        if !ok {
            bail!("{}", server_said(&body.message));
        }
        Ok(())
    }

    pub async fn delete_popular(&self, id: &str) -> Result<()> {
        self.http
            .delete(self.endpoint(&format!("/db/popular/{}", id))?)
            .send()
            .await
            .context("Delete popular request failed")?
            .error_for_status()
            .context("Delete popular was refused")?;
        Ok(())
    }

    /// Kick off the MKV remux pass on the server; resolves when it is done.
    pub async fn process_mkv(&self) -> Result<String> {
        let resp = self
            .http
            .post(self.endpoint("/process/mkv")?)
            .send()
            .await
            .context("MKV process request failed")?;
        let ok = resp.status().is_success();
        let body: StatusMessage = resp.json().await.unwrap_or_default();
        if !ok {
            bail!("{}", server_said(&body.message));
        }
        Ok(body.message)
    }

    /// Run the metadata scraper for one title; returns the scraped document
    /// pretty-printed for display.
    pub async fn scrape(&self, kind: ScrapeKind, name: &str) -> Result<String> {
        let resp = self
            .http
            .post(self.endpoint(&format!("/scrape/{}", kind.as_str()))?)
            .json(&serde_json::json!({ "name": name }))
            .send()
            .await
            .context("Scrape request failed")?;
        let ok = resp.status().is_success();
        let env: ScrapeEnvelope = resp.json().await.context("Malformed scrape payload")?;
        if !ok || env.status != "success" {
            bail!("{}", server_said(&env.message));
        }
        serde_json::to_string_pretty(&env.data).context("Failed to render scrape result")
    }

    /// Refresh the server's upload CSV from the hosting service.
    pub async fn update_csv(&self) -> Result<String> {
        let resp = self
            .http
            .post(self.endpoint("/update/csv")?)
            .send()
            .await
            .context("CSV update request failed")?;
        let ok = resp.status().is_success();
        let body: StatusMessage = resp.json().await.unwrap_or_default();
        if !ok {
            bail!("{}", server_said(&body.message));
        }
        Ok(body.message)
    }
}
