/// HTTP client for the job cross-reference backend.
///
/// One thin method per endpoint; no retries. Failures are decoded into
/// `CommonError::Api` using the backend's `{"error": "..."}` envelope when
/// present, and the raw body text (bounded) otherwise. Callers decide
/// whether a failure is user-visible or degrades silently.
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::CommonError;
use crate::model::{
    BookmarkAck, BookmarkList, CompanyMentors, Job, MentorStats, ResumeExtract, SearchRequest,
    SearchResponse,
};

const MAX_ERROR_BODY_BYTES: usize = 8 * 1024;

#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl ApiConfig {
    /// Read the backend location from the environment.
    ///
    /// Optional:
    /// - `JOBCROSS_API_URL`: backend base URL (default `http://127.0.0.1:5000`)
    /// - `JOBCROSS_TIMEOUT_SECS`: per-request timeout in seconds (default 30)
    pub fn from_env() -> Self {
        let base_url = std::env::var("JOBCROSS_API_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:5000".to_string());

        let timeout = std::env::var("JOBCROSS_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(30));

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }
}

#[derive(Clone)]
pub struct ApiClient {
    config: ApiConfig,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Result<Self, CommonError> {
        let http = reqwest::Client::builder()
            .user_agent("jobcross-cli")
            .build()?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// GET /api/mentors: mentor dataset statistics.
    pub async fn mentor_stats(&self) -> Result<MentorStats, CommonError> {
        let url = format!("{}/api/mentors", self.config.base_url);
        let resp = self
            .http
            .get(&url)
            .timeout(self.config.timeout)
            .send()
            .await?;
        Self::parse_json_response(resp).await
    }

    /// POST /api/search: run a backend job search.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, CommonError> {
        let url = format!("{}/api/search", self.config.base_url);
        let resp = self
            .http
            .post(&url)
            .timeout(self.config.timeout)
            .json(request)
            .send()
            .await?;
        Self::parse_json_response(resp).await
    }

    /// GET /api/mentors/company/{name}: mentors working at a company.
    pub async fn mentors_for_company(&self, company: &str) -> Result<CompanyMentors, CommonError> {
        let url = format!(
            "{}/api/mentors/company/{}",
            self.config.base_url,
            urlencoding::encode(company.trim())
        );
        let resp = self
            .http
            .get(&url)
            .timeout(self.config.timeout)
            .send()
            .await?;
        Self::parse_json_response(resp).await
    }

    /// GET /api/bookmarks: all saved jobs.
    pub async fn bookmarks(&self) -> Result<BookmarkList, CommonError> {
        let url = format!("{}/api/bookmarks", self.config.base_url);
        let resp = self
            .http
            .get(&url)
            .timeout(self.config.timeout)
            .send()
            .await?;
        Self::parse_json_response(resp).await
    }

    /// POST /api/bookmarks: save a job.
    pub async fn add_bookmark(&self, job_id: &str, job: &Job) -> Result<BookmarkAck, CommonError> {
        let url = format!("{}/api/bookmarks", self.config.base_url);
        let body = serde_json::json!({ "job_id": job_id, "job_data": job });
        let resp = self
            .http
            .post(&url)
            .timeout(self.config.timeout)
            .json(&body)
            .send()
            .await?;
        Self::parse_json_response(resp).await
    }

    /// DELETE /api/bookmarks: remove a saved job.
    pub async fn remove_bookmark(&self, job_id: &str) -> Result<BookmarkAck, CommonError> {
        let url = format!("{}/api/bookmarks", self.config.base_url);
        let body = serde_json::json!({ "job_id": job_id });
        let resp = self
            .http
            .delete(&url)
            .timeout(self.config.timeout)
            .json(&body)
            .send()
            .await?;
        Self::parse_json_response(resp).await
    }

    /// POST /api/upload-resume: multipart upload; the backend extracts
    /// skills and location from the file.
    pub async fn upload_resume(&self, path: &Path) -> Result<ResumeExtract, CommonError> {
        let url = format!("{}/api/upload-resume", self.config.base_url);
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "resume".to_string());
        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
        let form = reqwest::multipart::Form::new().part("resume", part);
        let resp = self
            .http
            .post(&url)
            .timeout(self.config.timeout)
            .multipart(form)
            .send()
            .await?;
        Self::parse_json_response(resp).await
    }

    /// GET /api/reports/{filename}: download a generated report.
    pub async fn download_report(&self, filename: &str) -> Result<Vec<u8>, CommonError> {
        let url = format!(
            "{}/api/reports/{}",
            self.config.base_url,
            urlencoding::encode(filename)
        );
        let resp = self
            .http
            .get(&url)
            .timeout(self.config.timeout)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(Self::to_api_error(resp).await);
        }
        Ok(resp.bytes().await?.to_vec())
    }

    async fn parse_json_response<T: for<'de> Deserialize<'de>>(
        resp: reqwest::Response,
    ) -> Result<T, CommonError> {
        if resp.status().is_success() {
            let json = resp.json::<T>().await?;
            return Ok(json);
        }
        Err(Self::to_api_error(resp).await)
    }

    async fn to_api_error(resp: reqwest::Response) -> CommonError {
        let status = resp.status();
        let body = read_limited_text(resp).await;
        let message = match serde_json::from_str::<ErrorEnvelope>(&body) {
            Ok(envelope) => envelope.error,
            Err(_) => body,
        };
        CommonError::Api { status, message }
    }
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: String,
}

async fn read_limited_text(resp: reqwest::Response) -> String {
    match resp.bytes().await {
        Ok(bytes) => {
            let slice = &bytes[..bytes.len().min(MAX_ERROR_BODY_BYTES)];
            String::from_utf8_lossy(slice).into_owned()
        }
        Err(_) => String::new(),
    }
}
