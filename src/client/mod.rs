//! Async HTTP client for the calculator API.
//!
//! Every method issues exactly one request. Nothing is retried or cached;
//! a non-2xx status becomes [ClientError::Service].

pub mod types;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::boost::{BoostRequest, BoostResult};
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

pub use types::{
    canonical_skill, GeDetail, GeStatus, Hiscore, ReportRequest, Suggestions, UpdateStatus,
    WikiExtract, SKILLS,
};

/// Shortest term the GE suggestion endpoint is queried with.
pub const MIN_GE_TERM_LEN: usize = 3;

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `POST /api/calculate`. The boost formula is applied remotely.
    pub async fn calculate(&self, request: &BoostRequest) -> Result<BoostResult> {
        log::debug!(
            "calculate: base_xp={} add_xp={} clan_avatar={}",
            request.base_xp,
            request.add_xp,
            request.clan_avatar
        );
        let resp = self
            .http
            .post(self.url("/api/calculate"))
            .json(request)
            .send()
            .await?;
        read_json(resp).await
    }

    /// `GET /api/hiscore`. Rejects an empty username or unknown skill
    /// without contacting the server.
    pub async fn hiscore(&self, username: &str, skill: &str) -> Result<Hiscore> {
        let username = username.trim();
        if username.is_empty() {
            return Err(ClientError::validation("Please enter a username."));
        }
        let Some(skill) = canonical_skill(skill) else {
            return Err(ClientError::validation(format!("Unknown skill '{}'.", skill.trim())));
        };
        let resp = self
            .http
            .get(self.url("/api/hiscore"))
            .query(&[("username", username), ("skill", skill)])
            .send()
            .await?;
        read_json(resp).await
    }

    pub async fn wiki_search(&self, term: &str) -> Result<Vec<String>> {
        let term = term.trim();
        if term.is_empty() {
            return Err(ClientError::validation("Enter a wiki search term."));
        }
        let resp = self
            .http
            .get(self.url("/api/wiki/search"))
            .query(&[("term", term)])
            .send()
            .await?;
        read_json(resp).await
    }

    pub async fn wiki_extract(&self, title: &str) -> Result<WikiExtract> {
        let resp = self
            .http
            .get(self.url("/api/wiki/extract"))
            .query(&[("title", title)])
            .send()
            .await?;
        read_json(resp).await
    }

    pub async fn ge_status(&self) -> Result<GeStatus> {
        let resp = self.http.get(self.url("/api/ge/status")).send().await?;
        read_json(resp).await
    }

    /// `GET /api/ge/suggest`. A 503 means the catalog is still loading and
    /// is returned as [Suggestions::StillLoading], not as an error.
    pub async fn ge_suggest(&self, term: &str) -> Result<Suggestions> {
        let term = term.trim();
        if term.chars().count() < MIN_GE_TERM_LEN {
            return Err(ClientError::validation(format!(
                "Enter at least {MIN_GE_TERM_LEN} characters."
            )));
        }
        let resp = self
            .http
            .get(self.url("/api/ge/suggest"))
            .query(&[("term", term)])
            .send()
            .await?;
        if resp.status() == reqwest::StatusCode::SERVICE_UNAVAILABLE {
            log::info!("GE suggestions for '{term}' unavailable: catalog still loading");
            return Ok(Suggestions::StillLoading);
        }
        read_json(resp).await.map(Suggestions::Ready)
    }

    pub async fn ge_detail(&self, name: &str) -> Result<GeDetail> {
        let resp = self
            .http
            .get(self.url("/api/ge/detail"))
            .query(&[("name", name)])
            .send()
            .await?;
        read_json(resp).await
    }

    pub async fn updates(&self) -> Result<UpdateStatus> {
        let resp = self.http.get(self.url("/api/updates")).send().await?;
        read_json(resp).await
    }

    pub async fn logs(&self) -> Result<Vec<String>> {
        let resp = self.http.get(self.url("/api/logs")).send().await?;
        read_json(resp).await
    }

    pub async fn download_logs(&self) -> Result<String> {
        let resp = self
            .http
            .get(self.url("/api/download/logs.txt"))
            .send()
            .await?;
        read_text(resp).await
    }

    pub async fn download_report(&self, report: &ReportRequest) -> Result<String> {
        let resp = self
            .http
            .post(self.url("/api/download/report.txt"))
            .json(report)
            .send()
            .await?;
        read_text(resp).await
    }
}

fn check_status(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    log::warn!("{} responded {}", resp.url().path(), status);
    Err(ClientError::Service {
        status: status.as_u16(),
        message: status.canonical_reason().unwrap_or("Unknown Status").to_string(),
    })
}

async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T> {
    Ok(check_status(resp)?.json::<T>().await?)
}

async fn read_text(resp: Response) -> Result<String> {
    Ok(check_status(resp)?.text().await?)
}
