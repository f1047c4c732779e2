use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::catalog::ActivityCatalog;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("server rejected the request ({status})")]
    Rejected {
        status: StatusCode,
        detail: Option<String>,
    },
}

impl ApiError {
    /// Server-supplied `detail` text, when the rejection body carried one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { detail, .. } => detail.as_deref(),
            ApiError::Transport { .. } => None,
        }
    }
}

/// The REST surface this front-end consumes. The server owns all
/// validation and state; implementations only move bytes.
#[allow(async_fn_in_trait)]
pub trait ActivitiesApi {
    async fn fetch_catalog(&self) -> Result<ActivityCatalog, ApiError>;
    async fn signup(&self, activity: &str, email: &str) -> Result<String, ApiError>;
    async fn unregister(&self, activity: &str, email: &str) -> Result<String, ApiError>;
}

#[derive(Debug, Deserialize)]
struct MessageBody {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

/// HTTP implementation against the activities service.
pub struct HttpActivitiesApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpActivitiesApi {
    /// No request timeout is set; calls resolve or fail per the
    /// transport's own policy.
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn catalog_url(&self) -> String {
        format!("{}/activities", self.base_url)
    }

    fn mutation_url(&self, activity: &str, action: &str, email: &str) -> String {
        format!(
            "{}/activities/{}/{}?email={}",
            self.base_url,
            urlencoding::encode(activity),
            action,
            urlencoding::encode(email)
        )
    }

    async fn read_mutation_response(
        &self,
        resp: reqwest::Response,
        url: &str,
    ) -> Result<String, ApiError> {
        let status = resp.status();
        if !status.is_success() {
            let detail = resp.json::<ErrorBody>().await.ok().and_then(|b| b.detail);
            warn!("mutation rejected by {url}: {status}");
            return Err(ApiError::Rejected { status, detail });
        }
        let body: MessageBody = resp.json().await.map_err(|e| transport(url, e))?;
        Ok(body.message)
    }
}

impl ActivitiesApi for HttpActivitiesApi {
    async fn fetch_catalog(&self) -> Result<ActivityCatalog, ApiError> {
        let url = self.catalog_url();
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| transport(&url, e))?;

        let status = resp.status();
        if !status.is_success() {
            warn!("catalog fetch returned {status}");
            return Err(ApiError::Rejected {
                status,
                detail: None,
            });
        }

        resp.json::<ActivityCatalog>()
            .await
            .map_err(|e| transport(&url, e))
    }

    async fn signup(&self, activity: &str, email: &str) -> Result<String, ApiError> {
        let url = self.mutation_url(activity, "signup", email);
        let resp = self
            .client
            .post(&url)
            .send()
            .await
            .map_err(|e| transport(&url, e))?;
        self.read_mutation_response(resp, &url).await
    }

    async fn unregister(&self, activity: &str, email: &str) -> Result<String, ApiError> {
        let url = self.mutation_url(activity, "unregister", email);
        let resp = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|e| transport(&url, e))?;
        self.read_mutation_response(resp, &url).await
    }
}

fn transport(url: &str, source: reqwest::Error) -> ApiError {
    warn!("request to {url} failed: {source}");
    ApiError::Transport {
        url: url.to_string(),
        source,
    }
}
