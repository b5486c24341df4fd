//! YouTube Data API comment source.
//!
//! Lists the top-level comments of a video through the `commentThreads`
//! endpoint of the YouTube Data API v3 and follows `nextPageToken` via
//! [`paginate`] until the API runs dry or the retrieval cap is reached.
//!
//! # Configuration
//!
//! ```toml
//! [source]
//! base_url = "https://www.googleapis.com/youtube/v3"
//! api_key_env = "YOUTUBE_API_KEY"
//! page_size = 100
//! max_comments = 300
//! order = "relevance"
//! timeout_secs = 30
//! ```
//!
//! # Environment Variables
//!
//! The API key is read once, at construction, from the variable named by
//! `api_key_env`. Unset or empty means no credential: every fetch then fails
//! with [`PipelineError::Authentication`] without touching the network.
//!
//! # Error Mapping
//!
//! | Condition | Error |
//! |-----------|-------|
//! | no key configured | `Authentication` |
//! | HTTP 401, or reason `keyInvalid` / `keyExpired` / `API_KEY_INVALID` | `Authentication` |
//! | any other non-2xx (quota, not found, comments disabled) | `SourceUnavailable` |
//! | connect error, timeout, undecodable body | `SourceUnavailable` |

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

use crate::config::SourceConfig;
use crate::error::PipelineError;
use crate::models::{Comment, VideoReference};
use crate::traits::{paginate, CommentPage, CommentPageApi, CommentSource, PageRequest, RetrievalLimits};

const AUTH_REASONS: &[&str] = &["keyInvalid", "keyExpired", "API_KEY_INVALID", "API_KEY_EXPIRED"];

// ============ Response shapes ============

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentThreadList {
    #[serde(default)]
    items: Vec<CommentThread>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CommentThread {
    snippet: Option<ThreadSnippet>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThreadSnippet {
    top_level_comment: Option<TopLevelComment>,
}

#[derive(Debug, Deserialize)]
struct TopLevelComment {
    snippet: Option<CommentSnippet>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentSnippet {
    text_display: Option<serde_json::Value>,
}

impl CommentThread {
    /// Display text of the thread's top-level comment; empty when absent.
    fn into_comment(self) -> Comment {
        let text = self
            .snippet
            .and_then(|s| s.top_level_comment)
            .and_then(|c| c.snippet)
            .and_then(|s| s.text_display)
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default();
        Comment::new(text)
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiError,
}

#[derive(Debug, Default, Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
    #[serde(default)]
    errors: Vec<ApiErrorReason>,
    #[serde(default)]
    details: Vec<ApiErrorReason>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorReason {
    #[serde(default)]
    reason: String,
}

impl ApiError {
    fn is_auth_failure(&self) -> bool {
        self.errors
            .iter()
            .chain(self.details.iter())
            .any(|e| AUTH_REASONS.contains(&e.reason.as_str()))
    }

    fn reason(&self) -> Option<&str> {
        self.errors
            .iter()
            .map(|e| e.reason.as_str())
            .find(|r| !r.is_empty())
    }
}

/// Classify a non-success response.
fn classify_failure(status: StatusCode, body: &str) -> PipelineError {
    let api_error = serde_json::from_str::<ApiErrorEnvelope>(body)
        .map(|e| e.error)
        .unwrap_or_default();

    let detail = match (api_error.reason(), api_error.message.is_empty()) {
        (Some(reason), false) => format!("HTTP {} ({}): {}", status, reason, api_error.message),
        (Some(reason), true) => format!("HTTP {} ({})", status, reason),
        (None, false) => format!("HTTP {}: {}", status, api_error.message),
        (None, true) => format!(
            "HTTP {}: {}",
            status,
            body.chars().take(200).collect::<String>()
        ),
    };

    if status == StatusCode::UNAUTHORIZED || api_error.is_auth_failure() {
        PipelineError::Authentication(format!("YouTube API rejected the key: {}", detail))
    } else {
        PipelineError::SourceUnavailable(format!("YouTube API request failed: {}", detail))
    }
}

// ============ Source ============

/// Comment source backed by the YouTube Data API.
pub struct YouTubeSource {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    order: String,
    text_format: String,
    timeout: Duration,
    limits: RetrievalLimits,
}

impl YouTubeSource {
    /// Build a source with an explicit key. An empty key counts as none.
    pub fn new(config: &SourceConfig, api_key: Option<String>) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            order: config.order.clone(),
            text_format: config.text_format.clone(),
            timeout,
            limits: RetrievalLimits {
                page_size: config.page_size,
                max_comments: config.max_comments,
            },
        })
    }

    /// Build a source whose key comes from the `api_key_env` variable.
    pub fn from_config(config: &SourceConfig) -> Result<Self> {
        let api_key = std::env::var(&config.api_key_env).ok();
        Self::new(config, api_key)
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn limits(&self) -> &RetrievalLimits {
        &self.limits
    }

    fn missing_credential(&self) -> PipelineError {
        PipelineError::Authentication("no YouTube API key configured".to_string())
    }
}

#[async_trait]
impl CommentPageApi for YouTubeSource {
    async fn list_page(&self, request: &PageRequest) -> Result<CommentPage, PipelineError> {
        let key = self.api_key.as_deref().ok_or_else(|| self.missing_credential())?;
        let url = format!("{}/commentThreads", self.base_url);
        let page_size = request.page_size.to_string();

        let mut query: Vec<(&str, &str)> = vec![
            ("part", "snippet"),
            ("videoId", request.video_id.as_str()),
            ("maxResults", page_size.as_str()),
            ("order", self.order.as_str()),
            ("textFormat", self.text_format.as_str()),
            ("key", key),
        ];
        if let Some(token) = request.page_token.as_deref() {
            query.push(("pageToken", token));
        }

        let resp = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    PipelineError::SourceUnavailable(format!(
                        "YouTube API request timed out after {}s",
                        self.timeout.as_secs()
                    ))
                } else {
                    PipelineError::SourceUnavailable(format!(
                        "YouTube API request failed: {}",
                        e.without_url()
                    ))
                }
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            PipelineError::SourceUnavailable(format!(
                "Failed to read YouTube API response: {}",
                e.without_url()
            ))
        })?;

        if !status.is_success() {
            return Err(classify_failure(status, &body));
        }

        let list: CommentThreadList = serde_json::from_str(&body).map_err(|e| {
            PipelineError::SourceUnavailable(format!("Unexpected YouTube API response: {}", e))
        })?;

        debug!(
            video = %request.video_id,
            items = list.items.len(),
            has_next = list.next_page_token.is_some(),
            "commentThreads page"
        );

        Ok(CommentPage {
            comments: list.items.into_iter().map(CommentThread::into_comment).collect(),
            next_page_token: list.next_page_token.filter(|t| !t.is_empty()),
        })
    }
}

#[async_trait]
impl CommentSource for YouTubeSource {
    fn name(&self) -> &str {
        "youtube"
    }

    async fn fetch_comments(&self, video: &VideoReference) -> Result<Vec<Comment>, PipelineError> {
        if !self.has_credential() {
            return Err(self.missing_credential());
        }
        paginate(self, video, &self.limits).await
    }
}
