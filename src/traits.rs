//! Extension traits at the pipeline's seams.
//!
//! Each stage that touches the outside world, or that tests want to
//! replace, sits behind a trait:
//!
//! ```text
//! ┌───────────────┐   ┌────────────────┐   ┌───────────────┐
//! │ CommentSource │──▶│ PolarityModel  │──▶│ OutputLocator │
//! │  (YouTube,    │   │ (lexicon,      │   │ (fixed dir,   │
//! │   in-memory)  │   │  naive Bayes)  │   │  per-run dir) │
//! └───────┬───────┘   └────────────────┘   └───────────────┘
//!         │
//!         ▼
//! ┌────────────────┐
//! │ CommentPageApi │  one request = one page
//! └────────────────┘
//! ```
//!
//! Pagination itself is transport-independent and lives in [`paginate`].

use async_trait::async_trait;
use tracing::debug;

use crate::error::PipelineError;
use crate::models::{Comment, ReportBundle, VideoReference};

// ═══════════════════════════════════════════════════════════════════════
// Comment retrieval
// ═══════════════════════════════════════════════════════════════════════

/// Produces the top-level comments of a video.
///
/// Implementations perform no retries; a failure is surfaced for the
/// caller to decide.
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use yt_sentiment::error::PipelineError;
/// use yt_sentiment::models::{Comment, VideoReference};
/// use yt_sentiment::traits::CommentSource;
///
/// struct Canned(Vec<String>);
///
/// #[async_trait]
/// impl CommentSource for Canned {
///     fn name(&self) -> &str { "canned" }
///
///     async fn fetch_comments(
///         &self,
///         _video: &VideoReference,
///     ) -> Result<Vec<Comment>, PipelineError> {
///         Ok(self.0.iter().map(Comment::new).collect())
///     }
/// }
/// ```
#[async_trait]
pub trait CommentSource: Send + Sync {
    /// Short identifier used in logs (e.g. `"youtube"`).
    fn name(&self) -> &str;

    /// Fetch comments in the order the remote ranks them.
    async fn fetch_comments(&self, video: &VideoReference) -> Result<Vec<Comment>, PipelineError>;
}

/// Parameters of a single page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub video_id: String,
    pub page_size: u32,
    pub page_token: Option<String>,
}

/// One page of results plus the cursor to the next one.
#[derive(Debug, Clone, Default)]
pub struct CommentPage {
    pub comments: Vec<Comment>,
    pub next_page_token: Option<String>,
}

/// A paginated "list comments for a video" endpoint.
#[async_trait]
pub trait CommentPageApi: Send + Sync {
    async fn list_page(&self, request: &PageRequest) -> Result<CommentPage, PipelineError>;
}

/// Bounds applied by [`paginate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetrievalLimits {
    /// Comments requested per page.
    pub page_size: u32,
    /// Stop requesting once this many comments have been accumulated.
    pub max_comments: usize,
}

impl Default for RetrievalLimits {
    fn default() -> Self {
        Self {
            page_size: 100,
            max_comments: 300,
        }
    }
}

/// Follow continuation tokens until the API runs dry or the cap is reached.
///
/// The page that crosses `max_comments` is kept whole, so the result never
/// exceeds the cap by more than one page.
pub async fn paginate(
    api: &dyn CommentPageApi,
    video: &VideoReference,
    limits: &RetrievalLimits,
) -> Result<Vec<Comment>, PipelineError> {
    let mut comments = Vec::new();
    let mut page_token: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let request = PageRequest {
            video_id: video.as_str().to_string(),
            page_size: limits.page_size,
            page_token: page_token.take(),
        };
        let page = api.list_page(&request).await?;
        pages += 1;
        debug!(
            video = %video,
            page = pages,
            received = page.comments.len(),
            "fetched comment page"
        );
        comments.extend(page.comments);

        match page.next_page_token {
            None => {
                debug!(video = %video, total = comments.len(), "no continuation token");
                break;
            }
            Some(_) if comments.len() >= limits.max_comments => {
                debug!(
                    video = %video,
                    total = comments.len(),
                    cap = limits.max_comments,
                    "retrieval cap reached"
                );
                break;
            }
            Some(token) => page_token = Some(token),
        }
    }

    Ok(comments)
}

// ═══════════════════════════════════════════════════════════════════════
// Scoring
// ═══════════════════════════════════════════════════════════════════════

/// A sentiment estimator mapping text to a polarity in `[-1, 1]`.
///
/// Models are built once at startup and shared read-only by every score.
pub trait PolarityModel: Send + Sync {
    fn name(&self) -> &str;

    /// Polarity of `text`; `0.0` when the model has no evidence either way.
    fn polarity(&self, text: &str) -> f64;
}

// ═══════════════════════════════════════════════════════════════════════
// Output locations
// ═══════════════════════════════════════════════════════════════════════

/// Decides where the artifacts of a run are written.
pub trait OutputLocator: Send + Sync {
    fn locate(&self, video: &VideoReference) -> ReportBundle;
}
