//! YouTube source against an in-process mock of the `commentThreads` endpoint.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use yt_sentiment::config::SourceConfig;
use yt_sentiment::error::ErrorKind;
use yt_sentiment::models::SentimentLabel;
use yt_sentiment::pipeline::Pipeline;
use yt_sentiment::reference::extract_id;
use yt_sentiment::report::{FixedOutputDir, ReportEmitter};
use yt_sentiment::scoring::SentimentScorer;
use yt_sentiment::source_youtube::YouTubeSource;
use yt_sentiment::traits::CommentSource;

#[derive(Clone)]
enum Mode {
    /// `pages` pages, each as large as the requested `maxResults`.
    Pages(usize),
    /// A single page with these texts.
    Texts(Vec<&'static str>),
    Error(u16, &'static str),
    Slow,
}

struct MockState {
    mode: Mode,
    hits: AtomicUsize,
    queries: Mutex<Vec<HashMap<String, String>>>,
}

async fn comment_threads(
    State(state): State<Arc<MockState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    state.queries.lock().unwrap().push(params.clone());

    match &state.mode {
        Mode::Pages(pages) => {
            let page: usize = params
                .get("pageToken")
                .and_then(|t| t.strip_prefix("page-"))
                .map(|n| n.parse().unwrap())
                .unwrap_or(0);
            let per_page: usize = params["maxResults"].parse().unwrap();
            let items: Vec<_> = (0..per_page)
                .map(|i| thread(&format!("p{}-c{}", page, i)))
                .collect();
            let mut body = json!({ "items": items });
            if page + 1 < *pages {
                body["nextPageToken"] = json!(format!("page-{}", page + 1));
            }
            Json(body).into_response()
        }
        Mode::Texts(texts) => {
            let items: Vec<_> = texts.iter().map(|t| thread(t)).collect();
            Json(json!({ "items": items })).into_response()
        }
        Mode::Error(status, reason) => (
            StatusCode::from_u16(*status).unwrap(),
            Json(json!({
                "error": {
                    "code": status,
                    "message": format!("mock {}", reason),
                    "errors": [{ "reason": reason }]
                }
            })),
        )
            .into_response(),
        Mode::Slow => {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Json(json!({ "items": [] })).into_response()
        }
    }
}

fn thread(text: &str) -> serde_json::Value {
    json!({ "snippet": { "topLevelComment": { "snippet": { "textDisplay": text } } } })
}

/// Start the mock and return its state plus a source config pointing at it.
async fn start_mock(mode: Mode) -> (Arc<MockState>, SourceConfig) {
    let state = Arc::new(MockState {
        mode,
        hits: AtomicUsize::new(0),
        queries: Mutex::new(Vec::new()),
    });
    let app = Router::new()
        .route("/commentThreads", get(comment_threads))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let config = SourceConfig {
        base_url: format!("http://{}", addr),
        ..SourceConfig::default()
    };
    (state, config)
}

fn source(config: &SourceConfig) -> YouTubeSource {
    YouTubeSource::new(config, Some("test-key".to_string())).unwrap()
}

fn video() -> yt_sentiment::models::VideoReference {
    extract_id("https://youtu.be/dQw4w9WgXcQ").unwrap()
}

#[tokio::test]
async fn stops_at_retrieval_cap() {
    let (state, config) = start_mock(Mode::Pages(10)).await;

    let comments = source(&config).fetch_comments(&video()).await.unwrap();

    assert_eq!(comments.len(), 300);
    assert_eq!(state.hits.load(Ordering::SeqCst), 3);

    let queries = state.queries.lock().unwrap();
    let first = &queries[0];
    assert_eq!(first["part"], "snippet");
    assert_eq!(first["videoId"], "dQw4w9WgXcQ");
    assert_eq!(first["maxResults"], "100");
    assert_eq!(first["order"], "relevance");
    assert_eq!(first["textFormat"], "plainText");
    assert_eq!(first["key"], "test-key");
    assert!(!first.contains_key("pageToken"));
    assert_eq!(queries[1]["pageToken"], "page-1");
    assert_eq!(queries[2]["pageToken"], "page-2");
}

#[tokio::test]
async fn crossing_page_is_kept_whole() {
    let (state, mut config) = start_mock(Mode::Pages(10)).await;
    config.page_size = 70;

    let comments = source(&config).fetch_comments(&video()).await.unwrap();

    assert_eq!(comments.len(), 350);
    assert_eq!(state.hits.load(Ordering::SeqCst), 5);
}

#[tokio::test]
async fn stops_when_token_runs_out_and_keeps_order() {
    let (state, config) = start_mock(Mode::Pages(2)).await;

    let comments = source(&config).fetch_comments(&video()).await.unwrap();

    assert_eq!(comments.len(), 200);
    assert_eq!(state.hits.load(Ordering::SeqCst), 2);
    assert_eq!(comments[0].text, "p0-c0");
    assert_eq!(comments[100].text, "p1-c0");
    assert_eq!(comments[199].text, "p1-c99");
}

#[tokio::test]
async fn quota_exceeded_is_source_unavailable() {
    let (state, config) = start_mock(Mode::Error(403, "quotaExceeded")).await;

    let err = source(&config).fetch_comments(&video()).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::SourceUnavailable);
    assert!(err.to_string().contains("quotaExceeded"));
    assert_eq!(state.hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn video_not_found_is_source_unavailable() {
    let (_state, config) = start_mock(Mode::Error(404, "videoNotFound")).await;
    let err = source(&config).fetch_comments(&video()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SourceUnavailable);
}

#[tokio::test]
async fn rejected_key_is_authentication() {
    let (_state, config) = start_mock(Mode::Error(400, "keyInvalid")).await;
    let err = source(&config).fetch_comments(&video()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authentication);
}

#[tokio::test]
async fn slow_page_times_out() {
    let (_state, mut config) = start_mock(Mode::Slow).await;
    config.timeout_secs = 1;

    let err = source(&config).fetch_comments(&video()).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::SourceUnavailable);
    assert!(err.to_string().contains("timed out"));
}

#[tokio::test]
async fn missing_key_makes_no_request() {
    let (state, config) = start_mock(Mode::Pages(1)).await;
    let source = YouTubeSource::new(&config, None).unwrap();

    let err = source.fetch_comments(&video()).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Authentication);
    assert_eq!(state.hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn full_pipeline_over_http() {
    let (_state, config) = start_mock(Mode::Texts(vec![
        "I love this!",
        "This is terrible.",
        "It's okay I guess.",
    ]))
    .await;
    let tmp = tempfile::tempdir().unwrap();
    let pipeline = Pipeline::new(
        Box::new(source(&config)),
        SentimentScorer::from_config(&Default::default()).unwrap(),
        ReportEmitter::new(Box::new(FixedOutputDir::new(tmp.path()))),
    );

    let report = pipeline
        .run("https://www.youtube.com/embed/dQw4w9WgXcQ")
        .await
        .unwrap();

    assert_eq!(report.comments, 3);
    for label in SentimentLabel::ALL {
        assert_eq!(report.counts.get(label), 1);
    }
    let csv = std::fs::read_to_string(&report.bundle.csv).unwrap();
    assert_eq!(
        csv,
        "Comment,Sentiment\nI love this!,Positive\nThis is terrible.,Negative\nIt's okay I guess.,Neutral\n"
    );
}
