//! End-to-end analysis of one video.
//!
//! ```text
//! url ──▶ extract_id ──▶ CommentSource ──▶ SentimentScorer ──▶ aggregate ──▶ ReportEmitter
//! ```
//!
//! Every stage either succeeds or returns its [`PipelineError`] unchanged;
//! the first failure ends the run and no bundle is returned.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::aggregate::aggregate;
use crate::config::Config;
use crate::error::PipelineError;
use crate::models::{AggregateCounts, ReportBundle, VideoReference};
use crate::progress::{NoProgress, ProgressReporter, RunProgressEvent};
use crate::reference::extract_id;
use crate::report::ReportEmitter;
use crate::scoring::SentimentScorer;
use crate::source_youtube::YouTubeSource;
use crate::traits::CommentSource;

/// Outcome of a successful run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub video: VideoReference,
    pub policy: &'static str,
    pub comments: usize,
    pub counts: AggregateCounts,
    pub bundle: ReportBundle,
    pub generated_at: DateTime<Utc>,
}

pub struct Pipeline {
    source: Box<dyn CommentSource>,
    scorer: SentimentScorer,
    emitter: ReportEmitter,
    progress: Box<dyn ProgressReporter>,
}

impl Pipeline {
    pub fn new(
        source: Box<dyn CommentSource>,
        scorer: SentimentScorer,
        emitter: ReportEmitter,
    ) -> Self {
        Self {
            source,
            scorer,
            emitter,
            progress: Box::new(NoProgress),
        }
    }

    pub fn with_progress(mut self, progress: Box<dyn ProgressReporter>) -> Self {
        self.progress = progress;
        self
    }

    /// Wire the YouTube source, scorer and emitter described by `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let source = YouTubeSource::from_config(&config.source)?;
        let scorer = SentimentScorer::from_config(&config.scoring)?;
        let emitter = ReportEmitter::from_config(&config.output);
        Ok(Self::new(Box::new(source), scorer, emitter))
    }

    pub fn scorer(&self) -> &SentimentScorer {
        &self.scorer
    }

    /// Run the pipeline and return only the artifact locations.
    pub async fn analyze(&self, url: &str) -> Result<ReportBundle, PipelineError> {
        self.run(url).await.map(|report| report.bundle)
    }

    /// Run the pipeline for `url`.
    pub async fn run(&self, url: &str) -> Result<RunReport, PipelineError> {
        let video = extract_id(url)?;
        info!(video = %video, source = self.source.name(), "analyzing video");
        self.progress.report(RunProgressEvent::Resolved {
            video: video.to_string(),
        });

        let comments = self.source.fetch_comments(&video).await?;
        info!(video = %video, comments = comments.len(), "comments fetched");
        self.progress.report(RunProgressEvent::Fetched {
            video: video.to_string(),
            comments: comments.len() as u64,
        });

        let records = comments
            .iter()
            .map(|comment| self.scorer.score_comment(comment))
            .collect();
        let (dataset, counts) = aggregate(records);
        self.progress.report(RunProgressEvent::Scored {
            total: dataset.len() as u64,
        });

        let bundle = self.emitter.emit(&video, &dataset, &counts)?;
        self.progress.report(RunProgressEvent::Written {
            csv: bundle.csv.clone(),
            pie_chart: bundle.pie_chart.clone(),
            bar_chart: bundle.bar_chart.clone(),
        });

        Ok(RunReport {
            video,
            policy: self.scorer.policy().name(),
            comments: dataset.len(),
            counts,
            bundle,
            generated_at: Utc::now(),
        })
    }
}
