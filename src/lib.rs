//! # yt-sentiment
//!
//! Fetch the public comments of a YouTube video, score the sentiment of each
//! one, and write a small report: a CSV export plus a pie chart and a bar
//! chart of the label distribution.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────┐   ┌─────────────┐   ┌────────────┐   ┌───────────┐   ┌──────────┐
//! │ reference │──▶│   source    │──▶│  scoring   │──▶│ aggregate │──▶│  report  │
//! │ URL → id  │   │ YouTube API │   │ lexicon+NB │   │  counts   │   │ CSV+SVG  │
//! └───────────┘   └─────────────┘   └────────────┘   └───────────┘   └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! export YOUTUBE_API_KEY=...
//! ytsent analyze "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
//! ytsent score "I love this!"
//! ytsent clean "It's okay I guess."
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Core data types |
//! | [`error`] | Pipeline error kinds |
//! | [`reference`] | Video identifier extraction |
//! | [`traits`] | Source, model and output-location traits; pagination |
//! | [`source_youtube`] | YouTube Data API comment source |
//! | [`normalize`] | Comment text cleaning |
//! | [`lexicon`] | Rule-based lexicon polarity model |
//! | [`naive_bayes`] | Naive Bayes polarity model |
//! | [`scoring`] | Scoring policies and thresholds |
//! | [`aggregate`] | Dataset assembly and label counts |
//! | [`export`] | CSV export |
//! | [`charts`] | Pie and bar charts |
//! | [`report`] | Output locations and report emission |
//! | [`progress`] | Run progress reporting |
//! | [`pipeline`] | End-to-end orchestration |

pub mod aggregate;
pub mod charts;
pub mod config;
pub mod error;
pub mod export;
pub mod lexicon;
pub mod models;
pub mod naive_bayes;
pub mod normalize;
pub mod pipeline;
pub mod progress;
pub mod reference;
pub mod report;
pub mod scoring;
pub mod source_youtube;
pub mod traits;
