//! Run progress reporting.
//!
//! Reports what a pipeline run is doing (which video, how many comments,
//! where the artifacts went) so users see the slow fetch step advance.
//! Progress is emitted on **stderr** so stdout remains parseable for scripts.

use std::io::Write;
use std::path::PathBuf;

/// A single progress event for an analysis run.
#[derive(Clone, Debug, PartialEq)]
pub enum RunProgressEvent {
    /// The URL resolved to a video identifier.
    Resolved { video: String },
    /// Retrieval finished with this many comments.
    Fetched { video: String, comments: u64 },
    /// Every comment has a label.
    Scored { total: u64 },
    /// All artifacts are on disk.
    Written {
        csv: PathBuf,
        pie_chart: PathBuf,
        bar_chart: PathBuf,
    },
}

/// Reports run progress. Implementations write to stderr (human or JSON).
pub trait ProgressReporter: Send + Sync {
    /// Emit a progress event. Called from the pipeline between stages.
    fn report(&self, event: RunProgressEvent);
}

/// Human-friendly progress on stderr: "analyze dQw4w9WgXcQ  fetched  1,234 comments".
pub struct StderrProgress;

impl ProgressReporter for StderrProgress {
    fn report(&self, event: RunProgressEvent) {
        let line = match &event {
            RunProgressEvent::Resolved { video } => {
                format!("analyze {}  fetching comments...\n", video)
            }
            RunProgressEvent::Fetched { video, comments } => {
                format!(
                    "analyze {}  fetched  {} comments\n",
                    video,
                    format_number(*comments)
                )
            }
            RunProgressEvent::Scored { total } => {
                format!("analyze  scored  {} comments\n", format_number(*total))
            }
            RunProgressEvent::Written { csv, .. } => {
                let dir = csv
                    .parent()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default();
                format!("analyze  wrote report to {}\n", dir)
            }
        };
        let _ = std::io::stderr().lock().write_all(line.as_bytes());
        let _ = std::io::stderr().lock().flush();
    }
}

/// Machine-readable progress: one JSON object per line on stderr.
pub struct JsonProgress;

impl JsonProgress {
    fn to_json(event: &RunProgressEvent) -> serde_json::Value {
        match event {
            RunProgressEvent::Resolved { video } => serde_json::json!({
                "event": "progress",
                "phase": "resolved",
                "video": video
            }),
            RunProgressEvent::Fetched { video, comments } => serde_json::json!({
                "event": "progress",
                "phase": "fetched",
                "video": video,
                "comments": comments
            }),
            RunProgressEvent::Scored { total } => serde_json::json!({
                "event": "progress",
                "phase": "scored",
                "total": total
            }),
            RunProgressEvent::Written {
                csv,
                pie_chart,
                bar_chart,
            } => serde_json::json!({
                "event": "progress",
                "phase": "written",
                "csv": csv,
                "pie_chart": pie_chart,
                "bar_chart": bar_chart
            }),
        }
    }
}

impl ProgressReporter for JsonProgress {
    fn report(&self, event: RunProgressEvent) {
        if let Ok(line) = serde_json::to_string(&Self::to_json(&event)) {
            let _ = writeln!(std::io::stderr().lock(), "{}", line);
            let _ = std::io::stderr().lock().flush();
        }
    }
}

/// No-op reporter when progress is disabled.
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn report(&self, _event: RunProgressEvent) {}
}

fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + (s.len() - 1) / 3);
    let chars: Vec<char> = s.chars().rev().collect();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }
    result.chars().rev().collect()
}

/// Progress mode for the CLI: off, human (stderr), or JSON (stderr).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProgressMode {
    Off,
    Human,
    Json,
}

impl ProgressMode {
    /// Default: human progress when stderr is a TTY, otherwise off.
    pub fn default_for_tty() -> Self {
        if atty::is(atty::Stream::Stderr) {
            ProgressMode::Human
        } else {
            ProgressMode::Off
        }
    }

    /// Build a reporter for this mode. Caller can pass it to the pipeline.
    pub fn reporter(&self) -> Box<dyn ProgressReporter> {
        match self {
            ProgressMode::Off => Box::new(NoProgress),
            ProgressMode::Human => Box::new(StderrProgress),
            ProgressMode::Json => Box::new(JsonProgress),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_number_comma() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(1), "1");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234), "1,234");
        assert_eq!(format_number(1_234_567), "1,234,567");
    }

    #[test]
    fn json_events_carry_phase() {
        let value = JsonProgress::to_json(&RunProgressEvent::Fetched {
            video: "dQw4w9WgXcQ".into(),
            comments: 300,
        });
        assert_eq!(value["phase"], "fetched");
        assert_eq!(value["comments"], 300);

        let value = JsonProgress::to_json(&RunProgressEvent::Written {
            csv: PathBuf::from("static/comments_sentiment.csv"),
            pie_chart: PathBuf::from("static/pie_chart.svg"),
            bar_chart: PathBuf::from("static/bar_chart.svg"),
        });
        assert_eq!(value["csv"], "static/comments_sentiment.csv");
    }
}
