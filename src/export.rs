//! Export the scored dataset as CSV.
//!
//! One row per comment in retrieval order, columns `Comment,Sentiment` and
//! optionally `Score`. The header row is always written, so an empty
//! dataset produces a header-only file.

use std::io::Write;
use std::path::Path;

use crate::error::PipelineError;
use crate::models::Dataset;

const HEADER: [&str; 2] = ["Comment", "Sentiment"];
const SCORE_COLUMN: &str = "Score";

/// Write `dataset` as CSV to any writer.
pub fn write_csv<W: Write>(writer: W, dataset: &Dataset, include_score: bool) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    if include_score {
        wtr.write_record(HEADER.iter().copied().chain([SCORE_COLUMN]))?;
    } else {
        wtr.write_record(HEADER)?;
    }

    for record in dataset.iter() {
        if include_score {
            let score = format!("{:.4}", record.polarity);
            wtr.write_record([record.comment.as_str(), record.label.as_str(), score.as_str()])?;
        } else {
            wtr.write_record([record.comment.as_str(), record.label.as_str()])?;
        }
    }

    wtr.flush()?;
    Ok(())
}

/// Write `dataset` to the CSV file at `path`, replacing any previous file.
pub fn export_csv(path: &Path, dataset: &Dataset, include_score: bool) -> Result<(), PipelineError> {
    let file = std::fs::File::create(path).map_err(|e| PipelineError::write(path, e))?;
    write_csv(file, dataset, include_score).map_err(|e| PipelineError::write(path, e))?;
    tracing::debug!(path = %path.display(), rows = dataset.len(), "wrote CSV export");
    Ok(())
}
