//! Report emission: where artifacts go, and writing them.
//!
//! [`ReportEmitter::emit`] asks its [`OutputLocator`] for the three paths,
//! creates the directories, then writes the CSV export and both charts.
//! Any filesystem or rendering failure aborts with [`PipelineError::Write`]
//! and no bundle is returned.
//!
//! Two locators ship with the crate:
//!
//! - [`FixedOutputDir`]: fixed file names in one directory, overwritten by
//!   every run. Concurrent runs race on the same files.
//! - [`PerRunOutputDir`]: a fresh `<video>-<uuid>` sub-directory per run.

use std::path::{Path, PathBuf};

use tracing::info;
use uuid::Uuid;

use crate::charts;
use crate::config::OutputConfig;
use crate::error::PipelineError;
use crate::export;
use crate::models::{AggregateCounts, Dataset, ReportBundle, VideoReference};
use crate::traits::OutputLocator;

/// File names of the three artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactNames {
    pub csv: String,
    pub pie_chart: String,
    pub bar_chart: String,
}

impl ArtifactNames {
    fn in_dir(&self, dir: &Path) -> ReportBundle {
        ReportBundle {
            csv: dir.join(&self.csv),
            pie_chart: dir.join(&self.pie_chart),
            bar_chart: dir.join(&self.bar_chart),
        }
    }
}

impl Default for ArtifactNames {
    fn default() -> Self {
        Self::from(&OutputConfig::default())
    }
}

impl From<&OutputConfig> for ArtifactNames {
    fn from(config: &OutputConfig) -> Self {
        Self {
            csv: config.csv_name.clone(),
            pie_chart: config.pie_chart_name.clone(),
            bar_chart: config.bar_chart_name.clone(),
        }
    }
}

/// Same directory and names for every run.
#[derive(Debug, Clone)]
pub struct FixedOutputDir {
    dir: PathBuf,
    names: ArtifactNames,
}

impl FixedOutputDir {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            names: ArtifactNames::default(),
        }
    }

    pub fn with_names(mut self, names: ArtifactNames) -> Self {
        self.names = names;
        self
    }
}

impl OutputLocator for FixedOutputDir {
    fn locate(&self, _video: &VideoReference) -> ReportBundle {
        self.names.in_dir(&self.dir)
    }
}

/// A unique `<video>-<uuid>` sub-directory of `root` for every run.
#[derive(Debug, Clone)]
pub struct PerRunOutputDir {
    root: PathBuf,
    names: ArtifactNames,
}

impl PerRunOutputDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            names: ArtifactNames::default(),
        }
    }

    pub fn with_names(mut self, names: ArtifactNames) -> Self {
        self.names = names;
        self
    }
}

impl OutputLocator for PerRunOutputDir {
    fn locate(&self, video: &VideoReference) -> ReportBundle {
        let run_dir = self.root.join(format!("{}-{}", video, Uuid::new_v4()));
        self.names.in_dir(&run_dir)
    }
}

/// Writes the export and both charts for one run.
pub struct ReportEmitter {
    locator: Box<dyn OutputLocator>,
    include_score: bool,
}

impl ReportEmitter {
    pub fn new(locator: Box<dyn OutputLocator>) -> Self {
        Self {
            locator,
            include_score: false,
        }
    }

    pub fn from_config(config: &OutputConfig) -> Self {
        let names = ArtifactNames::from(config);
        let locator: Box<dyn OutputLocator> = if config.per_run {
            Box::new(PerRunOutputDir::new(&config.dir).with_names(names))
        } else {
            Box::new(FixedOutputDir::new(&config.dir).with_names(names))
        };
        Self::new(locator).include_score(config.include_score)
    }

    /// Add the numeric polarity as a `Score` export column.
    pub fn include_score(mut self, include: bool) -> Self {
        self.include_score = include;
        self
    }

    pub fn emit(
        &self,
        video: &VideoReference,
        dataset: &Dataset,
        counts: &AggregateCounts,
    ) -> Result<ReportBundle, PipelineError> {
        let bundle = self.locator.locate(video);

        for path in [&bundle.csv, &bundle.pie_chart, &bundle.bar_chart] {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| PipelineError::write(parent, e))?;
            }
        }

        export::export_csv(&bundle.csv, dataset, self.include_score)?;
        charts::render_pie(&bundle.pie_chart, counts)?;
        charts::render_bar(&bundle.bar_chart, counts)?;

        info!(
            video = %video,
            rows = dataset.len(),
            csv = %bundle.csv.display(),
            "report written"
        );
        Ok(bundle)
    }
}
