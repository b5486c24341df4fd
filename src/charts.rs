//! SVG chart rendering with `plotters`.
//!
//! Both charts are drawn from [`AggregateCounts`] alone and must cope with
//! sparse counts: the pie skips absent labels, the bar chart always shows
//! all three labels and draws absent ones as zero-height bars.

use std::path::Path;

use anyhow::Result;
use plotters::element::Pie;
use plotters::prelude::*;

use crate::error::PipelineError;
use crate::models::{AggregateCounts, SentimentLabel};

/// Pixel size of both charts (a 5 × 4 figure).
pub const CHART_SIZE: (u32, u32) = (500, 400);

const CAPTION_FONT: (&str, u32) = ("sans-serif", 20);

fn label_color(label: SentimentLabel) -> RGBColor {
    match label {
        SentimentLabel::Positive => RGBColor(76, 175, 80),
        SentimentLabel::Negative => RGBColor(229, 57, 53),
        SentimentLabel::Neutral => RGBColor(158, 158, 158),
    }
}

/// Slice label, e.g. `Positive (33.3%)`.
pub fn slice_label(label: SentimentLabel, proportion: f64) -> String {
    format!("{} ({:.1}%)", label, proportion * 100.0)
}

/// Render the label-proportion pie chart to `path`.
pub fn render_pie(path: &Path, counts: &AggregateCounts) -> Result<(), PipelineError> {
    draw_pie(path, counts).map_err(|e| PipelineError::write(path, format!("{:#}", e)))?;
    tracing::debug!(path = %path.display(), "rendered pie chart");
    Ok(())
}

/// Render the per-label count bar chart to `path`.
pub fn render_bar(path: &Path, counts: &AggregateCounts) -> Result<(), PipelineError> {
    draw_bar(path, counts).map_err(|e| PipelineError::write(path, format!("{:#}", e)))?;
    tracing::debug!(path = %path.display(), "rendered bar chart");
    Ok(())
}

fn draw_pie(path: &Path, counts: &AggregateCounts) -> Result<()> {
    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let area = root.titled("Sentiment Distribution", CAPTION_FONT)?;
    let (width, height) = area.dim_in_pixel();
    let center = ((width / 2) as i32, (height / 2) as i32);

    if counts.is_empty() {
        area.draw(&Text::new(
            "No comments",
            (center.0 - 50, center.1),
            ("sans-serif", 18).into_font(),
        ))?;
    } else {
        let present: Vec<(SentimentLabel, usize)> = counts.iter().filter(|(_, n)| *n > 0).collect();
        let sizes: Vec<f64> = present.iter().map(|(_, n)| *n as f64).collect();
        let colors: Vec<RGBColor> = present.iter().map(|(l, _)| label_color(*l)).collect();
        let labels: Vec<String> = present
            .iter()
            .map(|(l, _)| slice_label(*l, counts.proportion(*l)))
            .collect();
        let radius = f64::from(width.min(height)) * 0.32;

        let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
        pie.start_angle(-90.0);
        pie.label_style(("sans-serif", 14).into_font().color(&BLACK));
        area.draw(&pie)?;
    }

    root.present()?;
    Ok(())
}

fn draw_bar(path: &Path, counts: &AggregateCounts) -> Result<()> {
    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let highest = SentimentLabel::ALL
        .iter()
        .map(|l| counts.get(*l))
        .max()
        .unwrap_or(0) as u32;
    let y_max = highest + 1;

    let mut chart = ChartBuilder::on(&root)
        .caption("Sentiment Counts", CAPTION_FONT)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d((0u32..3u32).into_segmented(), 0u32..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Sentiment")
        .y_desc("Count")
        .x_label_formatter(&|v| match v {
            SegmentValue::CenterOf(i) => SentimentLabel::ALL
                .get(*i as usize)
                .map(|l| l.as_str().to_string())
                .unwrap_or_default(),
            _ => String::new(),
        })
        .draw()?;

    chart.draw_series(SentimentLabel::ALL.iter().enumerate().map(|(i, label)| {
        let i = i as u32;
        let mut bar = Rectangle::new(
            [
                (SegmentValue::Exact(i), 0),
                (SegmentValue::Exact(i + 1), counts.get(*label) as u32),
            ],
            label_color(*label).filled(),
        );
        bar.set_margin(0, 0, 15, 15);
        bar
    }))?;

    root.present()?;
    Ok(())
}
