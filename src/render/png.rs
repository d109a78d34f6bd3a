//! PNG output via plotters' bitmap backend

use super::style::{model_color, Marker};
use super::FigureRenderer;
use crate::aggregate::figure::{Figure, Panel};
use crate::error::{Result, TopicPlotError};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::error::Error;
use std::path::Path;

const MARKER_SIZE: i32 = 5;

pub struct PngRenderer {
    pub width: u32,
    pub height: u32,
}

impl Default for PngRenderer {
    fn default() -> Self {
        Self {
            width: 2000,
            height: 600,
        }
    }
}

impl PngRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    fn draw(&self, figure: &Figure, path: &Path) -> std::result::Result<(), Box<dyn Error>> {
        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE)?;

        let body = root.titled(&figure.title(), ("sans-serif", 36))?;
        let slots = body.split_evenly((1, figure.panels.len().max(1)));

        for (slot, panel) in slots.iter().zip(&figure.panels) {
            // Blank slot when the dataset has no values for this metric
            if let Some(panel) = panel {
                draw_panel(slot, panel)?;
            }
        }

        root.present()?;
        Ok(())
    }
}

impl FigureRenderer for PngRenderer {
    fn render(&mut self, figure: &Figure, path: &Path) -> Result<()> {
        // The bitmap backend only touches the file after drawing everything
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.is_dir() {
                return Err(TopicPlotError::Render {
                    path: path.to_path_buf(),
                    reason: format!("output directory {} does not exist", parent.display()),
                });
            }
        }

        self.draw(figure, path).map_err(|e| TopicPlotError::Render {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

fn draw_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    panel: &Panel,
) -> std::result::Result<(), Box<dyn Error>> {
    let (x0, x1, y0, y1) = panel.bounds().unwrap_or((0.0, 1.0, 0.0, 1.0));
    let (x0, x1) = padded(x0, x1, 0.05, 1.0);
    let (y0, y1) = padded(y0, y1, 0.08, 0.05);

    let mut chart = ChartBuilder::on(area)
        .caption(panel.metric.title, ("sans-serif", 26))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(65)
        .build_cartesian_2d(x0..x1, y0..y1)?;

    chart
        .configure_mesh()
        .x_desc("Number of Topics")
        .y_desc(panel.metric.key)
        .x_label_formatter(&|x| format!("{}", x.round() as i64))
        .y_label_formatter(&|y| format!("{:.3}", y))
        .draw()?;

    for series in &panel.series {
        let color = model_color(series.color);
        let marker = Marker::for_index(series.marker);

        // Confidence band: upper edge left to right, lower edge back
        if series.points.iter().any(|p| p.ci_high > p.ci_low) {
            let mut band: Vec<(f64, f64)> = series
                .points
                .iter()
                .map(|p| (p.n_topics, p.ci_high))
                .collect();
            band.extend(series.points.iter().rev().map(|p| (p.n_topics, p.ci_low)));
            chart.draw_series(std::iter::once(Polygon::new(band, color.mix(0.2).filled())))?;
        }

        chart
            .draw_series(LineSeries::new(
                series.points.iter().map(|p| (p.n_topics, p.mean)),
                color.stroke_width(2),
            ))?
            .label(series.label())
            .legend(move |(x, y)| {
                EmptyElement::at((x + 10, y))
                    + PathElement::new(vec![(-10, 0), (10, 0)], color.stroke_width(2))
                    + Polygon::new(marker.vertices(MARKER_SIZE - 1), color.filled())
            });

        chart.draw_series(series.points.iter().map(|p| {
            EmptyElement::at((p.n_topics, p.mean))
                + Polygon::new(marker.vertices(MARKER_SIZE), color.filled())
        }))?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK.mix(0.4))
        .draw()?;

    Ok(())
}

/// Widen `[lo, hi]` by `frac` of its span, or by `fallback` when it is a point.
fn padded(lo: f64, hi: f64, frac: f64, fallback: f64) -> (f64, f64) {
    let span = hi - lo;
    if span > 0.0 && span.is_finite() {
        (lo - span * frac, hi + span * frac)
    } else {
        (lo - fallback, hi + fallback)
    }
}
