//! Per-dataset figure model
//!
//! A figure is three panels side by side, one per metric. Each panel holds
//! one series per (model, embedding) pair; each series point is the mean of
//! every row at that topic count with a bootstrap band around it.
//!
//! Colors follow the model and marker shapes follow the embedding, so the
//! same pair looks identical in all three panels.

use super::stats;
use super::{Group, Row};
use crate::config::BandConfig;
use crate::error::{Result, TopicPlotError};
use crate::record::{self, MODEL_KEY, N_TOPICS_KEY};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Metric {
    pub key: &'static str,
    pub title: &'static str,
}

pub const METRICS: [Metric; 3] = [
    Metric {
        key: "diversity",
        title: "Diversity",
    },
    Metric {
        key: "wec_ex",
        title: "Coherence (External)",
    },
    Metric {
        key: "wec_in",
        title: "Coherence (Internal)",
    },
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub n_topics: f64,
    /// Number of rows averaged into this point
    pub n: usize,
    pub mean: f64,
    pub ci_low: f64,
    pub ci_high: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Series {
    pub model: String,
    pub embedding: String,
    /// Index into the model palette
    pub color: usize,
    /// Index into the marker shapes
    pub marker: usize,
    pub points: Vec<SeriesPoint>,
}

impl Series {
    pub fn label(&self) -> String {
        format!("{} / {}", self.model, self.embedding)
    }

    pub fn point_at(&self, n_topics: f64) -> Option<&SeriesPoint> {
        self.points.iter().find(|p| p.n_topics == n_topics)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Panel {
    pub metric: Metric,
    pub series: Vec<Series>,
}

impl Panel {
    pub fn series_for(&self, model: &str, embedding: &str) -> Option<&Series> {
        self.series
            .iter()
            .find(|s| s.model == model && s.embedding == embedding)
    }

    /// (x_min, x_max, y_min, y_max) over every point and band edge.
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let points = self.series.iter().flat_map(|s| s.points.iter());
        let mut bounds: Option<(f64, f64, f64, f64)> = None;
        for p in points {
            let lo = p.ci_low.min(p.mean);
            let hi = p.ci_high.max(p.mean);
            bounds = Some(match bounds {
                None => (p.n_topics, p.n_topics, lo, hi),
                Some((x0, x1, y0, y1)) => (
                    x0.min(p.n_topics),
                    x1.max(p.n_topics),
                    y0.min(lo),
                    y1.max(hi),
                ),
            });
        }
        bounds
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Figure {
    pub dataset: String,
    /// One slot per entry of [`METRICS`]; `None` when the dataset has no
    /// values for that metric.
    pub panels: Vec<Option<Panel>>,
}

impl Figure {
    pub fn title(&self) -> String {
        format!("Results for Dataset: {}", self.dataset)
    }

    pub fn file_name(&self) -> String {
        output_file_name(&self.dataset)
    }

    pub fn panel(&self, metric_key: &str) -> Option<&Panel> {
        self.panels
            .iter()
            .flatten()
            .find(|p| p.metric.key == metric_key)
    }
}

/// `<dataset with spaces replaced by underscores>_results.png`
pub fn output_file_name(dataset: &str) -> String {
    format!("{}_results.png", dataset.replace(' ', "_"))
}

/// Build the three-panel figure for one dataset group.
pub fn build_figure(group: &Group<'_>, band: &BandConfig) -> Result<Figure> {
    // Style levels are fixed per figure so every panel agrees
    let models = distinct(group.rows.iter().filter_map(|r| model_of(r)));
    let embeddings = distinct(group.rows.iter().map(|r| r.embedding.clone()));

    let mut panels = Vec::with_capacity(METRICS.len());
    for metric in METRICS {
        if !group.has_column(metric.key) {
            debug!("{}: no '{}' values, leaving panel blank", group.dataset, metric.key);
            panels.push(None);
            continue;
        }
        panels.push(Some(build_panel(group, metric, &models, &embeddings, band)?));
    }

    Ok(Figure {
        dataset: group.dataset.clone(),
        panels,
    })
}

fn build_panel(
    group: &Group<'_>,
    metric: Metric,
    models: &[String],
    embeddings: &[String],
    band: &BandConfig,
) -> Result<Panel> {
    // (model, embedding) -> [(x, y)] in first-seen order of the pair
    let mut buckets: Vec<((String, String), Vec<(f64, f64)>)> = Vec::new();

    for row in &group.rows {
        let Some(y) = numeric_cell(row, metric.key, &group.dataset)? else {
            continue;
        };
        let Some(x) = numeric_cell(row, N_TOPICS_KEY, &group.dataset)? else {
            continue;
        };
        let Some(model) = model_of(row) else {
            continue;
        };

        let key = (model, row.embedding.clone());
        match buckets.iter_mut().find(|(k, _)| *k == key) {
            Some((_, pts)) => pts.push((x, y)),
            None => buckets.push((key, vec![(x, y)])),
        }
    }

    let mut rng = StdRng::seed_from_u64(band.seed);
    let series = buckets
        .into_iter()
        .map(|((model, embedding), mut pts)| {
            pts.sort_by(|a, b| a.0.total_cmp(&b.0));
            let points = pts
                .chunk_by(|a, b| a.0 == b.0)
                .map(|chunk| {
                    let ys: Vec<f64> = chunk.iter().map(|&(_, y)| y).collect();
                    let (ci_low, ci_high) =
                        stats::bootstrap_ci(&ys, band.n_boot, band.level, &mut rng);
                    SeriesPoint {
                        n_topics: chunk[0].0,
                        n: ys.len(),
                        mean: stats::mean(&ys),
                        ci_low,
                        ci_high,
                    }
                })
                .collect();
            Series {
                color: position(models, &model),
                marker: position(embeddings, &embedding),
                model,
                embedding,
                points,
            }
        })
        .collect();

    Ok(Panel { metric, series })
}

/// Numeric value of `column`, `None` when absent or null.
fn numeric_cell(row: &Row, column: &str, dataset: &str) -> Result<Option<f64>> {
    match row.record.get(column) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(other) => Err(TopicPlotError::NonNumeric {
            dataset: dataset.to_string(),
            column: column.to_string(),
            value: other.to_string(),
        }),
    }
}

fn model_of(row: &Row) -> Option<String> {
    match row.record.get(MODEL_KEY) {
        None | Some(Value::Null) => None,
        Some(v) => Some(record::display_value(v)),
    }
}

fn distinct<I: Iterator<Item = String>>(values: I) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for v in values {
        if !out.contains(&v) {
            out.push(v);
        }
    }
    out
}

fn position(levels: &[String], value: &str) -> usize {
    levels.iter().position(|l| l == value).unwrap_or(0)
}
