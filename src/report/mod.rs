//! Summary export of the aggregated statistics behind each figure
//!
//! - **JSON**: machine-readable, with run metadata
//! - **CSV**: one row per plotted point, spreadsheet friendly
//!
//! # Usage
//!
//! ```ignore
//! use topicplot::report;
//!
//! // Picks the format from the extension
//! report::generate("summary.json", &summary)?;
//! report::generate("summary.csv", &summary)?;
//! ```

pub mod csv;
pub mod json;

use crate::aggregate::figure::Figure;
use crate::error::{Result, TopicPlotError};
use serde::Serialize;
use std::io::BufWriter;
use std::path::Path;

/// One plotted point with its provenance.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SummaryRow {
    pub dataset: String,
    pub metric: String,
    pub model: String,
    pub embedding: String,
    pub n_topics: f64,
    pub n: usize,
    pub mean: f64,
    pub ci_low: f64,
    pub ci_high: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Summary {
    pub source_files: Vec<String>,
    pub records: usize,
    pub lines_skipped: usize,
    pub rows: Vec<SummaryRow>,
}

impl Summary {
    pub fn from_figures(figures: &[Figure]) -> Self {
        let mut summary = Self::default();
        for figure in figures {
            for panel in figure.panels.iter().flatten() {
                for series in &panel.series {
                    for p in &series.points {
                        summary.rows.push(SummaryRow {
                            dataset: figure.dataset.clone(),
                            metric: panel.metric.key.to_string(),
                            model: series.model.clone(),
                            embedding: series.embedding.clone(),
                            n_topics: p.n_topics,
                            n: p.n,
                            mean: p.mean,
                            ci_low: p.ci_low,
                            ci_high: p.ci_high,
                        });
                    }
                }
            }
        }
        summary
    }

    pub fn with_load_stats(
        mut self,
        source_files: Vec<String>,
        records: usize,
        lines_skipped: usize,
    ) -> Self {
        self.source_files = source_files;
        self.records = records;
        self.lines_skipped = lines_skipped;
        self
    }
}

/// Write a summary in the format implied by the file extension (CSV unless `.json`).
pub fn generate<P: AsRef<Path>>(path: P, summary: &Summary) -> Result<()> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let file = std::fs::File::create(path).map_err(|e| TopicPlotError::io(path, e))?;
    let mut writer = BufWriter::new(file);

    let written = match ext.as_str() {
        "json" => json::write(&mut writer, summary),
        _ => csv::write(&mut writer, summary),
    };
    written.map_err(|e| TopicPlotError::Summary(format!("{}: {}", path.display(), e)))
}
