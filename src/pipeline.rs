//! Load, aggregate, render
//!
//! One linear pass: read every input file, flatten into a table, build a
//! figure per dataset, save it, optionally open it. No state survives the run.

use crate::aggregate::figure::{self, Figure};
use crate::aggregate::Table;
use crate::config::Config;
use crate::error::Result;
use crate::loader::Loader;
use crate::render::FigureRenderer;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const NO_DATA_MESSAGE: &str = "No data found. Please check your files.";

#[derive(Debug)]
pub struct RunStats {
    pub files_read: Vec<String>,
    pub files_missing: Vec<PathBuf>,
    pub records: usize,
    pub lines_skipped: usize,
}

#[derive(Debug)]
pub enum RunOutcome {
    /// Nothing parsed from any input; no figure was built or written.
    NoData(RunStats),
    Rendered {
        stats: RunStats,
        figures: Vec<Figure>,
        saved: Vec<PathBuf>,
    },
}

impl RunOutcome {
    pub fn saved(&self) -> &[PathBuf] {
        match self {
            RunOutcome::NoData(_) => &[],
            RunOutcome::Rendered { saved, .. } => saved,
        }
    }

    pub fn stats(&self) -> &RunStats {
        match self {
            RunOutcome::NoData(stats) | RunOutcome::Rendered { stats, .. } => stats,
        }
    }
}

pub struct Pipeline {
    config: Config,
    progress: bool,
}

impl Pipeline {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            progress: false,
        }
    }

    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Where a dataset's figure goes. Bare file name when writing to the
    /// working directory.
    pub fn output_path(&self, dataset: &str) -> PathBuf {
        let name = figure::output_file_name(dataset);
        if self.config.output_dir == Path::new(".") {
            PathBuf::from(name)
        } else {
            self.config.output_dir.join(name)
        }
    }

    pub fn run<R: FigureRenderer>(&self, renderer: &mut R) -> Result<RunOutcome> {
        let report = Loader::from_config(&self.config).load()?;
        let stats = RunStats {
            files_read: report.files_read.clone(),
            files_missing: report.files_missing.clone(),
            records: report.records.len(),
            lines_skipped: report.lines_skipped,
        };

        if report.is_empty() {
            println!("{}", NO_DATA_MESSAGE);
            return Ok(RunOutcome::NoData(stats));
        }

        let table = Table::new(report.records);
        let groups = table.groups();
        info!(
            "Loaded {} records across {} dataset(s)",
            table.len(),
            groups.len()
        );

        let pb = if self.progress && groups.len() > 1 {
            let pb = ProgressBar::new(groups.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("=>-"),
            );
            Some(pb)
        } else {
            None
        };

        let mut figures = Vec::with_capacity(groups.len());
        let mut saved = Vec::with_capacity(groups.len());

        for group in &groups {
            if let Some(ref pb) = pb {
                pb.set_message(group.dataset.clone());
            }

            let fig = figure::build_figure(group, &self.config.band)?;
            let path = self.output_path(&fig.dataset);
            renderer.render(&fig, &path)?;

            let line = format!("Saved plot: {}", path.display());
            match pb {
                Some(ref pb) => pb.println(line),
                None => println!("{}", line),
            }

            if self.config.show {
                if let Err(e) = open::that(&path) {
                    warn!("Failed to open {}: {}", path.display(), e);
                }
            }

            if let Some(ref pb) = pb {
                pb.inc(1);
            }
            saved.push(path);
            figures.push(fig);
        }

        if let Some(pb) = pb {
            pb.finish_and_clear();
        }

        Ok(RunOutcome::Rendered {
            stats,
            figures,
            saved,
        })
    }
}
