//! Run configuration
//!
//! Defaults reproduce the classic layout: two embedding result files under
//! `./results`, figures written to the working directory. Every field can be
//! overridden from a JSON file or from the command line.

use crate::error::{Result, TopicPlotError};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const DEFAULT_RESULTS_DIR: &str = "./results";
pub const DEFAULT_INPUT_FILES: [&str; 2] =
    ["intfloat__e5-large-v2.jsonl", "all-MiniLM-L6-v2.jsonl"];

/// How an input file name is turned into the path that gets opened.
///
/// The existence check always looks at `results_dir/name`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathMode {
    /// Open `results_dir/name`, the same path that was checked.
    #[default]
    Joined,
    /// Open the bare `name` relative to the working directory. The checked
    /// path and the opened path diverge unless the tool runs from inside
    /// `results_dir`.
    BareFilename,
}

/// Confidence band settings for repeated samples.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct BandConfig {
    /// Bootstrap resamples per point
    pub n_boot: usize,
    /// Interval width in percent
    pub level: f64,
    pub seed: u64,
}

impl Default for BandConfig {
    fn default() -> Self {
        Self {
            n_boot: 1000,
            level: 95.0,
            seed: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub results_dir: PathBuf,
    pub input_files: Vec<String>,
    pub output_dir: PathBuf,
    pub path_mode: PathMode,
    /// Open each saved figure in the system viewer
    pub show: bool,
    pub band: BandConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            results_dir: PathBuf::from(DEFAULT_RESULTS_DIR),
            input_files: DEFAULT_INPUT_FILES.iter().map(|s| s.to_string()).collect(),
            output_dir: PathBuf::from("."),
            path_mode: PathMode::Joined,
            show: true,
            band: BandConfig::default(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a (possibly partial) JSON config; absent fields keep their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| TopicPlotError::io(path, e))?;
        let config: Config = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_results_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.results_dir = dir.into();
        self
    }

    pub fn with_input_files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.input_files = files.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_output_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_path_mode(mut self, mode: PathMode) -> Self {
        self.path_mode = mode;
        self
    }

    pub fn with_show(mut self, show: bool) -> Self {
        self.show = show;
        self
    }

    pub fn with_band(mut self, band: BandConfig) -> Self {
        self.band = band;
        self
    }

    /// Replace the input list with every `*.jsonl` file directly under
    /// `results_dir`, sorted by name.
    pub fn discover_inputs(mut self) -> Result<Self> {
        let mut found = Vec::new();
        for entry in WalkDir::new(&self.results_dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| {
                TopicPlotError::Config(format!(
                    "cannot scan {}: {}",
                    self.results_dir.display(),
                    e
                ))
            })?;
            let is_jsonl = entry
                .path()
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.eq_ignore_ascii_case("jsonl"))
                .unwrap_or(false);
            if entry.file_type().is_file() && is_jsonl {
                found.push(entry.file_name().to_string_lossy().to_string());
            }
        }
        found.sort();
        self.input_files = found;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.band.n_boot == 0 {
            return Err(TopicPlotError::Config("n_boot must be at least 1".into()));
        }
        if !(self.band.level > 0.0 && self.band.level <= 100.0) {
            return Err(TopicPlotError::Config(format!(
                "confidence level must be in (0, 100], got {}",
                self.band.level
            )));
        }
        Ok(())
    }
}
