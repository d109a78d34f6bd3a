//! Reading line-delimited result files
//!
//! Each input file holds one JSON object per line. Missing files are skipped
//! with a warning and lines that do not parse as a JSON object are dropped.
//! Neither condition stops the run.

use crate::config::{Config, PathMode};
use crate::error::{Result, TopicPlotError};
use crate::record::{self, Record};
use serde_json::Value;
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Everything read from one pass over the input files.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Flattened records, file order then line order
    pub records: Vec<Record>,
    pub files_read: Vec<String>,
    pub files_missing: Vec<PathBuf>,
    pub lines_skipped: usize,
}

impl LoadReport {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

pub struct Loader {
    results_dir: PathBuf,
    input_files: Vec<String>,
    path_mode: PathMode,
}

impl Loader {
    pub fn new<P: Into<PathBuf>>(results_dir: P, input_files: Vec<String>) -> Self {
        Self {
            results_dir: results_dir.into(),
            input_files,
            path_mode: PathMode::Joined,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.results_dir.clone(), config.input_files.clone())
            .with_path_mode(config.path_mode)
    }

    pub fn with_path_mode(mut self, mode: PathMode) -> Self {
        self.path_mode = mode;
        self
    }

    /// Path used for the existence check.
    pub fn check_path(&self, name: &str) -> PathBuf {
        self.results_dir.join(name)
    }

    /// Path actually opened for reading.
    pub fn read_path(&self, name: &str) -> PathBuf {
        match self.path_mode {
            PathMode::Joined => self.results_dir.join(name),
            PathMode::BareFilename => PathBuf::from(name),
        }
    }

    pub fn load(&self) -> Result<LoadReport> {
        let mut report = LoadReport::default();

        for name in &self.input_files {
            let checked = self.check_path(name);
            if !checked.exists() {
                warn!("{} not found. Skipping.", checked.display());
                report.files_missing.push(checked);
                continue;
            }

            let target = self.read_path(name);
            let file = File::open(&target).map_err(|e| TopicPlotError::io(&target, e))?;
            let (records, skipped) = read_records(BufReader::new(file), name)
                .map_err(|e| TopicPlotError::io(&target, e))?;

            info!("{}: {} records ({} lines skipped)", name, records.len(), skipped);
            report.records.extend(records);
            report.lines_skipped += skipped;
            report.files_read.push(name.clone());
        }

        if report.lines_skipped > 0 {
            info!("Skipped {} malformed line(s) in total", report.lines_skipped);
        }
        Ok(report)
    }
}

/// Bare non-finite tokens, longest first so `-Infinity` wins over `Infinity`.
const NON_FINITE_TOKENS: [&str; 3] = ["-Infinity", "Infinity", "NaN"];

/// Parse one line as a JSON object. Anything else, including valid JSON
/// that is not an object, yields `None`.
///
/// `NaN`, `Infinity` and `-Infinity` are accepted and read as `null`, so a
/// run with an undefined metric keeps its other values.
pub fn parse_line(line: &str) -> Option<Record> {
    match serde_json::from_str::<Value>(&non_finite_to_null(line)) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// Replace bare non-finite number tokens with `null`. String contents are
/// left untouched.
fn non_finite_to_null(line: &str) -> Cow<'_, str> {
    if !line.contains("NaN") && !line.contains("Infinity") {
        return Cow::Borrowed(line);
    }

    let mut out = String::with_capacity(line.len());
    let mut in_string = false;
    let mut escaped = false;
    let mut i = 0;

    while let Some(c) = line[i..].chars().next() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
        } else if c == '"' {
            in_string = true;
        } else if let Some(token) = NON_FINITE_TOKENS
            .iter()
            .find(|t| line[i..].starts_with(**t))
        {
            out.push_str("null");
            i += token.len();
            continue;
        }
        out.push(c);
        i += c.len_utf8();
    }

    Cow::Owned(out)
}

/// Read and flatten every record from `reader`, tagging each with `source_file`.
///
/// Returns the records and the number of non-blank lines that were dropped.
pub fn read_records<R: BufRead>(
    reader: R,
    source_file: &str,
) -> std::io::Result<(Vec<Record>, usize)> {
    let mut records = Vec::new();
    let mut skipped = 0;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(&line) {
            Some(raw) => records.push(record::flatten(raw, source_file)),
            None => {
                debug!("{}:{}: not a JSON object, skipping", source_file, idx + 1);
                skipped += 1;
            }
        }
    }

    Ok((records, skipped))
}

/// Convenience for callers holding a single path (used by `inspect_results`).
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<(Vec<Record>, usize)> {
    let path = path.as_ref();
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());
    let file = File::open(path).map_err(|e| TopicPlotError::io(path, e))?;
    read_records(BufReader::new(file), &name).map_err(|e| TopicPlotError::io(path, e))
}
