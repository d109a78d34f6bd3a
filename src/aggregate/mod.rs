//! Tabular view over flattened records
//!
//! Rows are the flattened records in load order. Columns are the union of
//! every key seen, first-seen order, with the derived `Embedding` column at
//! the end. Rows lacking a column simply have no value for it.
//!
//! - [`stats`]: means and bootstrap intervals
//! - [`figure`]: per-dataset panels ready for rendering

pub mod figure;
pub mod stats;

use crate::record::{self, Record, DATASET_KEY, EMBEDDING_KEY, SOURCE_FILE_KEY};
use serde_json::Value;
use tracing::warn;

/// One flattened record plus its derived embedding label.
#[derive(Debug, Clone)]
pub struct Row {
    pub record: Record,
    pub embedding: String,
}

impl Row {
    pub fn new(record: Record) -> Self {
        let source = record
            .get(SOURCE_FILE_KEY)
            .map(record::display_value)
            .unwrap_or_default();
        let embedding = record::embedding_label(&source);
        Self { record, embedding }
    }

    /// Cell lookup that also answers for the derived `Embedding` column.
    pub fn get(&self, column: &str) -> Option<Value> {
        if column == EMBEDDING_KEY {
            return Some(Value::String(self.embedding.clone()));
        }
        self.record.get(column).cloned()
    }

    /// The raw `dataset` value; `5` and `"5"` are different datasets.
    pub fn dataset_key(&self) -> Option<&Value> {
        match self.record.get(DATASET_KEY) {
            None | Some(Value::Null) => None,
            Some(v) => Some(v),
        }
    }

    pub fn dataset(&self) -> Option<String> {
        self.dataset_key().map(record::display_value)
    }
}

#[derive(Debug, Default)]
pub struct Table {
    rows: Vec<Row>,
    columns: Vec<String>,
}

/// Rows sharing one `dataset` value.
#[derive(Debug)]
pub struct Group<'a> {
    pub key: Value,
    /// Display form of `key`, used for titles and file names
    pub dataset: String,
    pub rows: Vec<&'a Row>,
}

impl<'a> Group<'a> {
    /// True when at least one row holds a non-null value for `column`.
    pub fn has_column(&self, column: &str) -> bool {
        self.rows
            .iter()
            .any(|row| matches!(row.record.get(column), Some(v) if !v.is_null()))
    }
}

impl Table {
    pub fn new(records: Vec<Record>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for rec in &records {
            for key in rec.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }
        if !records.is_empty() {
            columns.push(EMBEDDING_KEY.to_string());
        }

        let rows = records.into_iter().map(Row::new).collect();
        Self { rows, columns }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct dataset values in first-seen order, compared as JSON values.
    pub fn dataset_keys(&self) -> Vec<&Value> {
        let mut seen: Vec<&Value> = Vec::new();
        for key in self.rows.iter().filter_map(Row::dataset_key) {
            if !seen.contains(&key) {
                seen.push(key);
            }
        }
        seen
    }

    /// Display names of [`Table::dataset_keys`].
    pub fn datasets(&self) -> Vec<String> {
        self.dataset_keys()
            .into_iter()
            .map(record::display_value)
            .collect()
    }

    pub fn group<V: Into<Value>>(&self, key: V) -> Group<'_> {
        let key = key.into();
        Group {
            dataset: record::display_value(&key),
            rows: self
                .rows
                .iter()
                .filter(|row| row.dataset_key() == Some(&key))
                .collect(),
            key,
        }
    }

    /// One group per dataset, first-seen order. Rows without a dataset are
    /// left out of every group.
    pub fn groups(&self) -> Vec<Group<'_>> {
        let unlabeled = self.rows.iter().filter(|r| r.dataset().is_none()).count();
        if unlabeled > 0 {
            warn!("{} record(s) have no dataset and will not be plotted", unlabeled);
        }
        self.dataset_keys()
            .into_iter()
            .map(|key| self.group(key.clone()))
            .collect()
    }
}
