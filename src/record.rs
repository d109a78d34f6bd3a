//! Result records and the flatten/tag transform
//!
//! A record is one JSON object from a results file. Evaluation metrics arrive
//! nested under `results`:
//!
//! ```text
//! {"dataset": "D1", "model": "S3", "n_topics": 5,
//!  "results": {"diversity": 0.5, "wec_ex": 0.2, "wec_in": 0.3}}
//! ```
//!
//! Flattening promotes those keys to the top level so every metric becomes a
//! column, and tags the record with the file it came from.

use serde_json::{Map, Value};

pub type Record = Map<String, Value>;

pub const RESULTS_KEY: &str = "results";
pub const SOURCE_FILE_KEY: &str = "source_file";
pub const EMBEDDING_KEY: &str = "Embedding";
pub const DATASET_KEY: &str = "dataset";
pub const MODEL_KEY: &str = "model";
pub const N_TOPICS_KEY: &str = "n_topics";

/// Promote nested `results` keys to the top level and tag with `source_file`.
///
/// Promoted keys overwrite same-named top-level keys. A `results` value that
/// is not an object is left in place.
pub fn flatten(mut record: Record, source_file: &str) -> Record {
    if matches!(record.get(RESULTS_KEY), Some(Value::Object(_))) {
        if let Some(Value::Object(nested)) = record.remove(RESULTS_KEY) {
            for (key, value) in nested {
                record.insert(key, value);
            }
        }
    }
    record.insert(
        SOURCE_FILE_KEY.to_string(),
        Value::String(source_file.to_string()),
    );
    record
}

/// Human-readable embedding label for a results file name.
pub fn embedding_label(source_file: &str) -> String {
    if source_file.contains("intfloat") {
        "e5-large-v2".to_string()
    } else if source_file.contains("MiniLM") {
        "MiniLM-L6-v2".to_string()
    } else {
        source_file.to_string()
    }
}

/// Render a cell for labels and grouping: strings verbatim, everything else as JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
