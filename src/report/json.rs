//! JSON summary output

use super::Summary;
use chrono::Local;
use serde::Serialize;
use std::io::{self, Write};

#[derive(Serialize)]
struct JsonSummary<'a> {
    generated: String,
    #[serde(flatten)]
    summary: &'a Summary,
}

pub fn write<W: Write>(writer: &mut W, summary: &Summary) -> io::Result<()> {
    let doc = JsonSummary {
        generated: Local::now().to_rfc3339(),
        summary,
    };
    serde_json::to_writer_pretty(&mut *writer, &doc)?;
    writeln!(writer)?;
    writer.flush()
}
