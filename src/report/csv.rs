//! CSV summary output

use super::Summary;
use std::io::{self, Write};

const HEADER: &str = "dataset,metric,model,embedding,n_topics,n,mean,ci_low,ci_high";

pub fn write<W: Write>(writer: &mut W, summary: &Summary) -> io::Result<()> {
    writeln!(writer, "{}", HEADER)?;
    for r in &summary.rows {
        writeln!(
            writer,
            "{},{},{},{},{},{},{:.6},{:.6},{:.6}",
            escape(&r.dataset),
            escape(&r.metric),
            escape(&r.model),
            escape(&r.embedding),
            r.n_topics,
            r.n,
            r.mean,
            r.ci_low,
            r.ci_high
        )?;
    }
    writer.flush()
}

fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
