use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Write as _;
use std::io::Write;

use crate::models::{Result, ScoredArea};
use crate::scoring::ATTRIBUTES;

/// Column name of the appended score, matching the original dataset's.
pub const SCORE_COLUMN: &str = "importance_index";

/// Write the scored table as CSV: id, name, the raw attribute columns, and
/// the score. Missing attribute cells are left blank.
pub fn write_csv<W: Write>(writer: W, table: &[ScoredArea]) -> Result<()> {
    let mut out = csv::Writer::from_writer(writer);

    let mut header = vec!["id".to_string(), "name".to_string()];
    header.extend(ATTRIBUTES.iter().map(|a| (*a).to_string()));
    header.push(SCORE_COLUMN.to_string());
    out.write_record(&header)?;

    for area in table {
        let mut record = vec![area.id.clone(), area.name.clone().unwrap_or_default()];
        for attribute in ATTRIBUTES {
            record.push(
                area.attributes
                    .get(attribute)
                    .map(|v| v.to_string())
                    .unwrap_or_default(),
            );
        }
        record.push(format!("{:.6}", area.score));
        out.write_record(&record)?;
    }

    out.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct Export<'a> {
    generated_at: DateTime<Utc>,
    areas: &'a [ScoredArea],
}

pub fn write_json<W: Write>(writer: W, table: &[ScoredArea]) -> Result<()> {
    serde_json::to_writer_pretty(
        writer,
        &Export {
            generated_at: Utc::now(),
            areas: table,
        },
    )?;
    Ok(())
}

/// Plain-text ranking, highest score first.
pub fn format_table(table: &[ScoredArea]) -> String {
    let mut ranked: Vec<&ScoredArea> = table.iter().collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));

    let id_width = ranked
        .iter()
        .map(|area| area.id.len())
        .max()
        .unwrap_or(2)
        .max(2);

    let mut out = String::new();
    let _ = writeln!(out, "{:<id_width$}  {:>10}  name", "id", SCORE_COLUMN, id_width = id_width);
    for area in ranked {
        let _ = writeln!(
            out,
            "{:<id_width$}  {:>10.4}  {}",
            area.id,
            area.score,
            area.name.as_deref().unwrap_or("-"),
            id_width = id_width
        );
    }
    out
}
