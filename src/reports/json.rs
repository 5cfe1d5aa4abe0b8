use crate::Result;
use crate::metrics::{RepositoryMetrics, cells};
use core::fmt::Write;
use serde_json::{Value, json};

/// Write `rows` as a JSON array, each row an object keyed by column id.
#[expect(unused_results, reason = "Map::insert intentionally overwrites values")]
pub fn generate<W: Write>(rows: &[RepositoryMetrics], writer: &mut W) -> Result<()> {
    let mut output = Vec::with_capacity(rows.len());

    for row in rows {
        let mut row_obj = serde_json::Map::new();
        for (def, cell) in cells(row) {
            row_obj.insert(def.id.to_string(), serde_json::to_value(&cell)?);
        }
        output.push(Value::Object(row_obj));
    }

    write!(writer, "{}", serde_json::to_string_pretty(&json!(output))?)?;
    Ok(())
}
