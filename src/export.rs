//! JSON export of the current lot state.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::{json, Value};

use crate::data::LotData;

/// Build the export document for a lot.
///
/// ```json
/// {
///   "summary": { "total": 3, "free": 1, "occupied": 2, "entry_id": "42", "created_at": "..." },
///   "spots": [ { "field": "field1", "label": "...", "value": 1.0, "status": "Occupied", ... } ]
/// }
/// ```
pub fn export_json(data: &LotData) -> Value {
    let spots: Vec<Value> = data
        .spots
        .iter()
        .enumerate()
        .map(|(i, s)| {
            json!({
                "field": format!("field{}", i + 1),
                "label": s.label,
                "value": s.value,
                "status": format!("{:?}", s.status),
                "time": s.time,
                "url": s.url,
            })
        })
        .collect();

    let mut export = json!({
        "summary": {
            "total": data.spots.len(),
            "free": data.free_count(),
            "occupied": data.occupied_count(),
            "entry_id": data.entry_id,
            "created_at": data.created_at,
        },
        "spots": spots,
    });

    if let Some(ref channel) = data.channel {
        export["channel"] = json!({
            "id": channel.id,
            "name": channel.name,
            "last_entry_id": channel.last_entry_id,
        });
    }

    export
}

/// Write the export document to `path` as pretty-printed JSON.
pub fn write_export(path: &Path, data: &LotData) -> Result<()> {
    let json = serde_json::to_string_pretty(&export_json(data))?;
    let mut file =
        File::create(path).with_context(|| format!("creating {}", path.display()))?;
    file.write_all(json.as_bytes())?;
    file.write_all(b"\n")?;
    Ok(())
}
