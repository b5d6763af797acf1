//! Debug CSV ingester
//!
//! Reads a header-first CSV with columns
//! `id,source,target,cost,reverse_cost,length,geometry`, where
//! `geometry` is a bracketed `[[x,y],[x,y],…]` list. Rows that fail to
//! parse are skipped with a warning.

use std::fs::File;
use std::path::Path;

use geo::{Coord, LineString};
use log::warn;
use serde::Deserialize;

use crate::model::EdgeData;
use crate::Error;

#[derive(Debug, Deserialize)]
struct RawEdge {
    id: i64,
    source: i64,
    target: i64,
    cost: f64,
    reverse_cost: f64,
    length: f64,
    geometry: String,
}

/// Read an edge table from a debug CSV file.
///
/// # Errors
///
/// Returns an error when the file cannot be opened or read as CSV.
pub fn read_edge_csv(path: &Path) -> Result<EdgeData, Error> {
    let file = File::open(path)?;
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);

    let mut data = EdgeData::default();
    for record in reader.records() {
        let record = rejoin_geometry(record?);
        let raw: RawEdge = match record.deserialize(None) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Skipping malformed edge row: {e}");
                continue;
            }
        };
        let coords: Vec<[f64; 2]> = match serde_json::from_str(&raw.geometry) {
            Ok(coords) => coords,
            Err(e) => {
                warn!("Skipping edge {}: unparsable geometry: {e}", raw.id);
                continue;
            }
        };

        data.edge_ids.push(raw.id);
        data.sources.push(raw.source);
        data.targets.push(raw.target);
        data.costs.push(raw.cost);
        data.reverse_costs.push(raw.reverse_cost);
        data.lengths.push(raw.length);
        data.geometries.push(LineString::from(
            coords
                .into_iter()
                .map(|[x, y]| Coord { x, y })
                .collect::<Vec<_>>(),
        ));
    }

    Ok(data)
}

/// An unquoted geometry cell splits on its own commas; glue the spill
/// back into a single seventh field.
fn rejoin_geometry(record: csv::StringRecord) -> csv::StringRecord {
    if record.len() <= 7 {
        return record;
    }
    let mut fixed = csv::StringRecord::new();
    for field in record.iter().take(6) {
        fixed.push_field(field);
    }
    let tail: Vec<&str> = record.iter().skip(6).collect();
    fixed.push_field(&tail.join(","));
    fixed
}
