//! JSON-lines primitive input

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::errors::{Result, TranslatorError};
use crate::shared::models::RawPrimitive;

pub fn read_primitives_file(path: impl AsRef<Path>) -> Result<Vec<RawPrimitive>> {
    let path = path.as_ref();
    let primitives = read_primitives(BufReader::new(File::open(path)?))?;
    tracing::info!("Read {} primitives from {}", primitives.len(), path.display());
    Ok(primitives)
}

/// One `RawPrimitive` per line; blank lines are skipped
pub fn read_primitives(reader: impl BufRead) -> Result<Vec<RawPrimitive>> {
    let mut primitives = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let primitive = serde_json::from_str(&line).map_err(|e| {
            TranslatorError::serialization(format!("line {}: {}", index + 1, e))
        })?;
        primitives.push(primitive);
    }
    Ok(primitives)
}
