use crate::export::ExportError;
use crate::synth::TimestampRecord;
use std::path::Path;

pub fn timestamps_json(timestamps: &[TimestampRecord]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(timestamps)?)
}

pub fn read_timestamps(path: &Path) -> Result<Vec<TimestampRecord>, ExportError> {
    let raw = std::fs::read_to_string(path).map_err(|e| ExportError::io(path, e))?;
    Ok(serde_json::from_str(&raw)?)
}
