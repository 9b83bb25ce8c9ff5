use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::Prescription;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Snapshot not found: {0}")]
    NotFound(PathBuf),
    #[error("Snapshot I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reads a JSON array of prescriptions, as returned by the list endpoint.
pub fn load_prescriptions(path: &Path) -> Result<Vec<Prescription>, StoreError> {
    let raw = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => StoreError::NotFound(path.to_path_buf()),
        _ => StoreError::Io(e),
    })?;

    let prescriptions: Vec<Prescription> = serde_json::from_str(&raw)?;
    log::debug!(
        "Loaded {} prescription(s) from {}",
        prescriptions.len(),
        path.display()
    );
    Ok(prescriptions)
}

pub fn save_prescriptions(path: &Path, prescriptions: &[Prescription]) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(prescriptions)?;
    fs::write(path, json)?;
    log::debug!(
        "Saved {} prescription(s) to {}",
        prescriptions.len(),
        path.display()
    );
    Ok(())
}
