//! JSON snapshot files
//!
//! Reads a previously captured [`ChainSnapshot`] for offline, reproducible
//! runs. Files are only ever read.

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::{ChainSnapshot, PositioningError, PositioningResult, SnapshotData};

use super::ChainProvider;

/// Parse and validate a snapshot from JSON text
pub fn parse_snapshot(json: &str) -> PositioningResult<ChainSnapshot> {
    let data: SnapshotData =
        serde_json::from_str(json).map_err(|e| PositioningError::Serialization(e.to_string()))?;
    ChainSnapshot::try_from(data)
}

/// Read a snapshot from a JSON file
pub fn load_snapshot(path: impl AsRef<Path>) -> PositioningResult<ChainSnapshot> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)?;
    let snapshot = parse_snapshot(&json)?;

    tracing::info!(
        "Loaded {} contracts for {} from {:?}",
        snapshot.len(),
        snapshot.underlying(),
        path
    );
    Ok(snapshot)
}

/// Provider backed by a single snapshot file
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ChainProvider for SnapshotFile {
    /// Load the file; a symbol mismatch is reported but not fatal
    fn fetch_snapshot(&self, symbol: &str) -> PositioningResult<ChainSnapshot> {
        let snapshot = load_snapshot(&self.path)?;
        if !symbol.is_empty() && !snapshot.underlying().eq_ignore_ascii_case(symbol) {
            tracing::warn!(
                "Snapshot {:?} is for {}, not {}",
                self.path,
                snapshot.underlying(),
                symbol
            );
        }
        Ok(snapshot)
    }
}
