//! Session snapshot export/import.
//!
//! A snapshot is a flat, versioned description of everything that affects
//! render output: fractal kind and parameters, full viewport state, and the
//! active palette. Export-then-import must reproduce identical output; the
//! timestamp is informational only.

use fractalscope_compute::Fractal;
use fractalscope_core::Viewport;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("unsupported snapshot version {0} (current: {CURRENT_VERSION})")]
    UnsupportedVersion(u32),
    #[error("snapshot encode failed: {0}")]
    Encode(serde_json::Error),
    #[error("snapshot decode failed: {0}")]
    Decode(serde_json::Error),
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Snapshot {
    /// Schema version, checked on import.
    version: u32,
    pub fractal: Fractal,
    pub viewport: Viewport,
    pub palette_id: String,
    /// Unix seconds at capture time; not load-bearing for restore.
    pub timestamp: u64,
}

impl Snapshot {
    pub fn new(fractal: Fractal, viewport: Viewport, palette_id: String, timestamp: u64) -> Self {
        Self {
            version: CURRENT_VERSION,
            fractal,
            viewport,
            palette_id,
            timestamp,
        }
    }
}

pub fn export_snapshot(snapshot: &Snapshot) -> Result<String, SessionError> {
    serde_json::to_string(snapshot).map_err(SessionError::Encode)
}

pub fn import_snapshot(json: &str) -> Result<Snapshot, SessionError> {
    let snapshot: Snapshot = serde_json::from_str(json).map_err(SessionError::Decode)?;
    if snapshot.version != CURRENT_VERSION {
        log::warn!(
            "rejecting snapshot with version {} (current: {})",
            snapshot.version,
            CURRENT_VERSION
        );
        return Err(SessionError::UnsupportedVersion(snapshot.version));
    }
    Ok(snapshot)
}
